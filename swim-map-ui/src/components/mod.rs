//! Reusable Dioxus RSX components for the Safe Swim map.

mod error_display;
mod filter_panel;
mod loading_spinner;
mod map_view;
mod status_legend;

pub use error_display::ErrorDisplay;
pub use filter_panel::FilterPanel;
pub use loading_spinner::LoadingSpinner;
pub use map_view::MapView;
pub use status_legend::{ColorIndicator, StatusLegend};
