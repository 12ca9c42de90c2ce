//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use geojson::FeatureCollection;
use swim_core::selection::FilterSelection;

/// Shared application state for the Safe Swim map.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Current region/status checkbox selection. Written only by
    /// `FilterPanel`, which renders its checkboxes from its own
    /// `FilterControls` and mirrors every change here.
    pub selection: Signal<FilterSelection>,
    /// Sites passing the current selection (None until the first load)
    pub sites: Signal<Option<FeatureCollection>>,
    /// Whether the first dataset load is still in flight
    pub loading: Signal<bool>,
    /// Error message if the dataset could not be loaded
    pub error_msg: Signal<Option<String>>,
    /// Sequence of dataset loads; only the newest may write `sites`
    pub loads: Signal<LoadSequence>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            selection: Signal::new(FilterSelection::default()),
            sites: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            loads: Signal::new(LoadSequence::default()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Numbers overlapping dataset loads so a slow, older load cannot overwrite
/// the result of a newer selection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSequence {
    latest: u64,
}

impl LoadSequence {
    /// Start a load and return its ticket. Earlier tickets become stale.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}
