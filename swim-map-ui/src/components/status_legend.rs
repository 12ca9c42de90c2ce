//! Status color key.

use dioxus::prelude::*;
use swim_core::site::Status;

#[derive(Props, Clone, PartialEq)]
pub struct ColorIndicatorProps {
    pub color: String,
    /// Diameter in pixels
    #[props(default = 15)]
    pub size: u32,
}

/// Round color swatch matching a map marker.
#[component]
pub fn ColorIndicator(props: ColorIndicatorProps) -> Element {
    let style = format!(
        "min-width: {size}px; width: {size}px; height: {size}px; background-color: {color}; border-radius: 50%; border: 1px solid #ccc; box-shadow: 0 4px 4px rgba(0, 0, 0, 0.1); margin-right: 8px;",
        size = props.size,
        color = props.color,
    );
    rsx! {
        div { style: "{style}" }
    }
}

/// Legend listing each status with its marker color and meaning.
#[component]
pub fn StatusLegend() -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; margin-top: 12px;",
            for status in Status::ALL {
                div {
                    key: "{status}",
                    style: "display: flex; align-items: center; font-size: 14px;",
                    ColorIndicator { color: status.color().to_string(), size: 20 }
                    span {
                        strong { {status.label()} }
                        {format!(" - {}", status.description())}
                    }
                }
            }
        }
    }
}
