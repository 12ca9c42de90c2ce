//! Banner for a dataset that could not be loaded.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    /// Headline shown in bold
    pub message: String,
    /// Underlying cause, shown muted below the headline
    #[props(default)]
    pub detail: Option<String>,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 12px 16px; margin: 8px 0; background: #FFF3E0; color: #B71C1C; border-left: 4px solid #E53935; border-radius: 4px; font-size: 14px;",
            strong { "{props.message}" }
            if let Some(detail) = props.detail {
                div {
                    style: "margin-top: 4px; color: #666; font-size: 12px;",
                    "{detail}"
                }
            }
        }
    }
}
