//! Loading indicator shown while the dataset is fetched.

use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 12px; color: #666; font-size: 14px;",
            "Loading test sites..."
        }
    }
}
