//! Region and status checkbox filters with the page title and blurb.

use super::status_legend::ColorIndicator;
use dioxus::prelude::*;
use swim_core::selection::{FilterControls, FilterSelection, Toggle};
use swim_core::site::{Region, Status};

const CEDEN_URL: &str = "https://data.ca.gov/dataset/surface-water-chemistry-results";

#[derive(Props, Clone, PartialEq)]
pub struct FilterPanelProps {
    /// Receives the complete selection after every checkbox change
    pub on_filter_change: EventHandler<FilterSelection>,
}

/// Checkbox groups for status (All/Safe/Caution/Unsafe) and region (All/LA/OC).
///
/// The "All" boxes are checked exactly when every member of their group is.
/// The panel owns the selection; `on_filter_change` receives a copy after
/// each toggle.
#[component]
pub fn FilterPanel(props: FilterPanelProps) -> Element {
    let on_filter_change = props.on_filter_change;
    let mut controls = use_signal(move || {
        FilterControls::new(move |selection: &FilterSelection| on_filter_change.call(selection.clone()))
    });
    let selection = controls.read().selection().clone();

    let on_status = move |toggle: Toggle<Status>| {
        move |evt: Event<FormData>| controls.write().toggle_status(toggle, evt.checked())
    };
    let on_region = move |toggle: Toggle<Region>| {
        move |evt: Event<FormData>| controls.write().toggle_region(toggle, evt.checked())
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 24px; padding: 8px; max-width: 700px; margin: 0 auto;",

            div {
                h2 {
                    style: "margin: 0 0 8px 0; font-size: 22px; font-weight: 400;",
                    "Surface Water - Indicator Bacteria Results Map"
                }
                p {
                    style: "margin: 0; font-size: 14px; line-height: 1.5;",
                    "Indicator bacteria data from the California Environmental Data Exchange Network (CEDEN) and BeachWatch databases. "
                    "Results include E. coli, enterococci, fecal coliforms, and total coliforms. "
                    "There is some overlap with the CEDEN Water Chemistry dataset ("
                    a { href: CEDEN_URL, target: "_blank", rel: "noopener noreferrer", "{CEDEN_URL}" }
                    "). Both datasets draw from the same source, but the resources here are updated more frequently "
                    "to support the Safe to Swim map on the Water Boards My Water Quality portal."
                }
            }

            div {
                style: "display: flex; justify-content: space-between; gap: 32px;",

                fieldset {
                    style: "flex: 2; border: none; padding: 0; margin: 0;",
                    legend { style: "font-size: 1.15rem; font-weight: 700;", "Status" }
                    label {
                        style: "display: flex; align-items: center; gap: 4px; margin: 4px 0;",
                        input {
                            r#type: "checkbox",
                            name: "all",
                            checked: selection.all_statuses_checked(),
                            onchange: on_status(Toggle::All),
                        }
                        "All Statuses"
                    }
                    for status in Status::ALL {
                        label {
                            key: "{status}",
                            style: "display: flex; align-items: center; gap: 4px; margin: 4px 0;",
                            input {
                                r#type: "checkbox",
                                name: "{status}",
                                checked: selection.is_status_checked(status),
                                onchange: on_status(Toggle::One(status)),
                            }
                            ColorIndicator { color: status.color().to_string() }
                            {status.label()}
                            span {
                                style: "font-size: 0.75rem; margin-left: 4px;",
                                {format!("- {}", status.description())}
                            }
                        }
                    }
                }

                fieldset {
                    style: "flex: 1; border: none; padding: 0; margin: 0;",
                    legend { style: "font-size: 1.15rem; font-weight: 700;", "Region" }
                    label {
                        style: "display: flex; align-items: center; gap: 4px; margin: 4px 0;",
                        input {
                            r#type: "checkbox",
                            name: "all",
                            checked: selection.all_regions_checked(),
                            onchange: on_region(Toggle::All),
                        }
                        "All Regions"
                    }
                    for region in Region::ALL {
                        label {
                            key: "{region}",
                            style: "display: flex; align-items: center; gap: 4px; margin: 4px 0;",
                            input {
                                r#type: "checkbox",
                                name: "{region}",
                                checked: selection.is_region_checked(region),
                                onchange: on_region(Toggle::One(region)),
                            }
                            {region.label()}
                        }
                    }
                }
            }

            p {
                style: "margin: 0; font-size: 14px;",
                "*Click on the map marker to view your area's swim status and pH levels"
            }
        }
    }
}
