//! Shared Dioxus components and Mapbox GL JS bridge for the Safe Swim map.
//!
//! This crate provides:
//! - `js_bridge`: `MapboxSurface`, the browser implementation of `MapSurface`,
//!   plus the static dataset fetch
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: RSX components (filter panel, legend, map view, ...)

pub mod js_bridge;
pub mod state;
pub mod components;
