//! Map surface lifecycle and interaction for the Safe Swim map.
//!
//! The rendering surface itself (Mapbox GL JS in the browser) sits behind the
//! [`surface::MapSurface`] trait. [`adapter::MapAdapter`] owns exactly one
//! surface handle and drives it through create → bind → destroy, deferring
//! data binds until the surface reports its style as loaded.
//! [`interaction`] turns a click on a rendered point into a popup.

pub mod adapter;
pub mod interaction;
pub mod surface;
