//! Lifecycle owner for the map surface.
//!
//! ```text
//! Uninitialized --mount--> Initializing --style loaded--> Ready --destroy--> Destroyed
//! ```
//!
//! The adapter holds at most one surface. Every operation is guarded by an
//! existence check, so mounting twice, binding before the surface exists and
//! destroying twice are all safe no-ops or deferrals.

use crate::interaction;
use crate::surface::{circle_layer, MapSurface, SurfaceConfig, SurfaceEvent, LAYER_ID, SOURCE_ID};
use geojson::FeatureCollection;
use log::{debug, error, info};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SurfaceState {
    Uninitialized,
    Initializing,
    Ready,
    Destroyed,
}

pub struct MapAdapter<S> {
    config: SurfaceConfig,
    surface: Option<S>,
    state: SurfaceState,
    /// Latest data not yet pushed to the surface.
    pending: Option<FeatureCollection>,
    awaiting_style: bool,
    click_attached: bool,
}

impl<S: MapSurface> MapAdapter<S> {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            config,
            surface: None,
            state: SurfaceState::Uninitialized,
            pending: None,
            awaiting_style: false,
            click_attached: false,
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Create the surface in `container` unless one already exists.
    ///
    /// A missing container or a failing `create` leaves the adapter
    /// uninitialized; construction errors are logged, never returned.
    pub fn mount<F>(&mut self, container: Option<&str>, create: F)
    where
        F: FnOnce(&str, &SurfaceConfig) -> anyhow::Result<S>,
    {
        if self.surface.is_some() {
            debug!("Map surface already exists, skipping mount");
            return;
        }
        let Some(container) = container else {
            debug!("No map container available yet");
            return;
        };

        match create(container, &self.config) {
            Ok(surface) => {
                info!("Map surface created in #{}", container);
                self.surface = Some(surface);
                self.state = SurfaceState::Initializing;
                self.awaiting_style = false;
                self.click_attached = false;
                if self.pending.is_some() {
                    self.sync();
                }
            }
            Err(e) => {
                error!("Error initializing map surface: {:#}", e);
                self.state = SurfaceState::Uninitialized;
            }
        }
    }

    /// Bind `data` to the site source.
    ///
    /// The first bind on a ready surface adds the source and the circle
    /// layer; later binds only swap the source data. Before the style has
    /// loaded the data is held and pushed when the one-shot style signal
    /// fires; only the latest data is kept.
    pub fn bind(&mut self, data: FeatureCollection) {
        debug!("Binding {} features", data.features.len());
        self.pending = Some(data);
        if self.surface.is_none() {
            debug!("Map surface not created yet, deferring bind");
            return;
        }
        self.sync();
    }

    /// React to an event reported by the surface.
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Load => info!("Map loaded successfully."),
            SurfaceEvent::Error { message } => error!("Map surface error: {}", message),
            SurfaceEvent::StyleLoad => {
                self.awaiting_style = false;
                if self.surface.is_none() {
                    return;
                }
                self.state = SurfaceState::Ready;
                self.push_pending();
            }
            SurfaceEvent::PointActivated(activation) => {
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };
                if let Some(popup) = interaction::popup_for(&activation) {
                    surface.show_popup(&popup);
                }
            }
        }
    }

    /// Remove the surface if there is one. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        let Some(mut surface) = self.surface.take() else {
            return;
        };
        if self.click_attached && surface.has_layer(LAYER_ID) {
            surface.off_click(LAYER_ID);
        }
        surface.remove();
        self.click_attached = false;
        self.awaiting_style = false;
        self.state = SurfaceState::Destroyed;
        info!("Map surface removed");
    }

    fn sync(&mut self) {
        self.refresh_click_observer();

        if self.state == SurfaceState::Ready {
            // Ready is stable; `isStyleLoaded` also reads false while tiles load.
            self.push_pending();
            return;
        }

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if surface.is_style_loaded() {
            self.state = SurfaceState::Ready;
            self.push_pending();
        } else if !self.awaiting_style {
            debug!("Map style not loaded, deferring bind until it is");
            surface.once_style_load();
            self.awaiting_style = true;
        }
    }

    /// Detach and reattach the click observer so it follows the current data.
    fn refresh_click_observer(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if self.click_attached && surface.has_layer(LAYER_ID) {
            surface.off_click(LAYER_ID);
            self.click_attached = false;
        }
        if !self.click_attached {
            surface.on_click(LAYER_ID);
            self.click_attached = true;
        }
    }

    fn push_pending(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(data) = self.pending.take() else {
            return;
        };
        if surface.has_source(SOURCE_ID) {
            surface.set_source_data(SOURCE_ID, &data);
        } else {
            surface.add_source(SOURCE_ID, &data);
        }
        if !surface.has_layer(LAYER_ID) {
            surface.add_layer(&circle_layer());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::Activation;
    use geojson::{Feature, Geometry, JsonValue, Value};
    use serde_json::json;
    use std::cell::Cell;
    use std::collections::{BTreeMap, BTreeSet};
    use std::rc::Rc;
    use swim_core::popup::{LngLat, Popup};

    /// Records every call the adapter makes.
    #[derive(Default)]
    struct FakeSurface {
        style_loaded: bool,
        sources: BTreeMap<String, FeatureCollection>,
        layers: Vec<JsonValue>,
        data_swaps: usize,
        style_waits: usize,
        click_layers: BTreeSet<String>,
        click_attaches: usize,
        click_detaches: usize,
        popups: Vec<Popup>,
        removed: Rc<Cell<usize>>,
    }

    impl FakeSurface {
        fn loaded() -> Self {
            Self {
                style_loaded: true,
                ..Self::default()
            }
        }
    }

    impl MapSurface for FakeSurface {
        fn is_style_loaded(&self) -> bool {
            self.style_loaded
        }

        fn once_style_load(&mut self) {
            self.style_waits += 1;
        }

        fn has_source(&self, source_id: &str) -> bool {
            self.sources.contains_key(source_id)
        }

        fn add_source(&mut self, source_id: &str, data: &FeatureCollection) {
            assert!(self.sources.insert(source_id.to_string(), data.clone()).is_none());
        }

        fn set_source_data(&mut self, source_id: &str, data: &FeatureCollection) {
            let source = self.sources.get_mut(source_id).expect("source must exist");
            *source = data.clone();
            self.data_swaps += 1;
        }

        fn has_layer(&self, layer_id: &str) -> bool {
            self.layers.iter().any(|l| l["id"] == layer_id)
        }

        fn add_layer(&mut self, layer: &JsonValue) {
            self.layers.push(layer.clone());
        }

        fn on_click(&mut self, layer_id: &str) {
            assert!(self.click_layers.insert(layer_id.to_string()), "duplicate click observer");
            self.click_attaches += 1;
        }

        fn off_click(&mut self, layer_id: &str) {
            self.click_layers.remove(layer_id);
            self.click_detaches += 1;
        }

        fn show_popup(&mut self, popup: &Popup) {
            self.popups.push(popup.clone());
        }

        fn remove(&mut self) {
            self.removed.set(self.removed.get() + 1);
        }
    }

    fn sites(names: &[&str]) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: names
                .iter()
                .enumerate()
                .map(|(i, name)| Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(vec![-118.0 - i as f64 * 0.1, 33.8]))),
                    id: None,
                    properties: json!({ "name": name, "status": "safe" }).as_object().cloned(),
                    foreign_members: None,
                })
                .collect(),
            foreign_members: None,
        }
    }

    fn adapter() -> MapAdapter<FakeSurface> {
        MapAdapter::new(SurfaceConfig::new("pk.test"))
    }

    fn fire_style_load(adapter: &mut MapAdapter<FakeSurface>) {
        if let Some(surface) = adapter.surface_mut() {
            surface.style_loaded = true;
        }
        adapter.handle_event(SurfaceEvent::StyleLoad);
    }

    fn bound_names(adapter: &MapAdapter<FakeSurface>) -> Vec<String> {
        adapter.surface().unwrap().sources[SOURCE_ID]
            .features
            .iter()
            .map(|f| f.property("name").and_then(JsonValue::as_str).unwrap_or("?").to_string())
            .collect()
    }

    #[test]
    fn test_mount_requires_container() {
        let mut adapter = adapter();
        adapter.mount(None, |_, _| Ok(FakeSurface::loaded()));
        assert_eq!(adapter.state(), SurfaceState::Uninitialized);
        assert!(adapter.surface().is_none());
    }

    #[test]
    fn test_second_mount_is_a_no_op() {
        let mut adapter = adapter();
        let created = Cell::new(0);
        let create = |_: &str, _: &SurfaceConfig| -> anyhow::Result<FakeSurface> {
            created.set(created.get() + 1);
            Ok(FakeSurface::default())
        };
        adapter.mount(Some("swim-map"), create);
        adapter.mount(Some("swim-map"), create);
        assert_eq!(created.get(), 1);
        assert_eq!(adapter.state(), SurfaceState::Initializing);
    }

    #[test]
    fn test_failed_construction_stays_uninitialized() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |_, config| {
            anyhow::ensure!(config.access_token.is_empty(), "token rejected");
            Ok(FakeSurface::default())
        });
        assert_eq!(adapter.state(), SurfaceState::Uninitialized);
        assert!(adapter.surface().is_none());
    }

    #[test]
    fn test_config_reaches_constructor() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |container, config| {
            assert_eq!(container, "swim-map");
            assert_eq!(config.access_token, "pk.test");
            Ok(FakeSurface::default())
        });
        assert!(adapter.surface().is_some());
    }

    #[test]
    fn test_bind_on_loaded_style_adds_source_and_layer() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::loaded()));
        adapter.bind(sites(&["Venice"]));

        assert_eq!(adapter.state(), SurfaceState::Ready);
        let surface = adapter.surface().unwrap();
        assert_eq!(surface.sources.len(), 1);
        assert_eq!(surface.layers.len(), 1);
        assert_eq!(surface.layers[0], circle_layer());
        assert_eq!(surface.style_waits, 0);
    }

    #[test]
    fn test_rebinding_swaps_data_only() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::loaded()));
        adapter.bind(sites(&["Venice", "Malibu"]));
        adapter.bind(sites(&["Venice", "Malibu"]));
        adapter.bind(sites(&["Zuma"]));

        let surface = adapter.surface().unwrap();
        assert_eq!(surface.sources.len(), 1);
        assert_eq!(surface.layers.len(), 1);
        assert_eq!(surface.data_swaps, 2);
        assert_eq!(bound_names(&adapter), vec!["Zuma"]);
    }

    #[test]
    fn test_rebinding_when_ready_ignores_style_loading_flag() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::loaded()));
        adapter.bind(sites(&["Venice", "Malibu", "Zuma"]));
        assert_eq!(adapter.state(), SurfaceState::Ready);

        // Tiles for the new data are loading.
        adapter.surface_mut().unwrap().style_loaded = false;
        adapter.bind(sites(&["Zuma"]));

        let surface = adapter.surface().unwrap();
        assert_eq!(adapter.state(), SurfaceState::Ready);
        assert_eq!(surface.style_waits, 0);
        assert_eq!(surface.data_swaps, 1);
        assert_eq!(surface.layers.len(), 1);
        assert_eq!(bound_names(&adapter), vec!["Zuma"]);
    }

    #[test]
    fn test_bind_before_style_load_waits_once() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::default()));
        adapter.bind(sites(&["Venice"]));
        adapter.bind(sites(&["Malibu"]));

        let surface = adapter.surface().unwrap();
        assert_eq!(surface.style_waits, 1);
        assert!(surface.sources.is_empty());
        assert_eq!(adapter.state(), SurfaceState::Initializing);

        fire_style_load(&mut adapter);
        assert_eq!(adapter.state(), SurfaceState::Ready);
        assert_eq!(bound_names(&adapter), vec!["Malibu"]);
        assert_eq!(adapter.surface().unwrap().layers.len(), 1);
    }

    #[test]
    fn test_bind_before_mount_is_applied_after_mount() {
        let mut adapter = adapter();
        adapter.bind(sites(&["Huntington"]));
        assert_eq!(adapter.state(), SurfaceState::Uninitialized);

        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::loaded()));
        assert_eq!(adapter.state(), SurfaceState::Ready);
        assert_eq!(bound_names(&adapter), vec!["Huntington"]);
    }

    #[test]
    fn test_click_observer_follows_data_without_duplicates() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::default()));
        adapter.bind(sites(&["Venice"]));
        // Layer does not exist yet, so the observer is left in place.
        adapter.bind(sites(&["Malibu"]));
        assert_eq!(adapter.surface().unwrap().click_attaches, 1);
        assert_eq!(adapter.surface().unwrap().click_detaches, 0);

        fire_style_load(&mut adapter);
        adapter.bind(sites(&["Zuma"]));
        assert_eq!(bound_names(&adapter), vec!["Zuma"]);
        let surface = adapter.surface().unwrap();
        assert_eq!(surface.style_waits, 1);
        assert_eq!(surface.click_attaches, 2);
        assert_eq!(surface.click_detaches, 1);
        assert!(surface.click_layers.contains(LAYER_ID));
    }

    #[test]
    fn test_point_activation_shows_popup() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::loaded()));
        let data = sites(&["Cabrillo"]);
        adapter.bind(data.clone());

        adapter.handle_event(SurfaceEvent::PointActivated(Activation {
            lng_lat: LngLat { lng: 241.95, lat: 33.8 },
            features: data.features.clone(),
        }));
        adapter.handle_event(SurfaceEvent::PointActivated(Activation {
            lng_lat: LngLat { lng: -118.0, lat: 33.8 },
            features: Vec::new(),
        }));

        let popups = &adapter.surface().unwrap().popups;
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].lng_lat, LngLat { lng: 242.0, lat: 33.8 });
        assert!(popups[0].html.contains("<strong>Cabrillo</strong>"));
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let removed = Rc::new(Cell::new(0));
        let mut adapter = adapter();
        let counter = removed.clone();
        adapter.mount(Some("swim-map"), move |_, _| {
            Ok(FakeSurface {
                removed: counter,
                ..FakeSurface::loaded()
            })
        });
        adapter.bind(sites(&["Venice"]));

        adapter.destroy();
        adapter.destroy();
        assert_eq!(removed.get(), 1);
        assert_eq!(adapter.state(), SurfaceState::Destroyed);
        assert!(adapter.surface().is_none());

        // Events arriving after teardown are ignored.
        adapter.handle_event(SurfaceEvent::StyleLoad);
        assert_eq!(adapter.state(), SurfaceState::Destroyed);
    }

    #[test]
    fn test_remount_after_destroy() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::loaded()));
        adapter.destroy();
        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::loaded()));
        adapter.bind(sites(&["Venice"]));
        assert_eq!(adapter.state(), SurfaceState::Ready);
        assert_eq!(adapter.surface().unwrap().click_attaches, 1);
    }

    #[test]
    fn test_load_and_error_events_are_non_fatal() {
        let mut adapter = adapter();
        adapter.mount(Some("swim-map"), |_, _| Ok(FakeSurface::default()));
        adapter.handle_event(SurfaceEvent::Load);
        adapter.handle_event(SurfaceEvent::Error {
            message: "Unauthorized".to_string(),
        });
        assert_eq!(adapter.state(), SurfaceState::Initializing);
    }
}
