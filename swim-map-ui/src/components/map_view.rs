//! Map container bound to the filtered sites in `AppState`.

use crate::js_bridge::{self, MapboxSurface};
use crate::state::AppState;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use swim_map::adapter::MapAdapter;
use swim_map::surface::{SurfaceConfig, SurfaceEvent};

type SharedAdapter = Rc<RefCell<MapAdapter<MapboxSurface>>>;

#[derive(Props, Clone, PartialEq)]
pub struct MapViewProps {
    /// The DOM id for the map container (Mapbox renders into this)
    pub id: String,
    pub config: SurfaceConfig,
}

/// Creates the map once on mount, re-binds the site source whenever the
/// filtered sites change and removes the map on unmount.
#[component]
pub fn MapView(props: MapViewProps) -> Element {
    let state = use_context::<AppState>();
    let config = props.config.clone();
    let adapter: SharedAdapter = use_hook(move || Rc::new(RefCell::new(MapAdapter::new(config))));

    let mount_adapter = adapter.clone();
    let container_id = props.id.clone();
    use_effect(move || mount_surface(&mount_adapter, &container_id));

    let bind_adapter = adapter.clone();
    use_effect(move || {
        if let Some(sites) = (state.sites)() {
            bind_adapter.borrow_mut().bind(sites);
        }
    });

    let drop_adapter = adapter.clone();
    use_drop(move || drop_adapter.borrow_mut().destroy());

    rsx! {
        div {
            id: "{props.id}",
            style: "width: 100%; height: calc(100vh - 150px); border-radius: 8px; overflow: hidden;",
        }
    }
}

fn mount_surface(adapter: &SharedAdapter, container_id: &str) {
    let container = js_bridge::element_exists(container_id).then_some(container_id);
    let events = Rc::downgrade(adapter);
    adapter.borrow_mut().mount(container, move |id, config| {
        MapboxSurface::create(id, config, move |event| dispatch(&events, event))
    });
}

/// Route a surface event to the adapter. Events raised while the adapter is
/// already borrowed (for instance during construction) are handled on the
/// next tick.
fn dispatch(adapter: &Weak<RefCell<MapAdapter<MapboxSurface>>>, event: SurfaceEvent) {
    let Some(adapter) = adapter.upgrade() else {
        return;
    };
    if let Ok(mut current) = adapter.try_borrow_mut() {
        current.handle_event(event);
        return;
    }
    wasm_bindgen_futures::spawn_local(async move {
        adapter.borrow_mut().handle_event(event);
    });
}
