//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Mapbox GL JS glue lives in `assets/js/swim-map.js`, is embedded at
//! compile time and exposed as `window.swimMap`. `MapboxSurface` implements
//! `MapSurface` by calling those globals; events come back through a
//! `wasm-bindgen` closure as JSON.

use anyhow::anyhow;
use geojson::{FeatureCollection, JsonValue};
use swim_core::popup::Popup;
use swim_map::surface::{MapSurface, SurfaceConfig, SurfaceEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

// Embed the map bridge at compile time
static SWIM_MAP_JS: &str = include_str!("../assets/js/swim-map.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Swim map JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate a JS expression as a boolean; any failure reads as `false`.
fn eval_bool(expr: &str) -> bool {
    let wrapped = format!("(function() {{ try {{ return !!({}); }} catch(e) {{ return false; }} }})()", expr);
    js_sys::eval(&wrapped)
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Quote a Rust string as a JS string literal.
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Load and evaluate the map bridge. Safe to call more than once.
pub fn load_map_scripts() {
    let _ = js_sys::eval(SWIM_MAP_JS);
}

/// Whether an element with `id` is present in the document.
pub fn element_exists(id: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .is_some()
}

/// Fetch a text resource relative to the page.
pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no global window"))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| anyhow!("fetch of {} did not return a Response", url))?;
    if !response.ok() {
        anyhow::bail!("HTTP {} fetching {}", response.status(), url);
    }
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| anyhow!("body of {} is not text", url))
}

/// A Mapbox GL JS map living in one container element.
pub struct MapboxSurface {
    container_id: String,
    // Kept alive for as long as the map may dispatch events.
    _dispatch: Closure<dyn FnMut(String)>,
}

impl MapboxSurface {
    /// Construct the map in `container_id`. Decoded surface events are
    /// passed to `on_event`.
    pub fn create<F>(container_id: &str, config: &SurfaceConfig, mut on_event: F) -> anyhow::Result<Self>
    where
        F: FnMut(SurfaceEvent) + 'static,
    {
        anyhow::ensure!(!config.access_token.is_empty(), "missing Mapbox access token");
        load_map_scripts();

        let dispatch = Closure::<dyn FnMut(String)>::new(move |payload: String| {
            match serde_json::from_str::<SurfaceEvent>(&payload) {
                Ok(event) => on_event(event),
                Err(e) => log::warn!("Ignoring undecodable map event {}: {}", payload, e),
            }
        });

        let window = web_sys::window().ok_or_else(|| anyhow!("no global window"))?;
        let bridge = js_sys::Reflect::get(&window, &JsValue::from_str("swimMap")).map_err(js_err)?;
        let create: js_sys::Function = js_sys::Reflect::get(&bridge, &JsValue::from_str("create"))
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| anyhow!("swimMap.create is not a function"))?;

        let config_json = serde_json::to_string(config)?;
        create
            .call3(
                &bridge,
                &JsValue::from_str(container_id),
                &JsValue::from_str(&config_json),
                dispatch.as_ref(),
            )
            .map_err(js_err)?;

        Ok(Self {
            container_id: container_id.to_string(),
            _dispatch: dispatch,
        })
    }

    fn target(&self) -> String {
        js_str(&self.container_id)
    }
}

impl MapSurface for MapboxSurface {
    fn is_style_loaded(&self) -> bool {
        eval_bool(&format!("window.swimMap.isStyleLoaded({})", self.target()))
    }

    fn once_style_load(&mut self) {
        call_js(&format!("window.swimMap.onceStyleLoad({});", self.target()));
    }

    fn has_source(&self, source_id: &str) -> bool {
        eval_bool(&format!(
            "window.swimMap.hasSource({}, {})",
            self.target(),
            js_str(source_id)
        ))
    }

    fn add_source(&mut self, source_id: &str, data: &FeatureCollection) {
        let data_json = serde_json::to_string(data).unwrap_or_default();
        call_js(&format!(
            "window.swimMap.addSource({}, {}, {});",
            self.target(),
            js_str(source_id),
            data_json
        ));
    }

    fn set_source_data(&mut self, source_id: &str, data: &FeatureCollection) {
        let data_json = serde_json::to_string(data).unwrap_or_default();
        call_js(&format!(
            "window.swimMap.setData({}, {}, {});",
            self.target(),
            js_str(source_id),
            data_json
        ));
    }

    fn has_layer(&self, layer_id: &str) -> bool {
        eval_bool(&format!(
            "window.swimMap.hasLayer({}, {})",
            self.target(),
            js_str(layer_id)
        ))
    }

    fn add_layer(&mut self, layer: &JsonValue) {
        call_js(&format!("window.swimMap.addLayer({}, {});", self.target(), layer));
    }

    fn on_click(&mut self, layer_id: &str) {
        call_js(&format!(
            "window.swimMap.onClick({}, {});",
            self.target(),
            js_str(layer_id)
        ));
    }

    fn off_click(&mut self, layer_id: &str) {
        call_js(&format!(
            "window.swimMap.offClick({}, {});",
            self.target(),
            js_str(layer_id)
        ));
    }

    fn show_popup(&mut self, popup: &Popup) {
        call_js(&format!(
            "window.swimMap.showPopup({}, {}, {}, {});",
            self.target(),
            popup.lng_lat.lng,
            popup.lng_lat.lat,
            js_str(&popup.html)
        ));
    }

    fn remove(&mut self) {
        call_js(&format!("window.swimMap.remove({});", self.target()));
    }
}
