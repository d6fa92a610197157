use crate::map::{LayerId, LayerOptions, MapError, MapHandle, MapLibrary, MapView, TileLayerOptions};
use js_sys::{Array, Function, JSON, Object, Reflect};
use shared::FeatureCollection;
use wasm_bindgen::{JsCast, JsValue};

/// Leaflet, reached through the `L` global its script installs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeafletLibrary;

impl LeafletLibrary {
    fn namespace() -> Option<JsValue> {
        let window = web_sys::window()?;
        let leaflet = Reflect::get(&window, &JsValue::from_str("L")).ok()?;
        (!leaflet.is_undefined() && !leaflet.is_null()).then_some(leaflet)
    }
}

fn call(target: &JsValue, method: &'static str, args: &[JsValue]) -> Result<JsValue, MapError> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))
        .map_err(|e| MapError::Call(method, format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| MapError::Call(method, "not a function".to_string()))?;

    let array = Array::new();
    for arg in args {
        array.push(arg);
    }
    function
        .apply(target, &array)
        .map_err(|e| MapError::Call(method, format!("{:?}", e)))
}

fn options(entries: &[(&str, JsValue)]) -> Result<Object, MapError> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)
            .map_err(|e| MapError::Call("options", format!("{:?}", e)))?;
    }
    Ok(object)
}

impl MapLibrary for LeafletLibrary {
    type Map = LeafletMap;

    fn is_present(&self) -> bool {
        Self::namespace().is_some()
    }

    fn create_map(&self, container_id: &str, view: &MapView) -> Result<LeafletMap, MapError> {
        let leaflet = Self::namespace().ok_or(MapError::LibraryMissing)?;

        let center = Array::of2(&JsValue::from_f64(view.center[0]), &JsValue::from_f64(view.center[1]));
        let map_options = options(&[("center", center.into()), ("zoom", JsValue::from(view.zoom))])?;
        let map = call(&leaflet, "map", &[JsValue::from_str(container_id), map_options.into()])?;

        Ok(LeafletMap {
            leaflet,
            map,
            layers: Vec::new(),
            next_layer_id: 0,
        })
    }
}

struct AttachedLayer {
    id: LayerId,
    layer: JsValue,
    options: LayerOptions,
}

pub struct LeafletMap {
    leaflet: JsValue,
    map: JsValue,
    layers: Vec<AttachedLayer>,
    next_layer_id: LayerId,
}

impl LeafletMap {
    fn attach(&mut self, layer: JsValue, options: LayerOptions) -> Result<LayerId, MapError> {
        call(&self.map, "addLayer", &[layer.clone()])?;

        let id = self.next_layer_id;
        self.next_layer_id += 1;
        self.layers.push(AttachedLayer { id, layer, options });
        Ok(id)
    }
}

impl MapHandle for LeafletMap {
    fn add_tile_layer(
        &mut self,
        url_template: &str,
        options_in: &TileLayerOptions,
    ) -> Result<LayerId, MapError> {
        let tile_options = options(&[("maxZoom", JsValue::from(options_in.max_zoom))])?;
        let layer = call(
            &self.leaflet,
            "tileLayer",
            &[JsValue::from_str(url_template), tile_options.into()],
        )?;
        self.attach(layer, LayerOptions::default())
    }

    fn add_geojson_layer(
        &mut self,
        overlay: &FeatureCollection,
        layer_options: LayerOptions,
    ) -> Result<LayerId, MapError> {
        let encoded = serde_json::to_string(overlay)?;
        let data = JSON::parse(&encoded).map_err(|e| MapError::Call("JSON.parse", format!("{:?}", e)))?;
        let geojson_options = options(&[("isGeoSenseLayer", JsValue::from_bool(layer_options.overlay))])?;
        let layer = call(&self.leaflet, "geoJSON", &[data, geojson_options.into()])?;
        self.attach(layer, layer_options)
    }

    fn layers(&self) -> Vec<(LayerId, LayerOptions)> {
        self.layers.iter().map(|l| (l.id, l.options)).collect()
    }

    fn remove_layer(&mut self, id: LayerId) {
        let Some(index) = self.layers.iter().position(|l| l.id == id) else {
            return;
        };
        let attached = self.layers.remove(index);
        if let Err(e) = call(&self.map, "removeLayer", &[attached.layer]) {
            log::warn!("Failed to remove layer {}: {}", id, e);
        }
    }

    fn destroy(self) {
        if let Err(e) = call(&self.map, "remove", &[]) {
            log::warn!("Failed to tear down map: {}", e);
        }
    }
}
