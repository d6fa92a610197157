//! Recording fakes for the page and the mapping library.

use crate::document::{Document, DocumentError, LoadOutcome, SettledCallback};
use crate::map::{LayerId, LayerOptions, MapError, MapHandle, MapLibrary, MapView, TileLayerOptions};
use crate::resources::ResourceRequest;
use shared::FeatureCollection;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

#[derive(Default)]
struct DocumentState {
    next_node: usize,
    injected_total: usize,
    head: Vec<(usize, ResourceRequest)>,
    pending: HashMap<usize, SettledCallback>,
    elements: HashSet<String>,
    fail_injections: bool,
}

#[derive(Default)]
pub struct FakeDocument {
    state: RefCell<DocumentState>,
}

impl FakeDocument {
    pub fn head(&self) -> Vec<ResourceRequest> {
        self.state
            .borrow()
            .head
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    pub fn injected_total(&self) -> usize {
        self.state.borrow().injected_total
    }

    pub fn add_element(&self, id: &str) {
        self.state.borrow_mut().elements.insert(id.to_string());
    }

    pub fn fail_injections(&self, fail: bool) {
        self.state.borrow_mut().fail_injections = fail;
    }

    /// Fires the pending load/error notification of the node serving `url`.
    /// Returns false when nothing was listening.
    pub fn settle(&self, url: &str, outcome: LoadOutcome) -> bool {
        let callback = {
            let mut state = self.state.borrow_mut();
            let node = state
                .head
                .iter()
                .find(|(_, request)| request.url == url)
                .map(|(node, _)| *node);
            node.and_then(|node| state.pending.remove(&node))
        };

        match callback {
            Some(callback) => {
                callback(outcome);
                true
            }
            None => false,
        }
    }
}

impl Document for FakeDocument {
    type Node = usize;

    fn inject(
        &self,
        request: &ResourceRequest,
        on_settled: Option<SettledCallback>,
    ) -> Result<usize, DocumentError> {
        let mut state = self.state.borrow_mut();
        if state.fail_injections {
            return Err(DocumentError::NoHead);
        }

        let node = state.next_node;
        state.next_node += 1;
        state.injected_total += 1;
        state.head.push((node, request.clone()));
        if let Some(callback) = on_settled {
            state.pending.insert(node, callback);
        }
        Ok(node)
    }

    fn remove(&self, node: usize) {
        let mut state = self.state.borrow_mut();
        state.head.retain(|(id, _)| *id != node);
        state.pending.remove(&node);
    }

    fn has_element(&self, id: &str) -> bool {
        self.state.borrow().elements.contains(id)
    }
}

#[derive(Default)]
pub struct MapRecord {
    pub absent: bool,
    pub fail_create: bool,
    pub created: usize,
    pub destroyed: usize,
    pub last_view: Option<(String, MapView)>,
    pub tile_layers: Vec<(String, TileLayerOptions)>,
    pub layers: Vec<(LayerId, LayerOptions)>,
    next_layer: LayerId,
}

impl MapRecord {
    fn attach(&mut self, options: LayerOptions) -> LayerId {
        let id = self.next_layer;
        self.next_layer += 1;
        self.layers.push((id, options));
        id
    }
}

/// Library and every map it creates share one record, so tests can inspect it.
#[derive(Clone, Default)]
pub struct FakeMapLibrary {
    record: Rc<RefCell<MapRecord>>,
}

impl FakeMapLibrary {
    pub fn state(&self) -> Ref<'_, MapRecord> {
        self.record.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, MapRecord> {
        self.record.borrow_mut()
    }

    /// Attaches a layer behind the controller's back.
    pub fn attach_raw(&self, options: LayerOptions) -> LayerId {
        self.record.borrow_mut().attach(options)
    }
}

pub struct FakeMap {
    record: Rc<RefCell<MapRecord>>,
}

impl MapLibrary for FakeMapLibrary {
    type Map = FakeMap;

    fn is_present(&self) -> bool {
        !self.record.borrow().absent
    }

    fn create_map(&self, container_id: &str, view: &MapView) -> Result<FakeMap, MapError> {
        let mut record = self.record.borrow_mut();
        if record.fail_create {
            return Err(MapError::Call("map", "refused".to_string()));
        }
        record.created += 1;
        record.last_view = Some((container_id.to_string(), view.clone()));
        Ok(FakeMap {
            record: Rc::clone(&self.record),
        })
    }
}

impl MapHandle for FakeMap {
    fn add_tile_layer(
        &mut self,
        url_template: &str,
        options: &TileLayerOptions,
    ) -> Result<LayerId, MapError> {
        let mut record = self.record.borrow_mut();
        record
            .tile_layers
            .push((url_template.to_string(), options.clone()));
        Ok(record.attach(LayerOptions::default()))
    }

    fn add_geojson_layer(
        &mut self,
        _overlay: &FeatureCollection,
        options: LayerOptions,
    ) -> Result<LayerId, MapError> {
        Ok(self.record.borrow_mut().attach(options))
    }

    fn layers(&self) -> Vec<(LayerId, LayerOptions)> {
        self.record.borrow().layers.clone()
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.record.borrow_mut().layers.retain(|(layer, _)| *layer != id);
    }

    fn destroy(self) {
        let mut record = self.record.borrow_mut();
        record.destroyed += 1;
        record.layers.clear();
    }
}
