use crate::config::MapConfig;
use crate::document::Document;
use shared::FeatureCollection;
use thiserror::Error;

pub type LayerId = u64;

/// Per-layer marker. Overlay layers belong to one analysis run; everything else
/// (the base tiles) stays for the lifetime of the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerOptions {
    pub overlay: bool,
}

impl LayerOptions {
    pub const OVERLAY: Self = Self { overlay: true };
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TileLayerOptions {
    pub max_zoom: u8,
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("mapping library is not loaded")]
    LibraryMissing,
    #[error("map call `{0}` failed: {1}")]
    Call(&'static str, String),
    #[error("overlay could not be encoded: {0}")]
    Overlay(#[from] serde_json::Error),
}

pub trait MapLibrary {
    type Map: MapHandle;

    fn is_present(&self) -> bool;

    fn create_map(&self, container_id: &str, view: &MapView) -> Result<Self::Map, MapError>;
}

pub trait MapHandle {
    fn add_tile_layer(
        &mut self,
        url_template: &str,
        options: &TileLayerOptions,
    ) -> Result<LayerId, MapError>;

    fn add_geojson_layer(
        &mut self,
        overlay: &FeatureCollection,
        options: LayerOptions,
    ) -> Result<LayerId, MapError>;

    /// Layers currently attached, in insertion order.
    fn layers(&self) -> Vec<(LayerId, LayerOptions)>;

    fn remove_layer(&mut self, id: LayerId);

    fn destroy(self);
}

pub enum MapState<M> {
    Uninitialized,
    Ready(M),
    Disposed,
}

/// Owns the single map widget of the view.
///
/// The map is created lazily once the library is loaded and its container is in
/// the document, and never again after that, even once disposed.
pub struct MapLifecycleController<L: MapLibrary> {
    library: L,
    config: MapConfig,
    state: MapState<L::Map>,
}

impl<L: MapLibrary> MapLifecycleController<L> {
    pub fn new(library: L, config: MapConfig) -> Self {
        Self {
            library,
            config,
            state: MapState::Uninitialized,
        }
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    #[cfg(test)]
    pub fn state(&self) -> &MapState<L::Map> {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, MapState::Ready(_))
    }

    /// Creates the map if every precondition holds. Returns whether a map is live.
    pub fn ensure_ready<D: Document>(&mut self, library_loaded: bool, doc: &D) -> bool {
        if !matches!(self.state, MapState::Uninitialized) {
            return self.is_ready();
        }
        if !library_loaded || !self.library.is_present() {
            return false;
        }
        if !doc.has_element(&self.config.container_id) {
            log::debug!("Map container #{} not mounted yet", self.config.container_id);
            return false;
        }

        match self.create() {
            Ok(map) => {
                log::info!(
                    "Map created at {:?}, zoom {}",
                    self.config.center,
                    self.config.zoom
                );
                self.state = MapState::Ready(map);
                true
            }
            Err(e) => {
                log::error!("Failed to create map: {}", e);
                false
            }
        }
    }

    fn create(&self) -> Result<L::Map, MapError> {
        let view = MapView {
            center: self.config.center,
            zoom: self.config.zoom,
        };
        let mut map = self.library.create_map(&self.config.container_id, &view)?;

        let tiles = TileLayerOptions {
            max_zoom: self.config.max_zoom,
        };
        if let Err(e) = map.add_tile_layer(&self.config.tile_url, &tiles) {
            map.destroy();
            return Err(e);
        }
        Ok(map)
    }

    /// Removes every overlay layer and nothing else. Returns how many went.
    pub fn clear_overlays(&mut self) -> usize {
        let MapState::Ready(map) = &mut self.state else {
            return 0;
        };

        let stale: Vec<LayerId> = map
            .layers()
            .into_iter()
            .filter(|(_, options)| options.overlay)
            .map(|(id, _)| id)
            .collect();
        for id in &stale {
            map.remove_layer(*id);
        }
        stale.len()
    }

    /// Replaces the previous run's overlay with `overlay`. Empty collections only clear.
    pub fn render_overlay(
        &mut self,
        overlay: &FeatureCollection,
    ) -> Result<Option<LayerId>, MapError> {
        self.clear_overlays();

        let MapState::Ready(map) = &mut self.state else {
            return Ok(None);
        };
        if overlay.is_empty() {
            return Ok(None);
        }
        let id = map.add_geojson_layer(overlay, LayerOptions::OVERLAY)?;
        log::debug!("Overlay layer {} holds {} feature(s)", id, overlay.len());
        Ok(Some(id))
    }

    pub fn dispose(&mut self) {
        if let MapState::Ready(map) = std::mem::replace(&mut self.state, MapState::Disposed) {
            map.destroy();
            log::info!("Map disposed");
        }
    }
}
