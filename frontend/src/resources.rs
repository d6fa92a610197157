use crate::config::ResourceUrls;
use crate::document::{Document, LoadOutcome, SettledCallback};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Script,
    Stylesheet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceRequest {
    pub url: String,
    pub kind: ResourceKind,
}

impl ResourceRequest {
    pub fn script(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: ResourceKind::Script,
        }
    }

    pub fn stylesheet(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: ResourceKind::Stylesheet,
        }
    }
}

/// Holds at most one injected element for one logical resource.
pub struct ResourceSlot<D: Document> {
    current: Option<(ResourceRequest, D::Node)>,
}

impl<D: Document> Default for ResourceSlot<D> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<D: Document> ResourceSlot<D> {
    pub fn request(&self) -> Option<&ResourceRequest> {
        self.current.as_ref().map(|(request, _)| request)
    }

    /// Injects `request` unless it is already the one held. A different request
    /// replaces the previous element. `on_load` only fires for scripts.
    pub fn load(&mut self, doc: &D, request: ResourceRequest, on_load: Option<Box<dyn FnOnce()>>) {
        if self.request() == Some(&request) {
            return;
        }
        self.unload(doc);

        if request.url.is_empty() {
            return;
        }

        let on_settled: Option<SettledCallback> = match request.kind {
            ResourceKind::Script => {
                let url = request.url.clone();
                Some(Box::new(move |outcome: LoadOutcome| match outcome {
                    LoadOutcome::Loaded => {
                        log::debug!("Loaded script: {}", url);
                        if let Some(on_load) = on_load {
                            on_load();
                        }
                    }
                    LoadOutcome::Failed => log::error!("Failed to load: {}", url),
                }))
            }
            ResourceKind::Stylesheet => None,
        };

        match doc.inject(&request, on_settled) {
            Ok(node) => self.current = Some((request, node)),
            Err(e) => log::error!("Failed to inject {}: {}", request.url, e),
        }
    }

    pub fn unload(&mut self, doc: &D) {
        if let Some((_, node)) = self.current.take() {
            doc.remove(node);
        }
    }
}

/// The dashboard's third-party assets: the mapping library with its stylesheet, and icons.
pub struct ExternalResources<D: Document> {
    map_stylesheet: ResourceSlot<D>,
    map_script: ResourceSlot<D>,
    icon_script: ResourceSlot<D>,
}

impl<D: Document> Default for ExternalResources<D> {
    fn default() -> Self {
        Self {
            map_stylesheet: ResourceSlot::default(),
            map_script: ResourceSlot::default(),
            icon_script: ResourceSlot::default(),
        }
    }
}

impl<D: Document> ExternalResources<D> {
    pub fn mount(&mut self, doc: &D, urls: &ResourceUrls, on_map_library_loaded: Box<dyn FnOnce()>) {
        self.map_stylesheet
            .load(doc, ResourceRequest::stylesheet(&urls.map_stylesheet), None);
        self.map_script
            .load(doc, ResourceRequest::script(&urls.map_script), Some(on_map_library_loaded));
        self.icon_script
            .load(doc, ResourceRequest::script(&urls.icon_script), None);
    }

    pub fn unmount(&mut self, doc: &D) {
        self.map_stylesheet.unload(doc);
        self.map_script.unload(doc);
        self.icon_script.unload(doc);
    }
}
