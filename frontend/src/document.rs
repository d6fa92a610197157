use crate::resources::{ResourceKind, ResourceRequest};
use gloo_events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlLinkElement, HtmlScriptElement};

/// How an injected script finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

pub type SettledCallback = Box<dyn FnOnce(LoadOutcome)>;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("document has no <head>")]
    NoHead,
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// The slice of the page the dashboard touches: head injection and element lookup.
pub trait Document {
    /// Owned handle to an injected element. Passing it back to `remove` detaches it.
    type Node;

    fn inject(
        &self,
        request: &ResourceRequest,
        on_settled: Option<SettledCallback>,
    ) -> Result<Self::Node, DocumentError>;

    fn remove(&self, node: Self::Node);

    fn has_element(&self, id: &str) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDocument;

pub struct InjectedNode {
    element: Element,
    _listeners: Vec<EventListener>,
}

impl BrowserDocument {
    fn document() -> Result<web_sys::Document, DocumentError> {
        web_sys::window()
            .ok_or(DocumentError::NoWindow)?
            .document()
            .ok_or(DocumentError::NoWindow)
    }

    fn create_element(
        document: &web_sys::Document,
        request: &ResourceRequest,
    ) -> Result<Element, DocumentError> {
        match request.kind {
            ResourceKind::Script => {
                let script: HtmlScriptElement = document
                    .create_element("script")
                    .map_err(dom_error)?
                    .dyn_into()
                    .map_err(|_| DocumentError::Dom("expected a <script> element".into()))?;
                script.set_src(&request.url);
                script.set_async(true);
                Ok(script.unchecked_into())
            }
            ResourceKind::Stylesheet => {
                let link: HtmlLinkElement = document
                    .create_element("link")
                    .map_err(dom_error)?
                    .dyn_into()
                    .map_err(|_| DocumentError::Dom("expected a <link> element".into()))?;
                link.set_rel("stylesheet");
                link.set_href(&request.url);
                Ok(link.unchecked_into())
            }
        }
    }
}

impl Document for BrowserDocument {
    type Node = InjectedNode;

    fn inject(
        &self,
        request: &ResourceRequest,
        on_settled: Option<SettledCallback>,
    ) -> Result<InjectedNode, DocumentError> {
        let document = Self::document()?;
        let head = document.head().ok_or(DocumentError::NoHead)?;
        let element = Self::create_element(&document, request)?;

        let mut listeners = Vec::new();
        if let Some(callback) = on_settled {
            // load and error race for the same one-shot callback
            let slot = Rc::new(RefCell::new(Some(callback)));
            for (event, outcome) in [("load", LoadOutcome::Loaded), ("error", LoadOutcome::Failed)] {
                let slot = Rc::clone(&slot);
                listeners.push(EventListener::once(&element, event, move |_| {
                    let callback = slot.borrow_mut().take();
                    if let Some(callback) = callback {
                        callback(outcome);
                    }
                }));
            }
        }

        head.append_child(&element).map_err(dom_error)?;

        Ok(InjectedNode {
            element,
            _listeners: listeners,
        })
    }

    fn remove(&self, node: InjectedNode) {
        node.element.remove();
    }

    fn has_element(&self, id: &str) -> bool {
        Self::document()
            .map(|document| document.get_element_by_id(id).is_some())
            .unwrap_or(false)
    }
}

fn dom_error(err: JsValue) -> DocumentError {
    DocumentError::Dom(format!("{:?}", err))
}
