use crate::config::MapConfig;
use crate::document::Document;
use crate::map::{MapLibrary, MapLifecycleController};
use shared::InferenceResult;
use std::fmt::Display;

pub const MISSING_FILE_MESSAGE: &str = "Please upload a satellite image first.";
pub const INFERENCE_FAILED_MESSAGE: &str = "Inference failed. Please try again.";

/// Identifies one submitted run so its answer can be matched on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunTicket(u64);

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome<F> {
    /// The caller clears map overlays, then runs inference on `file`.
    Start { ticket: RunTicket, file: F },
    MissingFile,
    /// A run is already in flight.
    Busy,
    /// The mapping library has not finished loading.
    NotReady,
}

struct PendingRun {
    ticket: RunTicket,
    // a newer file was picked while this run was in flight
    superseded: bool,
}

/// State of the upload-and-analyse flow, independent of the widget toolkit.
///
/// `F` is the uploaded file handle; the browser uses `gloo_file::File`.
pub struct Dashboard<F> {
    file: Option<F>,
    file_name: String,
    is_loading: bool,
    results: Option<InferenceResult>,
    error: Option<String>,
    is_library_loaded: bool,
    pending: Option<PendingRun>,
    runs: u64,
}

impl<F> Default for Dashboard<F> {
    fn default() -> Self {
        Self {
            file: None,
            file_name: String::new(),
            is_loading: false,
            results: None,
            error: None,
            is_library_loaded: false,
            pending: None,
            runs: 0,
        }
    }
}

impl<F: Clone> Dashboard<F> {
    #[cfg(test)]
    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn results(&self) -> Option<&InferenceResult> {
        self.results.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_library_loaded(&self) -> bool {
        self.is_library_loaded
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.is_loading && self.is_library_loaded
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Running AI Inference..."
        } else {
            "Run Classification & Change Detection"
        }
    }

    /// An empty selection changes nothing.
    pub fn select_file(&mut self, selection: Option<(F, String)>) -> bool {
        let Some((file, name)) = selection else {
            return false;
        };

        log::info!("Selected file: {}", name);
        self.file = Some(file);
        self.file_name = name;
        self.results = None;
        self.error = None;
        if let Some(pending) = self.pending.as_mut() {
            pending.superseded = true;
        }
        true
    }

    pub fn library_loaded(&mut self) {
        if !self.is_library_loaded {
            log::info!("Mapping library loaded");
            self.is_library_loaded = true;
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome<F> {
        let Some(file) = self.file.clone() else {
            self.error = Some(MISSING_FILE_MESSAGE.to_string());
            return SubmitOutcome::MissingFile;
        };
        if self.pending.is_some() {
            log::debug!("Submit ignored: a run is already in flight");
            return SubmitOutcome::Busy;
        }
        if !self.is_library_loaded {
            log::warn!("Submit ignored: mapping library not loaded");
            return SubmitOutcome::NotReady;
        }

        self.runs += 1;
        let ticket = RunTicket(self.runs);
        self.pending = Some(PendingRun {
            ticket,
            superseded: false,
        });
        self.is_loading = true;
        self.error = None;
        self.results = None;
        log::info!("Starting inference run {} for {}", ticket.0, self.file_name);

        SubmitOutcome::Start { ticket, file }
    }

    /// Applies the answer of run `ticket`. Returns whether `results` changed.
    pub fn complete<E: Display>(
        &mut self,
        ticket: RunTicket,
        outcome: Result<InferenceResult, E>,
    ) -> bool {
        let Some(pending) = self.pending.take_if(|pending| pending.ticket == ticket) else {
            log::warn!("Dropping answer for unknown run {}", ticket.0);
            return false;
        };
        self.is_loading = false;

        if pending.superseded {
            log::info!("Discarding run {}: a newer file was selected", ticket.0);
            return false;
        }

        match outcome {
            Ok(results) => {
                log::info!("Run {} finished", ticket.0);
                self.results = Some(results);
                true
            }
            Err(e) => {
                log::error!("Run {} failed: {}", ticket.0, e);
                self.error = Some(INFERENCE_FAILED_MESSAGE.to_string());
                self.results = None;
                false
            }
        }
    }
}

/// Drives the upload flow together with the map: overlays go when a run
/// starts and come back only for an answer the dashboard accepts.
pub struct DashboardController<L: MapLibrary, F> {
    dashboard: Dashboard<F>,
    map: MapLifecycleController<L>,
}

impl<L: MapLibrary, F: Clone> DashboardController<L, F> {
    pub fn new(library: L, config: MapConfig) -> Self {
        Self {
            dashboard: Dashboard::default(),
            map: MapLifecycleController::new(library, config),
        }
    }

    pub fn dashboard(&self) -> &Dashboard<F> {
        &self.dashboard
    }

    #[cfg(test)]
    pub fn map(&self) -> &MapLifecycleController<L> {
        &self.map
    }

    /// Runs after every render. Returns whether a map is live.
    pub fn rendered<D: Document>(&mut self, doc: &D) -> bool {
        self.map.ensure_ready(self.dashboard.is_library_loaded(), doc)
    }

    /// The map script fired its load event. The script can load without
    /// defining the library global, in which case nothing changes.
    pub fn map_library_loaded(&mut self) -> bool {
        if !self.map.library().is_present() {
            log::error!("Map script loaded but the library global is missing");
            return false;
        }
        self.dashboard.library_loaded();
        true
    }

    pub fn select_file(&mut self, selection: Option<(F, String)>) -> bool {
        self.dashboard.select_file(selection)
    }

    /// On `Start` the overlays are already cleared when this returns.
    pub fn submit(&mut self) -> SubmitOutcome<F> {
        let outcome = self.dashboard.submit();
        if matches!(outcome, SubmitOutcome::Start { .. }) {
            let cleared = self.map.clear_overlays();
            log::debug!("Cleared {} overlay layer(s)", cleared);
        }
        outcome
    }

    pub fn complete<E: Display>(
        &mut self,
        ticket: RunTicket,
        outcome: Result<InferenceResult, E>,
    ) -> bool {
        if !self.dashboard.complete(ticket, outcome) {
            return false;
        }
        if let Some(results) = self.dashboard.results() {
            log::debug!("Land cover categories total {:.1}%", results.metrics.total());
            if let Err(e) = self.map.render_overlay(&results.geojson_overlay) {
                log::error!("Failed to render overlay: {}", e);
            }
        }
        true
    }

    pub fn dispose(&mut self) {
        self.map.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::LayerOptions;
    use crate::testing::{FakeDocument, FakeMapLibrary};
    use serde_json::json;
    use shared::{simulated_result, Feature, FeatureCollection};

    type TestDashboard = Dashboard<&'static str>;

    fn ready() -> TestDashboard {
        let mut dashboard = TestDashboard::default();
        dashboard.library_loaded();
        dashboard
    }

    fn with_file(name: &'static str) -> TestDashboard {
        let mut dashboard = ready();
        dashboard.select_file(Some((name, name.to_string())));
        dashboard
    }

    fn start(dashboard: &mut TestDashboard) -> RunTicket {
        match dashboard.submit() {
            SubmitOutcome::Start { ticket, .. } => ticket,
            other => panic!("expected a run to start, got {:?}", other),
        }
    }

    #[test]
    fn selecting_and_submitting_scene_yields_simulated_result() {
        let mut dashboard = with_file("scene.tif");

        let ticket = match dashboard.submit() {
            SubmitOutcome::Start { ticket, file } => {
                assert_eq!(file, "scene.tif");
                ticket
            }
            other => panic!("expected a run to start, got {:?}", other),
        };
        assert!(dashboard.is_loading());
        assert_eq!(dashboard.submit_label(), "Running AI Inference...");

        assert!(dashboard.complete(ticket, Ok::<_, String>(simulated_result())));

        let results = dashboard.results().unwrap();
        assert_eq!(results.metrics.urban_percent, Some(25.0));
        assert_eq!(results.change_detection.vegetation_loss_percent, Some(3.2));
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.error(), None);
    }

    #[test]
    fn submit_without_file_sets_message_only() {
        let mut dashboard = ready();

        assert_eq!(dashboard.submit(), SubmitOutcome::MissingFile);

        assert_eq!(dashboard.error(), Some("Please upload a satellite image first."));
        assert!(!dashboard.is_loading());
        assert!(dashboard.results().is_none());
    }

    #[test]
    fn submit_without_file_never_starts_a_run() {
        let mut dashboard = TestDashboard::default();
        for _ in 0..3 {
            assert_eq!(dashboard.submit(), SubmitOutcome::MissingFile);
            assert_eq!(dashboard.error(), Some(MISSING_FILE_MESSAGE));
        }
        assert_eq!(dashboard.runs, 0);
    }

    #[test]
    fn selecting_file_clears_result_and_error() {
        let mut dashboard = with_file("a.tif");
        let ticket = start(&mut dashboard);
        dashboard.complete(ticket, Ok::<_, String>(simulated_result()));
        assert!(dashboard.results().is_some());

        dashboard.select_file(Some(("b.tif", "b.tif".to_string())));
        assert!(dashboard.results().is_none());
        assert_eq!(dashboard.file_name(), "b.tif");

        let mut failing = ready();
        failing.submit();
        assert!(failing.error().is_some());
        failing.select_file(Some(("c.tif", "c.tif".to_string())));
        assert_eq!(failing.error(), None);
    }

    #[test]
    fn empty_selection_is_ignored() {
        let mut dashboard = with_file("a.tif");
        dashboard.submit();

        assert!(!dashboard.select_file(None));
        assert_eq!(dashboard.file(), Some(&"a.tif"));
        assert!(dashboard.is_loading());
    }

    #[test]
    fn failure_sets_fixed_message_and_no_result() {
        let mut dashboard = with_file("scene.tif");
        let ticket = start(&mut dashboard);

        assert!(!dashboard.complete::<String>(ticket, Err("connection reset".into())));

        assert_eq!(dashboard.error(), Some(INFERENCE_FAILED_MESSAGE));
        assert!(dashboard.results().is_none());
        assert!(!dashboard.is_loading());
        assert!(dashboard.can_submit());
    }

    #[test]
    fn second_submit_while_pending_is_busy() {
        let mut dashboard = with_file("scene.tif");
        let ticket = start(&mut dashboard);

        assert_eq!(dashboard.submit(), SubmitOutcome::Busy);
        assert!(!dashboard.can_submit());

        dashboard.complete(ticket, Ok::<_, String>(simulated_result()));
        assert!(matches!(dashboard.submit(), SubmitOutcome::Start { .. }));
    }

    #[test]
    fn answer_for_superseded_file_is_discarded() {
        let mut dashboard = with_file("old.tif");
        let ticket = start(&mut dashboard);

        dashboard.select_file(Some(("new.tif", "new.tif".to_string())));
        assert!(!dashboard.complete(ticket, Ok::<_, String>(simulated_result())));

        assert!(dashboard.results().is_none());
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.file(), Some(&"new.tif"));
    }

    #[test]
    fn unknown_ticket_is_ignored() {
        let mut dashboard = with_file("scene.tif");
        let ticket = start(&mut dashboard);

        assert!(!dashboard.complete(RunTicket(99), Ok::<_, String>(simulated_result())));
        assert!(dashboard.is_loading());

        assert!(dashboard.complete(ticket, Ok::<_, String>(simulated_result())));
        assert!(!dashboard.complete(ticket, Ok::<_, String>(simulated_result())));
    }

    #[test]
    fn library_failure_keeps_submit_disabled() {
        let mut dashboard = TestDashboard::default();
        dashboard.select_file(Some(("scene.tif", "scene.tif".to_string())));

        assert!(!dashboard.can_submit());
        assert_eq!(dashboard.submit(), SubmitOutcome::NotReady);
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.error(), None);
    }

    #[test]
    fn submit_enabled_only_when_all_preconditions_hold() {
        let mut dashboard = TestDashboard::default();
        assert!(!dashboard.can_submit());

        dashboard.select_file(Some(("scene.tif", "scene.tif".to_string())));
        assert!(!dashboard.can_submit());

        dashboard.library_loaded();
        assert!(dashboard.can_submit());
        assert_eq!(dashboard.submit_label(), "Run Classification & Change Detection");
    }

    type TestController = DashboardController<FakeMapLibrary, &'static str>;

    fn mounted() -> (TestController, FakeMapLibrary, FakeDocument) {
        let library = FakeMapLibrary::default();
        let doc = FakeDocument::default();
        doc.add_element("map-container");
        (
            DashboardController::new(library.clone(), MapConfig::default()),
            library,
            doc,
        )
    }

    fn live() -> (TestController, FakeMapLibrary, FakeDocument) {
        let (mut controller, library, doc) = mounted();
        assert!(controller.map_library_loaded());
        assert!(controller.rendered(&doc));
        controller.select_file(Some(("scene.tif", "scene.tif".to_string())));
        (controller, library, doc)
    }

    fn start_run(controller: &mut TestController) -> RunTicket {
        match controller.submit() {
            SubmitOutcome::Start { ticket, .. } => ticket,
            other => panic!("expected a run to start, got {:?}", other),
        }
    }

    fn result_with_overlay() -> InferenceResult {
        InferenceResult {
            geojson_overlay: FeatureCollection {
                features: vec![Feature {
                    kind: "Feature".to_string(),
                    geometry: json!({ "type": "Point", "coordinates": [-73.93, 40.73] }),
                    properties: Default::default(),
                }],
                ..Default::default()
            },
            ..simulated_result()
        }
    }

    fn overlay_count(library: &FakeMapLibrary) -> usize {
        library.state().layers.iter().filter(|(_, o)| o.overlay).count()
    }

    #[test]
    fn map_waits_for_library_then_renders_once() {
        let (mut controller, library, doc) = mounted();

        assert!(!controller.rendered(&doc));
        assert_eq!(library.state().created, 0);

        assert!(controller.map_library_loaded());
        assert!(controller.rendered(&doc));
        assert!(controller.rendered(&doc));
        assert_eq!(library.state().created, 1);
        assert!(controller.map().is_ready());
    }

    #[test]
    fn load_event_without_library_global_keeps_flag_unset() {
        let (mut controller, library, doc) = mounted();
        library.state_mut().absent = true;

        assert!(!controller.map_library_loaded());
        assert!(!controller.dashboard().is_library_loaded());
        assert!(!controller.rendered(&doc));
        assert_eq!(library.state().created, 0);
    }

    #[test]
    fn submit_clears_overlays_before_run_starts() {
        let (mut controller, library, _doc) = live();
        library.attach_raw(LayerOptions::OVERLAY);
        library.attach_raw(LayerOptions::OVERLAY);

        start_run(&mut controller);

        assert_eq!(overlay_count(&library), 0);
        assert_eq!(library.state().layers.len(), 1);
    }

    #[test]
    fn rejected_submit_leaves_overlays() {
        let (mut controller, library, _doc) = live();
        start_run(&mut controller);
        library.attach_raw(LayerOptions::OVERLAY);

        assert_eq!(controller.submit(), SubmitOutcome::Busy);
        assert_eq!(overlay_count(&library), 1);
    }

    #[test]
    fn accepted_answer_draws_overlay() {
        let (mut controller, library, _doc) = live();
        let ticket = start_run(&mut controller);

        assert!(controller.complete(ticket, Ok::<_, String>(result_with_overlay())));

        assert_eq!(overlay_count(&library), 1);
        assert!(controller.dashboard().results().is_some());
    }

    #[test]
    fn discarded_answer_draws_nothing() {
        let (mut controller, library, _doc) = live();
        let ticket = start_run(&mut controller);
        controller.select_file(Some(("new.tif", "new.tif".to_string())));

        assert!(!controller.complete(ticket, Ok::<_, String>(result_with_overlay())));
        assert_eq!(overlay_count(&library), 0);

        let ticket = start_run(&mut controller);
        assert!(!controller.complete::<String>(ticket, Err("timeout".into())));
        assert_eq!(overlay_count(&library), 0);
    }

    #[test]
    fn dispose_tears_down_map() {
        let (mut controller, library, doc) = live();

        controller.dispose();

        assert_eq!(library.state().destroyed, 1);
        assert!(!controller.rendered(&doc));
        assert_eq!(library.state().created, 1);
    }
}
