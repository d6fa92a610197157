use crate::components::header::render_header;
use crate::components::map_view::render_map_view;
use crate::components::results::render_results;
use crate::components::upload_form::render_upload_form;
use crate::config::AppConfig;
use crate::dashboard::{DashboardController, RunTicket, SubmitOutcome};
use crate::document::BrowserDocument;
use crate::inference::InferenceError;
use crate::leaflet::LeafletLibrary;
use crate::resources::ExternalResources;
use gloo_file::File as GlooFile;
use shared::InferenceResult;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub enum Msg {
    FileSelected(Option<GlooFile>),
    Submit,
    InferenceFinished(RunTicket, Result<InferenceResult, InferenceError>),
    MapLibraryLoaded,
}

pub struct App {
    config: AppConfig,
    document: BrowserDocument,
    resources: ExternalResources<BrowserDocument>,
    controller: DashboardController<LeafletLibrary, GlooFile>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = AppConfig::from_build_env();
        log::info!("Inference backend: {:?}", config.inference);

        Self {
            controller: DashboardController::new(LeafletLibrary, config.map.clone()),
            config,
            document: BrowserDocument,
            resources: ExternalResources::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => self.handle_file_selected(file),
            Msg::Submit => self.handle_submit(ctx),
            Msg::InferenceFinished(ticket, outcome) => self.handle_inference_finished(ticket, outcome),
            Msg::MapLibraryLoaded => self.controller.map_library_loaded(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="min-h-screen bg-gray-50 font-sans p-4 sm:p-8">
                <div class="max-w-7xl mx-auto">
                    { render_header() }
                    <div class="grid lg:grid-cols-12 gap-6">
                        { render_map_view(&self.config.map.container_id) }
                        <div class="lg:col-span-4 space-y-6 order-1 lg:order-2">
                            { render_upload_form(self.controller.dashboard(), ctx.link()) }
                            { render_results(self.controller.dashboard().results()) }
                        </div>
                    </div>
                </div>
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let link = ctx.link().clone();
            self.resources.mount(
                &self.document,
                &self.config.resources,
                Box::new(move || link.send_message(Msg::MapLibraryLoaded)),
            );
        }
        self.controller.rendered(&self.document);
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.controller.dispose();
        self.resources.unmount(&self.document);
    }
}

// Handler methods
impl App {
    fn handle_file_selected(&mut self, file: Option<GlooFile>) -> bool {
        let selection = file.map(|file| {
            let name = file.name();
            (file, name)
        });
        self.controller.select_file(selection)
    }

    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        match self.controller.submit() {
            SubmitOutcome::Start { ticket, file } => {
                self.send_inference_request(ctx, ticket, file);
                true
            }
            SubmitOutcome::MissingFile => true,
            SubmitOutcome::Busy | SubmitOutcome::NotReady => false,
        }
    }

    fn handle_inference_finished(
        &mut self,
        ticket: RunTicket,
        outcome: Result<InferenceResult, InferenceError>,
    ) -> bool {
        // loading state changes even when the answer is dropped
        self.controller.complete(ticket, outcome);
        true
    }

    fn send_inference_request(&self, ctx: &Context<Self>, ticket: RunTicket, file: GlooFile) {
        let client = self.config.inference.clone();
        let link = ctx.link().clone();

        spawn_local(async move {
            let outcome = client.run(&file).await;
            link.send_message(Msg::InferenceFinished(ticket, outcome));
        });
    }
}
