mod app;
mod components;
mod config;
mod dashboard;
mod document;
mod format;
mod inference;
mod leaflet;
mod map;
mod resources;
#[cfg(test)]
mod testing;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("GeoSense dashboard starting...");
    yew::Renderer::<app::App>::new().render();
}
