use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="text-center mb-10">
            <h1 class="text-4xl font-extrabold text-indigo-700 flex items-center justify-center">
                <i class="lucide lucide-satellite-dish w-8 h-8 mr-3"></i>
                {"GeoSenseAI Dashboard"}
            </h1>
            <p class="mt-2 text-xl text-gray-500">{"Geospatial Analysis and Environmental Monitoring Platform"}</p>
        </header>
    }
}
