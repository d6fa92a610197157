use yew::prelude::*;

pub fn render_map_view(container_id: &str) -> Html {
    html! {
        <div class="lg:col-span-8 order-2 lg:order-1">
            <h2 class="text-2xl font-semibold mb-4 text-gray-800 flex items-center">
                <i class="lucide lucide-map w-6 h-6 mr-2 text-indigo-500"></i>
                {"Map Visualization"}
            </h2>
            // Leaflet owns everything inside this element
            <div
                id={container_id.to_string()}
                class="shadow-2xl"
                style="height: 60vh; min-height: 400px; border-radius: 0.75rem;"
            ></div>
        </div>
    }
}
