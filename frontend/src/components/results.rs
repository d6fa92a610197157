use super::change_detection_display::ChangeDetectionDisplay;
use super::metrics_display::MetricsDisplay;
use shared::InferenceResult;
use yew::prelude::*;

pub fn render_results(results: Option<&InferenceResult>) -> Html {
    let Some(results) = results else {
        return html! {};
    };

    html! {
        <div class="p-6 bg-indigo-50 rounded-xl shadow-xl border border-indigo-200 space-y-6">
            <blockquote class="p-3 bg-white rounded-lg border-l-4 border-indigo-400 italic text-gray-700 shadow-sm text-sm">
                { &results.summary }
            </blockquote>
            <MetricsDisplay metrics={Some(results.metrics.clone())} />
            <ChangeDetectionDisplay change_detection={Some(results.change_detection.clone())} />
        </div>
    }
}
