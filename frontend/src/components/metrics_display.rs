use crate::format::metric_tiles;
use shared::LandCoverMetrics;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MetricsDisplayProps {
    pub metrics: Option<LandCoverMetrics>,
}

/// Land-cover share per category. Renders nothing without metrics.
#[function_component(MetricsDisplay)]
pub fn metrics_display(props: &MetricsDisplayProps) -> Html {
    let Some(metrics) = &props.metrics else {
        return Html::default();
    };

    html! {
        <div class="space-y-3 p-4 bg-white rounded-lg shadow-inner border border-gray-100">
            <h3 class="text-lg font-semibold text-gray-700 flex items-center border-b pb-2 mb-2">
                <i class="lucide lucide-pie-chart w-5 h-5 mr-2 text-indigo-500"></i>
                {"Land Cover Classification"}
            </h3>
            <div class="grid grid-cols-2 sm:grid-cols-4 gap-4">
                { for metric_tiles(metrics).into_iter().map(|tile| html! {
                    <div
                        key={tile.category.key()}
                        class={classes!(
                            "p-2", "border", "rounded-lg", "text-center", "bg-white", "shadow-sm",
                            tile.tone.text_class(),
                            tile.tone.border_class()
                        )}
                    >
                        <div class="font-bold text-xl">{ tile.value }</div>
                        <div class="text-xs font-medium mt-1 uppercase opacity-80">{ tile.label }</div>
                    </div>
                })}
            </div>
        </div>
    }
}
