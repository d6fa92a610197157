use crate::format::{urban_growth, vegetation_loss};
use shared::ChangeDetection;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ChangeDetectionDisplayProps {
    pub change_detection: Option<ChangeDetection>,
}

#[function_component(ChangeDetectionDisplay)]
pub fn change_detection_display(props: &ChangeDetectionDisplayProps) -> Html {
    let Some(change) = &props.change_detection else {
        return Html::default();
    };

    let loss = vegetation_loss(change.vegetation_loss_percent);
    let growth = urban_growth(change.urban_growth_rate);

    html! {
        <div class="p-4 bg-yellow-50 rounded-xl shadow-md border border-yellow-200">
            <h3 class="text-lg font-semibold text-yellow-800 flex items-center border-b border-yellow-300 pb-2 mb-3">
                <i class="lucide lucide-trending-up w-5 h-5 mr-2"></i>
                {"Environmental Risk & Change Detection"}
            </h3>
            <div class="space-y-2">
                <div class="flex justify-between items-center text-sm">
                    <span class="font-medium text-gray-700">{"Vegetation Loss (T1 to T2):"}</span>
                    <span class={classes!("font-bold", loss.tone.text_class())}>{ loss.text }</span>
                </div>
                <div class="flex justify-between items-center text-sm">
                    <span class="font-medium text-gray-700">{"Urban Growth Rate:"}</span>
                    <span class={classes!("font-bold", growth.tone.text_class())}>{ growth.text }</span>
                </div>
                <div class="pt-3 border-t border-yellow-300 mt-3 text-xs text-yellow-900">
                    <span class="font-semibold">{"Risk Note:"}</span>{" "}{ &change.risk_areas_note }
                </div>
            </div>
        </div>
    }
}
