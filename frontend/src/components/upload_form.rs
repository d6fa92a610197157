use crate::app::{App, Msg};
use crate::dashboard::Dashboard;
use gloo_file::File as GlooFile;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

pub const ACCEPTED_FILE_TYPES: &str = "image/*,.tiff,.tif";

pub fn render_upload_form(dashboard: &Dashboard<GlooFile>, link: &Scope<App>) -> Html {
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.item(0)).map(GlooFile::from);
        Msg::FileSelected(file)
    });

    let handle_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <form onsubmit={handle_submit} class="p-6 bg-white rounded-xl shadow-lg border border-indigo-100">
            <h2 class="text-2xl font-semibold mb-4 text-gray-800 flex items-center">
                <i class="lucide lucide-upload-cloud w-6 h-6 mr-2 text-indigo-500"></i>
                {"Upload Image"}
            </h2>
            <input
                type="file"
                accept={ACCEPTED_FILE_TYPES}
                onchange={handle_change}
                class="block w-full text-sm text-gray-500 file:rounded-full file:bg-indigo-50 file:text-indigo-700"
            />
            {
                if dashboard.file_name().is_empty() {
                    html! {}
                } else {
                    html! {
                        <p class="mt-3 text-xs text-gray-600 truncate">
                            {"File: "}<span class="font-medium">{ dashboard.file_name() }</span>
                        </p>
                    }
                }
            }
            { render_error_message(dashboard.error()) }
            <button
                type="submit"
                disabled={!dashboard.can_submit()}
                class="w-full mt-6 py-3 bg-indigo-600 text-white rounded-xl font-bold"
            >
                { dashboard.submit_label() }
            </button>
        </form>
    }
}

fn render_error_message(error: Option<&str>) -> Html {
    if let Some(error_msg) = error {
        html! {
            <div class="mt-4 p-3 bg-red-100 text-red-700 rounded-md">{ error_msg }</div>
        }
    } else {
        html! {}
    }
}
