pub mod change_detection_display;
pub mod header;
pub mod map_view;
pub mod metrics_display;
pub mod results;
pub mod upload_form;
