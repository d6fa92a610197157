use shared::{InferenceResult, simulated_result};

/// Stands in for the land-cover model: every non-empty image gets the same
/// placeholder analysis.
#[derive(Clone, Debug, Default)]
pub struct SimulatedModel;

impl SimulatedModel {
    pub fn analyze(&self, image: &[u8]) -> InferenceResult {
        log::debug!("Simulating analysis of {} bytes", image.len());
        simulated_result()
    }
}
