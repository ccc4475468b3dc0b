//! Sample submission workflow.
//!
//! State machine: Idle → Submitting → {Succeeded, Failed} → Idle.
//!
//! A submission that arrives while another is in flight is ignored: it does
//! not reach the service and `submit` returns `None`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::analysis::{aggregate, classify};
use crate::input::{RawSample, WaterSample};
use crate::ingest::PredictionService;
use crate::logging::{self, Service};
use crate::model::{ClientError, PredictionResult};
use crate::render::{ParameterRow, RenderInstruction, SUBMISSION_ERROR_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

pub struct SubmissionWorkflow<S> {
    service: S,
    state: Mutex<SubmissionState>,
}

impl<S: PredictionService> SubmissionWorkflow<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.lock_state()
    }

    /// Runs one submission to completion.
    ///
    /// Returns the analysis on success, a single error banner on any failure,
    /// or `None` if another submission is still in flight.
    pub fn submit(&self, raw: &RawSample) -> Option<RenderInstruction> {
        {
            let mut state = self.lock_state();
            if *state == SubmissionState::Submitting {
                tracing::warn!("submission ignored: previous submission still in flight");
                return None;
            }
            *state = SubmissionState::Submitting;
        }
        tracing::debug!("submission started");

        let (instruction, outcome) = match self.run(raw) {
            Ok(result) => (render_result(&result), SubmissionState::Succeeded),
            Err((service, err)) => {
                logging::log_service_failure(service, "analyze sample", &err);
                (
                    RenderInstruction::ErrorBanner {
                        message: SUBMISSION_ERROR_MESSAGE.to_string(),
                    },
                    SubmissionState::Failed,
                )
            }
        };

        self.set_state(outcome);
        tracing::debug!(?outcome, "submission finished");
        self.set_state(SubmissionState::Idle);
        Some(instruction)
    }

    fn run(&self, raw: &RawSample) -> Result<PredictionResult, (Service, ClientError)> {
        let sample = WaterSample::try_from(raw).map_err(|e| (Service::Input, e))?;
        self.service
            .analyze(&sample)
            .map_err(|e| (Service::Prediction, e))
    }

    fn set_state(&self, next: SubmissionState) {
        *self.lock_state() = next;
    }

    fn lock_state(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds the analysis instruction: one verdict, one classified row per
/// returned parameter in response order.
pub fn render_result(result: &PredictionResult) -> RenderInstruction {
    let verdict = aggregate(
        result.predicted_safe,
        result.safe_probability,
        result.contaminant_probability,
    );
    let rows = result
        .parameters
        .iter()
        .map(|(name, &value)| ParameterRow::new(name, value, classify(name, value)))
        .collect();

    RenderInstruction::Analysis {
        verdict,
        rows,
        contaminants: result.contaminants.clone(),
        analyzed_at: result.analyzed_at.clone(),
    }
}
