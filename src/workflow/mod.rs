/// User-triggered workflows.
///
/// Each workflow catches every failure at its own boundary and turns it into
/// a single render instruction; no error escapes to the caller.
///
/// Submodules:
/// - `submission` - sample submission with the in-flight guard.
/// - `alerts`     - one-shot alert feed load.

pub mod alerts;
pub mod submission;

pub use alerts::AlertFeedWorkflow;
pub use submission::{SubmissionState, SubmissionWorkflow};
