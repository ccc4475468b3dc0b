/// Decision core of the water-quality client.
///
/// Both submodules are pure functions over plain values: no I/O, no shared
/// state beyond the static parameter registry.
///
/// Submodules:
/// - `status`  - classifies a single measurement as Normal / Warning / Danger.
/// - `verdict` - turns model output into the human-facing safety verdict.

pub mod status;
pub mod verdict;

pub use status::classify;
pub use verdict::{aggregate, Tone, Verdict};
