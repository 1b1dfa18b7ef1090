//! Rules, stepping, and oscillator classification.

mod classify;
mod rule;
mod step;

pub use classify::{ClassificationResult, Classifier, GenerationTrace, Verdict};
pub(crate) use classify::Scratch;
pub use rule::{LifeRule, RuleError, LIFE};
pub use step::StepFunction;
