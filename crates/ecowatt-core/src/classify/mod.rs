pub mod engine;
pub mod outcome;

pub use engine::{classify, decide};
pub use outcome::{AnalysisResult, TierDecision};
