pub mod case;
pub mod judgment;

pub use case::{CaseId, CaseRecord};
pub use judgment::{normalize_correct, AnswerRequest, Judgment, JudgmentResponse};
