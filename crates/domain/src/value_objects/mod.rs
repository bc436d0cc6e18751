//! Value objects - Immutable objects defined by their attributes

mod names;
mod text_match;
mod verdict_policy;

pub use names::{Description, Question, SuspectName};
pub use text_match::{grade_text, normalize, overlap_ratio, MatchGrade, DEFAULT_PARTIAL_THRESHOLD};
pub use verdict_policy::VerdictPolicy;
