// Core algorithm exports
pub mod experience;
pub mod matcher;
pub mod scoring;
pub mod skill_gap;

pub use experience::{experience_window, matches_experience};
pub use matcher::{MatchError, MatchScorer, RankedMatches};
pub use scoring::{calculate_match_score, match_reasons};
pub use skill_gap::analyze_skill_gaps;
