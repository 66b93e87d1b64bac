// Ranking and matching core
pub mod compatibility;
pub mod diversify;
pub mod ranker;
pub mod similarity;
pub mod urgency;

pub use compatibility::compute_match;
pub use diversify::diversify_rank;
pub use ranker::Ranker;
pub use similarity::{similarity, MAX_SIMILARITY};
pub use urgency::{assess_urgency, build_why_urgent, compute_urgency};
