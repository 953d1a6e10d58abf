pub mod decision;
pub mod query;

pub use decision::{Candidate, DecisionFields, MISSING_FIELD, ScoredResult};
pub use query::NormalizedQuery;
