//! Read contract of the remote question service.

use super::errors::FetchResult;
use super::models::{DistinctFieldSet, FilterCriteria, Question};

/// The two reads the question view depends on.
///
/// Implementations are called from worker threads, hence `Send + Sync`.
pub trait QuestionService: Send + Sync {
    /// `GET /question-distinct-fields`
    fn distinct_fields(&self) -> FetchResult<DistinctFieldSet>;

    /// `GET /questions` constrained by the present fields of `criteria`.
    fn questions(&self, criteria: &FilterCriteria) -> FetchResult<Vec<Question>>;
}
