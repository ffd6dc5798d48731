//! Response validation at the service boundary.
//!
//! Bodies are decoded into typed values or rejected as a whole. A rejected
//! body is reported as [`FetchError::Malformed`] and never reaches
//! application state.

use std::collections::HashSet;

use super::errors::{FetchError, FetchResult};
use super::models::{DistinctFieldSet, Question};

/// Decodes the body of `GET /question-distinct-fields`.
///
/// All three arrays must be present and contain only strings.
pub fn decode_distinct_fields(body: &[u8]) -> FetchResult<DistinctFieldSet> {
    serde_json::from_slice(body)
        .map_err(|e| FetchError::Malformed(format!("distinct fields: {e}")))
}

/// Decodes the body of `GET /questions`.
///
/// The body must be an array of complete questions with unique IDs.
///
/// # Examples
///
/// ```
/// use prephub::domain::decode_questions;
///
/// let body = br#"[{"questionID":1,"questionText":"Reverse a string",
///     "detailedAnswer":"Swap ends","category":"Algorithms",
///     "subCategory":"Strings","difficultyLevel":"Easy"}]"#;
/// let questions = decode_questions(body).unwrap();
/// assert_eq!(questions[0].question_text, "Reverse a string");
///
/// assert!(decode_questions(br#"{"questions":[]}"#).is_err());
/// ```
pub fn decode_questions(body: &[u8]) -> FetchResult<Vec<Question>> {
    let questions: Vec<Question> = serde_json::from_slice(body)
        .map_err(|e| FetchError::Malformed(format!("questions: {e}")))?;

    let mut seen = HashSet::with_capacity(questions.len());
    for question in &questions {
        if !seen.insert(&question.id) {
            return Err(FetchError::Malformed(format!(
                "questions: duplicate questionID {}",
                question.id
            )));
        }
    }

    Ok(questions)
}
