use std::collections::HashSet;
use std::fmt;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a question as issued by the backend.
///
/// The backend may send it as a JSON string or a JSON integer; both are
/// normalised to their string form so `1` and `"1"` name the same question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => QuestionId(text),
            RawId::Integer(n) => QuestionId(n.to_string()),
        })
    }
}

/// A single interview question as returned by `GET /questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "questionID")]
    pub id: QuestionId,
    pub question_text: String,
    pub detailed_answer: String,
    pub category: String,
    pub sub_category: String,
    pub difficulty_level: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_answer: Option<String>,
}

/// One of the three filterable question fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Category,
    SubCategory,
    DifficultyLevel,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [
        FilterField::Category,
        FilterField::SubCategory,
        FilterField::DifficultyLevel,
    ];

    /// Name of the query parameter the backend expects for this field.
    pub fn query_key(self) -> &'static str {
        match self {
            FilterField::Category => "category",
            FilterField::SubCategory => "subCategory",
            FilterField::DifficultyLevel => "difficultyLevel",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Category => "Category",
            FilterField::SubCategory => "Sub-Category",
            FilterField::DifficultyLevel => "Difficulty Level",
        }
    }
}

/// The user-selected constraints applied to the question list.
///
/// A `None` field places no constraint on that field and is never sent to
/// the backend.
///
/// # Examples
///
/// ```
/// use prephub::domain::{FilterCriteria, FilterField};
///
/// let mut criteria = FilterCriteria::default();
/// assert!(criteria.query_pairs().is_empty());
///
/// criteria.set(FilterField::Category, Some("Algorithms".to_string()));
/// assert_eq!(criteria.query_pairs(), vec![("category", "Algorithms")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<String>,
}

impl FilterCriteria {
    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Category => self.category.as_deref(),
            FilterField::SubCategory => self.sub_category.as_deref(),
            FilterField::DifficultyLevel => self.difficulty_level.as_deref(),
        }
    }

    /// Replaces exactly one field, leaving the other two untouched.
    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        let slot = match field {
            FilterField::Category => &mut self.category,
            FilterField::SubCategory => &mut self.sub_category,
            FilterField::DifficultyLevel => &mut self.difficulty_level,
        };
        *slot = value;
    }

    pub fn is_unconstrained(&self) -> bool {
        FilterField::ALL.iter().all(|field| self.get(*field).is_none())
    }

    /// Query parameters for the present fields only, in field order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        FilterField::ALL
            .iter()
            .filter_map(|field| self.get(*field).map(|value| (field.query_key(), value)))
            .collect()
    }
}

/// Values available for each filterable field, as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistinctFieldSet {
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
    pub difficulty_levels: Vec<String>,
}

impl DistinctFieldSet {
    pub fn options(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::Category => &self.categories,
            FilterField::SubCategory => &self.sub_categories,
            FilterField::DifficultyLevel => &self.difficulty_levels,
        }
    }
}

/// Question IDs whose answer is currently revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisclosureSet {
    revealed: HashSet<QuestionId>,
}

impl DisclosureSet {
    /// Flips membership of `id` and returns whether it is now revealed.
    pub fn toggle(&mut self, id: &QuestionId) -> bool {
        if self.revealed.remove(id) {
            false
        } else {
            self.revealed.insert(id.clone());
            true
        }
    }

    pub fn is_revealed(&self, id: &QuestionId) -> bool {
        self.revealed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}

/// Token stamped on every refresh and on every response it produces.
///
/// Epochs only ever grow, so a response is current exactly when its epoch
/// equals the most recently issued one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshEpoch(pub u64);

impl RefreshEpoch {
    pub fn next(self) -> Self {
        RefreshEpoch(self.0 + 1)
    }
}

impl fmt::Display for RefreshEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
