//! In-crate fakes shared by unit tests.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::application::QuestionViewController;
use crate::domain::{
    DistinctFieldSet, FetchResult, FilterCriteria, Question, QuestionId, QuestionService,
};

/// A question service that answers from canned results and records calls.
pub(crate) struct FakeService {
    distinct: Mutex<FetchResult<DistinctFieldSet>>,
    questions: Mutex<FetchResult<Vec<Question>>>,
    calls: Mutex<Vec<FilterCriteria>>,
}

impl FakeService {
    pub(crate) fn new(distinct: DistinctFieldSet, questions: Vec<Question>) -> Self {
        Self {
            distinct: Mutex::new(Ok(distinct)),
            questions: Mutex::new(Ok(questions)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(DistinctFieldSet::default(), Vec::new())
    }

    pub(crate) fn set_distinct(&self, result: FetchResult<DistinctFieldSet>) {
        *self.distinct.lock().unwrap() = result;
    }

    pub(crate) fn set_questions(&self, result: FetchResult<Vec<Question>>) {
        *self.questions.lock().unwrap() = result;
    }

    pub(crate) fn calls(&self) -> Vec<FilterCriteria> {
        self.calls.lock().unwrap().clone()
    }
}

impl QuestionService for FakeService {
    fn distinct_fields(&self) -> FetchResult<DistinctFieldSet> {
        self.distinct.lock().unwrap().clone()
    }

    fn questions(&self, criteria: &FilterCriteria) -> FetchResult<Vec<Question>> {
        self.calls.lock().unwrap().push(criteria.clone());
        self.questions.lock().unwrap().clone()
    }
}

pub(crate) fn question(id: u64, text: &str, answer: &str, category: &str) -> Question {
    Question {
        id: QuestionId::from(id),
        question_text: text.to_string(),
        detailed_answer: answer.to_string(),
        category: category.to_string(),
        sub_category: "General".to_string(),
        difficulty_level: "Easy".to_string(),
        tags: Vec::new(),
        short_answer: None,
    }
}

pub(crate) fn distinct(categories: &[&str], sub_categories: &[&str], levels: &[&str]) -> DistinctFieldSet {
    let owned = |values: &[&str]| -> Vec<String> { values.iter().map(|v| v.to_string()).collect() };
    DistinctFieldSet {
        categories: owned(categories),
        sub_categories: owned(sub_categories),
        difficulty_levels: owned(levels),
    }
}

/// Drains the controller until the latest refresh has fully resolved.
pub(crate) fn wait_idle(controller: &mut QuestionViewController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        controller.poll();
        if !controller.is_loading() {
            return;
        }
        assert!(Instant::now() < deadline, "refresh did not resolve in time");
        std::thread::sleep(Duration::from_millis(5));
    }
}
