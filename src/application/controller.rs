//! Synchronisation of remote question data with the current filter.
//!
//! Each refresh is stamped with a new [`RefreshEpoch`]. The two reads run on
//! worker threads and report back over a channel; the owner drains that
//! channel with [`QuestionViewController::poll`] on its own thread, so all
//! state changes happen in one place. A response whose epoch is not the
//! latest one is dropped, which keeps a slow answer for an old filter from
//! overwriting the answer for the current one.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::domain::{
    DistinctFieldSet, FetchError, FetchResult, FilterCriteria, Question, QuestionService,
    RefreshEpoch,
};

/// Result of one read, tagged with the refresh that issued it.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub epoch: RefreshEpoch,
    pub payload: FetchPayload,
}

#[derive(Debug, Clone)]
pub enum FetchPayload {
    DistinctFields(FetchResult<DistinctFieldSet>),
    Questions(FetchResult<Vec<Question>>),
}

impl FetchPayload {
    fn kind(&self) -> RequestKind {
        match self {
            FetchPayload::DistinctFields(_) => RequestKind::DistinctFields,
            FetchPayload::Questions(_) => RequestKind::Questions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    DistinctFields,
    Questions,
}

impl RequestKind {
    fn thread_name(self) -> &'static str {
        match self {
            RequestKind::DistinctFields => "fetch-distinct-fields",
            RequestKind::Questions => "fetch-questions",
        }
    }
}

/// What [`QuestionViewController::apply`] did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyStatus {
    /// The outcome replaced the corresponding state.
    Applied,
    /// The outcome belonged to an older refresh and was dropped.
    Stale,
    /// The read failed; prior state was kept.
    Failed(FetchError),
}

pub struct QuestionViewController {
    service: Arc<dyn QuestionService>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    latest: RefreshEpoch,
    distinct_pending: bool,
    questions_pending: bool,
    distinct_fields: DistinctFieldSet,
    questions: Vec<Question>,
}

impl std::fmt::Debug for QuestionViewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionViewController")
            .field("latest", &self.latest)
            .field("distinct_pending", &self.distinct_pending)
            .field("questions_pending", &self.questions_pending)
            .field("questions", &self.questions.len())
            .finish()
    }
}

impl QuestionViewController {
    pub fn new(service: Arc<dyn QuestionService>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            service,
            tx,
            rx,
            latest: RefreshEpoch::default(),
            distinct_pending: false,
            questions_pending: false,
            distinct_fields: DistinctFieldSet::default(),
            questions: Vec::new(),
        }
    }

    pub fn distinct_fields(&self) -> &DistinctFieldSet {
        &self.distinct_fields
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn latest_epoch(&self) -> RefreshEpoch {
        self.latest
    }

    /// Whether the latest refresh still has a read outstanding.
    pub fn is_loading(&self) -> bool {
        self.distinct_pending || self.questions_pending
    }

    /// Issues both reads for `criteria` and returns the epoch they carry.
    pub fn refresh(&mut self, criteria: &FilterCriteria) -> RefreshEpoch {
        let epoch = self.begin_refresh();
        tracing::info!(%epoch, ?criteria, "refreshing questions");

        let service = Arc::clone(&self.service);
        self.spawn(RequestKind::DistinctFields, epoch, move || {
            FetchPayload::DistinctFields(service.distinct_fields())
        });

        let service = Arc::clone(&self.service);
        let criteria = criteria.clone();
        self.spawn(RequestKind::Questions, epoch, move || {
            FetchPayload::Questions(service.questions(&criteria))
        });

        epoch
    }

    /// Advances the epoch and marks both reads as outstanding.
    ///
    /// Outcomes stamped with any earlier epoch are ignored from here on.
    pub fn begin_refresh(&mut self) -> RefreshEpoch {
        self.latest = self.latest.next();
        self.distinct_pending = true;
        self.questions_pending = true;
        self.latest
    }

    fn spawn<F>(&mut self, kind: RequestKind, epoch: RefreshEpoch, read: F)
    where
        F: FnOnce() -> FetchPayload + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(kind.thread_name().to_string())
            .spawn(move || {
                let payload = read();
                if tx.send(FetchOutcome { epoch, payload }).is_err() {
                    tracing::debug!(%epoch, "controller dropped before response arrived");
                }
            });

        if let Err(err) = spawned {
            tracing::warn!(%epoch, error = %err, "failed to spawn {}", kind.thread_name());
            self.clear_pending(kind);
        }
    }

    fn clear_pending(&mut self, kind: RequestKind) {
        match kind {
            RequestKind::DistinctFields => self.distinct_pending = false,
            RequestKind::Questions => self.questions_pending = false,
        }
    }

    /// Applies one outcome under the epoch guard.
    pub fn apply(&mut self, outcome: FetchOutcome) -> ApplyStatus {
        let FetchOutcome { epoch, payload } = outcome;
        let kind = payload.kind();

        if epoch != self.latest {
            tracing::debug!(%epoch, latest = %self.latest, ?kind, "discarding stale response");
            return ApplyStatus::Stale;
        }
        self.clear_pending(kind);

        match payload {
            FetchPayload::DistinctFields(Ok(fields)) => {
                tracing::debug!(
                    %epoch,
                    categories = fields.categories.len(),
                    sub_categories = fields.sub_categories.len(),
                    difficulty_levels = fields.difficulty_levels.len(),
                    "distinct fields updated"
                );
                self.distinct_fields = fields;
                ApplyStatus::Applied
            }
            FetchPayload::Questions(Ok(questions)) => {
                tracing::debug!(%epoch, count = questions.len(), "question list updated");
                self.questions = questions;
                ApplyStatus::Applied
            }
            FetchPayload::DistinctFields(Err(err)) => {
                tracing::warn!(%epoch, error = %err, "error fetching distinct fields");
                ApplyStatus::Failed(err)
            }
            FetchPayload::Questions(Err(err)) => {
                tracing::warn!(%epoch, error = %err, "error fetching questions");
                ApplyStatus::Failed(err)
            }
        }
    }

    /// Applies every outcome already received. Never blocks.
    ///
    /// Returns how many outcomes changed state.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.rx.try_recv() {
            if self.apply(outcome) == ApplyStatus::Applied {
                applied += 1;
            }
        }
        applied
    }
}
