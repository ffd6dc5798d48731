//! Application state for the question browser.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use std::sync::Arc;

use super::controller::QuestionViewController;
use super::store::{DisclosureStore, FilterStore};
use crate::domain::{FilterField, Question, QuestionId, QuestionService, RefreshEpoch};

/// The two top-level screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Welcome page with key hints
    Home,
    /// Filterable question list
    Questions,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Home, Screen::Questions];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Questions => "Interview Prep Questions",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Screen::Home => 0,
            Screen::Questions => 1,
        }
    }
}

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and which popups
/// are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Normal navigation mode
    Normal,
    /// Choosing a value for one filter field
    Picking(FilterField),
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// Owns the filter and disclosure stores and the view controller. All
/// mutation goes through methods on this type, called from the event loop.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use prephub::application::{App, Screen};
/// use prephub::domain::{DistinctFieldSet, FetchResult, FilterCriteria, Question, QuestionService};
///
/// struct Offline;
///
/// impl QuestionService for Offline {
///     fn distinct_fields(&self) -> FetchResult<DistinctFieldSet> {
///         Ok(DistinctFieldSet::default())
///     }
///     fn questions(&self, _: &FilterCriteria) -> FetchResult<Vec<Question>> {
///         Ok(Vec::new())
///     }
/// }
///
/// let app = App::new(Arc::new(Offline));
/// assert_eq!(app.screen, Screen::Home);
/// assert_eq!(app.selected, 0);
/// ```
#[derive(Debug)]
pub struct App {
    /// Currently displayed screen
    pub screen: Screen,
    /// Current input mode
    pub mode: AppMode,
    /// Selected filter criteria
    pub filters: FilterStore,
    /// Revealed answers
    pub disclosure: DisclosureStore,
    /// Fetched data and refresh bookkeeping
    pub controller: QuestionViewController,
    /// Cursor position in the question list
    pub selected: usize,
    /// Cursor position in the open picker
    pub picker_index: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
}

impl App {
    pub fn new(service: Arc<dyn QuestionService>) -> Self {
        Self {
            screen: Screen::Home,
            mode: AppMode::Normal,
            filters: FilterStore::default(),
            disclosure: DisclosureStore::default(),
            controller: QuestionViewController::new(service),
            selected: 0,
            picker_index: 0,
            help_scroll: 0,
        }
    }

    pub fn questions(&self) -> &[Question] {
        self.controller.questions()
    }

    pub fn selected_question(&self) -> Option<&Question> {
        self.questions().get(self.selected)
    }

    /// Switches screens. Entering the question screen always refreshes.
    pub fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.mode = AppMode::Normal;
        if screen == Screen::Questions {
            self.refresh();
        }
    }

    pub fn next_screen(&mut self) {
        let next = match self.screen {
            Screen::Home => Screen::Questions,
            Screen::Questions => Screen::Home,
        };
        self.show_screen(next);
    }

    /// Re-issues both reads for the current criteria.
    pub fn refresh(&mut self) -> RefreshEpoch {
        self.controller.refresh(self.filters.criteria())
    }

    /// Replaces one filter field and refreshes the list.
    pub fn set_filter_field(&mut self, field: FilterField, value: Option<String>) -> RefreshEpoch {
        self.filters.set_field(field, value);
        self.selected = 0;
        self.refresh()
    }

    pub fn toggle_disclosure(&mut self, id: &QuestionId) -> bool {
        self.disclosure.toggle(id)
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_question().map(|q| q.id.clone()) {
            self.toggle_disclosure(&id);
        }
    }

    /// Applies any responses that have arrived. Returns true if state changed.
    pub fn pump(&mut self) -> bool {
        let changed = self.controller.poll() > 0;
        if changed {
            self.clamp_selection();
        }
        changed
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.questions().len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.questions().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Options the picker for `field` offers, exactly as the backend sent them.
    pub fn picker_options(&self, field: FilterField) -> &[String] {
        self.controller.distinct_fields().options(field)
    }

    /// Opens the picker for `field`, starting on the current value if listed.
    pub fn open_picker(&mut self, field: FilterField) {
        let current = self.filters.criteria().get(field);
        self.picker_index = self
            .picker_options(field)
            .iter()
            .position(|option| Some(option.as_str()) == current)
            .unwrap_or(0);
        self.mode = AppMode::Picking(field);
    }

    pub fn picker_next(&mut self) {
        if let AppMode::Picking(field) = self.mode {
            if self.picker_index + 1 < self.picker_options(field).len() {
                self.picker_index += 1;
            }
        }
    }

    pub fn picker_previous(&mut self) {
        self.picker_index = self.picker_index.saturating_sub(1);
    }

    /// Applies the highlighted option. Does nothing if the list is empty.
    pub fn confirm_picker(&mut self) {
        if let AppMode::Picking(field) = self.mode {
            let choice = self.picker_options(field).get(self.picker_index).cloned();
            self.mode = AppMode::Normal;
            if let Some(value) = choice {
                self.set_filter_field(field, Some(value));
            }
        }
    }

    /// Removes the constraint on the picker's field.
    pub fn clear_picker_field(&mut self) {
        if let AppMode::Picking(field) = self.mode {
            self.mode = AppMode::Normal;
            self.set_filter_field(field, None);
        }
    }

    pub fn cancel_picker(&mut self) {
        self.mode = AppMode::Normal;
        self.picker_index = 0;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FetchError, FilterCriteria};
    use crate::testing::{distinct, question, wait_idle, FakeService};

    fn app_with(service: FakeService) -> (Arc<FakeService>, App) {
        let service = Arc::new(service);
        let app = App::new(service.clone());
        (service, app)
    }

    fn settle(app: &mut App) {
        wait_idle(&mut app.controller);
        app.clamp_selection();
    }

    #[test]
    fn test_app_starts_on_home_without_fetching() {
        let (service, app) = app_with(FakeService::empty());
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.controller.latest_epoch(), RefreshEpoch(0));
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_entering_questions_screen_refreshes() {
        let list = vec![question(1, "Reverse a string", "Two pointers", "Algorithms")];
        let (service, mut app) = app_with(FakeService::new(Default::default(), list));

        app.show_screen(Screen::Questions);
        settle(&mut app);

        assert_eq!(app.questions().len(), 1);
        assert_eq!(service.calls(), vec![FilterCriteria::default()]);
    }

    #[test]
    fn test_set_filter_field_refetches_with_one_parameter() {
        let (service, mut app) = app_with(FakeService::empty());

        let epoch = app.set_filter_field(FilterField::DifficultyLevel, Some("Hard".to_string()));
        settle(&mut app);

        assert_eq!(epoch, RefreshEpoch(1));
        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query_pairs(), vec![("difficultyLevel", "Hard")]);
    }

    #[test]
    fn test_filter_fields_accumulate() {
        let (service, mut app) = app_with(FakeService::empty());

        app.set_filter_field(FilterField::Category, Some("Algorithms".to_string()));
        settle(&mut app);
        app.set_filter_field(FilterField::SubCategory, Some("Arrays".to_string()));
        settle(&mut app);

        let last = service.calls().pop().unwrap();
        assert_eq!(
            last.query_pairs(),
            vec![("category", "Algorithms"), ("subCategory", "Arrays")]
        );
    }

    #[test]
    fn test_toggle_selected_reveals_and_hides() {
        let list = vec![
            question(1, "first", "a1", "Algorithms"),
            question(2, "second", "a2", "Algorithms"),
        ];
        let (_service, mut app) = app_with(FakeService::new(Default::default(), list));
        app.show_screen(Screen::Questions);
        settle(&mut app);

        app.select_next();
        app.toggle_selected();
        assert!(app.disclosure.is_revealed(&QuestionId::from(2)));
        assert!(!app.disclosure.is_revealed(&QuestionId::from(1)));

        app.toggle_selected();
        assert!(!app.disclosure.is_revealed(&QuestionId::from(2)));
    }

    #[test]
    fn test_disclosure_survives_refresh_for_same_id() {
        let list = vec![question(7, "q", "a", "Algorithms")];
        let (_service, mut app) = app_with(FakeService::new(Default::default(), list));
        app.show_screen(Screen::Questions);
        settle(&mut app);

        app.toggle_selected();
        app.refresh();
        settle(&mut app);

        assert!(app.disclosure.is_revealed(&QuestionId::from(7)));
    }

    #[test]
    fn test_selection_is_bounded() {
        let list = vec![question(1, "only", "a", "Algorithms")];
        let (_service, mut app) = app_with(FakeService::new(Default::default(), list));
        app.show_screen(Screen::Questions);
        settle(&mut app);

        app.select_next();
        assert_eq!(app.selected, 0);
        app.select_previous();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let list = vec![
            question(1, "a", "a", "Algorithms"),
            question(2, "b", "b", "Algorithms"),
            question(3, "c", "c", "Algorithms"),
        ];
        let (service, mut app) = app_with(FakeService::new(Default::default(), list));
        app.show_screen(Screen::Questions);
        settle(&mut app);
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 2);

        service.set_questions(Ok(vec![question(1, "a", "a", "Algorithms")]));
        app.refresh();
        settle(&mut app);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_picker_offers_exact_distinct_values() {
        let fields = distinct(&["Algorithms"], &["Arrays"], &["Easy"]);
        let (_service, mut app) = app_with(FakeService::new(fields, Vec::new()));
        app.show_screen(Screen::Questions);
        settle(&mut app);

        assert_eq!(app.picker_options(FilterField::Category), ["Algorithms".to_string()]);
        assert_eq!(app.picker_options(FilterField::SubCategory), ["Arrays".to_string()]);
        assert_eq!(app.picker_options(FilterField::DifficultyLevel), ["Easy".to_string()]);
    }

    #[test]
    fn test_confirm_picker_sets_filter() {
        let fields = distinct(&["Algorithms", "DataStructures"], &[], &[]);
        let (service, mut app) = app_with(FakeService::new(fields, Vec::new()));
        app.show_screen(Screen::Questions);
        settle(&mut app);

        app.open_picker(FilterField::Category);
        app.picker_next();
        app.confirm_picker();
        settle(&mut app);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.filters.criteria().get(FilterField::Category), Some("DataStructures"));
        assert_eq!(
            service.calls().last().unwrap().category.as_deref(),
            Some("DataStructures")
        );
    }

    #[test]
    fn test_open_picker_starts_on_current_value() {
        let fields = distinct(&["Algorithms", "DataStructures", "Systems"], &[], &[]);
        let (_service, mut app) = app_with(FakeService::new(fields, Vec::new()));
        app.show_screen(Screen::Questions);
        settle(&mut app);
        app.set_filter_field(FilterField::Category, Some("Systems".to_string()));
        settle(&mut app);

        app.open_picker(FilterField::Category);
        assert_eq!(app.picker_index, 2);
    }

    #[test]
    fn test_confirm_empty_picker_does_not_refresh() {
        let (_service, mut app) = app_with(FakeService::empty());
        app.open_picker(FilterField::SubCategory);
        app.confirm_picker();

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.controller.latest_epoch(), RefreshEpoch(0));
    }

    #[test]
    fn test_clear_picker_field_removes_constraint() {
        let (service, mut app) = app_with(FakeService::empty());
        app.set_filter_field(FilterField::Category, Some("Algorithms".to_string()));
        settle(&mut app);

        app.open_picker(FilterField::Category);
        app.clear_picker_field();
        settle(&mut app);

        assert!(app.filters.criteria().is_unconstrained());
        assert!(service.calls().last().unwrap().is_unconstrained());
    }

    #[test]
    fn test_failed_refresh_keeps_three_questions() {
        let list = vec![
            question(1, "one", "a", "Algorithms"),
            question(2, "two", "b", "Algorithms"),
            question(3, "three", "c", "Algorithms"),
        ];
        let (service, mut app) = app_with(FakeService::new(Default::default(), list));
        app.show_screen(Screen::Questions);
        settle(&mut app);

        service.set_questions(Err(FetchError::Server { status: 500 }));
        app.set_filter_field(FilterField::Category, Some("Algorithms".to_string()));
        settle(&mut app);

        let texts: Vec<&str> = app.questions().iter().map(|q| q.question_text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_next_screen_cycles() {
        let (_service, mut app) = app_with(FakeService::empty());
        app.next_screen();
        assert_eq!(app.screen, Screen::Questions);
        app.next_screen();
        assert_eq!(app.screen, Screen::Home);
    }
}
