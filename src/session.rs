//! Per-user form session: navigation state and the operations the UI calls.

use std::sync::Arc;

use crate::answers::{Answer, AnswerSet};
use crate::checklist::Checklist;
use crate::config::FormConfig;
use crate::error::{AppError, Result};
use crate::report::{RenderedReport, ReportOptions, render_report};

/// Events that move the form between its two screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Begin the checklist for a department with its question list.
    Start {
        department: String,
        questions: Vec<String>,
        default_answer: Answer,
    },
    /// Return to department selection, dropping all answers.
    GoBack,
}

/// Which screen the form is on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavigationState {
    #[default]
    SelectingDepartment,
    FillingChecklist { department: String, answers: AnswerSet },
}

impl NavigationState {
    /// Apply an event and return the next state.
    ///
    /// Events that do not apply to the current state leave it unchanged.
    pub fn transition(self, event: NavEvent) -> Self {
        match (self, event) {
            (
                NavigationState::SelectingDepartment,
                NavEvent::Start {
                    department,
                    questions,
                    default_answer,
                },
            ) => {
                tracing::info!("Starting checklist for '{}' ({} questions)", department, questions.len());
                NavigationState::FillingChecklist {
                    department,
                    answers: AnswerSet::new(questions, default_answer),
                }
            }
            (NavigationState::FillingChecklist { department, .. }, NavEvent::GoBack) => {
                tracing::info!("Leaving checklist for '{}'", department);
                NavigationState::SelectingDepartment
            }
            (state, event) => {
                tracing::warn!("Ignoring {:?} while in {}", event, state.name());
                state
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavigationState::SelectingDepartment => "department selection",
            NavigationState::FillingChecklist { .. } => "checklist",
        }
    }

    pub fn department(&self) -> Option<&str> {
        match self {
            NavigationState::FillingChecklist { department, .. } => Some(department.as_str()),
            NavigationState::SelectingDepartment => None,
        }
    }

    pub fn answers(&self) -> Option<&AnswerSet> {
        match self {
            NavigationState::FillingChecklist { answers, .. } => Some(answers),
            NavigationState::SelectingDepartment => None,
        }
    }
}

/// One user's form session.
///
/// The checklist is shared read-only; navigation state and answers belong to
/// this session alone.
#[derive(Debug, Clone)]
pub struct Session {
    checklist: Arc<Checklist>,
    form: FormConfig,
    state: NavigationState,
}

impl Session {
    pub fn new(checklist: Arc<Checklist>, form: FormConfig) -> Self {
        Self {
            checklist,
            form,
            state: NavigationState::default(),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn list_departments(&self) -> Vec<String> {
        self.checklist.departments()
    }

    pub fn questions_for(&self, department: &str) -> Vec<String> {
        self.checklist.questions_for(department)
    }

    /// Move to the checklist screen for `department` with a fresh answer set.
    pub fn start(&mut self, department: &str) {
        let event = NavEvent::Start {
            department: department.to_string(),
            questions: self.questions_for(department),
            default_answer: self.form.default_answer,
        };
        self.apply(event);
    }

    /// Return to department selection.
    pub fn go_back(&mut self) {
        self.apply(NavEvent::GoBack);
    }

    fn apply(&mut self, event: NavEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.transition(event);
    }

    /// Record an answer for a question of the active department.
    pub fn record_answer(&mut self, question: &str, answer: Answer) -> Result<()> {
        match &mut self.state {
            NavigationState::FillingChecklist { answers, .. } => answers.set(question, answer),
            NavigationState::SelectingDepartment => {
                Err(AppError::validation("No department selected"))
            }
        }
    }

    /// Current answers in question order, defaults filled in.
    pub fn current_answers(&self) -> Vec<(String, Answer)> {
        self.state
            .answers()
            .map(AnswerSet::to_ordered_pairs)
            .unwrap_or_default()
    }

    /// Render the report for the active department.
    ///
    /// Fails with a validation error when no department is active, or when
    /// explicit answers are required and some are missing.
    pub fn render_report(&self, options: &ReportOptions) -> Result<RenderedReport> {
        let NavigationState::FillingChecklist { department, answers } = &self.state else {
            return Err(AppError::validation("No department selected"));
        };

        let unanswered = answers.unanswered();
        if !unanswered.is_empty() {
            if self.form.require_all_answered {
                return Err(AppError::validation(format!(
                    "{} of {} questions are unanswered",
                    unanswered.len(),
                    answers.questions().len()
                )));
            }
            tracing::warn!(
                "{} unanswered questions default to {}",
                unanswered.len(),
                answers.default_answer()
            );
        }

        render_report(department, &answers.to_ordered_pairs(), options).map_err(|e| {
            tracing::error!("Report generation failed: {}", e);
            AppError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::ChecklistEntry;

    fn checklist() -> Arc<Checklist> {
        Arc::new(
            Checklist::from_entries(vec![
                ChecklistEntry::new("IT", "Laptop works?"),
                ChecklistEntry::new("IT", "VPN configured?"),
                ChecklistEntry::new("HR", "ID issued?"),
            ])
            .unwrap(),
        )
    }

    fn session() -> Session {
        Session::new(checklist(), FormConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.state(), &NavigationState::SelectingDepartment);
        assert!(s.current_answers().is_empty());
        assert_eq!(s.list_departments(), vec!["IT", "HR"]);
    }

    #[test]
    fn test_start_and_go_back() {
        let mut s = session();
        s.start("IT");
        assert_eq!(s.state().department(), Some("IT"));
        assert_eq!(s.current_answers().len(), 2);

        s.go_back();
        assert_eq!(s.state(), &NavigationState::SelectingDepartment);
        assert!(s.current_answers().is_empty());
    }

    #[test]
    fn test_ignored_transitions() {
        let state = NavigationState::SelectingDepartment.transition(NavEvent::GoBack);
        assert_eq!(state, NavigationState::SelectingDepartment);

        let mut s = session();
        s.start("IT");
        s.start("HR");
        assert_eq!(s.state().department(), Some("IT"));
    }

    #[test]
    fn test_department_switch_resets_answers() {
        let mut s = session();
        s.start("IT");
        s.record_answer("Laptop works?", Answer::No).unwrap();
        s.go_back();
        s.start("HR");

        let answers = s.state().answers().unwrap();
        assert_eq!(answers.questions(), &["ID issued?".to_string()]);
        assert_eq!(answers.answered_count(), 0);
        assert!(s.record_answer("Laptop works?", Answer::No).is_err());
        assert_eq!(s.current_answers(), vec![("ID issued?".to_string(), Answer::Yes)]);
    }

    #[test]
    fn test_record_answer_without_department() {
        let mut s = session();
        assert!(matches!(
            s.record_answer("Laptop works?", Answer::Yes),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_end_to_end_it_report() {
        let mut s = session();
        assert_eq!(s.questions_for("IT").len(), 2);

        s.start("IT");
        s.record_answer("Laptop works?", Answer::Yes).unwrap();
        s.record_answer("VPN configured?", Answer::Yes).unwrap();

        let report = s.render_report(&ReportOptions::default()).unwrap();
        assert_eq!(report.document.title, "Checklist Report - IT");
        assert_eq!(report.document.rows.len(), 2);
        assert!(report.document.rows.iter().all(|r| r.yes_mark() && !r.no_mark()));
        assert_eq!(report.filename, "Checklist_Report.pdf");
    }

    #[test]
    fn test_department_without_questions_renders_header_only() {
        let mut s = session();
        s.start("Legal");
        let report = s.render_report(&ReportOptions::default()).unwrap();
        assert!(report.document.rows.is_empty());
        assert_eq!(report.page_count, 1);
    }

    #[test]
    fn test_render_without_department_fails() {
        let s = session();
        assert!(s.render_report(&ReportOptions::default()).is_err());
    }

    #[test]
    fn test_require_all_answered_blocks_render() {
        let form = FormConfig {
            require_all_answered: true,
            ..FormConfig::default()
        };
        let mut s = Session::new(checklist(), form);
        s.start("IT");
        s.record_answer("Laptop works?", Answer::No).unwrap();
        assert!(matches!(
            s.render_report(&ReportOptions::default()),
            Err(AppError::Validation(_))
        ));

        s.record_answer("VPN configured?", Answer::Yes).unwrap();
        let report = s.render_report(&ReportOptions::default()).unwrap();
        assert!(report.document.rows[0].no_mark());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let shared = checklist();
        let mut a = Session::new(shared.clone(), FormConfig::default());
        let mut b = Session::new(shared, FormConfig::default());

        a.start("IT");
        b.start("HR");
        a.record_answer("VPN configured?", Answer::No).unwrap();

        assert_eq!(b.current_answers(), vec![("ID issued?".to_string(), Answer::Yes)]);
        assert_eq!(a.state().department(), Some("IT"));
    }
}
