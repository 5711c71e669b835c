//! Main application UI.

use eframe::egui::{self, FontDefinitions};

use crate::answers::Answer;
use crate::config::ReportConfig;
use crate::export;
use crate::report::{RenderedReport, ReportOptions};
use crate::session::{NavigationState, Session};

use super::checklist_panel::{self, ChecklistAction};
use super::department_panel;

/// Feedback shown under the checklist actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Warning(String),
    Error(String),
}

/// Register the phosphor icon font.
pub fn install_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

/// Checklist form application state.
pub struct ChecklistApp {
    pub session: Session,
    report_config: ReportConfig,

    // Department selection
    pub selected_department: Option<String>,

    // Last generated report, cleared whenever an answer changes
    pub report: Option<RenderedReport>,
    pub status: Option<StatusMessage>,
}

impl ChecklistApp {
    pub fn new(session: Session, report_config: ReportConfig) -> Self {
        Self {
            session,
            report_config,
            selected_department: None,
            report: None,
            status: None,
        }
    }

    /// Enter the checklist screen for the selected department.
    pub fn start_checklist(&mut self) {
        let Some(department) = self.selected_department.clone() else {
            return;
        };
        self.session.start(&department);
        self.report = None;
        self.status = None;
    }

    /// Return to department selection, discarding answers and any report.
    pub fn go_back(&mut self) {
        self.session.go_back();
        self.selected_department = None;
        self.report = None;
        self.status = None;
    }

    pub fn record_answer(&mut self, question: &str, answer: Answer) {
        match self.session.record_answer(question, answer) {
            Ok(()) => {
                self.report = None;
            }
            Err(e) => {
                tracing::warn!("Answer rejected: {}", e);
                self.status = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }

    /// Render the report and keep it for saving.
    pub fn generate_report(&mut self) {
        let options = ReportOptions::from_config(&self.report_config);
        match self.session.render_report(&options) {
            Ok(report) => {
                let unanswered = self.session.state().answers().map(|a| a.unanswered().len()).unwrap_or(0);
                self.status = Some(if unanswered > 0 {
                    StatusMessage::Warning(format!(
                        "Report ready ({} pages). {} unanswered questions were recorded as {}.",
                        report.page_count,
                        unanswered,
                        self.session
                            .state()
                            .answers()
                            .map(|a| a.default_answer())
                            .unwrap_or_default()
                    ))
                } else {
                    StatusMessage::Info(format!("Report ready ({} pages).", report.page_count))
                });
                self.report = Some(report);
            }
            Err(e) => {
                self.status = Some(StatusMessage::Error(e.to_string()));
                self.report = None;
            }
        }
    }

    /// Ask for a destination and write the last generated report.
    pub fn save_report(&mut self) {
        let Some(report) = &self.report else {
            return;
        };
        let Some(path) = export::show_save_dialog(&report.filename) else {
            return;
        };
        self.status = Some(match export::save_report(report, &path) {
            Ok(()) => StatusMessage::Info(format!("Saved to {}", path.display())),
            Err(e) => {
                tracing::error!("Failed to save report: {}", e);
                StatusMessage::Error(e.to_string())
            }
        });
    }
}

impl eframe::App for ChecklistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Department Checklist Form");
            ui.add_space(10.0);

            let filling = matches!(self.session.state(), NavigationState::FillingChecklist { .. });
            if !filling {
                if department_panel::show(self, ui) {
                    self.start_checklist();
                }
                return;
            }

            match checklist_panel::show(self, ui) {
                ChecklistAction::Generate => self.generate_report(),
                ChecklistAction::Save => self.save_report(),
                ChecklistAction::GoBack => self.go_back(),
                ChecklistAction::None => {}
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::{Checklist, ChecklistEntry};
    use crate::config::FormConfig;
    use std::sync::Arc;

    fn app(form: FormConfig) -> ChecklistApp {
        let checklist = Checklist::from_entries(vec![
            ChecklistEntry::new("IT", "Laptop works?"),
            ChecklistEntry::new("HR", "ID issued?"),
        ])
        .unwrap();
        ChecklistApp::new(Session::new(Arc::new(checklist), form), ReportConfig::default())
    }

    #[test]
    fn test_generate_then_change_answer_clears_report() {
        let mut app = app(FormConfig::default());
        app.selected_department = Some("IT".to_string());
        app.start_checklist();

        app.generate_report();
        assert!(app.report.is_some());
        assert!(matches!(app.status, Some(StatusMessage::Warning(_))));

        app.record_answer("Laptop works?", Answer::No);
        assert!(app.report.is_none());

        app.generate_report();
        assert!(matches!(app.status, Some(StatusMessage::Info(_))));
    }

    #[test]
    fn test_blocked_generation_reports_error_and_keeps_state() {
        let mut app = app(FormConfig {
            require_all_answered: true,
            ..FormConfig::default()
        });
        app.selected_department = Some("HR".to_string());
        app.start_checklist();

        app.generate_report();
        assert!(app.report.is_none());
        assert!(matches!(app.status, Some(StatusMessage::Error(_))));
        assert_eq!(app.session.state().department(), Some("HR"));
    }

    #[test]
    fn test_choosing_the_default_option_counts_as_answered() {
        let mut app = app(FormConfig {
            require_all_answered: true,
            ..FormConfig::default()
        });
        app.selected_department = Some("IT".to_string());
        app.start_checklist();

        // The untouched row already shows the default; selecting it again must still record it.
        let (question, shown) = app.session.current_answers()[0].clone();
        assert_eq!(shown, Answer::Yes);
        app.record_answer(&question, shown);

        let answers = app.session.state().answers().unwrap();
        assert!(answers.unanswered().is_empty());

        app.generate_report();
        assert!(app.report.is_some());
        assert!(matches!(app.status, Some(StatusMessage::Info(_))));
    }

    #[test]
    fn test_go_back_resets_selection() {
        let mut app = app(FormConfig::default());
        app.selected_department = Some("IT".to_string());
        app.start_checklist();
        app.go_back();

        assert!(app.selected_department.is_none());
        assert!(app.report.is_none());
        assert_eq!(app.session.state(), &NavigationState::SelectingDepartment);
    }
}
