//! Checklist panel: one YES/NO row per question plus report actions.

use eframe::egui::{RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROW_LEFT, FILE_PDF, FLOPPY_DISK};

use crate::answers::Answer;

use super::app::ChecklistApp;
use super::components::{icon_button, panel_header, status_line};

/// Action requested from the checklist panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistAction {
    None,
    Generate,
    Save,
    GoBack,
}

/// Show the checklist for the active department.
pub fn show(app: &mut ChecklistApp, ui: &mut Ui) -> ChecklistAction {
    let department = app.session.state().department().unwrap_or_default().to_string();
    panel_header(ui, &format!("Checklist for {department}"));

    let answers = app.session.current_answers();
    let mut changed = Vec::new();

    ScrollArea::vertical()
        .max_height((ui.available_height() - 120.0).max(120.0))
        .show(ui, |ui| {
            if answers.is_empty() {
                ui.label(RichText::new("No checklist items for this department.").weak());
            }
            for (question, current) in &answers {
                ui.label(RichText::new(question).size(15.0));
                ui.horizontal(|ui| {
                    for option in Answer::ALL {
                        if ui.radio(*current == option, option.label()).clicked() {
                            changed.push((question.clone(), option));
                        }
                    }
                });
                ui.add_space(8.0);
            }
        });

    for (question, answer) in changed {
        app.record_answer(&question, answer);
    }

    ui.add_space(10.0);
    ui.separator();

    let mut action = ChecklistAction::None;
    ui.horizontal(|ui| {
        if icon_button(ui, FILE_PDF, "Generate PDF Report").clicked() {
            action = ChecklistAction::Generate;
        }
        if app.report.is_some() && icon_button(ui, FLOPPY_DISK, "Save PDF...").clicked() {
            action = ChecklistAction::Save;
        }
        ui.add_space(20.0);
        if icon_button(ui, ARROW_LEFT, "Go back to Department Selection").clicked() {
            action = ChecklistAction::GoBack;
        }
    });

    status_line(ui, app.status.as_ref());
    action
}
