//! Department selection panel.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::PLAY;

use super::app::ChecklistApp;
use super::components::{icon_button, panel_header};

/// Show the department selection panel.
///
/// Returns `true` if the user asked to start the checklist.
pub fn show(app: &mut ChecklistApp, ui: &mut Ui) -> bool {
    panel_header(ui, "Please select your Department to begin:");

    let departments = app.session.list_departments();
    if departments.is_empty() {
        ui.label(RichText::new("The checklist table has no departments.").weak());
        return false;
    }
    if app.selected_department.is_none() {
        app.selected_department = departments.first().cloned();
    }

    ui.horizontal(|ui| {
        ui.label("Department:");
        egui::ComboBox::from_id_salt("department_select")
            .width(220.0)
            .selected_text(app.selected_department.as_deref().unwrap_or(""))
            .show_ui(ui, |ui| {
                for dept in &departments {
                    if ui
                        .selectable_label(app.selected_department.as_deref() == Some(dept.as_str()), dept.as_str())
                        .clicked()
                    {
                        app.selected_department = Some(dept.clone());
                    }
                }
            });
    });

    ui.add_space(20.0);
    icon_button(ui, PLAY, "Start Checklist").clicked()
}
