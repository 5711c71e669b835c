//! Shared UI components.

use eframe::egui::{Color32, Response, RichText, Ui};

use super::app::StatusMessage;

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
}

/// Render a button with a leading phosphor icon.
pub fn icon_button(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.button(RichText::new(format!("{icon}  {text}")).size(14.0))
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Render the last status message, if any.
pub fn status_line(ui: &mut Ui, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };
    let (text, color) = match status {
        StatusMessage::Info(msg) => (msg.as_str(), colors::SUCCESS),
        StatusMessage::Warning(msg) => (msg.as_str(), colors::WARNING),
        StatusMessage::Error(msg) => (msg.as_str(), colors::ERROR),
    };
    ui.add_space(10.0);
    ui.label(RichText::new(text).color(color));
}
