//! GUI panels and application state.

pub mod app;
pub mod checklist_panel;
pub mod components;
pub mod department_panel;

pub use app::{ChecklistApp, StatusMessage, install_fonts};
