//! Checklist Form - pick a department, answer its checklist, print a PDF report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use checklist_form as app;

use app::checklist::Checklist;
use app::config::AppConfig;
use app::export;
use app::report::ReportOptions;
use app::session::Session;
use app::ui::{ChecklistApp, install_fonts};

/// Department checklist form with printable PDF report.
#[derive(Parser)]
#[command(name = "checklist-form")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Config file path
    #[arg(long, conflicts_with = "dev")]
    config: Option<PathBuf>,

    /// Checklist CSV path, overriding the config
    #[arg(long)]
    checklist: Option<PathBuf>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print departments and question counts, then exit
    #[arg(long)]
    list: bool,

    /// Render the report for a department with default answers, then exit
    #[arg(long, value_name = "DEPARTMENT", requires = "output")]
    render: Option<String>,

    /// Output path for --render
    #[arg(long, requires = "render")]
    output: Option<PathBuf>,
}

/// Initialize logging; the returned guard flushes the log file on drop.
fn init_logging(log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "checklist-form.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

fn load_config(cli: &Cli) -> AppConfig {
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        cli.config.clone().unwrap_or_else(AppConfig::default_path)
    };
    tracing::info!("Config path: {:?}", config_path);

    let mut config = AppConfig::load_or_create(&config_path);

    if let Some(path) = &cli.checklist {
        config.checklist.path = path.clone();
    }
    config
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.log_dir.as_ref());

    tracing::info!("Checklist Form starting...");

    let config = load_config(&cli);
    let checklist = Checklist::load(&config.checklist)
        .with_context(|| format!("cannot start without checklist {:?}", config.checklist.path))?;
    if checklist.is_empty() {
        tracing::warn!("Checklist {:?} has no items", config.checklist.path);
    }
    let session = Session::new(Arc::new(checklist), config.form.clone());

    if cli.list {
        for dept in session.list_departments() {
            println!("{dept}\t{}", session.questions_for(&dept).len());
        }
        return Ok(());
    }

    if let (Some(department), Some(output)) = (&cli.render, &cli.output) {
        return render_headless(session, &config, department, output);
    }

    run_app(session, config).map_err(|e| anyhow::anyhow!("UI error: {e}"))
}

/// Render one department's report with default answers.
fn render_headless(mut session: Session, config: &AppConfig, department: &str, output: &Path) -> anyhow::Result<()> {
    if !session.list_departments().iter().any(|d| d == department) {
        tracing::warn!("Department '{}' has no checklist items", department);
    }
    session.start(department);
    let report = session.render_report(&ReportOptions::from_config(&config.report))?;
    export::save_report(&report, output)?;
    println!("{}", output.display());
    Ok(())
}

/// Run the checklist window.
fn run_app(session: Session, config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Department Checklist Form")
            .with_inner_size([800.0, 650.0])
            .with_min_inner_size([600.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Checklist Form",
        options,
        Box::new(|cc| {
            install_fonts(&cc.egui_ctx);
            Ok(Box::new(ChecklistApp::new(session, config.report)))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_requires_render() {
        let err = Cli::try_parse_from(["checklist-form", "--output", "out.pdf"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_render_with_output_parses() {
        let cli = Cli::try_parse_from(["checklist-form", "--render", "IT", "--output", "it.pdf"]).unwrap();
        assert_eq!(cli.render.as_deref(), Some("IT"));
        assert_eq!(cli.output, Some(PathBuf::from("it.pdf")));
    }
}
