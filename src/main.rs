// LogLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing (including deep-link launch parameters)
// 2. Logging initialisation (debug mode support)
// 3. Config loading and retention policy assembly
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use loglens::app;

pub use loglens::backend;
pub use loglens::core;
pub use loglens::platform;
pub use loglens::ui;
pub use loglens::util;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// LogLens - Desktop logs explorer.
///
/// Compose queries over a log source, inspect field-decomposed rows,
/// and page back through time within the plan's retention allowance.
#[derive(Parser, Debug)]
#[command(name = "LogLens", version, about)]
struct Cli {
    /// Deep-link launch parameters, e.g.
    /// "type=api&q=error&its=2026-08-05T10:00:00Z&ite=2026-08-06T10:00:00Z".
    params: Option<String>,

    /// Backend data directory holding per-source NDJSON files.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Plan tier override: free, pro, team, or enterprise.
    #[arg(long = "plan")]
    plan: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialise logging subsystem
    util::logging::init(cli.debug, None);

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "LogLens starting"
    );

    // Resolve platform paths and load config.toml
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    // Plan tier: CLI override > config > default (free)
    let tier = match cli.plan.as_deref() {
        Some(name) => match core::model::PlanTier::from_name(name) {
            Some(tier) => tier,
            None => {
                tracing::warn!(plan = name, "Unknown --plan value; using configured plan");
                config.plan
            }
        },
        None => config.plan,
    };
    let [free, pro, team, enterprise] = config.retention_days;
    let policy = core::retention::RetentionPolicy::with_allowances(tier, free, pro, team, enterprise);

    // Launch parameters are explicit input to state construction.
    let (params, _param_errors) = core::params::NavParams::parse(cli.params.as_deref().unwrap_or(""));

    let saved = app::saved::SavedQueryStore::load(&platform_paths.data_dir);

    let mut state = app::state::ExplorerState::from_params(
        &params,
        policy,
        config.row_limit,
        saved,
        chrono::Utc::now(),
    );
    state.push_warnings(config_warnings);

    // Backend data directory: CLI override > config > platform default
    let data_dir = cli
        .data_dir
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| platform_paths.backend_data_dir());

    tracing::info!(plan = %tier, data = %data_dir.display(), "Ready to launch GUI");

    let backend: Arc<dyn backend::QueryBackend> =
        match backend::local::LocalBackend::new(data_dir) {
            Ok(b) => Arc::new(b),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialise backend");
                eprintln!("Error: Failed to initialise the query backend: {e}");
                std::process::exit(1);
            }
        };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(if dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            cc.egui_ctx.style_mut(|style| {
                if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
                    body.size = font_size;
                }
            });
            Ok(Box::new(gui::ExplorerApp::new(state, backend)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch LogLens GUI: {e}");
        std::process::exit(1);
    }
}
