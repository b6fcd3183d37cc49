use std::process::ExitCode;

use circle_of_dots::cli::{self, Cli};
use clap::Parser;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();
    let settings = match cli::load_settings(args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Some(command) => cli::run(command, &settings),
        None => run_editor(settings),
    }
}

/// Opens the editor. Save dialogs are spawned onto a tokio runtime, so one must
/// be entered before the event loop starts.
#[cfg(not(target_arch = "wasm32"))]
fn run_editor(settings: circle_of_dots::Settings) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = runtime.enter();

    match circle_of_dots::run_app(settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("editor failed: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn run_editor(_settings: circle_of_dots::Settings) -> ExitCode {
    log::error!("the native editor is not available on this target");
    ExitCode::FAILURE
}
