mod app_context;
mod config;
mod dispatch;
mod entry_store;
mod mail;
mod sched;
mod telegram;
mod version;
mod webwatch;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app_context::AppContext;
use crate::config::{load_config, start_config_hot_reload_job};
use crate::dispatch::Dispatcher;
use crate::sched::start_scheduler_job;
use crate::version::{APP_NAME, BUILD};

#[derive(Parser)]
#[command(name = APP_NAME, disable_version_flag = true)]
struct Cli {
    /// Prints the current version
    #[arg(long)]
    ver: bool,
    /// Configuration file path
    #[arg(long, default_value = "config.toml")]
    config: String,
    /// Build and print alerts without dispatching them
    #[arg(long)]
    simulate: bool,
}

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.ver {
        println!("{}, version: {}", APP_NAME, BUILD);
        return ExitCode::SUCCESS;
    }

    init_json_logging();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let simulate = cli.simulate || config.simulation.enabled;
    if simulate {
        log::warn!("simulation_mode_enabled source=cli_flag_or_config");
    }

    log::info!(
        "{} is starting, alerts go to {} and telegram chat {}",
        APP_NAME,
        config.email_to,
        config.telegram.chat_id
    );

    let dispatcher = Dispatcher::new(&config, simulate);
    let app_context = AppContext::new(config, cli.config.clone());

    start_config_hot_reload_job(app_context.clone());
    let mut shutdown = start_scheduler_job(app_context, dispatcher);

    log::info!("enter server blocking loop");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("stop because interrupt");
            ExitCode::SUCCESS
        }
        error = shutdown.recv() => {
            match error {
                Some(error) => log::error!("server is not scheduling anymore: {}", error),
                None => log::error!("scheduler worker ended unexpectedly"),
            }
            ExitCode::FAILURE
        }
    }
}
