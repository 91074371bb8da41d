use clap::Parser;
use job_kpi::app_log;
use job_kpi::cli::{handle_command, Cli};
use job_kpi::logging::init_tracing;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging first
    if let Err(e) = init_tracing(cli.log_file.as_deref()) {
        eprintln!("⚠️  Logging disabled: {:#}", e);
    }

    match handle_command(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            app_log!(debug, "Command failed: {:?}", e);
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}
