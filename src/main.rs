mod config;
mod database;
mod jobs;
mod models;
mod utils;

use clap::Parser;
use dotenv::dotenv;
use std::process::ExitCode;

use config::Config;
use database::{Credentials, MongoDB};
use models::JobReport;
use utils::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    // Inicializa o logger (stderr; o stdout fica só com as confirmações)
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::parse();

    match run(&config).await {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(report) => {
            log::error!("❌ {} document(s) could not be updated:", report.failed.len());
            for failure in &report.failed {
                log::error!("   {}: {}", failure.id, failure.message);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<JobReport, AppError> {
    let options = config.job_options()?;

    let credentials_path = config.credentials_path();
    log::info!("🔑 Using credentials from {}", credentials_path.display());
    let credentials = Credentials::load(&credentials_path)?;

    let db = MongoDB::connect(&credentials).await?;

    let mut out = std::io::stdout();
    jobs::run(&db, &options, &mut out).await
}
