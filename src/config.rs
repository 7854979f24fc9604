use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::{
    database::resolve_credentials_path,
    jobs::{FailurePolicy, JobOptions},
    models::UpdateMode,
    utils::{parse_value, AppError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Set,
    SetIfMissing,
    Replace,
    Unset,
}

/// Bulk field updater for a document collection.
///
/// Every flag can also be given through the environment (or a `.env` file).
#[derive(Debug, Parser)]
#[command(name = "fill-nits", version, about)]
pub struct Config {
    /// Credentials file; falls back to GOOGLE_APPLICATION_CREDENTIALS, then serviceAccountKey.json
    #[arg(long, env = "STORE_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    #[arg(long, env = "FILL_COLLECTION", default_value = "users")]
    pub collection: String,

    #[arg(long, env = "FILL_FIELD", default_value = "currency")]
    pub field: String,

    /// Target value, parsed as JSON when possible (1000, [], true, "text")
    #[arg(long, env = "FILL_VALUE", default_value = "1000")]
    pub value: String,

    /// Unit appended to `set` confirmation lines
    #[arg(long, env = "FILL_UNIT", default_value = "nits")]
    pub unit: String,

    #[arg(long, value_enum, env = "FILL_MODE", default_value_t = Mode::Set)]
    pub mode: Mode,

    /// Current value to match in `replace` mode
    #[arg(long, env = "FILL_FROM")]
    pub from: Option<String>,

    /// Comma-separated fields removed in `unset` mode
    #[arg(long, env = "FILL_UNSET_FIELDS", value_delimiter = ',')]
    pub unset_fields: Vec<String>,

    /// Keep going past rejected writes and report them at the end
    #[arg(long, env = "FILL_KEEP_GOING")]
    pub keep_going: bool,

    /// Pause between documents, in milliseconds
    #[arg(long, env = "FILL_PAUSE_MS", default_value_t = 0)]
    pub pause_ms: u64,
}

impl Config {
    pub fn credentials_path(&self) -> PathBuf {
        resolve_credentials_path(
            self.credentials.as_deref(),
            std::env::var("GOOGLE_APPLICATION_CREDENTIALS").ok(),
        )
    }

    pub fn update_mode(&self) -> Result<UpdateMode, AppError> {
        let field = self.field.trim();
        if self.mode != Mode::Unset && field.is_empty() {
            return Err(AppError::Config("--field must not be empty".to_string()));
        }
        let value = parse_value(&self.value);

        let mode = match self.mode {
            Mode::Set => UpdateMode::Set {
                field: field.to_string(),
                value,
            },
            Mode::SetIfMissing => UpdateMode::SetIfMissing {
                field: field.to_string(),
                value,
            },
            Mode::Replace => {
                let from = self.from.as_deref().ok_or_else(|| {
                    AppError::Config("--from is required in replace mode".to_string())
                })?;
                UpdateMode::Replace {
                    field: field.to_string(),
                    from: parse_value(from),
                    to: value,
                }
            }
            Mode::Unset => {
                let fields: Vec<String> = self
                    .unset_fields
                    .iter()
                    .map(|f| f.trim())
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect();
                if fields.is_empty() {
                    return Err(AppError::Config(
                        "--unset-fields is required in unset mode".to_string(),
                    ));
                }
                UpdateMode::Unset { fields }
            }
        };
        Ok(mode)
    }

    pub fn job_options(&self) -> Result<JobOptions, AppError> {
        let collection = self.collection.trim();
        if collection.is_empty() {
            return Err(AppError::Config("--collection must not be empty".to_string()));
        }

        Ok(JobOptions {
            collection: collection.to_string(),
            mode: self.update_mode()?,
            unit: self.unit.clone(),
            policy: if self.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            },
            pause: Duration::from_millis(self.pause_ms),
        })
    }
}
