use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Where the job description is persisted.
    pub job_file_path: PathBuf,
    /// Dataset used when a ranking request asks for the bundled example.
    pub example_dataset_path: PathBuf,
    pub default_top_n: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            job_file_path: env_or("JOB_FILE_PATH", "vaga.json").into(),
            example_dataset_path: env_or("EXAMPLE_DATASET_PATH", "data/perfis_example.json")
                .into(),
            default_top_n: env_or("DEFAULT_TOP_N", "5")
                .parse::<usize>()
                .context("DEFAULT_TOP_N must be a non-negative integer")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
