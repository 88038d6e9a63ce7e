//! Configuration module
//!
//! Server and extraction settings, loaded once at startup from the environment
//! (and a `.env` file when present).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const SERVER_PORT: u16 = 8000;
const MAX_UPLOAD_SIZE_BYTES: usize = 10 * 1024 * 1024;
const EXTRACTION_TIMEOUT_SECS: u64 = 30;
const SHORT_TEXT_WARNING_CHARS: usize = 50;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Settings consumed by the extraction pipeline.
#[derive(Clone, Debug)]
pub struct ExtractionConfig {
    pub max_upload_size_bytes: usize,
    pub timeout: Duration,
    /// Results shorter than this are logged as suspicious but still returned
    pub short_text_warning_chars: usize,
    /// Directory for staged files; `None` means the system temp dir
    pub temp_dir: Option<PathBuf>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_upload_size_bytes: MAX_UPLOAD_SIZE_BYTES,
            timeout: Duration::from_secs(EXTRACTION_TIMEOUT_SECS),
            short_text_warning_chars: SHORT_TEXT_WARNING_CHARS,
            temp_dir: None,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub http_concurrency_limit: usize,
    pub extraction: ExtractionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            extraction: ExtractionConfig::default(),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let temp_dir = env::var("TEMP_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let config = Config {
            server_port: env_or("PORT", SERVER_PORT),
            environment,
            cors_origins,
            http_concurrency_limit: env_or("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT),
            extraction: ExtractionConfig {
                max_upload_size_bytes: env_or("MAX_UPLOAD_SIZE_BYTES", MAX_UPLOAD_SIZE_BYTES),
                timeout: Duration::from_secs(env_or(
                    "EXTRACTION_TIMEOUT_SECS",
                    EXTRACTION_TIMEOUT_SECS,
                )),
                short_text_warning_chars: env_or(
                    "SHORT_TEXT_WARNING_CHARS",
                    SHORT_TEXT_WARNING_CHARS,
                ),
                temp_dir,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.extraction.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_BYTES cannot be 0"));
        }
        if self.extraction.timeout.is_zero() {
            return Err(anyhow::anyhow!("EXTRACTION_TIMEOUT_SECS cannot be 0"));
        }
        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }
        if let Some(dir) = &self.extraction.temp_dir {
            if !dir.is_dir() {
                return Err(anyhow::anyhow!(
                    "TEMP_DIR {} does not exist or is not a directory",
                    dir.display()
                ));
            }
        }
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS configured to allow all origins (*) in production"
            ));
        }
        Ok(())
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.extraction.max_upload_size_bytes
    }
}
