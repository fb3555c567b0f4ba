use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use pdfdesk_engine::{EngineConfig, ServiceSettings};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "pdfdesk.ron";
pub const SERVICE_URL_ENV: &str = "PDFDESK_SERVICE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_url: String,
    pub output_dir: PathBuf,
    pub connect_timeout_secs: u64,
    /// `None` waits for the service indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:5000".to_string(),
            output_dir: PathBuf::from("./downloads"),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Reads `path`. A missing file is not an error and yields `None`.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        let config = ron::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn with_service_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|url| !url.trim().is_empty()) {
            self.service_url = url.trim().to_string();
        }
        self
    }

    pub fn engine_config(&self) -> EngineConfig {
        let service = ServiceSettings {
            base_url: self.service_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..ServiceSettings::default()
        };
        EngineConfig {
            service,
            output_dir: self.output_dir.clone(),
        }
    }
}
