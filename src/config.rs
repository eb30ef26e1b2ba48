// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use config::{Environment, File};
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

/// Dashboard login used by the sign-in helper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Mailbox connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImapSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub tls: bool,
    pub auth_timeout_secs: u64,
    pub folder: String,
}

impl ImapSettings {
    pub fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_timeout_secs)
    }
}

/// Defaults for the password-reset mail poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailPollSettings {
    pub sender: Option<String>,
    pub subject_contains: Option<String>,
    pub timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl MailPollSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSettings {
    pub directory: PathBuf,
    pub timeout_secs: u64,
}

impl DownloadSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub log: LogConfig,
    pub base_url: String,
    pub credentials: Credentials,
    pub imap: ImapSettings,
    pub mail: MailPollSettings,
    pub downloads: DownloadSettings,
}

// Direct environment variables and the settings key each one overrides
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("BASE_URL", "base_url"),
    ("USERNAME", "credentials.username"),
    ("PASSWORD", "credentials.password"),
    ("IMAP_HOST", "imap.host"),
    ("IMAP_PORT", "imap.port"),
    ("IMAP_USER", "imap.user"),
    ("IMAP_PASS", "imap.password"),
    ("GMAIL_APP_PASSWORD", "imap.password"),
    ("IMAP_TLS", "imap.tls"),
    ("DOWNLOADS_DIR", "downloads.directory"),
];

impl Settings {
    pub fn new(config_path: Option<&str>) -> Result<Self, SettingsError> {
        let mut config_builder = config::Config::builder()
            .set_default("log.level", "info")?
            .set_default("base_url", "http://localhost:3000")?
            .set_default("credentials.username", "")?
            .set_default("credentials.password", "")?
            // IMAP defaults
            .set_default("imap.host", "imap.gmail.com")?
            .set_default("imap.port", 993)?
            .set_default("imap.user", "")?
            .set_default("imap.password", "")?
            .set_default("imap.tls", true)?
            .set_default("imap.auth_timeout_secs", 30)?
            .set_default("imap.folder", "INBOX")?
            // Mail poll defaults
            .set_default("mail.timeout_secs", 300)?
            .set_default("mail.poll_interval_ms", 5000)?
            // Download defaults
            .set_default("downloads.directory", "testdata")?
            .set_default("downloads.timeout_secs", 60)?;

        if let Some(path) = config_path {
            config_builder = config_builder.add_source(File::with_name(path));
        }

        // e.g. `BEASTCHECK_IMAP__HOST=...` would override `imap.host`
        config_builder = config_builder.add_source(
            Environment::with_prefix("BEASTCHECK")
                .prefix_separator("_")
                .separator("__")
                .ignore_empty(true),
        );

        for (env_var, key) in ENV_OVERRIDES {
            let Ok(value) = env::var(env_var) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match *env_var {
                "IMAP_PORT" => match value.parse::<u16>() {
                    Ok(port) => config_builder = config_builder.set_override(*key, port)?,
                    Err(_) => warn!("Invalid port value in {}: {}", env_var, value),
                },
                "IMAP_TLS" => match value.parse::<bool>() {
                    Ok(tls) => config_builder = config_builder.set_override(*key, tls)?,
                    Err(_) => warn!("Invalid boolean value in {}: {}", env_var, value),
                },
                _ => config_builder = config_builder.set_override(*key, value)?,
            }
        }

        Ok(config_builder.build()?.try_deserialize()?)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig { level: "info".to_string() }
    }
}

impl Default for ImapSettings {
    fn default() -> Self {
        Self {
            host: "imap.gmail.com".to_string(),
            port: 993,
            user: String::new(),
            password: String::new(),
            tls: true,
            auth_timeout_secs: 30,
            folder: "INBOX".to_string(),
        }
    }
}

impl Default for MailPollSettings {
    fn default() -> Self {
        Self {
            sender: None,
            subject_contains: None,
            timeout_secs: 300,
            poll_interval_ms: 5000,
        }
    }
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("testdata"),
            timeout_secs: 60,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log: LogConfig::default(),
            base_url: "http://localhost:3000".to_string(),
            credentials: Credentials::default(),
            imap: ImapSettings::default(),
            mail: MailPollSettings::default(),
            downloads: DownloadSettings::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load or parse configuration: {0}")]
    LoadError(#[from] config::ConfigError),
}
