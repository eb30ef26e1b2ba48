// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests {
    use beastcheck::config::Settings;
    use serial_test::serial;
    use std::env;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    const MANAGED_VARS: &[&str] = &[
        "BASE_URL",
        "USERNAME",
        "PASSWORD",
        "IMAP_HOST",
        "IMAP_PORT",
        "IMAP_USER",
        "IMAP_PASS",
        "GMAIL_APP_PASSWORD",
        "IMAP_TLS",
        "DOWNLOADS_DIR",
        "BEASTCHECK_MAIL__SUBJECT_CONTAINS",
        "BEASTCHECK_LOG__LEVEL",
    ];

    /// Clear every variable the loader reads so tests start from defaults
    fn clear_env() {
        for var in MANAGED_VARS {
            env::remove_var(var);
        }
    }

    // Helper to create a dummy config file
    fn create_dummy_config(dir: &TempDir, content: &str) -> String {
        let path = dir.path().join("beastcheck.toml");
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        clear_env();
        let settings = Settings::new(None).expect("Failed to load default settings");

        assert_eq!(settings.log.level, "info");
        assert_eq!(settings.base_url, "http://localhost:3000");
        assert_eq!(settings.imap.host, "imap.gmail.com");
        assert_eq!(settings.imap.port, 993);
        assert!(settings.imap.tls);
        assert_eq!(settings.imap.folder, "INBOX");
        assert_eq!(settings.mail.timeout(), Duration::from_secs(300));
        assert_eq!(settings.mail.poll_interval(), Duration::from_secs(5));
        assert_eq!(settings.downloads.directory, PathBuf::from("testdata"));
    }

    #[test]
    #[serial]
    fn test_direct_env_overrides() {
        clear_env();
        env::set_var("BASE_URL", "https://staging.beastinsights.co");
        env::set_var("IMAP_HOST", "mail.example.com");
        env::set_var("IMAP_PORT", "143");
        env::set_var("IMAP_TLS", "false");
        env::set_var("GMAIL_APP_PASSWORD", "app-password");

        let settings = Settings::new(None).unwrap();
        clear_env();

        assert_eq!(settings.base_url, "https://staging.beastinsights.co");
        assert_eq!(settings.imap.host, "mail.example.com");
        assert_eq!(settings.imap.port, 143);
        assert!(!settings.imap.tls);
        assert_eq!(settings.imap.password, "app-password");
    }

    #[test]
    #[serial]
    fn test_invalid_port_keeps_default() {
        clear_env();
        env::set_var("IMAP_PORT", "not-a-port");

        let settings = Settings::new(None).unwrap();
        clear_env();

        assert_eq!(settings.imap.port, 993);
    }

    #[test]
    #[serial]
    fn test_file_then_prefixed_env() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = create_dummy_config(
            &dir,
            r#"
base_url = "https://qa.beastinsights.co"
[log]
level = "debug"
[mail]
sender = "notifications@beastinsights.co"
subject_contains = "Password"
timeout_secs = 60
poll_interval_ms = 1000
[downloads]
directory = "exports"
timeout_secs = 15
            "#,
        );
        env::set_var("BEASTCHECK_MAIL__SUBJECT_CONTAINS", "Reset");

        let settings = Settings::new(Some(&path)).unwrap();
        clear_env();

        assert_eq!(settings.base_url, "https://qa.beastinsights.co");
        assert_eq!(settings.log.level, "debug");
        assert_eq!(settings.mail.sender.as_deref(), Some("notifications@beastinsights.co"));
        assert_eq!(settings.mail.subject_contains.as_deref(), Some("Reset"));
        assert_eq!(settings.mail.poll_interval(), Duration::from_secs(1));
        assert_eq!(settings.downloads.directory, PathBuf::from("exports"));
        assert_eq!(settings.downloads.timeout(), Duration::from_secs(15));
    }

    #[test]
    #[serial]
    fn test_direct_env_beats_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = create_dummy_config(&dir, "[imap]\nhost = \"file.example.com\"\nuser = \"file-user\"\n");
        env::set_var("IMAP_HOST", "env.example.com");

        let settings = Settings::new(Some(&path)).unwrap();
        clear_env();

        assert_eq!(settings.imap.host, "env.example.com");
        assert_eq!(settings.imap.user, "file-user");
    }
}
