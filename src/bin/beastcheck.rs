// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line access to the report verifier and the mail poller.
//!
//! Usage:
//!   beastcheck classify <file>
//!   beastcheck verify <file> --expect "Bank Name=Acme" --expect "Approval Lift=12%"
//!   beastcheck wait-mail --subject "reset" --after now --timeout 300
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error or verification failure
//!   2 - wait-mail timed out without a matching message

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::{error, info, warn};

use beastcheck::config::Settings;
use beastcheck::download::{classify_format, verify_file, FieldExpectation};
use beastcheck::mail::{MailPoller, MailSearchCriterion, PollOptions};

#[derive(Parser)]
#[command(name = "beastcheck", about = "BeastInsights end-to-end check utilities")]
struct Cli {
    /// Optional TOML settings file
    #[arg(long, env = "BEASTCHECK_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the format of a downloaded report
    Classify { file: PathBuf },

    /// Check the first record of a CSV or JSON report
    Verify {
        file: PathBuf,

        /// Expected value as `Column=value`; repeatable
        #[arg(long = "expect", value_parser = parse_expectation)]
        expectations: Vec<FieldExpectation>,
    },

    /// Wait for a password-reset mail and print its link
    WaitMail {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        /// Only accept mail received after this instant (RFC 3339 or `now`)
        #[arg(long, value_parser = parse_cutoff)]
        after: Option<DateTime<Utc>>,

        /// Seconds to wait before giving up
        #[arg(long)]
        timeout: Option<u64>,

        /// Milliseconds between mailbox searches
        #[arg(long)]
        poll_interval: Option<u64>,
    },
}

fn parse_expectation(raw: &str) -> Result<FieldExpectation, String> {
    let (column, expected) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected Column=value, got '{}'", raw))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{}'", raw));
    }
    Ok(FieldExpectation::new(column, column, expected.trim()))
}

fn parse_cutoff(raw: &str) -> Result<DateTime<Utc>, String> {
    if raw.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", raw, e))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = match Settings::new(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
            error!("Failed to load settings: {}", e);
            return ExitCode::from(1);
        }
    };

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(settings.log.level.as_str()));

    match cli.command {
        Command::Classify { file } => {
            let format = classify_format(&file);
            println!("{}", format);
            if format.is_known() {
                ExitCode::SUCCESS
            } else {
                warn!("{} has an unrecognized extension", file.display());
                ExitCode::from(1)
            }
        }
        Command::Verify { file, expectations } => match verify_file(&file, &expectations) {
            Ok(()) => {
                println!("OK");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Verification of {} failed: {}", file.display(), e);
                ExitCode::from(1)
            }
        },
        Command::WaitMail {
            from,
            subject,
            after,
            timeout,
            poll_interval,
        } => {
            let mut criteria = MailSearchCriterion::from_settings(&settings.mail);
            if from.is_some() {
                criteria.sender = from;
            }
            if subject.is_some() {
                criteria.subject_contains = subject;
            }
            criteria.received_after = after;

            let options = PollOptions {
                timeout: timeout.map(Duration::from_secs).unwrap_or_else(|| settings.mail.timeout()),
                poll_interval: poll_interval
                    .map(Duration::from_millis)
                    .unwrap_or_else(|| settings.mail.poll_interval()),
            };

            info!("Waiting up to {:?} for mail in {}", options.timeout, settings.imap.folder);
            let poller = MailPoller::from_settings(&settings.imap);
            match poller.wait_for_matching_email(&criteria, options).await {
                Ok(Some(link)) => {
                    println!("{}", link.value);
                    ExitCode::SUCCESS
                }
                Ok(None) => {
                    error!("No matching email received within {:?}", options.timeout);
                    ExitCode::from(2)
                }
                Err(e) => {
                    error!("Mail poll failed: {}", e);
                    ExitCode::from(1)
                }
            }
        }
    }
}
