// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::fs;
use tokio::time::timeout;

use crate::browser::{BrowserError, BrowserSession, Locator};
use crate::config::DownloadSettings;
use crate::download::format::{classify_format, FileFormat};
use crate::error::{CheckError, Result};

/// A report saved by [`download_via_action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub format: FileFormat,
    pub size_bytes: u64,
}

/// Runs `trigger` and saves the download it starts to `directory/file_name`.
///
/// A stale file at the target is removed first, and the download watcher is
/// registered before the trigger runs so a fast download is not missed.
pub async fn download_via_action<F, Fut>(
    session: &dyn BrowserSession,
    trigger: F,
    directory: &Path,
    file_name: &str,
    wait: Duration,
) -> Result<DownloadedFile>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<(), BrowserError>>,
{
    let target = directory.join(file_name);

    match fs::metadata(&target).await {
        Ok(meta) if meta.is_file() => {
            debug!("Removing stale download at {}", target.display());
            fs::remove_file(&target).await?;
        }
        _ => {}
    }
    fs::create_dir_all(directory).await?;

    let receiver = session.expect_download().await?;
    trigger().await?;

    let download = match timeout(wait, receiver).await {
        Ok(Ok(download)) => download,
        Ok(Err(_)) => return Err(BrowserError::Download("download watcher dropped".to_string()).into()),
        Err(_) => return Err(CheckError::DownloadTimeout(wait)),
    };
    debug!("Download started: {}", download.suggested_filename());

    match timeout(wait, download.save_as(&target)).await {
        Ok(saved) => saved?,
        Err(_) => return Err(CheckError::DownloadTimeout(wait)),
    }
    let size_bytes = fs::metadata(&target).await?.len();
    let path = fs::canonicalize(&target).await.unwrap_or(target);

    info!("File downloaded successfully to: {}", path.display());
    Ok(DownloadedFile {
        format: classify_format(&path),
        path,
        size_bytes,
    })
}

/// Saves exports triggered by clicking page elements into one directory.
pub struct Downloader {
    session: Arc<dyn BrowserSession>,
    directory: PathBuf,
    wait: Duration,
}

impl Downloader {
    pub fn new(session: Arc<dyn BrowserSession>, directory: impl Into<PathBuf>, wait: Duration) -> Self {
        Self {
            session,
            directory: directory.into(),
            wait,
        }
    }

    pub fn from_settings(session: Arc<dyn BrowserSession>, settings: &DownloadSettings) -> Self {
        Self::new(session, settings.directory.clone(), settings.timeout())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub async fn download_by_clicking(&self, locator: &Locator, file_name: &str) -> Result<DownloadedFile> {
        let session = self.session.as_ref();
        download_via_action(session, || session.click(locator), &self.directory, file_name, self.wait).await
    }
}
