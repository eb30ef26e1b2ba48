// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! BIN Routing Insights: the headline insight card and its CSV/JSON exports.

use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::browser::{BrowserSession, Locator};
use crate::download::{verify_file, DownloadedFile, Downloader, FieldExpectation, FileFormat};
use crate::error::{CheckError, Result};
use crate::pages::SLOW_TIMEOUT;

/// Headline values of the first insight card, as rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinRoutingInsight {
    pub bank_name: String,
    pub approval_lift: String,
    pub revenue_impact: String,
}

impl BinRoutingInsight {
    pub fn expectations(&self) -> Vec<FieldExpectation> {
        FieldExpectation::bin_routing(&self.bank_name, &self.approval_lift, &self.revenue_impact)
    }
}

pub struct BinRoutingPage {
    session: Arc<dyn BrowserSession>,
    downloader: Downloader,
}

impl BinRoutingPage {
    pub fn new(session: Arc<dyn BrowserSession>, downloader: Downloader) -> Self {
        Self { session, downloader }
    }

    pub fn downloader(&self) -> &Downloader {
        &self.downloader
    }

    pub fn side_nav_link(&self) -> Locator {
        Locator::css("[data-test-id=\"nav-item-bin routing\"]")
    }

    pub fn header(&self) -> Locator {
        Locator::text("BIN Routing Insights")
    }

    pub fn export_section(&self) -> Locator {
        Locator::text("Export/Share")
    }

    pub fn export_csv_button(&self) -> Locator {
        Locator::test_id("export-csv-button")
    }

    pub fn export_json_button(&self) -> Locator {
        Locator::test_id("export-json-button")
    }

    pub fn bank_name(&self) -> Locator {
        Locator::xpath("((//h3/following-sibling::p)[1]//span)[2]")
    }

    pub fn approval_lift(&self) -> Locator {
        Locator::xpath("//div[text()=\"Approval Lift\"]/following-sibling::div").first()
    }

    pub fn revenue_impact(&self) -> Locator {
        Locator::xpath("//div[text()=\"Revenue Impact\"]/following-sibling::div").first()
    }

    pub async fn open(&self) -> Result<()> {
        let link = self.side_nav_link();
        self.session.wait_for_visible(&link, SLOW_TIMEOUT).await?;
        self.session.click(&link).await?;
        self.session.wait_for_visible(&self.header(), SLOW_TIMEOUT).await?;
        Ok(())
    }

    pub async fn open_export_menu(&self) -> Result<()> {
        let section = self.export_section();
        self.session.wait_for_visible(&section, SLOW_TIMEOUT).await?;
        self.session.click(&section).await?;
        Ok(())
    }

    async fn read_text(&self, locator: &Locator) -> Result<String> {
        self.session.wait_for_visible(locator, SLOW_TIMEOUT).await?;
        let text = self.session.text_content(locator).await?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    /// Reads the bank name, approval lift and revenue impact shown on the card.
    pub async fn read_insight(&self) -> Result<BinRoutingInsight> {
        let insight = BinRoutingInsight {
            bank_name: self.read_text(&self.bank_name()).await?,
            approval_lift: self.read_text(&self.approval_lift()).await?,
            revenue_impact: self.read_text(&self.revenue_impact()).await?,
        };
        info!("BIN routing insight on screen: {:?}", insight);
        Ok(insight)
    }

    async fn download(&self, button: Locator, file_name: &str, format: FileFormat) -> Result<DownloadedFile> {
        let file = self.downloader.download_by_clicking(&button, file_name).await?;
        if file.format != format {
            return Err(CheckError::Parse(format!(
                "Expected a {} export but {} is {}",
                format,
                file.path.display(),
                file.format
            )));
        }
        Ok(file)
    }

    pub async fn download_csv_file(&self, file_name: &str) -> Result<DownloadedFile> {
        self.download(self.export_csv_button(), file_name, FileFormat::Csv).await
    }

    pub async fn download_json_file(&self, file_name: &str) -> Result<DownloadedFile> {
        self.download(self.export_json_button(), file_name, FileFormat::Json).await
    }

    /// Checks an export against the values the card showed.
    pub fn verify_export(&self, path: &Path, insight: &BinRoutingInsight) -> Result<()> {
        verify_file(path, &insight.expectations())
    }
}
