// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Unit tests for download orchestration and export verification
#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tempfile::TempDir;

    use beastcheck::browser::{BrowserSession, Locator};
    use beastcheck::download::{download_via_action, Downloader, FileFormat};
    use beastcheck::error::CheckError;
    use beastcheck::pages::{BinRoutingInsight, BinRoutingPage};

    use crate::mocks::MockBrowser;

    const CSV_EXPORT: &str = "\u{feff}Bank Name,Approval Lift,Revenue Impact\n\
                              \"First National, Inc\",12.5 %,\"$1,234\"\n\
                              Other Bank,3%,$10\n";

    const JSON_EXPORT: &str = r#"[
        {"Bank Name": "First National, Inc", "Approval Lift": "12.5%", "Revenue Impact": "$1,234"},
        {"Bank Name": "Other Bank", "Approval Lift": "3%", "Revenue Impact": "$10"}
    ]"#;

    fn bin_page(browser: &Arc<MockBrowser>, dir: &TempDir) -> BinRoutingPage {
        let session: Arc<dyn BrowserSession> = browser.clone();
        let downloader = Downloader::new(session.clone(), dir.path(), Duration::from_millis(200));
        BinRoutingPage::new(session, downloader)
    }

    fn script_insight(browser: &MockBrowser, page: &BinRoutingPage) {
        browser.set_text(&page.bank_name(), "  First National, Inc ");
        browser.set_text(&page.approval_lift(), "12.5%");
        browser.set_text(&page.revenue_impact(), "$1,234");
    }

    #[tokio::test]
    async fn test_download_saves_file_and_classifies_it() {
        let dir = TempDir::new().unwrap();
        let browser = MockBrowser::new();
        let button = Locator::test_id("export-csv-button");
        browser.download_on_click(&button, CSV_EXPORT);

        let downloader = Downloader::new(browser.clone(), dir.path(), Duration::from_secs(1));
        let file = downloader.download_by_clicking(&button, "bin.csv").await.unwrap();

        assert_eq!(file.format, FileFormat::Csv);
        assert_eq!(file.size_bytes, CSV_EXPORT.len() as u64);
        assert!(file.path.is_absolute());
        assert_eq!(std::fs::read_to_string(&file.path).unwrap(), CSV_EXPORT);
    }

    #[tokio::test]
    async fn test_stale_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bin.csv"), "stale").unwrap();

        let browser = MockBrowser::new();
        let button = Locator::css("#export");
        browser.download_on_click(&button, CSV_EXPORT);

        let downloader = Downloader::new(browser.clone(), dir.path(), Duration::from_secs(1));
        let file = downloader.download_by_clicking(&button, "bin.csv").await.unwrap();

        assert_eq!(std::fs::read_to_string(file.path).unwrap(), CSV_EXPORT);
    }

    #[tokio::test]
    async fn test_timeout_when_no_download_starts() {
        let dir = TempDir::new().unwrap();
        let stale = dir.path().join("bin.json");
        std::fs::write(&stale, "stale").unwrap();

        let browser = MockBrowser::new();
        let session: &dyn BrowserSession = browser.as_ref();
        let inert = Locator::css("#nothing");
        let result = download_via_action(
            session,
            || session.click(&inert),
            dir.path(),
            "bin.json",
            Duration::from_millis(50),
        )
        .await;

        assert!(matches!(result, Err(CheckError::DownloadTimeout(_))));
        assert!(!stale.exists(), "stale file is removed before the download is attempted");
    }

    #[tokio::test]
    async fn test_missing_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("exports").join("today");
        let browser = MockBrowser::new();
        let button = Locator::css("#export");
        browser.download_on_click(&button, JSON_EXPORT);

        let downloader = Downloader::new(browser.clone(), &nested, Duration::from_secs(1));
        let file = downloader.download_by_clicking(&button, "bin.json").await.unwrap();

        assert_eq!(file.format, FileFormat::Json);
        assert!(nested.join("bin.json").exists());
    }

    #[tokio::test]
    async fn test_csv_and_json_exports_verify_against_the_same_insight() {
        let dir = TempDir::new().unwrap();
        let browser = MockBrowser::new();
        let page = bin_page(&browser, &dir);
        browser.download_on_click(&page.export_csv_button(), CSV_EXPORT);
        browser.download_on_click(&page.export_json_button(), JSON_EXPORT);
        script_insight(&browser, &page);

        page.open().await.unwrap();
        let insight = page.read_insight().await.unwrap();
        assert_eq!(insight.bank_name, "First National, Inc");

        page.open_export_menu().await.unwrap();
        let csv = page.download_csv_file("bin-routing.csv").await.unwrap();
        page.verify_export(&csv.path, &insight).unwrap();

        page.open_export_menu().await.unwrap();
        let json = page.download_json_file("bin-routing.json").await.unwrap();
        page.verify_export(&json.path, &insight).unwrap();

        assert!(browser.was_called(&format!("click {}", page.side_nav_link().to_selector())));
    }

    #[tokio::test]
    async fn test_export_mismatch_names_the_column() {
        let dir = TempDir::new().unwrap();
        let browser = MockBrowser::new();
        let page = bin_page(&browser, &dir);
        browser.download_on_click(&page.export_csv_button(), CSV_EXPORT);

        let csv = page.download_csv_file("bin-routing.csv").await.unwrap();
        let insight = BinRoutingInsight {
            bank_name: "First National, Inc".to_string(),
            approval_lift: "40%".to_string(),
            revenue_impact: String::new(),
        };

        match page.verify_export(&csv.path, &insight) {
            Err(CheckError::FieldMismatch { column, actual, .. }) => {
                assert_eq!(column, "Approval Lift");
                assert_eq!(actual, "12.5 %");
            }
            other => panic!("expected a field mismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unexpected_export_format_is_rejected() {
        let dir = TempDir::new().unwrap();
        let browser = MockBrowser::new();
        let page = bin_page(&browser, &dir);
        browser.download_on_click(&page.export_json_button(), JSON_EXPORT);

        let result = page.download_json_file("bin-routing.txt").await;
        assert!(matches!(result, Err(CheckError::Parse(_))));
    }

    #[tokio::test]
    async fn test_stalled_save_times_out() {
        let dir = TempDir::new().unwrap();
        let browser = MockBrowser::new();
        let button = Locator::css("#export");
        browser.download_on_click(&button, CSV_EXPORT);
        browser.stall_saves();

        let downloader = Downloader::new(browser.clone(), dir.path(), Duration::from_millis(100));
        let result = tokio::time::timeout(
            Duration::from_secs(3),
            downloader.download_by_clicking(&button, "bin.csv"),
        )
        .await
        .expect("save must be bounded by the download timeout");

        assert!(matches!(result, Err(CheckError::DownloadTimeout(_))));
    }
}
