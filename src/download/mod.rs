// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub mod format;
pub mod orchestrator;
pub mod tabular;
pub mod verify;

pub use format::{classify_format, FileFormat};
pub use orchestrator::{download_via_action, DownloadedFile, Downloader};
pub use tabular::{parse_tabular_file, TabularRecord};
pub use verify::{verify_fields, verify_file, FieldExpectation};
