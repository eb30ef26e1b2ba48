// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;
use std::path::Path;

/// Export formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Csv,
    Json,
    Xlsx,
    Unknown,
}

impl FileFormat {
    pub fn is_known(self) -> bool {
        self != FileFormat::Unknown
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormat::Csv => "CSV",
            FileFormat::Json => "JSON",
            FileFormat::Xlsx => "XLSX",
            FileFormat::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Classifies a file by its lowercased extension. Unrecognised or missing
/// extensions yield [`FileFormat::Unknown`].
pub fn classify_format(path: impl AsRef<Path>) -> FileFormat {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => FileFormat::Csv,
        Some("json") => FileFormat::Json,
        Some("xlsx") => FileFormat::Xlsx,
        _ => FileFormat::Unknown,
    }
}
