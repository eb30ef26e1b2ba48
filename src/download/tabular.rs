// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of exported CSV and JSON reports into string records.

use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::download::format::{classify_format, FileFormat};
use crate::error::{CheckError, Result};

/// One row of an exported report, keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularRecord {
    fields: HashMap<String, String>,
}

impl TabularRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TabularRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Reads and parses a downloaded report, choosing the parser from the file extension.
pub fn parse_tabular_file(path: impl AsRef<Path>) -> Result<Vec<TabularRecord>> {
    let path = path.as_ref();
    let format = classify_format(path);
    let content = match format {
        FileFormat::Csv | FileFormat::Json => std::fs::read_to_string(path)?,
        other => {
            return Err(CheckError::Parse(format!(
                "{} files cannot be parsed: {}",
                other,
                path.display()
            )))
        }
    };

    let records = match format {
        FileFormat::Csv => parse_csv(&content)?,
        _ => parse_json(&content)?,
    };
    debug!("Parsed {} record(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Parses comma separated text with a mandatory header row.
pub fn parse_csv(content: &str) -> Result<Vec<TabularRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<&str> = content.split('\n').filter(|line| !line.trim().is_empty()).collect();

    if lines.len() < 2 {
        return Err(CheckError::Parse("CSV file is empty or has no data rows".to_string()));
    }

    let headers = split_csv_line(lines[0]);
    Ok(lines[1..]
        .iter()
        .map(|line| {
            let mut values = split_csv_line(line).into_iter();
            headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect::<TabularRecord>()
        })
        .collect())
}

/// Splits one CSV line. Every `"` toggles quoting and is dropped; commas
/// inside quotes are kept. Fields are trimmed.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());
    values
}

/// Parses a JSON array of flat objects.
pub fn parse_json(content: &str) -> Result<Vec<TabularRecord>> {
    let value: Value = serde_json::from_str(content.trim_start_matches('\u{feff}'))
        .map_err(|e| CheckError::Parse(format!("Invalid JSON: {}", e)))?;

    let rows = match value {
        Value::Array(rows) => rows,
        _ => return Err(CheckError::Parse("JSON export is not an array of records".to_string())),
    };
    if rows.is_empty() {
        return Err(CheckError::Parse("JSON file has no data rows".to_string()));
    }

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, scalar_to_string(v)))
                .collect::<TabularRecord>()),
            _ => Err(CheckError::Parse(format!("JSON record {} is not an object", index))),
        })
        .collect()
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}
