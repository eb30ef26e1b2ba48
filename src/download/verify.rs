// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Comparison of UI-rendered values against an exported report.
//!
//! Values are compared with whitespace removed and accepted when either side
//! contains the other, which tolerates currency symbols and unit spacing that
//! differ between the dashboard and the export.

use std::path::Path;

use log::{info, warn};

use crate::download::tabular::{parse_tabular_file, TabularRecord};
use crate::error::{CheckError, Result};

/// A value the UI showed and the export column expected to contain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExpectation {
    pub key: String,
    pub column: String,
    pub expected: String,
}

impl FieldExpectation {
    pub fn new(key: impl Into<String>, column: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            column: column.into(),
            expected: expected.into(),
        }
    }

    /// The three headline values of a BIN routing insight.
    pub fn bin_routing(bank_name: &str, approval_lift: &str, revenue_impact: &str) -> Vec<Self> {
        vec![
            Self::new("bankName", "Bank Name", bank_name),
            Self::new("approvalLift", "Approval Lift", approval_lift),
            Self::new("revenueImpact", "Revenue Impact", revenue_impact),
        ]
    }
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whitespace-insensitive, bidirectional substring match.
pub fn values_match(expected: &str, actual: &str) -> bool {
    let expected = strip_whitespace(expected);
    let actual = strip_whitespace(actual);
    actual.contains(&expected) || expected.contains(&actual)
}

/// Checks the first record against every expectation, failing on the first mismatch.
///
/// Expectations with an empty expected value are skipped.
pub fn verify_fields(records: &[TabularRecord], expectations: &[FieldExpectation]) -> Result<()> {
    let first = records
        .first()
        .ok_or_else(|| CheckError::Parse("No records to verify".to_string()))?;

    for expectation in expectations {
        if expectation.expected.is_empty() {
            continue;
        }

        let actual = match first.get(&expectation.column) {
            Some(actual) => actual,
            None => {
                warn!(
                    "Column '{}' ({}) is missing from the export; comparing against an empty value",
                    expectation.column, expectation.key
                );
                ""
            }
        };

        if !values_match(&expectation.expected, actual) {
            return Err(CheckError::FieldMismatch {
                column: expectation.column.clone(),
                expected: expectation.expected.clone(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(())
}

/// Parses a downloaded CSV or JSON report and verifies it.
pub fn verify_file(path: impl AsRef<Path>, expectations: &[FieldExpectation]) -> Result<()> {
    let path = path.as_ref();
    let records = parse_tabular_file(path)?;
    verify_fields(&records, expectations)?;
    info!("All {} fields verified in {}", expectations.len(), path.display());
    Ok(())
}
