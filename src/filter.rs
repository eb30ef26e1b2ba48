// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reads the filters applied to an embedded report from the page runtime.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::{sleep, Instant};

use crate::browser::BrowserSession;
use crate::error::{CheckError, Result};
use crate::utils::calendar::{shift_months, MonthInfo};

pub const DEFAULT_WIDGET: &str = "Sales";
pub const DEFAULT_WAIT: Duration = Duration::from_secs(30);
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// A single predicate of an advanced filter, e.g. `GreaterThanOrEqual`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterCondition {
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

/// One entry of the report's filter list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportFilter {
    #[serde(rename = "$schema", default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
}

fn schema_names_advanced(schema: &str) -> bool {
    schema.to_lowercase().contains("advanced")
}

fn is_advanced_schema(raw: &Value) -> bool {
    raw.get("$schema")
        .and_then(Value::as_str)
        .is_some_and(schema_names_advanced)
}

impl ReportFilter {
    pub fn is_advanced(&self) -> bool {
        self.schema.as_deref().is_some_and(schema_names_advanced)
    }

    fn condition_value(&self, operator_part: &str) -> Option<&Value> {
        self.conditions
            .iter()
            .find(|c| c.operator.contains(operator_part))
            .map(|c| &c.value)
    }

    /// Lower bound from the `Greater*` condition, upper from the `Less*` one.
    pub fn date_range(&self) -> Result<AppliedDateRange> {
        Ok(AppliedDateRange {
            start: self.condition_value("Greater").map(to_calendar_date).transpose()?,
            end: self.condition_value("Less").map(to_calendar_date).transpose()?,
        })
    }
}

/// Date range of the applied advanced filter; both `None` when no such filter is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedDateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl AppliedDateRange {
    /// First through last day of `month`, as a month preset applies it.
    pub fn for_month(month: &MonthInfo) -> Self {
        let start = month.first_day();
        let end = start
            .and_then(|first| shift_months(first, 1).first_day())
            .and_then(|next| next.pred_opt());
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// `YYYY-MM-DD` rendering of both bounds, matching date input values.
    pub fn to_ymd(&self) -> (Option<String>, Option<String>) {
        let fmt = |date: NaiveDate| date.format("%Y-%m-%d").to_string();
        (self.start.map(fmt), self.end.map(fmt))
    }
}

/// Converts a raw filter value to a calendar date without applying a local time zone.
pub fn to_calendar_date(value: &Value) -> Result<NaiveDate> {
    match value {
        Value::String(raw) => {
            let raw = raw.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
                return Ok(dt.with_timezone(&Utc).date_naive());
            }
            for format in NAIVE_DATETIME_FORMATS {
                if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                    return Ok(dt.date());
                }
            }
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| CheckError::InvalidFilterValue(format!("unrecognised date '{}'", raw)))
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(|dt| dt.date_naive())
            .ok_or_else(|| CheckError::InvalidFilterValue(format!("timestamp out of range: {}", n))),
        other => Err(CheckError::InvalidFilterValue(format!("not a date: {}", other))),
    }
}

pub struct FilterIntrospector {
    session: Arc<dyn BrowserSession>,
    widget: String,
    wait: Duration,
}

impl FilterIntrospector {
    pub fn new(session: Arc<dyn BrowserSession>) -> Self {
        Self {
            session,
            widget: DEFAULT_WIDGET.to_string(),
            wait: DEFAULT_WAIT,
        }
    }

    /// Name of the `window` property holding the embedded report.
    pub fn with_widget(mut self, widget: &str) -> Self {
        self.widget = widget.to_string();
        self
    }

    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    fn ready_expression(&self) -> String {
        format!(
            "!!window['{w}'] && typeof window['{w}'].getFilters === 'function'",
            w = self.widget
        )
    }

    fn filters_expression(&self) -> String {
        format!("window['{}'].getFilters()", self.widget)
    }

    async fn wait_until_ready(&self) -> Result<()> {
        let expression = self.ready_expression();
        let start = Instant::now();
        loop {
            match self.session.evaluate(&expression).await {
                Ok(Value::Bool(true)) => return Ok(()),
                Ok(_) => {}
                // Evaluation can fail while the embed is still loading
                Err(e) => debug!("Filter API probe failed: {}", e),
            }
            let remaining = self.wait.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Err(CheckError::FilterIntrospectionTimeout(self.wait));
            }
            sleep(READY_POLL_INTERVAL.min(remaining)).await;
        }
    }

    /// Every filter currently applied to the report, as the page returns them.
    pub async fn filters(&self) -> Result<Vec<Value>> {
        self.wait_until_ready().await?;
        match self.session.evaluate(&self.filters_expression()).await? {
            Value::Null => Ok(Vec::new()),
            Value::Array(filters) => Ok(filters),
            other => Err(CheckError::InvalidFilterValue(format!("filter list is not an array: {}", other))),
        }
    }

    /// The first filter whose schema names an advanced filter.
    ///
    /// Other filters are never deserialized, so their shape does not matter.
    pub async fn advanced_filter(&self) -> Result<Option<ReportFilter>> {
        let Some(raw) = self.filters().await?.into_iter().find(is_advanced_schema) else {
            return Ok(None);
        };
        serde_json::from_value(raw)
            .map(Some)
            .map_err(|e| CheckError::InvalidFilterValue(format!("unexpected advanced filter: {}", e)))
    }

    pub async fn applied_date_range(&self) -> Result<AppliedDateRange> {
        match self.advanced_filter().await? {
            Some(filter) => {
                let range = filter.date_range()?;
                debug!("Applied advanced date range: {:?}", range);
                Ok(range)
            }
            None => Ok(AppliedDateRange::default()),
        }
    }
}
