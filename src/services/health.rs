// ABOUTME: Health page overview (BMI, weight chart, month calendar) and the plain-text export
// ABOUTME: Missing or zero measurements are shown as N/A in the export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

use std::collections::BTreeMap;
use std::fmt::Write as _;

use calisthenics_core::constants::formats::{CHART_LABEL, FORM_DATE};
use calisthenics_core::constants::windows::HEALTH_CHART_DAYS;
use calisthenics_core::errors::AppResult;
use calisthenics_core::formatting::format_decimal;
use calisthenics_core::models::{HealthPlanItem, HealthRecord, UserProfile};
use calisthenics_core::stats::bmi;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::database::Database;

/// Measurements of one day on the month calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayMeasurement {
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub notes: Option<String>,
}

/// Everything the health page shows
#[derive(Debug, Clone)]
pub struct HealthOverview {
    /// The stored profile, or empty defaults when none exists yet
    pub profile: UserProfile,
    /// Newest first
    pub records: Vec<HealthRecord>,
    pub latest: Option<HealthRecord>,
    pub bmi: Option<f64>,
    pub plan_items: Vec<HealthPlanItem>,
    pub chart_labels: Vec<String>,
    pub chart_weights: Vec<Option<f64>>,
    /// Current month only, keyed by day of month
    pub month_days: BTreeMap<u32, DayMeasurement>,
    pub current_day: u32,
}

impl HealthOverview {
    /// `records` newest first, `chart_records` oldest first
    #[must_use]
    pub fn build(
        profile: Option<UserProfile>,
        records: Vec<HealthRecord>,
        chart_records: &[HealthRecord],
        plan_items: Vec<HealthPlanItem>,
        today: NaiveDate,
    ) -> Self {
        let profile = profile.unwrap_or_else(UserProfile::empty);
        let latest = records.first().cloned();
        let bmi = bmi(profile.height, latest.as_ref().and_then(|r| r.weight));

        let chart_labels = chart_records
            .iter()
            .map(|r| r.date.format(CHART_LABEL).to_string())
            .collect();
        let chart_weights = chart_records.iter().map(|r| r.weight).collect();

        // Oldest first so the newest record of a day wins
        let mut month_days = BTreeMap::new();
        for record in records.iter().rev() {
            if record.date.year() == today.year() && record.date.month() == today.month() {
                month_days.insert(
                    record.date.day(),
                    DayMeasurement {
                        weight: record.weight,
                        body_fat: record.body_fat,
                        notes: record.notes.clone(),
                    },
                );
            }
        }

        Self {
            profile,
            records,
            latest,
            bmi,
            plan_items,
            chart_labels,
            chart_weights,
            month_days,
            current_day: today.day(),
        }
    }
}

/// Load the health page data for `today` (UTC)
///
/// # Errors
///
/// Returns an error if a query fails
pub async fn load_overview(db: &Database, today: NaiveDate) -> AppResult<HealthOverview> {
    let profile = db.get_profile().await?;
    let records = db.list_health_records().await?;
    let chart_records = db
        .list_health_records_since(today - Duration::days(HEALTH_CHART_DAYS))
        .await?;
    let plan_items = db.list_health_plan_items().await?;
    Ok(HealthOverview::build(
        profile,
        records,
        &chart_records,
        plan_items,
        today,
    ))
}

fn or_na(value: Option<f64>) -> String {
    value
        .filter(|v| *v != 0.0)
        .map_or_else(|| "N/A".to_owned(), format_decimal)
}

/// Plain-text export of the profile and every record, newest first
#[must_use]
pub fn render_export(profile: Option<&UserProfile>, records: &[HealthRecord]) -> String {
    let mut out = String::from("CALISTHENICS APP - HEALTH DATA EXPORT\n");
    out.push_str(&"=".repeat(40));
    out.push_str("\n\n");

    if let Some(profile) = profile {
        out.push_str("USER PROFILE\n-----------------\n");
        let _ = writeln!(out, "Height: {} cm", or_na(profile.height));
        let age = profile
            .age
            .filter(|a| *a != 0)
            .map_or_else(|| "N/A".to_owned(), |a| a.to_string());
        let _ = writeln!(out, "Age: {age}");
        let gender = profile.gender.as_deref().filter(|g| !g.is_empty()).unwrap_or("N/A");
        let _ = writeln!(out, "Gender: {gender}\n");
    }

    out.push_str("HEALTH RECORDS\n-----------------\n");
    out.push_str("Date, Weight (kg), Body Fat (%), Notes\n");

    if records.is_empty() {
        out.push_str("No records found.\n");
    }
    for record in records {
        let notes = record.notes.as_deref().unwrap_or_default().replace('"', "\"\"");
        let _ = writeln!(
            out,
            "{},{},{},\"{notes}\"",
            record.date.format(FORM_DATE),
            or_na(record.weight),
            or_na(record.body_fat),
        );
    }
    out
}

/// Attachment name for an export produced on `day`
#[must_use]
pub fn export_file_name(day: NaiveDate) -> String {
    format!("health_data_{}.csv", day.format(FORM_DATE))
}
