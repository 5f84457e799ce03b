//! Submission Export
//!
//! Two hand-off paths for locally collected plants: a prefilled GitHub issue
//! and a downloadable JSON file. Timestamps come from the caller.

use chrono::{DateTime, SecondsFormat, Utc};
use percent_encoding::utf8_percent_encode;
use serde::Serialize;

use crate::config::SubmissionTarget;
use crate::domain::{PlantRecord, URI_COMPONENT};
use crate::error::{PlantResult, ValidationError};

const REVIEW_CHECKLIST: [&str; 4] = [
    "Data format is valid",
    "Locations are accurate",
    "Plant names are consistent",
    "No duplicate records",
];

/// Downloadable submission document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFile<'a> {
    pub submission_time: String,
    pub data_count: usize,
    pub plants: &'a [PlantRecord],
}

/// Fails when there is nothing to hand off
pub fn ensure_submittable(plants: &[PlantRecord]) -> PlantResult<()> {
    if plants.is_empty() {
        return Err(ValidationError::NothingToSubmit.into());
    }
    Ok(())
}

pub fn issue_title(count: usize) -> String {
    format!("[Data submission] {} new plant records", count)
}

/// Markdown issue body: metadata, the records as JSON, a review checklist
pub fn issue_body(plants: &[PlantRecord], submitted_at: DateTime<Utc>) -> PlantResult<String> {
    let json = serde_json::to_string_pretty(plants)?;
    let mut body = String::from("## Plant data submission\n\n");
    body.push_str(&format!(
        "**Submitted at**: {}\n\n",
        submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    body.push_str(&format!("**Record count**: {}\n\n", plants.len()));
    body.push_str("---\n\n### Records\n\n");
    body.push_str(&format!("```json\n{}\n```\n\n", json));
    body.push_str("---\n\n### Review checklist\n\n");
    for item in REVIEW_CHECKLIST {
        body.push_str(&format!("- [ ] {}\n", item));
    }
    body.push_str("\nThanks for contributing!");
    Ok(body)
}

/// New-issue URL with title, body and label prefilled
pub fn issue_url(
    target: &SubmissionTarget,
    plants: &[PlantRecord],
    submitted_at: DateTime<Utc>,
) -> PlantResult<String> {
    ensure_submittable(plants)?;
    let body = issue_body(plants, submitted_at)?;
    Ok(format!(
        "https://github.com/{}/{}/issues/new?title={}&body={}&labels={}",
        target.owner,
        target.repo,
        utf8_percent_encode(&issue_title(plants.len()), URI_COMPONENT),
        utf8_percent_encode(&body, URI_COMPONENT),
        utf8_percent_encode(&target.label, URI_COMPONENT),
    ))
}

/// Pretty-printed submission document
pub fn submission_json(plants: &[PlantRecord], submitted_at: DateTime<Utc>) -> PlantResult<String> {
    ensure_submittable(plants)?;
    let file = SubmissionFile {
        submission_time: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        data_count: plants.len(),
        plants,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

pub fn submission_file_name(submitted_at: DateTime<Utc>) -> String {
    format!("plant_submission_{}.json", submitted_at.timestamp_millis())
}
