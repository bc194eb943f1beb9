// src/moderation/export.rs
use anyhow::{Context, Result};
use std::io::Write;

use crate::types::job::Job;

const HEADER: [&str; 11] = [
    "id",
    "title",
    "company",
    "location",
    "category",
    "status",
    "derived_status",
    "created_by_type",
    "created_at",
    "view_count",
    "application_count",
];

/// Write jobs as CSV, one row per job, with the derived status alongside
/// the raw one
pub fn write_jobs_csv<W: Write>(writer: W, jobs: &[Job]) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADER)
        .context("Failed to write CSV header")?;

    for job in jobs {
        csv_writer
            .write_record([
                job.id.to_string(),
                job.title.clone(),
                job.company.clone(),
                job.location.clone().unwrap_or_default(),
                job.category.clone().unwrap_or_default(),
                job.status.clone(),
                job.badge(),
                job.created_by_type.to_string(),
                job.created_at.clone(),
                job.view_count.map(|v| v.to_string()).unwrap_or_default(),
                job.application_count
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            ])
            .with_context(|| format!("Failed to write CSV row for job {}", job.id))?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(jobs.len())
}
