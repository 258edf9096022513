//! Database repository for defect report operations.
//!
//! Reports are only ever inserted, listed and deleted; there is no update path.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{DefectReport, NewReport};

/// Database repository for all report operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a validated report, assigning its id and creation time.
    pub async fn insert_report(&self, report: NewReport) -> Result<DefectReport, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        // Stored at microsecond precision, so keep the returned value identical.
        let created_at = Utc::now().trunc_subsecs(6);

        sqlx::query(
            "INSERT INTO reports (id, title, description, laboratory, latitude, longitude, photo, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&report.title)
        .bind(&report.description)
        .bind(&report.laboratory)
        .bind(report.latitude)
        .bind(report.longitude)
        .bind(&report.photo)
        .bind(format_timestamp(&created_at))
        .execute(&self.pool)
        .await?;

        Ok(DefectReport {
            id,
            title: report.title,
            description: report.description,
            laboratory: report.laboratory,
            latitude: report.latitude,
            longitude: report.longitude,
            photo: report.photo,
            created_at,
        })
    }

    /// List all reports, newest first.
    pub async fn list_reports(&self) -> Result<Vec<DefectReport>, AppError> {
        // rowid breaks ties between reports created within the same microsecond
        let rows = sqlx::query(
            "SELECT id, title, description, laboratory, latitude, longitude, photo, created_at FROM reports ORDER BY created_at DESC, rowid DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        let reports = rows
            .iter()
            .map(report_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(reports)
    }

    /// Delete a report. Unknown ids are not an error; returns whether a row was removed.
    pub async fn delete_report(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            tracing::info!(id, "Report deleted");
        } else {
            tracing::debug!(id, "Delete matched no report");
        }
        Ok(removed)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn report_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<DefectReport, sqlx::Error> {
    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);

    Ok(DefectReport {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        laboratory: row.try_get("laboratory")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        photo: row.try_get("photo")?,
        created_at,
    })
}
