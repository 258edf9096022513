//! Defect report API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::ApiResult;
use crate::models::{CreateReportRequest, DefectReport, MessageResponse};
use crate::AppState;

/// GET /api/places - List all reports, newest first.
pub async fn list_reports(State(state): State<AppState>) -> ApiResult<Json<Vec<DefectReport>>> {
    let reports = state
        .repo
        .list_reports()
        .await
        .map_err(|e| e.into_server_error("Failed to list reports"))?;

    Ok(Json(reports))
}

/// POST /api/places - Report a new defect.
pub async fn create_report(
    State(state): State<AppState>,
    body: Result<Json<CreateReportRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DefectReport>)> {
    let Json(request) = body?;

    // Validate required fields before touching the store
    let new_report = request.validate()?;

    let report = state
        .repo
        .insert_report(new_report)
        .await
        .map_err(|e| e.into_server_error("Failed to save report"))?;

    tracing::info!(id = %report.id, laboratory = %report.laboratory, "Report created");
    Ok((StatusCode::CREATED, Json(report)))
}

/// DELETE /api/places/:id - Delete a report, whether or not it exists.
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .repo
        .delete_report(&id)
        .await
        .map_err(|e| e.into_server_error("Failed to delete report"))?;

    Ok(Json(MessageResponse::new("Report deleted")))
}
