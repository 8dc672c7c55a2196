use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::data_dto::ReportQuery,
    error::Result,
    extract::Query,
    models::report::ExportFormat,
    services::export_service::ExportService,
    utils::token::Claims,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/reports",
    params(
        ("date" = Option<String>, Query, description = "Report date; earliest available when absent"),
        ("parameter" = Option<String>, Query, description = "Parameter name; Iron when absent")
    ),
    responses(
        (status = 200, description = "Report summary"),
        (status = 404, description = "No data available for this date")
    )
)]
#[axum::debug_handler]
pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse> {
    let report = state.report_service.build(query.date()?, query.parameter()?)?;
    Ok(Json(report))
}

async fn export(
    state: &AppState,
    claims: &Claims,
    query: &ReportQuery,
    format: ExportFormat,
) -> Result<Response> {
    let report = state.report_service.build(query.date()?, query.parameter()?)?;
    let buffer = match format {
        ExportFormat::Csv => ExportService::generate_report_csv(&report)?,
        ExportFormat::Xlsx => ExportService::generate_report_xlsx(&report)?,
    };
    state
        .report_service
        .record_export(Uuid::parse_str(&claims.sub).ok(), &report, format)
        .await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        ExportService::filename(&report, format)
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/reports/export.csv",
    params(
        ("date" = Option<String>, Query, description = "Report date"),
        ("parameter" = Option<String>, Query, description = "Parameter name")
    ),
    responses(
        (status = 200, description = "CSV report"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse> {
    export(&state, &claims, &query, ExportFormat::Csv).await
}

#[utoipa::path(
    get,
    path = "/api/reports/export.xlsx",
    params(
        ("date" = Option<String>, Query, description = "Report date"),
        ("parameter" = Option<String>, Query, description = "Parameter name")
    ),
    responses(
        (status = 200, description = "XLSX report"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn export_xlsx(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse> {
    export(&state, &claims, &query, ExportFormat::Xlsx).await
}
