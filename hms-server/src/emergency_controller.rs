use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use slog::info;

use database::entities::Severity;
use database::hms_dbprovider::HmsDbProvider;

use crate::api_error::ApiError;
use crate::common_utils::{auth_info, require_doctor};
use crate::AppState;

#[get("/emergency_cases")]
pub(crate) async fn list_cases(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    auth_info(&req)?;
    let cases = app_state.db.list_emergency_cases(false).await?;
    Ok(HttpResponse::Ok().json(cases))
}

#[get("/emergency_cases/active_cases")]
pub(crate) async fn active_cases(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    auth_info(&req)?;
    let cases = app_state.db.list_emergency_cases(true).await?;
    Ok(HttpResponse::Ok().json(cases))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateCaseRequest {
    patient_id: i64,
    severity: String,
    description: String,
}

#[post("/emergency_cases")]
pub(crate) async fn create_case(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    payload: web::Json<CreateCaseRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    auth_info(&req)?;
    let request = payload.into_inner();

    let severity = Severity::parse(&request.severity)
        .ok_or_else(|| ApiError::Validation(format!("'{}' is not a valid severity", request.severity)))?;
    if request.description.trim().is_empty() {
        return Err(ApiError::Validation("description is required".to_string()));
    }

    let case = app_state
        .db
        .create_emergency_case(request.patient_id, severity, request.description.trim())
        .await?;

    info!(
        log,
        "opened emergency case id:{} patient:{} severity:{}",
        case.id,
        case.patient_id,
        case.severity
    );
    Ok(HttpResponse::Created().json(case))
}

/// Resolving an already-resolved case is rejected with a conflict.
#[post("/emergency_cases/{id}/resolve")]
pub(crate) async fn resolve_case(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    require_doctor(&req, &app_state).await?;

    let case = app_state.db.resolve_emergency_case(id.into_inner()).await?;

    info!(log, "resolved emergency case id:{}", case.id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Emergency case resolved successfully",
        "case": case,
    })))
}
