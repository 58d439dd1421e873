use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use slog::info;

use database::entities::Ward;
use database::hms_dbprovider::HmsDbProvider;

use crate::api_error::ApiError;
use crate::common_utils::{auth_info, require_doctor};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct BedListQuery {
    ward: Option<String>,
    available: Option<bool>,
}

#[get("/beds")]
pub(crate) async fn list_beds(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    query: web::Query<BedListQuery>,
) -> Result<HttpResponse, ApiError> {
    auth_info(&req)?;

    let ward = match query.ward.as_deref() {
        Some(raw) => Some(
            Ward::parse(raw)
                .ok_or_else(|| ApiError::Validation(format!("'{}' is not a valid ward", raw)))?,
        ),
        None => None,
    };

    let beds = app_state.db.list_beds(ward, query.available).await?;
    Ok(HttpResponse::Ok().json(beds))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateBedRequest {
    bed_number: String,
    ward: Option<String>,
}

#[post("/beds")]
pub(crate) async fn create_bed(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    payload: web::Json<CreateBedRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    require_doctor(&req, &app_state).await?;
    let request = payload.into_inner();

    if request.bed_number.trim().is_empty() {
        return Err(ApiError::Validation("bed_number is required".to_string()));
    }
    let ward = match request.ward.as_deref() {
        Some(raw) => Ward::parse(raw)
            .ok_or_else(|| ApiError::Validation(format!("'{}' is not a valid ward", raw)))?,
        None => Ward::General,
    };

    let bed = app_state.db.create_bed(request.bed_number.trim(), ward).await?;
    info!(log, "created bed {} in ward {}", bed.bed_number, bed.ward);
    Ok(HttpResponse::Created().json(bed))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignPatientRequest {
    patient_id: i64,
}

/// Available -> Occupied, doctor-only, conflict on an occupied bed.
#[post("/beds/{id}/assign_patient")]
pub(crate) async fn assign_patient(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<AssignPatientRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    require_doctor(&req, &app_state).await?;

    let bed = app_state
        .db
        .assign_bed(id.into_inner(), payload.patient_id, Utc::now())
        .await?;

    info!(
        log,
        "assigned patient {} to bed {}", payload.patient_id, bed.bed_number
    );
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Patient assigned to bed {} successfully", bed.bed_number),
        "bed": bed,
    })))
}

/// Occupied -> Available, doctor-only, conflict on a free bed.
#[post("/beds/{id}/release_bed")]
pub(crate) async fn release_bed(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    require_doctor(&req, &app_state).await?;

    let bed = app_state.db.release_bed(id.into_inner()).await?;

    info!(log, "released bed {}", bed.bed_number);
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Bed {} released successfully", bed.bed_number),
        "bed": bed,
    })))
}

#[get("/beds/ward_summary")]
pub(crate) async fn ward_summary(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    auth_info(&req)?;
    let summary = app_state.db.ward_summary().await?;
    Ok(HttpResponse::Ok().json(summary))
}
