use actix_web::{get, put, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use slog::info;

use database::entities::Department;
use database::hms_dbprovider::{DoctorProfileUpdate, HmsDbProvider};

use crate::api_error::ApiError;
use crate::common_utils::{auth_info, require_doctor};
use crate::AppState;

const DEFAULT_PAGE_SIZE: i64 = 5;
const MAX_PAGE_SIZE: i64 = 50;

#[derive(Debug, Deserialize)]
pub(crate) struct DoctorSearchQuery {
    search: Option<String>,
    department: Option<String>,
}

/// Doctor directory, searchable by name fragment and department.
#[get("/doctors")]
pub(crate) async fn list_doctors(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    query: web::Query<DoctorSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    auth_info(&req)?;
    let doctors = app_state
        .db
        .search_doctors(query.search.as_deref(), query.department.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(doctors))
}

#[get("/doctors/my_profile")]
pub(crate) async fn my_profile(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let doctor = require_doctor(&req, &app_state).await?;
    Ok(HttpResponse::Ok().json(doctor))
}

#[derive(Debug, Deserialize)]
pub(crate) struct DoctorUpdateRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    address: Option<String>,
    mobile: Option<String>,
    department: Option<String>,
}

#[put("/doctors/my_profile")]
pub(crate) async fn update_profile(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    payload: web::Json<DoctorUpdateRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let doctor = require_doctor(&req, &app_state).await?;
    let update = payload.into_inner();

    let department = match update.department.as_deref() {
        Some(raw) => Some(Department::parse(raw).ok_or_else(|| {
            ApiError::Validation(format!("'{}' is not a valid department", raw))
        })?),
        None => None,
    };

    let updated = app_state
        .db
        .update_doctor_profile(
            doctor.id,
            &DoctorProfileUpdate {
                first_name: update.first_name,
                last_name: update.last_name,
                address: update.address,
                mobile: update.mobile,
                department,
            },
        )
        .await?;

    info!(log, "updated doctor profile id:{}", doctor.id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Profile updated successfully",
        "data": updated,
    })))
}

/// Explicit aggregate counts instead of relation traversal.
#[get("/doctors/dashboard_stats")]
pub(crate) async fn dashboard_stats(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let doctor = require_doctor(&req, &app_state).await?;
    let stats = app_state.db.doctor_stats(doctor.id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[derive(Debug, Deserialize)]
pub(crate) struct MyPatientsQuery {
    search: Option<String>,
    page: Option<i64>,
    page_size: Option<i64>,
}

#[get("/doctors/my_patients")]
pub(crate) async fn my_patients(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    query: web::Query<MyPatientsQuery>,
) -> Result<HttpResponse, ApiError> {
    let doctor = require_doctor(&req, &app_state).await?;

    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * page_size;

    let patients = app_state
        .db
        .assigned_patients(doctor.id, query.search.as_deref(), page_size, offset)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "page": page,
        "page_size": page_size,
        "results": patients,
    })))
}

#[get("/doctors/discharged_patients")]
pub(crate) async fn discharged_patients(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let doctor = require_doctor(&req, &app_state).await?;
    let discharges = app_state.db.discharges_by_doctor(doctor.id).await?;
    Ok(HttpResponse::Ok().json(discharges))
}

#[get("/doctors/{id}")]
pub(crate) async fn retrieve_doctor(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    auth_info(&req)?;
    let doctor = app_state
        .db
        .get_doctor(id.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Doctor not found".to_string()))?;
    Ok(HttpResponse::Ok().json(doctor))
}
