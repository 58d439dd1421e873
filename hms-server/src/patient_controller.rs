use actix_web::{get, put, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use slog::info;

use database::hms_dbprovider::{HmsDbProvider, PatientProfileUpdate};

use crate::api_error::ApiError;
use crate::common_utils::require_patient;
use crate::AppState;

/// Profile plus current bed and active emergency case. Missing contact
/// fields are back-filled from the latest discharge record first.
#[get("/patients/my_profile")]
pub(crate) async fn my_profile(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let patient = require_patient(&req, &app_state).await?;
    let patient = app_state
        .db
        .backfill_patient_from_discharge(patient.id)
        .await?;

    let bed = app_state.db.bed_for_patient(patient.id).await?;
    let emergency = app_state.db.active_case_for_patient(patient.id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "profile": patient,
        "bed": bed,
        "emergency_case": emergency,
    })))
}

#[derive(Debug, Deserialize)]
pub(crate) struct PatientUpdateRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    address: Option<String>,
    mobile: Option<String>,
    symptoms: Option<String>,
    blood_group: Option<String>,
    date_of_birth: Option<chrono::NaiveDate>,
}

#[put("/patients/update_profile")]
pub(crate) async fn update_profile(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    payload: web::Json<PatientUpdateRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let patient = require_patient(&req, &app_state).await?;
    let update = payload.into_inner();

    let updated = app_state
        .db
        .update_patient_profile(
            patient.id,
            &PatientProfileUpdate {
                first_name: update.first_name,
                last_name: update.last_name,
                address: update.address,
                mobile: update.mobile,
                symptoms: update.symptoms,
                blood_group: update.blood_group,
                date_of_birth: update.date_of_birth,
            },
        )
        .await?;

    info!(log, "updated patient profile id:{}", patient.id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Profile updated successfully",
        "data": updated,
    })))
}

#[get("/patients/dashboard_overview")]
pub(crate) async fn dashboard_overview(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let patient = require_patient(&req, &app_state).await?;
    let overview = app_state.db.patient_overview(patient.id).await?;

    // Prefer the assigned doctor; fall back to the one on the latest
    // discharge, as the profile page does.
    let mut doctor = match patient.assigned_doctor_id {
        Some(id) => app_state.db.get_doctor(id).await?,
        None => None,
    };
    if doctor.is_none() {
        if let Some(discharge) = app_state.db.latest_discharge_for_patient(patient.id).await? {
            if let Some(doctor_id) = discharge.doctor_id {
                doctor = app_state.db.get_doctor(doctor_id).await?;
            }
        }
    }

    let (doctor_name, department) = match &doctor {
        Some(doctor) => (doctor.full_name(), doctor.department.as_str().to_string()),
        None => ("Not Assigned".to_string(), "N/A".to_string()),
    };

    Ok(HttpResponse::Ok().json(json!({
        "patient_name": patient.full_name(),
        "doctor_name": doctor_name,
        "department": department,
        "admit_date": patient.admit_date,
        "appointments_count": overview.appointments_count,
        "prescriptions_count": overview.prescriptions_count,
        "is_discharged": overview.is_discharged,
    })))
}
