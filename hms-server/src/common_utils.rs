use actix_web::{HttpMessage, HttpRequest};
use database::entities::{DoctorEntity, PatientEntity, UserRole};
use database::hms_dbprovider::HmsDbProvider;

use crate::api_error::ApiError;
use crate::auth_information::AuthInformation;
use crate::AppState;

pub(crate) fn auth_info(req: &HttpRequest) -> Result<AuthInformation, ApiError> {
    req.extensions()
        .get::<AuthInformation>()
        .cloned()
        .ok_or_else(|| ApiError::PermissionDenied("Authentication required".to_string()))
}

/// Resolve the calling doctor, rejecting patient sessions.
pub(crate) async fn require_doctor(
    req: &HttpRequest,
    state: &AppState,
) -> Result<DoctorEntity, ApiError> {
    let info = auth_info(req)?;
    if info.role != UserRole::Doctor {
        return Err(ApiError::PermissionDenied(
            "Doctor account required".to_string(),
        ));
    }
    state
        .db
        .get_doctor_by_account(info.account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Doctor not found".to_string()))
}

/// Resolve the calling patient, rejecting doctor sessions.
pub(crate) async fn require_patient(
    req: &HttpRequest,
    state: &AppState,
) -> Result<PatientEntity, ApiError> {
    let info = auth_info(req)?;
    if info.role != UserRole::Patient {
        return Err(ApiError::PermissionDenied(
            "Patient account required".to_string(),
        ));
    }
    state
        .db
        .get_patient_by_account(info.account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))
}
