use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use slog::info;

use database::entities::UserRole;
use database::hms_dbprovider::{HmsDbProvider, NewPrescription};

use crate::api_error::ApiError;
use crate::common_utils::{auth_info, require_doctor};
use crate::AppState;

#[get("/prescriptions")]
pub(crate) async fn list_prescriptions(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let info = auth_info(&req)?;
    let prescriptions = match info.role {
        UserRole::Doctor => {
            let doctor = app_state
                .db
                .get_doctor_by_account(info.account_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Doctor not found".to_string()))?;
            app_state.db.prescriptions_for_doctor(doctor.id).await?
        }
        UserRole::Patient => {
            let patient = app_state
                .db
                .get_patient_by_account(info.account_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))?;
            app_state.db.prescriptions_for_patient(patient.id).await?
        }
    };
    Ok(HttpResponse::Ok().json(prescriptions))
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrescriptionRequest {
    symptoms: String,
    medication: String,
    dosage: String,
    instructions: Option<String>,
}

/// Issuing a prescription completes the appointment and, when the patient
/// has no assigned doctor yet, assigns the issuing one.
#[post("/appointments/{id}/prescriptions")]
pub(crate) async fn create_from_appointment(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: web::Json<PrescriptionRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let doctor = require_doctor(&req, &app_state).await?;
    let request = payload.into_inner();

    if request.medication.trim().is_empty() {
        return Err(ApiError::Validation("medication is required".to_string()));
    }
    if request.dosage.trim().is_empty() {
        return Err(ApiError::Validation("dosage is required".to_string()));
    }

    let prescription = app_state
        .db
        .create_prescription_from_appointment(
            id.into_inner(),
            doctor.id,
            &NewPrescription {
                symptoms: request.symptoms,
                medication: request.medication,
                dosage: request.dosage,
                instructions: request.instructions,
            },
        )
        .await?;

    info!(
        log,
        "issued prescription id:{} appointment:{} doctor:{}",
        prescription.id,
        prescription.appointment_id,
        prescription.doctor_id
    );
    Ok(HttpResponse::Created().json(prescription))
}
