use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use slog::info;

use database::entities::UserRole;
use database::hms_dbprovider::HmsDbProvider;

use crate::api_error::ApiError;
use crate::common_utils::{auth_info, require_patient};
use crate::AppState;

/// Role-scoped listing: doctors see their schedule, patients theirs.
#[get("/appointments")]
pub(crate) async fn list_appointments(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let info = auth_info(&req)?;
    let appointments = match info.role {
        UserRole::Doctor => {
            let doctor = app_state
                .db
                .get_doctor_by_account(info.account_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Doctor not found".to_string()))?;
            app_state.db.appointments_for_doctor(doctor.id).await?
        }
        UserRole::Patient => {
            let patient = app_state
                .db
                .get_patient_by_account(info.account_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))?;
            app_state.db.appointments_for_patient(patient.id).await?
        }
    };
    Ok(HttpResponse::Ok().json(appointments))
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookAppointmentRequest {
    doctor_id: i64,
    appointment_date: DateTime<Utc>,
    reason: Option<String>,
}

/// Booking is patient-only and always attributed to the caller's own
/// patient record, never one named in the request.
#[post("/appointments")]
pub(crate) async fn book_appointment(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    payload: web::Json<BookAppointmentRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let patient = require_patient(&req, &app_state).await?;
    let request = payload.into_inner();

    let appointment = app_state
        .db
        .book_appointment(
            request.doctor_id,
            patient.id,
            request.appointment_date,
            request.reason.as_deref(),
            Utc::now(),
        )
        .await?;

    info!(
        log,
        "booked appointment id:{} doctor:{} patient:{} at:{}",
        appointment.id,
        appointment.doctor_id,
        appointment.patient_id,
        appointment.appointment_date
    );
    Ok(HttpResponse::Created().json(appointment))
}

/// Cancellation is allowed for either party to the appointment.
#[delete("/appointments/{id}")]
pub(crate) async fn cancel_appointment(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let info = auth_info(&req)?;
    let appointment_id = id.into_inner();

    let appointment = app_state
        .db
        .get_appointment(appointment_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Appointment not found".to_string()))?;

    let is_party = match info.role {
        UserRole::Doctor => app_state
            .db
            .get_doctor_by_account(info.account_id)
            .await?
            .is_some_and(|doctor| doctor.id == appointment.doctor_id),
        UserRole::Patient => app_state
            .db
            .get_patient_by_account(info.account_id)
            .await?
            .is_some_and(|patient| patient.id == appointment.patient_id),
    };
    if !is_party {
        return Err(ApiError::PermissionDenied(
            "You can't cancel this appointment.".to_string(),
        ));
    }

    app_state.db.delete_appointment(appointment_id).await?;
    info!(log, "cancelled appointment id:{}", appointment_id);
    Ok(HttpResponse::NoContent().finish())
}
