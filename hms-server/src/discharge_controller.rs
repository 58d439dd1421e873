use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use slog::info;

use database::entities::{ChargeBreakdown, UserRole};
use database::hms_dbprovider::{HmsDbProvider, NewDischarge};

use crate::api_error::ApiError;
use crate::common_utils::{auth_info, require_doctor};
use crate::AppState;

/// Patients see their own discharge records; doctors the ones they made.
#[get("/discharges")]
pub(crate) async fn list_discharges(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let info = auth_info(&req)?;
    let discharges = match info.role {
        UserRole::Doctor => {
            let doctor = app_state
                .db
                .get_doctor_by_account(info.account_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Doctor not found".to_string()))?;
            app_state.db.discharges_by_doctor(doctor.id).await?
        }
        UserRole::Patient => {
            let patient = app_state
                .db
                .get_patient_by_account(info.account_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Patient not found".to_string()))?;
            app_state.db.discharges_for_patient(patient.id).await?
        }
    };
    Ok(HttpResponse::Ok().json(discharges))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateDischargeRequest {
    patient_id: i64,
    release_date: NaiveDate,
    room_charge: i64,
    medicine_cost: i64,
    doctor_fee: i64,
    other_charge: i64,
}

/// Finalizes an admission: snapshots patient contact data, computes
/// days spent and the charge total.
#[post("/discharges")]
pub(crate) async fn create_discharge(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    payload: web::Json<CreateDischargeRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let doctor = require_doctor(&req, &app_state).await?;
    let request = payload.into_inner();

    let charges = ChargeBreakdown {
        room_charge: request.room_charge,
        medicine_cost: request.medicine_cost,
        doctor_fee: request.doctor_fee,
        other_charge: request.other_charge,
    };
    if charges.room_charge < 0
        || charges.medicine_cost < 0
        || charges.doctor_fee < 0
        || charges.other_charge < 0
    {
        return Err(ApiError::Validation(
            "charges must not be negative".to_string(),
        ));
    }

    let discharge = app_state
        .db
        .create_discharge(&NewDischarge {
            patient_id: request.patient_id,
            doctor_id: Some(doctor.id),
            release_date: request.release_date,
            charges,
        })
        .await?;

    info!(
        log,
        "discharged patient:{} total:{} days:{}",
        discharge.patient_id,
        discharge.total,
        discharge.days_spent
    );
    Ok(HttpResponse::Created().json(discharge))
}
