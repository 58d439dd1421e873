use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use slog::info;

use database::hms_dbprovider::HmsDbProvider;

use crate::api_error::ApiError;
use crate::common_utils::{require_doctor, require_patient};
use crate::invoice_pdf;
use crate::AppState;

#[get("/invoices")]
pub(crate) async fn list_invoices(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let patient = require_patient(&req, &app_state).await?;
    let invoices = app_state.db.invoices_for_patient(patient.id, None).await?;
    Ok(HttpResponse::Ok().json(invoices))
}

#[get("/invoices/outstanding")]
pub(crate) async fn outstanding(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let patient = require_patient(&req, &app_state).await?;
    let invoices = app_state
        .db
        .invoices_for_patient(patient.id, Some(false))
        .await?;
    Ok(HttpResponse::Ok().json(invoices))
}

#[get("/invoices/paid")]
pub(crate) async fn paid(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let patient = require_patient(&req, &app_state).await?;
    let invoices = app_state
        .db
        .invoices_for_patient(patient.id, Some(true))
        .await?;
    Ok(HttpResponse::Ok().json(invoices))
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateInvoiceRequest {
    patient_id: i64,
    description: String,
    amount_cents: i64,
}

#[post("/invoices")]
pub(crate) async fn create_invoice(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    payload: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    require_doctor(&req, &app_state).await?;
    let request = payload.into_inner();

    if request.description.trim().is_empty() {
        return Err(ApiError::Validation("description is required".to_string()));
    }

    let invoice = app_state
        .db
        .create_invoice(
            request.patient_id,
            request.description.trim(),
            request.amount_cents,
        )
        .await?;

    info!(
        log,
        "created invoice id:{} patient:{} amount_cents:{}",
        invoice.id,
        invoice.patient_id,
        invoice.amount_cents
    );
    Ok(HttpResponse::Created().json(invoice))
}

#[post("/invoices/{id}/pay")]
pub(crate) async fn pay_invoice(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let patient = require_patient(&req, &app_state).await?;

    let invoice = app_state
        .db
        .mark_invoice_paid(id.into_inner(), patient.id, Utc::now().date_naive())
        .await?;

    info!(log, "invoice id:{} marked paid", invoice.id);
    Ok(HttpResponse::Ok().json(invoice))
}

/// Renders the invoice as a PDF attachment, ownership-checked.
#[get("/invoices/{id}/download")]
pub(crate) async fn download_invoice(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let patient = require_patient(&req, &app_state).await?;

    let invoice = app_state
        .db
        .get_invoice_for_patient(id.into_inner(), patient.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invoice not found".to_string()))?;

    let pdf = invoice_pdf::render_invoice(&invoice, &patient.full_name())
        .map_err(|e| ApiError::Internal(format!("PDF generation failed: {}", e)))?;

    Ok(HttpResponse::Ok()
        .append_header(("Content-Type", "application/pdf"))
        .append_header((
            "Content-Disposition",
            format!("attachment; filename=\"invoice_{}.pdf\"", invoice.id),
        ))
        .body(pdf))
}
