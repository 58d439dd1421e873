use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::entities::{
    AccountEntity, AppointmentEntity, BedEntity, ChargeBreakdown, Department, DischargeEntity,
    DoctorEntity, DoctorStats, EmergencyCaseEntity, InvoiceEntity, PatientEntity, PatientOverview,
    PrescriptionEntity, Severity, UserRole, Ward, WardSummary,
};

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database operation failed: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

/// Everything needed to create an account with its linked profile in one
/// all-or-nothing write.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub activation_token: String,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub department: Option<Department>,
}

#[derive(Debug, Clone, Default)]
pub struct PatientProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub symptoms: Option<String>,
    pub blood_group: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct NewPrescription {
    pub symptoms: String,
    pub medication: String,
    pub dosage: String,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDischarge {
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    pub release_date: NaiveDate,
    pub charges: ChargeBreakdown,
}

#[async_trait]
pub trait HmsDbProvider: Send + Sync {
    // identity store
    async fn username_exists(&self, username: &str) -> Result<bool, DbError>;
    async fn create_account(&self, new: &NewAccount) -> Result<AccountEntity, DbError>;
    async fn activate_account(&self, token: &str) -> Result<AccountEntity, DbError>;
    async fn get_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountEntity>, DbError>;

    // profile records
    async fn get_doctor(&self, doctor_id: i64) -> Result<Option<DoctorEntity>, DbError>;
    async fn get_doctor_by_account(&self, account_id: i64)
        -> Result<Option<DoctorEntity>, DbError>;
    async fn get_patient(&self, patient_id: i64) -> Result<Option<PatientEntity>, DbError>;
    async fn get_patient_by_account(
        &self,
        account_id: i64,
    ) -> Result<Option<PatientEntity>, DbError>;
    async fn update_doctor_profile(
        &self,
        doctor_id: i64,
        update: &DoctorProfileUpdate,
    ) -> Result<DoctorEntity, DbError>;
    async fn update_patient_profile(
        &self,
        patient_id: i64,
        update: &PatientProfileUpdate,
    ) -> Result<PatientEntity, DbError>;
    async fn search_doctors(
        &self,
        name: Option<&str>,
        department: Option<&str>,
    ) -> Result<Vec<DoctorEntity>, DbError>;
    async fn doctor_stats(&self, doctor_id: i64) -> Result<DoctorStats, DbError>;
    async fn assigned_patients(
        &self,
        doctor_id: i64,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PatientEntity>, DbError>;
    async fn patient_overview(&self, patient_id: i64) -> Result<PatientOverview, DbError>;
    /// Fill missing contact/symptom/assigned-doctor fields from the
    /// patient's latest discharge record, then return the fresh row.
    async fn backfill_patient_from_discharge(
        &self,
        patient_id: i64,
    ) -> Result<PatientEntity, DbError>;

    // scheduling engine
    async fn book_appointment(
        &self,
        doctor_id: i64,
        patient_id: i64,
        appointment_date: DateTime<Utc>,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AppointmentEntity, DbError>;
    async fn get_appointment(
        &self,
        appointment_id: i64,
    ) -> Result<Option<AppointmentEntity>, DbError>;
    async fn appointments_for_doctor(
        &self,
        doctor_id: i64,
    ) -> Result<Vec<AppointmentEntity>, DbError>;
    async fn appointments_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<AppointmentEntity>, DbError>;
    async fn delete_appointment(&self, appointment_id: i64) -> Result<(), DbError>;

    // clinical record linkage
    async fn create_prescription_from_appointment(
        &self,
        appointment_id: i64,
        doctor_id: i64,
        data: &NewPrescription,
    ) -> Result<PrescriptionEntity, DbError>;
    async fn prescriptions_for_doctor(
        &self,
        doctor_id: i64,
    ) -> Result<Vec<PrescriptionEntity>, DbError>;
    async fn prescriptions_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<PrescriptionEntity>, DbError>;
    async fn create_discharge(&self, new: &NewDischarge) -> Result<DischargeEntity, DbError>;
    async fn discharges_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<DischargeEntity>, DbError>;
    async fn discharges_by_doctor(&self, doctor_id: i64) -> Result<Vec<DischargeEntity>, DbError>;
    async fn latest_discharge_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Option<DischargeEntity>, DbError>;

    // resource registry
    async fn create_bed(&self, bed_number: &str, ward: Ward) -> Result<BedEntity, DbError>;
    async fn get_bed(&self, bed_id: i64) -> Result<Option<BedEntity>, DbError>;
    async fn list_beds(
        &self,
        ward: Option<Ward>,
        available: Option<bool>,
    ) -> Result<Vec<BedEntity>, DbError>;
    async fn assign_bed(
        &self,
        bed_id: i64,
        patient_id: i64,
        now: DateTime<Utc>,
    ) -> Result<BedEntity, DbError>;
    async fn release_bed(&self, bed_id: i64) -> Result<BedEntity, DbError>;
    async fn ward_summary(&self) -> Result<Vec<WardSummary>, DbError>;
    async fn bed_for_patient(&self, patient_id: i64) -> Result<Option<BedEntity>, DbError>;

    // emergency case tracking
    async fn create_emergency_case(
        &self,
        patient_id: i64,
        severity: Severity,
        description: &str,
    ) -> Result<EmergencyCaseEntity, DbError>;
    async fn list_emergency_cases(
        &self,
        active_only: bool,
    ) -> Result<Vec<EmergencyCaseEntity>, DbError>;
    async fn resolve_emergency_case(&self, case_id: i64) -> Result<EmergencyCaseEntity, DbError>;
    async fn active_case_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Option<EmergencyCaseEntity>, DbError>;

    // billing ledger
    async fn create_invoice(
        &self,
        patient_id: i64,
        description: &str,
        amount_cents: i64,
    ) -> Result<InvoiceEntity, DbError>;
    async fn invoices_for_patient(
        &self,
        patient_id: i64,
        paid: Option<bool>,
    ) -> Result<Vec<InvoiceEntity>, DbError>;
    async fn get_invoice_for_patient(
        &self,
        invoice_id: i64,
        patient_id: i64,
    ) -> Result<Option<InvoiceEntity>, DbError>;
    async fn mark_invoice_paid(
        &self,
        invoice_id: i64,
        patient_id: i64,
        paid_date: NaiveDate,
    ) -> Result<InvoiceEntity, DbError>;
}
