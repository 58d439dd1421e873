use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Doctor,
    Patient,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Doctor => "doctor",
            UserRole::Patient => "patient",
        }
    }

    pub fn parse(s: &str) -> Option<UserRole> {
        match s {
            "doctor" => Some(UserRole::Doctor),
            "patient" => Some(UserRole::Patient),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ward {
    General,
    #[serde(rename = "ICU")]
    Icu,
    Emergency,
    Pediatric,
    Maternity,
}

impl Ward {
    pub const ALL: [Ward; 5] = [
        Ward::General,
        Ward::Icu,
        Ward::Emergency,
        Ward::Pediatric,
        Ward::Maternity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ward::General => "General",
            Ward::Icu => "ICU",
            Ward::Emergency => "Emergency",
            Ward::Pediatric => "Pediatric",
            Ward::Maternity => "Maternity",
        }
    }

    pub fn parse(s: &str) -> Option<Ward> {
        match s {
            "General" => Some(Ward::General),
            "ICU" => Some(Ward::Icu),
            "Emergency" => Some(Ward::Emergency),
            "Pediatric" => Some(Ward::Pediatric),
            "Maternity" => Some(Ward::Maternity),
            _ => None,
        }
    }
}

impl fmt::Display for Ward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    Moderate,
    Mild,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Moderate => "Moderate",
            Severity::Mild => "Mild",
        }
    }

    pub fn parse(s: &str) -> Option<Severity> {
        match s {
            "Critical" => Some(Severity::Critical),
            "Moderate" => Some(Severity::Moderate),
            "Mild" => Some(Severity::Mild),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six departments carried over from the doctor directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Cardiologist,
    Dermatologists,
    #[serde(rename = "Emergency Medicine Specialists")]
    EmergencyMedicineSpecialists,
    #[serde(rename = "Allergists/Immunologists")]
    AllergistsImmunologists,
    Anesthesiologists,
    #[serde(rename = "Colon and Rectal Surgeons")]
    ColonAndRectalSurgeons,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Cardiologist => "Cardiologist",
            Department::Dermatologists => "Dermatologists",
            Department::EmergencyMedicineSpecialists => "Emergency Medicine Specialists",
            Department::AllergistsImmunologists => "Allergists/Immunologists",
            Department::Anesthesiologists => "Anesthesiologists",
            Department::ColonAndRectalSurgeons => "Colon and Rectal Surgeons",
        }
    }

    pub fn parse(s: &str) -> Option<Department> {
        match s {
            "Cardiologist" => Some(Department::Cardiologist),
            "Dermatologists" => Some(Department::Dermatologists),
            "Emergency Medicine Specialists" => Some(Department::EmergencyMedicineSpecialists),
            "Allergists/Immunologists" => Some(Department::AllergistsImmunologists),
            "Anesthesiologists" => Some(Department::Anesthesiologists),
            "Colon and Rectal Surgeons" => Some(Department::ColonAndRectalSurgeons),
            _ => None,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountEntity {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl AccountEntity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Doctor row joined with its account for display fields.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorEntity {
    pub id: i64,
    pub account_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub department: Department,
    pub status: bool,
}

impl DoctorEntity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Patient row joined with its account for display fields.
#[derive(Debug, Clone, Serialize)]
pub struct PatientEntity {
    pub id: i64,
    pub account_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub symptoms: Option<String>,
    pub assigned_doctor_id: Option<i64>,
    pub admit_date: NaiveDate,
    pub status: bool,
    pub blood_group: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl PatientEntity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentEntity {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: DateTime<Utc>,
    pub reason: Option<String>,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrescriptionEntity {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_id: i64,
    pub symptoms: String,
    pub medication: String,
    pub dosage: String,
    pub instructions: Option<String>,
    pub date_issued: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BedEntity {
    pub id: i64,
    pub bed_number: String,
    pub ward: Ward,
    pub is_occupied: bool,
    pub patient_id: Option<i64>,
    pub assigned_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmergencyCaseEntity {
    pub id: i64,
    pub patient_id: i64,
    pub severity: Severity,
    pub description: String,
    pub admission_date: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DischargeEntity {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    pub address: Option<String>,
    pub mobile: Option<String>,
    pub symptoms: Option<String>,
    pub admit_date: NaiveDate,
    pub release_date: NaiveDate,
    pub days_spent: i32,
    pub room_charge: i64,
    pub medicine_cost: i64,
    pub doctor_fee: i64,
    pub other_charge: i64,
    pub total: i64,
}

/// Amounts are stored in cents.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceEntity {
    pub id: i64,
    pub patient_id: i64,
    pub invoice_date: NaiveDate,
    pub description: String,
    pub amount_cents: i64,
    pub is_paid: bool,
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WardSummary {
    pub ward: Ward,
    pub total: i64,
    pub occupied: i64,
    pub available: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorStats {
    pub assigned_patients: i64,
    pub appointments: i64,
    pub discharged_patients: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientOverview {
    pub appointments_count: i64,
    pub prescriptions_count: i64,
    pub is_discharged: bool,
}

/// Charge breakdown for a discharge record; `total` is always derived,
/// never accepted from the caller.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChargeBreakdown {
    pub room_charge: i64,
    pub medicine_cost: i64,
    pub doctor_fee: i64,
    pub other_charge: i64,
}

impl ChargeBreakdown {
    pub fn total(&self) -> i64 {
        self.room_charge + self.medicine_cost + self.doctor_fee + self.other_charge
    }
}

/// Whole days between admission and release, floored at zero.
pub fn days_spent(admit: NaiveDate, release: NaiveDate) -> i32 {
    (release - admit).num_days().max(0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ward_parse_roundtrip() {
        for ward in Ward::ALL {
            assert_eq!(Ward::parse(ward.as_str()), Some(ward));
        }
        assert_eq!(Ward::parse("Surgical"), None);
    }

    #[test]
    fn severity_parse_roundtrip() {
        for severity in [Severity::Critical, Severity::Moderate, Severity::Mild] {
            assert_eq!(Severity::parse(severity.as_str()), Some(severity));
        }
        assert_eq!(Severity::parse("Fatal"), None);
    }

    #[test]
    fn role_parse_is_lowercase_only() {
        assert_eq!(UserRole::parse("doctor"), Some(UserRole::Doctor));
        assert_eq!(UserRole::parse("patient"), Some(UserRole::Patient));
        assert_eq!(UserRole::parse("Doctor"), None);
    }

    #[test]
    fn department_parse_roundtrip() {
        assert_eq!(
            Department::parse("Allergists/Immunologists"),
            Some(Department::AllergistsImmunologists)
        );
        assert_eq!(
            Department::parse("Colon and Rectal Surgeons"),
            Some(Department::ColonAndRectalSurgeons)
        );
        assert_eq!(Department::parse("Radiologist"), None);
    }

    #[test]
    fn charge_total_sums_all_four() {
        let charges = ChargeBreakdown {
            room_charge: 1200,
            medicine_cost: 350,
            doctor_fee: 800,
            other_charge: 50,
        };
        assert_eq!(charges.total(), 2400);
    }

    #[test]
    fn days_spent_floors_at_zero() {
        let admit = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let release = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        assert_eq!(days_spent(admit, release), 7);
        assert_eq!(days_spent(admit, admit), 0);
        assert_eq!(days_spent(release, admit), 0);
    }
}
