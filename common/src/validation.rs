use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

pub const ROLE_DOCTOR: &str = "doctor";
pub const ROLE_PATIENT: &str = "patient";

/// Signup payload for the identity store. `user_type` is matched
/// case-insensitively and normalized to lowercase before storage.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), String> {
        lazy_static! {
            static ref USERNAME_REGEX: Regex = Regex::new(r"^\w{3,32}$").unwrap();
        }
        if !USERNAME_REGEX.is_match(&self.username) {
            return Err(
                "username must be 3 to 32 characters long and contain only letters, numbers and underscores"
                    .to_string(),
            );
        }

        lazy_static! {
            static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
        }
        if !EMAIL_REGEX.is_match(&self.email) {
            return Err("email must be a valid address".to_string());
        }

        if self.first_name.trim().is_empty() {
            return Err("first_name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            return Err("last_name is required".to_string());
        }

        if self.password.len() < 8 {
            return Err("password must be at least 8 characters long".to_string());
        }
        if self.password != self.password2 {
            return Err("Password fields didn't match.".to_string());
        }

        let role = self.normalized_role();
        if role != ROLE_DOCTOR && role != ROLE_PATIENT {
            return Err(format!(
                "'{}' is not a valid choice. Choose from [\"{}\", \"{}\"]",
                self.user_type, ROLE_DOCTOR, ROLE_PATIENT
            ));
        }

        Ok(())
    }

    pub fn normalized_role(&self) -> String {
        self.user_type.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SignupRequest {
        SignupRequest {
            username: "jdoe".to_string(),
            email: "jdoe@example.org".to_string(),
            password: "hunter2hunter2".to_string(),
            password2: "hunter2hunter2".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            user_type: "Patient".to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_ok());
        assert_eq!(valid_request().normalized_role(), "patient");
    }

    #[test]
    fn password_mismatch_rejected() {
        let mut req = valid_request();
        req.password2 = "different-password".to_string();
        let err = req.validate().unwrap_err();
        assert_eq!(err, "Password fields didn't match.");
    }

    #[test]
    fn short_password_rejected() {
        let mut req = valid_request();
        req.password = "short".to_string();
        req.password2 = "short".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn bad_username_rejected() {
        let mut req = valid_request();
        req.username = "a b".to_string();
        assert!(req.validate().is_err());
        req.username = "ab".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn bad_email_rejected() {
        let mut req = valid_request();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_role_rejected() {
        let mut req = valid_request();
        req.user_type = "admin".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn role_matching_is_case_insensitive() {
        let mut req = valid_request();
        req.user_type = "DOCTOR".to_string();
        assert!(req.validate().is_ok());
        assert_eq!(req.normalized_role(), "doctor");
    }
}
