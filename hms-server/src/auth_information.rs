use common::auth_token::Claims;
use database::entities::UserRole;

/// Caller identity resolved once at request entry by the auth middleware.
/// The role is an explicit enum; handlers never probe claims themselves.
#[derive(Debug, Clone)]
pub struct AuthInformation {
    pub account_id: i64,
    pub username: String,
    pub role: UserRole,
}

impl AuthInformation {
    pub(crate) fn from_claims(claims: &Claims) -> Option<Self> {
        let account_id = claims.sub.parse().ok()?;
        let role = UserRole::parse(&claims.user_type)?;
        Some(AuthInformation {
            account_id,
            username: claims.username.clone(),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, user_type: &str) -> Claims {
        Claims {
            iss: "hms-server".to_string(),
            sub: sub.to_string(),
            exp: 0,
            iat: 0,
            jti: "x".to_string(),
            token_kind: "access".to_string(),
            user_type: user_type.to_string(),
            username: "jdoe".to_string(),
        }
    }

    #[test]
    fn resolves_known_roles() {
        let info = AuthInformation::from_claims(&claims("42", "doctor")).unwrap();
        assert_eq!(info.account_id, 42);
        assert_eq!(info.role, UserRole::Doctor);
    }

    #[test]
    fn rejects_unknown_role_or_bad_subject() {
        assert!(AuthInformation::from_claims(&claims("42", "admin")).is_none());
        assert!(AuthInformation::from_claims(&claims("not-a-number", "doctor")).is_none());
    }
}
