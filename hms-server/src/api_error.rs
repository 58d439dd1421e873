use actix_web::{HttpResponse, ResponseError};
use database::hms_dbprovider::DbError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PermissionDenied(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({ "error": self.to_string() });
        match self {
            ApiError::Validation(_) => HttpResponse::BadRequest().json(body),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(body),
            ApiError::PermissionDenied(_) => HttpResponse::Forbidden().json(body),
            ApiError::Conflict(_) => HttpResponse::Conflict().json(body),
            ApiError::Internal(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            DbError::Conflict(msg) => ApiError::Conflict(msg),
            DbError::Validation(msg) => ApiError::Validation(msg),
            DbError::AlreadyExists(msg) => ApiError::Validation(msg),
            DbError::DatabaseError(err) => ApiError::Internal(err.to_string()),
            DbError::TransactionFailed(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn variants_map_to_http_statuses() {
        let cases = [
            (
                ApiError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                ApiError::PermissionDenied("no".into()),
                StatusCode::FORBIDDEN,
            ),
            (ApiError::Conflict("busy".into()), StatusCode::CONFLICT),
            (
                ApiError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.error_response().status(), status);
        }
    }

    #[test]
    fn db_conflict_stays_a_conflict() {
        let err: ApiError = DbError::Conflict("Bed is already occupied".into()).into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn db_not_found_names_the_entity() {
        let err: ApiError = DbError::NotFound("Doctor").into();
        assert_eq!(err.to_string(), "Doctor not found");
    }
}
