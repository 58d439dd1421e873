use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use slog::{error, info};

use common::mailer::NotificationPublisher;
use common::validation::SignupRequest;
use common::{auth_token, mailer, password};
use database::entities::UserRole;
use database::hms_dbprovider::{HmsDbProvider, NewAccount};

use crate::api_error::ApiError;
use crate::AppState;

#[post("/signup")]
pub(crate) async fn signup(
    app_state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let request = payload.into_inner();

    request.validate().map_err(ApiError::Validation)?;
    let role = UserRole::parse(&request.normalized_role())
        .ok_or_else(|| ApiError::Validation("unknown user_type".to_string()))?;

    if app_state.db.username_exists(&request.username).await? {
        return Err(ApiError::Validation(
            "A user with this username already exists.".to_string(),
        ));
    }

    let password_hash = password::hash_password(&request.password)
        .map_err(|e| ApiError::Internal(format!("Failed to hash credential: {}", e)))?;
    let activation_token = auth_token::generate_activation_token();

    // Account + activation profile + doctor/patient row, all-or-nothing.
    let account = app_state
        .db
        .create_account(&NewAccount {
            username: request.username.clone(),
            email: request.email.clone(),
            password_hash,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            role,
            activation_token: activation_token.clone(),
        })
        .await?;

    info!(
        log,
        "signup created account id:{} username:{} role:{}", account.id, account.username, role
    );

    let (subject, body) = mailer::activation_mail(&app_state.frontend_url, &activation_token);
    if let Err(e) = app_state.notifier.send(&request.email, &subject, &body).await {
        error!(log, "Failed to send activation mail: {}", e);
        return Err(ApiError::Internal(format!(
            "Signup failed: activation mail could not be sent: {}",
            e
        )));
    }

    Ok(HttpResponse::Created().json(json!({
        "message": "Signup successful! Please check your email to activate your account.",
        "user_type": role.as_str(),
    })))
}

#[get("/activate/{activation_token}")]
pub(crate) async fn activate_account(
    app_state: web::Data<AppState>,
    activation_token: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let token = activation_token.into_inner();

    let account = app_state.db.activate_account(&token).await?;
    info!(log, "activated account id:{}", account.id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Account activated successfully."
    })))
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    username: String,
    password: String,
}

#[post("/login")]
pub(crate) async fn login(
    app_state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let request = payload.into_inner();

    if request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required.".to_string(),
        ));
    }

    let account = app_state
        .db
        .get_account_by_username(&request.username)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if !password::verify_password(&request.password, &account.password_hash) {
        return Err(ApiError::Validation("Invalid credentials".to_string()));
    }

    if !account.is_active {
        return Err(ApiError::PermissionDenied(
            "Account inactive. Please confirm your email.".to_string(),
        ));
    }

    let tokens = auth_token::issue_tokens(
        &app_state.auth,
        account.id,
        &account.username,
        account.role.as_str(),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to issue session tokens: {}", e)))?;

    info!(log, "login account id:{} username:{}", account.id, account.username);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful!",
        "username": account.username,
        "email": account.email,
        "user_type": account.role.as_str(),
        "access": tokens.access,
        "refresh": tokens.refresh,
    })))
}
