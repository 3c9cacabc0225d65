use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::AppState;
use crate::error::{AppError, AuthError};
use super::{cookie, hasher};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn validate_register(req: &RegisterRequest) -> Result<(), AppError> {
    if !req.email.contains('@') {
        return Err(AppError::ValidationError("email is not valid".into()));
    }
    if req.username.is_empty() {
        return Err(AppError::ValidationError("username must not be empty".into()));
    }
    if req.password.len() < 6 {
        return Err(AppError::ValidationError(
            "password must be at least 6 characters".into(),
        ));
    }
    Ok(())
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    validate_register(&req)?;
    info!("Received registration request for email: {}", req.email);

    // Check-then-set: fine for a single-process demo, see DESIGN.md
    if state.users.get_user(&req.email).await?.is_some() {
        warn!("Registration rejected, email already taken: {}", req.email);
        return Err(AuthError::AlreadyRegistered.into());
    }

    state
        .users
        .create_user(&req.email, &req.username, &req.password)
        .await?;
    info!("Registration successful for email: {}", req.email);

    Ok(HttpResponse::Created().json(json!({
        "ok": true,
        "email": req.email,
        "username": req.username,
    })))
}

pub async fn login_cookie(
    body: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", body.email);

    let user = state
        .users
        .get_user(&body.email)
        .await?
        .ok_or(AuthError::UnknownUser)?;

    // Always goes through the hasher, never a direct string compare;
    // bcrypt runs on the blocking pool
    let password = body.password.clone();
    let digest = user.password_hash.clone();
    let verified = web::block(move || hasher::verify(&password, &digest)).await?;
    if !verified {
        warn!("Login failed for email: {}", body.email);
        return Err(AuthError::InvalidCredentials.into());
    }

    let session_id = state.sessions.create(&user.email, &user.username).await?;
    info!("Login successful for email: {}", user.email);

    let cookie = cookie::session_cookie(
        session_id,
        state.config.session.ttl_seconds,
        state.config.session.cookie_secure,
    );
    Ok(HttpResponse::Ok().cookie(cookie).json(json!({
        "ok": true,
        "email": user.email,
        "username": user.username,
    })))
}

pub async fn check_cookie(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    // A missing cookie and a dead session look the same to the client
    let session_id = cookie::session_id(&req).ok_or(AuthError::NotAuthenticated)?;
    let session = state
        .sessions
        .read(&session_id)
        .await?
        .ok_or(AuthError::NotAuthenticated)?;

    Ok(HttpResponse::Ok().json(json!({
        "ok": true,
        "session": session,
    })))
}

pub async fn logout_cookie(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    // Logout never fails: a store outage is logged, not surfaced, so
    // the client-side cookie is always cleared
    if let Some(session_id) = cookie::session_id(&req) {
        match state.sessions.delete(&session_id).await {
            Ok(()) => info!("Session deleted on logout"),
            Err(e) => warn!("Failed to delete session on logout: {}", e),
        }
    }

    // Clear the cookie whether or not a session existed
    Ok(HttpResponse::Ok()
        .cookie(cookie::removal_cookie())
        .json(json!({ "ok": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_register_accepts_valid_input() {
        assert!(validate_register(&request("a@b.com", "alice", "secret1")).is_ok());
    }

    #[test]
    fn test_validate_register_rejects_bad_input() {
        assert!(validate_register(&request("not-an-email", "alice", "secret1")).is_err());
        assert!(validate_register(&request("a@b.com", "", "secret1")).is_err());
        assert!(validate_register(&request("a@b.com", "alice", "short")).is_err());
    }
}
