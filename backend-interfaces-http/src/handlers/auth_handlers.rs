use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::auth_commands;
use backend_application::dtos::AuthenticationResponse;
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::parse_basic_credentials;

pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthenticationResponse>, HttpError> {
    let (username, password) = parse_basic_credentials(&headers).ok_or(HttpError::Unauthorized)?;
    auth_commands::validate_credentials(&state.config, &username, &password)?;
    Ok(Json(AuthenticationResponse {
        message: "authentication successful".to_string(),
    }))
}
