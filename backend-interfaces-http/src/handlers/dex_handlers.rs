use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use tracing::error;

use backend_application::commands::dex_commands;
use backend_application::dtos::DexUploadResponse;
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize;

const ALLOWED_EXTENSIONS: [&str; 2] = [".txt", ".dex"];

pub async fn upload_dex(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<DexUploadResponse>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }

    let field = multipart
        .next_field()
        .await
        .map_err(|err| HttpError::BadRequest(err.to_string()))?
        .ok_or_else(|| HttpError::BadRequest("no file provided".to_string()))?;

    let file_name = field.file_name().unwrap_or_default().to_string();
    if !has_allowed_extension(&file_name) {
        return Err(HttpError::BadRequest(
            "only .txt and .dex files are accepted".to_string(),
        ));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|err| HttpError::BadRequest(err.to_string()))?;
    if bytes.is_empty() {
        return Err(HttpError::BadRequest("no file provided".to_string()));
    }
    let content = String::from_utf8(bytes.to_vec())
        .map_err(|_| HttpError::BadRequest("file content is not valid UTF-8".to_string()))?;

    let dex_meter_id = dex_commands::process_dex_upload(&state, &content)
        .await
        .map_err(|err| {
            error!("failed to process dex upload: {}", err);
            HttpError::from(err)
        })?;

    Ok(Json(DexUploadResponse {
        message: "DEX file processed successfully".to_string(),
        dex_meter_id,
    }))
}

fn has_allowed_extension(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
