use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DexUploadResponse {
    pub message: String,
    pub dex_meter_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AuthenticationResponse {
    pub message: String,
}
