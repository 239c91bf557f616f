use tracing::info;

use backend_domain::services::dex_parser;

use crate::{AppError, AppState};

/// Parses raw DEX file content and persists the reading together with its
/// product lines as one atomic unit, returning the generated meter id.
pub async fn process_dex_upload(state: &AppState, content: &str) -> Result<i64, AppError> {
    let parsed = dex_parser::parse_dex(content).map_err(|err| {
        state.metrics.record_upload_rejected();
        AppError::Parse(err)
    })?;

    let dex_meter_id = state
        .meter_repo
        .save_reading(&parsed.reading, &parsed.product_lines)
        .await
        .map_err(|err| {
            state.metrics.record_storage_error();
            AppError::Internal(err)
        })?;

    state.metrics.record_upload(parsed.product_lines.len());
    info!(
        dex_meter_id,
        machine_id = %parsed.reading.machine_id,
        lane_meters = parsed.product_lines.len(),
        "dex file persisted"
    );
    Ok(dex_meter_id)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use backend_domain::{MeterReading, MeterRepository, ProductLine, RuntimeConfig};

    use super::*;
    use crate::Metrics;

    #[derive(Default)]
    struct RecordingRepo {
        saved: Mutex<Vec<(MeterReading, Vec<ProductLine>)>>,
        fail: bool,
    }

    #[async_trait]
    impl MeterRepository for RecordingRepo {
        async fn ensure_schema(&self) -> anyhow::Result<()> {
            Ok(())
        }

        async fn save_reading(
            &self,
            reading: &MeterReading,
            lines: &[ProductLine],
        ) -> anyhow::Result<i64> {
            if self.fail {
                anyhow::bail!("insert failed");
            }
            let mut saved = self.saved.lock().unwrap();
            saved.push((reading.clone(), lines.to_vec()));
            Ok(saved.len() as i64)
        }

        async fn ping(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn test_state(repo: Arc<RecordingRepo>) -> AppState {
        AppState {
            config: RuntimeConfig {
                bind_addr: "127.0.0.1:0".to_string(),
                auth_username: "vendsys".to_string(),
                auth_password: "secret".to_string(),
                max_body_bytes: 1024 * 1024,
                request_timeout_seconds: 5,
            },
            meter_repo: repo,
            metrics: Arc::new(Metrics::default()),
        }
    }

    const VALID_DEX: &str = "ID1*1234567890*2*3*4*5*TEST_MACHINE\nVA1*135\nPA1*COLA*100\nPA2*5*500";

    #[tokio::test]
    async fn upload_parses_and_persists() {
        let repo = Arc::new(RecordingRepo::default());
        let state = test_state(repo.clone());

        let id = process_dex_upload(&state, VALID_DEX).await.expect("upload");
        assert_eq!(id, 1);

        let saved = repo.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        let (reading, lines) = &saved[0];
        assert_eq!(reading.machine_id, "TEST_MACHINE");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_identifier, "COLA");
    }

    #[tokio::test]
    async fn parse_failure_never_reaches_storage() {
        let repo = Arc::new(RecordingRepo::default());
        let state = test_state(repo.clone());

        let err = process_dex_upload(&state, "VA1*135")
            .await
            .expect_err("missing ID1");
        assert!(matches!(err, AppError::Parse(_)));
        assert!(repo.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_internal() {
        let repo = Arc::new(RecordingRepo {
            fail: true,
            ..RecordingRepo::default()
        });
        let state = test_state(repo);

        let err = process_dex_upload(&state, VALID_DEX)
            .await
            .expect_err("storage failure");
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn repeated_upload_is_not_deduplicated() {
        let repo = Arc::new(RecordingRepo::default());
        let state = test_state(repo.clone());

        let first = process_dex_upload(&state, VALID_DEX).await.expect("first");
        let second = process_dex_upload(&state, VALID_DEX).await.expect("second");
        assert_ne!(first, second);
        assert_eq!(repo.saved.lock().unwrap().len(), 2);
    }
}
