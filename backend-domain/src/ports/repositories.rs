use async_trait::async_trait;

use crate::entities::{MeterReading, ProductLine};

#[async_trait]
pub trait MeterRepository: Send + Sync {
    async fn ensure_schema(&self) -> anyhow::Result<()>;

    /// Persists one reading and its product lines as a single atomic unit
    /// and returns the generated meter id. A failed insert must leave no
    /// rows behind; storage errors propagate unmodified.
    async fn save_reading(
        &self,
        reading: &MeterReading,
        lines: &[ProductLine],
    ) -> anyhow::Result<i64>;

    async fn ping(&self) -> anyhow::Result<()>;
}
