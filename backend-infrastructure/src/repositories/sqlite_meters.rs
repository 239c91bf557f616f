use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use backend_domain::{DbConfig, MeterReading, MeterRepository, ProductLine};

const CREATE_DEX_METER: &str = r#"
CREATE TABLE IF NOT EXISTS dex_meter (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    machine_id TEXT NOT NULL,
    dex_datetime TEXT NOT NULL,
    machine_serial_number TEXT NOT NULL,
    value_of_paid_vends TEXT NOT NULL
)
"#;

const CREATE_DEX_LANE_METER: &str = r#"
CREATE TABLE IF NOT EXISTS dex_lane_meter (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    dex_meter_id INTEGER NOT NULL REFERENCES dex_meter(id),
    product_identifier TEXT NOT NULL CHECK (product_identifier <> ''),
    price TEXT NOT NULL,
    number_of_vends INTEGER NOT NULL CHECK (number_of_vends >= 0),
    value_of_paid_sales TEXT NOT NULL
)
"#;

const INSERT_DEX_METER: &str = "\
INSERT INTO dex_meter (machine_id, dex_datetime, machine_serial_number, value_of_paid_vends) \
VALUES (?, ?, ?, ?) RETURNING id";

const INSERT_DEX_LANE_METER: &str = "\
INSERT INTO dex_lane_meter (dex_meter_id, product_identifier, price, number_of_vends, value_of_paid_sales) \
VALUES (?, ?, ?, ?, ?)";

/// SQLite-backed meter store. Money values are bound as TEXT so the stored
/// representation stays exact and locale-free.
#[derive(Clone)]
pub struct SqliteMeterRepository {
    pool: SqlitePool,
}

impl SqliteMeterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let options: SqliteConnectOptions = config.database_url.parse()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options.create_if_missing(true))
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl MeterRepository for SqliteMeterRepository {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_DEX_METER).execute(&self.pool).await?;
        sqlx::query(CREATE_DEX_LANE_METER)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn save_reading(&self, reading: &MeterReading, lines: &[ProductLine]) -> Result<i64> {
        // The transaction rolls back on drop unless committed, so every
        // early return below leaves the store untouched.
        let mut tx = self.pool.begin().await?;

        let dex_meter_id: i64 = sqlx::query_scalar(INSERT_DEX_METER)
            .bind(&reading.machine_id)
            .bind(reading.captured_at)
            .bind(&reading.machine_serial_number)
            .bind(reading.value_of_paid_vends.to_string())
            .fetch_one(&mut *tx)
            .await?;

        // Lane rows depend on the generated meter key, so insert order is
        // mandatory; product-line order is preserved.
        for line in lines {
            sqlx::query(INSERT_DEX_LANE_METER)
                .bind(dex_meter_id)
                .bind(&line.product_identifier)
                .bind(line.price.to_string())
                .bind(i64::from(line.number_of_vends))
                .bind(line.value_of_paid_sales.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(dex_meter_id)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
