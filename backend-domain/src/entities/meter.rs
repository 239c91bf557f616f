use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// One machine's aggregate report extracted from a DEX file: identity plus
/// the accumulated value of paid vends. The file format carries no reliable
/// datetime segment, so `captured_at` is stamped at processing time.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterReading {
    pub machine_id: String,
    pub machine_serial_number: String,
    pub captured_at: DateTime<Utc>,
    pub value_of_paid_vends: Decimal,
}

/// One product slot's sales detail within a meter reading. Money values use
/// two decimal places (the wire format transmits them as implied decimals).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLine {
    pub product_identifier: String,
    pub price: Decimal,
    pub number_of_vends: u32,
    pub value_of_paid_sales: Decimal,
}
