use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::entities::{MeterReading, ProductLine};

const FIELD_DELIMITER: char = '*';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DexParseError {
    #[error("required segment '{segment}' not found")]
    MissingSegment { segment: &'static str },
    #[error("segment '{segment}' has fewer than {min_fields} fields")]
    MalformedSegment {
        segment: &'static str,
        min_fields: usize,
    },
    #[error("field {field} is not a valid number: '{raw}'")]
    InvalidNumericField { field: &'static str, raw: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDex {
    pub reading: MeterReading,
    pub product_lines: Vec<ProductLine>,
}

/// Extracts the meter reading and product lines from raw DEX file content.
///
/// Only the ID1 (machine identity), VA1 (accumulated paid vends) and
/// PA1/PA2 (per-product pair) segments are consumed; everything else in the
/// file is ignored. A malformed product pair is skipped rather than failing
/// the whole file, while a missing or malformed ID1/VA1 fails fast.
pub fn parse_dex(content: &str) -> Result<ParsedDex, DexParseError> {
    let lines: Vec<&str> = content
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .collect();

    let id1 = lines
        .iter()
        .find(|line| line.starts_with("ID1*"))
        .ok_or(DexParseError::MissingSegment { segment: "ID1" })?;
    let id1_fields: Vec<&str> = id1.split(FIELD_DELIMITER).collect();
    if id1_fields.len() < 6 {
        return Err(DexParseError::MalformedSegment {
            segment: "ID1",
            min_fields: 6,
        });
    }

    // ID101 - machine serial number (position 1)
    let machine_serial_number = id1_fields[1].to_string();
    // ID106 - machine id (position 6); the serial number stands in when the
    // field is absent or blank
    let machine_id = match id1_fields.get(6) {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => machine_serial_number.clone(),
    };

    let va1 = lines
        .iter()
        .find(|line| line.starts_with("VA1*"))
        .ok_or(DexParseError::MissingSegment { segment: "VA1" })?;
    let va1_fields: Vec<&str> = va1.split(FIELD_DELIMITER).collect();
    if va1_fields.len() < 2 {
        return Err(DexParseError::MalformedSegment {
            segment: "VA1",
            min_fields: 2,
        });
    }

    // VA101 - value of paid vends (position 1)
    let value_of_paid_vends =
        parse_implied_decimal(va1_fields[1]).ok_or_else(|| DexParseError::InvalidNumericField {
            field: "VA101",
            raw: va1_fields[1].to_string(),
        })?;

    let product_lines = extract_product_lines(&lines);

    Ok(ParsedDex {
        reading: MeterReading {
            machine_id,
            machine_serial_number,
            captured_at: Utc::now(),
            value_of_paid_vends,
        },
        product_lines,
    })
}

/// Implied-decimal convention: the transmitted value carries two assumed
/// fractional digits, so raw `135` decodes to `1.35`. Parsing is
/// locale-independent; thousands separators are rejected.
fn parse_implied_decimal(raw: &str) -> Option<Decimal> {
    let value = Decimal::from_str(raw).ok()?;
    Some(value / Decimal::ONE_HUNDRED)
}

fn extract_product_lines(lines: &[&str]) -> Vec<ProductLine> {
    let mut products = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if !line.starts_with("PA1*") {
            continue;
        }
        let pa1_fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if pa1_fields.len() < 3 {
            continue;
        }

        // PA101 - product identifier (position 1)
        let product_identifier = pa1_fields[1];
        // PA102 - unit price (position 2)
        let Some(price) = parse_implied_decimal(pa1_fields[2]) else {
            continue;
        };

        // The sales detail lives in the PA2 segment immediately after the
        // PA1; a missing or unparsable PA2 drops the pair, not the upload.
        let Some(pa2_line) = lines.get(index + 1).filter(|next| next.starts_with("PA2*")) else {
            continue;
        };
        let pa2_fields: Vec<&str> = pa2_line.split(FIELD_DELIMITER).collect();
        if pa2_fields.len() < 3 {
            continue;
        }
        // PA201 - number of vends (position 1); counts are non-negative
        let Ok(number_of_vends) = pa2_fields[1].parse::<u32>() else {
            continue;
        };
        // PA202 - value of paid sales (position 2)
        let Some(value_of_paid_sales) = parse_implied_decimal(pa2_fields[2]) else {
            continue;
        };

        products.push(ProductLine {
            product_identifier: product_identifier.to_string(),
            price,
            number_of_vends,
            value_of_paid_sales,
        });
    }
    products
}
