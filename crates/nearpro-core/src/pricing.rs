//! Price-map normalization.
//!
//! Professionals store their price list as a JSON object keyed by service
//! name. Each entry is either a bare number (`"Cut": 15000`) or a detailed
//! object (`"Cut": {"price": 15000, "duration": 45}`). Search only needs the
//! amount, so every entry is reduced to a bare [`Decimal`] here.
//!
//! Amounts must fit [`Decimal`]: anything above [`Decimal::MAX`] (about
//! 7.9e28) is treated as unparseable and dropped, while positive values too
//! small for its 28 fractional digits read as zero.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// One parsed entry of a professional's price map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceEntry {
    Bare(Decimal),
    Detailed {
        amount: Decimal,
        duration_minutes: Option<u32>,
    },
}

impl PriceEntry {
    /// Interpret a raw stored value. Returns `None` for anything that is
    /// neither a nonnegative number nor an object with a nonnegative numeric
    /// `price` field.
    #[must_use]
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => decimal_from_number(n).map(Self::Bare),
            Value::Object(fields) => {
                let amount = fields.get("price").and_then(|p| match p {
                    Value::Number(n) => decimal_from_number(n),
                    _ => None,
                })?;
                let duration_minutes = fields
                    .get("duration")
                    .and_then(Value::as_u64)
                    .and_then(|d| u32::try_from(d).ok());
                Some(Self::Detailed {
                    amount,
                    duration_minutes,
                })
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Bare(amount) | Self::Detailed { amount, .. } => *amount,
        }
    }
}

/// Reduce a stored price map to service-name → amount.
///
/// Entries that fail [`PriceEntry::parse`] are dropped rather than failing the
/// whole record. A value that is not a JSON object yields an empty map.
#[must_use]
pub fn normalize_price_map(raw: &Value) -> BTreeMap<String, Decimal> {
    let Some(entries) = raw.as_object() else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter_map(|(service, value)| {
            PriceEntry::parse(value).map(|entry| (service.clone(), entry.amount()))
        })
        .collect()
}

/// Cheapest amount in a normalized map, or `None` when the map is empty.
#[must_use]
pub fn min_price(prices: &BTreeMap<String, Decimal>) -> Option<Decimal> {
    prices.values().min().copied()
}

fn decimal_from_number(n: &Number) -> Option<Decimal> {
    let raw = n.to_string();
    match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        Ok(amount) => (!amount.is_sign_negative()).then_some(amount),
        // Below Decimal's smallest step; out-of-range magnitudes stay `None`.
        Err(_) => n
            .as_f64()
            .is_some_and(|v| (0.0..1.0).contains(&v))
            .then_some(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_number_parses() {
        assert_eq!(
            PriceEntry::parse(&json!(15000)),
            Some(PriceEntry::Bare(Decimal::from(15_000)))
        );
    }

    #[test]
    fn detailed_entry_keeps_duration() {
        assert_eq!(
            PriceEntry::parse(&json!({"price": 100, "duration": 30})),
            Some(PriceEntry::Detailed {
                amount: Decimal::from(100),
                duration_minutes: Some(30),
            })
        );
    }

    #[test]
    fn detailed_entry_normalizes_to_amount() {
        let normalized = normalize_price_map(&json!({"Cut": {"price": 100, "duration": 30}}));
        assert_eq!(normalized.get("Cut"), Some(&Decimal::from(100)));
    }

    #[test]
    fn fractional_amounts_are_exact() {
        let entry = PriceEntry::parse(&json!(99.5)).expect("parse");
        assert_eq!(entry.amount(), Decimal::new(995, 1));
    }

    #[test]
    fn amount_below_decimal_precision_reads_as_zero() {
        let entry = PriceEntry::parse(&json!(1e-30)).expect("tiny amount parses");
        assert_eq!(entry.amount(), Decimal::ZERO);
    }

    #[test]
    fn amount_beyond_decimal_range_is_dropped() {
        assert_eq!(PriceEntry::parse(&json!(1e300)), None);

        let normalized = normalize_price_map(&json!({"Cut": 1e300, "Trim": 5000}));
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized["Trim"], Decimal::from(5000));
    }

    #[test]
    fn unparseable_entries_are_dropped() {
        let normalized = normalize_price_map(&json!({
            "Cut": "15000",
            "Beard": {"duration": 20},
            "Color": {"price": "cheap"},
            "Trim": 8000,
            "Wash": null,
            "Refund": -10,
        }));
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.get("Trim"), Some(&Decimal::from(8_000)));
    }

    #[test]
    fn non_object_map_is_empty() {
        assert!(normalize_price_map(&json!([1, 2, 3])).is_empty());
        assert!(normalize_price_map(&Value::Null).is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_price_map(&json!({
            "Cut": {"price": 15000, "duration": 45},
            "Trim": 8000,
        }));
        let as_json: serde_json::Map<String, Value> = once
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.to_string().parse::<u64>().unwrap())))
            .collect();
        let twice = normalize_price_map(&Value::Object(as_json));
        assert_eq!(once, twice);
    }

    #[test]
    fn min_price_picks_cheapest() {
        let normalized = normalize_price_map(&json!({"Cut": 15000, "Trim": 8000}));
        assert_eq!(min_price(&normalized), Some(Decimal::from(8_000)));
        assert_eq!(min_price(&BTreeMap::new()), None);
    }
}
