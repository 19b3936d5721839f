//! Conversion between DynamoDB attribute values and JSON values.
//!
//! Numeric attributes (`N`) arrive as arbitrary-precision decimal strings.
//! They are parsed through [`rust_decimal::Decimal`] and emitted as plain
//! JSON numbers; values without a fractional part stay integral.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use super::{ProductRecord, Result, StoreError};

/// Converts a stored item into a JSON product record.
pub fn item_to_record(item: HashMap<String, AttributeValue>) -> Result<ProductRecord> {
    let mut record = Map::with_capacity(item.len());
    for (name, attr) in item {
        record.insert(name, attribute_to_value(&attr)?);
    }
    Ok(record)
}

/// Converts a JSON product record into a storable item.
pub fn record_to_item(record: &ProductRecord) -> Result<HashMap<String, AttributeValue>> {
    record
        .iter()
        .map(|(name, value)| Ok((name.clone(), value_to_attribute(value)?)))
        .collect()
}

pub fn attribute_to_value(attr: &AttributeValue) -> Result<Value> {
    match attr {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => number_to_value(n),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(list) => list
            .iter()
            .map(attribute_to_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        AttributeValue::M(map) => {
            let mut obj = Map::with_capacity(map.len());
            for (name, nested) in map {
                obj.insert(name.clone(), attribute_to_value(nested)?);
            }
            Ok(Value::Object(obj))
        }
        AttributeValue::Ss(set) => Ok(Value::Array(
            set.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(set) => set
            .iter()
            .map(|n| number_to_value(n))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Err(StoreError::Conversion(format!(
            "unsupported attribute type: {other:?}"
        ))),
    }
}

pub fn value_to_attribute(value: &Value) -> Result<AttributeValue> {
    match value {
        Value::Null => Ok(AttributeValue::Null(true)),
        Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
        Value::Number(n) => Ok(AttributeValue::N(n.to_string())),
        Value::String(s) => Ok(AttributeValue::S(s.clone())),
        Value::Array(list) => list
            .iter()
            .map(value_to_attribute)
            .collect::<Result<Vec<_>>>()
            .map(AttributeValue::L),
        Value::Object(map) => {
            let mut item = HashMap::with_capacity(map.len());
            for (name, nested) in map {
                item.insert(name.clone(), value_to_attribute(nested)?);
            }
            Ok(AttributeValue::M(item))
        }
    }
}

fn number_to_value(n: &str) -> Result<Value> {
    if let Ok(int) = n.parse::<i64>() {
        return Ok(Value::Number(Number::from(int)));
    }

    // Decimal keeps full precision where it can, but the table accepts
    // magnitudes beyond its 28-digit range; those still have to come out as
    // floats rather than errors.
    Decimal::from_str(n)
        .ok()
        .and_then(|decimal| decimal.to_f64())
        .or_else(|| n.parse::<f64>().ok())
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| {
            StoreError::Conversion(format!("invalid numeric attribute '{n}'"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decimal_attribute_becomes_plain_json_number() {
        let value = attribute_to_value(&AttributeValue::N("19.99".into())).unwrap();
        assert_eq!(value, json!(19.99));
        assert!(value.is_f64());
    }

    #[test]
    fn integral_attribute_stays_integral() {
        let value = attribute_to_value(&AttributeValue::N("10".into())).unwrap();
        assert_eq!(value, json!(10));
        assert!(value.is_i64());
    }

    #[test]
    fn large_magnitude_numbers_fall_back_to_float() {
        // Beyond Decimal's 28-digit range but well within what the table
        // stores; a record this API wrote itself must read back.
        let value = attribute_to_value(&AttributeValue::N("1e+30".into())).unwrap();
        assert_eq!(value, json!(1e30));

        let digits = "99999999999999999999999999999999999999";
        let value = attribute_to_value(&AttributeValue::N(digits.into())).unwrap();
        assert_eq!(value, json!(digits.parse::<f64>().unwrap()));
    }

    #[test]
    fn large_numbers_round_trip_through_an_item() {
        let attr = value_to_attribute(&json!(1e30)).unwrap();
        assert!(matches!(&attr, AttributeValue::N(n) if n == "1e30"));
        assert_eq!(attribute_to_value(&attr).unwrap(), json!(1e30));
    }

    #[test]
    fn invalid_number_is_a_conversion_error() {
        let err = attribute_to_value(&AttributeValue::N("not-a-number".into())).unwrap_err();
        assert!(matches!(err, StoreError::Conversion(_)));
    }

    #[test]
    fn record_round_trips_through_item() {
        let record = json!({
            "productId": "widget-1",
            "name": "Widget",
            "price": 19.99,
            "stock": 42,
            "active": true,
            "tags": ["a", "b"],
            "dimensions": { "width": 3, "height": 4.5 },
        });
        let Value::Object(record) = record else { unreachable!() };

        let item = record_to_item(&record).unwrap();
        assert!(matches!(item.get("productId"), Some(AttributeValue::S(s)) if s == "widget-1"));
        assert!(matches!(item.get("price"), Some(AttributeValue::N(n)) if n == "19.99"));

        let back = item_to_record(item).unwrap();
        assert_eq!(Value::Object(back), Value::Object(record));
    }

    #[test]
    fn string_set_maps_to_array() {
        let value =
            attribute_to_value(&AttributeValue::Ss(vec!["x".into(), "y".into()])).unwrap();
        assert_eq!(value, json!(["x", "y"]));
    }
}
