//! Conversions between JSON values and DynamoDB attribute values

use crate::error::{ItemStoreError, Result};
use crate::types::{Item, ItemData};
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Attribute map as stored in DynamoDB
pub type Attributes = HashMap<String, AttributeValue>;

/// Convert a JSON value into its DynamoDB representation
pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(to_attributes(map)),
    }
}

/// Convert a JSON object into an attribute map
pub fn to_attributes(map: &ItemData) -> Attributes {
    map.iter()
        .map(|(k, v)| (k.clone(), to_attribute(v)))
        .collect()
}

/// Convert a DynamoDB attribute value back into JSON.
///
/// String and number sets become arrays. Binary attributes are rejected;
/// nothing in this service writes them.
pub fn from_attribute(attribute: &AttributeValue) -> Result<Value> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(raw) => Value::Number(parse_number(raw)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(from_attribute)
                .collect::<Result<Vec<_>>>()?,
        ),
        AttributeValue::M(map) => Value::Object(from_attributes(map)?),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|raw| parse_number(raw).map(Value::Number))
                .collect::<Result<Vec<_>>>()?,
        ),
        other => {
            return Err(ItemStoreError::Serialization(format!(
                "unsupported attribute type: {:?}",
                other
            )))
        }
    };
    Ok(value)
}

/// Convert an attribute map back into a JSON object
pub fn from_attributes(attributes: &Attributes) -> Result<ItemData> {
    attributes
        .iter()
        .map(|(k, v)| Ok((k.clone(), from_attribute(v)?)))
        .collect()
}

/// Marshal an item into the attribute map written by `PutItem`
pub fn item_to_attributes(item: &Item) -> Result<Attributes> {
    match serde_json::to_value(item)? {
        Value::Object(map) => Ok(to_attributes(&map)),
        other => Err(ItemStoreError::Serialization(format!(
            "item did not serialize to an object: {}",
            other
        ))),
    }
}

/// Unmarshal an attribute map returned by `Query`/`Scan` into an item.
///
/// Top-level NULL attributes are treated as absent so defaults apply.
pub fn item_from_attributes(attributes: &Attributes) -> Result<Item> {
    let mut map = from_attributes(attributes)?;
    map.retain(|_, v| !v.is_null());
    Ok(serde_json::from_value(Value::Object(map))?)
}

fn parse_number(raw: &str) -> Result<Number> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(i.into());
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Ok(u.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| ItemStoreError::Serialization(format!("invalid number attribute: {}", raw)))
}
