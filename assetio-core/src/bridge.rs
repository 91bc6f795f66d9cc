//! Dynamic value bridge
//!
//! Values arriving from a dynamically typed caller are represented as
//! `serde_json::Value`. This module converts them to and from
//! [`PropertyValue`], rejecting any kind outside the four supported
//! primitives, and offers checked `get`/`set` entry points that validate
//! every argument before the store is touched.

use crate::{AssetIoError, PropertyValue, Result, TraitsData};
use serde_json::{Map, Value};

/// Name of a dynamic value's kind, as used in error messages
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert a dynamic value to a property value.
pub fn to_property_value(value: &Value) -> Result<PropertyValue> {
    match value {
        Value::String(s) => Ok(PropertyValue::Str(s.clone())),
        Value::Bool(b) => Ok(PropertyValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(PropertyValue::Int(i))
            } else if n.is_u64() {
                Err(AssetIoError::Type(format!(
                    "integer {} is out of range for a 64-bit signed property",
                    n
                )))
            } else if let Some(x) = n.as_f64() {
                Ok(PropertyValue::Float(x))
            } else {
                Err(AssetIoError::unsupported_kind("number"))
            }
        }
        other => Err(AssetIoError::unsupported_kind(kind_name(other))),
    }
}

/// Convert a property value to a dynamic value.
///
/// Non-finite floats have no dynamic representation and fail with a type
/// error rather than turning into `null`.
pub fn from_property_value(value: &PropertyValue) -> Result<Value> {
    match value {
        PropertyValue::Str(s) => Ok(Value::String(s.clone())),
        PropertyValue::Int(i) => Ok(Value::from(*i)),
        PropertyValue::Float(x) => serde_json::Number::from_f64(*x)
            .map(Value::Number)
            .ok_or_else(|| AssetIoError::Type(format!("float {} has no dynamic representation", x))),
        PropertyValue::Bool(b) => Ok(Value::Bool(*b)),
    }
}

fn expect_str<'a>(argument: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| AssetIoError::non_string_argument(argument, kind_name(value)))
}

/// Read a property through dynamically typed arguments.
///
/// Non-string identifiers fail with a type error; a missing property is
/// `Ok(None)`.
pub fn get_trait_property(data: &TraitsData, trait_id: &Value, key: &Value) -> Result<Option<Value>> {
    let trait_id = expect_str("trait id", trait_id)?;
    let key = expect_str("property key", key)?;
    data.get_trait_property(trait_id, key)
        .map(from_property_value)
        .transpose()
}

/// Write a property through dynamically typed arguments.
///
/// All arguments are validated first, so a failure never leaves a partial
/// write behind.
pub fn set_trait_property(data: &mut TraitsData, trait_id: &Value, key: &Value, value: &Value) -> Result<()> {
    let trait_id = expect_str("trait id", trait_id)?;
    let key = expect_str("property key", key)?;
    let value = to_property_value(value)?;
    data.set_trait_property(trait_id, key, value)
}

/// Build trait data from a `{trait: {key: value}}` object.
pub fn traits_data_from_json(value: &Value) -> Result<TraitsData> {
    let traits = value
        .as_object()
        .ok_or_else(|| AssetIoError::Type(format!("traits data must be an object, got '{}'", kind_name(value))))?;

    let mut data = TraitsData::new();
    for (trait_id, properties) in traits {
        let properties = properties.as_object().ok_or_else(|| {
            AssetIoError::Type(format!(
                "properties of trait '{}' must be an object, got '{}'",
                trait_id,
                kind_name(properties)
            ))
        })?;
        data.add_trait(trait_id.as_str())?;
        for (key, value) in properties {
            data.set_trait_property(trait_id.as_str(), key.as_str(), to_property_value(value)?)?;
        }
    }
    Ok(data)
}

/// Render trait data as a `{trait: {key: value}}` object.
pub fn traits_data_to_json(data: &TraitsData) -> Result<Value> {
    let mut traits = Map::new();
    for (trait_id, properties) in data.iter() {
        let props = properties
            .iter()
            .map(|(key, value)| Ok((key.clone(), from_property_value(value)?)))
            .collect::<Result<Map<String, Value>>>()?;
        traits.insert(trait_id.clone(), Value::Object(props));
    }
    Ok(Value::Object(traits))
}
