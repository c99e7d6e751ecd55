//! Field-level reading of model output.
//!
//! Models routinely send `"rating": "4.5"` or `"price_per_night": 120`. A
//! record pulls each known field out of the raw object through [`Fields`],
//! which coerces what can be coerced. A value that cannot be coerced goes back
//! under the key it came from and ends up in the record's `extra` map, so it is
//! written out unchanged.

use serde_json::{Map, Value};

use crate::planner::trip_plan::Entry;

/// Records that can be built from an already-parsed JSON object.
pub trait FromFields: Sized {
    fn from_fields(fields: Fields) -> Self;

    fn from_object(map: Map<String, Value>) -> Self {
        Self::from_fields(Fields::new(map))
    }
}

/// The remaining keys of a JSON object while a record is being read.
#[derive(Debug, Default)]
pub struct Fields {
    map: Map<String, Value>,
}

impl Fields {
    pub fn new(map: Map<String, Value>) -> Self {
        Self { map }
    }

    /// Whatever was not consumed, including values that failed coercion.
    pub fn into_extra(self) -> Map<String, Value> {
        self.map
    }

    pub fn string(&mut self, keys: &[&str]) -> Option<String> {
        self.coerce(keys, |value| match value {
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(other),
        })
    }

    pub fn f64(&mut self, keys: &[&str]) -> Option<f64> {
        self.coerce(keys, |value| {
            let coerced = match &value {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => text.trim().parse::<f64>().ok(),
                _ => None,
            };
            coerced.filter(|raw| raw.is_finite()).ok_or(value)
        })
    }

    pub fn u32(&mut self, keys: &[&str]) -> Option<u32> {
        self.coerce(keys, |value| {
            let coerced = match &value {
                Value::Number(number) => number
                    .as_u64()
                    .or_else(|| {
                        number
                            .as_f64()
                            .filter(|raw| raw.fract() == 0.0 && *raw >= 0.0)
                            .map(|raw| raw as u64)
                    })
                    .and_then(|raw| u32::try_from(raw).ok()),
                Value::String(text) => text.trim().parse::<u32>().ok(),
                _ => None,
            };
            coerced.ok_or(value)
        })
    }

    /// Nested records must be JSON objects.
    pub fn object<T: FromFields>(&mut self, keys: &[&str]) -> Option<T> {
        self.coerce(keys, |value| match value {
            Value::Object(map) => Ok(T::from_object(map)),
            other => Err(other),
        })
    }

    /// `null` and missing both read as an empty sequence. A lone value that is
    /// not an array is read as a one-element sequence.
    pub fn sequence<T: FromFields>(&mut self, key: &str) -> Vec<Entry<T>> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.into_iter().map(Entry::from_value).collect(),
            Some(other) => vec![Entry::from_value(other)],
        }
    }

    /// The first present key wins. Other spellings stay in `extra`.
    fn coerce<T>(
        &mut self,
        keys: &[&str],
        convert: impl FnOnce(Value) -> Result<T, Value>,
    ) -> Option<T> {
        let (key, value) = keys.iter().find_map(|key| self.map.remove_entry(*key))?;
        if value.is_null() {
            return None;
        }
        match convert(value) {
            Ok(coerced) => Some(coerced),
            Err(raw) => {
                self.map.insert(key, raw);
                None
            }
        }
    }
}
