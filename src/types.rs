use crate::error::{TabularError, TabularResult};
use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

//==============================================================================
// Cell Values
//==============================================================================

/// A single cell value, as written to or read from a worksheet
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean cell
    Boolean(bool),
    /// Numeric cell (integers are stored as f64, like Excel does)
    Number(f64),
    /// Text cell
    Text(String),
    /// Blank cell
    Empty,
}

impl CellValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Boolean(_) => "Boolean",
            CellValue::Number(_) => "Number",
            CellValue::Text(_) => "Text",
            CellValue::Empty => "Empty",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert a JSON value into a cell. Arrays and objects have no cell
    /// representation and are rejected.
    pub fn from_json(field: &str, value: &Value) -> TabularResult<Self> {
        match value {
            Value::Null => Ok(CellValue::Empty),
            Value::Bool(b) => Ok(CellValue::Boolean(*b)),
            Value::Number(n) => n.as_f64().map(CellValue::Number).ok_or_else(|| {
                TabularError::UnsupportedValue {
                    field: field.to_string(),
                    kind: format!("number {} out of range", n),
                }
            }),
            Value::String(s) => Ok(CellValue::Text(s.clone())),
            Value::Array(_) => Err(TabularError::UnsupportedValue {
                field: field.to_string(),
                kind: "array".to_string(),
            }),
            Value::Object(_) => Err(TabularError::UnsupportedValue {
                field: field.to_string(),
                kind: "object".to_string(),
            }),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Boolean(b) => Value::Bool(*b),
            CellValue::Number(n) => match as_integer(*n) {
                Some(i) => Value::from(i),
                // NaN and infinities have no JSON form
                None => serde_json::Number::from_f64(*n)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            },
            CellValue::Text(s) => Value::String(s.clone()),
            CellValue::Empty => Value::Null,
        }
    }
}

/// Integral f64 within i64 range, so `30.0` serializes as `30`.
/// `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
pub(crate) fn as_integer(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) => match as_integer(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

//==============================================================================
// Records
//==============================================================================

/// One data row: field name → cell value, in column order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, CellValue>);

/// An ordered sequence of records sharing a column set
pub type TabularDocument = Vec<Record>;

impl Record {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert a value. An existing field keeps its position and gets the new value.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<CellValue>,
    ) -> Option<CellValue> {
        self.0.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.0.get(field)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a record from any value that serializes to a flat JSON object.
    /// Field order follows the serialized order (declaration order for structs).
    pub fn from_serializable<T: Serialize + ?Sized>(item: &T) -> TabularResult<Self> {
        let value =
            serde_json::to_value(item).map_err(|e| TabularError::InvalidRecord(e.to_string()))?;

        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(TabularError::InvalidRecord(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut record = Record::new();
        for (field, value) in &map {
            let cell = CellValue::from_json(field, value)?;
            record.insert(field.clone(), cell);
        }
        Ok(record)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Map this record into a typed value
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> TabularResult<T> {
        serde_json::from_value(self.to_json())
            .map_err(|e| TabularError::FileProcessing(e.to_string()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a CellValue);
    type IntoIter = indexmap::map::Iter<'a, String, CellValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Header row for a set of records: every key, in order of first appearance.
/// The first record's keys always lead, in their own order.
pub fn header_row(records: &[Record]) -> Vec<String> {
    let mut headers: IndexSet<&str> = IndexSet::new();
    for record in records {
        headers.extend(record.keys());
    }
    headers.into_iter().map(str::to_string).collect()
}
