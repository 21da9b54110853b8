//! Field-name mapping from raw input records to items.
//!
//! Input records are arbitrary JSON objects. [`FieldMap`] names the record
//! fields that hold each item attribute; [`RecordMapper`] is the validated,
//! resolved form built once at construction and used for every record.

use crate::domain::error::{Result, TickboxError};
use crate::domain::StateValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Names of the record fields holding each item attribute.
///
/// Defaults to `id`, `label`, `value`, `optgroup` and `disabled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub key_field: String,
    pub label_field: String,
    pub value_field: String,
    #[serde(alias = "optgroup_field")]
    pub group_field: String,
    pub disabled_field: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            key_field: "id".to_string(),
            label_field: "label".to_string(),
            value_field: "value".to_string(),
            group_field: "optgroup".to_string(),
            disabled_field: "disabled".to_string(),
        }
    }
}

/// Typed reader for one record field.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldAccessor {
    name: String,
}

impl FieldAccessor {
    fn resolve(role: &str, name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TickboxError::Config(format!("field map entry `{role}` is empty")));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    fn raw<'a>(&self, record: &'a Map<String, Value>) -> Option<&'a Value> {
        record.get(&self.name).filter(|v| !v.is_null())
    }

    /// Reads the field as text, coercing scalars to their string form.
    fn text(&self, record: &Map<String, Value>) -> Option<String> {
        self.raw(record).map(coerce_to_string)
    }

    /// Reads the field as a candidate state value.
    ///
    /// Only integral numbers qualify; anything else is treated as absent.
    fn state(&self, record: &Map<String, Value>) -> Option<StateValue> {
        let value = self.raw(record)?;
        value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| f as i64)
            })
            .map(StateValue)
    }

    /// Reads the field as a flag using loose truthiness.
    fn flag(&self, record: &Map<String, Value>) -> bool {
        self.raw(record).is_some_and(is_truthy)
    }
}

/// A record after field mapping, before store defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRecord {
    pub key: String,
    pub label: String,
    /// Raw state value as found in the record, not yet checked against the state set.
    pub value: Option<StateValue>,
    /// Group name, `None` when absent or empty.
    pub group: Option<String>,
    pub disabled: bool,
}

/// Field map resolved into typed accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMapper {
    key: FieldAccessor,
    label: FieldAccessor,
    value: FieldAccessor,
    group: FieldAccessor,
    disabled: FieldAccessor,
}

impl RecordMapper {
    /// Resolves and validates a field map.
    ///
    /// # Errors
    ///
    /// Returns [`TickboxError::Config`] if a field name is empty or two roles
    /// share the same field name.
    ///
    /// # Example
    ///
    /// ```
    /// use tickbox::store::{FieldMap, RecordMapper};
    /// use serde_json::json;
    ///
    /// let mapper = RecordMapper::new(&FieldMap::default())?;
    /// let record = json!({"id": 5, "label": "X"});
    /// let mapped = mapper.map(record.as_object().unwrap());
    /// assert_eq!(mapped.key, "5");
    /// # Ok::<(), tickbox::TickboxError>(())
    /// ```
    pub fn new(fields: &FieldMap) -> Result<Self> {
        let mapper = Self {
            key: FieldAccessor::resolve("key_field", &fields.key_field)?,
            label: FieldAccessor::resolve("label_field", &fields.label_field)?,
            value: FieldAccessor::resolve("value_field", &fields.value_field)?,
            group: FieldAccessor::resolve("group_field", &fields.group_field)?,
            disabled: FieldAccessor::resolve("disabled_field", &fields.disabled_field)?,
        };

        let names = [
            &mapper.key.name,
            &mapper.label.name,
            &mapper.value.name,
            &mapper.group.name,
            &mapper.disabled.name,
        ];
        for (idx, name) in names.iter().enumerate() {
            if names[..idx].contains(name) {
                return Err(TickboxError::Config(format!(
                    "field `{name}` is mapped to more than one item attribute"
                )));
            }
        }

        Ok(mapper)
    }

    /// Maps a record into its item attributes.
    ///
    /// Missing text fields become empty strings; a missing key is logged since
    /// every keyless record collapses onto the same entry.
    #[must_use]
    pub fn map(&self, record: &Map<String, Value>) -> MappedRecord {
        let key = self.key.text(record).unwrap_or_else(|| {
            tracing::warn!(field = %self.key.name, "record has no key, using empty key");
            String::new()
        });

        MappedRecord {
            key,
            label: self.label.text(record).unwrap_or_default(),
            value: self.value.state(record),
            group: self.group.text(record).filter(|g| !g.is_empty()),
            disabled: self.disabled.flag(record),
        }
    }
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) if f.fract() == 0.0 && f.is_finite() => format!("{f:.0}"),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
