//! Field-name to value mapping submitted for one document.

use crate::error::{FormError, FormResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Values collected from one form submission.
///
/// Values are trimmed on the way in, matching what the browser form did with every input. A
/// field holding only whitespace is therefore stored as an empty string and treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field` to the trimmed `value`, returning the previous value if any.
    pub fn insert(&mut self, field: impl Into<String>, value: impl AsRef<str>) -> Option<String> {
        self.0.insert(field.into(), value.as_ref().trim().to_owned())
    }

    /// Builder-style [`FormData::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.insert(field, value);
        self
    }

    /// Returns the value of `field` when it is present and not blank.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_filled(&self, field: &str) -> bool {
        self.value(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a flat JSON or YAML object from `path`.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML (which also accepts
    /// plain JSON). Non-string scalars such as `idade: 4` are accepted and kept as text.
    pub fn from_file(path: &Path) -> FormResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(FormError::FileRead)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let raw: BTreeMap<String, serde_json::Value> =
                serde_json::from_str(&contents).map_err(FormError::Deserialization)?;
            Ok(raw
                .into_iter()
                .map(|(k, v)| (k, json_scalar_to_string(v)))
                .collect())
        } else {
            let raw: BTreeMap<String, serde_yaml::Value> =
                serde_yaml::from_str(&contents).map_err(FormError::YamlDeserialization)?;
            Ok(raw
                .into_iter()
                .map(|(k, v)| (k, yaml_scalar_to_string(v)))
                .collect())
        }
    }
}

fn json_scalar_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn yaml_scalar_to_string(value: serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}

impl From<BTreeMap<String, String>> for FormData {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        for (k, v) in iter {
            data.insert(k, v);
        }
        data
    }
}
