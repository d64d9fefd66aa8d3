use std::collections::BTreeMap;
use std::iter::FromIterator;
use std::path::Path;

use emx_core::{EmxError, ErrorInfo};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::report::EmittanceReport;

fn serde_error(code: &str, err: impl ToString) -> EmxError {
    EmxError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into JSON bytes with sorted object keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, EmxError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json_write", err))?;
    Ok(bytes)
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, EmxError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json_deserialize", err))
}

/// Deserializes a value from YAML bytes.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, EmxError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml_deserialize", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, EmxError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml_serialize", err))
}

/// Serializes an emittance report into indented JSON.
pub fn report_to_json(report: &EmittanceReport) -> Result<String, EmxError> {
    serde_json::to_string_pretty(report).map_err(|err| serde_error("report_serialize", err))
}

/// Deserializes an emittance report from JSON text.
pub fn report_from_json(json: &str) -> Result<EmittanceReport, EmxError> {
    serde_json::from_str(json).map_err(|err| serde_error("report_deserialize", err))
}

/// Writes text to disk.
pub fn write_text(path: &Path, text: &str) -> Result<(), EmxError> {
    std::fs::write(path, text).map_err(|err| {
        EmxError::Serde(
            ErrorInfo::new("file_write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}

/// Reads text from disk.
pub fn read_text(path: &Path) -> Result<String, EmxError> {
    std::fs::read_to_string(path).map_err(|err| {
        EmxError::Serde(
            ErrorInfo::new("file_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
