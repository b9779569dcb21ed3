//! Deserialization that says *where* in the document a value was rejected.
use serde::Deserializer;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse raw JSON bytes; errors carry the JSON path of the offending value.
pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
    with_path(&mut serde_json::Deserializer::from_slice(bytes))
}

/// Decode an already-parsed subtree; errors carry its JSON path.
pub fn from_value_with_path<T: DeserializeOwned>(value: &Value) -> Result<T, String> {
    with_path(value)
}

fn with_path<'de, D, T>(de: D) -> Result<T, String>
where
    D: Deserializer<'de>,
    D::Error: std::fmt::Display,
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        format!("at JSON path {path} → {}", err.into_inner())
    })
}
