//! `serde_path_to_error` wrappers: a failure names the path it occurred at
//! (`types.Foo.struct.fields`), which is what makes a bad DMT document or a
//! mismatched placeholder debuggable.
use serde::Deserializer;
use serde::de::DeserializeOwned;

pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    with_path(&mut serde_json::Deserializer::from_str(src))
}

/// Used when decoding placeholder types out of a data-model tree.
pub fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, String> {
    with_path(value)
}

fn with_path<'de, D, T>(de: D) -> Result<T, String>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize(de).map_err(|err| {
        let path = err.path().to_string();
        let inner = err.into_inner();
        if path == "." { inner.to_string() } else { format!("at {path}: {inner}") }
    })
}
