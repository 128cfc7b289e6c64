//! Source formats and parsing into a generic value tree.
//!
//! Every supported format is parsed into a [`serde_json::Value`] so that
//! reference resolution and typed extraction only deal with one shape.
//! Parse failures are reported as [`ConfigError::MalformedConfig`] with the
//! line and column the underlying parser points at. A key repeated within one
//! table is a parse failure in every format.

use crate::error::{ConfigError, ConfigResult, SourceLocation};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::path::Path;

/// A declarative source format understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// TOML (`.toml`)
    #[cfg(feature = "toml")]
    Toml,
    /// JSON (`.json`)
    Json,
    /// YAML (`.yaml`, `.yml`)
    #[cfg(feature = "yaml")]
    Yaml,
}

impl SourceFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            #[cfg(feature = "toml")]
            Some("toml") => Ok(SourceFormat::Toml),
            Some("json") => Ok(SourceFormat::Json),
            #[cfg(feature = "yaml")]
            Some("yaml") | Some("yml") => Ok(SourceFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// File extensions handled by this build, in discovery order.
    pub fn extensions() -> &'static [&'static str] {
        &[
            #[cfg(feature = "toml")]
            "toml",
            "json",
            #[cfg(feature = "yaml")]
            "yaml",
            #[cfg(feature = "yaml")]
            "yml",
        ]
    }

    /// Canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            #[cfg(feature = "toml")]
            SourceFormat::Toml => "toml",
            SourceFormat::Json => "json",
            #[cfg(feature = "yaml")]
            SourceFormat::Yaml => "yaml",
        }
    }

    /// Parse `source` into a top-level key-value record.
    ///
    /// `path` is only used for diagnostics.
    pub fn parse(self, source: &str, path: &Path) -> ConfigResult<Value> {
        match self.parse_value(source, path)? {
            value @ Value::Object(_) => Ok(value),
            Value::Null => Ok(Value::Object(serde_json::Map::new())),
            other => Err(ConfigError::malformed(
                path,
                SourceLocation::Position { line: 1, column: 1 },
                format!(
                    "expected a key-value record at the top level, found {}",
                    value_kind(&other)
                ),
            )),
        }
    }

    /// Parse `source` into a value of any shape.
    ///
    /// Used for `{file:…}` references, which may hold a single list or table.
    pub fn parse_value(self, source: &str, path: &Path) -> ConfigResult<Value> {
        match self {
            #[cfg(feature = "toml")]
            SourceFormat::Toml => parse_toml(source, path),
            SourceFormat::Json => parse_json(source, path),
            #[cfg(feature = "yaml")]
            SourceFormat::Yaml => parse_yaml(source, path),
        }
    }
}

#[cfg(feature = "toml")]
fn parse_toml(source: &str, path: &Path) -> ConfigResult<Value> {
    toml::from_str::<Value>(source).map_err(|e| {
        let location = e
            .span()
            .map(|span| SourceLocation::from_offset(source, span.start))
            .unwrap_or(SourceLocation::Unknown);
        ConfigError::malformed(path, location, e.message().to_string())
    })
}

fn parse_json(source: &str, path: &Path) -> ConfigResult<Value> {
    serde_json::from_str::<UniqueKeys>(source)
        .map(|UniqueKeys(value)| value)
        .map_err(|e| {
            let location = if e.line() == 0 {
                SourceLocation::Unknown
            } else {
                SourceLocation::Position {
                    line: e.line(),
                    column: e.column(),
                }
            };
            ConfigError::malformed(path, location, strip_positions(&e.to_string()))
        })
}

/// A JSON value whose tables never repeat a key.
///
/// `serde_json::Value` keeps the last of two equal keys; TOML and YAML
/// parsers refuse them, so JSON does too.
struct UniqueKeys(Value);

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UniqueKeysVisitor).map(UniqueKeys)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Number(value.into()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        Ok(Value::Number(value.into()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Number::from_f64(value).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        UniqueKeys::deserialize(deserializer).map(|UniqueKeys(value)| value)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(UniqueKeys(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<M>(self, mut map: M) -> Result<Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut table = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            if table.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate key `{}`", key)));
            }
            let UniqueKeys(value) = map.next_value()?;
            table.insert(key, value);
        }
        Ok(Value::Object(table))
    }
}

#[cfg(feature = "yaml")]
fn parse_yaml(source: &str, path: &Path) -> ConfigResult<Value> {
    if source.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str::<Value>(source).map_err(|e| {
        let location = e
            .location()
            .map(|loc| SourceLocation::Position {
                line: loc.line(),
                column: loc.column(),
            })
            .unwrap_or(SourceLocation::Unknown);
        ConfigError::malformed(path, location, strip_positions(&e.to_string()))
    })
}

/// Drop the ` at line X column Y` fragments parsers append to their
/// messages. The position is carried by [`SourceLocation`] instead.
fn strip_positions(message: &str) -> String {
    const MARKER: &str = " at line ";
    let mut stripped = String::with_capacity(message.len());
    let mut rest = message;
    while let Some(start) = rest.find(MARKER) {
        let tail = &rest[start + MARKER.len()..];
        match position_len(tail) {
            Some(len) => {
                stripped.push_str(&rest[..start]);
                rest = &tail[len..];
            }
            None => {
                stripped.push_str(&rest[..start + MARKER.len()]);
                rest = tail;
            }
        }
    }
    stripped.push_str(rest);
    stripped
}

/// Length of a leading `<line> column <column>`, if `s` starts with one.
fn position_len(s: &str) -> Option<usize> {
    const COLUMN: &str = " column ";
    let line = s.bytes().take_while(u8::is_ascii_digit).count();
    let after = s[line..].strip_prefix(COLUMN)?;
    let column = after.bytes().take_while(u8::is_ascii_digit).count();
    (line > 0 && column > 0).then_some(line + COLUMN.len() + column)
}

/// Human-readable name of a JSON value's type.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}
