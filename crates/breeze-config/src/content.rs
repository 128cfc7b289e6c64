//! Content globs: the files the generator scans for class-name usage.
//!
//! The loader checks that every glob compiles and otherwise passes the list
//! through untouched. An empty list is legal here; what the generator does
//! with it is the generator's business.

use crate::error::{FieldError, FieldResult};
use crate::format::value_kind;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// The legacy alias whose value may also be a table.
const PURGE_KEY: &str = "purge";

/// Ordered content-scan globs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentGlobs {
    globs: Vec<String>,
    enabled: Option<bool>,
}

impl ContentGlobs {
    /// Validate and wrap a list of globs.
    pub fn new<I, S>(globs: I) -> Result<Self, globset::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let globs: Vec<String> = globs.into_iter().map(Into::into).collect();
        for glob in &globs {
            Glob::new(normalise(glob))?;
        }
        Ok(Self {
            globs,
            enabled: None,
        })
    }

    /// Read `contentGlobs`, `content` or `purge`.
    ///
    /// Accepts a plain list. Under `purge` a table `{ enabled, content }`
    /// is accepted too, as older configs wrote it.
    pub(crate) fn from_json(value: &Value, key: &str) -> FieldResult<Self> {
        match value {
            Value::Array(_) => Ok(Self {
                globs: glob_list(value, key)?,
                enabled: None,
            }),
            Value::Object(obj) if key == PURGE_KEY => {
                if let Some(extra) = obj.keys().find(|k| *k != "enabled" && *k != "content") {
                    return Err(FieldError::new(
                        format!("{}.{}", key, extra),
                        "unexpected purge field; expected `enabled` or `content`",
                    ));
                }
                let globs = match obj.get("content") {
                    Some(list) => glob_list(list, &format!("{}.content", key))?,
                    None => Vec::new(),
                };
                let enabled = match obj.get("enabled") {
                    Some(Value::Bool(b)) => Some(*b),
                    Some(other) => {
                        return Err(FieldError::new(
                            format!("{}.enabled", key),
                            format!("expected a boolean, found {}", value_kind(other)),
                        ))
                    }
                    None => None,
                };
                Ok(Self { globs, enabled })
            }
            other => Err(FieldError::new(
                key,
                format!("expected a list of globs, found {}", value_kind(other)),
            )),
        }
    }

    /// The globs, in source order.
    pub fn globs(&self) -> &[String] {
        &self.globs
    }

    /// Explicit `enabled` flag from a table-form `purge`, if any.
    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    /// True when no globs were given.
    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    /// Compile the globs into one matcher.
    ///
    /// A leading `./` is dropped so globs match project-relative paths.
    pub fn matcher(&self) -> Result<GlobSet, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for glob in &self.globs {
            builder.add(Glob::new(normalise(glob))?);
        }
        builder.build()
    }

    /// Whether a project-relative path matches any glob.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        self.matcher()
            .map(|set| set.is_match(path.as_ref()))
            .unwrap_or(false)
    }
}

fn normalise(glob: &str) -> &str {
    glob.strip_prefix("./").unwrap_or(glob)
}

fn glob_list(value: &Value, key: &str) -> FieldResult<Vec<String>> {
    let items = value.as_array().ok_or_else(|| {
        FieldError::new(key, format!("expected a list of globs, found {}", value_kind(value)))
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_key = format!("{}[{}]", key, i);
            let glob = item.as_str().ok_or_else(|| {
                FieldError::new(&item_key, format!("expected a glob, found {}", value_kind(item)))
            })?;
            Glob::new(normalise(glob))
                .map_err(|e| FieldError::new(&item_key, format!("invalid glob: {}", e)))?;
            Ok(glob.to_string())
        })
        .collect()
}
