//! Generator plugin references.

use crate::error::{FieldError, FieldResult};
use crate::format::value_kind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// One entry of the `plugins` list.
///
/// Written either as a bare name (`"forms"`) or as a table with options
/// (`{ name = "typography", options = { className = "prose" } }`). The
/// loader never executes plugins; it only records them in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PluginRef {
    /// Plugin identifier understood by the generator.
    pub name: String,
    /// Plugin-specific options, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl PluginRef {
    /// A plugin reference without options.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }
}

/// Read the `plugins` list. Order is kept: later plugins take precedence.
pub(crate) fn plugins_from_json(value: &Value, key: &str) -> FieldResult<Vec<PluginRef>> {
    let items = value.as_array().ok_or_else(|| {
        FieldError::new(key, format!("expected a list of plugins, found {}", value_kind(value)))
    })?;

    let mut seen = HashSet::new();
    let mut plugins = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let item_key = format!("{}[{}]", key, i);
        let plugin = match item {
            Value::String(name) => PluginRef::named(name.clone()),
            Value::Object(obj) => {
                let name = match obj.get("name") {
                    Some(Value::String(name)) => name.clone(),
                    Some(other) => {
                        return Err(FieldError::new(
                            format!("{}.name", item_key),
                            format!("expected a string, found {}", value_kind(other)),
                        ))
                    }
                    None => {
                        return Err(FieldError::new(&item_key, "plugin table is missing `name`"))
                    }
                };
                if let Some(extra) = obj.keys().find(|k| *k != "name" && *k != "options") {
                    return Err(FieldError::new(
                        format!("{}.{}", item_key, extra),
                        "unexpected plugin field; expected `name` or `options`",
                    ));
                }
                PluginRef {
                    name,
                    options: obj.get("options").cloned(),
                }
            }
            other => {
                return Err(FieldError::new(
                    &item_key,
                    format!("expected a plugin name or table, found {}", value_kind(other)),
                ))
            }
        };

        if plugin.name.trim().is_empty() {
            return Err(FieldError::new(&item_key, "plugin name cannot be empty"));
        }
        if !seen.insert(plugin.name.clone()) {
            debug!("Plugin {} listed more than once", plugin.name);
        }
        plugins.push(plugin);
    }

    Ok(plugins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_list() {
        assert!(plugins_from_json(&json!([]), "plugins").unwrap().is_empty());
    }

    #[test]
    fn names_and_tables_keep_order() {
        let plugins = plugins_from_json(
            &json!([
                "forms",
                {"name": "typography", "options": {"className": "prose"}},
                "aspect-ratio"
            ]),
            "plugins",
        )
        .unwrap();

        let names: Vec<_> = plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["forms", "typography", "aspect-ratio"]);
        assert_eq!(plugins[1].options, Some(json!({"className": "prose"})));
        assert_eq!(plugins[0].options, None);
    }

    #[test]
    fn duplicates_are_kept() {
        let plugins = plugins_from_json(&json!(["forms", "forms"]), "plugins").unwrap();
        assert_eq!(plugins.len(), 2);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = plugins_from_json(&json!(["forms", "  "]), "plugins").unwrap_err();
        assert_eq!(err.key, "plugins[1]");
    }

    #[test]
    fn table_without_name_is_rejected() {
        let err = plugins_from_json(&json!([{"options": {}}]), "plugins").unwrap_err();
        assert_eq!(err.key, "plugins[0]");
    }

    #[test]
    fn unexpected_table_field_is_rejected() {
        let err = plugins_from_json(&json!([{"name": "forms", "strategy": "class"}]), "plugins")
            .unwrap_err();
        assert_eq!(err.key, "plugins[0].strategy");
    }

    #[test]
    fn plugins_must_be_a_list() {
        let err = plugins_from_json(&json!("forms"), "plugins").unwrap_err();
        assert!(err.message.contains("a string"));
    }
}
