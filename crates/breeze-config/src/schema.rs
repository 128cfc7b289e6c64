//! JSON Schema of the configuration source, for editor integration.
//!
//! The types here only describe the accepted shape. Loading goes through
//! [`ConfigDocument`](crate::ConfigDocument), which also resolves references
//! and reports errors by key path.

use crate::document::DarkMode;
use crate::plugins::PluginRef;
use crate::theme::{ThemeTable, TokenMap};
use crate::variants::VariantTable;
use schemars::{JsonSchema, Schema};
use std::collections::BTreeMap;

/// The JSON Schema of a `breeze.config.*` file.
///
/// ```
/// let schema = breeze_config::schema();
/// let json = serde_json::to_value(&schema).unwrap();
/// assert!(json["properties"]["darkMode"].is_object());
/// ```
pub fn schema() -> Schema {
    schemars::schema_for!(SourceRecord)
}

#[allow(dead_code)]
#[derive(JsonSchema)]
#[schemars(title = "Breeze configuration")]
#[serde(rename_all = "camelCase")]
struct SourceRecord {
    /// Files scanned for class-name usage.
    content_globs: Option<Vec<String>>,
    /// Alias of `contentGlobs`.
    content: Option<Vec<String>>,
    /// Older spelling of `contentGlobs`.
    purge: Option<PurgeSource>,
    /// Dark-mode strategy. Defaults to `media`.
    dark_mode: Option<DarkMode>,
    /// Theme overrides and extensions.
    theme: Option<ThemeSource>,
    /// Replacement colour palette.
    colors: Option<TokenMap>,
    /// Variant overrides and extensions.
    variants: Option<VariantSource>,
    /// Generator plugins, in application order.
    plugins: Option<Vec<PluginSource>>,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
#[serde(untagged)]
enum PurgeSource {
    List(Vec<String>),
    Table {
        enabled: Option<bool>,
        content: Option<Vec<String>>,
    },
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct ThemeSource {
    /// Per-key additions to the default categories.
    extend: Option<ThemeTable>,
    /// Replacement colour palette.
    colors: Option<TokenMap>,
    /// Any other key replaces that category outright.
    #[serde(flatten)]
    overrides: BTreeMap<String, TokenMap>,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct VariantSource {
    /// Variants unioned onto each group's defaults.
    extend: Option<VariantTable>,
    /// Any other key replaces that group's variants outright.
    #[serde(flatten)]
    overrides: VariantTable,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
#[serde(untagged)]
enum PluginSource {
    Name(String),
    Configured(PluginRef),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_top_level_keys() {
        let json = serde_json::to_value(schema()).unwrap();
        let properties = json["properties"].as_object().unwrap();
        for key in [
            "contentGlobs",
            "content",
            "purge",
            "darkMode",
            "theme",
            "colors",
            "variants",
            "plugins",
        ] {
            assert!(properties.contains_key(key), "schema is missing {key}");
        }
    }

    #[test]
    fn schema_enumerates_dark_modes() {
        let json = serde_json::to_string(&schema()).unwrap();
        assert!(json.contains("\"media\""));
        assert!(json.contains("\"class\""));
        assert!(json.contains("\"group-hover\""));
    }
}
