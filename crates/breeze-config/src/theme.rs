//! Theme tokens and theme resolution.
//!
//! A theme is a set of token categories (`fontFamily`, `screens`, `colors`,
//! ...), each mapping token names to CSS values. Resolution layers three
//! tables per category, in order:
//!
//! 1. built-in defaults
//! 2. wholesale overrides (`theme.<category>`, `colors`)
//! 3. per-key extensions (`theme.extend.<category>`)
//!
//! Categories are merged independently. Inside a category an extension key
//! replaces a same-named default value outright; values are never merged
//! partially.

use crate::error::{FieldError, FieldResult};
use crate::format::value_kind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Name of the colour category.
pub const COLORS: &str = "colors";

/// Token name to value, for one category.
pub type TokenMap = BTreeMap<String, TokenValue>;

/// Category name to tokens.
pub type ThemeTable = BTreeMap<String, TokenMap>;

/// A single theme token value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum TokenValue {
    /// One CSS value, e.g. `"640px"` or `"#3b82f6"`.
    Single(String),
    /// A CSS value list, e.g. a font stack.
    List(Vec<TokenValue>),
    /// Nested tokens, e.g. colour shades keyed `50` to `900`.
    Nested(TokenMap),
}

impl TokenValue {
    /// A list of plain values.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenValue::List(
            items
                .into_iter()
                .map(|s| TokenValue::Single(s.into()))
                .collect(),
        )
    }

    /// Nested token by name, for [`TokenValue::Nested`] values.
    pub fn get(&self, key: &str) -> Option<&TokenValue> {
        match self {
            TokenValue::Nested(map) => map.get(key),
            _ => None,
        }
    }

    /// The string, for [`TokenValue::Single`] values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Single(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a parsed value. Numbers and booleans become strings.
    pub(crate) fn from_json(value: &Value, key: &str) -> FieldResult<Self> {
        match value {
            Value::String(s) => Ok(TokenValue::Single(s.clone())),
            Value::Number(n) => Ok(TokenValue::Single(n.to_string())),
            Value::Bool(b) => Ok(TokenValue::Single(b.to_string())),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| TokenValue::from_json(item, &format!("{}[{}]", key, i)))
                .collect::<FieldResult<Vec<_>>>()
                .map(TokenValue::List),
            Value::Object(_) => token_map_from_json(value, key).map(TokenValue::Nested),
            Value::Null => Err(FieldError::new(key, "token value cannot be null")),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Single(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Single(value)
    }
}

/// Read a table of tokens.
pub(crate) fn token_map_from_json(value: &Value, key: &str) -> FieldResult<TokenMap> {
    let obj = value.as_object().ok_or_else(|| {
        FieldError::new(key, format!("expected a table of tokens, found {}", value_kind(value)))
    })?;
    obj.iter()
        .map(|(name, v)| {
            let token = TokenValue::from_json(v, &format!("{}.{}", key, name))?;
            Ok::<_, FieldError>((name.clone(), token))
        })
        .collect()
}

/// Read a table of token categories.
pub(crate) fn theme_table_from_json(value: &Value, key: &str) -> FieldResult<ThemeTable> {
    let obj = value.as_object().ok_or_else(|| {
        FieldError::new(
            key,
            format!("expected a table of token categories, found {}", value_kind(value)),
        )
    })?;
    obj.iter()
        .map(|(category, v)| {
            let tokens = token_map_from_json(v, &format!("{}.{}", key, category))?;
            Ok::<_, FieldError>((category.clone(), tokens))
        })
        .collect()
}

/// The theme-related part of a configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeSettings {
    /// Replacement palette from `colors` or `theme.colors`.
    pub colors: Option<TokenMap>,
    /// Wholesale category overrides from `theme.<category>`.
    pub overrides: ThemeTable,
    /// Per-key extensions from `theme.extend`.
    pub extend: ThemeTable,
}

impl ThemeSettings {
    /// Layer these settings onto `defaults`.
    pub fn resolve(&self, defaults: &ThemeTable) -> ThemeTable {
        let mut resolved = defaults.clone();

        for (category, tokens) in &self.overrides {
            debug!("Replacing theme category: {}", category);
            resolved.insert(category.clone(), tokens.clone());
        }

        if let Some(colors) = &self.colors {
            debug!("Replacing colour palette ({} entries)", colors.len());
            resolved.insert(COLORS.to_string(), colors.clone());
        }

        for (category, tokens) in &self.extend {
            let target = resolved.entry(category.clone()).or_default();
            for (name, value) in tokens {
                if target.insert(name.clone(), value.clone()).is_some() {
                    debug!("Theme extension overrides {}.{}", category, name);
                }
            }
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: Value) -> ThemeTable {
        theme_table_from_json(&value, "theme").unwrap()
    }

    #[test]
    fn token_value_normalises_scalars() {
        let value = TokenValue::from_json(&json!(50), "opacity.50").unwrap();
        assert_eq!(value, TokenValue::from("50"));
        let value = TokenValue::from_json(&json!(["Inter", "sans-serif"]), "k").unwrap();
        assert_eq!(value, TokenValue::list(["Inter", "sans-serif"]));
    }

    #[test]
    fn token_value_rejects_null_with_key_path() {
        let err = token_map_from_json(&json!({"sans": [null]}), "theme.extend.fontFamily")
            .unwrap_err();
        assert_eq!(err.key, "theme.extend.fontFamily.sans[0]");
    }

    #[test]
    fn category_must_be_a_table() {
        let err = theme_table_from_json(&json!({"screens": "640px"}), "theme").unwrap_err();
        assert_eq!(err.key, "theme.screens");
        assert!(err.message.contains("a string"));
    }

    #[test]
    fn extension_wins_per_key_and_defaults_pass_through() {
        let defaults = table(json!({
            "fontFamily": {"sans": ["ui-sans-serif"], "mono": ["ui-monospace"]},
            "screens": {"sm": "640px"}
        }));
        let settings = ThemeSettings {
            extend: table(json!({"fontFamily": {"sans": ["Inter"]}})),
            ..Default::default()
        };

        let resolved = settings.resolve(&defaults);
        assert_eq!(resolved["fontFamily"]["sans"], TokenValue::list(["Inter"]));
        assert_eq!(resolved["fontFamily"]["mono"], TokenValue::list(["ui-monospace"]));
        assert_eq!(resolved["screens"]["sm"], TokenValue::from("640px"));
    }

    #[test]
    fn extension_replaces_whole_value_without_partial_merge() {
        let defaults = table(json!({"colors": {"blue": {"100": "#dbeafe", "500": "#3b82f6"}}}));
        let settings = ThemeSettings {
            extend: table(json!({"colors": {"blue": {"500": "#0000ff"}}})),
            ..Default::default()
        };
        let resolved = settings.resolve(&defaults);
        let blue = &resolved["colors"]["blue"];
        assert_eq!(blue.get("500"), Some(&TokenValue::from("#0000ff")));
        assert_eq!(blue.get("100"), None);
    }

    #[test]
    fn colors_replace_default_palette() {
        let defaults = table(json!({"colors": {"red": "#f00", "green": "#0f0"}}));
        let colors = token_map_from_json(&json!({"brand": "#123456"}), "colors").unwrap();
        let settings = ThemeSettings {
            colors: Some(colors.clone()),
            ..Default::default()
        };
        assert_eq!(settings.resolve(&defaults)[COLORS], colors);
    }

    #[test]
    fn override_then_extend() {
        let defaults = table(json!({"screens": {"sm": "640px", "md": "768px"}}));
        let settings = ThemeSettings {
            overrides: table(json!({"screens": {"tablet": "640px"}})),
            extend: table(json!({"screens": {"desktop": "1280px"}})),
            ..Default::default()
        };
        let resolved = settings.resolve(&defaults);
        let screens = &resolved["screens"];
        assert_eq!(screens.len(), 2);
        assert!(screens.contains_key("tablet"));
        assert!(screens.contains_key("desktop"));
    }

    #[test]
    fn extension_can_add_new_category() {
        let settings = ThemeSettings {
            extend: table(json!({"aspectRatio": {"video": "16 / 9"}})),
            ..Default::default()
        };
        let resolved = settings.resolve(&ThemeTable::new());
        assert_eq!(resolved["aspectRatio"]["video"], TokenValue::from("16 / 9"));
    }
}
