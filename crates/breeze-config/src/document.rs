//! The loaded configuration document.
//!
//! A [`ConfigDocument`] is built once from a parsed, reference-resolved
//! value tree and never changes afterwards. Theme and variant resolution
//! are pure functions of the document and a set of defaults.

use crate::content::ContentGlobs;
use crate::defaults::{ThemeDefaults, VariantDefaults};
use crate::error::{ConfigError, ConfigResult, FieldError, FieldResult, SourceLocation};
use crate::format::value_kind;
use crate::loader::{ConfigLoader, UnknownKeyPolicy};
use crate::plugins::{plugins_from_json, PluginRef};
use crate::theme::{
    theme_table_from_json, token_map_from_json, ThemeSettings, ThemeTable, TokenMap, COLORS,
};
use crate::variants::{VariantSettings, VariantTable};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Keys that may hold the content globs, in precedence order.
pub(crate) const CONTENT_KEYS: [&str; 3] = ["contentGlobs", "content", "purge"];

/// Every recognised top-level key.
pub(crate) const KNOWN_KEYS: [&str; 8] = [
    "contentGlobs",
    "content",
    "purge",
    "darkMode",
    "theme",
    "colors",
    "variants",
    "plugins",
];

/// How dark-mode variants are activated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// Follow the `prefers-color-scheme` media query.
    #[default]
    Media,
    /// Follow a `dark` class on an ancestor element.
    Class,
}

impl DarkMode {
    /// Name as written in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            DarkMode::Media => "media",
            DarkMode::Class => "class",
        }
    }

    fn from_json(value: &Value, key: &str) -> FieldResult<Self> {
        match value.as_str() {
            Some("media") => Ok(DarkMode::Media),
            Some("class") => Ok(DarkMode::Class),
            Some(other) => Err(FieldError::new(
                key,
                format!("unknown dark mode `{}`; expected `media` or `class`", other),
            )),
            None => Err(FieldError::new(
                key,
                format!("expected `media` or `class`, found {}", value_kind(value)),
            )),
        }
    }
}

impl fmt::Display for DarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated build configuration.
///
/// # Example
///
/// ```no_run
/// use breeze_config::{ConfigDocument, DarkMode};
///
/// let doc = ConfigDocument::load("breeze.config.toml")?;
/// assert_eq!(doc.dark_mode(), DarkMode::Media);
///
/// let theme = doc.resolve_theme();
/// let variants = doc.resolve_variants();
/// # let _ = (theme, variants);
/// # Ok::<(), breeze_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    source: PathBuf,
    content_globs: ContentGlobs,
    dark_mode: DarkMode,
    theme: ThemeSettings,
    variants: VariantSettings,
    plugins: Vec<PluginRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unknown_keys: Vec<String>,
}

impl ConfigDocument {
    /// Load a configuration file with the default loader options.
    ///
    /// Equivalent to `ConfigLoader::new().load(path)`.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        ConfigLoader::new().load(path)
    }

    /// Build a document from a reference-resolved value tree.
    pub(crate) fn from_value(
        value: &Value,
        source: &Path,
        policy: UnknownKeyPolicy,
    ) -> ConfigResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            ConfigError::malformed(
                source,
                SourceLocation::Unknown,
                format!("expected a key-value record, found {}", value_kind(value)),
            )
        })?;

        let unknown_keys = check_unknown_keys(obj, source, policy)?;
        let doc = Self::extract(obj, source, unknown_keys)
            .map_err(|e| e.into_config_error(source))?;

        debug!(
            "Loaded {}: {} content globs, {} plugins, dark mode {}",
            source.display(),
            doc.content_globs.globs().len(),
            doc.plugins.len(),
            doc.dark_mode
        );
        Ok(doc)
    }

    fn extract(
        obj: &Map<String, Value>,
        source: &Path,
        unknown_keys: Vec<String>,
    ) -> FieldResult<Self> {
        let content_globs = content_from(obj)?;

        let dark_mode = match obj.get("darkMode") {
            Some(v) => DarkMode::from_json(v, "darkMode")?,
            None => DarkMode::default(),
        };

        let mut theme = match obj.get("theme") {
            Some(v) => theme_from(v)?,
            None => ThemeSettings::default(),
        };
        if let Some(colors) = obj.get(COLORS) {
            if theme.colors.is_some() {
                warn!("Both `colors` and `theme.colors` are set; using `colors`");
            }
            theme.colors = Some(token_map_from_json(colors, COLORS)?);
        }

        let variants = match obj.get("variants") {
            Some(v) => VariantSettings::from_json(v, "variants")?,
            None => VariantSettings::default(),
        };

        let plugins = match obj.get("plugins") {
            Some(v) => plugins_from_json(v, "plugins")?,
            None => Vec::new(),
        };

        Ok(Self {
            source: source.to_path_buf(),
            content_globs,
            dark_mode,
            theme,
            variants,
            plugins,
            unknown_keys,
        })
    }

    /// File this document was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Content-scan globs, passed through in source order.
    pub fn content_globs(&self) -> &ContentGlobs {
        &self.content_globs
    }

    /// Dark-mode strategy. `media` when the source does not say.
    pub fn dark_mode(&self) -> DarkMode {
        self.dark_mode
    }

    /// Theme overrides and extensions as written.
    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    /// The replacement palette, if `colors` was given.
    pub fn colors(&self) -> Option<&TokenMap> {
        self.theme.colors.as_ref()
    }

    /// The `theme.extend` table.
    pub fn theme_extension(&self) -> &ThemeTable {
        &self.theme.extend
    }

    /// Variant overrides and extensions as written.
    pub fn variants(&self) -> &VariantSettings {
        &self.variants
    }

    /// The `variants.extend` table.
    pub fn variant_extension(&self) -> &VariantTable {
        &self.variants.extend
    }

    /// Plugins in application order.
    pub fn plugins(&self) -> &[PluginRef] {
        &self.plugins
    }

    /// Unrecognised top-level keys that were ignored, in sorted order.
    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown_keys
    }

    /// Merge the theme onto the built-in defaults.
    pub fn resolve_theme(&self) -> ThemeTable {
        self.resolve_theme_with(&ThemeDefaults::builtin())
    }

    /// Merge the theme onto `defaults`.
    ///
    /// Per category: defaults, then any wholesale override (`colors`,
    /// `theme.<category>`), then `theme.extend` per key.
    pub fn resolve_theme_with(&self, defaults: &ThemeDefaults) -> ThemeTable {
        self.theme.resolve(defaults.table())
    }

    /// Merge the variant table onto the built-in defaults.
    pub fn resolve_variants(&self) -> VariantTable {
        self.resolve_variants_with(&VariantDefaults::builtin())
    }

    /// Merge the variant table onto `defaults`.
    ///
    /// Groups named in `variants.extend` get the union of their defaults and
    /// the extension. Other groups keep their defaults.
    pub fn resolve_variants_with(&self, defaults: &VariantDefaults) -> VariantTable {
        self.variants.resolve(defaults.table())
    }
}

fn check_unknown_keys(
    obj: &Map<String, Value>,
    source: &Path,
    policy: UnknownKeyPolicy,
) -> ConfigResult<Vec<String>> {
    let unknown: Vec<String> = obj
        .keys()
        .filter(|k| !KNOWN_KEYS.contains(&k.as_str()))
        .cloned()
        .collect();

    for key in &unknown {
        match policy {
            UnknownKeyPolicy::Deny => {
                return Err(ConfigError::UnknownKey {
                    path: source.to_path_buf(),
                    key: key.clone(),
                })
            }
            UnknownKeyPolicy::Warn => {
                warn!("Ignoring unknown key `{}` in {}", key, source.display())
            }
            UnknownKeyPolicy::Ignore => debug!("Ignoring unknown key `{}`", key),
        }
    }

    Ok(unknown)
}

fn content_from(obj: &Map<String, Value>) -> FieldResult<ContentGlobs> {
    let mut present = CONTENT_KEYS
        .iter()
        .filter_map(|key| obj.get(*key).map(|v| (*key, v)));

    let Some((key, value)) = present.next() else {
        return Ok(ContentGlobs::default());
    };
    for (shadowed, _) in present {
        warn!("Both `{}` and `{}` are set; using `{}`", key, shadowed, key);
    }
    ContentGlobs::from_json(value, key)
}

fn theme_from(value: &Value) -> FieldResult<ThemeSettings> {
    let obj = value.as_object().ok_or_else(|| {
        FieldError::new("theme", format!("expected a table, found {}", value_kind(value)))
    })?;

    let mut settings = ThemeSettings::default();
    for (category, tokens) in obj {
        let key = format!("theme.{}", category);
        match category.as_str() {
            "extend" => settings.extend = theme_table_from_json(tokens, &key)?,
            COLORS => settings.colors = Some(token_map_from_json(tokens, &key)?),
            _ => {
                settings
                    .overrides
                    .insert(category.clone(), token_map_from_json(tokens, &key)?);
            }
        }
    }
    Ok(settings)
}
