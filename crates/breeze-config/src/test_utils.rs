//! Test utilities for configuration testing.

use crate::{ConfigDocument, ConfigLoader, ConfigResult, SourceFormat, CONFIG_FILE_STEM};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test configuration builder for writing config sources easily.
///
/// ```
/// use breeze_config::{SourceFormat, TestConfigBuilder};
///
/// let project = TestConfigBuilder::new()
///     .content_globs(["./src/**/*.tsx"])
///     .extend_theme("fontFamily", "sans", ["Inter"])
///     .extend_variants("ringWidth", ["hover"])
///     .write(SourceFormat::Json);
/// let doc = project.load().unwrap();
/// assert_eq!(doc.content_globs().globs(), ["./src/**/*.tsx"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TestConfigBuilder {
    record: Map<String, Value>,
}

impl TestConfigBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `contentGlobs`.
    pub fn content_globs<I, S>(self, globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let globs: Vec<String> = globs.into_iter().map(Into::into).collect();
        self.set("contentGlobs", globs)
    }

    /// Set `darkMode`.
    pub fn dark_mode(self, mode: &str) -> Self {
        self.set("darkMode", mode)
    }

    /// Add one `theme.extend.<category>.<name>` token.
    pub fn extend_theme(
        mut self,
        category: &str,
        name: &str,
        value: impl serde::Serialize,
    ) -> Self {
        let value = serde_json::to_value(value).unwrap();
        table_at(&mut self.record, &["theme", "extend", category]).insert(name.to_string(), value);
        self
    }

    /// Replace a whole theme category with `theme.<category>`.
    pub fn override_theme(mut self, category: &str, tokens: Value) -> Self {
        table_at(&mut self.record, &["theme"]).insert(category.to_string(), tokens);
        self
    }

    /// Set the top-level `colors` palette.
    pub fn colors(self, palette: Value) -> Self {
        self.set("colors", palette)
    }

    /// Set `variants.extend.<group>`.
    pub fn extend_variants<I, S>(mut self, group: &str, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants: Vec<String> = variants.into_iter().map(Into::into).collect();
        table_at(&mut self.record, &["variants", "extend"])
            .insert(group.to_string(), json!(variants));
        self
    }

    /// Append a plugin by name.
    pub fn plugin(mut self, name: &str) -> Self {
        let plugins = self
            .record
            .entry("plugins")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = plugins {
            items.push(json!(name));
        }
        self
    }

    /// Set an arbitrary top-level key.
    pub fn set<V: serde::Serialize>(mut self, key: &str, value: V) -> Self {
        let json_value = serde_json::to_value(value).unwrap();
        self.record.insert(key.to_string(), json_value);
        self
    }

    /// Build the source record.
    pub fn build(self) -> Value {
        Value::Object(self.record)
    }

    /// Render the record in `format`.
    pub fn render(&self, format: SourceFormat) -> String {
        let value = Value::Object(self.record.clone());
        match format {
            #[cfg(feature = "toml")]
            SourceFormat::Toml => toml::to_string_pretty(&value).unwrap(),
            SourceFormat::Json => serde_json::to_string_pretty(&value).unwrap(),
            #[cfg(feature = "yaml")]
            SourceFormat::Yaml => serde_yaml::to_string(&value).unwrap(),
        }
    }

    /// Write `breeze.config.<ext>` into a fresh temporary project.
    pub fn write(&self, format: SourceFormat) -> TempProject {
        let project = TempProject::new();
        let name = format!("{}.{}", CONFIG_FILE_STEM, format.extension());
        let path = project.write_file(&name, &self.render(format));
        TempProject {
            config_path: Some(path),
            ..project
        }
    }
}

fn table_at<'a>(record: &'a mut Map<String, Value>, keys: &[&str]) -> &'a mut Map<String, Value> {
    let mut table = record;
    for key in keys {
        let entry = table
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        table = match entry {
            Value::Object(map) => map,
            _ => unreachable!("entry was just made a table"),
        };
    }
    table
}

/// A temporary project directory, removed on drop.
#[derive(Debug)]
pub struct TempProject {
    dir: TempDir,
    config_path: Option<PathBuf>,
}

impl TempProject {
    /// Create an empty project directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            config_path: None,
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the config file written by [`TestConfigBuilder::write`].
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Write a file relative to the project root, creating parent directories.
    pub fn write_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Discover and load the project's config with default options.
    pub fn load(&self) -> ConfigResult<ConfigDocument> {
        ConfigLoader::new().discover(self.root())
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_nests_extensions() {
        let value = TestConfigBuilder::new()
            .extend_theme("fontFamily", "sans", ["Inter"])
            .extend_theme("spacing", "128", "32rem")
            .extend_variants("ringWidth", ["hover"])
            .plugin("forms")
            .plugin("typography")
            .build();

        assert_eq!(value["theme"]["extend"]["fontFamily"]["sans"], json!(["Inter"]));
        assert_eq!(value["theme"]["extend"]["spacing"]["128"], json!("32rem"));
        assert_eq!(value["variants"]["extend"]["ringWidth"], json!(["hover"]));
        assert_eq!(value["plugins"], json!(["forms", "typography"]));
    }

    #[test]
    fn written_project_loads() {
        let project = TestConfigBuilder::new()
            .dark_mode("class")
            .write(SourceFormat::Json);
        assert!(project.config_path().is_some());
        let doc = project.load().unwrap();
        assert_eq!(doc.dark_mode(), crate::DarkMode::Class);
    }
}
