//! Loading configuration documents from disk or from memory.

use crate::document::ConfigDocument;
use crate::error::{ConfigError, ConfigResult};
use crate::format::SourceFormat;
use crate::references::resolve_references;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Base name of the conventional config file. The extension picks the format.
pub const CONFIG_FILE_STEM: &str = "breeze.config";

/// What to do with unrecognised top-level keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnknownKeyPolicy {
    /// Log a warning and ignore the key.
    #[default]
    Warn,
    /// Ignore the key silently.
    Ignore,
    /// Fail with [`ConfigError::UnknownKey`].
    Deny,
}

/// Loads [`ConfigDocument`]s.
///
/// # Examples
///
/// ```no_run
/// use breeze_config::{ConfigLoader, UnknownKeyPolicy};
///
/// let doc = ConfigLoader::new()
///     .with_unknown_keys(UnknownKeyPolicy::Deny)
///     .discover(".")?;
/// println!("{} plugins", doc.plugins().len());
/// # Ok::<(), breeze_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigLoader {
    unknown_keys: UnknownKeyPolicy,
}

impl ConfigLoader {
    /// Loader that warns about unknown keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unknown-key policy.
    pub fn with_unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// The unknown-key policy in force.
    pub fn unknown_keys(&self) -> UnknownKeyPolicy {
        self.unknown_keys
    }

    /// Load a configuration file. The format is picked from its extension.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<ConfigDocument> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)?;
        debug!("Loading config from {}", path.display());

        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.build(&source, format, path)
    }

    /// Load a configuration from a string.
    ///
    /// `base_dir` anchors relative `{file:…}` references.
    pub fn load_str(
        &self,
        source: &str,
        format: SourceFormat,
        base_dir: impl AsRef<Path>,
    ) -> ConfigResult<ConfigDocument> {
        let origin = base_dir.as_ref().join(inline_name(format));
        self.build(source, format, &origin)
    }

    /// Find and load the conventional config file under `project_root`.
    ///
    /// Looks for `breeze.config.toml`, `.json`, `.yaml`, then `.yml` and
    /// loads the first that exists.
    pub fn discover(&self, project_root: impl AsRef<Path>) -> ConfigResult<ConfigDocument> {
        let root = project_root.as_ref();
        let path = find_config_file(root).ok_or_else(|| ConfigError::NotFound(root.to_path_buf()))?;
        info!("Using config file {}", path.display());
        self.load(path)
    }

    fn build(
        &self,
        source: &str,
        format: SourceFormat,
        origin: &Path,
    ) -> ConfigResult<ConfigDocument> {
        let mut value = format.parse(source, origin)?;
        resolve_references(&mut value, origin)?;
        ConfigDocument::from_value(&value, origin, self.unknown_keys)
    }
}

/// The first conventional config file under `project_root`, if any.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    SourceFormat::extensions()
        .iter()
        .map(|ext| project_root.join(format!("{}.{}", CONFIG_FILE_STEM, ext)))
        .find(|candidate| candidate.is_file())
}

fn inline_name(format: SourceFormat) -> String {
    format!("<inline>.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DarkMode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_reads_and_parses_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("breeze.config.json");
        fs::write(&path, r#"{"darkMode": "class", "plugins": ["forms"]}"#).unwrap();

        let doc = ConfigLoader::new().load(&path).unwrap();
        assert_eq!(doc.dark_mode(), DarkMode::Class);
        assert_eq!(doc.plugins()[0].name, "forms");
        assert_eq!(doc.source(), path.as_path());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .load(dir.path().join("breeze.config.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let err = ConfigLoader::new().load("tailwind.config.js").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn load_str_resolves_files_against_base_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plugins.json"), r#"["forms", "typography"]"#).unwrap();

        let doc = ConfigLoader::new()
            .load_str(r#"{"plugins": "{file:plugins.json}"}"#, SourceFormat::Json, dir.path())
            .unwrap();
        let names: Vec<_> = doc.plugins().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["forms", "typography"]);
    }

    #[test]
    fn discover_reports_not_found() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new().discover(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn discover_finds_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("breeze.config.json"), "{}").unwrap();
        assert_eq!(
            find_config_file(dir.path()),
            Some(dir.path().join("breeze.config.json"))
        );
        assert!(ConfigLoader::new().discover(dir.path()).is_ok());
    }

    #[test]
    fn policy_builder() {
        let loader = ConfigLoader::new().with_unknown_keys(UnknownKeyPolicy::Ignore);
        assert_eq!(loader.unknown_keys(), UnknownKeyPolicy::Ignore);
        assert_eq!(ConfigLoader::default().unknown_keys(), UnknownKeyPolicy::Warn);
    }
}
