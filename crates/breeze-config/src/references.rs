//! Default-value references inside a configuration document.
//!
//! Any string value of the exact form below is replaced before typed
//! extraction runs:
//!
//! ```toml
//! # A whole built-in palette
//! colors = "{palette:tailwind}"
//!
//! # One colour family of a built-in palette
//! [theme.extend.colors]
//! gray = "{palette:tailwind.coolGray}"
//!
//! # Another config-format file, parsed by extension
//! [theme.extend]
//! fontFamily = "{file:tokens/fonts.json}"
//! ```
//!
//! - `{file:…}` paths are relative to the file that contains them; absolute
//!   paths and `~/` are allowed
//! - A referenced file may itself contain references, resolved relative to
//!   its own directory
//! - A file without a config extension is used as a trimmed string
//!
//! Every failure in a document is collected. The first is returned and the
//! others are logged. Lists are walked in order and tables in key order, so
//! "first" is by sorted key, not by position in the source text.

use crate::error::{ConfigError, ConfigResult};
use crate::format::SourceFormat;
use crate::palette;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PALETTE_REF_PREFIX: &str = "{palette:";
const FILE_REF_PREFIX: &str = "{file:";
const REF_SUFFIX: &str = "}";

/// A parsed reference string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reference<'a> {
    Palette { name: &'a str, family: Option<&'a str> },
    File(&'a str),
}

impl<'a> Reference<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        let body = move |prefix: &str| {
            s.strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(REF_SUFFIX))
        };

        if let Some(inner) = body(PALETTE_REF_PREFIX) {
            let (name, family) = match inner.split_once('.') {
                Some((name, family)) => (name, Some(family)),
                None => (inner, None),
            };
            Some(Reference::Palette { name, family })
        } else {
            body(FILE_REF_PREFIX).map(Reference::File)
        }
    }
}

/// Resolve a `{file:…}` path relative to a base directory.
///
/// - A path starting with `/` is used as is
/// - `~` and `~/…` expand to the home directory
/// - Anything else is joined onto `base_dir`
pub fn resolve_include_path(include_path: &str, base_dir: &Path) -> PathBuf {
    if include_path.starts_with('/') {
        return PathBuf::from(include_path);
    }

    if let Some(home) = dirs::home_dir() {
        if include_path == "~" {
            return home;
        }
        if let Some(rest) = include_path.strip_prefix("~/") {
            return home.join(rest);
        }
    }

    base_dir.join(include_path)
}

/// Replace every reference in `value`.
///
/// `origin` is the file `value` was parsed from. It anchors relative
/// `{file:…}` paths and names the file in errors.
pub(crate) fn resolve_references(value: &mut Value, origin: &Path) -> ConfigResult<()> {
    let mut resolver = Resolver {
        stack: vec![identity(origin)],
        errors: Vec::new(),
    };
    resolver.walk(value, origin);

    let mut errors = resolver.errors.into_iter();
    match errors.next() {
        None => Ok(()),
        Some(first) => {
            for other in errors {
                warn!("Additional reference failure: {}", other);
            }
            Err(first)
        }
    }
}

struct Resolver {
    /// Files currently being resolved, outermost first.
    stack: Vec<PathBuf>,
    errors: Vec<ConfigError>,
}

impl Resolver {
    fn walk(&mut self, value: &mut Value, origin: &Path) {
        match value {
            Value::String(s) => {
                if !s.starts_with('{') {
                    return;
                }
                let written = s.clone();
                let Some(reference) = Reference::parse(&written) else {
                    return;
                };
                match self.resolve(reference, &written, origin) {
                    Ok(resolved) => *value = resolved,
                    Err(e) => {
                        warn!("Failed to resolve {}: {}", written, e);
                        self.errors.push(e);
                    }
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.walk(item, origin);
                }
            }
            Value::Object(table) => {
                for (_key, item) in table.iter_mut() {
                    self.walk(item, origin);
                }
            }
            _ => {}
        }
    }

    fn resolve(
        &mut self,
        reference: Reference<'_>,
        written: &str,
        origin: &Path,
    ) -> ConfigResult<Value> {
        match reference {
            Reference::Palette { name, family } => resolve_palette(name, family, written, origin),
            Reference::File(include_path) => self.resolve_file(include_path, written, origin),
        }
    }

    fn resolve_file(
        &mut self,
        include_path: &str,
        written: &str,
        origin: &Path,
    ) -> ConfigResult<Value> {
        if include_path.trim().is_empty() {
            return Err(ConfigError::unresolved(origin, written, "empty file path"));
        }

        let base_dir = origin.parent().unwrap_or_else(|| Path::new("."));
        let target = resolve_include_path(include_path, base_dir);
        debug!(
            "Processing file reference: {} -> {}",
            include_path,
            target.display()
        );

        if !target.is_file() {
            return Err(ConfigError::unresolved(
                origin,
                written,
                format!("file not found: {}", target.display()),
            ));
        }

        let id = identity(&target);
        if self.stack.contains(&id) {
            let chain: Vec<String> = self
                .stack
                .iter()
                .chain(std::iter::once(&id))
                .map(|p| p.display().to_string())
                .collect();
            return Err(ConfigError::unresolved(
                origin,
                written,
                format!("reference cycle: {}", chain.join(" -> ")),
            ));
        }

        let content = std::fs::read_to_string(&target).map_err(|e| {
            ConfigError::unresolved(
                origin,
                written,
                format!("cannot read {}: {}", target.display(), e),
            )
        })?;

        let Ok(format) = SourceFormat::from_path(&target) else {
            return Ok(Value::String(content.trim().to_string()));
        };

        let mut included = format.parse_value(&content, &target)?;
        self.stack.push(id);
        self.walk(&mut included, &target);
        self.stack.pop();
        Ok(included)
    }
}

fn resolve_palette(
    name: &str,
    family: Option<&str>,
    written: &str,
    origin: &Path,
) -> ConfigResult<Value> {
    if palette::named(name).is_none() {
        return Err(ConfigError::unresolved(
            origin,
            written,
            format!(
                "unknown palette `{}`; expected one of: {}",
                name,
                palette::PALETTE_NAMES.join(", ")
            ),
        ));
    }

    let to_value = |v: Result<Value, serde_json::Error>| {
        v.map_err(|e| ConfigError::unresolved(origin, written, e.to_string()))
    };

    match family {
        None => {
            debug!("Importing palette: {}", name);
            to_value(serde_json::to_value(palette::named(name).unwrap_or_default()))
        }
        Some(family) => match palette::family(name, family) {
            Some(colour) => {
                debug!("Importing colour {}.{}", name, family);
                to_value(serde_json::to_value(colour))
            }
            None => Err(ConfigError::unresolved(
                origin,
                written,
                format!("palette `{}` has no colour `{}`", name, family),
            )),
        },
    }
}

/// Stable identity of a file for cycle detection.
fn identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn resolve_in(dir: &TempDir, mut value: Value) -> ConfigResult<Value> {
        let origin = dir.path().join("breeze.config.json");
        resolve_references(&mut value, &origin)?;
        Ok(value)
    }

    #[test]
    fn parses_reference_forms() {
        assert_eq!(
            Reference::parse("{palette:tailwind}"),
            Some(Reference::Palette {
                name: "tailwind",
                family: None
            })
        );
        assert_eq!(
            Reference::parse("{palette:tailwind.coolGray}"),
            Some(Reference::Palette {
                name: "tailwind",
                family: Some("coolGray")
            })
        );
        assert_eq!(
            Reference::parse("{file:colors.json}"),
            Some(Reference::File("colors.json"))
        );
        assert_eq!(Reference::parse("palette:tailwind"), None);
        assert_eq!(Reference::parse("{palette:tailwind"), None);
        assert_eq!(Reference::parse("#3b82f6"), None);
    }

    #[test]
    fn relative_and_absolute_include_paths() {
        let base = Path::new("/project");
        assert_eq!(
            resolve_include_path("tokens/colors.json", base),
            PathBuf::from("/project/tokens/colors.json")
        );
        assert_eq!(
            resolve_include_path("/etc/breeze/colors.json", base),
            PathBuf::from("/etc/breeze/colors.json")
        );
    }

    #[test]
    fn home_relative_include_path() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                resolve_include_path("~/tokens.json", Path::new("/project")),
                home.join("tokens.json")
            );
        }
    }

    #[test]
    fn whole_palette_reference() {
        let dir = TempDir::new().unwrap();
        let value = resolve_in(&dir, json!({"colors": "{palette:tailwind}"})).unwrap();
        assert_eq!(value["colors"]["coolGray"]["500"], json!("#6b7280"));
        assert_eq!(value["colors"]["white"], json!("#fff"));
    }

    #[test]
    fn family_reference_inside_extension() {
        let dir = TempDir::new().unwrap();
        let value = resolve_in(
            &dir,
            json!({"theme": {"extend": {"colors": {"gray": "{palette:tailwind.coolGray}"}}}}),
        )
        .unwrap();
        assert_eq!(
            value["theme"]["extend"]["colors"]["gray"]["900"],
            json!("#111827")
        );
    }

    #[test]
    fn unknown_palette_is_unresolved() {
        let dir = TempDir::new().unwrap();
        let err = resolve_in(&dir, json!({"colors": "{palette:solarized}"})).unwrap_err();
        match err {
            ConfigError::UnresolvedReference {
                reference, reason, ..
            } => {
                assert_eq!(reference, "{palette:solarized}");
                assert!(reason.contains("solarized"));
            }
            other => panic!("expected UnresolvedReference, got {other:?}"),
        }
    }

    #[test]
    fn unknown_family_is_unresolved() {
        let dir = TempDir::new().unwrap();
        let err = resolve_in(&dir, json!({"colors": {"x": "{palette:default.mauve}"}}))
            .unwrap_err();
        assert!(err.is_unresolved_reference());
    }

    #[test]
    fn file_reference_is_parsed_by_extension() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("tokens")).unwrap();
        fs::write(
            dir.path().join("tokens/fonts.json"),
            r#"{"sans": ["Inter", "sans-serif"]}"#,
        )
        .unwrap();

        let value = resolve_in(
            &dir,
            json!({"theme": {"extend": {"fontFamily": "{file:tokens/fonts.json}"}}}),
        )
        .unwrap();
        assert_eq!(
            value["theme"]["extend"]["fontFamily"]["sans"],
            json!(["Inter", "sans-serif"])
        );
    }

    #[test]
    fn nested_file_references_are_relative_to_their_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("tokens")).unwrap();
        fs::write(
            dir.path().join("tokens/colors.json"),
            r#"{"brand": "{file:brand.txt}", "gray": "{palette:default.gray}"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("tokens/brand.txt"), "#0ea5e9\n").unwrap();

        let value = resolve_in(&dir, json!({"colors": "{file:tokens/colors.json}"})).unwrap();
        assert_eq!(value["colors"]["brand"], json!("#0ea5e9"));
        assert_eq!(value["colors"]["gray"]["100"], json!("#f3f4f6"));
    }

    #[test]
    fn missing_file_is_unresolved() {
        let dir = TempDir::new().unwrap();
        let err = resolve_in(&dir, json!({"colors": "{file:nope.json}"})).unwrap_err();
        match err {
            ConfigError::UnresolvedReference { reason, .. } => {
                assert!(reason.contains("not found"));
            }
            other => panic!("expected UnresolvedReference, got {other:?}"),
        }
    }

    #[test]
    fn reference_cycle_is_unresolved() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"next": "{file:b.json}"}"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{"next": "{file:a.json}"}"#).unwrap();

        let err = resolve_in(&dir, json!({"colors": "{file:a.json}"})).unwrap_err();
        match err {
            ConfigError::UnresolvedReference { reason, path, .. } => {
                assert!(reason.contains("cycle"));
                assert!(path.ends_with("b.json"));
            }
            other => panic!("expected UnresolvedReference, got {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let dir = TempDir::new().unwrap();
        let origin = dir.path().join("breeze.config.json");
        fs::write(&origin, r#"{"colors": "{file:breeze.config.json}"}"#).unwrap();

        let mut value = json!({"colors": "{file:breeze.config.json}"});
        let err = resolve_references(&mut value, &origin).unwrap_err();
        assert!(err.is_unresolved_reference());
    }

    #[test]
    fn malformed_included_file_names_that_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("colors.json"), "{ not json").unwrap();

        let err = resolve_in(&dir, json!({"colors": "{file:colors.json}"})).unwrap_err();
        match err {
            ConfigError::MalformedConfig { path, .. } => {
                assert!(path.ends_with("colors.json"));
            }
            other => panic!("expected MalformedConfig, got {other:?}"),
        }
    }

    #[test]
    fn first_of_several_failures_is_returned() {
        let dir = TempDir::new().unwrap();
        let err = resolve_in(
            &dir,
            json!({"colors": ["{palette:first}", "{palette:second}"]}),
        )
        .unwrap_err();
        match err {
            ConfigError::UnresolvedReference { reference, .. } => {
                assert_eq!(reference, "{palette:first}");
            }
            other => panic!("expected UnresolvedReference, got {other:?}"),
        }
    }

    #[test]
    fn failures_in_a_table_are_ordered_by_key() {
        let dir = TempDir::new().unwrap();
        let err = resolve_in(
            &dir,
            json!({"zeta": "{palette:first}", "alpha": "{palette:second}"}),
        )
        .unwrap_err();
        match err {
            ConfigError::UnresolvedReference { reference, .. } => {
                assert_eq!(reference, "{palette:second}");
            }
            other => panic!("expected UnresolvedReference, got {other:?}"),
        }
    }

    #[test]
    fn plain_strings_are_untouched() {
        let dir = TempDir::new().unwrap();
        let input = json!({"darkMode": "class", "plugins": ["forms"]});
        assert_eq!(resolve_in(&dir, input.clone()).unwrap(), input);
    }
}
