use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for reading and rendering roadmap sources.
///
/// Loaded from `roadmap.toml`. Every field has a default, so an empty file
/// (or no file at all) gives the conventions the roadmap sources use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Lines whose first non-blank characters are this prefix are dropped
    /// before scanning.
    comment_prefix: String,

    /// Regular expression locating included documents in a root file.
    ///
    /// The first capture group is the referenced document.
    include_pattern: String,

    /// Extension appended to document references that have none.
    source_extension: String,

    /// The status cell written into every row of the Confluence table.
    pub status_macro: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comment_prefix: default_comment_prefix(),
            include_pattern: default_include_pattern(),
            source_extension: default_source_extension(),
            status_macro: default_status_macro(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration at `path`, falling back to the defaults when
    /// it is missing or unreadable.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Using default config: {e}");
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the comment prefix.
    #[must_use]
    pub fn comment_prefix(&self) -> &str {
        &self.comment_prefix
    }

    /// Returns the include pattern.
    #[must_use]
    pub fn include_pattern(&self) -> &str {
        &self.include_pattern
    }

    /// Returns the default source extension, without the leading dot.
    #[must_use]
    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }
}

fn default_comment_prefix() -> String {
    "%".to_owned()
}

fn default_include_pattern() -> String {
    r"\\include\{([A-Za-z0-9_/-]+)\}".to_owned()
}

fn default_source_extension() -> String {
    "tex".to_owned()
}

fn default_status_macro() -> String {
    "{status:colour=Gray|title=Waiting}".to_owned()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_comment_prefix")]
        comment_prefix: String,

        #[serde(default = "default_include_pattern")]
        include_pattern: String,

        #[serde(default = "default_source_extension")]
        source_extension: String,

        #[serde(default = "default_status_macro")]
        status_macro: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                comment_prefix,
                include_pattern,
                source_extension,
                status_macro,
            } => Self {
                comment_prefix,
                include_pattern,
                source_extension,
                status_macro,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            comment_prefix: config.comment_prefix,
            include_pattern: config.include_pattern,
            source_extension: config.source_extension,
            status_macro: config.status_macro,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ncomment_prefix = \"#\"\nsource_extension = \"ltx\"\nstatus_macro = \"-\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.comment_prefix(), "#");
        assert_eq!(config.source_extension(), "ltx");
        assert_eq!(config.status_macro, "-");
        assert_eq!(config.include_pattern(), default_include_pattern());
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_or_default_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&tmp.path().join("missing.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ncomment_prefix = 3\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("roadmap.toml");
        let mut config = Config::default();
        config.status_macro = "{status:colour=Green|title=Done}".to_owned();

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
