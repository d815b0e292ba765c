use crate::error::{MergeError, Result};
use crate::paragraph::ParseOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "srtmerge.json";
const DEFAULT_SOURCE: &str = "subtitles.txt";
const DEFAULT_TEMPLATE: &str = "subtitles-template.srt";
const DEFAULT_OUTPUT: &str = "subtitles.srt";

/// Where to read from and write to, stored in srtmerge.json
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MergeConfig {
    /// Plain text with one subtitle per paragraph
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// SRT scaffold with `{0}`, `{1}`, ... placeholders
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Merged subtitle file; a previous one is backed up first
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Keep a last paragraph that has no blank line after it
    #[serde(default)]
    pub flush_trailing: bool,
}

fn default_source() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE)
}

fn default_template() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            template: default_template(),
            output: default_output(),
            flush_trailing: false,
        }
    }
}

impl MergeConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(config_path)
    }

    /// Load an explicitly named config file; a missing file is an error
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MergeError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: MergeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolve relative paths against `base`
    pub fn rooted_at<P: AsRef<Path>>(mut self, base: P) -> Self {
        let base = base.as_ref();
        for path in [&mut self.source, &mut self.template, &mut self.output] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            flush_trailing: self.flush_trailing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = MergeConfig::default();
        assert_eq!(config.source, PathBuf::from("subtitles.txt"));
        assert_eq!(config.template, PathBuf::from("subtitles-template.srt"));
        assert_eq!(config.output, PathBuf::from("subtitles.srt"));
        assert!(!config.flush_trailing);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = MergeConfig::load(temp.path()).unwrap();
        assert_eq!(config, MergeConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"{ "output": "episode-01.srt", "flush_trailing": true }"#,
        )
        .unwrap();

        let config = MergeConfig::load(temp.path()).unwrap();
        assert_eq!(config.output, PathBuf::from("episode-01.srt"));
        assert_eq!(config.source, PathBuf::from("subtitles.txt"));
        assert!(config.parse_options().flush_trailing);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "{ not json").unwrap();

        let err = MergeConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, MergeError::Serialization(_)));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = MergeConfig::load_file(temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, MergeError::Config(_)));
    }

    #[test]
    fn test_rooted_at_keeps_absolute_paths() {
        let temp = TempDir::new().unwrap();
        let absolute = temp.path().join("elsewhere.srt");
        let config = MergeConfig {
            output: absolute.clone(),
            ..MergeConfig::default()
        }
        .rooted_at("/work");

        assert_eq!(config.source, PathBuf::from("/work/subtitles.txt"));
        assert_eq!(config.output, absolute);
    }
}
