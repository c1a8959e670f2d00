//! Configuration for the kinship engine and its data files.
//!
//! Load order: `.kin/config.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KinConfig {
    pub language: LanguageConfig,
    pub search: SearchConfig,
    pub data: DataConfig,
}

/// Which language terms are rendered in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Language key requested from every dictionary term (e.g. "te", "kn", "en").
    pub active: String,
    /// Key used when a term has no entry for `active`.
    pub fallback: String,
}

/// Relationship search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Longest relationship path, in edges, that the path finder will discover.
    pub max_depth: usize,
}

/// Data file locations, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub people_file: PathBuf,
    pub dictionary_file: PathBuf,
    /// Default home person for commands that take `--home`.
    pub home_person: Option<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            active: "te".to_string(),
            fallback: "te".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            people_file: PathBuf::from("family_data.json"),
            dictionary_file: PathBuf::from("relationships.json"),
            home_person: None,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl KinConfig {
    /// Load config from `.kin/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".kin").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("KIN_LANGUAGE", &mut config.language.active);
        env_override("KIN_FALLBACK_LANGUAGE", &mut config.language.fallback);
        env_override("KIN_MAX_DEPTH", &mut config.search.max_depth);
        if let Ok(home) = std::env::var("KIN_HOME")
            && !home.trim().is_empty()
        {
            config.data.home_person = Some(home.trim().to_string());
        }

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Lowercase language keys so `TE` and `te` select the same terms.
    pub fn normalize(&mut self) {
        self.language.active = self.language.active.trim().to_lowercase();
        self.language.fallback = self.language.fallback.trim().to_lowercase();
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.max_depth == 0 {
            anyhow::bail!("search.max_depth must be at least 1");
        }
        if self.language.active.is_empty() {
            anyhow::bail!("language.active must not be empty");
        }
        Ok(())
    }

    pub fn people_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.data.people_file)
    }

    pub fn dictionary_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.data.dictionary_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KinConfig::default();
        assert_eq!(config.language.active, "te");
        assert_eq!(config.language.fallback, "te");
        assert_eq!(config.search.max_depth, 8);
        assert_eq!(config.data.people_file, PathBuf::from("family_data.json"));
        assert!(config.data.home_person.is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[language]
active = "kn"

[search]
max_depth = 5

[data]
home_person = "I12"
"#;
        let config: KinConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.language.active, "kn");
        assert_eq!(config.search.max_depth, 5);
        assert_eq!(config.data.home_person.as_deref(), Some("I12"));
        // Defaults for unspecified fields
        assert_eq!(config.language.fallback, "te");
        assert_eq!(config.data.dictionary_file, PathBuf::from("relationships.json"));
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = KinConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert!(config.search.max_depth >= 1);
    }

    #[test]
    fn test_load_normalizes_language_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let kin_dir = tmp.path().join(".kin");
        std::fs::create_dir_all(&kin_dir).unwrap();
        std::fs::write(
            kin_dir.join("config.toml"),
            r#"
[language]
active = " EN "
fallback = "TE"
"#,
        )
        .unwrap();

        let mut config: KinConfig =
            toml::from_str(&std::fs::read_to_string(kin_dir.join("config.toml")).unwrap())
                .unwrap();
        config.normalize();
        assert_eq!(config.language.active, "en");
        assert_eq!(config.language.fallback, "te");
    }

    #[test]
    fn test_zero_depth_rejected() {
        let mut config = KinConfig::default();
        config.search.max_depth = 0;
        assert!(config.validate().is_err());
    }
}
