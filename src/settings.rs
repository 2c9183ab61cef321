use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use kummersdorf::{
    config::{DEFAULT_EPSILON, DEFAULT_FREQ, DEFAULT_RISK_FREE},
    RatioConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::report::Language;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub freq: u32,
    pub rfr: f64,
    pub eps: f64,
    pub language: Language,
    /// Decimal places printed for every value.
    pub precision: usize,
    #[serde(skip)]
    pub file_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            freq: DEFAULT_FREQ,
            rfr: DEFAULT_RISK_FREE,
            eps: DEFAULT_EPSILON,
            language: Language::default(),
            precision: 4,
            file_path: None,
        }
    }
}

/// `Config.toml` inside the platform config directory.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    let base_dir = directories::BaseDirs::new()?;
    Some(base_dir.config_local_dir().join("lauscha").join("Config.toml"))
}

impl Settings {
    /// Defaults, then the platform config file if present, then `path`, then
    /// `LAUSCHA_*` environment variables.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let mut files = Vec::new();
        if let Some(default) = default_path().filter(|p| p.exists()) {
            files.push(default);
        }
        if let Some(path) = path {
            files.push(path.to_path_buf());
        }
        Self::load(&files)
    }

    pub fn load(files: &[PathBuf]) -> Result<Self> {
        let mut builder = Config::builder();
        for file in files {
            debug!(path = %file.display(), "adding config source");
            builder = builder.add_source(File::from(file.as_path()));
        }
        let settings = builder
            .add_source(Environment::with_prefix("LAUSCHA").try_parsing(true))
            .build()
            .context("can't load config")?;
        let mut settings = settings
            .try_deserialize::<Self>()
            .context("can't deserialize config")?;
        settings.file_path = files.last().cloned();
        if let Some(path) = &settings.file_path {
            info!(path = %path.display(), "loaded settings");
        }
        Ok(settings)
    }

    #[must_use]
    pub fn ratio_config(&self) -> RatioConfig {
        RatioConfig::new(self.freq, self.rfr).with_eps(self.eps)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("can't serialize settings")
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::Settings;
    use crate::report::Language;

    #[test]
    fn defaults_match_ratio_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ratio_config(), kummersdorf::RatioConfig::default());
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "freq = 12\nrfr = 0.002\nlanguage = \"zh\"").unwrap();
        let settings = Settings::load(&[file.path().to_path_buf()]).unwrap();
        assert_eq!(settings.freq, 12);
        assert_eq!(settings.rfr, 0.002);
        assert_eq!(settings.eps, kummersdorf::config::DEFAULT_EPSILON);
        assert_eq!(settings.language, Language::Zh);
        assert_eq!(settings.file_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn toml_skips_file_path() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        assert!(text.contains("freq = 252"));
        assert!(!text.contains("file_path"));
    }
}
