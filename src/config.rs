use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Имя файла конфигурации рядом с исполняемым файлом
pub const CONFIG_FILE_NAME: &str = "focus-window.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cascade: CascadeConfig,
    /// Эмулировать рабочий стол вместо реальных вызовов Win32
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    /// Дублировать журнал в файл (в release-сборке под Windows консоли нет)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CascadeConfig {
    pub delay_ms: u64,
    pub file_name: String,
    /// Явный путь к файлу ко-триггеров вместо поиска рядом с exe
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            file_name: "co-triggers.json".to_string(),
            path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            cascade: CascadeConfig::default(),
            dry_run: false,
        }
    }
}

impl CascadeConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Config {
    /// Загрузить конфигурацию: значения по умолчанию, затем TOML-файл (если есть),
    /// затем переменные окружения `FOCUS_*` (`FOCUS_CASCADE__DELAY_MS=250`)
    pub fn load<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = config_path.as_ref() {
            figment = figment.merge(Toml::file(path.as_ref()));
        }

        let config: Config = figment
            .merge(Env::prefixed("FOCUS_").split("__"))
            .extract()
            .with_context(|| match config_path.as_ref() {
                Some(path) => format!("Не удалось загрузить конфигурацию из {:?}", path.as_ref()),
                None => "Не удалось загрузить конфигурацию из окружения".to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Путь к файлу конфигурации: `FOCUS_CONFIG` или `focus-window.toml` рядом с exe
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("FOCUS_CONFIG") {
            return Some(PathBuf::from(path));
        }
        crate::utils::find_exe_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "full" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация настроек каскада
        if self.cascade.file_name.trim().is_empty() {
            anyhow::bail!("cascade.file_name не может быть пустым");
        }

        if self.cascade.delay_ms > 10_000 {
            anyhow::bail!("cascade.delay_ms должно быть не больше 10000");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cascade.delay(), Duration::from_millis(100));
        assert_eq!(config.cascade.file_name, "co-triggers.json");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.format = "json".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cascade.file_name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cascade.delay_ms = 60_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_toml_keeps_defaults() {
        let path = std::env::temp_dir().join(format!(
            "focus-window-config-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "dry_run = true\n[cascade]\ndelay_ms = 250\nfile_name = \"links.json\"\n")
            .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert!(config.dry_run);
        assert_eq!(config.cascade.delay_ms, 250);
        assert_eq!(config.cascade.file_name, "links.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let missing = std::env::temp_dir().join("focus-window-definitely-missing.toml");
        let config = Config::load(Some(&missing)).unwrap();
        assert_eq!(config.cascade.delay_ms, 100);
    }
}
