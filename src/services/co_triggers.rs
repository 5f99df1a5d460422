use crate::config::CascadeConfig;
use crate::debug_if_enabled;
use crate::error::Result;
use crate::utils::find_exe_dir;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Источник ко-триггеров: ключ -> упорядоченный список имён окон
pub trait CoTriggerSource {
    /// Пустой список, если ключа нет или источник недоступен
    fn co_triggers(&self, key: &str) -> Vec<String>;
}

/// Пары ключ-значение JSON-объекта в порядке файла, включая повторы ключей
struct RawEntries(Vec<(String, JsonValue)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("объект вида {\"ключ\": [\"окно\", ...]}")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<RawEntries, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, JsonValue>()? {
                    entries.push(entry);
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Таблица ко-триггеров из JSON вида `{"notes": ["calendar", "mail"]}`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoTriggerMap {
    entries: HashMap<String, Vec<String>>,
}

impl CoTriggerMap {
    /// Разобрать JSON. Ключи приводятся к нижнему регистру; при совпадении
    /// ключей (в том числе точных повторах) побеждает первый в порядке файла.
    pub fn parse(json: &str) -> Result<Self> {
        let RawEntries(root) = serde_json::from_str(json)?;
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();

        for (key, value) in root {
            let Some(items) = value.as_array() else {
                debug!("Ключ \"{}\" пропущен: значение не массив", key);
                continue;
            };

            let targets: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();

            entries.entry(key.trim().to_lowercase()).or_insert(targets);
        }

        Ok(Self { entries })
    }

    /// Прочитать файл. Отсутствующий или битый файл даёт пустую таблицу.
    pub fn load_or_empty(path: &Path) -> Self {
        if !path.exists() {
            debug!("Файл ко-триггеров {:?} не найден", path);
            return Self::default();
        }

        match Self::load(path) {
            Ok(map) => {
                info!("Ко-триггеры загружены из {:?}: {} ключей", path, map.len());
                map
            }
            Err(e) => {
                warn!("Файл ко-триггеров {:?} проигнорирован: {}", path, e);
                Self::default()
            }
        }
    }

    fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::parse(&json)
    }

    /// Найти файл по настройкам каскада и загрузить его
    pub fn discover(config: &CascadeConfig) -> Self {
        match Self::locate(config) {
            Some(path) => Self::load_or_empty(&path),
            None => {
                warn!("Не удалось определить путь к файлу ко-триггеров");
                Self::default()
            }
        }
    }

    fn locate(config: &CascadeConfig) -> Option<PathBuf> {
        if let Some(path) = &config.path {
            return Some(path.clone());
        }
        find_exe_dir().map(|dir| dir.join(&config.file_name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CoTriggerSource for CoTriggerMap {
    fn co_triggers(&self, key: &str) -> Vec<String> {
        let key = key.trim().to_lowercase();
        let targets = self.entries.get(&key).cloned().unwrap_or_default();
        debug_if_enabled!("Ко-триггеры для \"{}\": {:?}", key, targets);
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive_and_ordered() {
        let map = CoTriggerMap::parse(r#"{"Editor": ["terminal", "browser"]}"#).unwrap();

        assert_eq!(map.co_triggers("editor"), vec!["terminal", "browser"]);
        assert_eq!(map.co_triggers("EDITOR"), vec!["terminal", "browser"]);
        assert!(map.co_triggers("notes").is_empty());
    }

    #[test]
    fn test_values_are_not_keys() {
        let map = CoTriggerMap::parse(r#"{"notes": ["calendar", "mail"]}"#).unwrap();
        assert!(map.co_triggers("calendar").is_empty());
        assert!(map.co_triggers("mail").is_empty());
    }

    #[test]
    fn test_entries_are_cleaned() {
        let map = CoTriggerMap::parse(
            r#"{"notes": [" calendar ", "", 42, "mail"], "broken": "calendar"}"#,
        )
        .unwrap();

        assert_eq!(map.co_triggers("notes"), vec!["calendar", "mail"]);
        assert!(map.co_triggers("broken").is_empty());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_first_key_wins_after_folding() {
        let map = CoTriggerMap::parse(r#"{"Notes": ["calendar"], "notes": ["mail"]}"#).unwrap();
        assert_eq!(map.co_triggers("notes"), vec!["calendar"]);
    }

    #[test]
    fn test_first_of_exact_duplicate_keys_wins() {
        let map = CoTriggerMap::parse(
            r#"{"notes": ["calendar"], "editor": ["terminal"], "notes": ["mail"]}"#,
        )
        .unwrap();

        assert_eq!(map.co_triggers("notes"), vec!["calendar"]);
        assert_eq!(map.co_triggers("editor"), vec!["terminal"]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_malformed_or_missing_file_is_empty() {
        assert!(CoTriggerMap::parse("{\"notes\": [").is_err());
        assert!(CoTriggerMap::parse("[\"notes\"]").is_err());

        let dir = std::env::temp_dir();
        let broken = dir.join(format!("focus-window-broken-{}.json", std::process::id()));
        fs::write(&broken, "not json").unwrap();
        assert!(CoTriggerMap::load_or_empty(&broken).is_empty());
        fs::remove_file(&broken).ok();

        assert!(CoTriggerMap::load_or_empty(&dir.join("focus-window-missing.json")).is_empty());
    }

    #[test]
    fn test_discover_uses_explicit_path() {
        let path = std::env::temp_dir().join(format!(
            "focus-window-co-triggers-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"notes": ["calendar"]}"#).unwrap();

        let config = CascadeConfig {
            path: Some(path.clone()),
            ..CascadeConfig::default()
        };
        let map = CoTriggerMap::discover(&config);
        fs::remove_file(&path).ok();

        assert_eq!(map.co_triggers("Notes"), vec!["calendar"]);
    }
}
