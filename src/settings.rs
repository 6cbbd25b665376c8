// src/settings.rs

//! 界面主题的持久化。与下载流程完全解耦，只通过 `SettingsStore` 注入。

use crate::{
    constants,
    error::{AppError, AppResult},
};
use anyhow::Context;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// 无法识别的值返回 `None`，由调用方回退到默认主题
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait SettingsStore: Send + Sync {
    fn load_theme(&self) -> Theme;
    fn save_theme(&self, theme: Theme) -> AppResult<()>;

    /// 读取、翻转并写回，返回新主题
    fn toggle_theme(&self) -> AppResult<Theme> {
        let next = self.load_theme().toggle();
        self.save_theme(next)?;
        Ok(next)
    }
}

/// 以 JSON 文件保存设置，主题存放在单一键 `theme` 下。
/// 文件中的其它键原样保留。
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(config_dir: &Path) -> Self {
        Self::new(config_dir.join(constants::SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> AppResult<Map<String, Value>> {
        if !self.path.is_file() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read settings file '{}'", self.path.display()))?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn load_theme(&self) -> Theme {
        let map = match self.read_map() {
            Ok(map) => map,
            Err(e) => {
                warn!("设置文件不可用，使用默认主题: {}", e);
                return Theme::default();
            }
        };
        map.get(constants::settings::THEME_KEY)
            .and_then(Value::as_str)
            .and_then(Theme::parse)
            .unwrap_or_default()
    }

    fn save_theme(&self, theme: Theme) -> AppResult<()> {
        // 文件损坏时直接覆盖，而不是让保存失败
        let mut map = self.read_map().unwrap_or_default();
        map.insert(
            constants::settings::THEME_KEY.to_string(),
            Value::String(theme.as_str().to_string()),
        );
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json_content = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, json_content)
            .with_context(|| format!("failed to save settings to '{}'", self.path.display()))
            .map_err(AppError::from)?;
        debug!("主题已保存: {} -> {}", theme, self.path.display());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySettingsStore {
    theme: Mutex<Option<Theme>>,
}

impl MemorySettingsStore {
    pub fn with_theme(theme: Theme) -> Self {
        Self { theme: Mutex::new(Some(theme)) }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load_theme(&self) -> Theme {
        self.theme.lock().map(|t| (*t).unwrap_or_default()).unwrap_or_default()
    }

    fn save_theme(&self, theme: Theme) -> AppResult<()> {
        if let Ok(mut slot) = self.theme.lock() {
            *slot = Some(theme);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_defaults_to_dark_and_toggles() {
        let store = MemorySettingsStore::default();
        assert_eq!(store.load_theme(), Theme::Dark);
        assert_eq!(store.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(store.load_theme(), Theme::Light);
        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);

        let light = MemorySettingsStore::with_theme(Theme::Light);
        assert_eq!(light.toggle_theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn file_store_round_trips_and_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"other": 1}"#).unwrap();

        let store = FileSettingsStore::new(&path);
        assert_eq!(store.load_theme(), Theme::Dark);
        store.save_theme(Theme::Light).unwrap();

        let reopened = FileSettingsStore::new(&path);
        assert_eq!(reopened.load_theme(), Theme::Light);
        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["other"], 1);
        assert_eq!(raw["theme"], "light");
    }

    #[test]
    fn file_store_falls_back_on_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        let store = FileSettingsStore::new(&path);
        assert_eq!(store.load_theme(), Theme::Dark);

        fs::write(&path, r#"{"theme": "purple"}"#).unwrap();
        assert_eq!(store.load_theme(), Theme::Dark);

        store.save_theme(Theme::Light).unwrap();
        assert_eq!(store.load_theme(), Theme::Light);
    }

    #[test]
    fn file_store_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::in_dir(&dir.path().join("nested"));
        store.save_theme(Theme::Light).unwrap();
        assert!(store.path().is_file());
    }
}
