// src/config/file.rs

use crate::{
    config::ExternalConfig,
    constants,
    error::{AppError, AppResult},
};
use anyhow::{Context, anyhow};
use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// 配置目录: 命令行覆盖优先，否则为 `~/.tt-dl`
pub fn resolve_config_dir(override_dir: Option<&Path>) -> AppResult<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    let dir = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("could not determine the home directory")))?
        .join(constants::CONFIG_DIR_NAME);
    Ok(dir)
}

pub(crate) fn load_or_create_external_config(config_dir: &Path) -> AppResult<ExternalConfig> {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    if config_path.is_file() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file '{}'", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file '{}'", config_path.display()))
            .map_err(AppError::from)
    } else {
        info!("配置文件 {:?} 不存在，将创建默认配置。", config_path);
        let config = ExternalConfig::default();

        fs::create_dir_all(config_dir)?;
        let json_content = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, json_content)?;

        Ok(config)
    }
}

/// 服务器地址的来源优先级: 命令行 > 环境变量 > 配置文件 > 内置默认值。
/// 返回地址以及来源描述。
pub fn resolve_server(
    cli_server: Option<&str>,
    env_server: Option<String>,
    file_server: Option<&str>,
) -> (String, &'static str) {
    if let Some(server) = cli_server.filter(|s| !s.trim().is_empty()) {
        debug!("使用来自命令行参数的服务器地址");
        return (server.trim().to_string(), "command line");
    }
    if let Some(server) = env_server.filter(|s| !s.trim().is_empty()) {
        debug!("使用来自环境变量 {} 的服务器地址", constants::SERVER_ENV_VAR);
        return (server.trim().to_string(), "environment");
    }
    if let Some(server) = file_server.filter(|s| !s.trim().is_empty()) {
        debug!("使用来自本地配置文件的服务器地址");
        return (server.trim().to_string(), "config file");
    }
    debug!("使用内置默认服务器地址");
    (constants::DEFAULT_SERVER.to_string(), "default")
}
