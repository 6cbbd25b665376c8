// src/config.rs

pub mod file;

use self::file::{load_or_create_external_config, resolve_config_dir, resolve_server};
use crate::{cli::Cli, constants, error::AppResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    /// 默认不限制整体请求时长，只有显式配置时才生效
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub network: NetworkConfig,
    /// 输入为空时的提示文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_input_message: Option<String>,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            api_base_url: Some(constants::DEFAULT_SERVER.into()),
            network: NetworkConfig {
                connect_timeout_secs: Some(10),
                timeout_secs: None,
                user_agent: None,
            },
            empty_input_message: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Option<Duration>,
    pub empty_input_message: String,
    pub config_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let config_dir = resolve_config_dir(args.config_dir.as_deref())?;
        let external_config = load_or_create_external_config(&config_dir)?;

        let (server, source) = resolve_server(
            args.server.as_deref(),
            std::env::var(constants::SERVER_ENV_VAR).ok(),
            external_config.api_base_url.as_deref(),
        );
        info!("服务器地址 {} (来源: {})", server, source);

        Ok(Self {
            api_base_url: Url::parse(&server)?,
            user_agent: external_config
                .network
                .user_agent
                .unwrap_or_else(|| constants::USER_AGENT.into()),
            connect_timeout: Duration::from_secs(
                external_config.network.connect_timeout_secs.unwrap_or(10),
            ),
            timeout: external_config.network.timeout_secs.map(Duration::from_secs),
            empty_input_message: external_config
                .empty_input_message
                .unwrap_or_else(|| constants::messages::EMPTY_INPUT.into()),
            config_dir,
            output_dir: args.output.clone(),
        })
    }

    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        Ok(self.api_base_url.join(path)?)
    }
}

#[cfg(feature = "testing")]
impl AppConfig {
    /// 指向测试服务器的配置，不读写任何本地文件
    pub fn for_server(server: &str) -> Self {
        Self {
            api_base_url: Url::parse(server).expect("test server url"),
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Some(Duration::from_secs(15)),
            empty_input_message: constants::messages::EMPTY_INPUT.to_string(),
            config_dir: std::env::temp_dir().join(clap::crate_name!()),
            output_dir: PathBuf::from(constants::DEFAULT_SAVE_DIR),
        }
    }
}
