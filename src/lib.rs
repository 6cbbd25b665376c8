// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod logging;
pub mod models;
pub mod presenter;
pub mod proxy;
pub mod settings;
pub mod ui;
pub mod utils;
pub mod workflow;

mod modes;

use crate::{
    cli::Cli,
    client::ApiClient,
    config::AppConfig,
    error::AppResult,
    settings::{FileSettingsStore, SettingsStore},
};
use log::debug;
use std::sync::Arc;

/// 各模式共享的运行上下文
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub client: ApiClient,
    pub settings: Arc<dyn SettingsStore>,
    pub args: Arc<Cli>,
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);

    let config = Arc::new(AppConfig::new(&args)?);
    debug!("加载的应用配置: {:?}", config);

    let settings: Arc<dyn SettingsStore> = Arc::new(FileSettingsStore::in_dir(&config.config_dir));
    if args.toggle_theme {
        return modes::run_toggle_theme(settings.as_ref());
    }

    let context = AppContext {
        client: ApiClient::new(config.clone())?,
        config,
        settings,
        args: args.clone(),
    };

    if args.interactive {
        modes::run_interactive(context).await
    } else {
        modes::run_single(context).await
    }
}
