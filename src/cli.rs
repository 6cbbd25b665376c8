// src/cli.rs

use crate::constants;
use clap::{Parser, ValueEnum, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&["interactive", "url", "toggle_theme"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// Start an interactive session: paste a link, press Enter
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub interactive: bool,
    /// Extract a single video link
    #[arg(long, help_heading = "Mode")]
    pub url: Option<String>,
    /// Switch between the dark and light theme and remember the choice
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub toggle_theme: bool,

    // --- 选项 (Options) ---
    /// Base URL of the extraction API server
    #[arg(long, value_name = "URL", help_heading = "Options")]
    pub server: Option<String>,
    /// Save the video through the proxy after a successful extraction
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub download: bool,
    /// Directory for downloaded videos
    #[arg(short, long, value_name = "DIR", default_value_os_t = PathBuf::from(constants::DEFAULT_SAVE_DIR), help_heading = "Options")]
    pub output: PathBuf,

    // --- 通用选项 (General) ---
    /// Print help
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// Print version
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 覆盖配置目录，默认 ~/.tt-dl
    #[arg(long, value_name = "DIR", global = true, hide = true)]
    pub config_dir: Option<PathBuf>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}
