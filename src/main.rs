// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use log::{error, info, warn};
use std::sync::Arc;
use tt_dl::{
    cli::Cli, config::file::resolve_config_dir, error::AppError, logging, run_from_cli, ui,
};

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }

    let after_help = format!(
        "Examples:\n  # Interactive session\n  {bin} -i\n\n  # Extract one link and save the video\n  {bin} --url \"https://www.tiktok.com/@user/video/123\" -d\n\n  # Use another API server\n  {bin} -i --server http://10.0.0.5:8000\n\n  # Switch between dark and light output\n  {bin} --toggle-theme",
        bin = clap::crate_name!()
    );
    let cmd = Cli::command()
        .override_usage(format!("{} <MODE> [OPTIONS]", clap::crate_name!()))
        .after_help(after_help);
    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };

    if let Ok(dir) = resolve_config_dir(args.config_dir.as_deref()) {
        logging::init_logger(args.log_level, &dir);
    }

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("无法监听 Ctrl-C 信号: {}", e);
            return;
        }
        warn!("用户通过 Ctrl+C 中断程序。");
        eprintln!("\n{} Interrupted.", *ui::WARN);
        std::process::exit(130);
    });

    if let Err(e) = run_from_cli(args).await {
        match e {
            AppError::UserInterrupt => {
                warn!("程序被用户中断。");
                std::process::exit(130);
            }
            // 已由界面展示过
            AppError::AttemptFailed(msg) => {
                error!("提取失败: {}", msg);
                std::process::exit(1);
            }
            _ => {
                error!("程序执行出错: {}", e);
                ui::error(&format!("Error: {}", e));
                std::process::exit(1);
            }
        }
    }
    info!("程序正常退出。");
}
