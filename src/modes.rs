// src/modes.rs

use crate::{
    AppContext,
    constants::messages,
    downloader::ProxyDownloader,
    error::{AppError, AppResult},
    models::VideoResult,
    presenter::TerminalView,
    settings::SettingsStore,
    ui,
    workflow::{DownloadWorkflow, WorkflowState},
};
use indicatif::HumanBytes;
use log::{error, info, warn};
use std::io;

const EXIT_COMMANDS: [&str; 3] = ["q", "quit", "exit"];

fn new_workflow(context: &AppContext) -> DownloadWorkflow<crate::client::ApiClient, TerminalView> {
    let theme = context.settings.load_theme();
    let view = TerminalView::new(theme, context.config.api_base_url.clone());
    DownloadWorkflow::new(context.client.clone(), view)
        .with_empty_input_message(context.config.empty_input_message.clone())
}

/// 成功后按需经代理保存文件。失败只提示，不改变已展示的结果。
async fn save_if_requested(context: &AppContext, video: &VideoResult) -> AppResult<()> {
    if !context.args.download {
        return Ok(());
    }
    let downloader = ProxyDownloader::new(context.client.clone(), &context.config.output_dir);
    match downloader.download(video).await {
        Ok(saved) => {
            let shown = dunce::canonicalize(&saved.path).unwrap_or(saved.path);
            ui::success(&format!("Saved {} ({})", shown.display(), HumanBytes(saved.bytes)));
            Ok(())
        }
        Err(e) => {
            error!("代理下载失败 '{}': {}", video.video_id, e);
            let message = format!("Download failed: {}", e);
            ui::error(&message);
            Err(AppError::AttemptFailed(message))
        }
    }
}

/// 单次模式 (--url)
pub(crate) async fn run_single(context: AppContext) -> AppResult<()> {
    let raw = context.args.url.clone().unwrap_or_default();
    let mut workflow = new_workflow(&context);

    let state = workflow.submit(&raw).await.clone();
    drop(workflow);
    match state {
        WorkflowState::Success(video) => save_if_requested(&context, &video).await,
        WorkflowState::Error(message) => Err(AppError::AttemptFailed(message)),
        // submit 总会离开 Loading
        other => Err(AppError::AttemptFailed(format!("unexpected state {}", other.name()))),
    }
}

/// 交互模式: 每按一次回车发起一次尝试
pub(crate) async fn run_interactive(context: AppContext) -> AppResult<()> {
    ui::print_header("Interactive mode");
    ui::plain(&format!(
        "Paste a TikTok link and press Enter. Type 'q' or press {} to quit.",
        *ui::CTRL_C
    ));

    let mut workflow = new_workflow(&context);
    loop {
        let input = match ui::prompt("Video URL") {
            Ok(Some(input)) => input,
            Ok(None) => break,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("输入不是合法的 UTF-8: {}", e);
                ui::error(messages::INVALID_INPUT);
                continue;
            }
            Err(e) => {
                error!("读取输入失败: {}", e);
                return Err(AppError::Io(e));
            }
        };
        if EXIT_COMMANDS.contains(&input.trim().to_lowercase().as_str()) {
            break;
        }

        let video = workflow.submit(&input).await.video().cloned();
        if let Some(video) = video {
            // 保存失败已提示过，继续等待下一次输入
            let _ = save_if_requested(&context, &video).await;
        }
    }

    ui::plain("");
    ui::info("Leaving interactive mode.");
    Ok(())
}

pub(crate) fn run_toggle_theme(settings: &dyn SettingsStore) -> AppResult<()> {
    let theme = settings.toggle_theme()?;
    info!("主题切换为 {}", theme);
    ui::success(&format!("Theme switched to {}", theme));
    Ok(())
}
