// src/presenter.rs

//! 结果卡片与界面接口。工作流只通过 `View` 操作界面。

use crate::{
    constants::messages,
    models::VideoResult,
    proxy,
    settings::Theme,
    ui::{self, Palette},
    utils,
};
use indicatif::ProgressBar;
use log::warn;
use std::io::{self, Write};
use url::Url;

pub trait View {
    /// 请求进行中: 触发器禁用并显示忙碌状态
    fn set_busy(&mut self, busy: bool);
    fn clear_output(&mut self);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    fn render(&mut self, card: &ResultCard);
    /// 把结果区域带到用户眼前
    fn reveal_result(&mut self) {}
}

/// 渲染所需的全部数据，均已格式化好。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub initial: String,
    pub handle: String,
    pub caption: String,
    pub plays: String,
    pub likes: String,
    pub shares: String,
    pub comments: Option<String>,
    pub music: Option<String>,
    pub duration: Option<String>,
    pub filename: String,
    /// 相对于服务器的代理下载链接
    pub download_url: String,
}

impl ResultCard {
    pub fn new(video: &VideoResult, download_url: String) -> Self {
        let initial = video
            .author
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_else(|| "?".to_string());
        let caption = video
            .caption
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(messages::NO_CAPTION)
            .to_string();

        Self {
            initial,
            handle: format!("@{}", video.author),
            caption,
            plays: utils::format_number(video.play_count.unwrap_or(0.0)),
            likes: utils::format_number(video.like_count.unwrap_or(0.0)),
            shares: utils::format_number(video.share_count.unwrap_or(0.0)),
            comments: video.comment_count.map(utils::format_number),
            music: video.music.clone().filter(|m| !m.is_empty()),
            duration: video.duration.map(utils::format_duration),
            filename: video.download_filename(),
            download_url,
        }
    }

    pub fn from_video(video: &VideoResult) -> Self {
        Self::new(video, proxy::build(video))
    }

    /// 卡片正文各行，链接由调用方解析成绝对地址后传入
    pub fn lines(&self, palette: &Palette, link: &str) -> Vec<String> {
        let mut lines = vec![
            format!(
                "{} {}",
                palette.accent(&format!("({})", self.initial)),
                palette.accent(&self.handle)
            ),
            palette.muted("TikTok Creator").to_string(),
            String::new(),
            self.caption.clone(),
            String::new(),
            format!(
                "▶ {} Plays   ♥ {} Likes   ↗ {} Shares",
                palette.secondary(&self.plays),
                palette.accent(&self.likes),
                palette.secondary(&self.shares)
            ),
        ];
        let mut extra = Vec::new();
        if let Some(comments) = &self.comments {
            extra.push(format!("{} Comments", comments));
        }
        if let Some(duration) = &self.duration {
            extra.push(format!("Duration {}", duration));
        }
        if let Some(music) = &self.music {
            extra.push(format!("♪ {}", music));
        }
        if !extra.is_empty() {
            lines.push(palette.muted(&extra.join("   ")).to_string());
        }
        lines.push(String::new());
        lines.push(format!("Download Video ({})", self.filename));
        lines.push(palette.link(link).to_string());
        lines
    }
}

/// 终端界面
pub struct TerminalView {
    palette: Palette,
    base_url: Url,
    spinner: Option<ProgressBar>,
}

impl TerminalView {
    pub fn new(theme: Theme, base_url: Url) -> Self {
        Self { palette: Palette::new(theme), base_url, spinner: None }
    }

    fn absolute_link(&self, relative: &str) -> String {
        match proxy::absolute(&self.base_url, relative) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("无法解析代理链接 '{}': {}", relative, e);
                relative.to_string()
            }
        }
    }
}

impl View for TerminalView {
    fn set_busy(&mut self, busy: bool) {
        if busy {
            if self.spinner.is_none() {
                self.spinner = Some(ui::new_spinner("Extracting video..."));
            }
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    // 终端输出只能追加，旧卡片留在滚动区，这里无需擦除
    fn clear_output(&mut self) {}

    fn show_error(&mut self, message: &str) {
        ui::error(message);
    }

    fn hide_error(&mut self) {}

    fn render(&mut self, card: &ResultCard) {
        let link = self.absolute_link(&card.download_url);
        let title = self.palette.accent("Video ready");
        ui::box_message(&title, &card.lines(&self.palette, &link));
    }

    fn reveal_result(&mut self) {
        let _ = io::stdout().flush();
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        self.set_busy(false);
    }
}

/// 记录调用顺序的界面替身
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Busy(bool),
    Clear,
    ShowError(String),
    HideError,
    Render,
    Reveal,
}

#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct RecordingView {
    pub busy: bool,
    pub error: Option<String>,
    pub rendered: Option<ResultCard>,
    pub calls: Vec<ViewCall>,
}

#[cfg(any(test, feature = "testing"))]
impl View for RecordingView {
    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.calls.push(ViewCall::Busy(busy));
    }

    fn clear_output(&mut self) {
        self.rendered = None;
        self.calls.push(ViewCall::Clear);
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.calls.push(ViewCall::ShowError(message.to_string()));
    }

    fn hide_error(&mut self) {
        self.error = None;
        self.calls.push(ViewCall::HideError);
    }

    fn render(&mut self, card: &ResultCard) {
        self.rendered = Some(card.clone());
        self.calls.push(ViewCall::Render);
    }

    fn reveal_result(&mut self) {
        self.calls.push(ViewCall::Reveal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> VideoResult {
        VideoResult {
            video_id: "42".into(),
            author: "zachking".into(),
            mp4_url: "https://cdn/x.mp4".into(),
            play_count: Some(2_300_000.0),
            like_count: Some(1500.0),
            ..Default::default()
        }
    }

    #[test]
    fn card_formats_counts_and_defaults() {
        let card = ResultCard::from_video(&video());
        assert_eq!(card.initial, "Z");
        assert_eq!(card.handle, "@zachking");
        assert_eq!(card.caption, "No caption provided.");
        assert_eq!(card.plays, "2.3M");
        assert_eq!(card.likes, "1.5K");
        assert_eq!(card.shares, "0");
        assert_eq!(card.comments, None);
        assert_eq!(card.filename, "tiktok_42.mp4");
        assert!(card.download_url.starts_with("/api/v1/tiktok/proxy?url="));
    }

    #[test]
    fn card_keeps_caption_and_extras() {
        let mut v = video();
        v.caption = Some("magic trick".into());
        v.comment_count = Some(999.0);
        v.duration = Some(61.0);
        v.music = Some("original sound".into());
        let card = ResultCard::from_video(&v);
        assert_eq!(card.caption, "magic trick");
        assert_eq!(card.comments.as_deref(), Some("999"));
        assert_eq!(card.duration.as_deref(), Some("1:01"));

        let lines = card.lines(&Palette::new(Theme::Light), "http://h/p");
        assert!(lines.iter().any(|l| l.contains("magic trick")));
        assert!(lines.iter().any(|l| l.contains("original sound")));
        assert!(lines.iter().any(|l| l.contains("tiktok_42.mp4")));
    }

    #[test]
    fn long_caption_is_shown_in_full() {
        let mut v = video();
        let caption = "word ".repeat(80).trim_end().to_string();
        v.caption = Some(caption.clone());
        let lines = ResultCard::from_video(&v).lines(&Palette::new(Theme::Dark), "http://h/p");
        assert!(lines.contains(&caption));
    }

    #[test]
    fn float_counts_format_like_integers() {
        let mut v = video();
        v.play_count = Some(1500.0);
        v.share_count = Some(7.0);
        let card = ResultCard::from_video(&v);
        assert_eq!(card.plays, "1.5K");
        assert_eq!(card.shares, "7");
    }

    #[test]
    fn empty_author_gets_placeholder_initial() {
        let mut v = video();
        v.author = String::new();
        assert_eq!(ResultCard::from_video(&v).initial, "?");
    }

    #[test]
    fn terminal_view_resolves_links_against_server() {
        let view = TerminalView::new(Theme::Dark, Url::parse("http://127.0.0.1:8000").unwrap());
        assert_eq!(
            view.absolute_link("/api/v1/tiktok/proxy?url=a&filename=tiktok_1.mp4"),
            "http://127.0.0.1:8000/api/v1/tiktok/proxy?url=a&filename=tiktok_1.mp4"
        );
    }
}
