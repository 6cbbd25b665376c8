// src/workflow/mod.rs

//! 一次下载尝试的状态机: Idle → Loading → Success | Error。

mod state;

pub use state::{
    Effect, Event, WorkflowState, accepts, api_error_message, effects, interpret_reply, step,
    transition,
};

use crate::{
    client::ExtractionApi,
    constants,
    presenter::{ResultCard, View},
};
use log::{debug, info, warn};

pub struct DownloadWorkflow<A, V> {
    api: A,
    view: V,
    state: WorkflowState,
    empty_input_message: String,
}

impl<A: ExtractionApi, V: View> DownloadWorkflow<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            state: WorkflowState::Idle,
            empty_input_message: constants::messages::EMPTY_INPUT.to_string(),
        }
    }

    pub fn with_empty_input_message(mut self, message: impl Into<String>) -> Self {
        self.empty_input_message = message.into();
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// 处理一次用户触发（回车或点击）。
    ///
    /// 空输入直接进入 `Error`，不发请求；否则进入 `Loading` 并等待提取接口，
    /// 无论结果如何都会离开 `Loading`。`&mut self` 保证同一时刻只有一个请求。
    pub async fn submit(&mut self, raw_input: &str) -> &WorkflowState {
        let event = Event::from_input(raw_input, &self.empty_input_message);
        let request = match &event {
            Event::Submitted(request) => Some(request.clone()),
            _ => None,
        };

        if !self.apply(event) {
            return &self.state;
        }
        let Some(request) = request else {
            return &self.state;
        };

        info!("提交提取请求: {}", request.url);
        let outcome = self.api.extract(&request).await;
        if let Err(e) = &outcome {
            warn!("提取请求失败 ({}): {}", e.kind(), e);
        }
        self.apply(Event::Resolved(outcome));
        &self.state
    }

    fn apply(&mut self, event: Event) -> bool {
        let from = self.state.name();
        let Some(effects) = step(&mut self.state, event) else {
            debug!("状态 {} 忽略了事件", from);
            return false;
        };
        debug!("状态 {} -> {}", from, self.state.name());
        for effect in effects {
            self.perform(effect);
        }
        true
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::SetBusy(busy) => self.view.set_busy(busy),
            Effect::HideError => self.view.hide_error(),
            Effect::ClearOutput => self.view.clear_output(),
            Effect::ShowError(message) => self.view.show_error(&message),
            Effect::Render(video) => {
                let card = ResultCard::from_video(&video);
                self.view.render(&card);
            }
            Effect::RevealResult => self.view.reveal_result(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::WorkflowError,
        models::{ApiReply, DownloadRequest},
        presenter::{RecordingView, ViewCall},
    };
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    /// 按顺序返回预设结果的假接口，并记录收到的请求
    struct FakeApi {
        replies: Mutex<Vec<Result<ApiReply, WorkflowError>>>,
        seen: Mutex<Vec<DownloadRequest>>,
    }

    impl FakeApi {
        fn new(replies: Vec<Result<ApiReply, WorkflowError>>) -> Self {
            Self { replies: Mutex::new(replies), seen: Mutex::new(vec![]) }
        }

        fn ok(status: u16, body: Value) -> Self {
            Self::new(vec![Ok(ApiReply { status, body })])
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ExtractionApi for FakeApi {
        async fn extract(&self, request: &DownloadRequest) -> Result<ApiReply, WorkflowError> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies.lock().unwrap().remove(0)
        }
    }

    #[tokio::test]
    async fn blank_input_never_calls_the_api() {
        let api = Arc::new(FakeApi::new(vec![]));
        let mut wf = DownloadWorkflow::new(api.clone(), RecordingView::default());
        let state = wf.submit("   ").await.clone();
        assert_eq!(state, WorkflowState::Error("Please paste a valid video URL first!".into()));
        assert_eq!(api.calls(), 0);
        assert!(!wf.view().busy);
    }

    #[tokio::test]
    async fn custom_validation_message() {
        let api = Arc::new(FakeApi::new(vec![]));
        let mut wf = DownloadWorkflow::new(api.clone(), RecordingView::default())
            .with_empty_input_message("Paste a TikTok link first!");
        assert_eq!(
            wf.submit("").await.error_message(),
            Some("Paste a TikTok link first!")
        );
    }

    #[tokio::test]
    async fn end_to_end_success() {
        let api = Arc::new(FakeApi::ok(
            200,
            json!({ "video": {
                "video_id": "1", "author": "abc", "mp4_url": "https://cdn/x.mp4", "play_count": 1500
            }}),
        ));
        let mut wf = DownloadWorkflow::new(api.clone(), RecordingView::default());
        assert!(matches!(wf.submit("  https://example.com/v/1  ").await, WorkflowState::Success(_)));

        assert_eq!(api.seen.lock().unwrap()[0].url, "https://example.com/v/1");
        let view = wf.view();
        let card = view.rendered.as_ref().unwrap();
        assert_eq!(
            card.download_url,
            "/api/v1/tiktok/proxy?url=https%3A%2F%2Fcdn%2Fx.mp4&filename=tiktok_1.mp4"
        );
        assert_eq!(card.plays, "1.5K");
        assert!(!view.busy);
        assert_eq!(
            view.calls,
            vec![
                ViewCall::Busy(true),
                ViewCall::HideError,
                ViewCall::Clear,
                ViewCall::Busy(false),
                ViewCall::Render,
                ViewCall::Reveal,
            ]
        );
    }

    #[tokio::test]
    async fn end_to_end_api_error_reenables_trigger() {
        let api = Arc::new(FakeApi::ok(500, json!({ "detail": { "message": "rate limited" } })));
        let mut wf = DownloadWorkflow::new(api.clone(), RecordingView::default());
        assert_eq!(wf.submit("https://example.com/v/1").await, &WorkflowState::Error("rate limited".into()));
        let view = wf.view();
        assert!(!view.busy);
        assert_eq!(view.error.as_deref(), Some("rate limited"));
        assert!(view.rendered.is_none());
    }

    #[tokio::test]
    async fn transport_failure_is_rewritten() {
        let api = Arc::new(FakeApi::new(vec![Err(WorkflowError::Transport)]));
        let mut wf = DownloadWorkflow::new(api.clone(), RecordingView::default());
        assert_eq!(
            wf.submit("https://example.com/v/1").await.error_message(),
            Some("Could not connect to server. Please check your internet connection.")
        );
        assert!(!wf.view().busy);
    }

    #[tokio::test]
    async fn new_request_replaces_previous_result() {
        let video = json!({ "video_id": "1", "author": "abc", "mp4_url": "m" });
        let api = Arc::new(FakeApi::new(vec![
            Ok(ApiReply { status: 200, body: json!({ "video": video }) }),
            Ok(ApiReply { status: 404, body: json!({ "detail": "Video not found" }) }),
        ]));
        let mut wf = DownloadWorkflow::new(api.clone(), RecordingView::default());
        wf.submit("a").await;
        assert!(wf.view().rendered.is_some());

        wf.submit("b").await;
        assert_eq!(wf.state().error_message(), Some("Video not found"));
        assert!(wf.view().rendered.is_none());
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn validation_error_after_success_clears_card() {
        let api = Arc::new(FakeApi::ok(200, json!({ "video": { "video_id": "1", "author": "a", "mp4_url": "m" } })));
        let mut wf = DownloadWorkflow::new(api.clone(), RecordingView::default());
        wf.submit("a").await;
        wf.submit(" ").await;
        assert!(wf.view().rendered.is_none());
        assert_eq!(wf.view().error.as_deref(), Some(constants::messages::EMPTY_INPUT));
        assert_eq!(api.calls(), 1);
    }
}
