// src/workflow/state.rs

use crate::{
    constants::messages,
    error::WorkflowError,
    models::{ApiReply, DownloadRequest, ErrorBody, ExtractionResponse, VideoResult},
};
use log::debug;
use serde_json::Value;
use std::mem;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Loading,
    Success(VideoResult),
    Error(String),
}

impl WorkflowState {
    pub fn is_loading(&self) -> bool {
        matches!(self, WorkflowState::Loading)
    }

    pub fn video(&self) -> Option<&VideoResult> {
        match self {
            WorkflowState::Success(video) => Some(video),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            WorkflowState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "Idle",
            WorkflowState::Loading => "Loading",
            WorkflowState::Success(_) => "Success",
            WorkflowState::Error(_) => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// 本地校验未通过，不发请求
    Rejected(String),
    /// 输入有效，即将请求提取接口
    Submitted(DownloadRequest),
    /// 提取请求结束（拿到回复或请求失败）
    Resolved(Result<ApiReply, WorkflowError>),
}

impl Event {
    /// 把输入框的原始内容变成事件
    pub fn from_input(raw: &str, empty_message: &str) -> Self {
        match DownloadRequest::from_input(raw) {
            Some(request) => Event::Submitted(request),
            None => Event::Rejected(empty_message.to_string()),
        }
    }
}

/// 当前状态是否接受该事件。
///
/// `Loading` 期间触发器处于禁用状态，新的提交被忽略；
/// 不在 `Loading` 时到达的结果属于过期请求，同样忽略。
pub fn accepts(state: &WorkflowState, event: &Event) -> bool {
    match event {
        Event::Rejected(_) | Event::Submitted(_) => !state.is_loading(),
        Event::Resolved(_) => state.is_loading(),
    }
}

pub fn transition(state: WorkflowState, event: Event) -> WorkflowState {
    if !accepts(&state, &event) {
        return state;
    }
    match event {
        Event::Rejected(message) => WorkflowState::Error(WorkflowError::Validation(message).to_string()),
        Event::Submitted(_) => WorkflowState::Loading,
        Event::Resolved(outcome) => match outcome.and_then(interpret_reply) {
            Ok(video) => WorkflowState::Success(video),
            Err(e) => WorkflowState::Error(e.to_string()),
        },
    }
}

/// 解释提取接口的回复。
pub fn interpret_reply(reply: ApiReply) -> Result<VideoResult, WorkflowError> {
    if !reply.is_success() {
        return Err(WorkflowError::Api(api_error_message(&reply.body)));
    }
    // 只有对象形式的 video 才算拿到了数据，空串、false、0 等都视为缺失
    if !reply.body.get("video").is_some_and(Value::is_object) {
        return Err(WorkflowError::MalformedResponse);
    }
    let response: ExtractionResponse = serde_json::from_value(reply.body)
        .map_err(|e| WorkflowError::Unexpected(e.to_string()))?;
    debug!(
        "提取接口返回 status={} cached={}",
        response.status.as_deref().unwrap_or("-"),
        response.cached
    );
    response.video.ok_or(WorkflowError::MalformedResponse)
}

/// `detail` 为字符串时原样使用，为对象时取 `message`，否则回退到通用提示。
pub fn api_error_message(body: &Value) -> String {
    serde_json::from_value::<ErrorBody>(body.clone())
        .ok()
        .and_then(|b| b.message().map(str::to_string))
        .unwrap_or_else(|| messages::SERVER_ERROR.to_string())
}

/// 状态变化带来的界面副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetBusy(bool),
    HideError,
    ClearOutput,
    ShowError(String),
    Render(VideoResult),
    RevealResult,
}

/// 进入新状态时界面需要做的事。调用方只在事件被接受后调用。
pub fn effects(previous: &WorkflowState, next: &WorkflowState) -> Vec<Effect> {
    let was_loading = previous.is_loading();
    match next {
        WorkflowState::Idle => vec![],
        WorkflowState::Loading => vec![Effect::SetBusy(true), Effect::HideError, Effect::ClearOutput],
        WorkflowState::Success(video) => {
            let mut out = Vec::with_capacity(4);
            if was_loading {
                out.push(Effect::SetBusy(false));
            }
            out.push(Effect::Render(video.clone()));
            out.push(Effect::RevealResult);
            out
        }
        WorkflowState::Error(message) => {
            let mut out = Vec::with_capacity(3);
            if was_loading {
                out.push(Effect::SetBusy(false));
            }
            out.push(Effect::ClearOutput);
            out.push(Effect::ShowError(message.clone()));
            out
        }
    }
}

/// 在原地推进状态，返回事件是否被接受以及对应的副作用。
pub fn step(state: &mut WorkflowState, event: Event) -> Option<Vec<Effect>> {
    if !accepts(state, &event) {
        return None;
    }
    let previous = mem::take(state);
    let next = transition(previous.clone(), event);
    let out = effects(&previous, &next);
    *state = next;
    Some(out)
}
