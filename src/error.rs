// src/error.rs

use crate::constants::messages;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not move downloaded file into place: {0}")]
    TempFilePersist(#[from] tempfile::PersistError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("proxy returned {status}")]
    ProxyStatus { status: reqwest::StatusCode },
    /// 提取尝试失败，消息已经展示给用户
    #[error("{0}")]
    AttemptFailed(String),
    #[error("interrupted by user")]
    UserInterrupt,
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// 一次提取尝试中可能出现的全部失败，`Display` 即展示给用户的文本。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// 输入为空，未发起任何网络请求
    #[error("{0}")]
    Validation(String),
    /// 非 2xx 响应，消息取自 `detail`
    #[error("{0}")]
    Api(String),
    /// 2xx 响应但缺少 `video` 字段
    #[error("{msg}", msg = messages::NO_VIDEO_DATA)]
    MalformedResponse,
    /// 请求没能到达服务器
    #[error("{msg}", msg = messages::CONNECTION_FAILED)]
    Transport,
    #[error("{0}")]
    Unexpected(String),
}

impl WorkflowError {
    pub fn kind(&self) -> &'static str {
        match self {
            WorkflowError::Validation(_) => "validation",
            WorkflowError::Api(_) => "api",
            WorkflowError::MalformedResponse => "malformed-response",
            WorkflowError::Transport => "transport",
            WorkflowError::Unexpected(_) => "unexpected",
        }
    }
}

impl From<reqwest::Error> for WorkflowError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || (err.is_request() && err.status().is_none()) {
            WorkflowError::Transport
        } else {
            WorkflowError::Unexpected(err.to_string())
        }
    }
}
