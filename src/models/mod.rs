// src/models/mod.rs

pub mod api;

pub use api::{DownloadRequest, ErrorBody, ExtractionResponse, VideoResult};

use crate::constants;
use serde_json::Value;

impl DownloadRequest {
    /// 去掉首尾空白；为空时返回 `None`，此时不应发起任何请求。
    pub fn from_input(raw: &str) -> Option<Self> {
        let url = raw.trim();
        if url.is_empty() {
            None
        } else {
            Some(Self { url: url.to_string() })
        }
    }
}

impl VideoResult {
    /// 代理下载时建议的文件名
    pub fn download_filename(&self) -> String {
        format!(
            "{}{}{}",
            constants::api::FILENAME_PREFIX,
            self.video_id,
            constants::api::FILENAME_EXT
        )
    }
}

/// 提取接口的原始回复：状态码加上已解析的 JSON 体。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
