// src/models/api.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- 请求 ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
}

// --- 提取接口响应 ---

// 计数类字段接受任意 JSON 数字（整数、小数、负数）

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct VideoResult {
    pub video_id: String,
    pub author: String,
    #[serde(default)]
    pub caption: Option<String>,
    pub mp4_url: String,
    #[serde(default)]
    pub alternative_urls: Option<Vec<String>>,
    #[serde(default)]
    pub cookies: Option<String>,
    #[serde(default)]
    pub play_count: Option<f64>,
    #[serde(default)]
    pub like_count: Option<f64>,
    #[serde(default)]
    pub share_count: Option<f64>,
    #[serde(default)]
    pub comment_count: Option<f64>,
    #[serde(default)]
    pub music: Option<String>,
    /// 秒
    #[serde(default)]
    pub duration: Option<f64>,
    /// Unix 时间戳
    #[serde(default)]
    pub created_at: Option<f64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub video: Option<VideoResult>,
    #[serde(default)]
    pub cached: bool,
}

/// 错误响应体。`detail` 可能是字符串，也可能是 `{ "message": ... }`，
/// 其它形状一律保留原始值，交给调用方回退处理。
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        match self.detail.as_ref()? {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("message").and_then(Value::as_str),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn video_result_tolerates_missing_optionals() {
        let video: VideoResult = serde_json::from_value(json!({
            "video_id": "1",
            "author": "abc",
            "mp4_url": "https://cdn/x.mp4",
            "play_count": 1500
        }))
        .unwrap();
        assert_eq!(video.play_count, Some(1500.0));
        assert!(video.alternative_urls.is_none());
        assert!(video.cookies.is_none());
    }

    #[test]
    fn video_result_accepts_any_json_number() {
        let video: VideoResult = serde_json::from_value(json!({
            "video_id": "1",
            "author": "abc",
            "mp4_url": "https://cdn/x.mp4",
            "play_count": 1500.0,
            "like_count": -3,
            "share_count": 12.5,
            "duration": 15.4,
            "created_at": 1700000000
        }))
        .unwrap();
        assert_eq!(video.play_count, Some(1500.0));
        assert_eq!(video.like_count, Some(-3.0));
        assert_eq!(video.share_count, Some(12.5));
        assert_eq!(video.duration, Some(15.4));
        assert_eq!(video.created_at, Some(1_700_000_000.0));
    }

    #[test]
    fn extraction_response_reads_envelope() {
        let resp: ExtractionResponse = serde_json::from_value(json!({
            "status": "success",
            "cached": true,
            "video": { "video_id": "1", "author": "abc", "mp4_url": "u" }
        }))
        .unwrap();
        assert_eq!(resp.status.as_deref(), Some("success"));
        assert!(resp.cached);
        assert!(resp.video.is_some());

        let bare: ExtractionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!bare.cached);
        assert!(bare.status.is_none());
    }

    #[test]
    fn error_body_message_shapes() {
        let s: ErrorBody = serde_json::from_value(json!({ "detail": "bad url" })).unwrap();
        assert_eq!(s.message(), Some("bad url"));

        let o: ErrorBody =
            serde_json::from_value(json!({ "detail": { "error": "x", "message": "rate limited" } }))
                .unwrap();
        assert_eq!(o.message(), Some("rate limited"));

        let n: ErrorBody = serde_json::from_value(json!({ "detail": [1, 2] })).unwrap();
        assert_eq!(n.message(), None);

        let missing: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.message(), None);
    }
}
