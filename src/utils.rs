// src/utils.rs

use crate::constants;
use regex::Regex;
use std::{ffi::OsStr, path::Path, sync::LazyLock};

static ILLEGAL_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|\x00-\x1f]"#).unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const WINDOWS_RESERVED: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// 计数器的展示格式: 1.5K / 2.3M，小于 1000 原样输出（整数值不带小数点）。
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        num.to_string()
    }
}

/// 秒数 -> `m:ss` 或 `h:mm:ss`，小数四舍五入，负数按 0 处理
pub fn format_duration(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0).round() as u64 } else { 0 };
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// 代理给出的文件名来自服务端数据，落盘前清理一遍。
pub fn sanitize_filename(name: &str) -> String {
    let original_name = name.trim();
    if original_name.is_empty() {
        return "unknown".to_string();
    }

    let stem = Path::new(original_name)
        .file_stem()
        .unwrap_or_else(|| OsStr::new(original_name))
        .to_string_lossy()
        .to_uppercase();

    let mut name = if WINDOWS_RESERVED.contains(&stem.as_ref()) {
        format!("_{}", original_name)
    } else {
        original_name.to_string()
    };

    name = ILLEGAL_CHARS_RE.replace_all(&name, " ").into_owned();
    name = WHITESPACE_RE.replace_all(&name, " ").trim().to_string();
    name = name.trim_matches(|c: char| c == '.' || c.is_whitespace()).to_string();
    if name.is_empty() {
        return "unnamed".to_string();
    }

    if name.len() > constants::MAX_FILENAME_BYTES {
        let path = Path::new(&name);
        name = match (path.file_stem(), path.extension()) {
            (Some(stem), Some(ext)) => {
                let ext = format!(".{}", ext.to_string_lossy());
                let max_stem = constants::MAX_FILENAME_BYTES.saturating_sub(ext.len());
                format!("{}{}", safe_truncate_utf8(&stem.to_string_lossy(), max_stem), ext)
            }
            _ => safe_truncate_utf8(&name, constants::MAX_FILENAME_BYTES).to_string(),
        };
    }
    name
}

fn safe_truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut i = max_bytes;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    &s[..i]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1.0K");
        assert_eq!(format_number(1500.0), "1.5K");
        assert_eq!(format_number(2_300_000.0), "2.3M");
        assert_eq!(format_number(1_000_000.0), "1.0M");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5.0), "0:05");
        assert_eq!(format_duration(75.0), "1:15");
        assert_eq!(format_duration(14.6), "0:15");
        assert_eq!(format_duration(-2.0), "0:00");
        assert_eq!(format_duration(3725.0), "1:02:05");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("tiktok_123.mp4"), "tiktok_123.mp4");
        assert_eq!(sanitize_filename("a\\b/c:d*e?f\"g<h>i|j"), "a b c d e f g h i j");
        assert_eq!(sanitize_filename(" . my clip. "), "my clip");
        assert_eq!(sanitize_filename("CON.mp4"), "_CON.mp4");
        assert_eq!(sanitize_filename(""), "unknown");
        assert_eq!(sanitize_filename("<>|"), "unnamed");

        let long = format!("{}.mp4", "视频".repeat(60));
        let truncated = sanitize_filename(&long);
        assert!(truncated.len() <= constants::MAX_FILENAME_BYTES);
        assert!(truncated.ends_with(".mp4"));
    }
}
