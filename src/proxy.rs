// src/proxy.rs

//! 代理下载链接的构造。
//!
//! 源站 CDN 通常拒绝直链，下载统一走服务器的 `/api/v1/tiktok/proxy`，
//! 备用地址与 cookies 通过查询参数一并交给代理。

use crate::{constants, error::AppResult, models::VideoResult};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

/// 与 JavaScript `encodeURIComponent` 相同的保留字符集，代理端按此解码。
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// 生成相对于 API 根地址的代理下载链接。
///
/// 不校验 `mp4_url` 是否合法，原样编码后交给代理端处理。
/// `alt_urls` 先用逗号拼接，再整体编码一次。
pub fn build(video: &VideoResult) -> String {
    let mut proxy_url = format!(
        "{}?url={}&filename={}",
        constants::api::PROXY_PATH,
        encode(&video.mp4_url),
        encode(&video.download_filename()),
    );

    if let Some(alts) = video.alternative_urls.as_deref().filter(|a| !a.is_empty()) {
        proxy_url.push_str("&alt_urls=");
        proxy_url.push_str(&encode(&alts.join(",")));
    }

    if let Some(cookies) = video.cookies.as_deref().filter(|c| !c.is_empty()) {
        proxy_url.push_str("&cookies=");
        proxy_url.push_str(&encode(cookies));
    }

    proxy_url
}

/// 把相对代理链接解析为基于服务器地址的绝对链接，终端里需要完整地址。
pub fn absolute(base: &Url, relative: &str) -> AppResult<Url> {
    Ok(base.join(relative)?)
}
