// src/downloader.rs

//! 通过服务器代理把视频保存到本地。

use crate::{
    client::ApiClient,
    error::{AppError, AppResult},
    models::VideoResult,
    proxy, ui, utils,
};
use futures::StreamExt;
use indicatif::{HumanBytes, ProgressBar};
use log::{debug, info};
use std::{
    fs,
    io::Write,
    path::PathBuf,
};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub path: PathBuf,
    pub bytes: u64,
}

pub struct ProxyDownloader {
    client: ApiClient,
    output_dir: PathBuf,
    show_progress: bool,
}

impl ProxyDownloader {
    pub fn new(client: ApiClient, output_dir: impl Into<PathBuf>) -> Self {
        Self { client, output_dir: output_dir.into(), show_progress: true }
    }

    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// 请求代理链接并把响应体写入输出目录。
    ///
    /// 先写临时文件，完整收到后才改名为最终文件名，中途失败不会留下残缺文件。
    pub async fn download(&self, video: &VideoResult) -> AppResult<SavedFile> {
        let relative = proxy::build(video);
        let url = proxy::absolute(self.client.base_url(), &relative)?;
        info!("开始代理下载: {}", url);

        fs::create_dir_all(&self.output_dir)?;
        let filename = utils::sanitize_filename(&video.download_filename());
        let dest = self.output_dir.join(&filename);

        let res = self.client.get(url).await?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::ProxyStatus { status });
        }

        let pbar = if self.show_progress {
            ui::new_bytes_progress_bar(res.content_length(), &filename)
        } else {
            ProgressBar::hidden()
        };

        let mut tmp = NamedTempFile::new_in(&self.output_dir)?;
        let mut written = 0u64;
        let mut stream = res.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(e) => {
                    pbar.abandon();
                    return Err(e.into());
                }
            };
            tmp.write_all(&chunk)?;
            written += chunk.len() as u64;
            pbar.inc(chunk.len() as u64);
        }
        tmp.flush()?;
        pbar.finish_and_clear();

        tmp.persist(&dest)?;
        debug!("已写入 {} ({})", dest.display(), HumanBytes(written));
        Ok(SavedFile { path: dest, bytes: written })
    }
}
