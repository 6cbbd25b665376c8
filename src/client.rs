// src/client.rs

use crate::{
    config::AppConfig,
    constants,
    error::{AppResult, WorkflowError},
    models::{ApiReply, DownloadRequest},
};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// 提取接口。工作流只依赖这个 trait，测试时可换成假实现。
#[async_trait]
pub trait ExtractionApi: Send + Sync {
    /// 发送一次提取请求。任何状态码都算"拿到了回复"；
    /// 只有请求没能完成时才返回错误。
    async fn extract(&self, request: &DownloadRequest) -> Result<ApiReply, WorkflowError>;
}

#[async_trait]
impl<T: ExtractionApi + ?Sized> ExtractionApi for Arc<T> {
    async fn extract(&self, request: &DownloadRequest) -> Result<ApiReply, WorkflowError> {
        (**self).extract(request).await
    }
}

#[derive(Clone)]
pub struct ApiClient {
    pub client: Client,
    config: Arc<AppConfig>,
}

impl ApiClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.api_base_url
    }

    /// 代理下载使用同一个连接池
    pub async fn get(&self, url: Url) -> AppResult<Response> {
        Ok(self.client.get(url).send().await?)
    }
}

#[async_trait]
impl ExtractionApi for ApiClient {
    async fn extract(&self, request: &DownloadRequest) -> Result<ApiReply, WorkflowError> {
        let endpoint = self
            .config
            .endpoint(constants::api::DOWNLOAD_PATH)
            .map_err(|e| WorkflowError::Unexpected(e.to_string()))?;
        debug!("POST {} url={}", endpoint, request.url);

        let res = self.client.post(endpoint).json(request).send().await.map_err(|e| {
            warn!("提取请求未能到达服务器: {}", e);
            WorkflowError::from(e)
        })?;

        let status = res.status().as_u16();
        let body: Value = res.json().await.map_err(|e| {
            warn!("无法解析提取接口的响应体 (HTTP {}): {}", status, e);
            WorkflowError::from(e)
        })?;
        debug!("提取接口返回 HTTP {}", status);

        Ok(ApiReply { status, body })
    }
}
