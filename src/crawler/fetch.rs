// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::utils::errors::FetchError;
use std::time::Duration;
use url::Url;

/// 抓取到的页面
#[derive(Debug)]
pub struct FetchedPage {
    /// 响应正文
    pub body: String,
    /// 重定向后的最终URL，相对链接以此为基准解析
    pub final_url: Url,
}

/// 构建共享HTTP客户端
///
/// 所有抓取（发现阶段和工作者）复用同一个客户端及其连接池
pub fn build_http_client(settings: &CrawlerSettings) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(Duration::from_secs(settings.fetch_timeout))
        .pool_max_idle_per_host(100)
        .build()
}

/// 执行一次带超时的GET请求
///
/// # 参数
///
/// * `client` - 共享HTTP客户端
/// * `url` - 目标URL
///
/// # 返回值
///
/// * `Ok(FetchedPage)` - 抓取成功的页面
/// * `Err(FetchError)` - 传输错误或非2xx状态码
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let final_url = response.url().clone();
    let body = response.text().await?;

    Ok(FetchedPage { body, final_url })
}
