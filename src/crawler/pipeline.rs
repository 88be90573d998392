// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::crawler::aggregator::{Aggregator, CrawlSummary};
use crate::crawler::pool::FetchWorkerPool;
use crate::crawler::{discovery, fetch};
use crate::domain::repositories::school_repository::SchoolRepository;
use crate::infrastructure::json_sink::JsonFileSink;
use std::sync::Arc;
use tracing::{error, info};

/// 运行完整的爬取管道
///
/// 顺序执行发现阶段，然后进入并行抓取与聚合阶段。
/// 种子页面抓取失败只中止发现阶段，管道以零个URL继续（退化为空运行）。
///
/// # 参数
///
/// * `settings` - 应用配置
/// * `repository` - 学校仓库，用于批量持久化
///
/// # 返回值
///
/// 返回本次运行的聚合汇总
pub async fn run_crawl(
    settings: &Settings,
    repository: Arc<dyn SchoolRepository>,
) -> anyhow::Result<CrawlSummary> {
    let client = fetch::build_http_client(&settings.crawler)?;

    let urls = match discovery::discover_links(&client, &settings.crawler.seed_url).await {
        Ok(urls) => urls,
        Err(e) => {
            error!("seed page discovery failed: {}", e);
            Vec::new()
        }
    };
    info!("total number of urls: {}", urls.len());

    let pool = FetchWorkerPool::new(client, &settings.crawler);
    let result_rx = pool.run(urls);

    let sink = JsonFileSink::new(&settings.crawler.output_file);
    let summary = Aggregator::new().run(result_rx, &sink, repository).await;

    Ok(summary)
}
