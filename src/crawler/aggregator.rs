// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::crawler::PLACEHOLDER_MARKER;
use crate::domain::repositories::school_repository::SchoolRepository;
use crate::infrastructure::json_sink::JsonFileSink;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// 每消费多少条结果输出一次吞吐量快照
const SNAPSHOT_INTERVAL: u64 = 100;

/// 聚合结果汇总
#[derive(Debug)]
pub struct CrawlSummary {
    /// 消费的结果总数（含空结果）
    pub total: u64,
    /// 聚合阶段耗时
    pub elapsed: Duration,
    /// 平均吞吐量（条/秒）
    pub throughput: f64,
    /// 名称到别名列表的最终映射
    pub schools: HashMap<String, Vec<String>>,
    /// 被拒绝的离群结果
    pub outliers: Vec<Vec<String>>,
}

/// 结果聚合器
///
/// 消费结果队列直到其关闭且取尽，把每条结果分类为记录或离群结果，
/// 并按名称合并到最终映射（同名后写覆盖先写）
#[derive(Debug, Default)]
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// 消费结果队列到终止
    ///
    /// # 参数
    ///
    /// * `result_rx` - 抓取工作者池的结果队列接收端
    ///
    /// # 返回值
    ///
    /// 返回包含最终映射与统计信息的汇总
    pub async fn consume(&self, mut result_rx: mpsc::Receiver<Vec<String>>) -> CrawlSummary {
        let mut schools: HashMap<String, Vec<String>> = HashMap::new();
        let mut outliers: Vec<Vec<String>> = Vec::new();

        let start = Instant::now();
        let mut count = 0u64;

        while let Some(names) = result_rx.recv().await {
            count += 1;
            if count % SNAPSHOT_INTERVAL == 0 {
                info!("progress: {} results consumed in {:?}", count, start.elapsed());
            }

            if names.is_empty() {
                debug!("no name obtained");
                continue;
            }

            let school_name = names[0].trim();
            if school_name == PLACEHOLDER_MARKER || school_name.is_empty() {
                outliers.push(names);
                continue;
            }

            // Last write wins for duplicate names; alias lists are never merged
            schools.insert(school_name.to_string(), names[1..].to_vec());
        }

        let elapsed = start.elapsed();
        let throughput = if elapsed.as_secs_f64() > 0.0 {
            count as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        info!(
            "aggregation finished: {} results in {:?} ({:.2} req/s)",
            count, elapsed, throughput
        );
        info!("total school names: {}", schools.len());
        info!("total outliers: {}", outliers.len());

        CrawlSummary {
            total: count,
            elapsed,
            throughput,
            schools,
            outliers,
        }
    }

    /// 消费结果队列并把最终映射交给文件输出与持久化
    ///
    /// 输出与持久化互不影响：持久化失败只记录日志，不影响本次运行
    pub async fn run(
        &self,
        result_rx: mpsc::Receiver<Vec<String>>,
        sink: &JsonFileSink,
        repository: Arc<dyn SchoolRepository>,
    ) -> CrawlSummary {
        let summary = self.consume(result_rx).await;

        if let Err(e) = sink.write(&summary.schools).await {
            error!("failed to write result file: {}", e);
        }

        if let Err(e) = repository.save_batch(&summary.schools).await {
            error!("failed to persist schools: {}", e);
        }

        summary
    }
}
