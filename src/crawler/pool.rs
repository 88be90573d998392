// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::crawler::{extractor, fetch};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 并发抓取工作者池
///
/// 固定数量的工作者从有界URL队列取任务，抓取并提取名称后
/// 将结果（可能为空）转发到有界结果队列
pub struct FetchWorkerPool {
    client: reqwest::Client,
    workers: usize,
    url_queue_capacity: usize,
    result_queue_capacity: usize,
}

impl FetchWorkerPool {
    /// 创建新的抓取工作者池
    pub fn new(client: reqwest::Client, settings: &CrawlerSettings) -> Self {
        Self {
            client,
            workers: settings.workers,
            url_queue_capacity: settings.url_queue_capacity,
            result_queue_capacity: settings.result_queue_capacity,
        }
    }

    /// 构造自定义规模的工作者池
    pub fn with_limits(
        client: reqwest::Client,
        workers: usize,
        url_queue_capacity: usize,
        result_queue_capacity: usize,
    ) -> Self {
        Self {
            client,
            workers,
            url_queue_capacity,
            result_queue_capacity,
        }
    }

    /// 启动管道的并行阶段
    ///
    /// 一个投料任务把全部URL送入URL队列后关闭它；每个工作者循环取URL
    /// 直到队列关闭且取尽；一个收尾任务等待所有工作者返回后才关闭结果
    /// 队列，保证聚合器看到的是有限且会终止的序列。
    ///
    /// # 参数
    ///
    /// * `urls` - 发现阶段产出的URL序列
    ///
    /// # 返回值
    ///
    /// 结果队列的接收端，供聚合器消费到耗尽
    pub fn run(self, urls: Vec<String>) -> mpsc::Receiver<Vec<String>> {
        let (url_tx, url_rx) = mpsc::channel::<String>(self.url_queue_capacity);
        let (result_tx, result_rx) = mpsc::channel::<Vec<String>>(self.result_queue_capacity);

        let url_rx = Arc::new(Mutex::new(url_rx));

        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            handles.push(tokio::spawn(worker_loop(
                worker_id,
                self.client.clone(),
                url_rx.clone(),
                result_tx.clone(),
            )));
        }

        spawn_feeder(urls, url_tx);
        spawn_closer(handles, result_tx);

        result_rx
    }
}

/// 投料任务：送入全部URL后关闭URL队列
///
/// 队列满时在此阻塞，这是对投料方的背压
pub(crate) fn spawn_feeder(urls: Vec<String>, url_tx: mpsc::Sender<String>) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut enqueued = 0usize;
        for url in urls {
            if url_tx.send(url).await.is_err() {
                break;
            }
            enqueued += 1;
        }
        info!("no more jobs to enqueue");
        enqueued
        // url_tx dropped here closes the URL queue
    })
}

/// 收尾任务：等待全部工作者返回后关闭结果队列
///
/// 结果队列的最后一个发送端由本任务持有，因此在屏障释放前队列
/// 不可能被关闭，也不存在关闭后的迟到发送
fn spawn_closer(handles: Vec<JoinHandle<()>>, result_tx: mpsc::Sender<Vec<String>>) {
    tokio::spawn(async move {
        futures::future::join_all(handles).await;
        info!("all fetch workers finished");
        drop(result_tx);
    });
}

/// 工作者循环：取URL、抓取、提取、转发
///
/// 单个URL的抓取或解析失败被转换为空结果并记录日志，
/// 不会中止工作者或整个池
async fn worker_loop(
    worker_id: usize,
    client: reqwest::Client,
    url_rx: Arc<Mutex<mpsc::Receiver<String>>>,
    result_tx: mpsc::Sender<Vec<String>>,
) {
    debug!("fetch worker {} started", worker_id);

    loop {
        // Hold the lock only for the dequeue itself
        let url = { url_rx.lock().await.recv().await };
        let Some(url) = url else {
            break;
        };

        let names = match fetch::fetch_page(&client, &url).await {
            Ok(page) => extractor::extract_default(&page.body),
            Err(e) => {
                warn!("worker {} failed to fetch {}: {}", worker_id, url, e);
                Vec::new()
            }
        };

        if result_tx.send(names).await.is_err() {
            break;
        }
    }

    debug!("fetch worker {} exiting", worker_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_feeder_blocks_on_full_url_queue() {
        let (url_tx, mut url_rx) = mpsc::channel::<String>(1);
        let urls: Vec<String> = (0..3).map(|i| format!("https://example.com/{}", i)).collect();

        let feeder = spawn_feeder(urls, url_tx);

        // Capacity 1: the first send fills the queue, the second blocks
        sleep(Duration::from_millis(100)).await;
        assert!(!feeder.is_finished());

        assert_eq!(url_rx.recv().await.unwrap(), "https://example.com/0");
        assert_eq!(url_rx.recv().await.unwrap(), "https://example.com/1");
        assert_eq!(url_rx.recv().await.unwrap(), "https://example.com/2");
        assert!(url_rx.recv().await.is_none());

        assert_eq!(feeder.await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_closer_closes_result_queue_after_workers_exit() {
        let (result_tx, mut result_rx) = mpsc::channel::<Vec<String>>(4);

        let worker_tx = result_tx.clone();
        let worker = tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            worker_tx.send(vec!["late".to_string()]).await.unwrap();
        });

        spawn_closer(vec![worker], result_tx);

        // The late send must be observed before the closed-channel terminal state
        assert_eq!(result_rx.recv().await.unwrap(), vec!["late".to_string()]);
        assert!(result_rx.recv().await.is_none());
    }
}
