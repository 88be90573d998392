// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use uniscrawl::config::settings::Settings;
use uniscrawl::crawler::pipeline;
use uniscrawl::domain::repositories::school_repository::SchoolRepository;
use uniscrawl::infrastructure::database::connection;
use uniscrawl::infrastructure::repositories::school_repo_impl::SchoolRepositoryImpl;
use uniscrawl::presentation::routes;
use uniscrawl::utils::telemetry;

/// 命令行入口
#[derive(Parser)]
#[command(name = "uniscrawl", about = "University name crawler and search service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 运行爬取管道并保存结果
    Crawl,
    /// 按关键字搜索已保存的学校
    Search {
        /// 搜索关键字
        keyword: String,
    },
    /// 启动搜索HTTP服务
    Serve,
}

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并按模式分派
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting uniscrawl...");

    let cli = Cli::parse();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    let repository = Arc::new(SchoolRepositoryImpl::new(db.clone()));

    match cli.command {
        Command::Crawl => {
            let summary = pipeline::run_crawl(&settings, repository).await?;
            info!(
                "crawl finished: {} results, {} schools, {} outliers",
                summary.total,
                summary.schools.len(),
                summary.outliers.len()
            );
        }
        Command::Search { keyword } => {
            let results = repository.search(&keyword).await?;
            for (idx, school) in results.iter().enumerate() {
                println!("{}. {} (aliases: {:?})", idx + 1, school.name, school.aliases);
            }
        }
        Command::Serve => {
            let app = routes::routes(repository);
            let addr = format!("{}:{}", settings.server.host, settings.server.port);
            let listener = TcpListener::bind(&addr).await?;
            info!("Server listening on {}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
