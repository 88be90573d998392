// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::school_repository::SchoolRepository;
use crate::presentation::handlers::search_handler;
use crate::presentation::middleware::timing_middleware::timing_middleware;
use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `repository` - 学校仓库实例
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes<R>(repository: Arc<R>) -> Router
where
    R: SchoolRepository + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/search", get(search_handler::search::<R>))
        .layer(axum::middleware::from_fn(timing_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(repository))
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
