// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// 请求作用域上下文
///
/// 以显式类型承载请求元数据，供下游处理器通过extensions读取
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// 请求发起者标识，暂无认证时为"unknown"
    pub user: String,
    /// 请求开始时间
    pub started_at: Instant,
}

/// 请求计时中间件
///
/// 在进入处理器前注入`RequestContext`，在响应返回后记录请求耗时
pub async fn timing_middleware(mut request: Request, next: Next) -> Response {
    let context = RequestContext {
        user: "unknown".to_string(),
        started_at: Instant::now(),
    };
    request.extensions_mut().insert(context.clone());

    let response = next.run(request).await;

    info!(
        user = %context.user,
        "request duration: {:?}",
        context.started_at.elapsed()
    );

    response
}
