// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::domain::repositories::school_repository::SchoolRepository;

/// 搜索请求参数
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// 搜索关键字
    pub q: Option<String>,
}

/// 处理搜索请求
///
/// # 参数
///
/// * `repository` - 学校仓库实例
/// * `params` - 查询参数，`q`为关键字
///
/// # 返回值
///
/// 返回实现了 `IntoResponse` 的响应，包含搜索结果或错误信息
pub async fn search<R>(
    Extension(repository): Extension<Arc<R>>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse
where
    R: SchoolRepository + 'static,
{
    let keyword = params.q.unwrap_or_default();
    if keyword.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Should include university name, instead of empty" })),
        )
            .into_response();
    }

    match repository.search(&keyword).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => {
            error!("search query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
