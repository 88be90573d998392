// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::school::School;
use async_trait::async_trait;
use std::collections::HashMap;

/// 学校仓库特质
///
/// 持久化协作方：按名称幂等upsert的批量保存，以及关键字搜索
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// 批量保存名称到别名列表的映射
    ///
    /// 名称冲突时别名被新值整体替换；单行失败记录日志后跳过，
    /// 不中止剩余行
    async fn save_batch(&self, schools: &HashMap<String, Vec<String>>) -> anyhow::Result<()>;

    /// 按关键字搜索
    ///
    /// 对名称与别名文本做大小写不敏感的子串匹配，至多返回10条
    async fn search(&self, keyword: &str) -> anyhow::Result<Vec<School>>;
}
