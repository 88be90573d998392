// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::school::School;
use crate::domain::repositories::school_repository::SchoolRepository;
use crate::infrastructure::database::entities::school as school_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Alias, Expr, Func, OnConflict};
use sea_orm::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// 单次搜索返回的最大记录数
const SEARCH_LIMIT: u64 = 10;

/// 学校仓库实现
pub struct SchoolRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl SchoolRepositoryImpl {
    /// 创建新的学校仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SchoolRepository for SchoolRepositoryImpl {
    async fn save_batch(&self, schools: &HashMap<String, Vec<String>>) -> anyhow::Result<()> {
        info!("saving {} schools", schools.len());
        let start = Instant::now();

        for (name, aliases) in schools {
            let active_model = school_entity::ActiveModel {
                name: Set(name.clone()),
                aliases: Set(json!(aliases)),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            };

            // Upsert keyed by name: on conflict the alias list is replaced
            let insert = school_entity::Entity::insert(active_model)
                .on_conflict(
                    OnConflict::column(school_entity::Column::Name)
                        .update_column(school_entity::Column::Aliases)
                        .to_owned(),
                )
                .exec(self.db.as_ref())
                .await;

            // A failed row is skipped, the rest of the batch proceeds
            if let Err(e) = insert {
                error!("failed to save school [{}]: {}", name, e);
                continue;
            }
        }

        info!("batch save finished in {:?}", start.elapsed());
        Ok(())
    }

    async fn search(&self, keyword: &str) -> anyhow::Result<Vec<School>> {
        let start = Instant::now();
        let pattern = format!("%{}%", keyword.to_lowercase());

        // Case-insensitive substring match over the name and the alias text;
        // the cast keeps the query portable between Postgres and SQLite
        let models = school_entity::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(school_entity::Column::Name)))
                            .like(&pattern),
                    )
                    .add(
                        Expr::expr(Func::lower(
                            Expr::col(school_entity::Column::Aliases).cast_as(Alias::new("text")),
                        ))
                        .like(&pattern),
                    ),
            )
            .limit(SEARCH_LIMIT)
            .all(self.db.as_ref())
            .await?;

        info!("search for \"{}\" took {:?}", keyword, start.elapsed());

        let schools = models
            .into_iter()
            .map(|m| School {
                name: m.name,
                aliases: serde_json::from_value(m.aliases).unwrap_or_default(),
            })
            .collect();

        Ok(schools)
    }
}
