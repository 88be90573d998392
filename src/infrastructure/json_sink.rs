// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// JSON文件输出
///
/// 把最终映射以带缩进的JSON写入指定文件，覆盖同名旧文件
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// 创建新的文件输出实例
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 写入映射
    ///
    /// # 参数
    ///
    /// * `data` - 名称到别名列表的映射
    pub async fn write(&self, data: &HashMap<String, Vec<String>>) -> anyhow::Result<()> {
        info!("writing {} entries to {}", data.len(), self.path.display());

        let content = serde_json::to_vec_pretty(data)?;
        fs::write(&self.path, content).await?;

        Ok(())
    }
}
