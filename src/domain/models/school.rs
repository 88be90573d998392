// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 学校记录
///
/// 名称在映射中唯一；别名为有序序列，同名记录后写覆盖先写
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    /// 主名称（非空，已去除首尾空白）
    pub name: String,
    /// 候选别名列表
    pub aliases: Vec<String>,
}
