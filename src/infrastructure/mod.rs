// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库连接与实体
pub mod database;

/// JSON文件输出
pub mod json_sink;

/// 仓库实现
pub mod repositories;
