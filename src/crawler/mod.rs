// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 结果聚合器
pub mod aggregator;

/// 链接发现器
pub mod discovery;

/// 名称提取器
pub mod extractor;

/// HTTP抓取辅助
pub mod fetch;

/// 爬取管道编排
pub mod pipeline;

/// 并发抓取工作者池
pub mod pool;

/// 标记树遍历器
pub mod traversal;

/// 索引页中待搜索的目标元素标签
pub const INDEX_TARGET_TAG: &str = "div";

/// 索引页中包含链接列表的class值
pub const LINK_SECTION_CLASS: &str = "div-col";

/// 名称所在的目标元素标签
pub const NAME_TARGET_TAG: &str = "b";

/// 非名称占位标记，首词条等于该值的结果会被归入离群结果
pub const PLACEHOLDER_MARKER: &str = "Also:";
