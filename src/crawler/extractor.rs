// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::crawler::traversal::{walk, NodeVisitor};
use crate::crawler::NAME_TARGET_TAG;
use ego_tree::{NodeId, NodeRef};
use scraper::{Html, Node};

/// 名称提取访问器
///
/// 锁定第一个包含目标元素的段落；只有该段落贡献词条
struct NameVisitor<'a> {
    target: &'a str,
    locked_parent: Option<NodeId>,
    names: Vec<String>,
}

impl NameVisitor<'_> {
    /// 按文档顺序收集锁定段落的词条
    ///
    /// 目标元素贡献其直接文本子节点，非空白文本节点贡献自身
    fn harvest(&mut self, paragraph: NodeRef<'_, Node>) {
        for child in paragraph.children() {
            match child.value() {
                Node::Text(text) => {
                    if !text.trim().is_empty() {
                        self.names.push(text.to_string());
                    }
                }
                Node::Element(el) if el.name() == self.target => {
                    for grandchild in child.children() {
                        if let Node::Text(text) = grandchild.value() {
                            self.names.push(text.to_string());
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl NodeVisitor for NameVisitor<'_> {
    fn pre(&mut self, node: NodeRef<'_, Node>) {
        let Node::Element(el) = node.value() else {
            return;
        };
        if el.name() != self.target {
            return;
        }

        // The match only qualifies when its immediate parent is a paragraph
        let Some(parent) = node.parent() else {
            return;
        };
        match parent.value() {
            Node::Element(parent_el) if parent_el.name() == "p" => {}
            _ => return,
        }

        // First qualifying parent wins; later paragraphs never contribute
        if self.locked_parent.is_none() {
            self.locked_parent = Some(parent.id());
            self.harvest(parent);
        }
    }
}

/// 从页面正文提取有序词条序列
///
/// 首词条为候选主名称，其余为候选别名；没有合格段落时返回空序列
pub fn extract_names(body: &str, target: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let mut visitor = NameVisitor {
        target,
        locked_parent: None,
        names: Vec::new(),
    };
    walk(document.tree.root(), &mut visitor);
    visitor.names
}

/// 使用默认目标标签提取词条
pub fn extract_default(body: &str) -> Vec<String> {
    extract_names(body, NAME_TARGET_TAG)
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
