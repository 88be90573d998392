// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use ego_tree::NodeRef;
use scraper::Node;

/// 节点访问器
///
/// 遍历解析后的标记树时回调；访问器自身持有累积状态
pub trait NodeVisitor {
    /// 进入节点时调用（先序）
    fn pre(&mut self, _node: NodeRef<'_, Node>) {}

    /// 离开节点时调用（后序）
    fn post(&mut self, _node: NodeRef<'_, Node>) {}
}

/// 按文档顺序遍历以`node`为根的子树
///
/// 先调用`pre`，递归访问每个子节点，返回后调用`post`
pub fn walk<V: NodeVisitor>(node: NodeRef<'_, Node>, visitor: &mut V) {
    visitor.pre(node);

    for child in node.children() {
        walk(child, visitor);
    }

    visitor.post(node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    struct TagRecorder {
        pre_order: Vec<String>,
        post_order: Vec<String>,
    }

    impl NodeVisitor for TagRecorder {
        fn pre(&mut self, node: NodeRef<'_, Node>) {
            if let Node::Element(el) = node.value() {
                self.pre_order.push(el.name().to_string());
            }
        }

        fn post(&mut self, node: NodeRef<'_, Node>) {
            if let Node::Element(el) = node.value() {
                self.post_order.push(el.name().to_string());
            }
        }
    }

    #[test]
    fn test_walk_visits_in_document_order() {
        let document = Html::parse_fragment("<div><p><b>x</b></p><span>y</span></div>");
        let mut recorder = TagRecorder {
            pre_order: Vec::new(),
            post_order: Vec::new(),
        };

        walk(document.tree.root(), &mut recorder);

        assert_eq!(recorder.pre_order, vec!["html", "div", "p", "b", "span"]);
        assert_eq!(recorder.post_order, vec!["b", "p", "span", "div", "html"]);
    }

    #[test]
    fn test_walk_empty_tree_is_noop() {
        let document = Html::parse_fragment("");
        let mut recorder = TagRecorder {
            pre_order: Vec::new(),
            post_order: Vec::new(),
        };

        walk(document.tree.root(), &mut recorder);

        assert_eq!(recorder.pre_order, vec!["html"]);
    }
}
