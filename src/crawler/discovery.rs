// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::crawler::traversal::{walk, NodeVisitor};
use crate::crawler::{fetch, INDEX_TARGET_TAG, LINK_SECTION_CLASS};
use crate::utils::errors::FetchError;
use ego_tree::NodeRef;
use scraper::{Html, Node};
use std::collections::HashSet;
use tracing::info;
use url::Url;

/// 已发现URL集合
///
/// 由单次发现调用独占持有；URL至多被接纳一次，且条目只增不减。
/// 重复出现的URL被记入`duplicates`用于诊断，不视为错误。
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<String>,
    duplicates: Vec<String>,
}

impl VisitedSet {
    /// 尝试接纳一个URL
    ///
    /// 首次出现返回`true`并标记为已访问；重复出现记入重复列表并返回`false`
    pub fn admit(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            self.duplicates.push(url.to_string());
            return false;
        }
        self.seen.insert(url.to_string());
        true
    }

    /// 已接纳的URL数量
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// 被跳过的重复URL
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

/// 在链接区块内收集锚元素的访问器
struct AnchorVisitor<'a> {
    base: &'a Url,
    visited: &'a mut VisitedSet,
    links: &'a mut Vec<String>,
}

impl NodeVisitor for AnchorVisitor<'_> {
    fn pre(&mut self, node: NodeRef<'_, Node>) {
        let Node::Element(el) = node.value() else {
            return;
        };
        if el.name() != "a" {
            return;
        }

        let Some(href) = el.attr("href") else {
            return;
        };

        // Resolve against the response's final URL; unparsable hrefs are skipped
        let Ok(link) = self.base.join(href) else {
            return;
        };

        let link = link.to_string();
        if self.visited.admit(&link) {
            self.links.push(link);
        }
    }
}

/// 定位目标区块并触发锚收集的访问器
struct SectionVisitor<'a> {
    target: &'a str,
    base: &'a Url,
    visited: &'a mut VisitedSet,
    links: Vec<String>,
}

impl NodeVisitor for SectionVisitor<'_> {
    fn pre(&mut self, node: NodeRef<'_, Node>) {
        let Node::Element(el) = node.value() else {
            return;
        };
        if el.name() != self.target || el.attr("class") != Some(LINK_SECTION_CLASS) {
            return;
        }

        let mut anchors = AnchorVisitor {
            base: self.base,
            visited: &mut *self.visited,
            links: &mut self.links,
        };
        walk(node, &mut anchors);
    }
}

/// 从解析后的索引页面收集绝对链接
///
/// 仅扫描class为`div-col`的目标区块，按文档顺序返回去重后的链接
pub fn collect_index_links(
    document: &Html,
    target: &str,
    base: &Url,
    visited: &mut VisitedSet,
) -> Vec<String> {
    let mut section = SectionVisitor {
        target,
        base,
        visited,
        links: Vec::new(),
    };
    walk(document.tree.root(), &mut section);
    section.links
}

/// 抓取种子页面并发现全部目标链接
///
/// # 参数
///
/// * `client` - 共享HTTP客户端
/// * `seed_url` - 种子索引页面URL
///
/// # 返回值
///
/// * `Ok(Vec<String>)` - 去重后的绝对URL序列
/// * `Err(FetchError)` - 种子页面抓取失败，发现阶段中止
pub async fn discover_links(
    client: &reqwest::Client,
    seed_url: &str,
) -> Result<Vec<String>, FetchError> {
    let page = fetch::fetch_page(client, seed_url).await?;

    let document = Html::parse_document(&page.body);
    let mut visited = VisitedSet::default();
    let links = collect_index_links(&document, INDEX_TARGET_TAG, &page.final_url, &mut visited);

    info!(
        "discovered {} links from seed page ({} duplicates skipped)",
        links.len(),
        visited.duplicates().len()
    );

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://en.wikipedia.org/wiki/Index").unwrap()
    }

    #[test]
    fn test_collect_links_resolves_relative_hrefs() {
        let html = r#"
            <div class="div-col">
                <ul>
                    <li><a href="/wiki/Foo_University">Foo</a></li>
                    <li><a href="https://example.com/bar">Bar</a></li>
                </ul>
            </div>
        "#;
        let document = Html::parse_document(html);
        let mut visited = VisitedSet::default();

        let links = collect_index_links(&document, INDEX_TARGET_TAG, &base(), &mut visited);

        assert_eq!(
            links,
            vec![
                "https://en.wikipedia.org/wiki/Foo_University",
                "https://example.com/bar",
            ]
        );
    }

    #[test]
    fn test_collect_links_deduplicates() {
        let html = r#"
            <div class="div-col">
                <a href="/wiki/Foo">Foo</a>
                <a href="/wiki/Foo">Foo again</a>
                <a href="/wiki/Bar">Bar</a>
            </div>
            <div class="div-col">
                <a href="/wiki/Bar">Bar again</a>
            </div>
        "#;
        let document = Html::parse_document(html);
        let mut visited = VisitedSet::default();

        let links = collect_index_links(&document, INDEX_TARGET_TAG, &base(), &mut visited);

        // Set property: no URL appears twice
        let unique: HashSet<_> = links.iter().collect();
        assert_eq!(unique.len(), links.len());
        assert_eq!(links.len(), 2);
        assert_eq!(visited.duplicates().len(), 2);
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_collect_links_ignores_other_sections() {
        let html = r#"
            <div class="nav"><a href="/wiki/Skip_me">skip</a></div>
            <div class="div-col wide"><a href="/wiki/Not_exact_class">skip</a></div>
            <div class="div-col"><a href="/wiki/Keep_me">keep</a></div>
        "#;
        let document = Html::parse_document(html);
        let mut visited = VisitedSet::default();

        let links = collect_index_links(&document, INDEX_TARGET_TAG, &base(), &mut visited);

        assert_eq!(links, vec!["https://en.wikipedia.org/wiki/Keep_me"]);
    }

    #[test]
    fn test_visited_set_is_monotonic() {
        let mut visited = VisitedSet::default();
        assert!(visited.admit("https://a"));
        assert!(!visited.admit("https://a"));
        assert!(!visited.admit("https://a"));
        assert_eq!(visited.len(), 1);
        assert_eq!(visited.duplicates().len(), 2);
    }
}
