//! Crawl-issue feed records and their parser.

// self
use crate::{
	_prelude::*,
	feeds::{child_text, etag_of},
	xml::XmlNode,
};

/// Decoded crawl-issue listing for one site.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlIssueFeed {
	/// Opaque version token of the listing.
	pub etag: Option<String>,
	/// Feed identifier URL.
	pub id: Option<String>,
	/// Last-updated timestamp, verbatim.
	pub updated: Option<String>,
	/// Total number of issues across all pages.
	pub total_results: Option<u64>,
	/// 1-based index of the first issue in this page.
	pub start_index: Option<u64>,
	/// Page size the vendor used.
	pub items_per_page: Option<u64>,
	/// Decoded issues, in document order.
	pub issues: Vec<CrawlIssue>,
}
impl CrawlIssueFeed {
	/// Extracts the feed metadata, paging counters, and every issue from a
	/// decoded feed root.
	pub fn parse(node: &XmlNode) -> Self {
		Self {
			etag: etag_of(node),
			id: child_text(node, "id"),
			updated: child_text(node, "updated"),
			total_results: child_count(node, "open_search:total_results"),
			start_index: child_count(node, "open_search:start_index"),
			items_per_page: child_count(node, "open_search:items_per_page"),
			issues: node.children_named("entry").map(CrawlIssue::from_entry).collect(),
		}
	}
}

/// One crawl issue reported for the site.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlIssue {
	/// Entry identifier URL.
	pub id: Option<String>,
	/// Last-updated timestamp, verbatim.
	pub updated: Option<String>,
	/// Issue title.
	pub title: Option<String>,
	/// Crawler that hit the issue (`web-crawl`, `mobile-cHTML-crawl`, ...).
	pub crawl_type: Option<String>,
	/// Issue classification reported by the vendor.
	pub issue_type: Option<String>,
	/// URL the issue was detected on.
	pub url: Option<String>,
	/// Detection timestamp, verbatim.
	pub date_detected: Option<String>,
	/// Detail message accompanying the issue.
	pub detail: Option<String>,
}
impl CrawlIssue {
	fn from_entry(entry: &XmlNode) -> Self {
		Self {
			id: child_text(entry, "id"),
			updated: child_text(entry, "updated"),
			title: child_text(entry, "title"),
			crawl_type: child_text(entry, "wt:crawl_type"),
			issue_type: child_text(entry, "wt:issue_type"),
			url: child_text(entry, "wt:url"),
			date_detected: child_text(entry, "wt:date_detected"),
			detail: child_text(entry, "wt:detail"),
		}
	}
}

fn child_count(node: &XmlNode, name: &str) -> Option<u64> {
	child_text(node, name).and_then(|raw| raw.parse().ok())
}
