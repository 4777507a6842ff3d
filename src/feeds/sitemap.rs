//! Sitemap feed records and their parser.

// self
use crate::{
	_prelude::*,
	feeds::{FeedRoot, child_bool, child_text, etag_of},
	xml::XmlNode,
};

/// Decoded sitemap listing, or a single-sitemap response wrapped in the same shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapFeed {
	/// Opaque version token of the listing.
	pub etag: Option<String>,
	/// Feed identifier URL.
	pub id: Option<String>,
	/// Last-updated timestamp, verbatim.
	pub updated: Option<String>,
	/// Whether the feed advertises mobile sitemap support.
	pub sitemap_mobile: Option<bool>,
	/// Whether the feed advertises news sitemap support.
	pub sitemap_news: Option<bool>,
	/// Decoded sitemap entries; exactly one for single-sitemap responses.
	pub sitemaps: Vec<Sitemap>,
}
impl SitemapFeed {
	/// Extracts the feed metadata and every sitemap entry from a decoded root.
	pub fn parse(root: FeedRoot, node: &XmlNode) -> Self {
		let mut feed = Self {
			etag: etag_of(node),
			id: child_text(node, "id"),
			updated: child_text(node, "updated"),
			sitemap_mobile: child_bool(node, "wt:sitemap_mobile"),
			sitemap_news: child_bool(node, "wt:sitemap_news"),
			sitemaps: Vec::new(),
		};

		match root {
			FeedRoot::Entry => feed.sitemaps.push(Sitemap::from_entry(node)),
			FeedRoot::Feed =>
				feed.sitemaps.extend(node.children_named("entry").map(Sitemap::from_entry)),
		}

		feed
	}

	/// Convenience accessor for single-sitemap responses.
	pub fn sitemap(&self) -> Option<&Sitemap> {
		self.sitemaps.first()
	}
}

/// One sitemap entry from the sitemaps feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sitemap {
	/// Opaque version token of the entry.
	pub etag: Option<String>,
	/// Entry identifier URL.
	pub id: Option<String>,
	/// Last-updated timestamp, verbatim.
	pub updated: Option<String>,
	/// Sitemap URL (the entry title).
	pub title: Option<String>,
	/// Sitemap flavor as reported by the vendor (`WEB`, `VIDEO`, `CODE`).
	pub sitemap_type: Option<String>,
	/// Processing status (`StatusPending`, `StatusParsed`, ...).
	pub status: Option<String>,
	/// When the vendor last downloaded the sitemap, verbatim.
	pub last_downloaded: Option<String>,
	/// Number of URLs the sitemap contained at last download.
	pub url_count: Option<u64>,
	/// Publication label for news sitemaps.
	pub news_publication_label: Option<String>,
	/// Markup language for mobile sitemaps.
	pub mobile_markup_language: Option<String>,
}
impl Sitemap {
	fn from_entry(entry: &XmlNode) -> Self {
		Self {
			etag: etag_of(entry),
			id: child_text(entry, "id"),
			updated: child_text(entry, "updated"),
			title: child_text(entry, "title"),
			sitemap_type: child_text(entry, "wt:sitemap_type"),
			status: child_text(entry, "wt:sitemap_status"),
			last_downloaded: child_text(entry, "wt:sitemap_last_downloaded"),
			url_count: child_text(entry, "wt:sitemap_url_count")
				.and_then(|raw| raw.parse().ok()),
			news_publication_label: child_text(entry, "wt:sitemap_news_publication_label"),
			mobile_markup_language: child_text(entry, "wt:sitemap_mobile_markup_language"),
		}
	}
}
