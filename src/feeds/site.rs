//! Site feed records and their parser.

// self
use crate::{
	_prelude::*,
	feeds::{FeedRoot, child_bool, child_text, etag_of},
	xml::XmlNode,
};

/// Decoded site listing, or a single-site response wrapped in the same shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteFeed {
	/// Opaque version token of the listing.
	pub etag: Option<String>,
	/// Feed identifier URL.
	pub id: Option<String>,
	/// Last-updated timestamp, verbatim.
	pub updated: Option<String>,
	/// Feed title.
	pub title: Option<String>,
	/// Decoded site entries; exactly one for single-site responses.
	pub sites: Vec<Site>,
}
impl SiteFeed {
	/// Extracts the feed metadata and every site entry from a decoded root.
	pub fn parse(root: FeedRoot, node: &XmlNode) -> Self {
		let mut feed = Self {
			etag: etag_of(node),
			id: child_text(node, "id"),
			updated: child_text(node, "updated"),
			title: child_text(node, "title"),
			sites: Vec::new(),
		};

		match root {
			FeedRoot::Entry => feed.sites.push(Site::from_entry(node)),
			FeedRoot::Feed =>
				feed.sites.extend(node.children_named("entry").map(Site::from_entry)),
		}

		feed
	}

	/// Convenience accessor for single-site responses.
	pub fn site(&self) -> Option<&Site> {
		self.sites.first()
	}
}

/// One site entry from the sites feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
	/// Opaque version token of the entry.
	pub etag: Option<String>,
	/// Entry identifier URL.
	pub id: Option<String>,
	/// Last-updated timestamp, verbatim.
	pub updated: Option<String>,
	/// Site URL (the entry title).
	pub url: Option<String>,
	/// Whether the site has been verified.
	pub verified: Option<bool>,
	/// Offered or active verification methods.
	pub verification_methods: Vec<SiteVerificationMethod>,
	/// Configured crawl rate.
	pub crawl_rate: Option<String>,
	/// Geographic target.
	pub geolocation: Option<String>,
	/// Whether enhanced image search is enabled.
	pub enhanced_image_search: Option<bool>,
	/// Preferred (www / non-www) domain form.
	pub preferred_domain: Option<String>,
}
impl Site {
	fn from_entry(entry: &XmlNode) -> Self {
		Self {
			etag: etag_of(entry),
			id: child_text(entry, "id"),
			updated: child_text(entry, "updated"),
			url: child_text(entry, "title"),
			verified: child_bool(entry, "wt:verified"),
			verification_methods: entry
				.children_named("wt:verification_method")
				.map(SiteVerificationMethod::from_node)
				.collect(),
			crawl_rate: child_text(entry, "wt:crawl_rate"),
			geolocation: child_text(entry, "wt:geolocation"),
			enhanced_image_search: child_bool(entry, "wt:enhanced_image_search"),
			preferred_domain: child_text(entry, "wt:preferred_domain"),
		}
	}
}

/// One verification-method element attached to a site entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteVerificationMethod {
	/// Method kind (`metatag`, `htmlpage`, ...).
	pub method_type: Option<String>,
	/// Whether this method is the one currently in use.
	pub in_use: Option<bool>,
	/// Method payload (meta tag markup or page name).
	pub value: Option<String>,
}
impl SiteVerificationMethod {
	fn from_node(node: &XmlNode) -> Self {
		Self {
			method_type: node.attribute("type").map(str::to_owned),
			in_use: node.attribute("in_use").map(|raw| raw == "true"),
			value: node.text().map(str::to_owned),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::xml;

	const SITES_FEED: &str = concat!(
		r#"<feed xmlns="http://www.w3.org/2005/Atom" "#,
		r#"xmlns:wt="http://schemas.google.com/webmasters/tools/2007" etag="W/&quot;feed&quot;">"#,
		"<id>https://www.google.com/webmasters/tools/feeds/sites/</id>",
		"<updated>2011-01-01T00:00:00.000Z</updated>",
		"<title>Sites</title>",
		r#"<entry etag="W/&quot;one&quot;">"#,
		"<id>https://www.google.com/webmasters/tools/feeds/sites/http%3A%2F%2Fexample.com%2F</id>",
		"<updated>2011-01-02T00:00:00.000Z</updated>",
		"<title>http://example.com/</title>",
		"<wt:verified>true</wt:verified>",
		r#"<wt:verification-method type="metatag" in-use="false">&lt;meta name="verify-v1"/&gt;</wt:verification-method>"#,
		r#"<wt:verification-method type="htmlpage" in-use="true">google12345.html</wt:verification-method>"#,
		"<wt:crawl-rate>normal</wt:crawl-rate>",
		"<wt:geolocation>NL</wt:geolocation>",
		"<wt:enhanced-image-search>false</wt:enhanced-image-search>",
		"<wt:preferred-domain>preferwww</wt:preferred-domain>",
		"</entry>",
		r#"<entry etag="W/&quot;two&quot;"><title>http://example.org/</title>"#,
		"<wt:verified>false</wt:verified></entry>",
		"</feed>",
	);

	fn decode_feed() -> XmlNode {
		xml::decode(SITES_FEED)
			.expect("Sites feed fixture should decode.")
			.remove("feed")
			.expect("Feed root should be present.")
	}

	#[test]
	fn parses_feed_metadata() {
		let feed = SiteFeed::parse(FeedRoot::Feed, &decode_feed());

		assert_eq!(feed.etag.as_deref(), Some(r#"W/"feed""#));
		assert_eq!(feed.title.as_deref(), Some("Sites"));
		assert_eq!(feed.updated.as_deref(), Some("2011-01-01T00:00:00.000Z"));
		assert_eq!(feed.sites.len(), 2);
	}

	#[test]
	fn parses_full_site_entries() {
		let feed = SiteFeed::parse(FeedRoot::Feed, &decode_feed());
		let site = &feed.sites[0];

		assert_eq!(site.etag.as_deref(), Some(r#"W/"one""#));
		assert_eq!(site.url.as_deref(), Some("http://example.com/"));
		assert_eq!(site.verified, Some(true));
		assert_eq!(site.crawl_rate.as_deref(), Some("normal"));
		assert_eq!(site.geolocation.as_deref(), Some("NL"));
		assert_eq!(site.enhanced_image_search, Some(false));
		assert_eq!(site.preferred_domain.as_deref(), Some("preferwww"));
	}

	#[test]
	fn collects_every_verification_method_in_document_order() {
		let feed = SiteFeed::parse(FeedRoot::Feed, &decode_feed());
		let methods = &feed.sites[0].verification_methods;

		assert_eq!(methods.len(), 2);
		assert_eq!(methods[0].method_type.as_deref(), Some("metatag"));
		assert_eq!(methods[0].in_use, Some(false));
		assert_eq!(methods[1].method_type.as_deref(), Some("htmlpage"));
		assert_eq!(methods[1].in_use, Some(true));
		assert_eq!(methods[1].value.as_deref(), Some("google12345.html"));
	}

	#[test]
	fn sparse_entries_leave_fields_absent() {
		let feed = SiteFeed::parse(FeedRoot::Feed, &decode_feed());
		let site = &feed.sites[1];

		assert_eq!(site.verified, Some(false));
		assert_eq!(site.crawl_rate, None);
		assert!(site.verification_methods.is_empty());
	}

	#[test]
	fn entry_roots_wrap_into_a_single_site_feed() {
		let xml = r#"<entry etag="E"><title>http://example.com/</title><wt:verified>true</wt:verified></entry>"#;
		let node = crate::xml::decode(xml)
			.expect("Entry fixture should decode.")
			.remove("entry")
			.expect("Entry root should be present.");
		let feed = SiteFeed::parse(FeedRoot::Entry, &node);

		assert_eq!(feed.sites.len(), 1);
		assert_eq!(feed.site().and_then(|site| site.url.as_deref()), Some("http://example.com/"));
	}
}
