//! Keyword feed records and their parser.

// self
use crate::{
	_prelude::*,
	feeds::{child_text, etag_of},
	xml::XmlNode,
};

/// Decoded keyword listing for one site.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordFeed {
	/// Opaque version token of the listing.
	pub etag: Option<String>,
	/// Feed identifier URL.
	pub id: Option<String>,
	/// Last-updated timestamp, verbatim.
	pub updated: Option<String>,
	/// Decoded keywords, in document order.
	pub keywords: Vec<Keyword>,
}
impl KeywordFeed {
	/// Extracts the feed metadata and every keyword from a decoded feed root.
	pub fn parse(node: &XmlNode) -> Self {
		Self {
			etag: etag_of(node),
			id: child_text(node, "id"),
			updated: child_text(node, "updated"),
			keywords: node.children_named("wt:keyword").map(Keyword::from_node).collect(),
		}
	}
}

/// One keyword the vendor associates with the site.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
	/// The keyword text.
	pub value: Option<String>,
	/// Where the keyword was observed (`internal` or `external` links).
	pub source: Option<String>,
}
impl Keyword {
	fn from_node(node: &XmlNode) -> Self {
		Self {
			value: node.text().map(str::to_owned),
			source: node.attribute("source").map(str::to_owned),
		}
	}
}
