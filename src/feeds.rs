//! Webmaster feed services and per-resource record parsers.
//!
//! [`WebmasterTools`] wraps a [`Consumer`] and exposes one operation per feed
//! action (list sites, add a sitemap, fetch crawl issues, ...). Every operation
//! resets the consumer, sends a signed request with the GData headers, checks the
//! expected status code, and hands the decoded XML tree to the matching record
//! parser. Unexpected status codes surface as [`ApiError`] carrying the raw
//! response.

pub mod bodies;
pub mod crawl_issue;
pub mod keyword;
pub mod site;
pub mod sitemap;

pub use crawl_issue::*;
pub use keyword::*;
pub use site::*;
pub use sitemap::*;

// self
use crate::{
	_prelude::*,
	consumer::{Consumer, TransportOption},
	error::{ApiError, ConfigError, DecodeError},
	http::{self, RawResponse},
	sign::{Method, RequestSpec},
	xml::{self, XmlNode},
};

/// Base URL for all webmaster feed calls.
pub const FEED_BASE_URL: &str = "https://www.google.com/webmasters/tools/feeds/";

/// Root element a feed response is expected to decode under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedRoot {
	/// Multi-entry listing under `<feed>`.
	Feed,
	/// Single resource under `<entry>`.
	Entry,
}
impl FeedRoot {
	/// Normalized name of the root element.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Feed => "feed",
			Self::Entry => "entry",
		}
	}
}

/// Site verification mechanisms accepted by the verification call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationMethod {
	/// Verification through a meta tag on the site's front page.
	Metatag,
	/// Verification through a hosted HTML page.
	Htmlpage,
}
impl VerificationMethod {
	/// Wire form of the method.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Metatag => "metatag",
			Self::Htmlpage => "htmlpage",
		}
	}
}
impl FromStr for VerificationMethod {
	type Err = ConfigError;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"metatag" => Ok(Self::Metatag),
			"htmlpage" => Ok(Self::Htmlpage),
			_ => Err(ConfigError::UnknownVerificationMethod { method: raw.to_owned() }),
		}
	}
}

/// Site settings accepted by the update call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteSetting {
	/// Geographic target of the site.
	Geolocation,
	/// Desired crawl rate.
	CrawlRate,
	/// Preferred (www / non-www) domain form.
	PreferredDomain,
}
impl SiteSetting {
	/// Hyphenated wire form used in the settings entry body.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Geolocation => "geolocation",
			Self::CrawlRate => "crawl-rate",
			Self::PreferredDomain => "preferred-domain",
		}
	}
}
impl FromStr for SiteSetting {
	type Err = ConfigError;

	// Both the hyphenated and underscored spellings are accepted.
	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.replace('_', "-").as_str() {
			"geolocation" => Ok(Self::Geolocation),
			"crawl-rate" => Ok(Self::CrawlRate),
			"preferred-domain" => Ok(Self::PreferredDomain),
			_ => Err(ConfigError::UnknownSiteSetting { setting: raw.to_owned() }),
		}
	}
}

/// Sitemap flavors accepted by the sitemap-add call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SitemapType {
	/// Regular web sitemap.
	Web,
	/// Video sitemap.
	Video,
	/// Code-search sitemap.
	Code,
}
impl SitemapType {
	/// Uppercase wire form used in the sitemap entry body.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Web => "WEB",
			Self::Video => "VIDEO",
			Self::Code => "CODE",
		}
	}
}
impl FromStr for SitemapType {
	type Err = ConfigError;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.to_ascii_lowercase().as_str() {
			"web" => Ok(Self::Web),
			"video" => Ok(Self::Video),
			"code" => Ok(Self::Code),
			_ => Err(ConfigError::UnknownSitemapType { kind: raw.to_owned() }),
		}
	}
}

/// Webmaster feed service bound to one consumer and base URL.
pub struct WebmasterTools {
	consumer: Consumer,
	base_url: String,
}
impl WebmasterTools {
	/// Creates a service against the default feed base URL.
	pub fn new(consumer: Consumer) -> Self {
		Self::with_base_url(consumer, FEED_BASE_URL)
	}

	/// Creates a service against a custom base URL (tests, staging endpoints).
	pub fn with_base_url(consumer: Consumer, base_url: impl Into<String>) -> Self {
		Self { consumer, base_url: base_url.into() }
	}

	/// Installs the access token pair for all following calls.
	pub fn set_tokens(&mut self, token: impl Into<String>, token_secret: impl Into<String>) {
		self.consumer.set_token(token, token_secret);
	}

	/// Fetches the site listing, or one site when `site` is given.
	///
	/// An `etag` turns the call conditional via `If-None-Match`; the vendor
	/// answers 304 (surfaced as [`ApiError`]) when nothing changed.
	pub fn sites(&mut self, site: Option<&str>, etag: Option<&str>) -> Result<SiteFeed> {
		let mut headers = http::default_headers(None);

		if let Some(etag) = etag {
			headers.push(format!("If-None-Match: {etag}"));
		}

		let (url, root) = match site {
			Some(site) => (format!("{}sites/{}", self.base_url, path_encode(site)), FeedRoot::Entry),
			None => (format!("{}sites/", self.base_url), FeedRoot::Feed),
		};
		let spec = RequestSpec::new(url, Method::Get);
		let response =
			self.execute(&spec, headers, 200, "The list of sites could not be retrieved")?;
		let node = decode_root(&response, root)?;

		Ok(SiteFeed::parse(root, &node))
	}

	/// Adds a site to the authorized account.
	pub fn add_site(&mut self, site_url: &str) -> Result<SiteFeed> {
		let body = bodies::add_site(site_url);
		let headers = http::default_headers(Some(body.len()));
		let spec =
			RequestSpec::new(format!("{}sites/", self.base_url), Method::Post).with_body(body);
		let response = self.execute(
			&spec,
			headers,
			201,
			format!("The site {site_url} could not be added"),
		)?;
		let node = decode_root(&response, FeedRoot::Entry)?;

		Ok(SiteFeed::parse(FeedRoot::Entry, &node))
	}

	/// Removes a site from the authorized account.
	pub fn delete_site(&mut self, site: &str) -> Result<()> {
		let url = format!("{}sites/{}", self.base_url, path_encode(site));
		let spec = RequestSpec::new(url, Method::Delete);
		let headers = vec![format!("GData-Version: {}", http::GDATA_VERSION)];

		self.execute(&spec, headers, 200, format!("The site {site} could not be removed"))?;

		Ok(())
	}

	/// Verifies a site using the given method; returns the vendor's verdict.
	pub fn verify_site(&mut self, site: &str, method: VerificationMethod) -> Result<bool> {
		let body = bodies::verify_site(site, method);
		let headers = http::default_headers(Some(body.len()));
		let url = format!("{}sites/{}", self.base_url, path_encode(site));
		let spec = RequestSpec::new(url, Method::Put).with_body(body);
		let response =
			self.execute(&spec, headers, 200, format!("The site {site} could not be verified"))?;
		let node = decode_root(&response, FeedRoot::Entry)?;

		node.child("wt:verified")
			.and_then(|verified| verified.value.as_bool())
			.ok_or_else(|| DecodeError::MissingElement { name: "wt:verified".into() }.into())
	}

	/// Updates one site setting.
	pub fn update_site(&mut self, site: &str, setting: SiteSetting, value: &str) -> Result<SiteFeed> {
		let body = bodies::update_site(site, setting, value);
		let headers = http::default_headers(Some(body.len()));
		let url = format!("{}sites/{}", self.base_url, path_encode(site));
		let spec = RequestSpec::new(url, Method::Put).with_body(body);
		let response = self.execute(
			&spec,
			headers,
			200,
			format!("The settings for the site {site} could not be updated"),
		)?;
		let node = decode_root(&response, FeedRoot::Entry)?;

		Ok(SiteFeed::parse(FeedRoot::Entry, &node))
	}

	/// Fetches the keyword listing for a site.
	pub fn keywords(&mut self, site: &str) -> Result<KeywordFeed> {
		let url = format!("{}{}/keywords/", self.base_url, path_encode(site));
		let spec = RequestSpec::new(url, Method::Get);
		let response = self.execute(
			&spec,
			http::default_headers(None),
			200,
			format!("The keywords for the site {site} could not be retrieved"),
		)?;
		let node = decode_root(&response, FeedRoot::Feed)?;

		Ok(KeywordFeed::parse(&node))
	}

	/// Fetches all sitemaps for a site, or one sitemap when `sitemap` is given
	/// (the sitemap URL must match exactly).
	pub fn sitemaps(&mut self, site: &str, sitemap: Option<&str>) -> Result<SitemapFeed> {
		let base = format!("{}{}/sitemaps/", self.base_url, path_encode(site));
		let (url, root) = match sitemap {
			Some(sitemap) => (format!("{base}{}", path_encode(sitemap)), FeedRoot::Entry),
			None => (base, FeedRoot::Feed),
		};
		let spec = RequestSpec::new(url, Method::Get);
		let response = self.execute(
			&spec,
			http::default_headers(None),
			200,
			format!("The sitemaps for the site {site} could not be retrieved"),
		)?;
		let node = decode_root(&response, root)?;

		Ok(SitemapFeed::parse(root, &node))
	}

	/// Registers a sitemap for a site.
	pub fn add_sitemap(
		&mut self,
		site: &str,
		sitemap: &str,
		kind: SitemapType,
	) -> Result<SitemapFeed> {
		let body = bodies::add_sitemap(sitemap, kind);
		let headers = http::default_headers(Some(body.len()));
		let url = format!("{}{}/sitemaps/", self.base_url, path_encode(site));
		let spec = RequestSpec::new(url, Method::Post).with_body(body);
		let response = self.execute(
			&spec,
			headers,
			201,
			format!("The sitemap {sitemap} could not be added"),
		)?;
		let node = decode_root(&response, FeedRoot::Entry)?;

		Ok(SitemapFeed::parse(FeedRoot::Entry, &node))
	}

	/// Removes a sitemap from a site.
	pub fn delete_sitemap(&mut self, site: &str, sitemap: &str) -> Result<()> {
		let url =
			format!("{}{}/sitemaps/{}", self.base_url, path_encode(site), path_encode(sitemap));
		let spec = RequestSpec::new(url, Method::Delete);

		self.execute(
			&spec,
			http::default_headers(None),
			200,
			format!("The sitemap {sitemap} could not be removed from the site {site}"),
		)?;

		Ok(())
	}

	/// Fetches the crawl issues feed for a site.
	pub fn crawl_issues(&mut self, site: &str) -> Result<CrawlIssueFeed> {
		let url = format!("{}{}/crawlissues/", self.base_url, path_encode(site));
		let spec = RequestSpec::new(url, Method::Get);
		let response = self.execute(
			&spec,
			http::default_headers(None),
			200,
			format!("The crawl issues feed for {site} could not be retrieved"),
		)?;
		let node = decode_root(&response, FeedRoot::Feed)?;

		Ok(CrawlIssueFeed::parse(&node))
	}

	fn execute(
		&mut self,
		spec: &RequestSpec,
		headers: Vec<String>,
		expected_status: u16,
		message: impl Into<String>,
	) -> Result<RawResponse> {
		self.consumer.reset();

		let overrides = [TransportOption::IncludeHeader(true), TransportOption::Headers(headers)];
		let raw = self.consumer.request(spec, &overrides)?;
		let response = RawResponse::parse(&raw)?;

		if response.status != expected_status {
			return Err(ApiError::new(message, &response).into());
		}

		Ok(response)
	}
}
impl Debug for WebmasterTools {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("WebmasterTools").field("base_url", &self.base_url).finish()
	}
}

fn decode_root(response: &RawResponse, root: FeedRoot) -> Result<XmlNode> {
	let mut decoded = xml::decode(&response.body)?;

	decoded
		.remove(root.as_str())
		.ok_or_else(|| DecodeError::MissingElement { name: root.as_str().into() }.into())
}

/// Form-urlencodes a site or sitemap URL for embedding in a feed path.
fn path_encode(value: &str) -> String {
	url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

pub(crate) fn child_text(node: &XmlNode, name: &str) -> Option<String> {
	node.child(name).and_then(XmlNode::text).map(str::to_owned)
}

pub(crate) fn child_bool(node: &XmlNode, name: &str) -> Option<bool> {
	node.child(name).and_then(|child| child.value.as_bool())
}

pub(crate) fn etag_of(node: &XmlNode) -> Option<String> {
	node.attribute("etag").map(str::to_owned)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn path_encoding_matches_form_urlencode_semantics() {
		assert_eq!(path_encode("http://example.com/"), "http%3A%2F%2Fexample.com%2F");
		assert_eq!(path_encode("a b"), "a+b");
		assert_eq!(path_encode("keep-safe_chars.txt"), "keep-safe_chars.txt");
	}

	#[test]
	fn site_settings_parse_both_spellings() {
		assert!(matches!("crawl-rate".parse::<SiteSetting>(), Ok(SiteSetting::CrawlRate)));
		assert!(matches!("crawl_rate".parse::<SiteSetting>(), Ok(SiteSetting::CrawlRate)));
		assert!(matches!(
			"preferred_domain".parse::<SiteSetting>(),
			Ok(SiteSetting::PreferredDomain)
		));
		assert!(matches!(
			"crawl-budget".parse::<SiteSetting>(),
			Err(ConfigError::UnknownSiteSetting { .. })
		));
	}

	#[test]
	fn verification_methods_reject_unknown_names() {
		assert!(matches!("metatag".parse::<VerificationMethod>(), Ok(VerificationMethod::Metatag)));
		assert!(matches!(
			"dns".parse::<VerificationMethod>(),
			Err(ConfigError::UnknownVerificationMethod { .. })
		));
	}

	#[test]
	fn sitemap_types_uppercase_on_the_wire() {
		assert_eq!(SitemapType::Web.as_str(), "WEB");
		assert!(matches!("video".parse::<SitemapType>(), Ok(SitemapType::Video)));
		assert!(matches!(
			"image".parse::<SitemapType>(),
			Err(ConfigError::UnknownSitemapType { .. })
		));
	}
}
