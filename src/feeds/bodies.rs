//! Pre-rendered Atom request bodies for write calls.
//!
//! The transport layer only ever receives a finished XML string; these builders
//! are the crate's stand-in for the template renderer that produced the bodies in
//! the original deployment.

// crates.io
use quick_xml::escape::escape;
// self
use crate::feeds::{SiteSetting, SitemapType, VerificationMethod};

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const WT_NS: &str = "http://schemas.google.com/webmasters/tools/2007";

/// Entry body registering a new site.
pub fn add_site(site_url: &str) -> String {
	format!(
		r#"<atom:entry xmlns:atom="{ATOM_NS}"><atom:content src="{}"/></atom:entry>"#,
		escape(site_url)
	)
}

/// Entry body requesting verification of a site through the given method.
pub fn verify_site(site_url: &str, method: VerificationMethod) -> String {
	format!(
		r#"<atom:entry xmlns:atom="{ATOM_NS}" xmlns:wt="{WT_NS}"><atom:id>{}</atom:id><wt:verification-method type="{}" in-use="true"/></atom:entry>"#,
		escape(site_url),
		method.as_str()
	)
}

/// Entry body updating one site setting.
pub fn update_site(site_url: &str, setting: SiteSetting, value: &str) -> String {
	let element = setting.as_str();

	format!(
		r#"<atom:entry xmlns:atom="{ATOM_NS}" xmlns:wt="{WT_NS}"><atom:id>{}</atom:id><wt:{element}>{}</wt:{element}></atom:entry>"#,
		escape(site_url),
		escape(value)
	)
}

/// Entry body registering a sitemap of the given type.
pub fn add_sitemap(sitemap_url: &str, kind: SitemapType) -> String {
	format!(
		r#"<atom:entry xmlns:atom="{ATOM_NS}" xmlns:wt="{WT_NS}"><atom:id>{}</atom:id><atom:category scheme="http://schemas.google.com/g/2005#kind" term="{WT_NS}#sitemap-regular"/><wt:sitemap-type>{}</wt:sitemap-type></atom:entry>"#,
		escape(sitemap_url),
		kind.as_str()
	)
}
