// crates.io
use httpmock::prelude::*;
// self
use gdata_feeds::{
	auth::Credentials,
	consumer::{Consumer, TransportOptions},
	error::Error,
	feeds::{SiteSetting, SitemapType, VerificationMethod, WebmasterTools},
};

const WT_NS: &str = "http://schemas.google.com/webmasters/tools/2007";
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

fn test_service(server: &MockServer) -> WebmasterTools {
	let credentials = Credentials::new("test-key", "test-secret")
		.expect("Static test credentials should be accepted.");
	let consumer = Consumer::new(credentials, TransportOptions::default());
	let mut service = WebmasterTools::with_base_url(consumer, server.url("/feeds/"));

	service.set_tokens("access-token", "access-secret");

	service
}

#[test]
fn lists_sites_from_the_feed() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/feeds/sites/")
			.header("gdata-version", "2.0")
			.header("content-type", "application/atom+xml")
			.query_param("oauth_token", "access-token")
			.query_param_exists("oauth_signature");
		then.status(200).body(format!(
			concat!(
				r#"<feed xmlns:wt="{ns}" etag="W/&quot;feed&quot;">"#,
				"<id>sites-feed</id><title>Sites</title>",
				r#"<entry etag="W/&quot;one&quot;"><title>http://example.com/</title>"#,
				"<wt:verified>true</wt:verified></entry>",
				r#"<entry etag="W/&quot;two&quot;"><title>http://example.org/</title>"#,
				"<wt:verified>false</wt:verified></entry>",
				"</feed>",
			),
			ns = WT_NS
		));
	});
	let mut service = test_service(&server);
	let feed = service.sites(None, None).expect("Site listing should succeed.");

	mock.assert();

	assert_eq!(feed.etag.as_deref(), Some(r#"W/"feed""#));
	assert_eq!(feed.sites.len(), 2);
	assert_eq!(feed.sites[0].url.as_deref(), Some("http://example.com/"));
	assert_eq!(feed.sites[0].verified, Some(true));
	assert_eq!(feed.sites[1].verified, Some(false));
}

#[test]
fn conditional_fetches_send_if_none_match() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/feeds/sites/").header("if-none-match", "W/\"feed\"");
		then.status(200).body(r#"<feed etag="W/&quot;feed&quot;"><id>sites-feed</id></feed>"#);
	});
	let mut service = test_service(&server);

	service.sites(None, Some("W/\"feed\"")).expect("Conditional listing should succeed.");
	mock.assert();
}

#[test]
fn single_site_fetches_use_the_entry_root() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET);
		then.status(200).body(format!(
			concat!(
				r#"<entry xmlns:wt="{ns}" etag="W/&quot;one&quot;">"#,
				"<title>http://example.com/</title>",
				"<wt:verified>true</wt:verified><wt:geolocation>NL</wt:geolocation>",
				"</entry>",
			),
			ns = WT_NS
		));
	});
	let mut service = test_service(&server);
	let feed =
		service.sites(Some("http://example.com/"), None).expect("Single-site fetch should succeed.");

	mock.assert();

	let site = feed.site().expect("One site entry should parse.");

	assert_eq!(site.geolocation.as_deref(), Some("NL"));
	assert_eq!(site.verified, Some(true));
}

#[test]
fn add_site_posts_the_rendered_entry_and_expects_201() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST).path("/feeds/sites/").header_exists("content-length").body(format!(
			r#"<atom:entry xmlns:atom="{ATOM_NS}"><atom:content src="http://example.com/"/></atom:entry>"#
		));
		then.status(201)
			.body(r#"<entry etag="W/&quot;new&quot;"><title>http://example.com/</title></entry>"#);
	});
	let mut service = test_service(&server);
	let feed = service.add_site("http://example.com/").expect("Site creation should succeed.");

	mock.assert();

	assert_eq!(feed.site().and_then(|site| site.url.as_deref()), Some("http://example.com/"));
}

#[test]
fn add_site_surfaces_unexpected_statuses_with_the_raw_body() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(POST).path("/feeds/sites/");
		then.status(403).body("quota exceeded");
	});

	let mut service = test_service(&server);
	let err =
		service.add_site("http://example.com/").expect_err("A 403 on site creation should fail.");

	match err {
		Error::Api(api) => {
			assert_eq!(api.status, 403);
			assert_eq!(api.body, "quota exceeded");
			assert!(api.message.contains("http://example.com/"));
		},
		other => panic!("Expected an API error, got {other:?}."),
	}
}

#[test]
fn delete_site_issues_a_signed_delete() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(DELETE).header("gdata-version", "2.0");
		then.status(200).body("");
	});
	let mut service = test_service(&server);

	service.delete_site("http://example.com/").expect("Site deletion should succeed.");
	mock.assert();
}

#[test]
fn verify_site_returns_the_vendor_verdict() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(PUT).body(format!(
			concat!(
				r#"<atom:entry xmlns:atom="{atom}" xmlns:wt="{wt}">"#,
				"<atom:id>http://example.com/</atom:id>",
				r#"<wt:verification-method type="metatag" in-use="true"/>"#,
				"</atom:entry>",
			),
			atom = ATOM_NS,
			wt = WT_NS
		));
		then.status(200)
			.body(format!(r#"<entry xmlns:wt="{WT_NS}"><wt:verified>true</wt:verified></entry>"#));
	});
	let mut service = test_service(&server);
	let verified = service
		.verify_site("http://example.com/", VerificationMethod::Metatag)
		.expect("Verification call should succeed.");

	mock.assert();
	assert!(verified);
}

#[test]
fn update_site_puts_the_setting_entry() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(PUT).body(format!(
			concat!(
				r#"<atom:entry xmlns:atom="{atom}" xmlns:wt="{wt}">"#,
				"<atom:id>http://example.com/</atom:id>",
				"<wt:geolocation>NL</wt:geolocation>",
				"</atom:entry>",
			),
			atom = ATOM_NS,
			wt = WT_NS
		));
		then.status(200)
			.body(format!(r#"<entry xmlns:wt="{WT_NS}"><wt:geolocation>NL</wt:geolocation></entry>"#));
	});
	let mut service = test_service(&server);
	let feed = service
		.update_site("http://example.com/", SiteSetting::Geolocation, "NL")
		.expect("Settings update should succeed.");

	mock.assert();
	assert_eq!(feed.site().and_then(|site| site.geolocation.as_deref()), Some("NL"));
}

#[test]
fn keyword_listings_parse_values_and_sources() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET);
		then.status(200).body(format!(
			concat!(
				r#"<feed xmlns:wt="{ns}" etag="W/&quot;kw&quot;">"#,
				r#"<wt:keyword source="internal">rust</wt:keyword>"#,
				r#"<wt:keyword source="external">oauth</wt:keyword>"#,
				"</feed>",
			),
			ns = WT_NS
		));
	});
	let mut service = test_service(&server);
	let feed = service.keywords("http://example.com/").expect("Keyword listing should succeed.");

	mock.assert();

	assert_eq!(feed.keywords.len(), 2);
	assert_eq!(feed.keywords[0].value.as_deref(), Some("rust"));
	assert_eq!(feed.keywords[1].source.as_deref(), Some("external"));
}

#[test]
fn sitemap_round_trip_add_list_delete() {
	let server = MockServer::start();
	let add = server.mock(|when, then| {
		when.method(POST).body(format!(
			concat!(
				r#"<atom:entry xmlns:atom="{atom}" xmlns:wt="{wt}">"#,
				"<atom:id>http://example.com/sitemap.xml</atom:id>",
				r#"<atom:category scheme="http://schemas.google.com/g/2005#kind" term="{wt}#sitemap-regular"/>"#,
				"<wt:sitemap-type>WEB</wt:sitemap-type>",
				"</atom:entry>",
			),
			atom = ATOM_NS,
			wt = WT_NS
		));
		then.status(201).body(format!(
			concat!(
				r#"<entry xmlns:wt="{ns}"><title>http://example.com/sitemap.xml</title>"#,
				"<wt:sitemap-type>WEB</wt:sitemap-type></entry>",
			),
			ns = WT_NS
		));
	});
	let list = server.mock(|when, then| {
		when.method(GET);
		then.status(200).body(format!(
			concat!(
				r#"<feed xmlns:wt="{ns}" etag="W/&quot;sm&quot;">"#,
				"<entry><title>http://example.com/sitemap.xml</title>",
				"<wt:sitemap-url-count>42</wt:sitemap-url-count></entry>",
				"</feed>",
			),
			ns = WT_NS
		));
	});
	let mut service = test_service(&server);
	let created = service
		.add_sitemap("http://example.com/", "http://example.com/sitemap.xml", SitemapType::Web)
		.expect("Sitemap creation should succeed.");

	add.assert();
	assert_eq!(
		created.sitemap().and_then(|sitemap| sitemap.sitemap_type.as_deref()),
		Some("WEB")
	);

	let listing =
		service.sitemaps("http://example.com/", None).expect("Sitemap listing should succeed.");

	list.assert();
	assert_eq!(listing.sitemaps.len(), 1);
	assert_eq!(listing.sitemaps[0].url_count, Some(42));

	let delete = server.mock(|when, then| {
		when.method(DELETE);
		then.status(200).body("");
	});

	service
		.delete_sitemap("http://example.com/", "http://example.com/sitemap.xml")
		.expect("Sitemap deletion should succeed.");
	delete.assert();
}

#[test]
fn crawl_issues_parse_paging_and_entries() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET);
		then.status(200).body(format!(
			concat!(
				r#"<feed xmlns:wt="{ns}" xmlns:openSearch="http://a9.com/-/spec/opensearch/1.1/">"#,
				"<openSearch:totalResults>1</openSearch:totalResults>",
				"<entry><wt:crawlType>web-crawl</wt:crawlType>",
				"<wt:issueType>http-error</wt:issueType>",
				"<wt:detail>404 (Not found)</wt:detail></entry>",
				"</feed>",
			),
			ns = WT_NS
		));
	});
	let mut service = test_service(&server);
	let feed =
		service.crawl_issues("http://example.com/").expect("Crawl issue listing should succeed.");

	mock.assert();

	assert_eq!(feed.total_results, Some(1));
	assert_eq!(feed.issues.len(), 1);
	assert_eq!(feed.issues[0].issue_type.as_deref(), Some("http-error"));
	assert_eq!(feed.issues[0].detail.as_deref(), Some("404 (Not found)"));
}
