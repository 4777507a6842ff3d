// crates.io
use httpmock::prelude::*;
// self
use gdata_feeds::{
	auth::Credentials,
	consumer::{Consumer, TransportOption, TransportOptions},
	error::Error,
	http::RawResponse,
	sign::{Method, RequestSpec},
	xml,
};

fn test_consumer() -> Consumer {
	let credentials = Credentials::new("test-key", "test-secret")
		.expect("Static test credentials should be accepted.");

	Consumer::new(credentials, TransportOptions::default())
}

#[test]
fn request_returns_the_body_by_default() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/feeds/sites/")
			.query_param("oauth_version", "1.0")
			.query_param("oauth_consumer_key", "test-key")
			.query_param_exists("oauth_signature")
			.query_param_exists("oauth_nonce")
			.query_param_exists("oauth_timestamp");
		then.status(200)
			.header("Content-Type", "application/atom+xml")
			.body("<feed><entry>one</entry></feed>");
	});
	let mut consumer = test_consumer();
	let spec = RequestSpec::new(server.url("/feeds/sites/"), Method::Get);
	let raw = consumer.request(&spec, &[]).expect("Signed GET against the mock should succeed.");

	mock.assert();

	assert_eq!(raw, "<feed><entry>one</entry></feed>");
}

#[test]
fn include_header_round_trips_through_the_response_parser() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(GET).path("/feeds/sites/");
		then.status(200)
			.header("Content-Type", "application/atom+xml")
			.body("<feed><entry>A</entry><entry>B</entry></feed>");
	});

	let mut consumer = test_consumer();

	consumer.set_option(TransportOption::IncludeHeader(true));

	let spec = RequestSpec::new(server.url("/feeds/sites/"), Method::Get);
	let raw = consumer.request(&spec, &[]).expect("Signed GET against the mock should succeed.");
	let response = RawResponse::parse(&raw).expect("Reconstructed response should parse.");

	assert_eq!(response.status, 200);
	assert_eq!(response.message, "OK");
	assert_eq!(response.header("content-type").map(str::trim), Some("application/atom+xml"));

	let decoded = xml::decode(&response.body).expect("Response body should decode as XML.");
	let feed = decoded.get("feed").expect("Feed root should be present.");
	let entries: Vec<_> = feed.children_named("entry").filter_map(|entry| entry.text()).collect();

	assert_eq!(entries, ["A", "B"]);
}

#[test]
fn custom_headers_and_bodies_reach_the_server() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(POST)
			.path("/feeds/sites/")
			.header("gdata-version", "2.0")
			.header("content-type", "application/atom+xml")
			.body("<entry>payload</entry>");
		then.status(201).body("<entry>created</entry>");
	});
	let mut consumer = test_consumer();

	consumer.set_option(TransportOption::Headers(vec![
		"Content-Type: application/atom+xml".into(),
		"GData-Version: 2.0".into(),
	]));

	let spec = RequestSpec::new(server.url("/feeds/sites/"), Method::Post)
		.with_body("<entry>payload</entry>");
	let raw = consumer.request(&spec, &[]).expect("Signed POST against the mock should succeed.");

	mock.assert();

	assert_eq!(raw, "<entry>created</entry>");
}

#[test]
fn reset_prevents_body_bleed_into_the_next_request() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(POST).path("/feeds/sites/");
		then.status(201).body("created");
	});

	let get_without_body = server.mock(|when, then| {
		when.method(GET).path("/feeds/keywords/").body("");
		then.status(200).body("ok");
	});

	let mut consumer = test_consumer();
	let post = RequestSpec::new(server.url("/feeds/sites/"), Method::Post).with_body("<entry/>");

	consumer.request(&post, &[]).expect("Signed POST against the mock should succeed.");
	consumer.reset();

	let get = RequestSpec::new(server.url("/feeds/keywords/"), Method::Get);

	consumer.request(&get, &[]).expect("Signed GET after reset should succeed.");
	get_without_body.assert();
}

#[test]
fn delete_uses_a_custom_verb() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(DELETE).path("/feeds/sites/example");
		then.status(200).body("");
	});
	let mut consumer = test_consumer();
	let spec = RequestSpec::new(server.url("/feeds/sites/example"), Method::Delete);

	consumer.request(&spec, &[]).expect("Signed DELETE against the mock should succeed.");
	mock.assert();
}

#[test]
fn connection_failures_surface_as_transport_errors() {
	let mut consumer = test_consumer();
	// Discard-protocol port on localhost; nothing listens there in CI.
	let spec = RequestSpec::new("http://127.0.0.1:9/feeds/", Method::Get);
	let err = consumer.request(&spec, &[]).expect_err("Unreachable endpoint should fail.");

	assert!(matches!(err, Error::Transport(_)));
}
