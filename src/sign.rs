//! Canonical OAuth 1.0 request signing.
//!
//! [`sign`] builds the signature base string exactly as OAuth 1.0 Core prescribes:
//! uppercase method, percent-encoded base URL, and a percent-encoded, byte-sorted
//! parameter string, signed with HMAC-SHA1 over `consumer_secret&token_secret`.
//! The nonce and timestamp are injected through [`SigningContext`] so every
//! signature is reproducible in tests.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
use url::Position;
// self
use crate::{_prelude::*, auth::Credentials, error::ConfigError};

const NONCE_LEN: usize = 32;

/// HTTP methods supported by the signer and transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Uppercase wire form used in the signature base string.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One logical request to be signed: target URL, method, unique-keyed parameters,
/// and an optional pre-rendered body (bodies are carried, never signed).
#[derive(Clone, Debug)]
pub struct RequestSpec {
	/// Target URL; any query parameters it already carries fold into the signature.
	pub url: String,
	/// HTTP method.
	pub method: Method,
	/// Logical request parameters; keys unique, input order irrelevant.
	pub parameters: BTreeMap<String, String>,
	/// Optional pre-rendered request body for write calls.
	pub body: Option<String>,
}
impl RequestSpec {
	/// Creates a spec without parameters or body.
	pub fn new(url: impl Into<String>, method: Method) -> Self {
		Self { url: url.into(), method, parameters: BTreeMap::new(), body: None }
	}

	/// Adds one request parameter.
	pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.parameters.insert(key.into(), value.into());

		self
	}

	/// Attaches a pre-rendered body.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());

		self
	}
}

/// Injected non-deterministic signing inputs.
///
/// Production callers use [`SigningContext::generate`]; tests pin both fields with
/// [`SigningContext::fixed`] so signatures become byte-identical golden values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningContext {
	/// Unique per-request token preventing replay.
	pub nonce: String,
	/// Unix timestamp in seconds.
	pub timestamp: i64,
}
impl SigningContext {
	/// Generates a fresh random nonce and the current timestamp.
	pub fn generate() -> Self {
		let nonce = rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect();

		Self { nonce, timestamp: OffsetDateTime::now_utc().unix_timestamp() }
	}

	/// Pins the nonce and timestamp to fixed values.
	pub fn fixed(nonce: impl Into<String>, timestamp: i64) -> Self {
		Self { nonce: nonce.into(), timestamp }
	}
}

/// A signed request, ready to be issued exactly once.
#[derive(Clone, Debug)]
pub struct SignedRequest {
	/// Method the signature binds to.
	pub method: Method,
	/// Canonical signature base string.
	pub base_string: String,
	/// Base64 HMAC-SHA1 signature over the base string.
	pub signature: String,
	/// Base URL plus all signed parameters and the signature as a query string.
	pub signed_url: String,
}

/// Signs one request with the given credentials and injected context.
///
/// Query parameters already present on the URL are folded into the parameter set,
/// the standard OAuth parameters are merged in, and the result is deterministic
/// for identical inputs.
pub fn sign(
	credentials: &Credentials,
	spec: &RequestSpec,
	context: &SigningContext,
) -> Result<SignedRequest> {
	let url = Url::parse(&spec.url).map_err(|source| ConfigError::InvalidUrl { source })?;
	let base_url = url[..Position::AfterPath].to_owned();
	let mut parameters = spec.parameters.clone();

	for (key, value) in url.query_pairs() {
		parameters.insert(key.into_owned(), value.into_owned());
	}

	parameters.insert("oauth_consumer_key".into(), credentials.consumer_key.clone());
	parameters.insert("oauth_nonce".into(), context.nonce.clone());
	parameters.insert("oauth_signature_method".into(), "HMAC-SHA1".into());
	parameters.insert("oauth_timestamp".into(), context.timestamp.to_string());
	parameters.insert("oauth_version".into(), "1.0".into());

	if let Some(token) = credentials.token() {
		parameters.insert("oauth_token".into(), token.to_owned());
	}

	let parameter_string = parameters
		.iter()
		.map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
		.collect::<Vec<_>>()
		.join("&");
	let base_string = format!(
		"{}&{}&{}",
		spec.method.as_str(),
		percent_encode(&base_url),
		percent_encode(&parameter_string)
	);
	let signing_key = format!(
		"{}&{}",
		percent_encode(credentials.consumer_secret()),
		percent_encode(credentials.token_secret())
	);
	let signature = hmac_sha1_base64(base_string.as_bytes(), signing_key.as_bytes());
	let signed_url =
		format!("{base_url}?{parameter_string}&oauth_signature={}", percent_encode(&signature));

	Ok(SignedRequest { method: spec.method, base_string, signature, signed_url })
}

/// RFC 3986 percent-encoding with the OAuth unreserved set (`A-Z a-z 0-9 - . _ ~`).
pub fn percent_encode(value: &str) -> String {
	urlencoding::encode(value).into_owned()
}

fn hmac_sha1_base64(message: &[u8], key: &[u8]) -> String {
	let mut mac = Hmac::<Sha1>::new_from_slice(key)
		.expect("HMAC-SHA1 accepts keys of any length; this is an infallible operation");

	mac.update(message);

	STANDARD.encode(mac.finalize().into_bytes())
}
