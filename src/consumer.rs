//! OAuth consumer owning per-instance credentials and transport configuration.
//!
//! One [`Consumer`] holds one credential set and one bag of transport options,
//! cycling through sign → send → reset for every logical call. `reset` restores
//! the configured defaults so a previous call's custom headers or body can never
//! leak into the next request.

// crates.io
use reqwest::{
	blocking::Client,
	header::{HeaderMap, HeaderName, HeaderValue},
	redirect::Policy,
};
// self
use crate::{
	_prelude::*,
	auth::Credentials,
	error::{ConfigError, TransportError},
	obs::CallSpan,
	sign::{self, Method, RequestSpec, SignedRequest, SigningContext},
};

/// Typed transport option, the raw interface behind the string aliases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportOption {
	/// Verify the peer's TLS certificate (`verify_ssl`).
	VerifySsl(bool),
	/// Return the response text to the caller instead of discarding it
	/// (`return_output`).
	ReturnOutput(bool),
	/// Prepend the status line and headers to the returned text.
	IncludeHeader(bool),
	/// Custom header lines in `Name: value` form (`headers`).
	Headers(Vec<String>),
	/// Transport target URL (`url`); normally installed from the signed URL.
	Url(String),
	/// Issue the request as a GET (`http_get`).
	HttpGet(bool),
	/// Issue the request as a POST (`http_post`).
	HttpPost(bool),
	/// Issue the request as a PUT (`http_put`).
	HttpPut(bool),
	/// Issue the request with an arbitrary verb.
	CustomRequest(String),
	/// Request body for write calls.
	Body(String),
}

/// Loosely typed option value accepted by the alias interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
	/// Boolean flag value.
	Bool(bool),
	/// Single text value.
	Text(String),
	/// Header-line list value.
	Lines(Vec<String>),
}
impl From<bool> for OptionValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<&str> for OptionValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<String> for OptionValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<Vec<String>> for OptionValue {
	fn from(value: Vec<String>) -> Self {
		Self::Lines(value)
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum MethodFlag {
	#[default]
	Get,
	Post,
	Put,
	Custom(String),
}

/// Transport option bag applied to one request.
///
/// The defaults mirror the historical consumer configuration: TLS verification
/// off, response text returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportOptions {
	verify_ssl: bool,
	return_output: bool,
	include_header: bool,
	headers: Vec<String>,
	url: Option<String>,
	method: MethodFlag,
	body: Option<String>,
}
impl Default for TransportOptions {
	fn default() -> Self {
		Self {
			verify_ssl: false,
			return_output: true,
			include_header: false,
			headers: Vec::new(),
			url: None,
			method: MethodFlag::Get,
			body: None,
		}
	}
}
impl TransportOptions {
	/// Applies one typed option.
	pub fn apply(&mut self, option: TransportOption) {
		match option {
			TransportOption::VerifySsl(value) => self.verify_ssl = value,
			TransportOption::ReturnOutput(value) => self.return_output = value,
			TransportOption::IncludeHeader(value) => self.include_header = value,
			TransportOption::Headers(lines) => self.headers = lines,
			TransportOption::Url(url) => self.url = Some(url),
			TransportOption::HttpGet(true) => self.method = MethodFlag::Get,
			TransportOption::HttpPost(true) => self.method = MethodFlag::Post,
			TransportOption::HttpPut(true) => self.method = MethodFlag::Put,
			TransportOption::HttpGet(false)
			| TransportOption::HttpPost(false)
			| TransportOption::HttpPut(false) => {},
			TransportOption::CustomRequest(verb) => self.method = MethodFlag::Custom(verb),
			TransportOption::Body(body) => self.body = Some(body),
		}
	}

	fn method_label(&self) -> &str {
		match &self.method {
			MethodFlag::Get => "GET",
			MethodFlag::Post => "POST",
			MethodFlag::Put => "PUT",
			MethodFlag::Custom(verb) => verb,
		}
	}

	/// Resolves a string alias plus loosely typed value into a typed option.
	///
	/// The recognized aliases are the historical set: `verify_ssl`,
	/// `return_output`, `include_header`, `headers`, `url`, `http_get`,
	/// `http_post`, `http_put`, and `custom_request`.
	pub fn resolve_alias(key: &str, value: OptionValue) -> Result<TransportOption> {
		let option = match (key, value) {
			("verify_ssl", OptionValue::Bool(flag)) => TransportOption::VerifySsl(flag),
			("return_output", OptionValue::Bool(flag)) => TransportOption::ReturnOutput(flag),
			("include_header", OptionValue::Bool(flag)) => TransportOption::IncludeHeader(flag),
			("headers", OptionValue::Lines(lines)) => TransportOption::Headers(lines),
			("url", OptionValue::Text(url)) => TransportOption::Url(url),
			("http_get", OptionValue::Bool(flag)) => TransportOption::HttpGet(flag),
			("http_post", OptionValue::Bool(flag)) => TransportOption::HttpPost(flag),
			("http_put", OptionValue::Bool(flag)) => TransportOption::HttpPut(flag),
			("custom_request", OptionValue::Text(verb)) => TransportOption::CustomRequest(verb),
			("body", OptionValue::Text(body)) => TransportOption::Body(body),
			_ => return Err(ConfigError::UnknownTransportOption { key: key.to_owned() }.into()),
		};

		Ok(option)
	}
}

/// OAuth 1.0 consumer: signs requests with its credential set and issues them
/// over a blocking HTTP transport.
///
/// Instances are cheap to construct; share one per logical credential set per
/// caller. The consumer provides no internal locking, so concurrent use of a
/// single instance must be serialized externally around the full
/// `reset → sign → request` sequence.
#[derive(Clone, Debug)]
pub struct Consumer {
	credentials: Credentials,
	configured: TransportOptions,
	options: TransportOptions,
}
impl Consumer {
	/// Creates a consumer from credentials and transport defaults.
	///
	/// The supplied options are merged over the built-in defaults and become the
	/// state every [`reset`](Self::reset) restores.
	pub fn new(credentials: Credentials, defaults: TransportOptions) -> Self {
		Self { credentials, configured: defaults.clone(), options: defaults }
	}

	/// Read access to the credential set.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Installs the access token pair obtained from the authorization handshake.
	pub fn set_token(&mut self, token: impl Into<String>, token_secret: impl Into<String>) {
		self.credentials.set_token(token, token_secret);
	}

	/// Discards per-request transport state, restoring the configured defaults.
	///
	/// Required before each new logical call; stale headers or a previous POST
	/// body never survive a reset.
	pub fn reset(&mut self) {
		self.options = self.configured.clone();
	}

	/// Applies one typed transport option to the current request.
	pub fn set_option(&mut self, option: TransportOption) {
		self.options.apply(option);
	}

	/// Applies a transport option through the string alias interface.
	pub fn set_option_alias(&mut self, key: &str, value: impl Into<OptionValue>) -> Result<()> {
		let option = TransportOptions::resolve_alias(key, value.into())?;

		self.options.apply(option);

		Ok(())
	}

	/// Signs a request with a freshly generated nonce and timestamp. No I/O.
	///
	/// `overrides` are per-call transport options applied before signing, on top
	/// of whatever [`set_option`](Self::set_option) already installed.
	pub fn sign(
		&mut self,
		spec: &RequestSpec,
		overrides: &[TransportOption],
	) -> Result<SignedRequest> {
		self.sign_with(spec, &SigningContext::generate(), overrides)
	}

	/// Signs a request with an injected signing context. No I/O.
	///
	/// Besides producing the [`SignedRequest`], this selects the matching
	/// transport method flag and installs the request body, to be applied when
	/// the consumer issues the call.
	pub fn sign_with(
		&mut self,
		spec: &RequestSpec,
		context: &SigningContext,
		overrides: &[TransportOption],
	) -> Result<SignedRequest> {
		let _span = CallSpan::new("sign", spec.method.as_str()).entered();

		for option in overrides {
			self.options.apply(option.clone());
		}

		let signed = sign::sign(&self.credentials, spec, context)?;

		match spec.method {
			Method::Get => self.options.apply(TransportOption::HttpGet(true)),
			Method::Post => self.options.apply(TransportOption::HttpPost(true)),
			method => self.options.apply(TransportOption::CustomRequest(method.as_str().into())),
		}

		if let Some(body) = &spec.body {
			self.options.apply(TransportOption::Body(body.clone()));
		}

		Ok(signed)
	}

	/// Signs and synchronously issues a request, returning the raw response text.
	///
	/// With the `IncludeHeader` option set the returned text carries the status
	/// line and headers ahead of the body so it round-trips through
	/// [`RawResponse::parse`](crate::http::RawResponse::parse). With
	/// `ReturnOutput` disabled an empty string is returned. Transport failures
	/// surface as [`TransportError`]; nothing is retried.
	pub fn request(&mut self, spec: &RequestSpec, overrides: &[TransportOption]) -> Result<String> {
		self.request_with(spec, &SigningContext::generate(), overrides)
	}

	/// [`request`](Self::request) with an injected signing context.
	pub fn request_with(
		&mut self,
		spec: &RequestSpec,
		context: &SigningContext,
		overrides: &[TransportOption],
	) -> Result<String> {
		let signed = self.sign_with(spec, context, overrides)?;

		self.options.apply(TransportOption::Url(signed.signed_url.clone()));
		self.send()
	}

	fn send(&mut self) -> Result<String> {
		let url = self.options.url.clone().ok_or(ConfigError::MissingTransportUrl)?;
		let _span = CallSpan::new("request", self.options.method_label()).entered();
		let client = Client::builder()
			.danger_accept_invalid_certs(!self.options.verify_ssl)
			.redirect(Policy::none())
			.build()
			.map_err(TransportError::from)?;
		let mut request = match &self.options.method {
			MethodFlag::Get => client.get(&url),
			MethodFlag::Post => client.post(&url),
			MethodFlag::Put => client.put(&url),
			MethodFlag::Custom(verb) => {
				let method =
					reqwest::Method::from_bytes(verb.as_bytes()).map_err(|_| {
						ConfigError::UnknownTransportOption { key: verb.clone() }
					})?;

				client.request(method, &url)
			},
		};

		request = request.headers(header_map(&self.options.headers)?);

		if let Some(body) = &self.options.body {
			request = request.body(body.clone());
		}

		let response = request.send().map_err(TransportError::from)?;

		if !self.options.return_output {
			return Ok(String::new());
		}

		let mut output = String::new();

		if self.options.include_header {
			let status = response.status();
			let reason = status.canonical_reason().unwrap_or("");

			output.push_str(&format!("HTTP/1.1 {} {}\r\n", status.as_u16(), reason));

			for (name, value) in response.headers() {
				output.push_str(&format!(
					"{}: {}\r\n",
					name.as_str(),
					String::from_utf8_lossy(value.as_bytes())
				));
			}

			output.push_str("\r\n");
		}

		output.push_str(&response.text().map_err(TransportError::from)?);

		Ok(output)
	}
}

fn header_map(lines: &[String]) -> Result<HeaderMap> {
	let mut map = HeaderMap::new();

	for line in lines {
		let (name, value) = line
			.split_once(':')
			.ok_or_else(|| ConfigError::InvalidHeaderLine { line: line.clone() })?;
		let name = HeaderName::from_bytes(name.trim().as_bytes())
			.map_err(|_| ConfigError::InvalidHeaderLine { line: line.clone() })?;
		let value = HeaderValue::from_str(value.trim())
			.map_err(|_| ConfigError::InvalidHeaderLine { line: line.clone() })?;

		map.insert(name, value);
	}

	Ok(map)
}
