//! Three-legged OAuth 1.0 authorization handshake.
//!
//! The [`Authorizer`] drives the request-token leg, builds the signed authorize
//! redirect, and exchanges the verifier for a long-lived access token. The interim
//! token secret produced by the first leg is parked in a [`SessionStore`] so the
//! second leg can pick it up after the user returns from the vendor.

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	consumer::{Consumer, TransportOption, TransportOptions},
	error::{ApiError, ConfigError},
	http::RawResponse,
	session::SessionStore,
	sign::{Method, RequestSpec},
};

const SESSION_KEY: &str = "oauth_token_secret";

/// Endpoint triple for the three OAuth legs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	/// Request-token leg target.
	pub request_token: String,
	/// Authorize-redirect leg target.
	pub authorize_token: String,
	/// Access-token exchange leg target.
	pub access_token: String,
}
impl Default for Endpoints {
	/// Google's accounts endpoints, the original deployment target.
	fn default() -> Self {
		Self {
			request_token: "https://www.google.com/accounts/OAuthGetRequestToken".into(),
			authorize_token: "https://www.google.com/accounts/OAuthAuthorizeToken".into(),
			access_token: "https://www.google.com/accounts/OAuthGetAccessToken".into(),
		}
	}
}

/// Signed redirect produced by the first two legs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRedirect {
	/// Fully signed authorize URL the end user should be sent to.
	pub url: String,
	/// Interim request token embedded in the redirect.
	pub token: String,
}

/// Long-lived token pair returned by the access-token exchange.
///
/// Callers typically persist both fields and install them on a consumer via
/// [`Consumer::set_token`] for all subsequent feed calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access token for all following API calls.
	pub token: String,
	/// Matching token secret.
	pub token_secret: String,
}

/// Drives the OAuth 1.0 handshake against one endpoint triple.
pub struct Authorizer {
	consumer: Consumer,
	endpoints: Endpoints,
	session: Arc<dyn SessionStore>,
}
impl Authorizer {
	/// Creates an authorizer from consumer-key credentials, endpoints, and the
	/// session store that parks the interim token secret between legs.
	pub fn new(credentials: Credentials, endpoints: Endpoints, session: Arc<dyn SessionStore>) -> Self {
		Self { consumer: Consumer::new(credentials, TransportOptions::default()), endpoints, session }
	}

	/// Runs the request-token leg and builds the signed authorize redirect.
	///
	/// `scope` is the feed base URL the token will be valid for; `callback` is
	/// where the vendor sends the user afterwards. The returned redirect carries
	/// the interim token; the matching secret is stored in the session for
	/// [`exchange_access_token`](Self::exchange_access_token).
	pub fn start_authorization(
		&mut self,
		scope: &str,
		callback: &str,
	) -> Result<AuthorizationRedirect> {
		self.consumer.reset();

		let spec = RequestSpec::new(&self.endpoints.request_token, Method::Get)
			.parameter("scope", scope)
			.parameter("oauth_callback", callback);
		let raw = self.consumer.request(&spec, &[TransportOption::IncludeHeader(true)])?;
		let response = RawResponse::parse(&raw)?;

		if response.status != 200 {
			return Err(ApiError::new("The request token could not be retrieved", &response).into());
		}

		let fields = form_fields(&response.body);
		let token = fields
			.get("oauth_token")
			.ok_or(ConfigError::MissingTokenField { field: "oauth_token" })?
			.clone();
		let secret = fields
			.get("oauth_token_secret")
			.ok_or(ConfigError::MissingTokenField { field: "oauth_token_secret" })?;

		self.session.put(SESSION_KEY, secret);

		// Sign (without sending) the authorize URL the user gets redirected to.
		self.consumer.reset();

		let spec = RequestSpec::new(&self.endpoints.authorize_token, Method::Get)
			.parameter("oauth_token", &token);
		let signed = self.consumer.sign(&spec, &[])?;

		Ok(AuthorizationRedirect { url: signed.signed_url, token })
	}

	/// Exchanges the verifier returned by the vendor for an access token.
	pub fn exchange_access_token(
		&mut self,
		oauth_token: &str,
		oauth_verifier: &str,
	) -> Result<AccessToken> {
		let secret = self
			.session
			.get(SESSION_KEY)
			.ok_or_else(|| ConfigError::MissingSessionSecret { key: SESSION_KEY.into() })?;

		self.consumer.set_token(oauth_token, secret);
		self.consumer.reset();

		let spec = RequestSpec::new(&self.endpoints.access_token, Method::Get)
			.parameter("oauth_verifier", oauth_verifier);
		let raw = self.consumer.request(&spec, &[TransportOption::IncludeHeader(true)])?;
		let response = RawResponse::parse(&raw)?;

		if response.status != 200 {
			return Err(ApiError::new("The access token could not be retrieved", &response).into());
		}

		let fields = form_fields(&response.body);
		let token = fields
			.get("oauth_token")
			.ok_or(ConfigError::MissingTokenField { field: "oauth_token" })?
			.clone();
		let token_secret = fields
			.get("oauth_token_secret")
			.ok_or(ConfigError::MissingTokenField { field: "oauth_token_secret" })?
			.clone();

		Ok(AccessToken { token, token_secret })
	}

	/// Consumes the authorizer, handing back its consumer with whatever token
	/// state the handshake installed.
	pub fn into_consumer(self) -> Consumer {
		self.consumer
	}
}
impl Debug for Authorizer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authorizer")
			.field("consumer", &self.consumer)
			.field("endpoints", &self.endpoints)
			.finish()
	}
}

fn form_fields(body: &str) -> HashMap<String, String> {
	url::form_urlencoded::parse(body.as_bytes()).into_owned().collect()
}
