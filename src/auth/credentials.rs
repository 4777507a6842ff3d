//! Consumer-key and access-token credential set owned by one consumer instance.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// OAuth 1.0 credential set: the consumer key pair plus, once the authorization
/// handshake completed, the access token pair.
///
/// The token and token secret start out absent and are installed through
/// [`Credentials::set_token`] after the access-token leg. That mutation is the one
/// sanctioned piece of shared mutable state in the crate; everything else is
/// per-call.
#[derive(Clone, Debug)]
pub struct Credentials {
	/// Consumer key identifying the calling application.
	pub consumer_key: String,
	consumer_secret: Secret,
	token: Option<String>,
	token_secret: Option<Secret>,
}
impl Credentials {
	/// Creates a credential set from a consumer key and secret.
	///
	/// Both fields are required for every signature; an empty value is rejected here
	/// rather than surfacing as an inscrutable signature mismatch later.
	pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Result<Self> {
		let consumer_key = consumer_key.into();
		let consumer_secret = Secret::new(consumer_secret);

		if consumer_key.is_empty() {
			return Err(ConfigError::MissingCredential { field: "consumer_key" }.into());
		}
		if consumer_secret.is_empty() {
			return Err(ConfigError::MissingCredential { field: "consumer_secret" }.into());
		}

		Ok(Self { consumer_key, consumer_secret, token: None, token_secret: None })
	}

	/// Installs the access token pair obtained from the access-token leg.
	pub fn set_token(&mut self, token: impl Into<String>, token_secret: impl Into<String>) {
		self.token = Some(token.into());
		self.token_secret = Some(Secret::new(token_secret));
	}

	/// Returns the access token, if one has been installed.
	pub fn token(&self) -> Option<&str> {
		self.token.as_deref()
	}

	/// Exposes the consumer secret for signing-key construction.
	pub fn consumer_secret(&self) -> &str {
		self.consumer_secret.expose()
	}

	/// Exposes the token secret for signing-key construction; empty when no token
	/// has been installed yet (the one-legged case).
	pub fn token_secret(&self) -> &str {
		self.token_secret.as_ref().map(Secret::expose).unwrap_or("")
	}
}
