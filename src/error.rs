//! Crate-level error types shared across the signer, consumer, decoder, and feed layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// XML document could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Raw HTTP response could not be parsed.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Vendor API returned an unexpected status code.
	#[error(transparent)]
	Api(#[from] ApiError),
}

/// Configuration and validation failures raised before any network traffic.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required credential field was empty at construction.
	#[error("The credential field `{field}` must not be empty.")]
	MissingCredential {
		/// Name of the offending field.
		field: &'static str,
	},
	/// A request or endpoint URL cannot be parsed.
	#[error("Request URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// No transport target URL was installed before issuing the call.
	#[error("No transport URL is set; sign a request before sending.")]
	MissingTransportUrl,
	/// A transport-option alias did not resolve to a known option.
	#[error("The transport option `{key}` is not recognized.")]
	UnknownTransportOption {
		/// Alias or raw key supplied by the caller.
		key: String,
	},
	/// A custom header line is missing its `Name: value` separator.
	#[error("The header line `{line}` is missing a colon separator.")]
	InvalidHeaderLine {
		/// Offending header line.
		line: String,
	},
	/// The interim token secret was absent from the session store.
	#[error("No interim token secret is stored for `{key}`; run the authorization leg first.")]
	MissingSessionSecret {
		/// Session key that was probed.
		key: String,
	},
	/// A token-endpoint body omitted a required form field.
	#[error("Token response is missing the `{field}` field.")]
	MissingTokenField {
		/// Name of the absent form field.
		field: &'static str,
	},
	/// A site verification method name was not recognized.
	#[error("The verification method `{method}` is unknown.")]
	UnknownVerificationMethod {
		/// Offending method name.
		method: String,
	},
	/// A site setting name was not recognized.
	#[error("The site setting `{setting}` is not recognized.")]
	UnknownSiteSetting {
		/// Offending setting name.
		setting: String,
	},
	/// A sitemap type name was not recognized.
	#[error("The sitemap type `{kind}` is not recognized.")]
	UnknownSitemapType {
		/// Offending type name.
		kind: String,
	},
}

/// XML decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// The input is not a well-formed XML document.
	#[error("XML document is malformed.")]
	MalformedDocument {
		/// Parser-level failure.
		#[source]
		source: quick_xml::Error,
	},
	/// An element carries a syntactically invalid attribute.
	#[error("XML attribute is malformed.")]
	MalformedAttribute {
		/// Attribute-parser failure.
		#[source]
		source: quick_xml::events::attributes::AttrError,
	},
	/// The document ended while an element was still open.
	#[error("XML document ended before `{name}` was closed.")]
	UnclosedElement {
		/// Normalized name of the unclosed element.
		name: String,
	},
	/// A decoded document lacks an element the caller requires.
	#[error("XML document does not contain the expected `{name}` element.")]
	MissingElement {
		/// Normalized name of the absent element.
		name: String,
	},
}
impl From<quick_xml::Error> for DecodeError {
	fn from(source: quick_xml::Error) -> Self {
		Self::MalformedDocument { source }
	}
}
impl From<quick_xml::events::attributes::AttrError> for DecodeError {
	fn from(source: quick_xml::events::attributes::AttrError) -> Self {
		Self::MalformedAttribute { source }
	}
}

/// Raw HTTP response parsing failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ResponseError {
	/// The status line carries a non-numeric status code.
	#[error("The status line `{line}` does not carry a numeric status code.")]
	MalformedStatusLine {
		/// Offending status line.
		line: String,
	},
	/// The header block contains no status line at all.
	#[error("The response contains no HTTP status line.")]
	MissingStatusLine,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while sending the signed request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while sending the signed request.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<reqwest::Error> for TransportError {
	fn from(e: reqwest::Error) -> Self {
		Self::network(e)
	}
}

/// Unexpected vendor status code, carrying the full response for caller inspection.
#[derive(Clone, Debug, ThisError)]
#[error("{message} (HTTP {status}).")]
pub struct ApiError {
	/// HTTP status code returned by the vendor.
	pub status: u16,
	/// Human-readable summary of the failed operation.
	pub message: String,
	/// Raw response body, unchanged, for caller-side diagnosis.
	pub body: String,
}
impl ApiError {
	/// Builds an error from an operation summary and the parsed raw response.
	pub fn new(message: impl Into<String>, response: &crate::http::RawResponse) -> Self {
		Self { status: response.status, message: message.into(), body: response.body.clone() }
	}
}
