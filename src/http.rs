//! Raw HTTP response parsing and the default GData request headers.
//!
//! The transport hands back one opaque string per exchange; [`RawResponse::parse`]
//! splits it into a status line, a header map, and the body so the feed layer can
//! check status codes and decode XML without a second trip through the HTTP stack.

// self
use crate::{_prelude::*, error::ResponseError};

/// Media type sent with every authenticated feed call.
pub const CONTENT_TYPE_ATOM: &str = "application/atom+xml";
/// GData protocol version header value required by the feed endpoints.
pub const GDATA_VERSION: &str = "2.0";

/// One parsed HTTP response.
///
/// Header names are kept case-sensitive as received and duplicate headers resolve
/// last-write-wins. Header values keep their surrounding whitespace; callers that
/// want a cleaned value trim it themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// Numeric status code from the status line.
	pub status: u16,
	/// Status message, verbatim remainder of the status line.
	pub message: String,
	/// Header name → raw value (everything after the first colon, unstripped).
	pub headers: HashMap<String, String>,
	/// Response body; empty when the response carried none.
	pub body: String,
}
impl RawResponse {
	/// Parses a raw response string into its status, headers, and body.
	///
	/// The input splits on the first blank-line boundary; without one the entire
	/// input is treated as headers with an empty body. A header block without a
	/// parseable status line is an error.
	pub fn parse(raw: &str) -> Result<Self, ResponseError> {
		let (head, body) = match raw.split_once("\r\n\r\n") {
			Some((head, body)) => (head, body),
			None => (raw, ""),
		};
		let mut status = None;
		let mut headers = HashMap::new();

		for line in head.split("\r\n") {
			if line.is_empty() {
				continue;
			}
			if let Some((name, value)) = line.split_once(':') {
				headers.insert(name.to_owned(), value.to_owned());
			} else {
				status = Some(Self::parse_status_line(line)?);
			}
		}

		let (status, message) = status.ok_or(ResponseError::MissingStatusLine)?;

		Ok(Self { status, message, headers, body: body.to_owned() })
	}

	fn parse_status_line(line: &str) -> Result<(u16, String), ResponseError> {
		let mut parts = line.splitn(3, ' ');
		let _protocol = parts.next();
		let code = parts
			.next()
			.and_then(|raw| raw.parse::<u16>().ok())
			.ok_or_else(|| ResponseError::MalformedStatusLine { line: line.to_owned() })?;
		let message = parts.next().unwrap_or("").to_owned();

		Ok((code, message))
	}

	/// Returns a header value by its exact name, unstripped.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).map(String::as_str)
	}
}

/// Builds the default header lines for a feed call: the Atom content type, the
/// GData protocol version, and a `Content-Length` when a write body is attached.
pub fn default_headers(content_length: Option<usize>) -> Vec<String> {
	let mut headers = vec![
		format!("Content-Type: {CONTENT_TYPE_ATOM}"),
		format!("GData-Version: {GDATA_VERSION}"),
	];

	if let Some(length) = content_length {
		headers.push(format!("Content-Length: {length}"));
	}

	headers
}
