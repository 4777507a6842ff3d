//! OAuth 1.0 consumer and Atom feed toolkit for GData-style vendor APIs—canonical request
//! signing, a lossless XML-to-record decoder, and typed webmaster feed parsers in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod consumer;
pub mod error;
pub mod feeds;
pub mod flows;
pub mod http;
pub mod obs;
pub mod session;
pub mod sign;
pub mod xml;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Credentials,
		consumer::{Consumer, TransportOptions},
	};

	/// Builds a consumer with throwaway credentials for tests that never touch the network.
	pub fn test_consumer() -> Consumer {
		let credentials = Credentials::new("test-key", "test-secret")
			.expect("Static test credentials should be accepted.");

		Consumer::new(credentials, TransportOptions::default())
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use httpmock as _;
