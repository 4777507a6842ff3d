//! Scoped key/value store used to persist interim OAuth state between legs.
//!
//! The authorize-redirect leg hands the end user off to the vendor; when they
//! return, the access-token leg needs the interim `oauth_token_secret` back. The
//! core only requires `put`/`get` semantics, so web frameworks can plug in their
//! own session layer.

// self
use crate::_prelude::*;

/// Persistence contract for interim authorization state.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Persists or replaces a value under the given key.
	fn put(&self, key: &str, value: &str);

	/// Fetches the value stored under the key, if present.
	fn get(&self, key: &str) -> Option<String>;
}

/// Thread-safe storage backend that keeps values in-process for tests, demos, and
/// single-process deployments.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(Arc<RwLock<HashMap<String, String>>>);
impl SessionStore for MemorySessionStore {
	fn put(&self, key: &str, value: &str) {
		self.0.write().insert(key.to_owned(), value.to_owned());
	}

	fn get(&self, key: &str) -> Option<String> {
		self.0.read().get(key).cloned()
	}
}
