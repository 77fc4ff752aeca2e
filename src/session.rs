//! Shared HTTP session.
//!
//! One `Session` wraps one `reqwest::Client` for the lifetime of the caller's
//! crawl. The caller owns it and closes it; extraction code only borrows it.
//! After `close()` every request fails with [`Error::SessionClosed`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Response};
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::Options;

/// Explicitly owned, explicitly closed HTTP client.
#[derive(Debug)]
pub struct Session {
    client: RwLock<Option<Client>>,
}

impl Session {
    /// Build a client with the user agent and connect timeout from `options`.
    pub fn new(options: &Options) -> Result<Self> {
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .connect_timeout(options.connect_timeout)
            .build()?;
        Ok(Self::from_client(client))
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self {
            client: RwLock::new(Some(client)),
        }
    }

    /// Issue a GET with a per-request total timeout.
    ///
    /// The status is not checked; callers decide what counts as success.
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<Response> {
        // Clone out of the lock so no guard is held across the await
        let client = self.client.read().clone().ok_or(Error::SessionClosed)?;
        Ok(client.get(url).timeout(timeout).send().await?)
    }

    /// Release the client. Returns `true` only for the call that closed it.
    pub fn close(&self) -> bool {
        let closed = self.client.write().take().is_some();
        if closed {
            debug!("HTTP session closed");
        }
        closed
    }

    /// Whether `close()` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.client.read().is_none()
    }
}

/// Closes the wrapped session when dropped, on every exit path.
///
/// ```no_run
/// use std::sync::Arc;
/// use rs_pagesift::{Options, Session, SessionGuard};
///
/// # fn main() -> rs_pagesift::Result<()> {
/// let session = Arc::new(Session::new(&Options::default())?);
/// {
///     let _guard = SessionGuard::new(Arc::clone(&session));
///     // ... extract pages ...
/// }
/// assert!(session.is_closed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionGuard {
    session: Arc<Session>,
}

impl SessionGuard {
    /// Guard that closes `session` when dropped.
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// The guarded session.
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.session.close();
    }
}
