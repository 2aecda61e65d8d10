//! Remote browser connections, pooling, and per-request sessions
//!
//! The driver seam lives here: [`Connector`] establishes remote
//! connections, [`BrowserHandle`] opens pages, [`PageHandle`] carries the
//! operations workflows need. Production code uses the CDP
//! implementations in [`cdp`]; tests substitute fakes.

pub mod cdp;
pub mod pool;
pub mod session;

use crate::error::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Identifier selecting which browser engine variant to connect to
///
/// Unrecognized tags fall back to [`EngineTag::Chromium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineTag {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl EngineTag {
    /// Parse an engine tag from a request option, defaulting to chromium
    pub fn parse(tag: &str) -> Self {
        match tag {
            "firefox" => EngineTag::Firefox,
            "webkit" => EngineTag::Webkit,
            _ => EngineTag::Chromium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineTag::Chromium => "chromium",
            EngineTag::Firefox => "firefox",
            EngineTag::Webkit => "webkit",
        }
    }
}

impl fmt::Display for EngineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One live page on a remote browser connection
///
/// Every operation is a blocking remote call; failures propagate as
/// [`crate::error::RelayError`] and are never retried here.
pub trait PageHandle: Send + Sync {
    /// Navigate the page to a URL
    fn goto(&self, url: &str) -> Result<()>;

    /// Wait until in-flight navigation has settled
    fn wait_for_idle(&self) -> Result<()>;

    /// Click the element matching a CSS selector
    fn click(&self, selector: &str) -> Result<()>;

    /// Fill the element matching a CSS selector with text
    fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Block until an element matching the selector appears
    fn wait_for_selector(&self, selector: &str) -> Result<()>;

    /// Extract the text content of the element matching a selector
    fn text_content(&self, selector: &str) -> Result<String>;

    /// Capture a PNG screenshot of the page
    fn screenshot(&self) -> Result<Vec<u8>>;

    /// Evaluate a JavaScript expression in the page, returning its value
    fn evaluate(&self, expression: &str) -> Result<Value>;

    /// Override the page's user agent
    fn set_user_agent(&self, user_agent: &str) -> Result<()>;

    /// Close the page, releasing its remote resources
    fn close(&self) -> Result<()>;
}

/// An established remote browser connection
pub trait BrowserHandle: Send + Sync {
    /// Open a fresh page on this connection
    fn new_page(&self) -> Result<Arc<dyn PageHandle>>;

    /// Close the connection and all its pages
    fn close(&self) -> Result<()>;
}

/// Establishes remote browser connections for an engine tag
///
/// The pool calls this at most once per tag; implementations do not need
/// to cache.
pub trait Connector: Send + Sync {
    fn connect(&self, engine: EngineTag) -> Result<Arc<dyn BrowserHandle>>;
}
