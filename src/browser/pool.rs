//! Shared remote connection pool, one connection per engine tag

use crate::browser::{BrowserHandle, Connector, EngineTag};
use crate::error::{RelayError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Lazily-connected pool of remote browser connections
///
/// The first `acquire` for an engine tag dials out through the
/// [`Connector`]; later calls return the cached handle. There is no
/// expiry and no reconnect: a dropped connection stays in the pool and
/// fails every dependent call until shutdown.
pub struct BrowserPool {
    connector: Arc<dyn Connector>,
    browsers: Mutex<HashMap<EngineTag, Arc<dyn BrowserHandle>>>,
}

impl BrowserPool {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            browsers: Mutex::new(HashMap::new()),
        }
    }

    /// Get the shared connection for an engine tag, connecting on first use
    pub fn acquire(&self, engine: EngineTag) -> Result<Arc<dyn BrowserHandle>> {
        // The lock is held across the connect call so a tag is only ever
        // dialed once
        let mut browsers = self
            .browsers
            .lock()
            .map_err(|e| RelayError::LockPoisoned(e.to_string()))?;

        if let Some(browser) = browsers.get(&engine) {
            return Ok(browser.clone());
        }

        let browser = self.connector.connect(engine)?;
        browsers.insert(engine, browser.clone());
        Ok(browser)
    }

    /// Number of established connections
    pub fn len(&self) -> usize {
        self.browsers.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close every pooled connection and clear the pool
    ///
    /// Close errors are logged and swallowed so shutdown always runs to
    /// completion.
    pub fn shutdown(&self) {
        let drained: Vec<(EngineTag, Arc<dyn BrowserHandle>)> = match self.browsers.lock() {
            Ok(mut browsers) => browsers.drain().collect(),
            Err(e) => {
                log::error!("Browser pool lock poisoned during shutdown: {}", e);
                return;
            }
        };

        for (engine, browser) in drained {
            if let Err(e) = browser.close() {
                log::error!("Error closing {} browser: {}", engine, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::PageHandle;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingConnector {
        connects: AtomicUsize,
    }

    struct NullBrowser;

    impl BrowserHandle for NullBrowser {
        fn new_page(&self) -> Result<Arc<dyn PageHandle>> {
            Err(RelayError::PageOpenFailed("null browser".to_string()))
        }

        fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    impl Connector for CountingConnector {
        fn connect(&self, _engine: EngineTag) -> Result<Arc<dyn BrowserHandle>> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(NullBrowser))
        }
    }

    #[test]
    fn test_acquire_connects_once_per_engine() {
        let connector = Arc::new(CountingConnector {
            connects: AtomicUsize::new(0),
        });
        let pool = BrowserPool::new(connector.clone());

        pool.acquire(EngineTag::Chromium).unwrap();
        pool.acquire(EngineTag::Chromium).unwrap();
        pool.acquire(EngineTag::Chromium).unwrap();

        assert_eq!(connector.connects.load(Ordering::SeqCst), 1);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_acquire_separate_engines_connect_separately() {
        let connector = Arc::new(CountingConnector {
            connects: AtomicUsize::new(0),
        });
        let pool = BrowserPool::new(connector.clone());

        pool.acquire(EngineTag::Chromium).unwrap();
        pool.acquire(EngineTag::Firefox).unwrap();

        assert_eq!(connector.connects.load(Ordering::SeqCst), 2);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_connect_failure_is_not_cached() {
        struct FlakyConnector {
            attempts: AtomicUsize,
        }

        impl Connector for FlakyConnector {
            fn connect(&self, _engine: EngineTag) -> Result<Arc<dyn BrowserHandle>> {
                if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(RelayError::ConnectionFailed("refused".to_string()))
                } else {
                    Ok(Arc::new(NullBrowser))
                }
            }
        }

        let pool = BrowserPool::new(Arc::new(FlakyConnector {
            attempts: AtomicUsize::new(0),
        }));

        assert!(pool.acquire(EngineTag::Chromium).is_err());
        assert!(pool.is_empty());
        assert!(pool.acquire(EngineTag::Chromium).is_ok());
    }

    #[test]
    fn test_shutdown_clears_pool() {
        let connector = Arc::new(CountingConnector {
            connects: AtomicUsize::new(0),
        });
        let pool = BrowserPool::new(connector);

        pool.acquire(EngineTag::Webkit).unwrap();
        pool.shutdown();
        assert!(pool.is_empty());
    }
}
