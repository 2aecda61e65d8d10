//! CDP-backed implementations of the browser traits
//!
//! Connects to a remote cloud browser over a WebSocket CDP endpoint
//! parameterized by API key, project id, and engine tag. The connection
//! is assumed live once established; a dropped connection fails every
//! dependent call and is never re-established here.

use crate::browser::{BrowserHandle, Connector, EngineTag, PageHandle};
use crate::config::Settings;
use crate::error::{RelayError, Result};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, Tab};
use serde_json::Value;
use std::sync::Arc;

/// Connector that dials the remote CDP endpoint from [`Settings`]
pub struct CdpConnector {
    settings: Settings,
}

impl CdpConnector {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Connection URI for an engine tag
    fn endpoint(&self, engine: EngineTag) -> String {
        format!(
            "{}?apiKey={}&projectId={}&browser={}",
            self.settings.connect_url, self.settings.api_key, self.settings.project_id, engine
        )
    }
}

impl Connector for CdpConnector {
    fn connect(&self, engine: EngineTag) -> Result<Arc<dyn BrowserHandle>> {
        let browser = Browser::connect(self.endpoint(engine))
            .map_err(|e| RelayError::ConnectionFailed(e.to_string()))?;

        log::info!("Connected to remote {} browser", engine);
        Ok(Arc::new(CdpBrowser { browser }))
    }
}

/// A live remote browser connection
pub struct CdpBrowser {
    browser: Browser,
}

impl BrowserHandle for CdpBrowser {
    fn new_page(&self) -> Result<Arc<dyn PageHandle>> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| RelayError::PageOpenFailed(e.to_string()))?;

        Ok(Arc::new(CdpPage { tab }))
    }

    fn close(&self) -> Result<()> {
        // headless_chrome exposes no connection-level close; closing every
        // tab releases the remote session's resources
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| RelayError::LockPoisoned(e.to_string()))?
            .clone();

        for tab in tabs {
            let _ = tab.close(false);
        }
        Ok(())
    }
}

/// One tab on a remote connection
pub struct CdpPage {
    tab: Arc<Tab>,
}

impl PageHandle for CdpPage {
    fn goto(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| RelayError::NavigationFailed(format!("{}: {}", url, e)))?;
        Ok(())
    }

    fn wait_for_idle(&self) -> Result<()> {
        self.tab
            .wait_until_navigated()
            .map_err(|e| RelayError::NavigationFailed(format!("wait for load: {}", e)))?;
        Ok(())
    }

    fn click(&self, selector: &str) -> Result<()> {
        self.tab
            .find_element(selector)
            .map_err(|_| RelayError::ElementNotFound(selector.to_string()))?
            .click()
            .map_err(|e| RelayError::PageOperationFailed {
                op: "click".to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.tab
            .find_element(selector)
            .map_err(|_| RelayError::ElementNotFound(selector.to_string()))?
            .type_into(value)
            .map_err(|e| RelayError::PageOperationFailed {
                op: "fill".to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn wait_for_selector(&self, selector: &str) -> Result<()> {
        self.tab
            .wait_for_element(selector)
            .map_err(|_| RelayError::ElementNotFound(selector.to_string()))?;
        Ok(())
    }

    fn text_content(&self, selector: &str) -> Result<String> {
        self.tab
            .find_element(selector)
            .map_err(|_| RelayError::ElementNotFound(selector.to_string()))?
            .get_inner_text()
            .map_err(|e| RelayError::PageOperationFailed {
                op: "text_content".to_string(),
                reason: e.to_string(),
            })
    }

    fn screenshot(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| RelayError::PageOperationFailed {
                op: "screenshot".to_string(),
                reason: e.to_string(),
            })
    }

    fn evaluate(&self, expression: &str) -> Result<Value> {
        let remote = self
            .tab
            .evaluate(expression, true)
            .map_err(|e| RelayError::EvaluationFailed(e.to_string()))?;

        Ok(remote.value.unwrap_or(Value::Null))
    }

    fn set_user_agent(&self, user_agent: &str) -> Result<()> {
        self.tab
            .set_user_agent(user_agent, None, None)
            .map_err(|e| RelayError::PageOperationFailed {
                op: "set_user_agent".to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.tab
            .close(false)
            .map_err(|e| RelayError::PageOperationFailed {
                op: "close".to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
