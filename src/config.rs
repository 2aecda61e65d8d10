//! Environment-derived service configuration

/// Default listen port when PORT is unset
pub const DEFAULT_PORT: u16 = 3000;

/// Default remote browser connection endpoint
pub const DEFAULT_CONNECT_URL: &str = "wss://connect.browserbase.com";

/// Default automation-agent API endpoint
pub const DEFAULT_AGENT_URL: &str = "https://api.stagehand.browserbase.com/v1";

/// Settings for outbound connections and the HTTP listener
#[derive(Debug, Clone)]
pub struct Settings {
    /// Remote-service API key (BROWSERBASE_API_KEY)
    pub api_key: String,

    /// Remote-service project identifier (BROWSERBASE_PROJECT_ID)
    pub project_id: String,

    /// HTTP listen port (PORT, default 3000)
    pub port: u16,

    /// Base URL for remote browser connections (BROWSERBASE_CONNECT_URL)
    pub connect_url: String,

    /// Base URL for the automation-agent API (STAGEHAND_API_URL)
    pub agent_url: String,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            api_key: std::env::var("BROWSERBASE_API_KEY").unwrap_or_default(),
            project_id: std::env::var("BROWSERBASE_PROJECT_ID").unwrap_or_default(),
            port,
            connect_url: std::env::var("BROWSERBASE_CONNECT_URL")
                .unwrap_or_else(|_| DEFAULT_CONNECT_URL.to_string()),
            agent_url: std::env::var("STAGEHAND_API_URL")
                .unwrap_or_else(|_| DEFAULT_AGENT_URL.to_string()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            port: DEFAULT_PORT,
            connect_url: DEFAULT_CONNECT_URL.to_string(),
            agent_url: DEFAULT_AGENT_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.connect_url, DEFAULT_CONNECT_URL);
        assert!(settings.api_key.is_empty());
    }
}
