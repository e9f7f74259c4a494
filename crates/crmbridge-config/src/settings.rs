use crmbridge_connectors::ClientConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server-wide HTTP settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("crmbridge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServerSettings {
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        // connect timeout never exceeds the total
        self.connect_timeout_secs = self.connect_timeout_secs.min(timeout_secs);
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ServerSettings::default();
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.connect_timeout_secs, 10);
        assert!(settings.user_agent.starts_with("crmbridge/"));
        assert!(settings.client_config().validate().is_ok());
    }

    #[test]
    fn test_short_timeout_clamps_connect() {
        let config = ServerSettings::default().with_timeout_secs(5).client_config();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings: ServerSettings = serde_yaml::from_str("timeout_secs: 60\n").unwrap();
        assert_eq!(settings.timeout_secs, 60);
        assert_eq!(settings.connect_timeout_secs, 10);
    }
}
