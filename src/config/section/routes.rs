//! `[routes]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [routes]
//! server = "server-routes.json"   # Server-declared routes (relative to config file)
//! ```
//!
//! The server file is optional: when it does not exist only client views
//! are listed.

use crate::utils::path::normalize_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub server: PathBuf,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            server: "server-routes.json".into(),
        }
    }
}

impl RoutesConfig {
    pub fn normalize(&mut self, base: &Path) {
        self.server = normalize_path(&base.join(&self.server));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_routes_config() {
        assert_eq!(test_parse_config("").routes, RoutesConfig::default());
        let config = test_parse_config("[routes]\nserver = \"flow/routes.json\"");
        assert_eq!(config.routes.server, PathBuf::from("flow/routes.json"));
    }

    #[test]
    fn test_normalize_relative_to_base() {
        let mut routes = RoutesConfig::default();
        routes.normalize(Path::new("/nonexistent/app"));
        assert_eq!(routes.server, PathBuf::from("/nonexistent/app/server-routes.json"));
    }
}
