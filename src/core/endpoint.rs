//! API endpoint addressing

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Subdomain that serves map tiles alongside the API host
pub const TILE_SUBDOMAIN: &str = "tiles";

/// Where the API and its tile server live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub scheme: String,
    pub host: String,
    pub tile_host: String,
}

impl Endpoint {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            scheme: scheme.into(),
            tile_host: tile_host_for(&host),
            host,
        }
    }

    /// Base URL of the REST API, with a trailing slash
    pub fn api_base(&self) -> String {
        format!("{}://{}/api/", self.scheme, self.host)
    }

    /// Base URL of the tile server, without a trailing slash
    pub fn tile_base(&self) -> String {
        format!("{}://{}", self.scheme, self.tile_host)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new("https", "app.rasterfoundry.com")
    }
}

/// Derive the tile host by swapping the first DNS label for the tile subdomain.
///
/// `app.example.com` becomes `tiles.example.com`. Single-label hosts such as
/// `localhost` and IP literals have no subdomain to swap and are returned
/// unchanged, since local deployments serve tiles from the API host.
pub fn tile_host_for(host: &str) -> String {
    let (name, port) = match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') => (name, Some(port)),
        _ => (host, None),
    };

    if !name.contains('.') || name.parse::<IpAddr>().is_ok() {
        return host.to_string();
    }

    let mut labels: Vec<&str> = name.split('.').collect();
    labels[0] = TILE_SUBDOMAIN;
    let tile_name = labels.join(".");

    match port {
        Some(port) => format!("{}:{}", tile_name, port),
        None => tile_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_host_swaps_first_label() {
        assert_eq!(tile_host_for("app.example.com"), "tiles.example.com");
        assert_eq!(tile_host_for("app.rasterfoundry.com"), "tiles.rasterfoundry.com");
        assert_eq!(tile_host_for("staging.app.example.com"), "tiles.app.example.com");
    }

    #[test]
    fn test_tile_host_keeps_port() {
        assert_eq!(tile_host_for("app.example.com:8443"), "tiles.example.com:8443");
    }

    #[test]
    fn test_tile_host_single_label_unchanged() {
        assert_eq!(tile_host_for("localhost"), "localhost");
        assert_eq!(tile_host_for("localhost:9000"), "localhost:9000");
    }

    #[test]
    fn test_tile_host_ip_unchanged() {
        assert_eq!(tile_host_for("127.0.0.1"), "127.0.0.1");
        assert_eq!(tile_host_for("127.0.0.1:9000"), "127.0.0.1:9000");
    }

    #[test]
    fn test_endpoint_urls() {
        let endpoint = Endpoint::new("https", "app.example.com");
        assert_eq!(endpoint.api_base(), "https://app.example.com/api/");
        assert_eq!(endpoint.tile_base(), "https://tiles.example.com");
    }
}
