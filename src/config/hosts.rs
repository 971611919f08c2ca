//
//  atlassian-api
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Host utilities.
//!
//! Hosts are identified by a normalized key (scheme and trailing slash
//! removed, lowercased). The key is used both for the `[hosts]` table of the
//! configuration file and for the keyring account name.
//!
//! | Input | Key | Base URL |
//! |-------|-----|----------|
//! | `https://Wiki.Example.com/` | `wiki.example.com` | `https://wiki.example.com` |
//! | `example.com/wiki` | `example.com/wiki` | `https://example.com/wiki` |
//! | `http://localhost:8090` | `localhost:8090` | `http://localhost:8090` |

use super::HostConfig;

/// Normalizes a host name or URL into its configuration key.
///
/// ```rust
/// use atlassian_api::config::normalize_host;
///
/// assert_eq!(normalize_host("https://Wiki.Example.com/"), "wiki.example.com");
/// assert_eq!(normalize_host("  example.com/wiki "), "example.com/wiki");
/// ```
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.strip_prefix("https://").unwrap_or(host);
    let host = host.strip_prefix("http://").unwrap_or(host);
    let host = host.trim_end_matches('/');
    host.to_lowercase()
}

/// Derives a base URL from a host name or URL.
///
/// An explicit scheme is kept, otherwise `https` is assumed.
pub fn base_url_for(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

impl HostConfig {
    /// The configured base URL, or one derived from the host key.
    pub fn base_url(&self, host: &str) -> String {
        if self.url.is_empty() {
            base_url_for(host)
        } else {
            base_url_for(&self.url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("wiki.example.com"), "wiki.example.com");
        assert_eq!(normalize_host("http://localhost:8090/"), "localhost:8090");
        assert_eq!(normalize_host("HTTPS://EXAMPLE.COM//"), "example.com");
    }

    #[test]
    fn test_base_url_for() {
        assert_eq!(base_url_for("wiki.example.com"), "https://wiki.example.com");
        assert_eq!(base_url_for("http://localhost:8090/"), "http://localhost:8090");
        assert_eq!(base_url_for("example.com/wiki"), "https://example.com/wiki");
    }

    #[test]
    fn test_host_config_base_url() {
        let derived = HostConfig::default();
        assert_eq!(derived.base_url("wiki.example.com"), "https://wiki.example.com");

        let explicit = HostConfig {
            url: "http://10.0.0.5:8090/confluence".to_string(),
            ..HostConfig::default()
        };
        assert_eq!(explicit.base_url("ignored"), "http://10.0.0.5:8090/confluence");
    }
}
