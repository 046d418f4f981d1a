//! Decomposition of check URLs into the parameters the service expects.
//!
//! A check is addressed by host, path and whether it is probed over TLS.
//! Only `http://` and `https://` URLs map to a check; anything else yields
//! `None`, which callers treat as "no applicable check" rather than an error.

use crate::models::CheckUrlComponents;

/// Split `url` into host, path and encryption flag.
///
/// - The scheme must be exactly `http` or `https`.
/// - A port, if present, is dropped from the host.
/// - A bare host gets the path `/`.
/// - A single leading doubled separator (`host//a/b`) collapses to `/a/b`;
///   interior doubled separators are kept.
/// - Query strings stay part of the path verbatim.
pub fn parse_check_url(url: &str) -> Option<CheckUrlComponents> {
    let (scheme, rest) = url.split_once("://")?;
    let encrypted = match scheme {
        "https" => true,
        "http" => false,
        _ => return None,
    };

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    // userinfo never identifies a check
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = strip_port(host_port);
    if host.is_empty() || host.contains(char::is_whitespace) {
        return None;
    }

    let tail = tail.split('#').next().unwrap_or_default();
    let path = if tail.is_empty() {
        "/".to_string()
    } else if let Some(stripped) = tail.strip_prefix("//") {
        format!("/{}", stripped)
    } else if tail.starts_with('?') {
        format!("/{}", tail)
    } else {
        tail.to_string()
    };

    Some(CheckUrlComponents {
        host: host.to_string(),
        path,
        encrypted,
    })
}

/// Compose `scheme://host+path` from parsed components.
pub fn compose_url(host: &str, path: &str, encrypted: bool) -> String {
    let scheme = if encrypted { "https" } else { "http" };
    format!("{}://{}{}", scheme, host, path)
}

fn strip_port(host_port: &str) -> &str {
    // IPv6 literal: keep the brackets, drop anything after them.
    if host_port.starts_with('[') {
        return match host_port.find(']') {
            Some(end) => &host_port[..=end],
            None => host_port,
        };
    }
    match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host_port,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(host: &str, path: &str, encrypted: bool) -> Option<CheckUrlComponents> {
        Some(CheckUrlComponents {
            host: host.to_string(),
            path: path.to_string(),
            encrypted,
        })
    }

    #[test]
    fn test_https_url() {
        assert_eq!(
            parse_check_url("https://test.com/endpoint"),
            parsed("test.com", "/endpoint", true)
        );
    }

    #[test]
    fn test_http_url() {
        assert_eq!(
            parse_check_url("http://test.nu/endpoint2"),
            parsed("test.nu", "/endpoint2", false)
        );
    }

    #[test]
    fn test_leading_double_slash_collapsed() {
        assert_eq!(
            parse_check_url("https://test.com//dev/check"),
            parsed("test.com", "/dev/check", true)
        );
        assert_eq!(
            parse_check_url("https://test.com/dev/check"),
            parsed("test.com", "/dev/check", true)
        );
    }

    #[test]
    fn test_interior_double_slash_kept() {
        assert_eq!(
            parse_check_url("https://test.com/dev//check"),
            parsed("test.com", "/dev//check", true)
        );
    }

    #[test]
    fn test_root_and_bare_host() {
        assert_eq!(
            parse_check_url("https://test.net/"),
            parsed("test.net", "/", true)
        );
        assert_eq!(
            parse_check_url("https://test.net"),
            parsed("test.net", "/", true)
        );
    }

    #[test]
    fn test_query_kept_verbatim() {
        assert_eq!(
            parse_check_url("http://test.com/hello?test"),
            parsed("test.com", "/hello?test", false)
        );
        assert_eq!(
            parse_check_url("http://test.com?a=%20b"),
            parsed("test.com", "/?a=%20b", false)
        );
    }

    #[test]
    fn test_port_dropped() {
        assert_eq!(
            parse_check_url("https://test.com:8443/status"),
            parsed("test.com", "/status", true)
        );
    }

    #[test]
    fn test_unsupported_inputs() {
        assert_eq!(parse_check_url("ftp://test.net/"), None);
        assert_eq!(parse_check_url("laosdlasdo"), None);
        assert_eq!(parse_check_url("not a url"), None);
        assert_eq!(parse_check_url("HTTPS://test.net/"), None);
        assert_eq!(parse_check_url("https:///path"), None);
    }

    #[test]
    fn test_compose_reproduces_canonical_input() {
        for url in [
            "https://test.com/endpoint",
            "http://test.nu/a/b/c",
            "https://test.net/",
            "http://test.com/hello?test",
        ] {
            let c = parse_check_url(url).unwrap();
            assert_eq!(compose_url(&c.host, &c.path, c.encrypted), url);
        }
    }
}
