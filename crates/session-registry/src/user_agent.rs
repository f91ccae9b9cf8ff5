//! Display parsing of raw user-agent strings.
//!
//! The raw string is what the server stores and what comparisons use; this
//! parse exists only to render a readable "browser, system" pair in session
//! rows. Anything unrecognized falls back to the raw string.

/// Browser and operating system extracted from a user-agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayAgent {
    pub browser: Option<String>,
    pub os: Option<String>,
}

impl DisplayAgent {
    /// One-line label for a session row, e.g. `Chrome 120, macOS`.
    pub fn label(&self, raw: &str) -> String {
        match (&self.browser, &self.os) {
            (Some(b), Some(os)) => format!("{b}, {os}"),
            (Some(b), None) => b.clone(),
            (None, Some(os)) => os.clone(),
            (None, None) => raw.to_string(),
        }
    }
}

fn version_after<'a>(ua: &'a str, marker: &str) -> Option<&'a str> {
    let rest = &ua[ua.find(marker)? + marker.len()..];
    let end = rest
        .find(|c: char| c != '.' && !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let version = &rest[..end];
    version.split('.').next().filter(|major| !major.is_empty())
}

fn browser(ua: &str) -> Option<String> {
    // Chromium-derived browsers keep "Chrome/" in the string, so the more
    // specific markers must win.
    let candidates = [
        ("Edg/", "Edge"),
        ("OPR/", "Opera"),
        ("Firefox/", "Firefox"),
        ("Chrome/", "Chrome"),
    ];
    for (marker, name) in candidates {
        if ua.contains(marker) {
            return Some(match version_after(ua, marker) {
                Some(major) => format!("{name} {major}"),
                None => name.to_string(),
            });
        }
    }
    if ua.contains("Safari/") && ua.contains("Version/") {
        return Some(match version_after(ua, "Version/") {
            Some(major) => format!("Safari {major}"),
            None => "Safari".to_string(),
        });
    }
    None
}

fn os(ua: &str) -> Option<String> {
    let name = if ua.contains("Windows") {
        "Windows"
    } else if ua.contains("iPhone") || ua.contains("iPad") {
        "iOS"
    } else if ua.contains("Mac OS") {
        // Upstream parsers report "Mac OS"; the product name is macOS.
        "macOS"
    } else if ua.contains("Android") {
        "Android"
    } else if ua.contains("Linux") {
        "Linux"
    } else {
        return None;
    };
    Some(name.to_string())
}

/// Parse a raw user-agent string for display.
pub fn parse(ua: &str) -> DisplayAgent {
    DisplayAgent {
        browser: browser(ua),
        os: os(ua),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                              AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const FIREFOX_WIN: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
                                 AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const EDGE_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                            (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";

    #[test]
    fn test_mac_os_is_reported_as_macos() {
        let agent = parse(CHROME_MAC);
        assert_eq!(agent.os.as_deref(), Some("macOS"));
        assert_eq!(agent.browser.as_deref(), Some("Chrome 120"));
        assert_eq!(agent.label(CHROME_MAC), "Chrome 120, macOS");
    }

    #[test]
    fn test_firefox_on_windows() {
        let agent = parse(FIREFOX_WIN);
        assert_eq!(agent.label(FIREFOX_WIN), "Firefox 122, Windows");
    }

    #[test]
    fn test_safari_needs_version_marker() {
        let agent = parse(SAFARI_IPHONE);
        assert_eq!(agent.browser.as_deref(), Some("Safari 17"));
        assert_eq!(agent.os.as_deref(), Some("iOS"));
    }

    #[test]
    fn test_edge_wins_over_its_chrome_marker() {
        let agent = parse(EDGE_WIN);
        assert_eq!(agent.browser.as_deref(), Some("Edge 120"));
    }

    #[test]
    fn test_unrecognized_falls_back_to_raw() {
        let agent = parse("curl/8.4.0");
        assert_eq!(agent.label("curl/8.4.0"), "curl/8.4.0");
    }
}
