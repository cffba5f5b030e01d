//! Web view policies: link handling and prompt focusing.

/// What triggered a navigation, as far as the policy cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// The user clicked a link inside the page.
    LinkActivated,
    /// Anything else: form posts, redirects, script navigation, reloads.
    Other,
}

impl NavigationKind {
    /// Maps a `WKNavigationType` value.
    pub fn from_webkit(navigation_type: isize) -> Self {
        if navigation_type == 0 {
            Self::LinkActivated
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    Allow,
    /// Cancel in the web view and hand the URL to the default browser.
    OpenExternally,
}

/// Clicked `http`/`https` links leave the overlay; everything else stays.
pub fn decide(kind: NavigationKind, url: &str) -> NavigationPolicy {
    if kind == NavigationKind::LinkActivated && is_web_url(url) {
        NavigationPolicy::OpenExternally
    } else {
        NavigationPolicy::Allow
    }
}

fn is_web_url(url: &str) -> bool {
    match url.split_once(':') {
        Some((scheme, _)) => {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        }
        None => false,
    }
}

/// Script that focuses the first element matching `selector`.
///
/// The selector is embedded as a JSON string literal so quotes inside it
/// survive intact.
pub fn focus_script(selector: &str) -> String {
    let literal = serde_json::to_string(selector).unwrap_or_else(|_| String::from("\"\""));
    format!("setTimeout(() => document.querySelector({literal})?.focus(), 0);")
}
