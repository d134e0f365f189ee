//! Host extraction, base domain reduction and identifier classification.

use url::{Host, Url};

/// Compound public suffixes that need three labels to form a registrable domain.
/// Anything not listed here is treated as a single-label suffix.
static COMPOUND_SUFFIXES: &[&str] = &[
    // United Kingdom
    "co.uk", "ac.uk",
    // China
    "com.cn", "net.cn", "org.cn", "gov.cn",
    // Japan
    "co.jp", "ne.jp", "or.jp",
    // Australia
    "com.au", "net.au", "org.au",
];

/// Check if a string is likely an application package name rather than a URL or domain.
///
/// Coarse heuristic: contains a dot, has no `/` or `:`, and does not start with `http`.
/// Note that bare domains such as `example.com` also pass; callers only use this to
/// decide which identifier to treat as the package when no explicit one was given.
pub fn is_app_package(identifier: &str) -> bool {
    identifier.contains('.')
        && !identifier.contains('/')
        && !identifier.contains(':')
        && !identifier.starts_with("http")
}

/// Extract the host from a saved or observed identifier.
///
/// Full URLs are parsed as-is, anything else is parsed with `https://` prepended.
/// When that fails the identifier is cut at the first `/` and then at the first `:`
/// (dropping path and port). Returns `None` if nothing usable remains.
///
/// E.g., "https://login.example.com:8443/path" -> "login.example.com"
/// E.g., "example.com/signin" -> "example.com"
pub fn extract_host(identifier: &str) -> Option<String> {
    if identifier.is_empty() {
        return None;
    }

    parse_host(identifier).or_else(|| fallback_host(identifier).map(String::from))
}

fn parse_host(identifier: &str) -> Option<String> {
    let (authority, parsed) = match strip_http_scheme(identifier) {
        Some(rest) => (rest, Url::parse(identifier)),
        None => (identifier, Url::parse(&format!("https://{}", identifier))),
    };

    // The URL parser skips extra slashes and would find a host after them;
    // an authority that starts with a slash has an empty host instead
    if authority.starts_with('/') || authority.starts_with('\\') {
        return None;
    }

    let url = parsed.ok()?;

    // Numeric labels are rewritten as IPv4 ("1.2.3" -> "1.2.0.3"); keep the host as written
    if let Some(Host::Ipv4(addr)) = url.host() {
        if !authority.contains(&addr.to_string()) {
            return literal_host(authority);
        }
    }

    url.host_str()
        .filter(|host| !host.is_empty())
        .map(String::from)
}

/// Host as written in an authority: no path, query, fragment, userinfo or port.
fn literal_host(authority: &str) -> Option<String> {
    let end = authority.find(['/', '\\', '?', '#']).unwrap_or(authority.len());
    let host_port = authority[..end].rsplit('@').next()?;
    let host = host_port.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

/// Text after a leading `http://` or `https://` (ASCII case-insensitive).
fn strip_http_scheme(identifier: &str) -> Option<&str> {
    ["http://", "https://"].iter().find_map(|scheme| {
        identifier
            .get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(|_| &identifier[scheme.len()..])
    })
}

fn fallback_host(identifier: &str) -> Option<&str> {
    let before_path = identifier.split('/').next()?;
    let host = before_path.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Reduce a host to its registrable (base) domain.
///
/// Returns a slice of the input, so the reduction never allocates.
/// E.g., "mail.example.com" -> "example.com"
/// E.g., "www.example.co.uk" -> "example.co.uk"
/// E.g., "localhost" -> "localhost"
pub fn base_domain(host: &str) -> &str {
    let mut dots = host.rmatch_indices('.').map(|(idx, _)| idx);

    // A single label cannot be reduced any further
    if dots.next().is_none() {
        return host;
    }

    let Some(second_dot) = dots.next() else {
        return host;
    };

    let last_two = &host[second_dot + 1..];
    if is_compound_suffix(last_two) {
        let start = dots.next().map_or(0, |idx| idx + 1);
        return &host[start..];
    }

    last_two
}

/// Extract the host of an identifier and reduce it to its base domain.
pub fn extract_base_domain(identifier: &str) -> Option<String> {
    let host = extract_host(identifier)?;
    Some(base_domain(&host).to_string())
}

fn is_compound_suffix(suffix: &str) -> bool {
    COMPOUND_SUFFIXES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(suffix))
}
