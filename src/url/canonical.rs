use crate::UrlError;
use url::Url;

/// Resolves an href against a base URL into canonical form
///
/// # Canonicalization Steps
///
/// 1. Trim surrounding whitespace; an empty href yields nothing
/// 2. Resolve against the base (relative, protocol-relative or absolute)
/// 3. Reject anything that is not http or https (`mailto:`, `javascript:`, ...)
/// 4. Remove fragment (everything after #)
/// 5. Omit the port when it is the scheme default (80 / 443)
///
/// Returns `None` rather than an error: a bad link on a page is routine and
/// only that link is dropped.
///
/// # Examples
///
/// ```
/// use minicrawler::url::canonicalize;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// let url = canonicalize(&base, "intro#setup").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/intro");
///
/// assert!(canonicalize(&base, "mailto:team@example.com").is_none());
/// ```
pub fn canonicalize(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = base.join(href).ok()?;
    into_canonical(resolved).ok()
}

/// Parses the seed URL of a crawl into canonical form
///
/// Unlike [`canonicalize`], failures are reported: an unusable seed aborts
/// the crawl before any request is made.
///
/// # Examples
///
/// ```
/// use minicrawler::url::parse_seed;
///
/// let seed = parse_seed("https://example.com:443/about/#team").unwrap();
/// assert_eq!(seed.as_str(), "https://example.com/about/");
///
/// assert!(parse_seed("ftp://example.com/").is_err());
/// ```
pub fn parse_seed(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    into_canonical(url)
}

/// Returns true for the schemes the crawler is willing to fetch
pub fn is_web_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

fn into_canonical(mut url: Url) -> Result<Url, UrlError> {
    if !is_web_scheme(url.scheme()) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    // Normally already dropped at parse time
    if url.port().is_some() && url.port() == default_port(url.scheme()) {
        url.set_port(None)
            .map_err(|_| UrlError::Parse(format!("cannot clear port on {}", url)))?;
    }

    Ok(url)
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}
