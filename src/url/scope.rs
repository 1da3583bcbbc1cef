use crate::config::ScopeConfig;
use crate::state::SkipReason;
use url::Url;

/// File extensions that never lead to an HTML page
///
/// Matching is a cheap pre-filter on the path only; the fetcher still checks
/// the Content-Type of everything it downloads.
const BINARY_EXTENSIONS: &[&str] = &[
    // Documents
    "pdf",
    // Images
    "jpg", "jpeg", "png", "gif", "svg", "ico", "webp",
    // Archives
    "zip", "tar", "gz", "rar", "7z",
    // Audio and video
    "mp3", "mp4", "mov", "avi", "wmv", "mkv",
    // Executables and packages
    "exe", "dmg", "apk",
];

/// Decides which canonical URLs belong to a crawl
///
/// Three independent predicates are combined:
/// - domain match against the seed host (optionally including subdomains)
/// - binary asset rejection by path extension
/// - allow/deny path prefix rules (deny wins)
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    root_host: String,
    include_subdomains: bool,
    allow_paths: Vec<String>,
    deny_paths: Vec<String>,
}

impl ScopeFilter {
    /// Builds a filter rooted at the seed URL's host
    pub fn new(root: &Url, config: &ScopeConfig) -> Self {
        Self {
            root_host: root.host_str().unwrap_or_default().to_lowercase(),
            include_subdomains: config.include_subdomains,
            allow_paths: config.allow_paths.clone().unwrap_or_default(),
            deny_paths: config.deny_paths.clone().unwrap_or_default(),
        }
    }

    /// Returns true if the URL's host is the root host (or a subdomain of it,
    /// when subdomains are included)
    pub fn in_domain(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => host_matches(
                &self.root_host,
                &host.to_lowercase(),
                self.include_subdomains,
            ),
            None => false,
        }
    }

    /// Returns true if the URL's path passes the allow and deny prefix lists
    ///
    /// An empty list counts as not configured.
    pub fn path_permitted(&self, url: &Url) -> bool {
        let path = path_or_root(url);

        if !self.allow_paths.is_empty()
            && !self.allow_paths.iter().any(|p| path.starts_with(p.as_str()))
        {
            return false;
        }

        !self.deny_paths.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Checks a URL popped from the frontier, in crawl-loop order:
    /// path policy, domain, binary asset
    pub fn check_frontier_entry(&self, url: &Url) -> Result<(), SkipReason> {
        if !self.path_permitted(url) {
            return Err(SkipReason::PathPolicy);
        }

        if !self.in_domain(url) {
            return Err(SkipReason::OutOfDomain);
        }

        if is_probably_binary(url) {
            return Err(SkipReason::BinaryAsset);
        }

        Ok(())
    }

    /// Returns true if a discovered link may be pushed onto the frontier
    ///
    /// Path rules are not applied here; they are checked when the URL is
    /// popped.
    pub fn accepts_link(&self, url: &Url) -> bool {
        !is_probably_binary(url) && self.in_domain(url)
    }
}

/// Returns true if the URL's path ends in a known non-HTML extension
///
/// Case-insensitive. Query strings are ignored, so `/report.pdf?v=2` is still
/// an asset while `/download?file=a.pdf` is not.
pub fn is_probably_binary(url: &Url) -> bool {
    let last_segment = match url.path_segments().and_then(|segments| segments.last()) {
        Some(segment) => segment,
        None => return false,
    };

    match last_segment.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            BINARY_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Checks a candidate host against the root host
///
/// Both hosts should already be lowercase. With subdomains included,
/// `blog.example.com` and `a.b.example.com` match `example.com`, but
/// `notexample.com` does not.
fn host_matches(root: &str, candidate: &str, include_subdomains: bool) -> bool {
    if candidate == root {
        return true;
    }

    include_subdomains
        && candidate.len() > root.len() + 1
        && candidate.ends_with(root)
        && candidate.as_bytes()[candidate.len() - root.len() - 1] == b'.'
}

fn path_or_root(url: &Url) -> &str {
    match url.path() {
        "" => "/",
        path => path,
    }
}
