use crate::config::RecordingConfig;
use url::Url;

/// Decides which navigations are content worth recording.
///
/// Unparseable URLs, excluded schemes (browser-internal pages, extension
/// pages) and excluded prefixes (the recorder's own UI) are rejected.
#[derive(Debug, Clone, Default)]
pub struct NavigationFilter {
    excluded_schemes: Vec<String>,
    excluded_prefixes: Vec<String>,
}

impl NavigationFilter {
    pub fn new(excluded_schemes: Vec<String>, excluded_prefixes: Vec<String>) -> Self {
        Self {
            excluded_schemes,
            excluded_prefixes,
        }
    }

    pub fn from_config(config: &RecordingConfig) -> Self {
        Self::new(
            config.excluded_schemes.clone(),
            config.excluded_url_prefixes.clone(),
        )
    }

    pub fn allows(&self, url: &str) -> bool {
        if self
            .excluded_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
        {
            return false;
        }

        match Url::parse(url) {
            Ok(parsed) => !self
                .excluded_schemes
                .iter()
                .any(|scheme| scheme.eq_ignore_ascii_case(parsed.scheme())),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = NavigationFilter::from_config(&RecordingConfig::default());
        assert!(filter.allows("https://example.com/login"));
        assert!(filter.allows("http://localhost:3000"));
        assert!(filter.allows("file:///tmp/index.html"));
        assert!(!filter.allows("chrome://newtab/"));
        assert!(!filter.allows("chrome-extension://abcdef/recorder.html"));
        assert!(!filter.allows("about:blank"));
        assert!(!filter.allows("not a url"));
    }

    #[test]
    fn test_prefix_exclusion() {
        let filter = NavigationFilter::new(vec![], vec!["https://recorder.local/".into()]);
        assert!(!filter.allows("https://recorder.local/ui"));
        assert!(filter.allows("https://example.com"));
    }
}
