//! Resolves a URL to the key its site handler is registered under.

use url::Url;

/// Second labels of four-label hosts that mark a mobile site.
const MOBILE_MARKERS: &[&str] = &["m", "mobile", "amp"];

/// Leading labels of three-label hosts that name a locale or a vertical
/// rather than the brand.
const SITE_PREFIXES: &[&str] = &[
    "www", "m", "mobile", "amp", "recipes", "recipe", "cooking", "food", "kitchen", "en", "de",
    "fr", "es", "it", "nl", "pl", "pt", "sv", "da", "no", "fi",
];

/// Three-label hosts whose brand label isn't where the rules would look.
const BRAND_EXCEPTIONS: &[(&str, &str)] = &[
    ("blog.giallozafferano.it", "giallozafferano"),
    ("cuisine.journaldesfemmes.fr", "journaldesfemmes"),
    ("receitas.globo.com", "globo"),
];

/// Host key for a URL. Unparseable URLs and URLs without a host give an
/// empty key, which no handler is registered under.
pub fn host_key(url: &str) -> String {
    Url::parse(url.trim())
        .ok()
        .and_then(|url| url.host_str().map(host_key_from_host))
        .unwrap_or_default()
}

/// Host key for a bare hostname.
pub fn host_key_from_host(host: &str) -> String {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();

    match labels.as_slice() {
        [_, second, third, _] => {
            if MOBILE_MARKERS.contains(second) {
                third.to_string()
            } else {
                second.to_string()
            }
        }
        [first, second, _] => {
            if let Some((_, brand)) = BRAND_EXCEPTIONS.iter().find(|(h, _)| *h == host) {
                brand.to_string()
            } else if SITE_PREFIXES.contains(first) {
                second.to_string()
            } else {
                first.to_string()
            }
        }
        [.., brand, _] => brand.to_string(),
        _ => String::new(),
    }
}
