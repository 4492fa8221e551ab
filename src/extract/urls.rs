//! Image URL normalization.
//!
//! Mirrored pages reference images through a CDN image proxy, with
//! protocol-relative or site-relative paths, and usually via generated size
//! variants (`photo-300x300.jpg`). All of these normalize to the one
//! canonical full-resolution URL so downstream de-duplication works.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

fn size_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)-\d+x\d+(\.(?:jpe?g|png|gif|webp))$").expect("static regex")
    })
}

fn proxy_host() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^i\d+\.wp\.com$").expect("static regex"))
}

/// Normalize one raw image reference to its canonical absolute URL.
/// Returns `None` for empty references and inline `data:` placeholders.
pub fn normalize_image_url(raw: &str, site_base: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with("data:") {
        return None;
    }

    let absolute = if let Some(rest) = raw.strip_prefix("//") {
        format!("https://{rest}")
    } else if raw.starts_with('/') {
        format!("{site_base}{raw}")
    } else if raw.contains("://") {
        raw.to_string()
    } else {
        format!("{site_base}/{raw}")
    };

    let mut url = Url::parse(&absolute).ok()?;

    // Unwrap the CDN image proxy: i0.wp.com/<origin-host>/<path> carries the
    // original URL in its path.
    if let Some(host) = url.host_str() {
        if proxy_host().is_match(host) {
            let inner = url.path().trim_start_matches('/');
            url = Url::parse(&format!("https://{inner}")).ok()?;
        }
    }

    // Size variants and proxy resize parameters both drop out of the
    // canonical form.
    url.set_query(None);
    url.set_fragment(None);
    let path = size_suffix().replace(url.path(), "$1").into_owned();
    url.set_path(&path);

    Some(url.to_string())
}

/// Order-preserving de-duplication by canonical URL.
pub fn dedupe_urls(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter().filter(|u| seen.insert(u.clone())).collect()
}

/// Pick the widest entry out of a `srcset` attribute.
pub fn largest_srcset_entry(srcset: &str) -> Option<String> {
    srcset
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split_whitespace();
            let url = parts.next()?;
            let width = parts
                .next()
                .and_then(|w| w.trim_end_matches('w').parse::<u32>().ok())
                .unwrap_or(0);
            Some((width, url.to_string()))
        })
        .max_by_key(|(width, _)| *width)
        .map(|(_, url)| url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.thelaserstore.com";

    #[test]
    fn strips_size_suffix() {
        assert_eq!(
            normalize_image_url("https://x.test/wp-content/uploads/photo-300x300.jpg", BASE)
                .unwrap(),
            "https://x.test/wp-content/uploads/photo.jpg"
        );
    }

    #[test]
    fn proxy_and_size_variant_round_trip_to_same_canonical() {
        let direct =
            normalize_image_url("https://x.test/wp-content/uploads/photo-225x300.jpg", BASE);
        let proxied = normalize_image_url(
            "https://i0.wp.com/x.test/wp-content/uploads/photo-225x300.jpg?resize=225%2C300",
            BASE,
        );
        assert_eq!(direct, proxied);
        assert_eq!(
            direct.unwrap(),
            "https://x.test/wp-content/uploads/photo.jpg"
        );
    }

    #[test]
    fn absolutizes_relative_forms() {
        assert_eq!(
            normalize_image_url("/wp-content/uploads/a.png", BASE).unwrap(),
            format!("{BASE}/wp-content/uploads/a.png")
        );
        assert_eq!(
            normalize_image_url("//cdn.x.test/b.jpg", BASE).unwrap(),
            "https://cdn.x.test/b.jpg"
        );
    }

    #[test]
    fn rejects_placeholders() {
        assert!(normalize_image_url("data:image/svg+xml;base64,xx", BASE).is_none());
        assert!(normalize_image_url("   ", BASE).is_none());
    }

    #[test]
    fn dedupes_preserving_order() {
        let urls = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(dedupe_urls(urls), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn srcset_picks_widest() {
        let srcset = "https://x.test/s-300x200.jpg 300w, https://x.test/s.jpg 1024w";
        assert_eq!(
            largest_srcset_entry(srcset).unwrap(),
            "https://x.test/s.jpg"
        );
    }
}
