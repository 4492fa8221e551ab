//! Access to the static HTML mirror.
//!
//! The mirror is a local directory tree copying the legacy site's URL
//! structure: one subdirectory per page, each holding an `index.html`.
//! Lookups are best-effort; an absent page is `None`, never an error.

use std::fs;
use std::path::{Path, PathBuf};

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{Error, Result};

/// Handle on the mirror root.
#[derive(Debug, Clone)]
pub struct Mirror {
    root: PathBuf,
}

impl Mirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a page by its URL path relative to the site root.
    /// Returns `None` when the directory or its `index.html` is missing.
    pub fn page(&self, rel_path: &str) -> Option<MirrorPage> {
        let dir = self.root.join(rel_path.trim_matches('/'));
        match MirrorPage::load(&dir) {
            Ok(page) => Some(page),
            Err(Error::MissingPage(path)) => {
                debug!("mirror page absent: {}", path.display());
                None
            }
            Err(e) => {
                debug!("mirror page unreadable: {}", e);
                None
            }
        }
    }

    /// Enumerate the page directories directly under `rel_path`, sorted by
    /// name so batch output is deterministic. Returns `(slug, dir)` pairs.
    pub fn subdirs(&self, rel_path: &str) -> Vec<(String, PathBuf)> {
        let base = if rel_path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel_path.trim_matches('/'))
        };
        let entries = match fs::read_dir(&base) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        let mut dirs: Vec<(String, PathBuf)> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| {
                let slug = e.file_name().to_str()?.to_string();
                Some((slug, e.path()))
            })
            .collect();
        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        dirs
    }
}

/// One parsed mirror page.
pub struct MirrorPage {
    /// Directory the page was loaded from.
    pub dir: PathBuf,
    /// Parsed document tree.
    pub document: Html,
}

impl MirrorPage {
    /// Load and parse `<dir>/index.html`.
    pub fn load(dir: &Path) -> Result<Self> {
        let index = dir.join("index.html");
        if !index.exists() {
            return Err(Error::MissingPage(index));
        }
        let raw = fs::read_to_string(&index).map_err(|source| Error::Io {
            path: index.clone(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            document: Html::parse_document(&raw),
        })
    }

    /// First element matching any of the given selectors, in order.
    pub fn first_match(&self, selectors: &[&str]) -> Option<ElementRef<'_>> {
        for css in selectors {
            if let Ok(selector) = Selector::parse(css) {
                if let Some(element) = self.document.select(&selector).next() {
                    return Some(element);
                }
            }
        }
        None
    }

    /// Trimmed text content of the first element matching any selector.
    pub fn first_text(&self, selectors: &[&str]) -> Option<String> {
        self.first_match(selectors).and_then(|el| {
            let text = collapse_ws(&el.text().collect::<String>());
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
    }

    /// `content` attribute of a `<meta>` tag selected by CSS.
    pub fn meta_content(&self, css: &str) -> Option<String> {
        let selector = Selector::parse(css).ok()?;
        self.document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Text of the `<title>` element.
    pub fn title_tag(&self) -> Option<String> {
        self.first_text(&["title"])
    }
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
