//! URL slugs.
//!
//! A [`Slug`] is an ordered sequence of URL path segments identifying a
//! page. The root index page has the empty slug.

use std::fmt;

use percent_encoding::percent_decode_str;

/// Ordered sequence of URL path segments.
///
/// Segments are stored percent-decoded. Comparison is exact and
/// case-sensitive, matching the resolver contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Slug(Vec<String>);

impl Slug {
    /// The empty slug, identifying the root index page.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Create a slug from an ordered sequence of segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a slug from a URL path.
    ///
    /// Leading and trailing slashes are ignored and empty segments are
    /// dropped, so `"/guide/setup/"`, `"guide/setup"` and `"guide//setup"`
    /// all parse to the same slug. Segments are percent-decoded.
    #[must_use]
    pub fn from_url_path(path: &str) -> Self {
        Self(
            path.split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
                .collect(),
        )
    }

    /// The ordered path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True for the empty slug (root index page).
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Last segment, `None` for the root slug.
    #[must_use]
    pub fn last_segment(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// URL path with a leading slash (`"/"` for the root slug).
    #[must_use]
    pub fn url_path(&self) -> String {
        if self.0.is_empty() {
            "/".to_owned()
        } else {
            format!("/{}", self.0.join("/"))
        }
    }

    /// Slug of a child page one segment deeper.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Slug of the parent page, `None` for the root slug.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url_path())
    }
}

impl<S: Into<String>> FromIterator<S> for Slug {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
