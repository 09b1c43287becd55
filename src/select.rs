//! Element lookup over parsed HTML.
//!
//! CSS selectors cover the easy cases, but two things here need more:
//! required lookups must fail with a typed [`ScrapeError::TagNotFound`]
//! naming what was searched for, and attribute values sometimes need to
//! be matched against a regex (e.g. an `href` ending in `pdf-a4.zip`).
//! [`TagQuery`] expresses both: a tag name plus an ordered list of
//! attribute constraints, each either an exact string or a pattern.

use regex::Regex;
use scraper::ElementRef;
use tracing::error;

use crate::errors::ScrapeError;

/// One attribute constraint of a [`TagQuery`].
#[derive(Debug, Clone)]
pub enum AttrMatch {
    /// The attribute value must equal the string. For the `class`
    /// attribute this matches any whitespace-separated class token,
    /// so `Exact("toctree-wrapper")` matches
    /// `class="toctree-wrapper compound"`.
    Exact(String),
    /// The attribute value must match the regex.
    Pattern(Regex),
}

/// A tag name plus attribute constraints, applied in order.
#[derive(Debug, Clone)]
pub struct TagQuery {
    name: String,
    attrs: Vec<(String, AttrMatch)>,
}

impl TagQuery {
    pub fn new(name: impl Into<String>) -> Self {
        TagQuery {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Require an attribute to equal `value` exactly (class-token
    /// semantics for `class`).
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), AttrMatch::Exact(value.into())));
        self
    }

    /// Require an attribute to match `pattern`.
    pub fn attr_pattern(mut self, name: impl Into<String>, pattern: Regex) -> Self {
        self.attrs.push((name.into(), AttrMatch::Pattern(pattern)));
        self
    }

    /// Does `element` satisfy this query?
    pub fn matches(&self, element: &ElementRef) -> bool {
        if element.value().name() != self.name {
            return false;
        }
        self.attrs.iter().all(|(attr, matcher)| {
            let Some(value) = element.value().attr(attr) else {
                return false;
            };
            match matcher {
                AttrMatch::Exact(want) if attr == "class" => {
                    value.split_whitespace().any(|token| token == want)
                }
                AttrMatch::Exact(want) => value == want,
                AttrMatch::Pattern(re) => re.is_match(value),
            }
        })
    }

    /// Human-readable rendering of the attribute constraints, used in
    /// `TagNotFound` errors.
    pub fn describe_filter(&self) -> String {
        self.attrs
            .iter()
            .map(|(attr, matcher)| match matcher {
                AttrMatch::Exact(want) => format!("{attr}=\"{want}\""),
                AttrMatch::Pattern(re) => format!("{attr}~/{re}/"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// First descendant of `scope` matching `query`, in document order.
/// `scope` itself is never considered.
pub fn find_first<'a>(scope: ElementRef<'a>, query: &TagQuery) -> Option<ElementRef<'a>> {
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| query.matches(element))
}

/// Like [`find_first`], but absence is an error: the page no longer has
/// the structure the extractor was written against.
///
/// # Errors
///
/// Returns [`ScrapeError::TagNotFound`] carrying the tag name and the
/// rendered attribute filter; the miss is logged before returning.
pub fn find_required<'a>(
    scope: ElementRef<'a>,
    query: &TagQuery,
) -> Result<ElementRef<'a>, ScrapeError> {
    find_first(scope, query).ok_or_else(|| {
        let err = ScrapeError::tag_not_found(query.name(), query.describe_filter());
        error!(error = %err, "required tag missing from page");
        err
    })
}
