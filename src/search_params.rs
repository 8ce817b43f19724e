use crate::compat::{String, ToString, Vec};
use crate::form_urlencoded;
use crate::url::Url;
use core::fmt;
use core::ops::{Deref, DerefMut};

/// An ordered list of (name, value) query parameters.
///
/// Names and values are stored decoded; serialization applies the
/// application/x-www-form-urlencoded format. A standalone container is
/// detached; [`Url::search_params_mut`] hands out a view whose mutations
/// are written back into the owning URL's query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSearchParams {
    list: Vec<(String, String)>,
}

impl UrlSearchParams {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// Parse from a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            list: form_urlencoded::parse(query.as_bytes()),
        }
    }

    /// Number of (name, value) pairs.
    pub fn size(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.list.push((name.to_string(), value.to_string()));
    }

    /// Delete every pair with the given name; with `value` supplied, only
    /// pairs matching both.
    pub fn delete(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => self.list.retain(|(n, v)| n != name || v != value),
            None => self.list.retain(|(n, _)| n != name),
        }
    }

    /// First value for a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.list
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a name, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.list
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Check for a name; with `value` supplied, for the exact pair.
    pub fn has(&self, name: &str, value: Option<&str>) -> bool {
        match value {
            Some(value) => self.list.iter().any(|(n, v)| n == name && v == value),
            None => self.list.iter().any(|(n, _)| n == name),
        }
    }

    /// Overwrite the first pair with the given name in place and drop the
    /// rest; append if the name is not present.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut found_first = false;
        self.list.retain_mut(|(n, v)| {
            if n != name {
                return true;
            }
            if found_first {
                return false;
            }
            found_first = true;
            *v = value.to_string();
            true
        });
        if !found_first {
            self.list.push((name.to_string(), value.to_string()));
        }
    }

    /// Stable sort by name. Names compare by UTF-16 code units, matching
    /// JavaScript string order: supplementary-plane characters sort by
    /// their surrogates, below U+E000..U+FFFF.
    pub fn sort(&mut self) {
        self.list
            .sort_by(|a, b| a.0.encode_utf16().cmp(b.0.encode_utf16()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.list.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Iterate over all pairs (alias for `iter`, matches the WHATWG API).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for UrlSearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&form_urlencoded::serialize(self.iter()))
    }
}

impl From<&str> for UrlSearchParams {
    fn from(query: &str) -> Self {
        Self::parse(query)
    }
}

impl From<String> for UrlSearchParams {
    fn from(query: String) -> Self {
        Self::parse(&query)
    }
}

/// Sequences of pairs coerce directly; string-keyed maps coerce through
/// their iterators.
impl<N: AsRef<str>, V: AsRef<str>> FromIterator<(N, V)> for UrlSearchParams {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(pairs: I) -> Self {
        Self {
            list: pairs
                .into_iter()
                .map(|(n, v)| (n.as_ref().to_string(), v.as_ref().to_string()))
                .collect(),
        }
    }
}

impl<N: AsRef<str>, V: AsRef<str>> Extend<(N, V)> for UrlSearchParams {
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, pairs: I) {
        self.list.extend(
            pairs
                .into_iter()
                .map(|(n, v)| (n.as_ref().to_string(), v.as_ref().to_string())),
        );
    }
}

/// A mutable view of a URL's search parameters.
///
/// Dereferences to [`UrlSearchParams`]; when dropped, the list is
/// re-serialized into the owning URL's query (cleared when the serialized
/// form is empty). The borrow ties the view's lifetime to the URL, so the
/// back-reference can never dangle.
pub struct SearchParamsMut<'a> {
    url: &'a mut Url,
    params: UrlSearchParams,
}

impl<'a> SearchParamsMut<'a> {
    pub(crate) fn new(url: &'a mut Url) -> Self {
        let params = UrlSearchParams::parse(url.query_str());
        Self { url, params }
    }
}

impl Deref for SearchParamsMut<'_> {
    type Target = UrlSearchParams;

    fn deref(&self) -> &UrlSearchParams {
        &self.params
    }
}

impl DerefMut for SearchParamsMut<'_> {
    fn deref_mut(&mut self) -> &mut UrlSearchParams {
        &mut self.params
    }
}

impl Drop for SearchParamsMut<'_> {
    fn drop(&mut self) {
        self.url.commit_search_params(&self.params);
    }
}
