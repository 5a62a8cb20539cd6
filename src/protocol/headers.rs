use std::fmt::Display;

use indexmap::{IndexMap, map::Entry};

use crate::error::OddArgumentCount;

/// Ordered header mapping.
///
/// Keys are unique and the first insertion of a key wins: later values for
/// the same key are dropped, matching how repeated header lines are read off
/// the wire. Iteration follows insertion order; equality does not depend
/// on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, String>,
}

impl Headers {
    pub fn new() -> Self { Self::default() }

    /// Inserts `key` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.entries.entry(key.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> { self.entries.get(key).map(String::as_str) }

    pub fn contains(&self, key: &str) -> bool { self.entries.contains_key(key) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> { self.entries.iter().map(as_pair) }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.entries.keys().map(String::as_str) }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        indexmap::map::Iter<'a, String, String>,
        fn((&'a String, &'a String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(as_pair as fn((&'a String, &'a String)) -> (&'a str, &'a str))
    }
}

fn as_pair<'a>((k, v): (&'a String, &'a String)) -> (&'a str, &'a str) { (k.as_str(), v.as_str()) }

/// Builds headers from a flat `key, value, key, value, ...` list.
///
/// Values may be anything printable, e.g.
/// `headers(&[&"content-length", &8, &"receipt", &"r-1"])`.
pub fn headers(args: &[&dyn Display]) -> Result<Headers, OddArgumentCount> {
    if args.len() % 2 != 0 {
        tracing::trace!(count = args.len(), "unpaired header arguments");
        return Err(OddArgumentCount(args.len()));
    }

    Ok(args
        .chunks_exact(2)
        .map(|pair| (pair[0].to_string(), pair[1].to_string()))
        .collect())
}
