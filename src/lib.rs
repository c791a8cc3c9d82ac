//! Knuth–Morris–Pratt substring search.
//!
//! The `&str` functions compare Unicode code points and report offsets in code points, not bytes.
//! The slice functions work on any `PartialEq` element type.
//!
//! ```
//! assert_eq!(kmpsearch::search("ABC ABCDAB ABCDABCDABDE", "ABCDABD"), vec![15]);
//! assert_eq!(kmpsearch::search("aaaa", "aaa"), vec![0, 1]);
//! ```
//!
//! An empty pattern never matches. [`Finder::new`] rejects it outright.
use std::ops::Range;

mod kmp;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("pattern must not be empty")]
    EmptyPattern,
}

/// Builds the failure table for `pattern`: `pattern.len() + 1` entries, or none for an empty
/// pattern.
///
/// ```
/// use kmpsearch::build_failure_table;
/// assert_eq!(build_failure_table(b"abfgabh"), vec![-1, 0, 0, 0, -1, 0, 2, 0]);
/// assert!(build_failure_table::<u8>(&[]).is_empty());
/// ```
pub fn build_failure_table<T: PartialEq>(pattern: &[T]) -> Vec<isize> {
    let table = kmp::table(pattern);
    log::debug!("built failure table with {} entries", table.len());
    table
}

/// [`build_failure_table`] over the code points of `pattern`.
pub fn failure_table(pattern: &str) -> Vec<isize> {
    build_failure_table(&pattern.chars().collect::<Vec<_>>())
}

/// Start offsets of every occurrence of `pattern` in `text`, overlapping ones included.
///
/// ```
/// use kmpsearch::search_slice;
/// assert_eq!(search_slice(&[1, 2, 1, 2, 1], &[1, 2, 1]), vec![0, 2]);
/// ```
pub fn search_slice<T: PartialEq>(text: &[T], pattern: &[T]) -> Vec<usize> {
    if text.is_empty() || pattern.is_empty() {
        return vec![];
    }
    let table = build_failure_table(pattern);
    let positions = kmp::search(text, pattern, &table);
    log::debug!("{} matches in {} elements", positions.len(), text.len());
    positions
}

/// Code-point offsets of every occurrence of `pattern` in `text`.
///
/// ```
/// use kmpsearch::search;
/// assert_eq!(search("this is simple test text... other test text", "text"), vec![20, 39]);
/// assert!(search("", "test").is_empty());
/// ```
pub fn search(text: &str, pattern: &str) -> Vec<usize> {
    if text.is_empty() {
        return vec![];
    }
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    search_slice(&text, &pattern)
}

/// A pattern prepared for searching: its code points and failure table, built once.
#[derive(Debug, Clone)]
pub struct Finder {
    pattern: Vec<char>,
    table: Vec<isize>,
}

impl Finder {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        if pattern.is_empty() {
            return Err(Error::EmptyPattern);
        }
        let pattern: Vec<char> = pattern.chars().collect();
        let table = build_failure_table(&pattern);
        Ok(Self { pattern, table })
    }

    pub fn pattern(&self) -> &[char] {
        &self.pattern
    }

    /// The failure table, never empty.
    pub fn table(&self) -> &[isize] {
        &self.table
    }

    /// Lazily yields the code-point offsets of every match in `text`.
    pub fn find_iter(&self, text: &str) -> FindIter<'_> {
        FindIter {
            finder: self,
            text: text.chars().collect(),
            cursor: kmp::Cursor::default(),
        }
    }

    pub fn find_all(&self, text: &str) -> Vec<usize> {
        self.find_iter(text).collect()
    }
}

/// Iterator returned by [`Finder::find_iter`].
pub struct FindIter<'f> {
    finder: &'f Finder,
    text: Vec<char>,
    cursor: kmp::Cursor,
}

impl Iterator for FindIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let offset = self
            .cursor
            .next_match(&self.text, &self.finder.pattern, &self.finder.table)?;
        log::trace!("match at code point {offset}");
        Some(offset)
    }
}

/// Converts code-point match offsets into byte ranges of `text`, each `pattern_len` code points
/// long. Offsets that do not fit in `text` are skipped.
///
/// ```
/// let text = "żółw żółw";
/// let offsets = kmpsearch::search(text, "łw");
/// assert_eq!(kmpsearch::byte_spans(text, 2, &offsets), vec![4..7, 12..15]);
/// ```
pub fn byte_spans(text: &str, pattern_len: usize, offsets: &[usize]) -> Vec<Range<usize>> {
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .collect();
    offsets
        .iter()
        .filter_map(|&offset| {
            let start = *bounds.get(offset)?;
            let end = *bounds.get(offset.checked_add(pattern_len)?)?;
            Some(start..end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{byte_spans, failure_table, search, search_slice, Error, Finder};

    #[test]
    fn standard_test_1() {
        assert_eq!(search("ABC ABCDAB ABCDABCDABDE", "ABCDABD"), vec![15]);
    }

    #[test]
    fn standard_test_2() {
        assert_eq!(
            search("this is simple test text... other test text", "text"),
            vec![20, 39]
        );
    }

    #[test]
    fn standard_test_3() {
        assert_eq!(
            search("Aaaaaaaaaaaaaab aaaaa", "Aaaaaaaaaaaaaaa"),
            Vec::<usize>::new()
        );
    }

    #[test]
    fn text_is_empty() {
        assert_eq!(search("", "test"), Vec::<usize>::new());
        assert_eq!(search("", ""), Vec::<usize>::new());
    }

    #[test]
    fn pattern_is_empty() {
        assert_eq!(search("abc", ""), Vec::<usize>::new());
        assert_eq!(search_slice(&[1, 2], &[]), Vec::<usize>::new());
    }

    #[test]
    fn failure_tables() {
        assert_eq!(failure_table("abfgabh"), vec![-1, 0, 0, 0, -1, 0, 2, 0]);
        assert_eq!(
            failure_table("abcdabcdabcd"),
            vec![-1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, 8]
        );
        assert!(failure_table("").is_empty());
    }

    #[test]
    fn finder_rejects_empty_pattern() {
        assert!(matches!(Finder::new(""), Err(Error::EmptyPattern)));
    }

    #[test]
    fn finder_reuses_table() {
        let finder = Finder::new("text").unwrap();
        assert_eq!(finder.pattern(), &['t', 'e', 'x', 't']);
        assert_eq!(finder.table(), &[-1, 0, 0, -1, 1]);
        assert_eq!(
            finder.find_all("this is simple test text... other test text"),
            vec![20, 39]
        );
        assert_eq!(finder.find_all("texttext"), vec![0, 4]);
        assert_eq!(finder.find_all(""), Vec::<usize>::new());
    }

    #[test]
    fn finder_iterates_lazily() {
        let finder = Finder::new("aa").unwrap();
        let mut it = finder.find_iter("aaaa");
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn finder_matches_search() {
        let text = "abracadabra abracadabra";
        for pattern in ["a", "abra", "cad", "ra a", "z"] {
            let finder = Finder::new(pattern).unwrap();
            assert_eq!(finder.find_all(text), search(text, pattern), "{pattern}");
        }
    }

    #[test]
    fn finder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Finder>();
    }

    #[test]
    fn spans_of_ascii_text() {
        let text = "ABC ABCDAB ABCDABCDABDE";
        assert_eq!(byte_spans(text, 7, &search(text, "ABCDABD")), vec![15..22]);
    }

    #[test]
    fn spans_skip_out_of_range_offsets() {
        assert_eq!(byte_spans("abc", 2, &[0, 1, 2, 5]), vec![0..2, 1..3]);
    }
}
