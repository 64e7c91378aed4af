//! Lexical orders over string keys.
//!
//! Each nesting level indexes the next four UTF-8 bytes of the key as a
//! big-endian `u32`, zero padded past the end of the key. Byte order of UTF-8
//! equals code point order, so the index order agrees with `str::cmp`.

use super::Order;
use std::cmp::Ordering;

/// Number of key bytes consumed per nesting level.
const CHUNK: usize = 4;

#[inline]
fn chunk_index(bytes: &[u8], from: usize, fold: bool) -> u32 {
    let mut index = 0u32;
    for i in 0..CHUNK {
        let byte = bytes.get(from + i).copied().unwrap_or(0);
        let byte = if fold { byte.to_ascii_lowercase() } else { byte };
        index = (index << 8) | u32::from(byte);
    }
    index
}

#[inline]
fn next_level(key: &[u8], from: usize) -> Option<usize> {
    // Keys with nothing past this chunk cannot be told apart any deeper.
    (key.len() > from + CHUNK).then_some(from + CHUNK)
}

/// Lexicographic order for any `AsRef<str>` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LexicalOrder {
    from: usize,
}

impl LexicalOrder {
    /// Root level order.
    pub const fn new() -> Self {
        Self { from: 0 }
    }

    /// Byte offset indexed by this level.
    pub fn level_offset(&self) -> usize {
        self.from
    }
}

impl<T: AsRef<str> + ?Sized> Order<T> for LexicalOrder {
    #[inline]
    fn index_of(&self, key: &T) -> u32 {
        chunk_index(key.as_ref().as_bytes(), self.from, false)
    }

    #[inline]
    fn are_equal(&self, left: &T, right: &T) -> bool {
        left.as_ref() == right.as_ref()
    }

    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.as_ref().as_bytes().cmp(right.as_ref().as_bytes())
    }

    #[inline]
    fn sub_order(&self, key: &T) -> Option<Self> {
        next_level(key.as_ref().as_bytes(), self.from).map(|from| Self { from })
    }
}

/// Lexicographic order ignoring ASCII case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CaseInsensitiveLexicalOrder {
    from: usize,
}

impl CaseInsensitiveLexicalOrder {
    /// Root level order.
    pub const fn new() -> Self {
        Self { from: 0 }
    }

    /// Byte offset indexed by this level.
    pub fn level_offset(&self) -> usize {
        self.from
    }
}

impl<T: AsRef<str> + ?Sized> Order<T> for CaseInsensitiveLexicalOrder {
    #[inline]
    fn index_of(&self, key: &T) -> u32 {
        chunk_index(key.as_ref().as_bytes(), self.from, true)
    }

    #[inline]
    fn are_equal(&self, left: &T, right: &T) -> bool {
        left.as_ref().eq_ignore_ascii_case(right.as_ref())
    }

    fn compare(&self, left: &T, right: &T) -> Ordering {
        let left = left.as_ref().as_bytes().iter().map(u8::to_ascii_lowercase);
        let right = right.as_ref().as_bytes().iter().map(u8::to_ascii_lowercase);
        left.cmp(right)
    }

    #[inline]
    fn sub_order(&self, key: &T) -> Option<Self> {
        next_level(key.as_ref().as_bytes(), self.from).map(|from| Self { from })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_index() {
        let order = LexicalOrder::new();
        assert_eq!(order.index_of("abcd"), u32::from_be_bytes(*b"abcd"));
        assert_eq!(order.index_of("ab"), u32::from_be_bytes([b'a', b'b', 0, 0]));
        assert_eq!(order.index_of(""), 0);
    }

    #[test]
    fn test_index_agrees_with_compare() {
        let order = LexicalOrder::new();
        let words = ["", "a", "ab", "abc", "abcd", "b", "ba", "zz", "é"];
        for x in &words {
            for y in &words {
                if order.index_of(x) < order.index_of(y) {
                    assert_eq!(order.compare(x, y), Ordering::Less, "{} vs {}", x, y);
                }
                assert_eq!(order.compare(x, y), x.cmp(y));
            }
        }
    }

    #[test]
    fn test_sub_order_deepens_then_stops() {
        let order = LexicalOrder::new();
        let key = "abcdefghij";
        let level1 = order.sub_order(key).unwrap();
        assert_eq!(level1.level_offset(), 4);
        assert_eq!(level1.index_of(key), u32::from_be_bytes(*b"efgh"));
        let level2 = level1.sub_order(key).unwrap();
        assert_eq!(level2.index_of(key), u32::from_be_bytes([b'i', b'j', 0, 0]));
        assert!(level2.sub_order(key).is_none());
        assert!(order.sub_order("abcd").is_none());
    }

    #[test]
    fn test_case_insensitive() {
        let order = CaseInsensitiveLexicalOrder::new();
        assert!(order.are_equal("Hello", "hELLO"));
        assert_eq!(order.index_of("ABCD"), order.index_of("abcd"));
        assert_eq!(order.compare("Apple", "banana"), Ordering::Less);
        assert_eq!(order.compare("apple", "APPLE"), Ordering::Equal);
    }
}
