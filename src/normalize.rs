//! Path normalization.
//!
//! A path is split into segments held in a single buffer, with every
//! separating slash overwritten by a terminator. Dot segments are removed
//! by tombstoning their entries in the segment index, and the surviving
//! segments are finally compacted in place.

use crate::imp::{Components, Uri, UriRef};
use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};

// Never appears in UTF-8.
const TERM: u8 = 0xff;

/// Checks whether a path needs normalization.
///
/// Returns `None` if the path has no `"."` or `".."` segment and no
/// redundant slashes. Otherwise returns the number of segments in it,
/// not counting leading slashes.
///
/// # Examples
///
/// ```
/// use generic_uri::normalize::needs_normalization;
///
/// assert_eq!(needs_normalization("/a/b/"), None);
/// assert_eq!(needs_normalization("/a/./b"), Some(3));
/// assert_eq!(needs_normalization("a//b"), Some(2));
/// assert_eq!(needs_normalization("//a"), Some(1));
/// ```
#[must_use]
pub fn needs_normalization(path: &str) -> Option<usize> {
    let bytes = path.as_bytes();
    let n = bytes.len();
    let mut normal = true;
    let mut count = 0;

    let mut p = bytes.iter().take_while(|&&x| x == b'/').count();
    if p > 1 {
        normal = false;
    }

    while p < n {
        let end = bytes[p..]
            .iter()
            .position(|&x| x == b'/')
            .map_or(n, |i| p + i);
        if matches!(&bytes[p..end], b"." | b"..") {
            normal = false;
        }
        count += 1;

        p = end;
        if p < n {
            p += 1;
            while p < n && bytes[p] == b'/' {
                normal = false;
                p += 1;
            }
        }
    }

    (!normal).then_some(count)
}

/// Normalizes a path.
///
/// - Redundant slashes are collapsed, including leading ones.
/// - `"."` segments are removed.
/// - A `".."` segment is removed together with the closest preceding
///   segment that is still present, unless that is also `".."`.
///   Unmatched `".."` segments are kept.
/// - If the path is relative and its first remaining segment is not the
///   original first one and contains a colon, a `"."` segment is prepended.
///
/// A trailing slash is kept. The input is returned borrowed when nothing changes.
///
/// # Examples
///
/// ```
/// use generic_uri::normalize::normalize_path;
///
/// assert_eq!(normalize_path("/a/./b/../c"), "/a/c");
/// assert_eq!(normalize_path("a/b/.."), "a/");
/// assert_eq!(normalize_path("../a/.."), "../");
/// assert_eq!(normalize_path("a/../b:c"), "./b:c");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let Some(count) = needs_normalization(path) else {
        return Cow::Borrowed(path);
    };

    let mut segs = Segments::split(path, count);
    segs.remove_dots();
    segs.maybe_add_leading_dot();
    let out = segs.join();

    if out == path.as_bytes() {
        return Cow::Borrowed(path);
    }
    // Segments are copied whole, so the output stays valid UTF-8.
    match String::from_utf8(out) {
        Ok(s) => Cow::Owned(s),
        Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).to_string()),
    }
}

pub(crate) fn normalize(r: UriRef<'_, '_>) -> Uri<String> {
    let path = match r.path() {
        Some(path) if !path.is_empty() => path,
        _ => return r.to_owned(),
    };

    match normalize_path(path) {
        Cow::Borrowed(_) => r.to_owned(),
        Cow::Owned(path) => Components {
            scheme: r.scheme_str(),
            authority: r.authority(),
            path: &path,
            query: r.query(),
            fragment: r.fragment(),
        }
        .render(),
    }
}

enum SegKind {
    Dot,
    DoubleDot,
    Normal,
}

fn classify_segment(seg: &[u8]) -> SegKind {
    match seg {
        b"." => SegKind::Dot,
        b".." => SegKind::DoubleDot,
        _ => SegKind::Normal,
    }
}

/// A path split into segments.
struct Segments {
    buf: Vec<u8>,
    // Start of each segment, or `None` if removed.
    segs: Vec<Option<usize>>,
}

impl Segments {
    fn split(path: &str, count: usize) -> Self {
        let mut buf = path.as_bytes().to_vec();
        let mut segs = Vec::with_capacity(count);
        let n = buf.len();

        let mut p = 0;
        while p < n && buf[p] == b'/' {
            buf[p] = TERM;
            p += 1;
        }

        while p < n {
            segs.push(Some(p));
            while p < n && buf[p] != b'/' {
                p += 1;
            }
            while p < n && buf[p] == b'/' {
                buf[p] = TERM;
                p += 1;
            }
        }

        debug_assert_eq!(segs.len(), count);
        Segments { buf, segs }
    }

    fn text(&self, start: usize) -> &[u8] {
        let rest = &self.buf[start..];
        let len = rest.iter().position(|&x| x == TERM).unwrap_or(rest.len());
        &rest[..len]
    }

    fn is_absolute(&self) -> bool {
        self.buf.first() == Some(&TERM)
    }

    fn remove_dots(&mut self) {
        for i in 0..self.segs.len() {
            let Some(start) = self.segs[i] else {
                continue;
            };
            match classify_segment(self.text(start)) {
                SegKind::Dot => self.segs[i] = None,
                SegKind::DoubleDot => {
                    let Some(j) = self.segs[..i].iter().rposition(Option::is_some) else {
                        continue;
                    };
                    let Some(prev) = self.segs[j] else {
                        continue;
                    };
                    if !matches!(classify_segment(self.text(prev)), SegKind::DoubleDot) {
                        self.segs[i] = None;
                        self.segs[j] = None;
                    }
                }
                SegKind::Normal => {}
            }
        }
    }

    fn maybe_add_leading_dot(&mut self) {
        if self.is_absolute() {
            return;
        }
        let Some(first) = self.segs.iter().position(Option::is_some) else {
            return;
        };
        // The original first segment survived.
        if first == 0 {
            return;
        }
        let Some(start) = self.segs[first] else {
            return;
        };
        if !self.text(start).contains(&b':') {
            return;
        }

        // The first segment was removed, which leaves room for "." and a terminator.
        self.buf[0] = b'.';
        self.buf[1] = TERM;
        self.segs[0] = Some(0);
    }

    fn join(mut self) -> Vec<u8> {
        let n = self.buf.len();
        let mut p = 0;

        if self.is_absolute() {
            self.buf[0] = b'/';
            p = 1;
        }

        for &start in self.segs.iter().flatten() {
            debug_assert!(p <= start);
            let mut q = start;
            while q < n && self.buf[q] != TERM {
                self.buf[p] = self.buf[q];
                p += 1;
                q += 1;
            }
            if q < n {
                self.buf[p] = b'/';
                p += 1;
            }
        }

        self.buf.truncate(p);
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg_starts(path: &str) -> Vec<Option<usize>> {
        let count = needs_normalization(path).unwrap();
        let mut segs = Segments::split(path, count);
        segs.remove_dots();
        segs.segs
    }

    #[test]
    fn split_marks_slashes() {
        let segs = Segments::split("//a/b//c/", 3);
        assert_eq!(segs.segs, [Some(2), Some(4), Some(7)]);
        assert!(segs.is_absolute());
        assert_eq!(segs.text(2), b"a");
        assert_eq!(segs.text(7), b"c");
    }

    #[test]
    fn tombstones() {
        assert_eq!(seg_starts("a/./b"), [Some(0), None, Some(4)]);
        assert_eq!(seg_starts("a/b/../c"), [Some(0), None, None, Some(7)]);
        assert_eq!(seg_starts("../a"), [Some(0), Some(3)]);
        assert_eq!(seg_starts("a/../../b"), [None, None, Some(5), Some(8)]);
        assert_eq!(seg_starts("a/./.."), [None, None, None]);
    }

    #[test]
    fn leading_dot() {
        assert_eq!(normalize_path("a/../b:c/d"), "./b:c/d");
        assert_eq!(normalize_path("./b:c"), "./b:c");
        assert!(matches!(normalize_path("./b:c"), Cow::Borrowed(_)));
        // Not needed when the first segment survives.
        assert_eq!(normalize_path("b:c/./d"), "b:c/d");
        // Nor for absolute paths.
        assert_eq!(normalize_path("/a/../b:c"), "/b:c");
        // The colon must be in the first remaining segment.
        assert_eq!(normalize_path("a/../b/c:d"), "b/c:d");
    }

    #[test]
    fn borrowed_when_unchanged() {
        for path in ["", "/", "a", "/a/b/", "../a", "../../a/b", "a:b"] {
            assert!(matches!(normalize_path(path), Cow::Borrowed(_)), "{path}");
        }
        assert!(matches!(normalize_path("a/."), Cow::Owned(_)));
    }

    #[test]
    fn non_ascii_segments() {
        assert_eq!(normalize_path("/\u{e9}/./\u{3b1}\u{3b2}/../x"), "/\u{e9}/x");
    }
}
