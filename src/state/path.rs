//! Property paths into nested state.
//!
//! Dotted/indexed notation: `user.address.city`, `items[2].title`.
//! Empty segments are skipped; a `[n]` segment is a list index.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

/// One step of a [`Path`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// Segment as a map key (indices are stringified)
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            Segment::Key(k) => Cow::Borrowed(k),
            Segment::Index(i) => Cow::Owned(i.to_string()),
        }
    }

    /// Segment as a list index (numeric keys are accepted)
    pub fn index(&self) -> Option<usize> {
        match self {
            Segment::Key(k) => k.parse().ok(),
            Segment::Index(i) => Some(*i),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => f.write_str(k),
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Sequence of segments from the state root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(SmallVec<[Segment; 4]>);

impl Path {
    /// The empty path (state root)
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse dotted/indexed notation
    pub fn parse(s: &str) -> Self {
        let segments = s
            .split(['.', '['])
            .filter(|part| !part.is_empty())
            .map(|part| match part.strip_suffix(']') {
                Some(inner) => inner
                    .parse()
                    .map(Segment::Index)
                    .unwrap_or_else(|_| Segment::Key(inner.to_string())),
                None => Segment::Key(part.to_string()),
            })
            .collect();
        Self(segments)
    }

    /// Segments in order
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Check if this is the root path
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment and the path leading to it
    pub fn split_last(&self) -> Option<(&Segment, &[Segment])> {
        self.0.split_last()
    }

    /// Append a segment (builder style)
    pub fn push(mut self, segment: Segment) -> Self {
        self.0.push(segment);
        self
    }

    /// `self` followed by `other`
    pub fn join(&self, other: &Path) -> Path {
        let mut joined = self.clone();
        joined.0.extend(other.0.iter().cloned());
        joined
    }

    pub(crate) fn display_segments(segments: &[Segment]) -> String {
        let mut out = String::new();
        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Index(n) => out.push_str(&format!("[{n}]")),
                Segment::Key(k) => {
                    if i > 0 {
                        out.push('.');
                    }
                    out.push_str(k);
                }
            }
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::display_segments(&self.0))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::parse(s)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_notation() {
        let path = Path::parse("items[2].title");
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("items".into()),
                Segment::Index(2),
                Segment::Key("title".into()),
            ]
        );
        assert_eq!(path.to_string(), "items[2].title");
    }

    #[test]
    fn test_parse_skips_empty_segments() {
        assert_eq!(Path::parse(".a..b"), Path::parse("a.b"));
        assert!(Path::parse("").is_empty());
        assert_eq!(Path::parse("[0][1]").segments(), &[Segment::Index(0), Segment::Index(1)]);
    }

    #[test]
    fn test_non_numeric_bracket_is_key() {
        assert_eq!(Path::parse("a[b]").segments(), &[Segment::Key("a".into()), Segment::Key("b".into())]);
    }

    #[test]
    fn test_segment_conversions() {
        assert_eq!(Segment::Index(3).key(), "3");
        assert_eq!(Segment::Key("7".into()).index(), Some(7));
        assert_eq!(Segment::Key("x".into()).index(), None);
    }

    #[test]
    fn test_join_and_split() {
        let joined = Path::parse("a").join(&Path::parse("b[1]"));
        assert_eq!(joined.to_string(), "a.b[1]");
        let (last, parent) = joined.split_last().unwrap();
        assert_eq!(last, &Segment::Index(1));
        assert_eq!(Path::display_segments(parent), "a.b");
    }
}
