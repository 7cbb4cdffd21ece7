//! Field paths.
//!
//! A [`FieldPath`] addresses one value inside a section: `heading`,
//! `values[2]`, `items[0].title`. The textual form doubles as the `name`
//! attribute of rendered form controls.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key.
    Key(String),
    /// List position.
    Index(usize),
}

/// Address of a value inside a section document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Path to a top-level key.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Key(key.into())],
        }
    }

    /// Parse the textual form (`items[0].title`).
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::path(text, "path is empty"));
        }

        let mut segments = Vec::new();
        let mut rest = text;
        let mut expect_key = true;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let end = after
                    .find(']')
                    .ok_or_else(|| Error::path(text, "unclosed '['"))?;
                let index = after[..end]
                    .parse::<usize>()
                    .map_err(|_| Error::path(text, format!("'{}' is not an index", &after[..end])))?;
                segments.push(Segment::Index(index));
                rest = &after[end + 1..];
                expect_key = false;
                continue;
            }

            if !expect_key {
                rest = rest
                    .strip_prefix('.')
                    .ok_or_else(|| Error::path(text, "expected '.' or '[' after an index"))?;
            }
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let key = &rest[..end];
            if key.is_empty() {
                return Err(Error::path(text, "empty key"));
            }
            segments.push(Segment::Key(key.to_string()));
            rest = &rest[end..];
            if let Some(after) = rest.strip_prefix('.') {
                if after.is_empty() {
                    return Err(Error::path(text, "trailing '.'"));
                }
                rest = after;
                expect_key = true;
            } else {
                expect_key = false;
            }
        }

        if !matches!(segments.first(), Some(Segment::Key(_))) {
            return Err(Error::path(text, "path must start with a key"));
        }
        Ok(Self { segments })
    }

    /// Extend with a key.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.into()));
        Self { segments }
    }

    /// Extend with an index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// The path without its last segment, or `None` for a top-level key.
    pub fn parent(&self) -> Option<Self> {
        match self.segments.len() {
            0 | 1 => None,
            n => Some(Self {
                segments: self.segments[..n - 1].to_vec(),
            }),
        }
    }

    /// The segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
