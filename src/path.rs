//! Data paths and path-pattern predicates.
//!
//! A [`DataPath`] locates a value inside a payload as a sequence of components
//! (record field names, array indices, map keys). A [`PathPattern`] is compiled
//! from a textual path such as `/albums/*/id` and matches data paths purely by
//! their components, so it can be evaluated against locations that hold no
//! value yet (for example the target of a patch delete).
//!
//! # Examples
//!
//! ```rust
//! use mutability_validator::path::{DataPath, PathPattern};
//!
//! let pattern = PathPattern::compile("a/*/c", false);
//! assert!(pattern.matches(&["a", "b", "c"]));
//! assert!(!pattern.matches(&["a", "b", "d", "c"]));
//!
//! let subtree = PathPattern::compile("/a/b", true);
//! assert!(subtree.matches(DataPath::parse("/a/b/c/d").components()));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Separator between path components in textual paths.
pub const SEPARATOR: char = '/';

/// Path component that matches exactly one arbitrary component.
pub const WILDCARD: &str = "*";

/// Location of a value inside a payload.
///
/// The root of the payload is the empty path. Array elements are addressed by
/// their decimal index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPath(Vec<String>);

impl DataPath {
    /// The root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from its components.
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(components.into_iter().map(Into::into).collect())
    }

    /// Parse a textual path such as `/location/city`.
    ///
    /// Empty components (leading, trailing or doubled separators) are dropped.
    pub fn parse(path: &str) -> Self {
        Self(
            path.split(SEPARATOR)
                .filter(|component| !component.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The last component, i.e. the field name for record paths.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn push(&mut self, component: impl Into<String>) {
        self.0.push(component.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    /// A new path one level below this one.
    pub fn child(&self, component: impl Into<String>) -> Self {
        let mut components = Vec::with_capacity(self.0.len() + 1);
        components.extend(self.0.iter().cloned());
        components.push(component.into());
        Self(components)
    }

    /// Whether this path equals `prefix` or lies below it.
    pub fn starts_with(&self, prefix: &DataPath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{}", SEPARATOR);
        }
        for component in &self.0 {
            write!(f, "{}{}", SEPARATOR, component)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for DataPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl AsRef<[String]> for DataPath {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

/// One token of a compiled [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternToken {
    /// Matches a component equal to the literal.
    Literal(String),
    /// Matches any single component.
    AnyOne,
    /// Matches zero or more components.
    AnyZeroOrMore,
}

impl PatternToken {
    fn accepts(&self, component: &str) -> bool {
        match self {
            PatternToken::Literal(literal) => literal == component,
            PatternToken::AnyOne | PatternToken::AnyZeroOrMore => true,
        }
    }
}

/// A path with wildcards, compiled from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    tokens: Vec<PatternToken>,
}

impl PathPattern {
    /// Compile a textual path into a pattern.
    ///
    /// A single leading separator is discarded. Components equal to `*` become
    /// single-level wildcards. With `include_descendants` the pattern also
    /// matches every path below the one it names.
    pub fn compile(path: &str, include_descendants: bool) -> Self {
        let path = path.strip_prefix(SEPARATOR).unwrap_or(path);
        let mut tokens: Vec<PatternToken> = path
            .split(SEPARATOR)
            .map(|component| {
                if component == WILDCARD {
                    PatternToken::AnyOne
                } else {
                    PatternToken::Literal(component.to_string())
                }
            })
            .collect();
        if include_descendants {
            tokens.push(PatternToken::AnyZeroOrMore);
        }
        Self { tokens }
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    /// Whether `path` is matched by this pattern.
    pub fn matches<S: AsRef<str>>(&self, path: &[S]) -> bool {
        match_tokens(&self.tokens, path)
    }
}

fn match_tokens<S: AsRef<str>>(tokens: &[PatternToken], path: &[S]) -> bool {
    match tokens.split_first() {
        None => path.is_empty(),
        Some((PatternToken::AnyZeroOrMore, rest)) => {
            (0..=path.len()).any(|skipped| match_tokens(rest, &path[skipped..]))
        }
        Some((token, rest)) => match path.split_first() {
            Some((head, tail)) => token.accepts(head.as_ref()) && match_tokens(rest, tail),
            None => false,
        },
    }
}

/// Disjunction of compiled patterns.
///
/// A path satisfies the predicate when any of its patterns matches. The empty
/// predicate matches nothing. Cloning is cheap; the patterns are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPredicate {
    patterns: Arc<[PathPattern]>,
}

impl PathPredicate {
    /// The predicate that matches no path.
    pub fn never() -> Self {
        Self {
            patterns: Arc::from(Vec::new()),
        }
    }

    /// Combine patterns with logical OR.
    pub fn any_of<I: IntoIterator<Item = PathPattern>>(patterns: I) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }

    /// Compile every textual path and combine the results.
    pub fn compile_all<I, S>(paths: I, include_descendants: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::any_of(
            paths
                .into_iter()
                .map(|path| PathPattern::compile(path.as_ref(), include_descendants)),
        )
    }

    pub fn matches<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }

    pub fn patterns(&self) -> &[PathPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PathPredicate {
    fn default() -> Self {
        Self::never()
    }
}
