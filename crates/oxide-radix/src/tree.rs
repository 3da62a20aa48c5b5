//! Compressed radix tree holding the routes of one HTTP method.
//!
//! Each node stores a byte prefix. Static children are found through
//! `indices`, a table of their first bytes kept parallel to the front of
//! `children`. A node has at most one wild child (`:param` or `*catchall`),
//! always stored last. On lookup static children are tried first; the wild
//! child is only consulted when no static branch leads to a route.

use std::mem;

use crate::error::{Result, RouterError};
use crate::params::Params;
use crate::path::toggle_trailing_slash;

/// The kind of path segment a node matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Matches its prefix literally.
    #[default]
    Static,
    /// Matches one non-empty segment, up to the next `/`.
    Param,
    /// Matches the rest of the path, slashes included.
    CatchAll,
}

/// Outcome of [`Node::get_value`].
#[derive(Debug)]
pub struct Found<'n, T> {
    /// The value bound to the matched pattern, if any.
    pub value: Option<&'n T>,
    /// `true` when there is no match but the same path with its trailing
    /// slash added or removed would match.
    pub trailing_slash_redirect: bool,
}

/// A node of the routing tree.
#[derive(Debug)]
pub struct Node<T> {
    prefix: Vec<u8>,
    kind: NodeKind,
    indices: Vec<u8>,
    wild_child: bool,
    children: Vec<Node<T>>,
    priority: u32,
    value: Option<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            prefix: Vec::new(),
            kind: NodeKind::Static,
            indices: Vec::new(),
            wild_child: false,
            children: Vec::new(),
            priority: 0,
            value: None,
        }
    }
}

impl<T> Node<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing was ever inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.children.is_empty() && self.value.is_none()
    }

    /// Returns the kind of segment this node matches.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the number of routes registered through this node.
    #[must_use]
    pub const fn priority(&self) -> u32 {
        self.priority
    }

    fn wild(&self) -> Option<&Self> {
        if self.wild_child {
            self.children.last()
        } else {
            None
        }
    }

    fn static_child(&self, byte: u8) -> Option<&Self> {
        self.indices
            .iter()
            .position(|&b| b == byte)
            .map(|i| &self.children[i])
    }

    /// Name of a `:param` or `*catchall` node, without its sigil.
    fn wildcard_name(&self) -> String {
        String::from_utf8_lossy(self.prefix.get(1..).unwrap_or_default()).into_owned()
    }

    /// Registers `value` under `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern does not begin with `/` or is
    /// malformed, if a wildcard conflicts with the wildcard already
    /// registered at the same position, or if the pattern is already
    /// registered. On error the tree is left untouched.
    pub fn insert(&mut self, pattern: &str, value: T) -> Result<()> {
        if !pattern.starts_with('/') {
            return Err(RouterError::InvalidPattern(pattern.to_string()));
        }
        validate_wildcards(pattern.as_bytes(), pattern)?;
        self.check_conflicts(pattern)?;

        let mut path = pattern.as_bytes();
        let mut node = self;
        node.priority += 1;

        if node.is_empty() {
            node.insert_child(path, value);
            return Ok(());
        }

        loop {
            let i = longest_common_prefix(path, &node.prefix);
            if i < node.prefix.len() {
                node.split(i);
            }

            if i == path.len() {
                if node.value.is_some() {
                    return Err(RouterError::DuplicateRoute(pattern.to_string()));
                }
                node.value = Some(value);
                return Ok(());
            }

            path = &path[i..];
            let c = path[0];

            if c == b':' || c == b'*' {
                if !node.wild_child {
                    node.attach_wild(path, value);
                    return Ok(());
                }

                let wildcard = &path[..segment_end(path, 0)];
                let pos = node.children.len() - 1;
                if node.children[pos].prefix != wildcard {
                    return Err(RouterError::WildcardConflict {
                        segment: String::from_utf8_lossy(wildcard).into_owned(),
                        pattern: pattern.to_string(),
                        existing: String::from_utf8_lossy(&node.children[pos].prefix)
                            .into_owned(),
                    });
                }
                node.children[pos].priority += 1;
                node = &mut node.children[pos];
                continue;
            }

            if let Some(pos) = node.indices.iter().position(|&b| b == c) {
                let pos = node.increment_child_priority(pos);
                node = &mut node.children[pos];
                continue;
            }

            node.indices.push(c);
            let pos = node.indices.len() - 1;
            node.children.insert(pos, Self::default());
            let pos = node.increment_child_priority(pos);
            node.children[pos].insert_child(path, value);
            return Ok(());
        }
    }

    /// Walks `pattern` down the tree without changing it and reports the
    /// conflict [`Node::insert`] would run into.
    fn check_conflicts(&self, pattern: &str) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        let mut path = pattern.as_bytes();
        let mut node = self;
        loop {
            let i = longest_common_prefix(path, &node.prefix);
            // Branching off inside an edge always creates a fresh subtree.
            if i < node.prefix.len() {
                return Ok(());
            }
            if i == path.len() {
                if node.value.is_some() {
                    return Err(RouterError::DuplicateRoute(pattern.to_string()));
                }
                return Ok(());
            }

            path = &path[i..];
            let c = path[0];

            if c == b':' || c == b'*' {
                let Some(wild) = node.wild() else {
                    return Ok(());
                };
                let wildcard = &path[..segment_end(path, 0)];
                if wild.prefix != wildcard {
                    return Err(RouterError::WildcardConflict {
                        segment: String::from_utf8_lossy(wildcard).into_owned(),
                        pattern: pattern.to_string(),
                        existing: String::from_utf8_lossy(&wild.prefix).into_owned(),
                    });
                }
                node = wild;
                continue;
            }

            match node.static_child(c) {
                Some(child) => node = child,
                None => return Ok(()),
            }
        }
    }

    /// Bumps the priority of a static child and moves it ahead of siblings
    /// with a lower priority. Returns the child's new position.
    fn increment_child_priority(&mut self, pos: usize) -> usize {
        self.children[pos].priority += 1;
        let priority = self.children[pos].priority;

        let mut new_pos = pos;
        while new_pos > 0 && self.children[new_pos - 1].priority < priority {
            self.children.swap(new_pos - 1, new_pos);
            self.indices.swap(new_pos - 1, new_pos);
            new_pos -= 1;
        }
        new_pos
    }

    /// Splits this static node so that it keeps the first `at` bytes of its
    /// prefix and a single child takes over the rest, along with everything
    /// that was attached to it.
    fn split(&mut self, at: usize) {
        let child = Self {
            prefix: self.prefix.split_off(at),
            kind: NodeKind::Static,
            indices: mem::take(&mut self.indices),
            wild_child: mem::replace(&mut self.wild_child, false),
            children: mem::take(&mut self.children),
            priority: self.priority.saturating_sub(1),
            value: self.value.take(),
        };
        self.indices = vec![child.prefix[0]];
        self.children = vec![child];
    }

    /// Fills a fresh node with the remainder of a pattern.
    fn insert_child(&mut self, path: &[u8], value: T) {
        match find_wildcard(path) {
            Some(start) => {
                self.prefix = path[..start].to_vec();
                self.attach_wild(&path[start..], value);
            }
            None => {
                self.prefix = path.to_vec();
                self.value = Some(value);
            }
        }
    }

    /// Adds a wild child for the wildcard that `path` starts with.
    fn attach_wild(&mut self, path: &[u8], value: T) {
        let (wildcard, rest) = path.split_at(segment_end(path, 0));
        let kind = if wildcard[0] == b'*' {
            NodeKind::CatchAll
        } else {
            NodeKind::Param
        };

        let mut child = Self {
            prefix: wildcard.to_vec(),
            kind,
            priority: 1,
            ..Self::default()
        };

        if rest.is_empty() {
            child.value = Some(value);
        } else {
            // Only params get here: a catch-all always ends its pattern.
            let mut next = Self {
                priority: 1,
                ..Self::default()
            };
            next.insert_child(rest, value);
            child.indices.push(rest[0]);
            child.children.push(next);
        }

        self.wild_child = true;
        self.children.push(child);
    }

    /// Returns the value registered for `path`, appending the extracted
    /// parameters to `params`.
    ///
    /// On a miss, `params` is left as it was.
    pub fn at<'n>(&'n self, path: &str, params: &mut Params) -> Option<&'n T> {
        let bytes = path.as_bytes();
        let base = params.len();
        let mut node = self;
        let mut off = 0;
        // Wild children passed over in favour of a static child, with the
        // offset and parameter count to resume from.
        let mut skipped: Vec<(&'n Self, usize, usize)> = Vec::new();

        loop {
            match node.kind {
                NodeKind::Static => {
                    if bytes[off..].starts_with(&node.prefix) {
                        off += node.prefix.len();
                        match bytes.get(off) {
                            None => {
                                if let Some(value) = &node.value {
                                    return Some(value);
                                }
                                if let Some(wild) = node.wild() {
                                    if wild.kind == NodeKind::CatchAll {
                                        node = wild;
                                        continue;
                                    }
                                }
                            }
                            Some(&c) => {
                                let wild = node.wild();
                                if let Some(child) = node.static_child(c) {
                                    if let Some(wild) = wild {
                                        skipped.push((wild, off, params.len()));
                                    }
                                    node = child;
                                    continue;
                                }
                                if let Some(wild) = wild {
                                    node = wild;
                                    continue;
                                }
                            }
                        }
                    }
                }
                NodeKind::Param => {
                    let end = segment_end(bytes, off);
                    if end > off {
                        let value = String::from_utf8_lossy(&bytes[off..end]);
                        params.push(node.wildcard_name(), value);
                        off = end;
                        if off == bytes.len() {
                            if let Some(value) = &node.value {
                                return Some(value);
                            }
                        } else if let Some(child) = node.static_child(b'/') {
                            node = child;
                            continue;
                        }
                    }
                }
                NodeKind::CatchAll => {
                    if let Some(value) = &node.value {
                        // The value keeps the slash that precedes the catch-all.
                        let start = off.saturating_sub(1);
                        let rest = String::from_utf8_lossy(&bytes[start..]);
                        params.push(node.wildcard_name(), rest);
                        return Some(value);
                    }
                }
            }

            let Some((wild, resume, len)) = skipped.pop() else {
                params.truncate(base);
                return None;
            };
            params.truncate(len);
            node = wild;
            off = resume;
        }
    }

    /// Looks up `path`, and on a miss reports whether toggling its trailing
    /// slash would produce a match.
    pub fn get_value<'n>(&'n self, path: &str, params: &mut Params) -> Found<'n, T> {
        if let Some(value) = self.at(path, params) {
            return Found {
                value: Some(value),
                trailing_slash_redirect: false,
            };
        }

        let toggled = toggle_trailing_slash(path);
        let trailing_slash_redirect = toggled != path && {
            let len = params.len();
            let hit = self.at(&toggled, params).is_some();
            params.truncate(len);
            hit
        };

        Found {
            value: None,
            trailing_slash_redirect,
        }
    }

    /// Makes a case-insensitive lookup of `path` and returns the path with
    /// the casing it was registered with.
    ///
    /// Only ASCII letters are folded; other bytes, including every byte of
    /// a non-ASCII character, must match exactly, so `/\u{fc}ber` does not
    /// recover `/\u{dc}ber`.
    ///
    /// Parameter values are copied from the input as they are. When
    /// `fix_trailing_slash` is set and the path as given has no match, the
    /// same path with its trailing slash toggled is tried as well.
    #[must_use]
    pub fn find_case_insensitive_path(
        &self,
        path: &str,
        fix_trailing_slash: bool,
    ) -> Option<String> {
        if let Some(found) = self.find_case_insensitive(path) {
            return Some(found);
        }
        if !fix_trailing_slash {
            return None;
        }
        let toggled = toggle_trailing_slash(path);
        if toggled == path {
            return None;
        }
        self.find_case_insensitive(&toggled)
    }

    fn find_case_insensitive(&self, path: &str) -> Option<String> {
        let bytes = path.as_bytes();
        let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 1);
        // Depth-first: (node, input offset, output length) frames.
        let mut stack: Vec<(&Self, usize, usize)> = vec![(self, 0, 0)];

        while let Some((node, off, len)) = stack.pop() {
            out.truncate(len);
            let rest = &bytes[off..];

            match node.kind {
                NodeKind::Static => {
                    let n = node.prefix.len();
                    if rest.len() < n || !rest[..n].eq_ignore_ascii_case(&node.prefix) {
                        continue;
                    }
                    out.extend_from_slice(&node.prefix);
                    let off = off + n;

                    let Some(&c) = bytes.get(off) else {
                        let catch_all = node.wild().is_some_and(|w| w.kind == NodeKind::CatchAll);
                        if node.value.is_some() || catch_all {
                            return String::from_utf8(out).ok();
                        }
                        continue;
                    };

                    // Frames pushed last are explored first: exact byte
                    // before folded byte, and both before the wild child.
                    if let Some(wild) = node.wild() {
                        stack.push((wild, off, out.len()));
                    }
                    for (i, &b) in node.indices.iter().enumerate() {
                        if b != c && b.eq_ignore_ascii_case(&c) {
                            stack.push((&node.children[i], off, out.len()));
                        }
                    }
                    if let Some(child) = node.static_child(c) {
                        stack.push((child, off, out.len()));
                    }
                }
                NodeKind::Param => {
                    let end = segment_end(bytes, off);
                    if end == off {
                        continue;
                    }
                    out.extend_from_slice(&bytes[off..end]);
                    if end == bytes.len() {
                        if node.value.is_some() {
                            return String::from_utf8(out).ok();
                        }
                    } else if let Some(child) = node.static_child(b'/') {
                        stack.push((child, end, out.len()));
                    }
                }
                NodeKind::CatchAll => {
                    if node.value.is_some() {
                        out.extend_from_slice(rest);
                        return String::from_utf8(out).ok();
                    }
                }
            }
        }

        None
    }

    /// Returns every value stored in the tree.
    #[must_use]
    pub fn values(&self) -> Vec<&T> {
        let mut values = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(value) = &node.value {
                values.push(value);
            }
            stack.extend(node.children.iter());
        }
        values
    }
}

fn longest_common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Offset of the next `/` at or after `from`, or the length of `bytes`.
fn segment_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'/')
        .map_or(bytes.len(), |p| from + p)
}

/// Offset of the first wildcard in `path`.
fn find_wildcard(path: &[u8]) -> Option<usize> {
    path.iter().position(|&b| b == b':' || b == b'*')
}

/// Checks every wildcard of a pattern before the tree is touched.
fn validate_wildcards(bytes: &[u8], pattern: &str) -> Result<()> {
    let mut names: Vec<&[u8]> = Vec::new();
    let mut offset = 0;
    while let Some(found) = find_wildcard(&bytes[offset..]) {
        let start = offset + found;
        let end = segment_end(bytes, start);
        let wildcard = &bytes[start..end];

        if wildcard[1..].iter().any(|&b| b == b':' || b == b'*') {
            return Err(RouterError::MultipleWildcards {
                segment: String::from_utf8_lossy(wildcard).into_owned(),
                pattern: pattern.to_string(),
            });
        }
        if wildcard.len() < 2 {
            return Err(RouterError::EmptyWildcardName(pattern.to_string()));
        }
        if wildcard[0] == b'*' {
            if end != bytes.len() {
                return Err(RouterError::CatchAllNotLast(pattern.to_string()));
            }
            if start == 0 || bytes[start - 1] != b'/' {
                return Err(RouterError::CatchAllWithoutSlash(pattern.to_string()));
            }
        }
        if names.contains(&&wildcard[1..]) {
            return Err(RouterError::DuplicateParamName {
                name: String::from_utf8_lossy(&wildcard[1..]).into_owned(),
                pattern: pattern.to_string(),
            });
        }
        names.push(&wildcard[1..]);

        offset = end;
    }
    Ok(())
}
