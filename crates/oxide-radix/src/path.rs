//! URL path normalization.
//!
//! These helpers know nothing about the routing tree. The dispatcher uses
//! them to build redirect targets, and callers may use them to canonicalize
//! paths before a lookup.

use std::borrow::Cow;

/// What [`clean_path_with`] does with a trailing slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingSlash {
    /// Keep a trailing slash if the input has one.
    #[default]
    Keep,
    /// Drop the trailing slash, except for the root path `/`.
    Strip,
}

/// Returns the canonical form of a URL path, keeping any trailing slash.
///
/// The following rules are applied until no further processing can be done:
/// 1. Replace multiple slashes with a single slash.
/// 2. Eliminate each `.` path name element (the current directory).
/// 3. Eliminate each inner `..` path name element (the parent directory)
///    along with the non-`..` element that precedes it.
/// 4. Eliminate `..` elements that begin a rooted path, that is, replace
///    `/..` by `/` at the beginning of a path.
///
/// The result always begins with `/`; an empty input yields `/`.
///
/// # Example
///
/// ```
/// use oxide_radix::clean_path;
///
/// assert_eq!(clean_path("/a//b/../c"), "/a/c");
/// assert_eq!(clean_path("users/./42/"), "/users/42/");
/// assert_eq!(clean_path(""), "/");
/// ```
#[must_use]
pub fn clean_path(path: &str) -> String {
    clean_path_with(path, TrailingSlash::Keep)
}

/// Like [`clean_path`], with explicit control over the trailing slash.
///
/// # Example
///
/// ```
/// use oxide_radix::{clean_path_with, TrailingSlash};
///
/// assert_eq!(clean_path_with("/a/b/", TrailingSlash::Strip), "/a/b");
/// assert_eq!(clean_path_with("/", TrailingSlash::Strip), "/");
/// ```
#[must_use]
pub fn clean_path_with(path: &str, mode: TrailingSlash) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let bytes = path.as_bytes();
    let n = bytes.len();
    let mut out = String::with_capacity(n + 1);
    out.push('/');

    // The leading slash is already written.
    let mut r = usize::from(bytes[0] == b'/');
    let mut trailing = n > 1 && bytes[n - 1] == b'/';

    while r < n {
        match bytes[r] {
            // Empty element; a trailing slash is re-added after the loop.
            b'/' => r += 1,
            b'.' if r + 1 == n => {
                trailing = true;
                r += 1;
            }
            b'.' if bytes[r + 1] == b'/' => r += 2,
            b'.' if bytes[r + 1] == b'.' && (r + 2 == n || bytes[r + 2] == b'/') => {
                r += 3;
                if out.len() > 1 {
                    let cut = out.rfind('/').unwrap_or(0).max(1);
                    out.truncate(cut);
                }
            }
            _ => {
                if out.len() > 1 {
                    out.push('/');
                }
                let start = r;
                while r < n && bytes[r] != b'/' {
                    r += 1;
                }
                out.push_str(&path[start..r]);
            }
        }
    }

    if trailing && mode == TrailingSlash::Keep && out.len() > 1 {
        out.push('/');
    }

    out
}

/// Returns `path` with its trailing slash removed if it has one, or with a
/// slash appended otherwise.
///
/// The root path `/` is returned unchanged.
#[must_use]
pub fn toggle_trailing_slash(path: &str) -> Cow<'_, str> {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => Cow::Borrowed(stripped),
        Some(_) => Cow::Borrowed(path),
        None => Cow::Owned(format!("{path}/")),
    }
}
