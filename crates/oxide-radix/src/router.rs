//! Route table: one radix tree per HTTP method.

use std::collections::HashMap;

use crate::error::{Result, RouterError};
use crate::method::Method;
use crate::options::RouterOptions;
use crate::params::Params;
use crate::route::Route;
use crate::tree::{Found, Node};

/// Result of [`Router::lookup`].
#[derive(Debug)]
pub struct Lookup<'r, H> {
    /// The matched route, if any.
    pub route: Option<&'r Route<H>>,
    /// Parameters extracted from the path, in pattern order. Empty on a miss.
    pub params: Params,
    /// `true` when there is no match but the path with its trailing slash
    /// toggled would match.
    pub trailing_slash_redirect: bool,
}

/// The route table.
///
/// Routes are registered during setup through `&mut self` or the consuming
/// builder methods. Once built, a router is only read, so it can be shared
/// between threads behind an `Arc` without locking.
#[derive(Debug)]
pub struct Router<H> {
    trees: HashMap<String, Node<Route<H>>>,
    options: RouterOptions,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Creates a new empty router with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(RouterOptions::default())
    }

    /// Creates a new empty router with the given options.
    #[must_use]
    pub fn with_options(options: RouterOptions) -> Self {
        Self {
            trees: HashMap::new(),
            options,
        }
    }

    /// Returns the dispatch options.
    #[must_use]
    pub const fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Registers `handler` for `method` and `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the method is empty, if the pattern does not
    /// begin with `/`, if the pattern is malformed or conflicts with a
    /// registered one, or if it is already registered for this method.
    pub fn try_handle(&mut self, method: &str, pattern: &str, handler: H) -> Result<()> {
        if method.is_empty() {
            return Err(RouterError::EmptyMethod);
        }

        let tree = self.trees.entry(method.to_string()).or_default();
        if let Err(err) = tree.insert(pattern, Route::new(method, pattern, handler)) {
            if tree.is_empty() {
                self.trees.remove(method);
            }
            return Err(err);
        }

        tracing::debug!(method, pattern, "registered route");
        Ok(())
    }

    /// Registers `handler` for `method` and `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if [`Router::try_handle`] fails. A bad route declaration is a
    /// bug in the application and setup cannot continue.
    pub fn handle(&mut self, method: &str, pattern: &str, handler: H) {
        if let Err(err) = self.try_handle(method, pattern, handler) {
            panic!("{err}");
        }
    }

    /// Adds a route for an arbitrary method.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Router::handle`].
    #[must_use]
    pub fn route(mut self, method: impl AsRef<str>, pattern: &str, handler: H) -> Self {
        self.handle(method.as_ref(), pattern, handler);
        self
    }

    /// Adds a GET route.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Router::handle`].
    #[must_use]
    pub fn get(self, pattern: &str, handler: H) -> Self {
        self.route(Method::Get, pattern, handler)
    }

    /// Adds a HEAD route.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Router::handle`].
    #[must_use]
    pub fn head(self, pattern: &str, handler: H) -> Self {
        self.route(Method::Head, pattern, handler)
    }

    /// Adds an OPTIONS route.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Router::handle`].
    #[must_use]
    pub fn options_route(self, pattern: &str, handler: H) -> Self {
        self.route(Method::Options, pattern, handler)
    }

    /// Adds a POST route.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Router::handle`].
    #[must_use]
    pub fn post(self, pattern: &str, handler: H) -> Self {
        self.route(Method::Post, pattern, handler)
    }

    /// Adds a PUT route.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Router::handle`].
    #[must_use]
    pub fn put(self, pattern: &str, handler: H) -> Self {
        self.route(Method::Put, pattern, handler)
    }

    /// Adds a PATCH route.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Router::handle`].
    #[must_use]
    pub fn patch(self, pattern: &str, handler: H) -> Self {
        self.route(Method::Patch, pattern, handler)
    }

    /// Adds a DELETE route.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Router::handle`].
    #[must_use]
    pub fn delete(self, pattern: &str, handler: H) -> Self {
        self.route(Method::Delete, pattern, handler)
    }

    /// Looks up the route for `method` and `path`.
    ///
    /// The path is matched as given; no normalization is applied.
    #[must_use]
    pub fn lookup(&self, method: &str, path: &str) -> Lookup<'_, H> {
        let mut params = Params::new();
        let found = self.lookup_into(method, path, &mut params);
        Lookup {
            route: found.value,
            params,
            trailing_slash_redirect: found.trailing_slash_redirect,
        }
    }

    /// Like [`Router::lookup`], appending parameters to a caller-owned
    /// carrier so it can be pooled across requests.
    ///
    /// The carrier should be [`reset`](Params::reset) before reuse.
    pub fn lookup_into(
        &self,
        method: &str,
        path: &str,
        params: &mut Params,
    ) -> Found<'_, Route<H>> {
        match self.trees.get(method) {
            Some(tree) => tree.get_value(path, params),
            None => Found {
                value: None,
                trailing_slash_redirect: false,
            },
        }
    }

    /// Returns the methods that have a route for `path`, formatted for an
    /// `Allow` header, or an empty string if there are none.
    ///
    /// `req_method` and `OPTIONS` are not probed; `OPTIONS` is always part
    /// of a non-empty result. For the server-wide path `*` every registered
    /// method is listed.
    #[must_use]
    pub fn allowed(&self, path: &str, req_method: &str) -> String {
        let options = Method::Options.as_str();
        let mut allowed: Vec<&str> = Vec::new();

        if path == "*" {
            allowed.extend(
                self.trees
                    .keys()
                    .map(String::as_str)
                    .filter(|method| *method != options),
            );
        } else {
            let mut params = Params::new();
            for (method, tree) in &self.trees {
                if method == req_method || method == options {
                    continue;
                }
                if tree.at(path, &mut params).is_some() {
                    allowed.push(method);
                }
                params.reset();
            }
        }

        if allowed.is_empty() {
            return String::new();
        }
        allowed.push(options);
        allowed.sort_unstable();
        allowed.join(", ")
    }

    /// Returns the methods with at least one route, sorted.
    #[must_use]
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Returns the routes registered for `method`, sorted by pattern.
    #[must_use]
    pub fn routes(&self, method: &str) -> Vec<&Route<H>> {
        let mut routes = self.trees.get(method).map(Node::values).unwrap_or_default();
        routes.sort_by(|a, b| a.pattern.cmp(&b.pattern));
        routes
    }

    pub(crate) fn tree(&self, method: &str) -> Option<&Node<Route<H>>> {
        self.trees.get(method)
    }
}

impl<H: Clone> Router<H> {
    /// Adds a route for every standard method.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Router::handle`].
    #[must_use]
    pub fn any(mut self, pattern: &str, handler: H) -> Self {
        for method in Method::ALL {
            self.handle(method.as_str(), pattern, handler.clone());
        }
        self
    }
}
