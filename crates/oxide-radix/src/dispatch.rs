//! Turning a lookup into a served route, a redirect, a 404 or a 405.

use crate::method::Method;
use crate::options::RouterOptions;
use crate::params::Params;
use crate::path::{clean_path, toggle_trailing_slash};
use crate::response::Response;
use crate::route::Route;
use crate::router::Router;

/// Outcome of [`Router::dispatch`].
#[derive(Debug)]
pub enum Dispatch<'r, H> {
    /// The path matched a route of the request method.
    Matched {
        /// The matched route.
        route: &'r Route<H>,
        /// Parameters extracted from the path.
        params: Params,
    },
    /// The client should retry at `location`.
    Redirect {
        /// Corrected path.
        location: String,
        /// 301 for GET and HEAD, 308 otherwise.
        status: u16,
    },
    /// The path has routes, but not for the request method.
    MethodNotAllowed {
        /// Value of the `Allow` header.
        allow: String,
    },
    /// Nothing matched.
    NotFound,
}

impl<H> Dispatch<'_, H> {
    /// Returns the response the router sends on its own for this outcome,
    /// or `None` for [`Dispatch::Matched`], which is answered by the handler.
    #[must_use]
    pub fn response(&self, options: &RouterOptions) -> Option<Response> {
        match self {
            Self::Matched { .. } => None,
            Self::Redirect { location, status } => {
                Some(Response::redirect(*status, location.as_str()))
            }
            Self::MethodNotAllowed { allow } => Some(Response::method_not_allowed(
                options.body_405.as_str(),
                allow.as_str(),
            )),
            Self::NotFound => Some(Response::not_found(options.body_404.as_str())),
        }
    }

    /// Returns `true` if a route was matched.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

impl<H> Router<H> {
    /// Resolves a request to an outcome.
    ///
    /// An exact match always wins. Otherwise, unless the method is
    /// `CONNECT` or the path is `/`, a trailing-slash redirect is tried,
    /// then a redirect to the cleaned, case-corrected path. If neither
    /// applies and other methods have a route for the path, the outcome is
    /// 405; everything else is 404. Each step can be switched off through
    /// [`RouterOptions`].
    #[must_use]
    pub fn dispatch(&self, method: &str, path: &str) -> Dispatch<'_, H> {
        let mut params = Params::new();
        let found = self.lookup_into(method, path, &mut params);
        if let Some(route) = found.value {
            tracing::trace!(method, path, pattern = %route.pattern, "matched route");
            return Dispatch::Matched { route, params };
        }

        let options = self.options();
        if method != Method::Connect.as_str() && path != "/" {
            let status = if method == Method::Get.as_str() || method == Method::Head.as_str() {
                301
            } else {
                308
            };

            if found.trailing_slash_redirect && options.redirect_trailing_slash {
                let location = toggle_trailing_slash(path).into_owned();
                tracing::trace!(method, path, %location, status, "trailing slash redirect");
                return Dispatch::Redirect { location, status };
            }

            if options.redirect_fixed_path {
                let fixed = self.tree(method).and_then(|tree| {
                    tree.find_case_insensitive_path(
                        &clean_path(path),
                        options.redirect_trailing_slash,
                    )
                });
                if let Some(location) = fixed {
                    tracing::trace!(method, path, %location, status, "fixed path redirect");
                    return Dispatch::Redirect { location, status };
                }
            }
        }

        if options.handle_method_not_allowed {
            let allow = self.allowed(path, method);
            if !allow.is_empty() {
                tracing::trace!(method, path, %allow, "method not allowed");
                return Dispatch::MethodNotAllowed { allow };
            }
        }

        tracing::trace!(method, path, "not found");
        Dispatch::NotFound
    }

    /// Dispatches a request and produces its response, calling `invoke`
    /// with the handler and parameters on a match.
    #[must_use]
    pub fn serve<F>(&self, method: &str, path: &str, invoke: F) -> Response
    where
        F: FnOnce(&H, &Params) -> Response,
    {
        match self.dispatch(method, path) {
            Dispatch::Matched { route, params } => invoke(&route.handler, &params),
            // Every other outcome carries its own response.
            outcome => outcome.response(self.options()).unwrap_or_default(),
        }
    }
}
