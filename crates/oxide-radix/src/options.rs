//! Dispatch configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_404_BODY: &str = "404 page not found";
const DEFAULT_405_BODY: &str = "405 method not allowed";

/// Options controlling how [`crate::Router::dispatch`] treats requests that
/// have no exact match.
///
/// Missing fields take their default when deserialized, so a partial
/// configuration such as `{"redirect_fixed_path": false}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Redirect to the same path with its trailing slash toggled when only
    /// that variant has a route.
    pub redirect_trailing_slash: bool,
    /// Redirect to the cleaned, case-corrected path when one has a route.
    pub redirect_fixed_path: bool,
    /// Answer `405 Method Not Allowed` when the path has routes for other
    /// methods. When disabled such requests get a 404.
    pub handle_method_not_allowed: bool,
    /// Body of the 404 response.
    pub body_404: String,
    /// Body of the 405 response.
    pub body_405: String,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            redirect_trailing_slash: true,
            redirect_fixed_path: true,
            handle_method_not_allowed: true,
            body_404: DEFAULT_404_BODY.to_string(),
            body_405: DEFAULT_405_BODY.to_string(),
        }
    }
}

impl RouterOptions {
    /// Creates options with every correction enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RouterError::Config`] if the document is not valid
    /// JSON or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets whether trailing-slash redirects are issued.
    #[must_use]
    pub fn redirect_trailing_slash(mut self, enabled: bool) -> Self {
        self.redirect_trailing_slash = enabled;
        self
    }

    /// Sets whether fixed-path redirects are issued.
    #[must_use]
    pub fn redirect_fixed_path(mut self, enabled: bool) -> Self {
        self.redirect_fixed_path = enabled;
        self
    }

    /// Sets whether 405 responses are produced.
    #[must_use]
    pub fn handle_method_not_allowed(mut self, enabled: bool) -> Self {
        self.handle_method_not_allowed = enabled;
        self
    }

    /// Sets the 404 body.
    #[must_use]
    pub fn body_404(mut self, body: impl Into<String>) -> Self {
        self.body_404 = body.into();
        self
    }

    /// Sets the 405 body.
    #[must_use]
    pub fn body_405(mut self, body: impl Into<String>) -> Self {
        self.body_405 = body.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    #[test]
    fn test_defaults() {
        let opts = RouterOptions::default();
        assert!(opts.redirect_trailing_slash);
        assert!(opts.redirect_fixed_path);
        assert!(opts.handle_method_not_allowed);
        assert_eq!(opts.body_404, "404 page not found");
        assert_eq!(opts.body_405, "405 method not allowed");
    }

    #[test]
    fn test_partial_json() {
        let opts = RouterOptions::from_json(r#"{"redirect_fixed_path": false, "body_404": "nope"}"#)
            .unwrap();
        assert!(opts.redirect_trailing_slash);
        assert!(!opts.redirect_fixed_path);
        assert_eq!(opts.body_404, "nope");
        assert_eq!(opts.body_405, "405 method not allowed");
    }

    #[test]
    fn test_invalid_json() {
        let err = RouterOptions::from_json(r#"{"redirect_fixed_path": "yes"}"#).unwrap_err();
        assert!(matches!(err, RouterError::Config(_)));
    }

    #[test]
    fn test_builder() {
        let opts = RouterOptions::new()
            .redirect_trailing_slash(false)
            .handle_method_not_allowed(false)
            .body_405("go away");
        assert!(!opts.redirect_trailing_slash);
        assert!(opts.redirect_fixed_path);
        assert!(!opts.handle_method_not_allowed);
        assert_eq!(opts.body_405, "go away");
    }
}
