//! Registered route definition.

/// A single route definition.
///
/// Created at registration and owned by the tree node where its pattern
/// ends. Lookups hand out shared references only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<H> {
    /// HTTP method.
    pub method: String,
    /// Path pattern as it was registered.
    pub pattern: String,
    /// Request handler.
    pub handler: H,
}

impl<H> Route<H> {
    /// Creates a new route.
    pub fn new(method: impl Into<String>, pattern: impl Into<String>, handler: H) -> Self {
        Self {
            method: method.into(),
            pattern: pattern.into(),
            handler,
        }
    }
}
