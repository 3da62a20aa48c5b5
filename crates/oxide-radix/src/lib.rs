//! # oxide-radix
//!
//! A radix-tree HTTP request router.
//!
//! This crate provides:
//! - One compressed radix tree per HTTP method
//! - Named parameters (`:name`) and catch-all segments (`*name`)
//! - Static segments that always win over parameters, whatever the
//!   registration order
//! - Trailing-slash and case-insensitive path recovery as redirects
//! - `405 Method Not Allowed` detection with an `Allow` list
//! - Path cleaning (`//`, `.` and `..`) for building redirect targets
//!
//! ## Quick Start
//!
//! ```
//! use oxide_radix::{Dispatch, Router};
//!
//! let router = Router::new()
//!     .get("/", "index")
//!     .get("/users/:id", "user")
//!     .get("/static/*filepath", "files");
//!
//! match router.dispatch("GET", "/users/42") {
//!     Dispatch::Matched { route, params } => {
//!         assert_eq!(route.handler, "user");
//!         assert_eq!(params.get("id"), Some("42"));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! ## Path Parameters
//!
//! `:name` matches one non-empty segment. `*name` matches the rest of the
//! path, including the `/` in front of it, and must end the pattern:
//!
//! ```
//! use oxide_radix::Router;
//!
//! let router = Router::new().get("/src/*filepath", ());
//! let found = router.lookup("GET", "/src/css/site.css");
//! assert_eq!(found.params.get("filepath"), Some("/css/site.css"));
//! ```
//!
//! ## Redirects and 405
//!
//! When nothing matches, [`Router::dispatch`] tries to recover:
//!
//! ```
//! use oxide_radix::{Dispatch, Router};
//!
//! let router = Router::new().get("/Docs/", ()).post("/login", ());
//!
//! assert!(matches!(
//!     router.dispatch("GET", "/docs"),
//!     Dispatch::Redirect { status: 301, .. }
//! ));
//! assert!(matches!(
//!     router.dispatch("GET", "/login"),
//!     Dispatch::MethodNotAllowed { .. }
//! ));
//! ```
//!
//! ## Configuration
//!
//! Each recovery step can be turned off through [`RouterOptions`], which
//! can also be read from JSON:
//!
//! ```
//! use oxide_radix::{Router, RouterOptions};
//!
//! let options = RouterOptions::from_json(r#"{"redirect_fixed_path": false}"#)?;
//! let router: Router<()> = Router::with_options(options);
//! assert!(!router.options().redirect_fixed_path);
//! # Ok::<(), oxide_radix::RouterError>(())
//! ```

mod dispatch;
mod error;
mod method;
mod options;
mod params;
mod path;
mod response;
mod route;
mod router;
mod tree;

pub use dispatch::Dispatch;
pub use error::{Result, RouterError};
pub use method::Method;
pub use options::RouterOptions;
pub use params::{Param, Params};
pub use path::{clean_path, clean_path_with, toggle_trailing_slash, TrailingSlash};
pub use response::Response;
pub use route::Route;
pub use router::{Lookup, Router};
pub use tree::{Found, Node, NodeKind};
