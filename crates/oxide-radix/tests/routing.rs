//! Tests for route matching and parameter extraction.

mod common;
use common::*;

#[test]
fn static_routes() {
    let router = get_router(&["/", "/about", "/about/team", "/contact"]);
    assert_eq!(matched(&router, "GET", "/"), Some(("/", vec![])));
    assert_eq!(matched(&router, "GET", "/about"), Some(("/about", vec![])));
    assert_eq!(matched(&router, "GET", "/about/team"), Some(("/about/team", vec![])));
    assert_eq!(matched(&router, "GET", "/abou"), None);
    assert_eq!(matched(&router, "GET", "/about/teams"), None);
}

#[test]
fn single_param() {
    let router = get_router(&["/items/:id"]);
    assert_eq!(
        matched(&router, "GET", "/items/42"),
        Some(("/items/:id", pairs(&[("id", "42")])))
    );
    assert_eq!(matched(&router, "GET", "/items/"), None);
    assert_eq!(matched(&router, "GET", "/items/42/extra"), None);
}

#[test]
fn param_order_follows_pattern() {
    let router = get_router(&["/orgs/:org/repos/:repo/issues/:number", "/a/:x/b/*rest"]);
    assert_eq!(
        matched(&router, "GET", "/orgs/acme/repos/radix/issues/7"),
        Some((
            "/orgs/:org/repos/:repo/issues/:number",
            pairs(&[("org", "acme"), ("repo", "radix"), ("number", "7")])
        ))
    );
    assert_eq!(
        matched(&router, "GET", "/a/1/b/c/d"),
        Some(("/a/:x/b/*rest", pairs(&[("x", "1"), ("rest", "/c/d")])))
    );
}

#[test]
fn static_wins_over_param_in_any_order() {
    let first = get_router(&["/users/:id", "/users/me"]);
    let second = get_router(&["/users/me", "/users/:id"]);
    for router in [&first, &second] {
        assert_eq!(matched(router, "GET", "/users/me"), Some(("/users/me", vec![])));
        assert_eq!(
            matched(router, "GET", "/users/mel"),
            Some(("/users/:id", pairs(&[("id", "mel")])))
        );
        assert_eq!(
            matched(router, "GET", "/users/m"),
            Some(("/users/:id", pairs(&[("id", "m")])))
        );
    }
}

#[test]
fn static_branch_falls_back_to_param() {
    let router = get_router(&["/users/:id/posts", "/users/me/settings"]);
    assert_eq!(
        matched(&router, "GET", "/users/me/posts"),
        Some(("/users/:id/posts", pairs(&[("id", "me")])))
    );
    assert_eq!(
        matched(&router, "GET", "/users/me/settings"),
        Some(("/users/me/settings", vec![]))
    );
}

#[test]
fn catch_all_includes_leading_slash() {
    let router = get_router(&["/src/*filepath"]);
    assert_eq!(
        matched(&router, "GET", "/src/"),
        Some(("/src/*filepath", pairs(&[("filepath", "/")])))
    );
    assert_eq!(
        matched(&router, "GET", "/src/some/file.png"),
        Some(("/src/*filepath", pairs(&[("filepath", "/some/file.png")])))
    );
    assert_eq!(matched(&router, "GET", "/src"), None);
}

#[test]
fn methods_have_separate_trees() {
    let router = oxide_radix::Router::new()
        .get("/things/:id", "get")
        .delete("/things/:thing", "delete");
    assert_eq!(
        matched(&router, "GET", "/things/1"),
        Some(("get", pairs(&[("id", "1")])))
    );
    assert_eq!(
        matched(&router, "DELETE", "/things/1"),
        Some(("delete", pairs(&[("thing", "1")])))
    );
    assert_eq!(matched(&router, "POST", "/things/1"), None);
}

#[test]
fn unicode_segments() {
    let router = get_router(&["/caf\u{e9}", "/caf\u{e8}/:x", "/\u{65e5}\u{672c}/:lang"]);
    assert_eq!(matched(&router, "GET", "/caf\u{e9}"), Some(("/caf\u{e9}", vec![])));
    assert_eq!(
        matched(&router, "GET", "/caf\u{e8}/\u{e0}"),
        Some(("/caf\u{e8}/:x", pairs(&[("x", "\u{e0}")])))
    );
    assert_eq!(
        matched(&router, "GET", "/\u{65e5}\u{672c}/ja"),
        Some(("/\u{65e5}\u{672c}/:lang", pairs(&[("lang", "ja")])))
    );
    assert_eq!(matched(&router, "GET", "/caf"), None);
}

#[test]
fn trailing_slash_recommendation() {
    let router = get_router(&["/a/b/", "/c"]);
    let found = router.lookup("GET", "/a/b");
    assert!(found.route.is_none());
    assert!(found.trailing_slash_redirect);

    let found = router.lookup("GET", "/c/");
    assert!(found.route.is_none());
    assert!(found.trailing_slash_redirect);

    let found = router.lookup("GET", "/d");
    assert!(found.route.is_none());
    assert!(!found.trailing_slash_redirect);
}
