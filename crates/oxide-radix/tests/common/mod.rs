#![allow(dead_code)]

use oxide_radix::{Dispatch, Params, Router};

/// Builds a GET router whose handlers are their own patterns.
pub fn get_router(patterns: &[&'static str]) -> Router<&'static str> {
    patterns
        .iter()
        .fold(Router::new(), |router, pattern| router.get(pattern, *pattern))
}

/// Looks up `path` and returns the matched pattern with its parameters.
pub fn matched(
    router: &Router<&'static str>,
    method: &str,
    path: &str,
) -> Option<(&'static str, Vec<(String, String)>)> {
    let found = router.lookup(method, path);
    found.route.map(|route| (route.handler, owned(&found.params)))
}

pub fn owned(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub fn expect_redirect<H: std::fmt::Debug>(outcome: Dispatch<'_, H>) -> (String, u16) {
    match outcome {
        Dispatch::Redirect { location, status } => (location, status),
        other => panic!("Expected redirect, got {other:?}"),
    }
}

pub fn expect_not_allowed<H: std::fmt::Debug>(outcome: Dispatch<'_, H>) -> String {
    match outcome {
        Dispatch::MethodNotAllowed { allow } => allow,
        other => panic!("Expected 405, got {other:?}"),
    }
}
