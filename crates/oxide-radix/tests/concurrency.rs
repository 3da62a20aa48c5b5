//! Tests for lookups shared between threads.

use std::sync::Arc;

use oxide_radix::{Dispatch, Router};

fn outcome(router: &Router<u32>, method: &str, path: &str) -> String {
    match router.dispatch(method, path) {
        Dispatch::Matched { route, params } => {
            let bound: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{} {}", route.handler, bound.join("&"))
        }
        Dispatch::Redirect { location, status } => format!("{status} {location}"),
        Dispatch::MethodNotAllowed { allow } => format!("405 {allow}"),
        Dispatch::NotFound => "404".to_string(),
    }
}

fn requests() -> Vec<(&'static str, String)> {
    let mut requests = Vec::new();
    for i in 0..50 {
        requests.push(("GET", format!("/users/{i}")));
        requests.push(("GET", format!("/users/{i}/posts/{}", i * 2)));
        requests.push(("GET", format!("/static/{i}/app.js")));
        requests.push(("POST", format!("/users/{i}")));
        requests.push(("GET", format!("/USERS/{i}/")));
    }
    requests.push(("GET", "/users/me".to_string()));
    requests.push(("DELETE", "/nowhere".to_string()));
    requests
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_lookups_match_sequential() {
    let router = Arc::new(
        Router::new()
            .get("/users/:id", 1)
            .get("/users/me", 2)
            .get("/users/:id/posts/:post", 3)
            .get("/static/*path", 4)
            .put("/users/:id", 5),
    );

    let requests = requests();
    let expected: Vec<String> = requests
        .iter()
        .map(|(method, path)| outcome(&router, method, path))
        .collect();

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let router = Arc::clone(&router);
        let requests = requests.clone();
        tasks.push(tokio::spawn(async move {
            requests
                .iter()
                .map(|(method, path)| outcome(&router, method, path))
                .collect::<Vec<String>>()
        }));
    }

    for task in tasks {
        assert_eq!(task.await.unwrap(), expected);
    }

    assert_eq!(expected[0], "1 id=0");
    assert_eq!(expected[1], "3 id=0&post=0");
    assert_eq!(expected[2], "4 path=/0/app.js");
    assert_eq!(expected[3], "405 GET, OPTIONS, PUT");
    assert_eq!(expected[4], "301 /users/0");
    assert_eq!(expected[expected.len() - 2], "2 ");
    assert_eq!(expected[expected.len() - 1], "404");
}
