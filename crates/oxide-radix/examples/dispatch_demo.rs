//! dispatch-demo
//!
//! Resolves request paths against a small sample route table and prints
//! the response the router would send.
//!
//! ```text
//! cargo run -p oxide-radix --example dispatch_demo -- -v GET /users/42 /USERS/42/ /login
//! ```

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_radix::{Params, Response, Router, RouterOptions};

/// Dispatch request paths against a sample route table.
#[derive(Parser)]
#[command(name = "dispatch-demo")]
#[command(about, long_about = None)]
struct Cli {
    /// Request method.
    method: String,

    /// Request paths.
    #[arg(required = true)]
    paths: Vec<String>,

    /// Router options as JSON, e.g. '{"redirect_fixed_path": false}'.
    #[arg(short, long, env = "RADIX_OPTIONS")]
    options: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn sample_router(options: RouterOptions) -> Router<&'static str> {
    Router::with_options(options)
        .get("/", "index")
        .get("/users/:id", "show user")
        .get("/users/me", "current user")
        .put("/users/:id", "update user")
        .post("/login", "log in")
        .get("/docs/", "documentation")
        .get("/static/*filepath", "static file")
}

fn describe(handler: &&str, params: &Params) -> Response {
    let bound: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    Response::text(format!("{handler} [{}]", bound.join(", ")))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = match &cli.options {
        Some(json) => RouterOptions::from_json(json)?,
        None => RouterOptions::default(),
    };
    let router = sample_router(options);
    info!("Loaded {} methods: {}", router.methods().len(), router.methods().join(", "));

    let method = cli.method.to_ascii_uppercase();
    for path in &cli.paths {
        let res = router.serve(&method, path, describe);
        println!("{method} {path} -> {} {}", res.status, res.status_text());
        let mut headers: Vec<_> = res.headers.iter().collect();
        headers.sort();
        for (key, value) in headers {
            println!("  {key}: {value}");
        }
        if let Some(body) = res.body_string().filter(|b| !b.is_empty()) {
            println!("  {body}");
        }
    }

    Ok(())
}
