use std::env;
use std::path::Path;
use std::process;
use std::sync::Arc;

use velto::{FileLoader, HostDocument, RuntimeContext, TracingSink};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: velto-render <file.velto> [mount-id]");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  velto-render demos/hello.velto");
        eprintln!("  velto-render demos/dashboard.velto main");
        process::exit(1);
    }

    let file = &args[1];
    let mount_id = args.get(2).map(String::as_str).unwrap_or("app");
    let selector = format!("#{mount_id}");

    let path = Path::new(file);
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let locator = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.clone());

    let loader = FileLoader::new(base);
    let ctx = RuntimeContext::new();
    let mut host = HostDocument::with_mount(Arc::new(TracingSink), mount_id);

    match ctx.render(&loader, &locator, &mut host, &selector).await {
        Ok(()) => {
            println!("✓ {} rendered into '{}'", file, selector);
            println!();
            print!("{}", host.body());
        }
        Err(err) => {
            eprintln!("✗ {} failed to render:", file);
            eprintln!("  {}", err);
            process::exit(1);
        }
    }
}
