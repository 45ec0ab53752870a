use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use treesum_engine::Engine;

#[derive(Parser)]
#[command(
    name = "treesum",
    about = "Compute the git-compatible object id of a file, symlink, or directory tree",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Path to hash
    path: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("fatal: {e:#}");
            process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let engine = Engine::new();
    let oid = engine.hash_any(&cli.path).await?;
    println!("{oid}");
    Ok(())
}
