use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Features documented: everything that compiles on the host.
const DOC_FEATURES: &str = "std,tracing";

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building dma2d documentation...".cyan().bold());
    println!();

    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.args(["doc", "-p", "dma2d", "--no-deps", "--document-private-items"])
        .args(["--features", DOC_FEATURES]);
    if open {
        cmd.arg("--open");
    }

    let output = cmd.output().context("Failed to build documentation")?;
    if !output.status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!(
            "✓ Documentation built in {:.2}s",
            start.elapsed().as_secs_f64()
        )
        .green()
    );
    if !open {
        println!(
            "   {}",
            "Open target/doc/dma2d/index.html, or run 'cargo xtask doc --open'".dimmed()
        );
    }
    println!();

    Ok(())
}
