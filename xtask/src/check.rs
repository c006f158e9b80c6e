use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

use crate::FIRMWARE_TARGET;

/// One `cargo` invocation that must succeed.
struct Step {
    label: &'static str,
    args: Vec<&'static str>,
    /// Report failure without aborting the remaining steps.
    advisory: bool,
}

pub fn run(host_only: bool) -> Result<()> {
    println!();
    println!("{}", "🔍 Checking dma2d builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    let mut steps = vec![
        Step {
            label: "host build (std, tracing)",
            args: vec!["check", "-p", "dma2d", "--features", "std,tracing"],
            advisory: false,
        },
        Step {
            label: "host build (no features)",
            args: vec!["check", "-p", "dma2d", "--no-default-features"],
            advisory: false,
        },
    ];

    if !host_only {
        steps.push(Step {
            label: "firmware target (no_std, defmt)",
            args: vec![
                "check",
                "-p",
                "dma2d",
                "--target",
                FIRMWARE_TARGET,
                "--no-default-features",
                "--features",
                "defmt",
            ],
            advisory: false,
        });
    }

    steps.push(Step {
        label: "clippy lints",
        args: vec![
            "clippy",
            "--workspace",
            "--all-targets",
            "--features",
            "dma2d/std",
            "--",
            "-D",
            "warnings",
        ],
        advisory: true,
    });
    steps.push(Step {
        label: "code formatting",
        args: vec!["fmt", "--all", "--check"],
        advisory: true,
    });

    for step in &steps {
        run_step(step)?;
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

fn run_step(step: &Step) -> Result<()> {
    println!("{}", format!("  Checking {}...", step.label).cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(&step.args)
        .output()
        .with_context(|| format!("Failed to run cargo for {}", step.label))?;

    if output.status.success() {
        println!(
            "{}",
            format!(
                "  ✓ {} passed in {:.2}s",
                step.label,
                start.elapsed().as_secs_f64()
            )
            .green()
        );
    } else if step.advisory {
        eprintln!("{}", format!("  ⚠ {} reported issues", step.label).yellow().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
    } else {
        eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("{} failed", step.label);
    }
    println!();

    Ok(())
}
