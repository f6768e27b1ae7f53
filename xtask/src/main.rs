// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Lint, build and test orchestration for the Biblio workspace, plus a
//! smoke run of the console against a live backend.
//!
//! - `cargo xtask ci` runs the full local gate
//! - `cargo xtask smoke --token <TOKEN>` drives `biblio-console` against a
//!   running backend and fails if any command exits non-zero
//!
//! The smoke run is opt-in only; `cargo test` never needs a backend.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Output,
};

use cargo_metadata::{Metadata, MetadataCommand};
use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// The first line every workspace source file starts with.
const LICENSE_MARKER: &str = "// Copyright (C)";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Check that every workspace source file carries the license header
    #[command(visible_alias = "ch")]
    CheckHeaders,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Run the console against a live backend
    Smoke(SmokeArgs),

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,
}

/// Where the smoke run points the console.
#[derive(Clone, Debug, ClapArgs)]
struct SmokeArgs {
    /// Origin of the library backend
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,

    /// Bearer token for the backend
    #[arg(long)]
    token: String,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::CheckHeaders => check_headers(),
            Self::Deny => deny(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::Smoke(args) => smoke(&args),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    check_headers()?;
    lint()?;
    deny()?;
    build()?;
    test()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Load the metadata of the Biblio workspace
fn workspace_metadata() -> Result<Metadata> {
    MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")
}

/// Check that every `.rs` file under each workspace package starts with
/// the license header
fn check_headers() -> Result<()> {
    let meta: Metadata = workspace_metadata()?;

    let mut missing: Vec<PathBuf> = Vec::new();
    for package in meta.workspace_packages() {
        let Some(root) = package.manifest_path.parent() else {
            continue;
        };
        let src: PathBuf = root.as_std_path().join("src");
        collect_missing_headers(&src, &mut missing)
            .wrap_err_with(|| format!("failed to scan {}", src.display()))?;
    }

    if missing.is_empty() {
        tracing::info!("all source files carry the license header");
        return Ok(());
    }
    for path in &missing {
        tracing::error!("missing license header: {}", path.display());
    }
    Err(color_eyre::eyre::eyre!(
        "{} source file(s) are missing the license header",
        missing.len()
    ))
}

/// Walks `dir` and records every Rust file whose first line is not the
/// license header.
fn collect_missing_headers(dir: &Path, missing: &mut Vec<PathBuf>) -> io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path: PathBuf = entry?.path();
        if path.is_dir() {
            collect_missing_headers(&path, missing)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let contents: String = fs::read_to_string(&path)?;
            if !contents.starts_with(LICENSE_MARKER) {
                missing.push(path);
            }
        }
    }
    Ok(())
}

/// Lint formatting, typos, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta: Metadata = workspace_metadata()?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Drive every read-only console command against a live backend
///
/// Mutations (`lend`, `return`) are left out so the run never changes
/// library data.
fn smoke(args: &SmokeArgs) -> Result<()> {
    let read_only: [&[&str]; 4] = [
        &["whoami"],
        &["stats"],
        &["dashboard"],
        &["loans", "--page", "1"],
    ];

    for command in read_only {
        let mut cargo_args: Vec<&str> = vec![
            "run",
            "--quiet",
            "--package",
            "biblio-console",
            "--",
            "--base-url",
            &args.base_url,
            "--token",
            &args.token,
        ];
        cargo_args.extend_from_slice(command);
        run_cargo(cargo_args).wrap_err_with(|| format!("smoke step {command:?} failed"))?;
    }

    tracing::info!("smoke run passed against {}", args.base_url);
    Ok(())
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
