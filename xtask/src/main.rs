// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Workspace tooling. Run as `cargo run -p xtask -- <command>`.

mod manifest;

#[derive(clap::Parser)]
#[command(about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Describe every workspace member as `{name, version, exports,
    /// imports}` JSON, resolving imports against declared dependencies.
    Manifest(manifest::ManifestArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = <Args as clap::Parser>::parse();
    match args.command {
        Command::Manifest(args) => manifest::run(args),
    }
}
