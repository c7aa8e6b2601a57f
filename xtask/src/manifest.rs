// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `manifest` subcommand: a machine-readable description of every
//! workspace member.
//!
//! For each member this scans the sources for external `use` roots, keeps
//! the ones that name a declared dependency, and resolves them to a locator:
//! `crates-io:name@version` for registry crates, `workspace:path` for path
//! members. Unreadable files are logged and skipped so one bad file does
//! not sink the scan.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use cargo_metadata::camino::Utf8Path;
use cargo_metadata::{Package, TargetKind, semver};

/// Options for `xtask manifest`.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ManifestArgs {
    /// Write the JSON here instead of standard output.
    #[clap(long, short)]
    out: Option<PathBuf>,
}

pub(crate) fn run(args: ManifestArgs) -> anyhow::Result<()> {
    let metadata = cargo_metadata::MetadataCommand::new()
        .no_deps()
        .exec()
        .context("failed to run `cargo metadata`")?;

    let mut manifests = BTreeMap::new();
    for package in metadata.workspace_packages() {
        let package_dir = package
            .manifest_path
            .parent()
            .with_context(|| format!("no parent directory for {}", package.manifest_path))?;
        let key = package_dir
            .strip_prefix(&metadata.workspace_root)
            .unwrap_or(package_dir)
            .to_string();
        manifests.insert(key, describe(package, package_dir, &metadata.workspace_root));
    }

    let json = serde_json::to_string_pretty(&manifests).context("failed to serialize")?;
    match args.out {
        Some(path) => fs::write(&path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct PackageManifest<'meta> {
    name: &'meta str,
    version: &'meta semver::Version,
    exports: BTreeMap<String, String>,
    imports: BTreeMap<String, String>,
}

fn describe<'meta>(
    package: &'meta Package,
    package_dir: &Utf8Path,
    workspace_root: &Utf8Path,
) -> PackageManifest<'meta> {
    let mut sources = Vec::new();
    collect_sources(package_dir.as_std_path(), &mut sources);

    let mut roots = BTreeSet::new();
    for path in &sources {
        match fs::read_to_string(path) {
            Ok(text) => roots.extend(import_roots(&text)),
            Err(err) => log::warn!("skipping {}: {err}", path.display()),
        }
    }

    PackageManifest {
        name: package.name.as_str(),
        version: &package.version,
        exports: exports(package, package_dir),
        imports: resolve_imports(package, &roots, workspace_root),
    }
}

/// Entry points by target: the library is `.`, binaries are `./<name>`.
fn exports(package: &Package, package_dir: &Utf8Path) -> BTreeMap<String, String> {
    let mut exports = BTreeMap::new();
    for target in &package.targets {
        let entry = if target.kind.contains(&TargetKind::Lib) {
            ".".to_owned()
        } else if target.kind.contains(&TargetKind::Bin) {
            format!("./{}", target.name)
        } else {
            continue;
        };
        let path = target
            .src_path
            .strip_prefix(package_dir)
            .unwrap_or(target.src_path.as_path());
        exports.insert(entry, format!("./{path}"));
    }
    exports
}

/// Keep scanned roots that name a declared dependency, of any kind, and
/// resolve each to its locator.
fn resolve_imports(
    package: &Package,
    roots: &BTreeSet<String>,
    workspace_root: &Utf8Path,
) -> BTreeMap<String, String> {
    let mut imports = BTreeMap::new();
    for dep in &package.dependencies {
        let specifier = dep.name.replace('-', "_");
        if !roots.contains(&specifier) {
            continue;
        }
        let locator = match &dep.path {
            Some(path) => {
                let relative = path.strip_prefix(workspace_root).unwrap_or(path.as_path());
                format!("workspace:{relative}")
            }
            None => format!("crates-io:{}@{}", dep.name, requirement(&dep.req)),
        };
        imports.insert(specifier, locator);
    }
    imports
}

/// Render a requirement the way it is written in a manifest, without the
/// implied caret.
fn requirement(req: &semver::VersionReq) -> String {
    req.to_string().trim_start_matches('^').to_owned()
}

/// Every `.rs` file under `dir`, skipping build output.
fn collect_sources(dir: &Path, sources: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("skipping {}: {err}", dir.display());
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping an entry of {}: {err}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            if entry.file_name() != "target" {
                collect_sources(&path, sources);
            }
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            sources.push(path);
        }
    }
}

/// Root crates named by `use` and `extern crate` lines.
///
/// A line scan, not a parse: good enough because anything that is not a
/// declared dependency is filtered out afterwards.
fn import_roots(source: &str) -> BTreeSet<String> {
    let mut roots = BTreeSet::new();
    for line in source.lines() {
        let line = strip_visibility(line.trim_start());
        let Some(spec) = line
            .strip_prefix("use ")
            .or_else(|| line.strip_prefix("extern crate "))
        else {
            continue;
        };
        if let Some(root) = path_root(spec)
            && !matches!(root, "crate" | "self" | "super")
        {
            roots.insert(root.to_owned());
        }
    }
    roots
}

fn strip_visibility(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("pub(") {
        match rest.split_once(')') {
            Some((_, tail)) => tail.trim_start(),
            None => line,
        }
    } else if let Some(rest) = line.strip_prefix("pub ") {
        rest.trim_start()
    } else {
        line
    }
}

fn path_root(spec: &str) -> Option<&str> {
    let spec = spec.strip_prefix("::").unwrap_or(spec);
    let spec = spec.strip_prefix("r#").unwrap_or(spec);
    let end = spec
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphanumeric() && *c != '_')
        .map_or(spec.len(), |(i, _)| i);
    (end > 0).then(|| &spec[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_lines_yield_their_root_crates() {
        let source = "
use alloc::vec::Vec;
use ::bitflags::bitflags;
use cargo_metadata::camino::Utf8Path;
pub use trellis_events::KeyEvent;
pub(crate) use smallvec::SmallVec;
use crate::state::MenuState;
use super::*;
extern crate alloc;

fn body() {
    use std::fs;
}
";
        let expected = [
            "alloc",
            "bitflags",
            "cargo_metadata",
            "smallvec",
            "std",
            "trellis_events",
        ];
        assert_eq!(import_roots(source), BTreeSet::from(expected.map(String::from)));
    }

    #[test]
    fn comment_lines_are_not_imports() {
        let source = "//! use kurbo::Point;\n/// use log::warn;\nuse anyhow::Context;\n";
        assert_eq!(import_roots(source), BTreeSet::from(["anyhow".to_owned()]));
    }

    #[test]
    fn requirements_drop_the_default_caret() {
        let caret = semver::VersionReq::parse("^2.10.0").unwrap();
        assert_eq!(requirement(&caret), "2.10.0");

        let range = semver::VersionReq::parse(">=1.2, <2").unwrap();
        assert_eq!(requirement(&range), ">=1.2, <2");
    }
}
