//! External Package Resolution
//!
//! Resolves bare specifiers (`zod`, `@scope/pkg`, `pkg/subpath`) by walking
//! ancestor `node_modules` directories from the importing file, the way the
//! platform's own package resolution does. The resolver only ever wants
//! source declarations, so a candidate with a compiled or emitted extension
//! (`.js`, `.d.ts`, ...) is rewritten to its source form (`.ts`, ...) and
//! accepted only if that file exists on disk.
//!
//! Nothing here is an error: unlocatable packages, compiled-only artifacts,
//! and unreadable `package.json` files all come back as `None`.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::{debug, trace};

/// Extensions tried for entry points and subpaths without an extension.
const ENTRY_EXTENSION_CANDIDATES: [&str; 6] = ["ts", "tsx", "d.ts", "js", "jsx", "json"];

/// Simplified `package.json` structure for resolution.
#[derive(Debug, Clone, Default, Deserialize)]
struct PackageJson {
    main: Option<String>,
    types: Option<String>,
    typings: Option<String>,
}

/// Walks the host filesystem's package-resolution search for bare
/// specifiers, with a per-run `(directory, specifier)` cache.
#[derive(Debug, Default)]
pub struct PackageResolver {
    resolution_cache: FxHashMap<(PathBuf, String), Option<PathBuf>>,
}

impl PackageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a bare specifier from the file at `from_path` to a
    /// source-form file on disk.
    ///
    /// Relative and absolute specifiers are the project store's
    /// responsibility and always return `None` here.
    pub fn resolve(&mut self, specifier: &str, from_path: &Path) -> Option<PathBuf> {
        if specifier.starts_with('.') || specifier.starts_with('/') {
            return None;
        }

        let from_dir = from_path.parent().unwrap_or(Path::new(".")).to_path_buf();

        let cache_key = (from_dir.clone(), specifier.to_string());
        if let Some(cached) = self.resolution_cache.get(&cache_key) {
            return cached.clone();
        }

        let result = resolve_uncached(specifier, &from_dir);
        match &result {
            Some(path) => trace!(specifier, path = %path.display(), "resolved external package"),
            None => debug!(specifier, "external package did not resolve"),
        }

        self.resolution_cache.insert(cache_key, result.clone());
        result
    }

    /// Drop all cached resolutions.
    pub fn clear_cache(&mut self) {
        self.resolution_cache.clear();
    }
}

/// Walk ancestor `node_modules` directories looking for the package.
fn resolve_uncached(specifier: &str, from_dir: &Path) -> Option<PathBuf> {
    let (package_name, subpath) = parse_package_specifier(specifier);

    for dir in from_dir.ancestors() {
        let package_dir = dir.join("node_modules").join(&package_name);
        if !package_dir.is_dir() {
            continue;
        }
        if let Some(resolved) = resolve_package(&package_dir, subpath.as_deref()) {
            return Some(resolved);
        }
        // A shadowing package without a usable entry does not stop the
        // walk; an outer node_modules may still satisfy the specifier.
    }

    None
}

/// Resolve an entry point or subpath within a located package directory.
fn resolve_package(package_dir: &Path, subpath: Option<&str>) -> Option<PathBuf> {
    if let Some(subpath) = subpath {
        let candidate = try_file_or_directory(&package_dir.join(subpath))?;
        return source_form(&candidate);
    }

    let package_json = read_package_json(&package_dir.join("package.json")).unwrap_or_default();

    for entry in [&package_json.main, &package_json.types, &package_json.typings]
        .into_iter()
        .flatten()
    {
        if let Some(candidate) = try_file_or_directory(&package_dir.join(entry))
            && let Some(resolved) = source_form(&candidate)
        {
            return Some(resolved);
        }
    }

    let candidate = try_file(&package_dir.join("index"))?;
    source_form(&candidate)
}

/// Parse a package specifier into package name and subpath, handling
/// scoped packages (`@scope/pkg/sub`).
fn parse_package_specifier(specifier: &str) -> (String, Option<String>) {
    if let Some(rest) = specifier.strip_prefix('@') {
        if let Some(slash_idx) = rest.find('/') {
            let scope_end = slash_idx + 1;
            if let Some(next_slash) = specifier[scope_end + 1..].find('/') {
                let pkg_end = scope_end + 1 + next_slash;
                return (
                    specifier[..pkg_end].to_string(),
                    Some(specifier[pkg_end + 1..].to_string()),
                );
            }
        }
        return (specifier.to_string(), None);
    }

    if let Some(slash_idx) = specifier.find('/') {
        (
            specifier[..slash_idx].to_string(),
            Some(specifier[slash_idx + 1..].to_string()),
        )
    } else {
        (specifier.to_string(), None)
    }
}

/// Try a path as a file, appending extension candidates when it has none
/// on disk under its literal spelling.
fn try_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    let base = path.to_string_lossy();
    for ext in ENTRY_EXTENSION_CANDIDATES {
        let with_ext = PathBuf::from(format!("{base}.{ext}"));
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }

    None
}

/// Try a path as a file, then as a directory with an index file.
fn try_file_or_directory(path: &Path) -> Option<PathBuf> {
    if let Some(resolved) = try_file(path) {
        return Some(resolved);
    }
    if path.is_dir() {
        return try_file(&path.join("index"));
    }
    None
}

/// Rewrite a compiled or emitted extension to its source form and verify
/// the source file exists. A candidate already in source form passes
/// through; a compiled-only candidate yields `None`.
fn source_form(path: &Path) -> Option<PathBuf> {
    let path_str = path.to_string_lossy();

    // Compound declaration extensions first, so `.d.ts` is not mistaken
    // for `.ts`.
    let rewritten = if let Some(stem) = path_str.strip_suffix(".d.ts") {
        Some(format!("{stem}.ts"))
    } else if let Some(stem) = path_str.strip_suffix(".d.mts") {
        Some(format!("{stem}.mts"))
    } else if let Some(stem) = path_str.strip_suffix(".d.cts") {
        Some(format!("{stem}.cts"))
    } else if let Some(stem) = path_str.strip_suffix(".js") {
        Some(format!("{stem}.ts"))
    } else if let Some(stem) = path_str.strip_suffix(".jsx") {
        Some(format!("{stem}.tsx"))
    } else if let Some(stem) = path_str.strip_suffix(".mjs") {
        Some(format!("{stem}.mts"))
    } else if let Some(stem) = path_str.strip_suffix(".cjs") {
        Some(format!("{stem}.cts"))
    } else {
        None
    };

    match rewritten {
        Some(source) => {
            let source = PathBuf::from(source);
            if source.is_file() {
                Some(source)
            } else {
                debug!(
                    compiled = %path.display(),
                    "no source file next to compiled artifact"
                );
                None
            }
        }
        None => {
            if path.is_file() {
                Some(path.to_path_buf())
            } else {
                None
            }
        }
    }
}

/// Read and parse `package.json`, downgrading every failure to `None`.
fn read_package_json(path: &Path) -> Option<PackageJson> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(path = %path.display(), %err, "malformed package.json");
            None
        }
    }
}
