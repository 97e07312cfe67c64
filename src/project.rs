//! Project Store
//!
//! Holds the set of parsed source files keyed by normalized path and
//! implements the in-memory tier of specifier resolution:
//! - relative (`./foo`, `../bar`) and absolute specifiers
//! - tsconfig-style `paths` alias mappings and `baseUrl` fallback
//! - extension candidates and `index` files
//!
//! [`Project::resolve_specifier`] consults only the file set. The loading
//! variants ([`Project::resolve_or_load`], [`Project::resolve_external`])
//! fall back to disk for files nobody added yet and load what they find
//! into the store, so later lookups in the same project see it.

use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::package_resolver::PackageResolver;
use crate::source_file::SourceFile;

/// Extensions tried when a specifier has no known extension, in resolution
/// priority order.
const TS_EXTENSION_CANDIDATES: [&str; 7] = ["ts", "tsx", "d.ts", "mts", "cts", "d.mts", "d.cts"];

/// One tsconfig-style `paths` entry: a pattern with at most one `*` and the
/// targets it maps to.
#[derive(Debug, Clone)]
pub struct PathMapping {
    pattern: String,
    prefix: String,
    suffix: String,
    targets: Vec<String>,
}

impl PathMapping {
    pub fn new(pattern: impl Into<String>, targets: Vec<String>) -> Self {
        let pattern = pattern.into();
        let (prefix, suffix) = match pattern.find('*') {
            Some(idx) => (pattern[..idx].to_string(), pattern[idx + 1..].to_string()),
            None => (pattern.clone(), String::new()),
        };
        Self {
            pattern,
            prefix,
            suffix,
            targets,
        }
    }

    fn match_specifier(&self, specifier: &str) -> Option<String> {
        if !self.pattern.contains('*') {
            return if self.pattern == specifier {
                Some(String::new())
            } else {
                None
            };
        }

        if !specifier.starts_with(&self.prefix) || !specifier.ends_with(&self.suffix) {
            return None;
        }

        let start = self.prefix.len();
        let end = specifier.len().saturating_sub(self.suffix.len());
        if end < start {
            return None;
        }

        Some(specifier[start..end].to_string())
    }

    fn specificity(&self) -> usize {
        self.prefix.len() + self.suffix.len()
    }
}

/// Resolution-relevant project configuration.
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    /// Base directory for non-relative specifier resolution.
    pub base_url: Option<PathBuf>,
    /// Alias mappings, tried most-specific-first before `base_url`.
    pub paths: Vec<PathMapping>,
}

/// The set of parsed source files for one resolution run.
///
/// Mutation is append-only: `add_source_file` inserts or wholesale replaces
/// the file at a path, never duplicates it. Files discovered through
/// external package resolution are added here as a side effect and persist
/// for the life of the project.
#[derive(Debug, Default)]
pub struct Project {
    files: FxHashMap<PathBuf, SourceFile>,
    options: ProjectOptions,
    package_resolver: PackageResolver,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ProjectOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Parse `text` and store it under `path`, replacing any file already
    /// there. Returns the stored file.
    pub fn add_source_file(&mut self, path: impl AsRef<Path>, text: &str) -> &SourceFile {
        let path = normalize_path(path.as_ref());
        let file = SourceFile::parse(path.clone(), text);
        self.files.insert(path.clone(), file);
        &self.files[&path]
    }

    pub fn get_file(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(&normalize_path(path))
    }

    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve a specifier against the in-memory file set (tier 1).
    ///
    /// Handles relative and absolute specifiers plus configured alias
    /// mappings; bare package specifiers that no mapping covers return
    /// `None` and fall to the external resolver.
    pub fn resolve_specifier(&self, specifier: &str, from: &Path) -> Option<PathBuf> {
        if specifier.starts_with("./") || specifier.starts_with("../") {
            let dir = from.parent()?;
            return self.lookup_candidates(&normalize_path(&dir.join(specifier)));
        }

        if specifier.starts_with('/') {
            return self.lookup_candidates(&normalize_path(Path::new(specifier)));
        }

        // Alias mappings, most specific pattern first.
        let mut mappings: Vec<&PathMapping> = self.options.paths.iter().collect();
        mappings.sort_by_key(|m| std::cmp::Reverse(m.specificity()));

        for mapping in mappings {
            let Some(star) = mapping.match_specifier(specifier) else {
                continue;
            };
            for target in &mapping.targets {
                let substituted = if target.contains('*') {
                    target.replace('*', &star)
                } else {
                    target.clone()
                };
                let fallback_dir = from.parent().unwrap_or(Path::new("/"));
                let base = self.options.base_url.as_deref().unwrap_or(fallback_dir);
                if let Some(found) =
                    self.lookup_candidates(&normalize_path(&base.join(&substituted)))
                {
                    return Some(found);
                }
            }
        }

        if let Some(base_url) = &self.options.base_url {
            return self.lookup_candidates(&normalize_path(&base_url.join(specifier)));
        }

        None
    }

    /// Resolve a relative or absolute specifier like [`resolve_specifier`],
    /// but on an in-memory miss probe the same candidates on disk and load
    /// the first hit into the project.
    ///
    /// The original project abstraction resolves against the filesystem for
    /// files nobody added yet; this keeps re-export chains inside externally
    /// discovered packages walkable. Read failures downgrade to `None`.
    ///
    /// [`resolve_specifier`]: Self::resolve_specifier
    pub fn resolve_or_load(&mut self, specifier: &str, from: &Path) -> Option<PathBuf> {
        if let Some(path) = self.resolve_specifier(specifier, from) {
            return Some(path);
        }

        let candidate = if specifier.starts_with("./") || specifier.starts_with("../") {
            normalize_path(&from.parent()?.join(specifier))
        } else if specifier.starts_with('/') {
            normalize_path(Path::new(specifier))
        } else {
            return None;
        };

        let found = specifier_candidates(&candidate)
            .into_iter()
            .find(|path| path.is_file())?;
        self.load_from_disk(&found)
    }

    /// Resolve a bare specifier through the external package walk (tier 2)
    /// and load the resolved file into the project if it is not already
    /// present. Read failures are downgraded to `None`.
    pub fn resolve_external(&mut self, specifier: &str, from: &Path) -> Option<PathBuf> {
        let resolved = self.package_resolver.resolve(specifier, from)?;
        debug!(specifier, path = %resolved.display(), "resolved external module");
        self.load_from_disk(&resolved)
    }

    /// Read `path` and add it to the project unless already present.
    fn load_from_disk(&mut self, path: &Path) -> Option<PathBuf> {
        let key = normalize_path(path);

        if !self.files.contains_key(&key) {
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => {
                    debug!(path = %path.display(), %err, "failed to read discovered module");
                    return None;
                }
            };
            self.add_source_file(path, &text);
        }

        Some(key)
    }

    /// Try a normalized candidate path against the in-memory file set.
    fn lookup_candidates(&self, candidate: &Path) -> Option<PathBuf> {
        specifier_candidates(candidate)
            .into_iter()
            .find(|path| self.files.contains_key(path))
    }
}

/// All file paths a specifier path could mean, in resolution priority
/// order: the exact path, compiled extensions rewritten to their source
/// forms, each known extension appended, then `index` files.
///
/// Extensions are appended textually: `with_extension` would clobber dotted
/// basenames like `user.schema`.
fn specifier_candidates(candidate: &Path) -> Vec<PathBuf> {
    let base = candidate.to_string_lossy();
    let mut out = Vec::new();

    // ESM-style `./user.js` written in TypeScript source refers to
    // `./user.ts`; try the source forms before the literal path.
    let compiled = [
        (".js", &["ts", "tsx", "d.ts"][..]),
        (".jsx", &["tsx"][..]),
        (".mjs", &["mts", "d.mts"][..]),
        (".cjs", &["cts", "d.cts"][..]),
    ];
    for (suffix, replacements) in compiled {
        if let Some(stem) = base.strip_suffix(suffix) {
            for replacement in replacements {
                out.push(PathBuf::from(format!("{stem}.{replacement}")));
            }
        }
    }

    out.push(candidate.to_path_buf());
    for ext in TS_EXTENSION_CANDIDATES {
        out.push(PathBuf::from(format!("{base}.{ext}")));
    }
    for ext in TS_EXTENSION_CANDIDATES {
        out.push(PathBuf::from(format!("{base}/index.{ext}")));
    }

    out
}

/// Normalize away `.` and `..` components without touching the filesystem;
/// project paths may be virtual.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}
