//! Import-Origin Map
//!
//! The resolver's entry point: for every named symbol a file imports,
//! determine which file and declaration actually defines it, following
//! named and wildcard re-export chains through barrel files and falling
//! back to external package resolution for bare specifiers.
//!
//! Resolution is best-effort throughout. A specifier neither tier can
//! resolve, a name no file on the chain exports, and a re-export cycle all
//! produce the same outcome: the binding is absent from the result map.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::exports::{DirectExport, ExportLookup};
use crate::project::Project;

/// Where an imported name ultimately comes from: the declaring file and the
/// terminal direct declaration within it. Never a re-export entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImport {
    /// File containing the direct declaration.
    pub source_path: PathBuf,
    /// The declaration the import resolved to.
    pub export: DirectExport,
}

/// Local import name -> origin, in binding order as written.
pub type ImportsMap = IndexMap<String, ResolvedImport>;

/// Build the import-origin map for `file_path`.
///
/// Every key is a named binding of the file; bindings that do not resolve
/// to a direct declaration are absent. Files resolved through the external
/// package walk are added to `project` as a side effect, so later calls
/// against the same project see them. Total resolution failure yields an
/// empty map, never an error.
pub fn build_imports_map(project: &mut Project, file_path: &Path) -> ImportsMap {
    let mut map = ImportsMap::default();

    let Some(file) = project.get_file(file_path) else {
        debug!(path = %file_path.display(), "file not in project");
        return map;
    };
    let imports: Vec<_> = file.imports().to_vec();

    for declaration in &imports {
        let Some(target) = resolve_specifier_to_file(project, &declaration.specifier, file_path)
        else {
            debug!(
                specifier = %declaration.specifier,
                from = %file_path.display(),
                "import specifier did not resolve"
            );
            continue;
        };

        for binding in &declaration.bindings {
            let mut visited = FxHashSet::default();
            match resolve_export(project, &target, &binding.imported_name, &mut visited) {
                Some(resolved) => {
                    map.insert(binding.local_name.clone(), resolved);
                }
                None => trace!(
                    name = %binding.imported_name,
                    target = %target.display(),
                    "no declaration found for imported name"
                ),
            }
        }
    }

    map
}

/// Resolve an exported `name` of the file at `file_path` to its terminal
/// direct declaration, following re-export chains.
///
/// `visited` is the current recursion path: a file already on it is not
/// re-entered, which bounds the walk by the number of distinct files and
/// terminates mutually re-exporting barrels. The set is unwound on exit so
/// sibling branches stay independent.
pub fn resolve_export(
    project: &mut Project,
    file_path: &Path,
    name: &str,
    visited: &mut FxHashSet<PathBuf>,
) -> Option<ResolvedImport> {
    // Normalized so a path spelling variant cannot slip past the guard.
    let file_path = crate::project::normalize_path(file_path);

    if !visited.insert(file_path.clone()) {
        trace!(path = %file_path.display(), name, "re-export cycle; abandoning branch");
        return None;
    }

    let result = resolve_export_inner(project, &file_path, name, visited);
    visited.remove(&file_path);
    result
}

fn resolve_export_inner(
    project: &mut Project,
    file_path: &Path,
    name: &str,
    visited: &mut FxHashSet<PathBuf>,
) -> Option<ResolvedImport> {
    let file = project.get_file(file_path)?;

    // Edges are collected up front because following them may load external
    // files into the project.
    let edges: Vec<(String, String)> = match file.exports().lookup(name) {
        ExportLookup::Direct(export) => {
            return Some(ResolvedImport {
                source_path: file_path.to_path_buf(),
                export: export.clone(),
            });
        }
        ExportLookup::Absent => return None,
        ExportLookup::Follow(edges) => edges
            .iter()
            .map(|edge| (edge.specifier.to_string(), edge.name.to_string()))
            .collect(),
    };

    // Source order; the first branch that terminates in a direct
    // declaration wins.
    for (specifier, target_name) in edges {
        let Some(target) = resolve_specifier_to_file(project, &specifier, file_path) else {
            continue;
        };
        if let Some(found) = resolve_export(project, &target, &target_name, visited) {
            return Some(found);
        }
    }

    None
}

/// Two-tier specifier resolution: the project's own relative/alias rules
/// first, then the external package walk for bare specifiers. Files
/// discovered on disk by either tier are loaded into the project before
/// being returned.
fn resolve_specifier_to_file(
    project: &mut Project,
    specifier: &str,
    from: &Path,
) -> Option<PathBuf> {
    if let Some(path) = project.resolve_or_load(specifier, from) {
        return Some(path);
    }

    if specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }

    project.resolve_external(specifier, from)
}
