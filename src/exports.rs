//! Export Tracking and Classification
//!
//! Data structures for the export surface of a single source file:
//! - Direct declarations: `export class Foo`, `export const bar = ...`
//! - Named re-exports: `export { foo as bar } from './mod'`
//! - Wildcard re-exports: `export * from './mod'`
//!
//! [`ExportTable::lookup`] classifies a name as a terminal direct
//! declaration, a list of re-export edges to follow, or absent. A direct
//! declaration always wins over a re-export of the same name in the same
//! file; re-export edges are yielded in source order, and the first edge
//! whose chain terminates is the one that counts.

use rustc_hash::FxHashMap;

/// Kind of a directly exported declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Function,
    Variable,
    TypeAlias,
}

/// A terminal export: a declaration defined in the file that exports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectExport {
    /// Name visible to importers.
    pub name: String,
    /// Kind of the underlying declaration.
    pub kind: DeclarationKind,
}

/// One re-export statement, retained in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReExport {
    /// `export { original as exported } from 'specifier'`
    Named {
        /// Name visible to importers of this file.
        exported_name: String,
        /// Name to look up in the target module.
        original_name: String,
        /// Target module specifier, to be re-resolved from this file.
        specifier: String,
    },
    /// `export * from 'specifier'`
    Wildcard { specifier: String },
}

/// A re-export edge that could supply a requested name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowEdge<'a> {
    /// Target module specifier, relative to the file that owns the table.
    pub specifier: &'a str,
    /// Name to look up in the target module.
    pub name: &'a str,
}

/// Result of looking up a name in a file's export surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportLookup<'a> {
    /// Defined directly in this file. Terminal.
    Direct(&'a DirectExport),
    /// Possibly supplied by re-exports; edges in source order.
    Follow(Vec<FollowEdge<'a>>),
    /// Not exported under this name.
    Absent,
}

/// Export surface of one source file.
#[derive(Debug, Clone, Default)]
pub struct ExportTable {
    /// Direct declarations by exported name.
    direct: FxHashMap<String, DirectExport>,
    /// Named and wildcard re-export statements, in source order.
    reexports: Vec<ReExport>,
}

impl ExportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a direct declaration export.
    pub fn add_direct(&mut self, name: impl Into<String>, kind: DeclarationKind) {
        let name = name.into();
        self.direct.insert(
            name.clone(),
            DirectExport { name, kind },
        );
    }

    /// Record a re-export statement. Call order must be source order.
    pub fn add_reexport(&mut self, reexport: ReExport) {
        self.reexports.push(reexport);
    }

    /// Direct declaration exported under `name`, if any.
    pub fn direct(&self, name: &str) -> Option<&DirectExport> {
        self.direct.get(name)
    }

    /// All re-export statements in source order.
    pub fn reexports(&self) -> &[ReExport] {
        &self.reexports
    }

    /// Whether anything is exported under `name` without following
    /// wildcards (a wildcard may still supply the name transitively).
    pub fn names_locally(&self, name: &str) -> bool {
        self.direct.contains_key(name)
            || self.reexports.iter().any(|r| {
                matches!(r, ReExport::Named { exported_name, .. } if exported_name == name)
            })
    }

    /// Classify `name`: direct declaration, re-export edges to follow in
    /// source order, or absent.
    ///
    /// A named re-export participates only when its exported name matches;
    /// a wildcard always participates (the same name is looked up in its
    /// target). Direct declarations shadow both.
    pub fn lookup<'a>(&'a self, name: &'a str) -> ExportLookup<'a> {
        if let Some(direct) = self.direct.get(name) {
            return ExportLookup::Direct(direct);
        }

        let edges: Vec<FollowEdge<'_>> = self
            .reexports
            .iter()
            .filter_map(|reexport| match reexport {
                ReExport::Named {
                    exported_name,
                    original_name,
                    specifier,
                } if exported_name == name => Some(FollowEdge {
                    specifier,
                    name: original_name,
                }),
                ReExport::Named { .. } => None,
                ReExport::Wildcard { specifier } => Some(FollowEdge { specifier, name }),
            })
            .collect();

        if edges.is_empty() {
            ExportLookup::Absent
        } else {
            ExportLookup::Follow(edges)
        }
    }

    /// Number of direct declaration exports.
    pub fn direct_len(&self) -> usize {
        self.direct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.reexports.is_empty()
    }
}
