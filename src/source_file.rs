//! Parsed Source File
//!
//! The per-file view the resolver works with: an absolute path, the named
//! import declarations, and the export table. Immutable once stored in a
//! [`Project`](crate::project::Project); re-adding a path replaces the file
//! wholesale.

use std::path::{Path, PathBuf};

use crate::exports::ExportTable;
use crate::imports::ImportDeclaration;
use crate::scanner;

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    imports: Vec<ImportDeclaration>,
    exports: ExportTable,
}

impl SourceFile {
    /// Scan `text` into a source file at `path`.
    pub fn parse(path: PathBuf, text: &str) -> Self {
        let scanned = scanner::scan(text);
        Self {
            path,
            imports: scanned.imports,
            exports: scanned.exports,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Import declarations with named bindings, in source order.
    pub fn imports(&self) -> &[ImportDeclaration] {
        &self.imports
    }

    /// Export surface of this file.
    pub fn exports(&self) -> &ExportTable {
        &self.exports
    }
}
