//! Import-origin resolution for TypeScript projects.
//!
//! Given a source file and an in-memory project of parsed files, determine
//! for every named symbol the file imports which file and declaration
//! actually defines it:
//! - relative and alias specifiers resolve against the project's own file
//!   set
//! - barrel files are traversed through named and wildcard re-export
//!   chains, with a cycle guard
//! - bare package specifiers fall back to an ancestor `node_modules` walk,
//!   normalizing compiled artifacts to their source form and loading the
//!   discovered file into the project
//!
//! Resolution is best-effort: bindings that cannot be traced to a direct
//! declaration are omitted from the result, never reported as errors.
//!
//! ```
//! use tsorigin::{Project, build_imports_map};
//! use std::path::Path;
//!
//! let mut project = Project::new();
//! project.add_source_file("/app/schema.ts", "export const userSchema = {};");
//! project.add_source_file("/app/router.ts", "import { userSchema } from './schema';");
//!
//! let map = build_imports_map(&mut project, Path::new("/app/router.ts"));
//! assert_eq!(
//!     map["userSchema"].source_path,
//!     Path::new("/app/schema.ts")
//! );
//! ```

// Top-level declaration scanning
pub mod scanner;
pub use scanner::{ScanResult, scan};

// Import/Export Tracking
pub mod imports;
pub use imports::{ImportBinding, ImportDeclaration};

pub mod exports;
pub use exports::{DeclarationKind, DirectExport, ExportLookup, ExportTable, FollowEdge, ReExport};

// Parsed files and the project store
pub mod source_file;
pub use source_file::SourceFile;

pub mod project;
pub use project::{PathMapping, Project, ProjectOptions};

// External package resolution (requires file system access)
pub mod package_resolver;
pub use package_resolver::PackageResolver;

// Import-origin resolution
pub mod imports_map;
pub use imports_map::{ImportsMap, ResolvedImport, build_imports_map, resolve_export};

// Tracing setup
pub mod tracing_config;
pub use tracing_config::init_tracing;

// Cross-module integration tests
#[cfg(test)]
#[path = "tests/imports_map_tests.rs"]
mod imports_map_tests;
