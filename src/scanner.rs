//! Top-Level Declaration Scanner
//!
//! Extracts the slice of a TypeScript source file the origin resolver
//! consumes:
//! - named import bindings (`import { a, b as c } from './mod'`)
//! - export entries (direct declarations, named re-exports, wildcards)
//! - top-level declaration names and kinds (so `export { name }` lists can
//!   be classified)
//!
//! This is deliberately not a parser. Brace depth is tracked so declaration
//! keywords inside function bodies or object literals are ignored, strings
//! and comments are skipped, and any construct outside the recognized
//! grammar is passed over without diagnostics. Regular-expression literals
//! are not specially handled; a regex containing quote or brace characters
//! can desynchronize the scan of the statement it appears in.

use rustc_hash::FxHashMap;

use crate::exports::{DeclarationKind, ExportTable, ReExport};
use crate::imports::{ImportBinding, ImportDeclaration};

/// Imports and exports extracted from one file.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub imports: Vec<ImportDeclaration>,
    pub exports: ExportTable,
}

/// Scan `text` for imports, exports, and top-level declarations.
pub fn scan(text: &str) -> ScanResult {
    Scanner::new(text).run()
}

/// Export-surface events in source order, resolved into an [`ExportTable`]
/// once the whole file has been scanned (an `export { name }` list may
/// precede the declaration of `name`).
#[derive(Debug)]
enum ExportEvent {
    Direct { name: String, kind: DeclarationKind },
    ReExport(ReExport),
    /// `export { local as exported }` without a `from` clause.
    LocalNames(Vec<(String, String)>),
}

enum TailEnd {
    Comma,
    End,
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    imports: Vec<ImportDeclaration>,
    export_events: Vec<ExportEvent>,
    local_decls: FxHashMap<String, DeclarationKind>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            imports: Vec::new(),
            export_events: Vec::new(),
            local_decls: FxHashMap::default(),
        }
    }

    fn run(mut self) -> ScanResult {
        let mut depth: u32 = 0;

        loop {
            self.skip_trivia();
            let Some(byte) = self.peek() else { break };

            match byte {
                b'"' | b'\'' => {
                    self.skip_string();
                }
                b'`' => {
                    self.skip_template();
                }
                b'{' | b'(' | b'[' => {
                    depth += 1;
                    self.pos += 1;
                }
                b'}' | b')' | b']' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                }
                c if is_ident_start(c) => {
                    let start = self.pos;
                    let word = self.read_ident();
                    if depth == 0 && !self.preceded_by_dot(start) {
                        match word {
                            "import" => self.parse_import(),
                            "export" => self.parse_export(),
                            "class" | "interface" | "enum" | "function" | "const" | "let"
                            | "var" | "type" | "abstract" | "async" | "declare" => {
                                self.parse_declaration(word, false);
                            }
                            _ => {}
                        }
                    }
                }
                _ => {
                    self.pos += 1;
                }
            }
        }

        self.finish()
    }

    /// Resolve collected events into the final tables.
    fn finish(self) -> ScanResult {
        let mut exports = ExportTable::new();

        for event in self.export_events {
            match event {
                ExportEvent::Direct { name, kind } => exports.add_direct(name, kind),
                ExportEvent::ReExport(reexport) => exports.add_reexport(reexport),
                ExportEvent::LocalNames(names) => {
                    for (local, exported) in names {
                        if let Some(&kind) = self.local_decls.get(&local) {
                            exports.add_direct(exported, kind);
                        } else if let Some((specifier, original)) =
                            find_import_binding(&self.imports, &local)
                        {
                            // `import { x } from './mod'; export { x };` is a
                            // re-export of `x` through this file.
                            exports.add_reexport(ReExport::Named {
                                exported_name: exported,
                                original_name: original.to_string(),
                                specifier: specifier.to_string(),
                            });
                        }
                        // Otherwise the export names nothing we can see; skip.
                    }
                }
            }
        }

        ScanResult {
            imports: self.imports,
            exports,
        }
    }

    // === Import declarations ===

    /// Parse after the `import` keyword has been consumed.
    fn parse_import(&mut self) {
        self.skip_trivia();
        match self.peek() {
            // Dynamic `import(...)` or `import.meta`; not a declaration.
            Some(b'(') | Some(b'.') => return,
            // Side-effect import: no bindings to record.
            Some(b'"') | Some(b'\'') => {
                self.read_string();
                return;
            }
            _ => {}
        }

        // `import type { ... }` / `import type Default` type-only forms.
        let save = self.pos;
        if self.peek_word("type") {
            self.read_ident();
            self.skip_trivia();
            let is_modifier = match self.peek() {
                Some(b'{') | Some(b'*') => true,
                Some(c) if is_ident_start(c) => !self.peek_word("from"),
                _ => false,
            };
            if !is_modifier {
                // `type` was a default-import name after all.
                self.pos = save;
            }
        }

        self.skip_trivia();
        if let Some(c) = self.peek()
            && is_ident_start(c)
        {
            // Default import name; not recorded.
            self.read_ident();
            self.skip_trivia();
            if self.peek() == Some(b',') {
                self.pos += 1;
                self.skip_trivia();
            }
        }

        let mut bindings = Vec::new();
        match self.peek() {
            Some(b'*') => {
                // Namespace import; not recorded.
                self.pos += 1;
                if self.eat_word("as") {
                    self.read_ident();
                }
            }
            Some(b'{') => {
                self.pos += 1;
                bindings = self.parse_named_list();
            }
            _ => {}
        }

        if !self.eat_word("from") {
            return;
        }
        self.skip_trivia();
        let Some(specifier) = self.read_string() else {
            return;
        };

        if !bindings.is_empty() {
            self.imports.push(ImportDeclaration {
                specifier,
                bindings,
            });
        }
    }

    /// Parse `a`, `a as b`, `type a`, `"a-b" as c` elements up to and
    /// including the closing `}`.
    fn parse_named_list(&mut self) -> Vec<ImportBinding> {
        let mut bindings = Vec::new();

        loop {
            self.skip_trivia();
            match self.peek() {
                None => break,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b'"') | Some(b'\'') => {
                    // `import { "arbitrary name" as local }`
                    let Some(imported) = self.read_string() else {
                        break;
                    };
                    if self.eat_word("as")
                        && let Some(local) = self.try_read_ident()
                    {
                        bindings.push(ImportBinding::new(local, imported));
                    }
                }
                Some(c) if is_ident_start(c) => {
                    let mut name = self.read_ident().to_string();
                    // Inline `type` modifier, unless `type` itself is the
                    // imported name (`import { type } from ...`).
                    if name == "type" {
                        self.skip_trivia();
                        if let Some(c) = self.peek()
                            && is_ident_start(c)
                            && !self.peek_word("as")
                        {
                            name = self.read_ident().to_string();
                        }
                    }
                    let local = if self.eat_word("as") {
                        match self.try_read_ident() {
                            Some(alias) => alias.to_string(),
                            None => break,
                        }
                    } else {
                        name.clone()
                    };
                    bindings.push(ImportBinding::new(local, name));
                }
                _ => break,
            }
        }

        bindings
    }

    // === Export declarations ===

    /// Parse after the `export` keyword has been consumed.
    fn parse_export(&mut self) {
        self.skip_trivia();
        match self.peek() {
            Some(b'*') => {
                self.pos += 1;
                if self.eat_word("as") {
                    // `export * as ns from ...` creates a namespace binding,
                    // which named-binding resolution does not model.
                    self.read_ident();
                    if self.eat_word("from") {
                        self.skip_trivia();
                        self.read_string();
                    }
                    return;
                }
                if self.eat_word("from") {
                    self.skip_trivia();
                    if let Some(specifier) = self.read_string() {
                        self.export_events
                            .push(ExportEvent::ReExport(ReExport::Wildcard { specifier }));
                    }
                }
            }
            Some(b'{') => {
                self.pos += 1;
                self.parse_export_list();
            }
            Some(c) if is_ident_start(c) => {
                let word = self.read_ident();
                match word {
                    "default" => {}
                    "type" => {
                        self.skip_trivia();
                        if self.peek() == Some(b'{') {
                            self.pos += 1;
                            self.parse_export_list();
                        } else {
                            self.parse_declaration("type", true);
                        }
                    }
                    "class" | "interface" | "enum" | "function" | "const" | "let" | "var"
                    | "abstract" | "async" | "declare" => {
                        self.parse_declaration(word, true);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// Parse `{ a, b as c }` with an optional `from './mod'` clause, after
    /// the opening brace.
    fn parse_export_list(&mut self) {
        // (original name, exported name) pairs in source order.
        let mut names: Vec<(String, String)> = Vec::new();

        loop {
            self.skip_trivia();
            match self.peek() {
                None => return,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => {
                    self.pos += 1;
                }
                Some(c) if is_ident_start(c) => {
                    let mut name = self.read_ident().to_string();
                    if name == "type" {
                        self.skip_trivia();
                        if let Some(c) = self.peek()
                            && is_ident_start(c)
                            && !self.peek_word("as")
                        {
                            name = self.read_ident().to_string();
                        }
                    }
                    let exported = if self.eat_word("as") {
                        match self.try_read_ident() {
                            Some(alias) => alias.to_string(),
                            None => return,
                        }
                    } else {
                        name.clone()
                    };
                    names.push((name, exported));
                }
                _ => return,
            }
        }

        if self.eat_word("from") {
            self.skip_trivia();
            let Some(specifier) = self.read_string() else {
                return;
            };
            for (original, exported) in names {
                self.export_events
                    .push(ExportEvent::ReExport(ReExport::Named {
                        exported_name: exported,
                        original_name: original,
                        specifier: specifier.clone(),
                    }));
            }
        } else if !names.is_empty() {
            self.export_events.push(ExportEvent::LocalNames(names));
        }
    }

    // === Declarations ===

    /// Parse a declaration starting at keyword `word` (already consumed).
    /// Records names into `local_decls` and, when `exported`, emits direct
    /// export events.
    fn parse_declaration(&mut self, word: &str, exported: bool) {
        let mut word = word;

        // Skip `declare` / `abstract` / `async` modifier chains.
        while matches!(word, "declare" | "abstract" | "async") {
            self.skip_trivia();
            match self.peek() {
                Some(c) if is_ident_start(c) => word = self.read_ident(),
                _ => return,
            }
        }

        let kind = match word {
            "class" => DeclarationKind::Class,
            "interface" => DeclarationKind::Interface,
            "enum" => DeclarationKind::Enum,
            "function" => DeclarationKind::Function,
            "type" => DeclarationKind::TypeAlias,
            "const" | "let" | "var" => {
                // `const enum Color { ... }` declares an enum.
                if self.peek_word("enum") {
                    self.read_ident();
                    if let Some(name) = self.try_read_ident() {
                        self.record_decl(name.to_string(), DeclarationKind::Enum, exported);
                    }
                    return;
                }
                self.parse_variable_declarators(exported);
                return;
            }
            _ => return,
        };

        if word == "function" {
            // Generator marker.
            self.skip_trivia();
            if self.peek() == Some(b'*') {
                self.pos += 1;
            }
        }

        let Some(name) = self.try_read_ident() else {
            return;
        };
        let name = name.to_string();

        if kind == DeclarationKind::TypeAlias {
            // Only record `type Name [<...>] = ...`; bare `type` identifiers
            // in other positions are not declarations.
            self.skip_trivia();
            if self.peek() == Some(b'<') {
                self.skip_angle_brackets();
                self.skip_trivia();
            }
            if self.peek() != Some(b'=') {
                return;
            }
        }

        self.record_decl(name, kind, exported);
    }

    /// Parse `a = ..., b = ...` declarator names after `const`/`let`/`var`.
    fn parse_variable_declarators(&mut self, exported: bool) {
        loop {
            let Some(name) = self.try_read_ident() else {
                // Destructuring pattern or malformed input; leave the rest
                // to the main scan loop.
                return;
            };
            self.record_decl(name.to_string(), DeclarationKind::Variable, exported);

            self.skip_trivia();
            if self.peek() == Some(b'!') {
                // Definite-assignment marker: `let x!: T`.
                self.pos += 1;
                self.skip_trivia();
            }
            if self.peek() == Some(b':') {
                self.pos += 1;
                self.skip_type_annotation();
            }

            match self.scan_declarator_tail() {
                TailEnd::Comma => continue,
                TailEnd::End => return,
            }
        }
    }

    fn record_decl(&mut self, name: String, kind: DeclarationKind, exported: bool) {
        if exported {
            self.export_events.push(ExportEvent::Direct {
                name: name.clone(),
                kind,
            });
        }
        self.local_decls.insert(name, kind);
    }

    /// Skip an initializer up to the next `,` (more declarators follow) or
    /// the end of the statement. A keyword at the start of a new line ends
    /// the statement even without a semicolon.
    fn scan_declarator_tail(&mut self) -> TailEnd {
        let mut depth: u32 = 0;

        loop {
            self.skip_trivia();
            let Some(byte) = self.peek() else {
                return TailEnd::End;
            };

            match byte {
                b';' if depth == 0 => {
                    self.pos += 1;
                    return TailEnd::End;
                }
                b',' if depth == 0 => {
                    self.pos += 1;
                    return TailEnd::Comma;
                }
                b'"' | b'\'' => {
                    self.skip_string();
                }
                b'`' => {
                    self.skip_template();
                }
                b'{' | b'(' | b'[' => {
                    depth += 1;
                    self.pos += 1;
                }
                b'}' | b')' | b']' => {
                    if depth == 0 {
                        // Closing brace of an enclosing construct; statement
                        // ended without a semicolon.
                        return TailEnd::End;
                    }
                    depth -= 1;
                    self.pos += 1;
                }
                c if is_ident_start(c) => {
                    let start = self.pos;
                    let word = self.read_ident();
                    if depth == 0
                        && is_statement_keyword(word)
                        && self.preceded_by_newline(start)
                    {
                        self.pos = start;
                        return TailEnd::End;
                    }
                }
                _ => {
                    self.pos += 1;
                }
            }
        }
    }

    /// Skip a type annotation after `:`, stopping before `=`, `,`, or `;`
    /// at bracket depth zero. Angle brackets are tracked here because a
    /// generic argument list (`Record<string, number>`) contains commas
    /// that must not end the declarator.
    fn skip_type_annotation(&mut self) {
        let mut depth: u32 = 0;
        let mut angle_depth: u32 = 0;

        loop {
            self.skip_trivia();
            let Some(byte) = self.peek() else { return };

            match byte {
                b'=' if self.bytes.get(self.pos + 1) == Some(&b'>') => {
                    // Function type arrow.
                    self.pos += 2;
                }
                b'=' | b',' | b';' if depth == 0 && angle_depth == 0 => return,
                b'<' => {
                    angle_depth += 1;
                    self.pos += 1;
                }
                b'>' => {
                    angle_depth = angle_depth.saturating_sub(1);
                    self.pos += 1;
                }
                b'{' | b'(' | b'[' => {
                    depth += 1;
                    self.pos += 1;
                }
                b'}' | b')' | b']' => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    self.pos += 1;
                }
                b'"' | b'\'' => self.skip_string(),
                b'`' => self.skip_template(),
                _ => {
                    self.pos += 1;
                }
            }
        }
    }

    /// Skip a balanced `<...>` type-parameter list.
    fn skip_angle_brackets(&mut self) {
        let mut depth: u32 = 0;
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return,
                Some(b'<') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(b'>') => {
                    self.pos += 1;
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                Some(b'"') | Some(b'\'') => {
                    self.skip_string();
                }
                Some(b'`') => {
                    self.skip_template();
                }
                _ => {
                    self.pos += 1;
                }
            }
        }
    }

    // === Low-level cursor operations ===

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Skip whitespace and `//` / `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') => match self.bytes.get(self.pos + 1) {
                    Some(b'/') => {
                        while let Some(c) = self.peek() {
                            if c == b'\n' {
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    Some(b'*') => {
                        self.pos += 2;
                        while self.pos < self.bytes.len() {
                            if self.bytes[self.pos] == b'*'
                                && self.bytes.get(self.pos + 1) == Some(&b'/')
                            {
                                self.pos += 2;
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    _ => return,
                },
                _ => return,
            }
        }
    }

    /// Read an identifier at the current position. The caller must have
    /// checked `is_ident_start`.
    fn read_ident(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                self.pos += 1;
            } else {
                break;
            }
        }
        // Identifier bytes are ASCII or whole multi-byte sequences, so the
        // slice stays on a char boundary.
        std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("")
    }

    /// Skip trivia, then read an identifier if one is present.
    fn try_read_ident(&mut self) -> Option<&'a str> {
        self.skip_trivia();
        match self.peek() {
            Some(c) if is_ident_start(c) => Some(self.read_ident()),
            _ => None,
        }
    }

    /// Whether the next token is exactly the identifier `word`.
    fn peek_word(&mut self, word: &str) -> bool {
        let save = self.pos;
        self.skip_trivia();
        let result = match self.peek() {
            Some(c) if is_ident_start(c) => self.read_ident() == word,
            _ => false,
        };
        self.pos = save;
        result
    }

    /// Consume the identifier `word` if it is the next token.
    fn eat_word(&mut self, word: &str) -> bool {
        let save = self.pos;
        self.skip_trivia();
        match self.peek() {
            Some(c) if is_ident_start(c) => {
                if self.read_ident() == word {
                    true
                } else {
                    self.pos = save;
                    false
                }
            }
            _ => {
                self.pos = save;
                false
            }
        }
    }

    /// Read a string literal at the current position, returning its content.
    /// Returns `None` if the cursor is not at a quote.
    fn read_string(&mut self) -> Option<String> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return None,
        };
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == b'\\' {
                self.pos += 2;
            } else if c == quote {
                let content = std::str::from_utf8(&self.bytes[start..self.pos])
                    .unwrap_or("")
                    .to_string();
                self.pos += 1;
                return Some(content);
            } else {
                self.pos += 1;
            }
        }
        None
    }

    /// Skip a string literal at the current position.
    fn skip_string(&mut self) {
        self.read_string();
    }

    /// Skip a template literal. Interpolation nesting is not tracked.
    fn skip_template(&mut self) {
        self.pos += 1;
        while let Some(c) = self.peek() {
            if c == b'\\' {
                self.pos += 2;
            } else if c == b'`' {
                self.pos += 1;
                return;
            } else {
                self.pos += 1;
            }
        }
    }

    /// Whether the token starting at `start` is preceded by `.` (member
    /// access, e.g. `config.type`).
    fn preceded_by_dot(&self, start: usize) -> bool {
        let mut idx = start;
        while idx > 0 {
            idx -= 1;
            let c = self.bytes[idx];
            if c.is_ascii_whitespace() {
                continue;
            }
            return c == b'.';
        }
        false
    }

    /// Whether the token starting at `start` is the first on its line.
    fn preceded_by_newline(&self, start: usize) -> bool {
        let mut idx = start;
        while idx > 0 {
            idx -= 1;
            match self.bytes[idx] {
                b' ' | b'\t' | b'\r' => continue,
                b'\n' => return true,
                _ => return false,
            }
        }
        true
    }
}

/// Find the import binding whose local name is `local`, returning the
/// specifier and imported name.
fn find_import_binding<'a>(
    imports: &'a [ImportDeclaration],
    local: &str,
) -> Option<(&'a str, &'a str)> {
    for decl in imports {
        for binding in &decl.bindings {
            if binding.local_name == local {
                return Some((&decl.specifier, &binding.imported_name));
            }
        }
    }
    None
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$' || c >= 0x80
}

fn is_ident_char(c: u8) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

fn is_statement_keyword(word: &str) -> bool {
    matches!(
        word,
        "import"
            | "export"
            | "class"
            | "function"
            | "const"
            | "let"
            | "var"
            | "interface"
            | "enum"
            | "type"
            | "declare"
            | "abstract"
            | "async"
            | "return"
            | "if"
            | "for"
            | "while"
            | "switch"
            | "throw"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exports::ExportLookup;

    fn bindings_of(result: &ScanResult, specifier: &str) -> Vec<(String, String)> {
        result
            .imports
            .iter()
            .find(|d| d.specifier == specifier)
            .map(|d| {
                d.bindings
                    .iter()
                    .map(|b| (b.local_name.clone(), b.imported_name.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_named_import() {
        let result = scan("import { userSchema } from './schema';");
        assert_eq!(result.imports.len(), 1);
        assert_eq!(
            bindings_of(&result, "./schema"),
            vec![("userSchema".to_string(), "userSchema".to_string())]
        );
    }

    #[test]
    fn test_aliased_import() {
        let result = scan("import { userSchema as schema } from './schema';");
        assert_eq!(
            bindings_of(&result, "./schema"),
            vec![("schema".to_string(), "userSchema".to_string())]
        );
    }

    #[test]
    fn test_multiple_named_imports_multiline() {
        let result = scan(
            "import {\n  userSchema,\n  postSchema,\n} from './schemas';",
        );
        assert_eq!(
            bindings_of(&result, "./schemas"),
            vec![
                ("userSchema".to_string(), "userSchema".to_string()),
                ("postSchema".to_string(), "postSchema".to_string()),
            ]
        );
    }

    #[test]
    fn test_type_only_import() {
        let result = scan("import type { IUser } from './user.interface';");
        assert_eq!(
            bindings_of(&result, "./user.interface"),
            vec![("IUser".to_string(), "IUser".to_string())]
        );
    }

    #[test]
    fn test_inline_type_modifier() {
        let result = scan("import { type IUser, Status } from './models';");
        assert_eq!(
            bindings_of(&result, "./models"),
            vec![
                ("IUser".to_string(), "IUser".to_string()),
                ("Status".to_string(), "Status".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_and_named_mix() {
        let result = scan("import Default, { named } from './mod';");
        assert_eq!(
            bindings_of(&result, "./mod"),
            vec![("named".to_string(), "named".to_string())]
        );
    }

    #[test]
    fn test_default_only_and_namespace_not_recorded() {
        let result = scan(
            "import Default from './a';\nimport * as ns from './b';\nimport './c';",
        );
        assert!(result.imports.is_empty());
    }

    #[test]
    fn test_dynamic_import_ignored() {
        let result = scan("const mod = import('./lazy');\nconst url = import.meta.url;");
        assert!(result.imports.is_empty());
    }

    #[test]
    fn test_export_declarations_of_each_kind() {
        let result = scan(
            "export class User {}\n\
             export interface IUser { name: string; }\n\
             export enum Status { Active, Inactive }\n\
             export function validateUser() { return true; }\n\
             export const userSchema = { name: 'string' };\n\
             export type UserId = string;",
        );
        let exports = &result.exports;
        assert_eq!(exports.direct("User").unwrap().kind, DeclarationKind::Class);
        assert_eq!(
            exports.direct("IUser").unwrap().kind,
            DeclarationKind::Interface
        );
        assert_eq!(exports.direct("Status").unwrap().kind, DeclarationKind::Enum);
        assert_eq!(
            exports.direct("validateUser").unwrap().kind,
            DeclarationKind::Function
        );
        assert_eq!(
            exports.direct("userSchema").unwrap().kind,
            DeclarationKind::Variable
        );
        assert_eq!(
            exports.direct("UserId").unwrap().kind,
            DeclarationKind::TypeAlias
        );
    }

    #[test]
    fn test_export_multiple_declarators() {
        let result = scan("export const a = 1, b = { nested: ',' }, c = 3;");
        assert!(result.exports.direct("a").is_some());
        assert!(result.exports.direct("b").is_some());
        assert!(result.exports.direct("c").is_some());
    }

    #[test]
    fn test_named_reexport() {
        let result = scan("export { userSchema } from './user.schema';");
        match result.exports.lookup("userSchema") {
            ExportLookup::Follow(edges) => {
                assert_eq!(edges[0].specifier, "./user.schema");
                assert_eq!(edges[0].name, "userSchema");
            }
            other => panic!("expected follow edges, got {other:?}"),
        }
    }

    #[test]
    fn test_aliased_reexport() {
        let result = scan("export { userSchema as schema } from './user.schema';");
        match result.exports.lookup("schema") {
            ExportLookup::Follow(edges) => {
                assert_eq!(edges[0].name, "userSchema");
            }
            other => panic!("expected follow edges, got {other:?}"),
        }
        assert_eq!(result.exports.lookup("userSchema"), ExportLookup::Absent);
    }

    #[test]
    fn test_wildcard_reexport() {
        let result = scan("export * from './user.schema';");
        assert_eq!(result.exports.reexports().len(), 1);
        assert!(matches!(
            &result.exports.reexports()[0],
            ReExport::Wildcard { specifier } if specifier == "./user.schema"
        ));
    }

    #[test]
    fn test_namespace_reexport_skipped() {
        let result = scan("export * as schemas from './schemas';");
        assert!(result.exports.is_empty());
    }

    #[test]
    fn test_export_local_list_resolves_declaration_kind() {
        let result = scan("const userSchema = { name: 'string' };\nexport { userSchema };");
        assert_eq!(
            result.exports.direct("userSchema").unwrap().kind,
            DeclarationKind::Variable
        );
    }

    #[test]
    fn test_export_local_list_before_declaration() {
        let result = scan("export { User };\nclass User {}");
        assert_eq!(
            result.exports.direct("User").unwrap().kind,
            DeclarationKind::Class
        );
    }

    #[test]
    fn test_export_of_imported_name_becomes_reexport() {
        let result = scan("import { userSchema } from './user.schema';\nexport { userSchema };");
        match result.exports.lookup("userSchema") {
            ExportLookup::Follow(edges) => {
                assert_eq!(edges[0].specifier, "./user.schema");
                assert_eq!(edges[0].name, "userSchema");
            }
            other => panic!("expected follow edges, got {other:?}"),
        }
    }

    #[test]
    fn test_declarations_inside_bodies_ignored() {
        let result = scan(
            "export function outer() {\n  const inner = 1;\n  class Hidden {}\n  return inner;\n}",
        );
        assert!(result.exports.direct("outer").is_some());
        assert!(result.exports.direct("inner").is_none());
        let local_only = scan("function helper() { const x = 1; }\nexport { x };");
        assert!(local_only.exports.direct("x").is_none());
    }

    #[test]
    fn test_comments_and_strings_do_not_confuse() {
        let result = scan(
            "// import { fake } from './nope';\n\
             /* export const ghost = 1; */\n\
             const s = \"export { alsoFake } from './nope'\";\n\
             export const real = `import { tpl } from './nope'`;",
        );
        assert!(result.imports.is_empty());
        assert!(result.exports.direct("real").is_some());
        assert_eq!(result.exports.direct_len(), 1);
        assert!(result.exports.reexports().is_empty());
    }

    #[test]
    fn test_export_default_skipped() {
        let result = scan("export default class App {}\nexport default function main() {}");
        assert!(result.exports.direct("App").is_none());
        assert!(result.exports.direct("main").is_none());
    }

    #[test]
    fn test_generic_type_alias() {
        let result = scan("export type Wrapper<T extends { id: string }> = { value: T };");
        assert_eq!(
            result.exports.direct("Wrapper").unwrap().kind,
            DeclarationKind::TypeAlias
        );
    }

    #[test]
    fn test_generic_type_annotation_on_variable() {
        let result = scan("export const routes: Record<string, number> = {};");
        assert!(result.exports.direct("routes").is_some());
        assert_eq!(result.exports.direct_len(), 1);
    }

    #[test]
    fn test_function_type_annotation_on_variable() {
        let result = scan("export const pick: (a: string, b: number) => string = (a) => a;");
        assert!(result.exports.direct("pick").is_some());
        assert_eq!(result.exports.direct_len(), 1);
    }

    #[test]
    fn test_const_enum() {
        let result = scan("export const enum Color { Red, Green }");
        assert_eq!(
            result.exports.direct("Color").unwrap().kind,
            DeclarationKind::Enum
        );
    }

    #[test]
    fn test_member_access_type_not_a_declaration() {
        let result = scan("config.type = 'json';\nexport { type };");
        assert!(result.exports.direct("type").is_none());
    }

    #[test]
    fn test_statement_order_preserved_across_reexports() {
        let result = scan(
            "export * from './a';\n\
             export { x } from './b';\n\
             export * from './c';",
        );
        let specifiers: Vec<String> = result
            .exports
            .reexports()
            .iter()
            .map(|r| match r {
                ReExport::Named { specifier, .. } => specifier.clone(),
                ReExport::Wildcard { specifier } => specifier.clone(),
            })
            .collect();
        assert_eq!(specifiers, vec!["./a", "./b", "./c"]);
    }
}
