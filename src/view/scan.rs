//! Source scanner.
//!
//! Parses one view file with oxc and looks at its top-level statements only:
//!
//! - `const meta = <expr>` (exported or not) records the initializer text
//! - `export default function Name() {}` records `Name`
//!
//! A file without a qualifying default export is not a view, even when it
//! declares `meta`.

use std::path::Path;

use oxc::allocator::Allocator;
use oxc::ast::ast::{
    Declaration, ExportDefaultDeclarationKind, Function, Statement, VariableDeclaration,
};
use oxc::parser::Parser;
use oxc::span::{GetSpan, SourceType};
use thiserror::Error;

use super::ViewData;

/// Name of the routing metadata variable.
const META_NAME: &str = "meta";

/// Reasons a view file cannot be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("multiple `meta` declarations")]
    MultipleMeta,

    #[error("multiple `export default function` declarations")]
    MultipleDefaultExports,

    #[error("syntax error: {0}")]
    Syntax(String),
}

/// Scan a source file and extract its view data.
///
/// Returns `Ok(None)` when the file has no `export default function`.
/// Recoverable parse errors are tolerated and the partial program is still
/// scanned; only a parse that had to give up yields [`ScanError::Syntax`].
pub fn scan_source(path: &Path, source: &str) -> Result<Option<ViewData>, ScanError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type(path)).parse();
    if ret.panicked {
        let message = ret
            .errors
            .first()
            .map_or_else(|| "unrecoverable parse error".to_string(), ToString::to_string);
        return Err(ScanError::Syntax(message));
    }

    let mut found = Found::default();
    for statement in &ret.program.body {
        match statement {
            Statement::VariableDeclaration(decl) => found.variables(decl, source)?,
            Statement::ExportNamedDeclaration(export) => {
                if let Some(Declaration::VariableDeclaration(decl)) = &export.declaration {
                    found.variables(decl, source)?;
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                if let ExportDefaultDeclarationKind::FunctionDeclaration(func) = &export.declaration
                {
                    found.default_function(func)?;
                }
            }
            _ => {}
        }
    }

    Ok(found.into_view())
}

/// Source type from the extension. Plain JavaScript views may contain JSX.
fn source_type(path: &Path) -> SourceType {
    let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::tsx());
    if source_type.is_javascript() {
        source_type.with_jsx(true)
    } else {
        source_type
    }
}

/// Candidates collected while walking the top-level statements.
#[derive(Default)]
struct Found {
    meta_value: Option<String>,
    default_name: Option<String>,
}

impl Found {
    fn variables(&mut self, decl: &VariableDeclaration<'_>, source: &str) -> Result<(), ScanError> {
        for declarator in &decl.declarations {
            let Some(init) = &declarator.init else {
                continue;
            };
            let is_meta = declarator
                .id
                .get_binding_identifier()
                .is_some_and(|ident| ident.name.as_str() == META_NAME);
            if !is_meta {
                continue;
            }
            if self.meta_value.is_some() {
                return Err(ScanError::MultipleMeta);
            }
            self.meta_value = Some(init.span().source_text(source).to_string());
        }
        Ok(())
    }

    fn default_function(&mut self, func: &Function<'_>) -> Result<(), ScanError> {
        if self.default_name.is_some() {
            return Err(ScanError::MultipleDefaultExports);
        }
        let name = func
            .id
            .as_ref()
            .map(|ident| ident.name.to_string())
            .unwrap_or_default();
        self.default_name = Some(name);
        Ok(())
    }

    fn into_view(self) -> Option<ViewData> {
        let default_name = self.default_name?;
        Some(ViewData {
            meta_value: self.meta_value,
            default_name,
        })
    }
}
