use crate::analyzers::docstring::get_docstring;
use crate::analyzers::guard::{self, NestingLimits};
use crate::core::ast::{child_blocks, FunctionDef, PythonAst, StructuralNode};
use crate::core::{ClassRecord, FunctionRecord, ImportRecord, ModuleStructure, SourceUnit};
use crate::errors::ParseError;
use rustpython_parser::ast::{self, Stmt};
use std::path::PathBuf;

/// Turns Python source into a [`SourceUnit`].
///
/// Only the module's direct functions and classes, and each class's direct
/// methods, are recorded. Imports are collected from the whole tree.
#[derive(Debug, Clone, Default)]
pub struct PythonAnalyzer {
    limits: NestingLimits,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: NestingLimits) -> Self {
        Self { limits }
    }

    /// Parse raw file bytes. Never fails: undecodable or malformed input yields
    /// a unit carrying the parse error.
    pub fn analyze_bytes(&self, path: &str, bytes: &[u8]) -> SourceUnit {
        match decode_source(bytes) {
            Ok(content) => self.analyze_source(path, content),
            Err(error) => SourceUnit::failed(path, error),
        }
    }

    pub fn analyze_source(&self, path: &str, content: &str) -> SourceUnit {
        match self.parse(content, path) {
            Ok(ast) => SourceUnit::parsed(extract_structure(&ast, path)),
            Err(error) => {
                log::warn!("{path}: {error}");
                SourceUnit::failed(path, error)
            }
        }
    }

    /// Parse source text into a syntax tree, enforcing the nesting limits.
    pub fn parse(&self, content: &str, path: &str) -> Result<PythonAst, ParseError> {
        guard::check_source(content, &self.limits)?;

        let module = rustpython_parser::parse(content, rustpython_parser::Mode::Module, path)
            .map_err(|e| {
                ParseError::syntax(e.error.to_string(), line_at(content, e.offset.to_usize()))
            })?;
        let ast = PythonAst {
            module,
            path: PathBuf::from(path),
        };

        guard::check_tree(ast.body(), &self.limits)?;
        Ok(ast)
    }
}

/// Decode file bytes as UTF-8, dropping a leading byte-order mark.
pub fn decode_source(bytes: &[u8]) -> Result<&str, ParseError> {
    let content = std::str::from_utf8(bytes).map_err(|e| ParseError::encoding(e.to_string()))?;
    Ok(content.strip_prefix('\u{feff}').unwrap_or(content))
}

fn line_at(content: &str, offset: usize) -> usize {
    content
        .get(..offset)
        .unwrap_or(content)
        .matches('\n')
        .count()
        + 1
}

pub fn extract_structure(ast: &PythonAst, path: &str) -> ModuleStructure {
    let mut structure = ModuleStructure::new(path);

    for stmt in ast.body() {
        match StructuralNode::classify(stmt) {
            StructuralNode::Function(def) => structure.functions.push(function_record(def)),
            StructuralNode::Class(class_def) => structure.classes.push(class_record(class_def)),
            StructuralNode::Import(_) | StructuralNode::ImportFrom(_) | StructuralNode::Other(_) => {}
        }
    }

    collect_imports(ast.body(), &mut structure.imports);
    structure
}

fn function_record(def: FunctionDef<'_>) -> FunctionRecord {
    FunctionRecord {
        name: def.name.to_string(),
        args: def.positional_params().map(str::to_string).collect(),
        docstring: get_docstring(def.body),
    }
}

fn class_record(class_def: &ast::StmtClassDef) -> ClassRecord {
    let methods = class_def
        .body
        .iter()
        .filter_map(|stmt| match StructuralNode::classify(stmt) {
            StructuralNode::Function(def) => Some(function_record(def)),
            _ => None,
        })
        .collect();

    ClassRecord {
        name: class_def.name.to_string(),
        docstring: get_docstring(&class_def.body),
        methods,
    }
}

/// Imports anywhere in the tree, in source order.
fn collect_imports(body: &[Stmt], imports: &mut Vec<ImportRecord>) {
    let mut stack: Vec<&Stmt> = body.iter().rev().collect();

    while let Some(stmt) = stack.pop() {
        match StructuralNode::classify(stmt) {
            StructuralNode::Import(import) => {
                imports.extend(import.names.iter().map(|alias| ImportRecord {
                    module: alias.name.to_string(),
                    name: None,
                    alias: alias.asname.as_ref().map(|a| a.to_string()),
                }));
            }
            StructuralNode::ImportFrom(import_from) => {
                let module = from_module(import_from);
                imports.extend(import_from.names.iter().map(|alias| ImportRecord {
                    module: module.clone(),
                    name: Some(alias.name.to_string()),
                    alias: alias.asname.as_ref().map(|a| a.to_string()),
                }));
            }
            StructuralNode::Function(_) | StructuralNode::Class(_) | StructuralNode::Other(_) => {
                stack.extend(child_blocks(stmt).into_iter().flatten().rev());
            }
        }
    }
}

/// Module of a `from` import, with one leading dot per relative level.
fn from_module(import_from: &ast::StmtImportFrom) -> String {
    let level = import_from
        .level
        .as_ref()
        .map_or(0, |level| level.to_u32() as usize);
    let module = import_from
        .module
        .as_ref()
        .map_or("", |module| module.as_str());
    format!("{}{}", ".".repeat(level), module)
}
