use crate::core::ast::{child_blocks, child_exprs, stmt_exprs, FunctionDef, StructuralNode};
use crate::core::BlockComplexity;
use rustpython_parser::ast::{self, Expr, Stmt};

/// Cyclomatic complexity of every function in a module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleComplexity {
    /// Module-level functions in source order, then the methods of each
    /// module-level class. Closures and nested classes get no entry.
    pub blocks: Vec<BlockComplexity>,
    /// Decision points in module-level and class-level code outside any function.
    pub module_decisions: u32,
}

impl ModuleComplexity {
    /// Sum of all function complexities plus module-level decision points.
    pub fn total(&self) -> u32 {
        self.blocks.iter().map(|b| b.complexity).sum::<u32>() + self.module_decisions
    }
}

pub fn calculate_module_complexity(body: &[Stmt]) -> ModuleComplexity {
    let module = scan_block(body);
    let mut module_decisions = module.decisions;
    let mut blocks: Vec<BlockComplexity> = module.functions.iter().map(function_block).collect();

    for class_def in module.classes {
        let class = scan_block(&class_def.body);
        module_decisions += class.decisions;
        blocks.extend(class.functions.iter().map(function_block));
    }

    ModuleComplexity {
        blocks,
        module_decisions,
    }
}

/// Complexity of a single function body: one plus its decision points.
///
/// Closures and classes defined in the body add nothing.
pub fn calculate_cyclomatic(body: &[Stmt]) -> u32 {
    1 + scan_block(body).decisions
}

fn function_block(def: &FunctionDef<'_>) -> BlockComplexity {
    BlockComplexity::new(def.name, calculate_cyclomatic(def.body))
}

/// What a walk over one block found, stopping at `def` and `class` bodies.
#[derive(Default)]
struct BlockScan<'a> {
    decisions: u32,
    functions: Vec<FunctionDef<'a>>,
    classes: Vec<&'a ast::StmtClassDef>,
}

fn scan_block(body: &[Stmt]) -> BlockScan<'_> {
    let mut scan = BlockScan::default();
    let mut stack: Vec<&Stmt> = body.iter().rev().collect();

    while let Some(stmt) = stack.pop() {
        scan.decisions += stmt_exprs(stmt)
            .into_iter()
            .map(count_expr_decisions)
            .sum::<u32>();

        match StructuralNode::classify(stmt) {
            StructuralNode::Function(def) => scan.functions.push(def),
            StructuralNode::Class(class_def) => scan.classes.push(class_def),
            _ => {
                scan.decisions += stmt_decisions(stmt);
                stack.extend(child_blocks(stmt).into_iter().flatten().rev());
            }
        }
    }

    scan
}

fn has_else(orelse: &[Stmt]) -> u32 {
    u32::from(!orelse.is_empty())
}

/// Decision points contributed by the statement itself.
fn stmt_decisions(stmt: &Stmt) -> u32 {
    match stmt {
        // `elif` is an `If` nested in `orelse` and is counted when visited.
        Stmt::If(_) => 1,
        Stmt::For(s) => 1 + has_else(&s.orelse),
        Stmt::AsyncFor(s) => 1 + has_else(&s.orelse),
        Stmt::While(s) => 1 + has_else(&s.orelse),
        Stmt::Try(s) => s.handlers.len() as u32 + has_else(&s.orelse),
        Stmt::TryStar(s) => s.handlers.len() as u32 + has_else(&s.orelse),
        Stmt::Match(s) => s.cases.len() as u32,
        Stmt::Assert(_) => 1,
        _ => 0,
    }
}

fn comprehension_decisions(generators: &[ast::Comprehension]) -> u32 {
    generators
        .iter()
        .map(|generator| 1 + generator.ifs.len() as u32)
        .sum()
}

/// Decision points in an expression tree; lambda bodies are skipped.
fn count_expr_decisions(expr: &Expr) -> u32 {
    let mut stack = vec![expr];
    let mut decisions = 0;

    while let Some(expr) = stack.pop() {
        decisions += match expr {
            Expr::Lambda(_) => continue,
            Expr::BoolOp(e) => e.values.len().saturating_sub(1) as u32,
            Expr::IfExp(_) => 1,
            Expr::ListComp(e) => comprehension_decisions(&e.generators),
            Expr::SetComp(e) => comprehension_decisions(&e.generators),
            Expr::GeneratorExp(e) => comprehension_decisions(&e.generators),
            Expr::DictComp(e) => comprehension_decisions(&e.generators),
            _ => 0,
        };
        stack.extend(child_exprs(expr));
    }

    decisions
}
