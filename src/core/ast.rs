//! Typed views over the Python syntax tree.
//!
//! Statement kinds the structural model cares about are folded into the closed
//! [`StructuralNode`] set, so extraction is a single `match` per kind. The
//! remaining helpers enumerate a node's children without recursing, which lets
//! metric visitors decide for themselves which subtrees to enter.
//!
//! Nothing here recurses over the tree. Unbracketed `elif` chains, operator
//! chains and unary runs nest as deep as the source is long, so walks and
//! even the final drop use explicit work lists.

use rustpython_parser::ast::{self, Expr, Stmt};
use std::iter::once;
use std::path::PathBuf;

#[derive(Debug)]
pub struct PythonAst {
    pub module: ast::Mod,
    pub path: PathBuf,
}

impl Drop for PythonAst {
    fn drop(&mut self) {
        if let ast::Mod::Module(module) = &mut self.module {
            release_tree(std::mem::take(&mut module.body));
        }
    }
}

impl PythonAst {
    /// Top-level statements of the module.
    pub fn body(&self) -> &[Stmt] {
        match &self.module {
            ast::Mod::Module(module) => module.body.as_slice(),
            _ => &[],
        }
    }
}

/// A `def` or `async def`, which the model treats identically.
#[derive(Clone, Copy, Debug)]
pub struct FunctionDef<'a> {
    pub name: &'a str,
    pub args: &'a ast::Arguments,
    pub body: &'a [Stmt],
}

impl<'a> FunctionDef<'a> {
    /// Positional-only then regular positional parameters, as declared.
    pub fn positional_params(&self) -> impl Iterator<Item = &'a str> {
        self.args
            .posonlyargs
            .iter()
            .chain(self.args.args.iter())
            .map(|param| param.def.arg.as_str())
    }
}

/// The statement kinds that shape a module's structural model.
#[derive(Clone, Copy, Debug)]
pub enum StructuralNode<'a> {
    Import(&'a ast::StmtImport),
    ImportFrom(&'a ast::StmtImportFrom),
    Function(FunctionDef<'a>),
    Class(&'a ast::StmtClassDef),
    Other(&'a Stmt),
}

impl<'a> StructuralNode<'a> {
    pub fn classify(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::Import(import) => StructuralNode::Import(import),
            Stmt::ImportFrom(import_from) => StructuralNode::ImportFrom(import_from),
            Stmt::FunctionDef(def) => StructuralNode::Function(FunctionDef {
                name: def.name.as_str(),
                args: &def.args,
                body: &def.body,
            }),
            Stmt::AsyncFunctionDef(def) => StructuralNode::Function(FunctionDef {
                name: def.name.as_str(),
                args: &def.args,
                body: &def.body,
            }),
            Stmt::ClassDef(class_def) => StructuralNode::Class(class_def),
            other => StructuralNode::Other(other),
        }
    }
}

/// Either kind of tree node, for traversals that cross statement/expression boundaries.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl<'a> Node<'a> {
    pub fn children(self) -> Vec<Node<'a>> {
        match self {
            Node::Stmt(stmt) => stmt_exprs(stmt)
                .into_iter()
                .map(Node::Expr)
                .chain(
                    child_blocks(stmt)
                        .into_iter()
                        .flatten()
                        .map(Node::Stmt),
                )
                .collect(),
            Node::Expr(expr) => child_exprs(expr).into_iter().map(Node::Expr).collect(),
        }
    }
}

/// The statement's own `body` block, if it has one.
///
/// Only `body` counts: `else`, `except` and `finally` blocks, and `match`
/// cases, are not a statement's body.
pub fn owned_body(stmt: &Stmt) -> Option<&[Stmt]> {
    match stmt {
        Stmt::FunctionDef(s) => Some(s.body.as_slice()),
        Stmt::AsyncFunctionDef(s) => Some(s.body.as_slice()),
        Stmt::ClassDef(s) => Some(s.body.as_slice()),
        Stmt::If(s) => Some(s.body.as_slice()),
        Stmt::For(s) => Some(s.body.as_slice()),
        Stmt::AsyncFor(s) => Some(s.body.as_slice()),
        Stmt::While(s) => Some(s.body.as_slice()),
        Stmt::With(s) => Some(s.body.as_slice()),
        Stmt::AsyncWith(s) => Some(s.body.as_slice()),
        Stmt::Try(s) => Some(s.body.as_slice()),
        Stmt::TryStar(s) => Some(s.body.as_slice()),
        _ => None,
    }
}

/// Every statement block nested directly in `stmt`, in source order.
pub fn child_blocks(stmt: &Stmt) -> Vec<&[Stmt]> {
    match stmt {
        Stmt::FunctionDef(s) => vec![s.body.as_slice()],
        Stmt::AsyncFunctionDef(s) => vec![s.body.as_slice()],
        Stmt::ClassDef(s) => vec![s.body.as_slice()],
        Stmt::For(s) => vec![s.body.as_slice(), s.orelse.as_slice()],
        Stmt::AsyncFor(s) => vec![s.body.as_slice(), s.orelse.as_slice()],
        Stmt::While(s) => vec![s.body.as_slice(), s.orelse.as_slice()],
        Stmt::If(s) => vec![s.body.as_slice(), s.orelse.as_slice()],
        Stmt::With(s) => vec![s.body.as_slice()],
        Stmt::AsyncWith(s) => vec![s.body.as_slice()],
        Stmt::Match(s) => s.cases.iter().map(|case| case.body.as_slice()).collect(),
        Stmt::Try(s) => try_blocks(&s.body, &s.handlers, &s.orelse, &s.finalbody),
        Stmt::TryStar(s) => try_blocks(&s.body, &s.handlers, &s.orelse, &s.finalbody),
        _ => Vec::new(),
    }
}

fn try_blocks<'a>(
    body: &'a [Stmt],
    handlers: &'a [ast::ExceptHandler],
    orelse: &'a [Stmt],
    finalbody: &'a [Stmt],
) -> Vec<&'a [Stmt]> {
    once(body)
        .chain(handlers.iter().map(handler_body))
        .chain([orelse, finalbody])
        .collect()
}

pub fn handler_body(handler: &ast::ExceptHandler) -> &[Stmt] {
    match handler {
        ast::ExceptHandler::ExceptHandler(h) => &h.body,
    }
}

/// Expressions evaluated by `stmt` itself, excluding those inside its blocks.
pub fn stmt_exprs(stmt: &Stmt) -> Vec<&Expr> {
    match stmt {
        Stmt::FunctionDef(s) => s
            .decorator_list
            .iter()
            .chain(argument_defaults(&s.args))
            .collect(),
        Stmt::AsyncFunctionDef(s) => s
            .decorator_list
            .iter()
            .chain(argument_defaults(&s.args))
            .collect(),
        Stmt::ClassDef(s) => s
            .decorator_list
            .iter()
            .chain(s.bases.iter())
            .chain(s.keywords.iter().map(|k| &k.value))
            .collect(),
        Stmt::Return(s) => s.value.as_deref().into_iter().collect(),
        Stmt::Delete(s) => s.targets.iter().collect(),
        Stmt::Assign(s) => s.targets.iter().chain(once(&*s.value)).collect(),
        Stmt::AugAssign(s) => vec![&*s.target, &*s.value],
        Stmt::AnnAssign(s) => once(&*s.target).chain(s.value.as_deref()).collect(),
        Stmt::For(s) => vec![&*s.target, &*s.iter],
        Stmt::AsyncFor(s) => vec![&*s.target, &*s.iter],
        Stmt::While(s) => vec![&*s.test],
        Stmt::If(s) => vec![&*s.test],
        Stmt::With(s) => with_item_exprs(&s.items),
        Stmt::AsyncWith(s) => with_item_exprs(&s.items),
        Stmt::Match(s) => once(&*s.subject)
            .chain(s.cases.iter().filter_map(|case| case.guard.as_deref()))
            .collect(),
        Stmt::Raise(s) => s
            .exc
            .as_deref()
            .into_iter()
            .chain(s.cause.as_deref())
            .collect(),
        Stmt::Try(s) => handler_types(&s.handlers),
        Stmt::TryStar(s) => handler_types(&s.handlers),
        Stmt::Assert(s) => once(&*s.test).chain(s.msg.as_deref()).collect(),
        Stmt::Expr(s) => vec![&*s.value],
        _ => Vec::new(),
    }
}

fn with_item_exprs(items: &[ast::WithItem]) -> Vec<&Expr> {
    items
        .iter()
        .flat_map(|item| once(&item.context_expr).chain(item.optional_vars.as_deref()))
        .collect()
}

fn handler_types(handlers: &[ast::ExceptHandler]) -> Vec<&Expr> {
    handlers
        .iter()
        .filter_map(|handler| match handler {
            ast::ExceptHandler::ExceptHandler(h) => h.type_.as_deref(),
        })
        .collect()
}

fn argument_defaults(args: &ast::Arguments) -> impl Iterator<Item = &Expr> {
    args.posonlyargs
        .iter()
        .chain(args.args.iter())
        .chain(args.kwonlyargs.iter())
        .filter_map(|arg| arg.default.as_deref())
}

fn comprehension_exprs(generators: &[ast::Comprehension]) -> impl Iterator<Item = &Expr> {
    generators.iter().flat_map(|generator| {
        once(&generator.target)
            .chain(once(&generator.iter))
            .chain(generator.ifs.iter())
    })
}

/// Direct sub-expressions of `expr`, in evaluation-ish order.
pub fn child_exprs(expr: &Expr) -> Vec<&Expr> {
    match expr {
        Expr::BoolOp(e) => e.values.iter().collect(),
        Expr::NamedExpr(e) => vec![&*e.target, &*e.value],
        Expr::BinOp(e) => vec![&*e.left, &*e.right],
        Expr::UnaryOp(e) => vec![&*e.operand],
        Expr::Lambda(e) => argument_defaults(&e.args).chain(once(&*e.body)).collect(),
        Expr::IfExp(e) => vec![&*e.test, &*e.body, &*e.orelse],
        Expr::Dict(e) => e.keys.iter().flatten().chain(e.values.iter()).collect(),
        Expr::Set(e) => e.elts.iter().collect(),
        Expr::ListComp(e) => once(&*e.elt)
            .chain(comprehension_exprs(&e.generators))
            .collect(),
        Expr::SetComp(e) => once(&*e.elt)
            .chain(comprehension_exprs(&e.generators))
            .collect(),
        Expr::GeneratorExp(e) => once(&*e.elt)
            .chain(comprehension_exprs(&e.generators))
            .collect(),
        Expr::DictComp(e) => [&*e.key, &*e.value]
            .into_iter()
            .chain(comprehension_exprs(&e.generators))
            .collect(),
        Expr::Await(e) => vec![&*e.value],
        Expr::Yield(e) => e.value.as_deref().into_iter().collect(),
        Expr::YieldFrom(e) => vec![&*e.value],
        Expr::Compare(e) => once(&*e.left).chain(e.comparators.iter()).collect(),
        Expr::Call(e) => once(&*e.func)
            .chain(e.args.iter())
            .chain(e.keywords.iter().map(|k| &k.value))
            .collect(),
        Expr::FormattedValue(e) => once(&*e.value).chain(e.format_spec.as_deref()).collect(),
        Expr::JoinedStr(e) => e.values.iter().collect(),
        Expr::Attribute(e) => vec![&*e.value],
        Expr::Subscript(e) => vec![&*e.value, &*e.slice],
        Expr::Starred(e) => vec![&*e.value],
        Expr::List(e) => e.elts.iter().collect(),
        Expr::Tuple(e) => e.elts.iter().collect(),
        Expr::Slice(e) => e
            .lower
            .as_deref()
            .into_iter()
            .chain(e.upper.as_deref())
            .chain(e.step.as_deref())
            .collect(),
        _ => Vec::new(),
    }
}

/// Depth of the deepest node under `body`, walked with an explicit stack.
///
/// Top-level statements are at depth 1. An `elif` extends its `if` and the
/// left operand of a binary operator chain extends the chain, so neither adds
/// a level.
pub fn tree_depth(body: &[Stmt]) -> usize {
    let mut stack: Vec<(Node<'_>, usize)> = body.iter().map(|s| (Node::Stmt(s), 1)).collect();
    let mut deepest = 0;

    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(node.children().into_iter().map(|child| {
            let level = if extends_chain(node, child) {
                depth
            } else {
                depth + 1
            };
            (child, level)
        }));
    }

    deepest
}

fn extends_chain(parent: Node<'_>, child: Node<'_>) -> bool {
    match (parent, child) {
        (Node::Stmt(Stmt::If(parent)), Node::Stmt(child)) => {
            matches!(parent.orelse.as_slice(), [only] if std::ptr::eq(only, child))
        }
        (Node::Expr(Expr::BinOp(parent)), Node::Expr(child)) => {
            matches!(child, Expr::BinOp(_)) && std::ptr::eq(&*parent.left, child)
        }
        _ => false,
    }
}

/// An owned node waiting to be taken apart.
enum Owned {
    Stmt(Stmt),
    Expr(Expr),
}

/// Drop a statement list without recursing into it.
///
/// Each node is destructured by value and its children moved onto a heap work
/// list, so the drop glue only ever sees nodes whose subtrees are shallow.
pub fn release_tree(body: Vec<Stmt>) {
    let mut pending = Release(body.into_iter().map(Owned::Stmt).collect());
    while let Some(node) = pending.0.pop() {
        match node {
            Owned::Stmt(stmt) => pending.stmt(stmt),
            Owned::Expr(expr) => pending.expr(expr),
        }
    }
}

struct Release(Vec<Owned>);

impl Release {
    fn stmts(&mut self, stmts: Vec<Stmt>) {
        self.0.extend(stmts.into_iter().map(Owned::Stmt));
    }

    fn exprs(&mut self, exprs: impl IntoIterator<Item = Expr>) {
        self.0.extend(exprs.into_iter().map(Owned::Expr));
    }

    fn boxed(&mut self, expr: Box<Expr>) {
        self.0.push(Owned::Expr(*expr));
    }

    fn optional(&mut self, expr: Option<Box<Expr>>) {
        if let Some(expr) = expr {
            self.boxed(expr);
        }
    }

    fn arguments(&mut self, arguments: Box<ast::Arguments>) {
        let ast::Arguments {
            posonlyargs,
            args,
            vararg,
            kwonlyargs,
            kwarg,
            ..
        } = *arguments;
        for param in posonlyargs.into_iter().chain(args).chain(kwonlyargs) {
            self.optional(param.default);
            self.optional(param.def.annotation);
        }
        for param in vararg.into_iter().chain(kwarg) {
            self.optional(param.annotation);
        }
    }

    fn generators(&mut self, generators: Vec<ast::Comprehension>) {
        for generator in generators {
            self.exprs([generator.target, generator.iter]);
            self.exprs(generator.ifs);
        }
    }

    fn keywords(&mut self, keywords: Vec<ast::Keyword>) {
        self.exprs(keywords.into_iter().map(|keyword| keyword.value));
    }

    fn with_items(&mut self, items: Vec<ast::WithItem>) {
        for item in items {
            self.exprs([item.context_expr]);
            self.optional(item.optional_vars);
        }
    }

    fn handlers(&mut self, handlers: Vec<ast::ExceptHandler>) {
        for handler in handlers {
            let ast::ExceptHandler::ExceptHandler(handler) = handler;
            self.optional(handler.type_);
            self.stmts(handler.body);
        }
    }

    fn stmt(&mut self, stmt: Stmt) {
        match stmt {
            Stmt::FunctionDef(ast::StmtFunctionDef {
                args,
                body,
                decorator_list,
                returns,
                ..
            })
            | Stmt::AsyncFunctionDef(ast::StmtAsyncFunctionDef {
                args,
                body,
                decorator_list,
                returns,
                ..
            }) => {
                self.arguments(args);
                self.stmts(body);
                self.exprs(decorator_list);
                self.optional(returns);
            }
            Stmt::ClassDef(ast::StmtClassDef {
                bases,
                keywords,
                body,
                decorator_list,
                ..
            }) => {
                self.exprs(bases);
                self.keywords(keywords);
                self.stmts(body);
                self.exprs(decorator_list);
            }
            Stmt::Return(ast::StmtReturn { value, .. }) => self.optional(value),
            Stmt::Delete(ast::StmtDelete { targets, .. }) => self.exprs(targets),
            Stmt::Assign(ast::StmtAssign { targets, value, .. }) => {
                self.exprs(targets);
                self.boxed(value);
            }
            Stmt::TypeAlias(ast::StmtTypeAlias { name, value, .. }) => {
                self.boxed(name);
                self.boxed(value);
            }
            Stmt::AugAssign(ast::StmtAugAssign { target, value, .. }) => {
                self.boxed(target);
                self.boxed(value);
            }
            Stmt::AnnAssign(ast::StmtAnnAssign {
                target,
                annotation,
                value,
                ..
            }) => {
                self.boxed(target);
                self.boxed(annotation);
                self.optional(value);
            }
            Stmt::For(ast::StmtFor {
                target,
                iter,
                body,
                orelse,
                ..
            })
            | Stmt::AsyncFor(ast::StmtAsyncFor {
                target,
                iter,
                body,
                orelse,
                ..
            }) => {
                self.boxed(target);
                self.boxed(iter);
                self.stmts(body);
                self.stmts(orelse);
            }
            Stmt::While(ast::StmtWhile {
                test, body, orelse, ..
            })
            | Stmt::If(ast::StmtIf {
                test, body, orelse, ..
            }) => {
                self.boxed(test);
                self.stmts(body);
                self.stmts(orelse);
            }
            Stmt::With(ast::StmtWith { items, body, .. })
            | Stmt::AsyncWith(ast::StmtAsyncWith { items, body, .. }) => {
                self.with_items(items);
                self.stmts(body);
            }
            Stmt::Match(ast::StmtMatch { subject, cases, .. }) => {
                self.boxed(subject);
                for case in cases {
                    self.optional(case.guard);
                    self.stmts(case.body);
                }
            }
            Stmt::Raise(ast::StmtRaise { exc, cause, .. }) => {
                self.optional(exc);
                self.optional(cause);
            }
            Stmt::Try(ast::StmtTry {
                body,
                handlers,
                orelse,
                finalbody,
                ..
            })
            | Stmt::TryStar(ast::StmtTryStar {
                body,
                handlers,
                orelse,
                finalbody,
                ..
            }) => {
                self.stmts(body);
                self.handlers(handlers);
                self.stmts(orelse);
                self.stmts(finalbody);
            }
            Stmt::Assert(ast::StmtAssert { test, msg, .. }) => {
                self.boxed(test);
                self.optional(msg);
            }
            Stmt::Expr(ast::StmtExpr { value, .. }) => self.boxed(value),
            _ => {}
        }
    }

    fn expr(&mut self, expr: Expr) {
        match expr {
            Expr::BoolOp(ast::ExprBoolOp { values, .. }) => self.exprs(values),
            Expr::NamedExpr(ast::ExprNamedExpr { target, value, .. }) => {
                self.boxed(target);
                self.boxed(value);
            }
            Expr::BinOp(ast::ExprBinOp { left, right, .. }) => {
                self.boxed(left);
                self.boxed(right);
            }
            Expr::UnaryOp(ast::ExprUnaryOp { operand, .. }) => self.boxed(operand),
            Expr::Lambda(ast::ExprLambda { args, body, .. }) => {
                self.arguments(args);
                self.boxed(body);
            }
            Expr::IfExp(ast::ExprIfExp {
                test, body, orelse, ..
            }) => {
                self.boxed(test);
                self.boxed(body);
                self.boxed(orelse);
            }
            Expr::Dict(ast::ExprDict { keys, values, .. }) => {
                self.exprs(keys.into_iter().flatten());
                self.exprs(values);
            }
            Expr::Set(ast::ExprSet { elts, .. })
            | Expr::List(ast::ExprList { elts, .. })
            | Expr::Tuple(ast::ExprTuple { elts, .. }) => self.exprs(elts),
            Expr::ListComp(ast::ExprListComp {
                elt, generators, ..
            })
            | Expr::SetComp(ast::ExprSetComp {
                elt, generators, ..
            })
            | Expr::GeneratorExp(ast::ExprGeneratorExp {
                elt, generators, ..
            }) => {
                self.boxed(elt);
                self.generators(generators);
            }
            Expr::DictComp(ast::ExprDictComp {
                key,
                value,
                generators,
                ..
            }) => {
                self.boxed(key);
                self.boxed(value);
                self.generators(generators);
            }
            Expr::Await(ast::ExprAwait { value, .. })
            | Expr::YieldFrom(ast::ExprYieldFrom { value, .. })
            | Expr::Attribute(ast::ExprAttribute { value, .. })
            | Expr::Starred(ast::ExprStarred { value, .. }) => self.boxed(value),
            Expr::Yield(ast::ExprYield { value, .. }) => self.optional(value),
            Expr::Compare(ast::ExprCompare {
                left, comparators, ..
            }) => {
                self.boxed(left);
                self.exprs(comparators);
            }
            Expr::Call(ast::ExprCall {
                func,
                args,
                keywords,
                ..
            }) => {
                self.boxed(func);
                self.exprs(args);
                self.keywords(keywords);
            }
            Expr::FormattedValue(ast::ExprFormattedValue {
                value, format_spec, ..
            }) => {
                self.boxed(value);
                self.optional(format_spec);
            }
            Expr::JoinedStr(ast::ExprJoinedStr { values, .. }) => self.exprs(values),
            Expr::Subscript(ast::ExprSubscript { value, slice, .. }) => {
                self.boxed(value);
                self.boxed(slice);
            }
            Expr::Slice(ast::ExprSlice {
                lower, upper, step, ..
            }) => {
                self.optional(lower);
                self.optional(upper);
                self.optional(step);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Vec<Stmt> {
        match rustpython_parser::parse(code, rustpython_parser::Mode::Module, "<test>")
            .expect("Failed to parse Python code")
        {
            ast::Mod::Module(module) => module.body,
            _ => panic!("expected a module"),
        }
    }

    #[test]
    fn test_classify_async_def_as_function() {
        let body = parse("async def fetch(url, timeout):\n    pass\n");
        match StructuralNode::classify(&body[0]) {
            StructuralNode::Function(def) => {
                assert_eq!(def.name, "fetch");
                let params: Vec<_> = def.positional_params().collect();
                assert_eq!(params, vec!["url", "timeout"]);
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_positional_params_skip_star_args_and_keyword_only() {
        let body = parse("def f(a, /, b, *args, c, **kw):\n    pass\n");
        let StructuralNode::Function(def) = StructuralNode::classify(&body[0]) else {
            panic!("expected function");
        };
        let params: Vec<_> = def.positional_params().collect();
        assert_eq!(params, vec!["a", "b"]);
    }

    #[test]
    fn test_owned_body_ignores_else_blocks() {
        let body = parse("if x:\n    a = 1\nelse:\n    b = 2\n    c = 3\n");
        assert_eq!(owned_body(&body[0]).map(|b| b.len()), Some(1));
        assert_eq!(child_blocks(&body[0]).len(), 2);
    }

    #[test]
    fn test_try_blocks_include_handlers_and_finally() {
        let body = parse(
            "try:\n    a()\nexcept ValueError:\n    b()\nexcept KeyError:\n    c()\nelse:\n    d()\nfinally:\n    e()\n",
        );
        let blocks = child_blocks(&body[0]);
        assert_eq!(blocks.len(), 5);
        assert_eq!(stmt_exprs(&body[0]).len(), 2);
    }

    #[test]
    fn test_tree_depth_counts_expressions() {
        let flat = parse("x = 1\n");
        // Assign -> target Name / value Constant
        assert_eq!(tree_depth(&flat), 2);

        let nested = parse("x = ((((1))))\n");
        assert_eq!(tree_depth(&nested), 2);

        let calls = parse("f(g(h(1)))\n");
        // Expr stmt -> f(...) -> g(...) -> h(...) -> 1
        assert_eq!(tree_depth(&calls), 5);
    }

    #[test]
    fn test_tree_depth_flattens_elif_and_left_operator_chains() {
        let branches: String = (1..500)
            .map(|i| format!("elif x == {i}:\n    y = {i}\n"))
            .collect();
        let elifs = parse(&format!("if x == 0:\n    y = 0\n{branches}"));
        // If -> Compare -> Name/Constant, however many branches follow
        assert_eq!(tree_depth(&elifs), 3);

        let terms: Vec<String> = (0..800).map(|i| format!("'s{i}'")).collect();
        let concat = parse(&format!("TABLE = {}\n", terms.join(" + ")));
        // Assign -> BinOp chain -> Constant
        assert_eq!(tree_depth(&concat), 3);

        let unary = parse(&format!("x = {}y\n", "not ".repeat(50)));
        assert_eq!(tree_depth(&unary), 52);
    }

    #[test]
    fn test_release_tree_handles_deep_chains() {
        let code = format!("x = {}y\n", "not ".repeat(2_000));
        let ast = PythonAst {
            module: rustpython_parser::parse(&code, rustpython_parser::Mode::Module, "<test>")
                .expect("Failed to parse Python code"),
            path: PathBuf::from("<test>"),
        };
        assert_eq!(tree_depth(ast.body()), 2_002);
        drop(ast);

        let mut body = parse("def f(a=1, *args: int):\n    with g() as h:\n        return [i for i in h if i]\n");
        body.extend(parse("try:\n    pass\nexcept E:\n    raise X from Y\n"));
        release_tree(body);
    }
}
