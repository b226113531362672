//! Halstead operator/operand counting over a whole module.
//!
//! Operators are the arithmetic, bitwise, unary, boolean, comparison and
//! augmented-assignment operators. Operands are the expressions those
//! operators apply to, identified by their source text.

use crate::core::ast::Node;
use rustpython_parser::ast::{Expr, Ranged, Stmt};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalsteadMetrics {
    pub distinct_operators: usize,
    pub distinct_operands: usize,
    pub total_operators: usize,
    pub total_operands: usize,
}

impl HalsteadMetrics {
    pub fn vocabulary(&self) -> usize {
        self.distinct_operators + self.distinct_operands
    }

    pub fn length(&self) -> usize {
        self.total_operators + self.total_operands
    }

    /// `length * log2(vocabulary)`, zero for an empty vocabulary.
    pub fn volume(&self) -> f64 {
        let vocabulary = self.vocabulary();
        if vocabulary == 0 {
            return 0.0;
        }
        self.length() as f64 * (vocabulary as f64).log2()
    }
}

#[derive(Default)]
struct HalsteadCounter<'s> {
    source: &'s str,
    operators: HashSet<String>,
    operands: HashSet<&'s str>,
    total_operators: usize,
    total_operands: usize,
}

impl<'s> HalsteadCounter<'s> {
    fn operator(&mut self, op: String) {
        self.total_operators += 1;
        self.operators.insert(op);
    }

    fn operand(&mut self, expr: &Expr) {
        self.total_operands += 1;
        let source = self.source;
        let range = expr.range();
        let text = source
            .get(range.start().to_usize()..range.end().to_usize())
            .unwrap_or("?");
        self.operands.insert(text);
    }

    fn visit(&mut self, node: Node<'_>) {
        match node {
            Node::Stmt(Stmt::AugAssign(s)) => {
                self.operator(format!("{:?}=", s.op));
                self.operand(&s.target);
                self.operand(&s.value);
            }
            Node::Expr(Expr::BinOp(e)) => {
                self.operator(format!("{:?}", e.op));
                self.operand(&e.left);
                self.operand(&e.right);
            }
            Node::Expr(Expr::UnaryOp(e)) => {
                self.operator(format!("{:?}", e.op));
                self.operand(&e.operand);
            }
            Node::Expr(Expr::BoolOp(e)) => {
                self.operator(format!("{:?}", e.op));
                e.values.iter().for_each(|value| self.operand(value));
            }
            Node::Expr(Expr::Compare(e)) => {
                e.ops.iter().for_each(|op| self.operator(format!("{op:?}")));
                self.operand(&e.left);
                e.comparators.iter().for_each(|value| self.operand(value));
            }
            _ => {}
        }
    }

    fn finish(self) -> HalsteadMetrics {
        HalsteadMetrics {
            distinct_operators: self.operators.len(),
            distinct_operands: self.operands.len(),
            total_operators: self.total_operators,
            total_operands: self.total_operands,
        }
    }
}

/// Count operators and operands across every statement and expression in `body`.
pub fn calculate_halstead(source: &str, body: &[Stmt]) -> HalsteadMetrics {
    let mut counter = HalsteadCounter {
        source,
        ..HalsteadCounter::default()
    };
    let mut stack: Vec<Node<'_>> = body.iter().rev().map(Node::Stmt).collect();

    while let Some(node) = stack.pop() {
        counter.visit(node);
        stack.extend(node.children().into_iter().rev());
    }

    counter.finish()
}
