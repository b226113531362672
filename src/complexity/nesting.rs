use crate::core::ast::owned_body;
use rustpython_parser::ast::Stmt;

/// Deepest level of compound statements under the module body.
///
/// The module body is level 0; each statement owning a `body` block descends
/// one level into it. `else`, `except` and `finally` blocks and `match` arms
/// are not descended into.
pub fn calculate_nesting_depth(body: &[Stmt]) -> u32 {
    let mut stack: Vec<(&[Stmt], u32)> = vec![(body, 0)];
    let mut deepest = 0;

    while let Some((block, level)) = stack.pop() {
        deepest = deepest.max(level);
        stack.extend(
            block
                .iter()
                .filter_map(owned_body)
                .map(|nested| (nested, level + 1)),
        );
    }

    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn depth(code: &str) -> u32 {
        match rustpython_parser::parse(code, rustpython_parser::Mode::Module, "<test>")
            .expect("Failed to parse Python code")
        {
            rustpython_parser::ast::Mod::Module(module) => calculate_nesting_depth(&module.body),
            _ => panic!("expected a module"),
        }
    }

    #[test]
    fn test_flat_module() {
        assert_eq!(depth(""), 0);
        assert_eq!(depth("x = 1\n"), 0);
        assert_eq!(depth("if x:\n    y = 1\n"), 1);
    }

    #[test]
    fn test_function_with_if() {
        assert_eq!(depth("def f(a, b):\n    if a:\n        return b\n"), 2);
    }

    #[test]
    fn test_function_if_for_chain() {
        let code = indoc! {r#"
            def f(rows):
                if rows:
                    for row in rows:
                        print(row)
        "#};
        assert_eq!(depth(code), 3);
    }

    #[test]
    fn test_else_and_handler_blocks_are_not_descended() {
        let code = indoc! {r#"
            try:
                pass
            except ValueError:
                if a:
                    if b:
                        pass
            if c:
                pass
            else:
                while d:
                    pass
        "#};
        assert_eq!(depth(code), 1);
    }

    #[test]
    fn test_class_methods_count() {
        let code = indoc! {r#"
            class A:
                def m(self):
                    with open(p) as fh:
                        return fh.read()
        "#};
        assert_eq!(depth(code), 3);
    }
}
