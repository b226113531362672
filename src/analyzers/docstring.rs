use rustpython_parser::ast::{self, Stmt};

/// Docstring of a module, class or function body, cleaned like `inspect.cleandoc`.
pub fn get_docstring(body: &[Stmt]) -> Option<String> {
    let Stmt::Expr(first) = body.first()? else {
        return None;
    };
    match first.value.as_ref() {
        ast::Expr::Constant(constant) => match &constant.value {
            ast::Constant::Str(text) => Some(clean_docstring(text)),
            _ => None,
        },
        _ => None,
    }
}

/// Strip the first line's leading whitespace, the common indentation of the
/// remaining lines, and any leading or trailing blank lines.
pub fn clean_docstring(doc: &str) -> String {
    let expanded: Vec<String> = doc.split('\n').map(expand_tabs).collect();

    // Margin in characters: leading whitespace may be multibyte.
    let margin = expanded
        .iter()
        .skip(1)
        .filter(|line| !line.trim_start().is_empty())
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);

    let lines: Vec<&str> = expanded
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.trim_start()
            } else {
                skip_chars(line, margin)
            }
        })
        .collect();

    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |i| i + 1);

    lines[start..end].join("\n")
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn skip_chars(line: &str, count: usize) -> &str {
    line.char_indices()
        .nth(count)
        .map_or("", |(offset, _)| &line[offset..])
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let spaces = 8 - column % 8;
            out.extend(std::iter::repeat_n(' ', spaces));
            column += spaces;
        } else {
            out.push(c);
            column = if c == '\n' { 0 } else { column + 1 };
        }
    }
    out
}
