//! Text sanitization ahead of construct counting.
//!
//! Pattern rules must never fire on text inside string literals or comments,
//! so counting runs on a sanitized copy: literal contents are dropped (the
//! quote delimiters stay), comment spans are removed entirely, and newlines
//! are kept everywhere so the line layout of the input survives.
//!
//! A single three-state pass (code / literal / comment) handles the ordering
//! hazard of naive substitution: a `//` inside a string never starts a
//! comment, and a quote inside a comment never opens a literal.

/// Scanner state for one pass over the input.
enum State {
    Code,
    LineComment,
    BlockComment,
    /// Inside a string, char, or template literal; holds the closing quote.
    Literal(char),
}

/// Strip string/char/template literal contents and comments from `text`.
///
/// Total function: any input, including non-source text, produces a
/// deterministic output. Unterminated literals and block comments extend to
/// the end of the input. Escaped quotes (`\"`) do not terminate a literal.
///
/// Idempotent: sanitized text is a fixed point, since its literals are empty
/// and its comment markers are gone.
///
/// # Example
///
/// ```rust
/// use flowcountlib::sanitize;
///
/// assert_eq!(sanitize(r#"call("if (x)") // if (y)"#), r#"call("") "#);
/// ```
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut state = State::Code;

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                '"' | '\'' | '`' => {
                    out.push(c);
                    state = State::Literal(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment => match c {
                '*' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::Code;
                }
                '\n' => out.push('\n'),
                _ => {}
            },
            State::Literal(quote) => match c {
                // An escape consumes the next char, so \" stays inside.
                '\\' => {
                    chars.next();
                }
                '\n' => out.push('\n'),
                _ if c == quote => {
                    out.push(c);
                    state = State::Code;
                }
                _ => {}
            },
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_code_unchanged() {
        let src = "if (x) {\n    run();\n}\n";
        assert_eq!(sanitize(src), src);
    }

    #[test]
    fn string_contents_dropped() {
        assert_eq!(sanitize(r#"let s = "if (x) {}";"#), r#"let s = "";"#);
    }

    #[test]
    fn char_and_template_literals_dropped() {
        assert_eq!(sanitize("let c = 'a';"), "let c = '';");
        assert_eq!(sanitize("let t = `while (x)`;"), "let t = ``;");
    }

    #[test]
    fn line_comment_removed() {
        assert_eq!(sanitize("x; // if (y)\ny;"), "x; \ny;");
    }

    #[test]
    fn block_comment_removed_newlines_kept() {
        assert_eq!(sanitize("a;/* for (;;)\nstill comment */b;"), "a;\nb;");
    }

    #[test]
    fn comment_marker_inside_string_is_not_a_comment() {
        assert_eq!(sanitize(r#"let u = "//not a comment"; x;"#), r#"let u = ""; x;"#);
    }

    #[test]
    fn quote_inside_comment_opens_no_literal() {
        assert_eq!(sanitize("// it's fine\nif (x) {}"), "\nif (x) {}");
    }

    #[test]
    fn escaped_quote_does_not_terminate() {
        assert_eq!(sanitize(r#""a\"b" + c"#), r#""" + c"#);
    }

    #[test]
    fn unterminated_literal_extends_to_end() {
        assert_eq!(sanitize("x = \"unterminated if ("), "x = \"");
    }

    #[test]
    fn unterminated_block_comment_extends_to_end() {
        assert_eq!(sanitize("x; /* while ("), "x; ");
    }

    #[test]
    fn multiline_literal_keeps_line_layout() {
        assert_eq!(sanitize("a = `one\ntwo\nthree`;"), "a = `\n\n`;");
    }

    #[test]
    fn division_is_not_a_comment() {
        assert_eq!(sanitize("let r = a / b / c;"), "let r = a / b / c;");
    }

    #[test]
    fn empty_and_non_source_inputs() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("just some prose."), "just some prose.");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "if (x) { \"y // z\" } /* do */ 'q'",
            "`multi\nline` // tail",
            "broken \" literal",
        ];
        for src in inputs {
            let once = sanitize(src);
            assert_eq!(sanitize(&once), once, "not a fixed point: {src:?}");
        }
    }
}
