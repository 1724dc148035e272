//! Indentation-aware text writer.

/// Accumulates lines of generated code at a tracked block depth.
///
/// Structural lines never carry trailing whitespace and blank lines are
/// written without indentation. Fragments are the exception: their text is
/// relocated as-is.
#[derive(Debug)]
pub struct CodeBuilder {
    buf: String,
    indent_width: usize,
    level: usize,
}

impl CodeBuilder {
    /// Creates an empty builder indenting `indent_width` spaces per level.
    pub fn new(indent_width: usize) -> Self {
        Self {
            buf: String::with_capacity(1024),
            indent_width,
            level: 0,
        }
    }

    /// Writes one line at the current depth.
    pub fn line(&mut self, text: &str) -> &mut Self {
        let text = text.trim_end();
        if !text.is_empty() {
            self.push_indent();
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    /// Writes an empty line.
    pub fn blank_line(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Writes `{` and enters a block.
    pub fn open_block(&mut self) -> &mut Self {
        self.line("{");
        self.level += 1;
        self
    }

    /// Leaves a block and writes `}`. Extra closes are ignored.
    pub fn close_block(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self.line("}")
    }

    /// Writes a possibly multi-line fragment verbatim.
    ///
    /// Only the first line is indented to the current depth. Continuation
    /// lines are written byte for byte, since they may sit inside a
    /// multi-line string literal.
    pub fn fragment(&mut self, text: &str) -> &mut Self {
        let text = text.trim();
        if text.is_empty() {
            return self.blank_line();
        }
        self.push_indent();
        self.buf.push_str(text);
        self.buf.push('\n');
        self
    }

    /// Writes a multi-line fragment re-indented to the current depth.
    ///
    /// Continuation lines lose the indentation they share and trailing
    /// whitespace, keeping their relative layout. This rewrites the text of
    /// any multi-line literal in the fragment.
    pub fn fragment_reindented(&mut self, text: &str) -> &mut Self {
        let mut lines = text.lines();
        let Some(first) = lines.next() else {
            return self.blank_line();
        };
        self.line(first.trim_start());

        let rest: Vec<&str> = lines.collect();
        let common = rest
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0);
        for line in rest {
            self.line(line.get(common..).unwrap_or_else(|| line.trim_start()));
        }
        self
    }

    /// Current block depth.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns the accumulated text.
    pub fn finish(self) -> String {
        self.buf
    }

    fn push_indent(&mut self) {
        let width = self.level * self.indent_width;
        self.buf.extend(std::iter::repeat(' ').take(width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blocks_indent_lines() {
        let mut b = CodeBuilder::new(4);
        b.line("class A").open_block().line("int X;").close_block();
        assert_eq!(b.finish(), "class A\n{\n    int X;\n}\n");
    }

    #[test]
    fn trailing_whitespace_is_stripped() {
        let mut b = CodeBuilder::new(2);
        b.open_block().line("x;   ").line("   ").close_block();
        assert_eq!(b.finish(), "{\n  x;\n\n}\n");
    }

    #[test]
    fn fragment_is_relocated_verbatim() {
        let text = "string S = @\"first  \n        second\";";
        let mut b = CodeBuilder::new(4);
        b.open_block().fragment(text).close_block();
        assert_eq!(
            b.finish(),
            "{\n    string S = @\"first  \n        second\";\n}\n"
        );
    }

    #[test]
    fn verbatim_fragment_keeps_continuation_layout() {
        let text = "\n  public int Area()\n        {\n\n            return 0;\n        }\n";
        let mut b = CodeBuilder::new(4);
        b.open_block().fragment(text).close_block();
        assert_eq!(
            b.finish(),
            "{\n    public int Area()\n        {\n\n            return 0;\n        }\n}\n"
        );
    }

    #[test]
    fn fragment_is_reindented_on_request() {
        let text = "public int Area()\n        {\n            return 0;\n        }";
        let mut b = CodeBuilder::new(4);
        b.open_block().fragment_reindented(text).close_block();
        assert_eq!(
            b.finish(),
            "{\n    public int Area()\n    {\n        return 0;\n    }\n}\n"
        );
    }

    #[test]
    fn reindented_fragment_handles_crlf_and_blank_lines() {
        let text = "void F()\r\n\t{\r\n\r\n\t}";
        let mut b = CodeBuilder::new(2);
        b.open_block().fragment_reindented(text).close_block();
        assert_eq!(b.finish(), "{\n  void F()\n  {\n\n  }\n}\n");
    }

    #[test]
    fn unbalanced_close_stays_at_zero() {
        let mut b = CodeBuilder::new(4);
        b.close_block();
        assert_eq!(b.level(), 0);
        assert_eq!(b.finish(), "}\n");
    }
}
