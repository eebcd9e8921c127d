use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    colored: bool,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            colored: !matches!(support, ColorSupport::NoColor),
        }
    }

    pub fn plain() -> Self {
        Self { colored: false }
    }

    fn enabled(&self) -> bool {
        self.colored
    }

    /// Colors the verb by whether `is_known` accepts it and marks redirect
    /// operators. Whitespace is kept as typed so the cursor stays aligned.
    pub fn highlight_command(&self, input: &str, is_known: impl Fn(&str) -> bool) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut highlighted = String::with_capacity(input.len());
        let mut seen_verb = false;
        for piece in input.split_inclusive(char::is_whitespace) {
            let word = piece.trim_end();
            let trailing = &piece[word.len()..];

            if word.is_empty() {
                highlighted.push_str(trailing);
                continue;
            }

            let styled = if !seen_verb {
                seen_verb = true;
                let color = if is_known(word) { Color::Cyan } else { Color::Red };
                word.style(Style::builder().foreground(color).bold().build())
                    .to_string()
            } else if word == ">" || word == ">>" {
                word.style(Style::builder().foreground(Color::Yellow).build())
                    .to_string()
            } else {
                word.to_string()
            };
            highlighted.push_str(&styled);
            highlighted.push_str(trailing);
        }
        highlighted
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        hint.style(hint_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_highlighter_is_identity() {
        let highlighter = SyntaxHighlighter::plain();
        let line = "echo  hi >> out.txt";
        assert_eq!(highlighter.highlight_command(line, |_| true), line);
        assert_eq!(highlighter.highlight_error("boom"), "boom");
        assert_eq!(highlighter.highlight_hint("hint"), "hint");
    }
}
