//! Output trait for rendering reports to different formats.

use protogen_core::{Diagnostic, Severity};

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render.
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render a key-value pair.
    fn key_value(&mut self, key: &str, value: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render an added item (e.g., a written file).
    fn added_item(&mut self, text: &str);

    /// Render a warning message.
    fn warning(&mut self, msg: &str);

    /// Render an error message.
    fn error(&mut self, msg: &str);

    /// Render a line of plain text.
    fn preformatted(&mut self, text: &str);

    /// Render a blank line.
    fn newline(&mut self);

    /// Render a diagnostic by severity.
    fn diagnostic(&mut self, diag: &Diagnostic) {
        let text = match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        };
        match diag.severity {
            Severity::Error => self.error(&text),
            Severity::Warning => self.warning(&text),
            Severity::Info => self.preformatted(&text),
        }
    }
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Stdout,
    Stderr,
}

/// Terminal output implementation.
///
/// Warnings and errors always go to stderr.
pub struct TerminalOutput {
    target: Target,
}

impl TerminalOutput {
    pub fn stdout() -> Self {
        Self {
            target: Target::Stdout,
        }
    }

    /// Everything on stderr, for when stdout carries generated code.
    pub fn stderr() -> Self {
        Self {
            target: Target::Stderr,
        }
    }

    fn emit(&self, text: &str) {
        match self.target {
            Target::Stdout => println!("{}", text),
            Target::Stderr => eprintln!("{}", text),
        }
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        self.emit(&format!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.emit(&format!("{}: {}", key, value));
    }

    fn list_item(&mut self, text: &str) {
        self.emit(&format!("  - {}", text));
    }

    fn added_item(&mut self, text: &str) {
        self.emit(&format!("  + {}", text));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {}", msg);
    }

    fn preformatted(&mut self, text: &str) {
        self.emit(text);
    }

    fn newline(&mut self) {
        self.emit("");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Output;

    /// Records rendered lines for assertions.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub lines: Vec<String>,
    }

    impl Recorder {
        pub fn text(&self) -> String {
            self.lines.join("\n")
        }
    }

    impl Output for Recorder {
        fn section(&mut self, name: &str) {
            self.lines.push(format!("{}:", name));
        }

        fn key_value(&mut self, key: &str, value: &str) {
            self.lines.push(format!("{}: {}", key, value));
        }

        fn list_item(&mut self, text: &str) {
            self.lines.push(format!("  - {}", text));
        }

        fn added_item(&mut self, text: &str) {
            self.lines.push(format!("  + {}", text));
        }

        fn warning(&mut self, msg: &str) {
            self.lines.push(format!("warning: {}", msg));
        }

        fn error(&mut self, msg: &str) {
            self.lines.push(format!("error: {}", msg));
        }

        fn preformatted(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn newline(&mut self) {
            self.lines.push(String::new());
        }
    }
}
