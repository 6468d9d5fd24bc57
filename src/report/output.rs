//! Destinations for report lines.

/// Line passed to a sink to request an empty separator line.
pub const BLANK_LINE: &str = "\n";

/// Accepts report output one line at a time.
pub trait OutputSink {
    fn output_line(&mut self, text: &str);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn output_line(&mut self, text: &str) {
        (**self).output_line(text)
    }
}

/// Writes lines to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn new() -> Self {
        Self
    }
}

impl OutputSink for ConsoleOutput {
    fn output_line(&mut self, text: &str) {
        if text == BLANK_LINE {
            println!();
        } else {
            println!("{}", text);
        }
    }
}

/// Keeps every line in memory, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryOutput {
    lines: Vec<String>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl OutputSink for MemoryOutput {
    fn output_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_output_keeps_order() {
        let mut out = MemoryOutput::new();
        out.output_line("first");
        out.output_line(BLANK_LINE);
        out.output_line("second");
        assert_eq!(out.lines(), ["first", "\n", "second"]);
    }

    #[test]
    fn test_borrowed_sink() {
        fn emit<S: OutputSink>(mut sink: S) {
            sink.output_line("via reference");
        }

        let mut out = MemoryOutput::new();
        emit(&mut out);
        assert_eq!(out.into_lines(), vec!["via reference".to_string()]);
    }
}
