use std::io::{self, BufRead, Write};

/// Blocking line-oriented prompt over an injected reader/writer pair.
///
/// The validation loops re-prompt through this, so tests can drive them
/// with a `Cursor` script instead of a live terminal.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print a prompt, then read one line and trim it.
    ///
    /// A closed input stream is an error: there is no way to re-prompt
    /// once stdin is gone.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        writeln!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        let bytes_read = self.reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line.trim().to_string())
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_trims_whitespace() {
        let mut prompter = Prompter::new(Cursor::new("  12.50  \n"), Vec::new());
        let line = prompter.read_line("Enter the amount:").unwrap();
        assert_eq!(line, "12.50");
    }

    #[test]
    fn test_read_line_writes_prompt() {
        let mut output = Vec::new();
        {
            let mut prompter = Prompter::new(Cursor::new("Food\n"), &mut output);
            prompter.read_line("Enter the category:").unwrap();
        }
        let written = String::from_utf8(output).unwrap();
        assert!(written.contains("Enter the category:"));
    }

    #[test]
    fn test_read_line_fails_on_closed_input() {
        let mut prompter = Prompter::new(Cursor::new(""), Vec::new());
        let result = prompter.read_line("Enter the amount:");
        assert!(result.is_err());
    }
}
