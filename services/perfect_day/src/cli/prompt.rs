//! services/perfect_day/src/cli/prompt.rs
//!
//! Line-oriented prompting over any reader/writer pair, so commands can be
//! driven by a script in tests and by the terminal in the binary.

use std::io::{self, BufRead, Write};

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Where command output goes.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `label` and reads one trimmed line. Closed input is an error so
    /// menu loops cannot spin forever.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Like `ask`, with a blank answer meaning `default`.
    pub fn ask_or(&mut self, label: &str, default: &str) -> io::Result<String> {
        let answer = self.ask(label)?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    /// `(y/N)` question; only `y` or `yes` count as agreement.
    pub fn confirm(&mut self, label: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{} (y/N): ", label))?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}
