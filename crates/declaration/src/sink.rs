use std::io::{self, Write};

/// Accepts rendered lines for display or storage.
pub trait LineSink {
    fn write_lines(&mut self, lines: &[String]) -> io::Result<()>;
}

impl<W: Write> LineSink for W {
    fn write_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self, "{}", line)?;
        }
        self.flush()
    }
}

#[cfg(test)]
mod write_lines_tests {
    use super::*;

    #[test]
    fn it_should_terminate_every_line() {
        let mut out: Vec<u8> = Vec::new();
        out.write_lines(&["a {".to_owned(), "\t}".to_owned()])
            .unwrap();

        assert_eq!(out, b"a {\n\t}\n");
    }
}
