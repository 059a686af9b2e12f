// 🖥️ Console - line-oriented input/output boundary for the menus
//
// Generic over the reader and writer so the shells run against stdin/stdout
// in the binaries and against in-memory buffers in tests.

use crate::error::{RecordError, Result};
use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::PathBuf;
use std::str::FromStr;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process' stdin and stdout.
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Read one raw line without the line terminator.
    ///
    /// `Ok(None)` means the input is exhausted.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(stream_error)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Print `label`, then read the answer (surrounding whitespace removed).
    pub fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}").map_err(stream_error)?;
        self.output.flush().map_err(stream_error)?;

        match self.read_line()? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(RecordError::InputClosed),
        }
    }

    /// Prompt and coerce the answer to `T`; failure is `InvalidInput`.
    pub fn prompt_parsed<T: FromStr>(&mut self, label: &str) -> Result<T> {
        let raw = self.prompt(label)?;
        parse_field(&raw, label)
    }

    /// Prompt for a field that may be left blank to keep its current value.
    pub fn prompt_optional<T: FromStr>(&mut self, label: &str) -> Result<Option<T>> {
        let raw = self.prompt(label)?;
        if raw.is_empty() {
            return Ok(None);
        }
        parse_field(&raw, label).map(Some)
    }

    /// Prompt for a finite monetary amount.
    pub fn prompt_amount(&mut self, label: &str) -> Result<f64> {
        let amount: f64 = self.prompt_parsed(label)?;
        finite(amount)
    }

    /// Like `prompt_amount`, but a blank answer is `None`.
    pub fn prompt_optional_amount(&mut self, label: &str) -> Result<Option<f64>> {
        self.prompt_optional::<f64>(label)?.map(finite).transpose()
    }

    /// Write one line of output.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}").map_err(stream_error)
    }

    /// Give back the writer (tests inspect what was printed).
    pub fn into_output(self) -> W {
        self.output
    }
}

fn parse_field<T: FromStr>(raw: &str, label: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| {
        let field = label.trim().trim_end_matches(':');
        RecordError::invalid(format!("'{raw}' no es un valor válido para «{field}»"))
    })
}

fn finite(amount: f64) -> Result<f64> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(RecordError::invalid(format!("'{amount}' no es un monto válido")))
    }
}

fn stream_error(source: io::Error) -> RecordError {
    RecordError::Io {
        path: PathBuf::from("<consola>"),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_writes_label_and_trims_answer() {
        let mut c = console("  Acme \n");
        let answer = c.prompt("Marca: ").unwrap();
        assert_eq!(answer, "Acme");

        let printed = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(printed, "Marca: ");
    }

    #[test]
    fn test_prompt_parsed_numbers() {
        let mut c = console("12.5\n7\nabc\n");
        assert_eq!(c.prompt_parsed::<f64>("Precio: ").unwrap(), 12.5);
        assert_eq!(c.prompt_parsed::<u32>("Cantidad: ").unwrap(), 7);

        let err = c.prompt_parsed::<u32>("Cantidad: ").unwrap_err();
        assert!(matches!(err, RecordError::InvalidInput(_)));
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("Cantidad"));
    }

    #[test]
    fn test_negative_quantity_is_invalid() {
        let mut c = console("-3\n");
        let err = c.prompt_parsed::<u32>("Cantidad: ").unwrap_err();
        assert!(matches!(err, RecordError::InvalidInput(_)));
    }

    #[test]
    fn test_prompt_optional_blank_is_none() {
        let mut c = console("\n250\nx\n");
        assert_eq!(c.prompt_optional::<f64>("Nuevo saldo: ").unwrap(), None);
        assert_eq!(c.prompt_optional::<f64>("Nuevo saldo: ").unwrap(), Some(250.0));
        assert!(c.prompt_optional::<f64>("Nuevo saldo: ").is_err());
    }

    #[test]
    fn test_prompt_amount_rejects_non_finite() {
        let mut c = console("inf\nNaN\n10\n");
        assert!(c.prompt_amount("Monto: ").is_err());
        assert!(c.prompt_amount("Monto: ").is_err());
        assert_eq!(c.prompt_amount("Monto: ").unwrap(), 10.0);
    }

    #[test]
    fn test_prompt_optional_amount() {
        let mut c = console("\nNaN\n-inf\n42.5\n");
        assert_eq!(c.prompt_optional_amount("Saldo: ").unwrap(), None);
        assert!(matches!(
            c.prompt_optional_amount("Saldo: "),
            Err(RecordError::InvalidInput(_))
        ));
        assert!(c.prompt_optional_amount("Saldo: ").is_err());
        assert_eq!(c.prompt_optional_amount("Saldo: ").unwrap(), Some(42.5));
    }

    #[test]
    fn test_eof_is_input_closed() {
        let mut c = console("");
        assert!(matches!(c.prompt("Nombre: "), Err(RecordError::InputClosed)));
        assert_eq!(c.read_line().unwrap(), None);
    }

    #[test]
    fn test_read_line_strips_crlf() {
        let mut c = console("hola\r\n");
        assert_eq!(c.read_line().unwrap(), Some("hola".to_string()));
    }
}
