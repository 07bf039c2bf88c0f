//! Interactive mode: each `field=value` line updates one input and the
//! report is rendered again.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::{simulate, InputField, SimulationInput};
use crate::report::{render_json, render_text};

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("expected `field=value`, got '{0}'")]
    MissingSeparator(String),

    #[error("unknown field '{0}' (expected one of capital, loan, propertyPrice, reformCost, rentIncome, expenses)")]
    UnknownField(String),

    #[error("'{value}' is not a number for {field}")]
    InvalidNumber { field: InputField, value: String },
}

/// A number usable as an amount. `NaN` and infinities are rejected.
pub fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses one `field=value` assignment.
pub fn parse_assignment(line: &str) -> Result<(InputField, f64), InputError> {
    let (name, raw) = line
        .split_once('=')
        .ok_or_else(|| InputError::MissingSeparator(line.to_string()))?;
    let field: InputField = name.parse()?;
    let raw = raw.trim();
    let value = parse_finite(raw).ok_or_else(|| InputError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    Ok((field, value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(input: &SimulationInput, format: OutputFormat) -> anyhow::Result<String> {
    let output = simulate(input);
    Ok(match format {
        OutputFormat::Text => render_text(input, &output),
        OutputFormat::Json => render_json(input, &output)?,
    })
}

/// Runs until EOF, `quit` or `exit`. Blank lines and `#` comments are
/// ignored; bad lines are reported and skipped. Returns the final inputs.
pub fn run<R: BufRead, W: Write>(
    mut input: SimulationInput,
    reader: R,
    mut out: W,
    format: OutputFormat,
) -> anyhow::Result<SimulationInput> {
    writeln!(out, "{}", render(&input, format)?)?;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        match parse_assignment(line) {
            Ok((field, value)) => {
                debug!("{field} = {value}");
                field.set(&mut input, value);
                writeln!(out)?;
                writeln!(out, "{}", render(&input, format)?)?;
            }
            Err(e) => {
                warn!("Rejected input line: {e}");
                writeln!(out, "error: {e}")?;
            }
        }
    }

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_lines(lines: &str) -> (SimulationInput, String) {
        let mut buf = Vec::new();
        let last = run(
            SimulationInput::default(),
            Cursor::new(lines.as_bytes()),
            &mut buf,
            OutputFormat::Text,
        )
        .unwrap();
        (last, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("loan=1200"), Ok((InputField::Loan, 1200.0)));
        assert_eq!(
            parse_assignment(" reform_cost = -5.5 "),
            Ok((InputField::ReformCost, -5.5))
        );
    }

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite(" -12.5 "), Some(-12.5));
        for raw in ["NaN", "inf", "-infinity", "1e400", ""] {
            assert_eq!(parse_finite(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert_eq!(
            parse_assignment("loan 1200"),
            Err(InputError::MissingSeparator("loan 1200".to_string()))
        );
        assert_eq!(
            parse_assignment("land=1"),
            Err(InputError::UnknownField("land".to_string()))
        );
        assert_eq!(
            parse_assignment("capital=abc"),
            Err(InputError::InvalidNumber {
                field: InputField::Capital,
                value: "abc".to_string()
            })
        );
        assert!(matches!(
            parse_assignment("capital=NaN"),
            Err(InputError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_every_change_recomputes() {
        let (last, out) = run_lines("capital=30\nreformCost=10\n");
        assert_eq!(last.capital, 30.0);
        assert_eq!(last.reform_cost, 10.0);
        assert_eq!(out.matches("シミュレーション結果").count(), 3);
        assert!(out.contains("自己資本: -20 万円"));
        assert!(out.trim_end().ends_with("負債比率: 90.0 %"));
        assert!(out.contains("自己資本: 20 万円"));
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let (last, out) = run_lines("# comment\n\nfoo=1\nloan=x\nquit\nloan=1\n");
        assert_eq!(last, SimulationInput::default());
        assert!(out.contains("error: unknown field 'foo'"));
        assert!(out.contains("error: 'x' is not a number for loan"));
        assert_eq!(out.matches("シミュレーション結果").count(), 1);
    }

    #[test]
    fn test_json_format() {
        let mut buf = Vec::new();
        run(
            SimulationInput::default(),
            Cursor::new("expenses=12".as_bytes()),
            &mut buf,
            OutputFormat::Json,
        )
        .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\"cashFlow\": -24.0"));
    }
}
