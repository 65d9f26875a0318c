use crate::core::io::traits::KnotFile;
use crate::core::models::atom::Atom;
use crate::core::models::knot::Knot;
use crate::core::models::parameters::{KnotParameters, ParameterError};
use crate::core::models::strand::Strand;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Second line of every written file. Readers skip it unconditionally.
pub const COMMENT_LINE: &str = "This second row of the datafile is ignored. The row above specifies(in this order): atom radius, leash length, deltaParameter, etaParameter, skippedParameter";

const FIELD_SEPARATOR: char = '\t';
const ATOM_FIELD_COUNT: usize = 6;

#[derive(Debug, Error)]
pub enum KnotFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Data stream is empty: no data")]
    Empty,
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: KnotParseErrorKind,
    },
    #[error("Invalid parameter line: {0}")]
    InvalidParameter(#[from] ParameterError),
}

#[derive(Debug, Error, PartialEq)]
pub enum KnotParseErrorKind {
    #[error("Invalid float in field {field} (value: '{value}')")]
    InvalidFloat { field: usize, value: String },
    #[error("Invalid integer in field {field} (value: '{value}')")]
    InvalidInt { field: usize, value: String },
}

/// Non-empty tab-separated fields of a line. Consecutive tabs collapse.
fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|field| !field.is_empty())
}

/// Parses a finite float. `NaN` and `inf` are rejected like any other bad token.
fn parse_float(value: &str, field: usize, line: usize) -> Result<f32, KnotFileError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| KnotFileError::Parse {
            line,
            kind: KnotParseErrorKind::InvalidFloat {
                field,
                value: value.into(),
            },
        })
}

fn parse_parameters(line: &str) -> Result<KnotParameters, KnotFileError> {
    let mut params = KnotParameters::default();
    let tokens: Vec<&str> = fields(line).collect();

    if let Some(token) = tokens.first() {
        params.atom_radius = parse_float(token, 1, 1)?;
    }
    if let Some(token) = tokens.get(1) {
        params.leash_length = parse_float(token, 2, 1)?;
    }
    if let Some(token) = tokens.get(2) {
        params.delta = parse_float(token, 3, 1)?;
    }
    if let Some(token) = tokens.get(3) {
        params.eta = parse_float(token, 4, 1)?;
    }
    if let Some(token) = tokens.get(4) {
        params.skipped = token.parse().map_err(|_| KnotFileError::Parse {
            line: 1,
            kind: KnotParseErrorKind::InvalidInt {
                field: 5,
                value: token.to_string(),
            },
        })?;
    }
    Ok(params)
}

fn parse_atom(line: &str, line_num: usize) -> Result<Atom, KnotFileError> {
    let mut values = [0.0f32; ATOM_FIELD_COUNT];
    for (i, token) in fields(line).take(ATOM_FIELD_COUNT).enumerate() {
        values[i] = parse_float(token, i + 1, line_num)?;
    }
    Ok(Atom::from_fields(values))
}

/// A blank line, or one starting with a tab, closes the current strand.
fn is_strand_break(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(FIELD_SEPARATOR)
}

/// The tab-separated knot layout.
///
/// ```text
/// atomRadius \t leashLength \t delta \t eta \t skipped
/// <comment line, ignored>
/// x \t y \t z \t fx \t fy \t fz
/// ...
/// <blank line ends a strand>
/// ```
///
/// Missing trailing header fields keep their built-in defaults and missing
/// trailing atom fields read as zero. Empty strands are never produced.
pub struct KnotTextFile;

impl KnotFile for KnotTextFile {
    type Error = KnotFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Knot, Self::Error> {
        let mut lines = reader.lines();

        let header = lines.next().ok_or(KnotFileError::Empty)??;
        let parameters = parse_parameters(&header)?;
        parameters.validate()?;

        let mut knot = Knot::new(parameters);
        let mut pending = Strand::new();

        // Line 2 is a free-form comment.
        if lines.next().transpose()?.is_some() {
            for (offset, line_res) in lines.enumerate() {
                let line = line_res?;
                let line_num = offset + 3;

                if is_strand_break(&line) {
                    if !pending.is_empty() {
                        knot.add_strand(std::mem::take(&mut pending));
                    }
                    continue;
                }
                pending.push(parse_atom(&line, line_num)?);
            }
        }

        if !pending.is_empty() {
            knot.add_strand(pending);
        }
        Ok(knot)
    }

    fn write_to(knot: &Knot, writer: &mut impl Write) -> Result<(), Self::Error> {
        writer.write_all(Self::to_text(knot).as_bytes())?;
        Ok(())
    }
}

impl KnotTextFile {
    /// Parses a knot from an in-memory byte buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Knot, KnotFileError> {
        let mut reader = io::Cursor::new(bytes);
        Self::read_from(&mut reader)
    }

    /// Renders a knot to its text layout.
    pub fn to_text(knot: &Knot) -> String {
        let p = &knot.parameters;
        let mut text = format!(
            "{:?}\t{:?}\t{:?}\t{:?}\t{}\n{}\n",
            p.atom_radius, p.leash_length, p.delta, p.eta, p.skipped, COMMENT_LINE
        );

        for strand in knot.strands() {
            for atom in strand {
                let [x, y, z, fx, fy, fz] = atom.fields();
                text.push_str(&format!(
                    "{:?}\t{:?}\t{:?}\t{:?}\t{:?}\t{:?}\n",
                    x, y, z, fx, fy, fz
                ));
            }
            text.push('\n');
        }
        text
    }
}
