//! Training records.
//!
//! A plain-text format, one record per line:
//!
//! ```text
//! topology: 2 4 1
//! in: 0.0 1.0
//! out: 1.0
//! in: 1.0 1.0
//! out: 0.0
//! ```
//!
//! The first record names the layer widths; every `in:` line is followed by the `out:`
//! line holding its targets. Blank lines are ignored. A record's last value may carry
//! trailing characters (`out: 1.0z`); its numeric prefix is kept and the rest dropped.
//! Everything else malformed is reported through [`DataError`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, warn};

const TOPOLOGY_LABEL: &str = "topology:";
const INPUT_LABEL: &str = "in:";
const TARGET_LABEL: &str = "out:";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read training data: {0}")]
    Io(#[from] io::Error),
    #[error("training data is empty; expected a `topology:` line")]
    MissingTopology,
    #[error("line {line}: `topology:` lists no layer widths")]
    EmptyTopology { line: usize },
    #[error("line {line}: expected `{expected}`, found `{found}`")]
    UnexpectedLabel {
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("line {line}: cannot parse `{token}` as a number")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: expected {expected} values, found {found}")]
    WidthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: `in:` record has no following `out:` record")]
    MissingTargets { line: usize },
}

/// One training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

impl Sample {
    pub fn new(inputs: Vec<f64>, targets: Vec<f64>) -> Self {
        Self { inputs, targets }
    }
}

/// A topology plus the ordered examples to train it on.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingData {
    topology: Vec<usize>,
    samples: Vec<Sample>,
}

impl TrainingData {
    /// Build from parts, checking every sample against the topology's outer widths.
    pub fn new(topology: Vec<usize>, samples: Vec<Sample>) -> Result<Self, DataError> {
        let (input_width, output_width) = match (topology.first(), topology.last()) {
            (Some(&i), Some(&o)) => (i, o),
            _ => return Err(DataError::MissingTopology),
        };
        for (idx, s) in samples.iter().enumerate() {
            // Line numbers as they would appear in the rendered file.
            let line = 2 + idx * 2;
            if s.inputs.len() != input_width {
                return Err(DataError::WidthMismatch {
                    line,
                    expected: input_width,
                    found: s.inputs.len(),
                });
            }
            if s.targets.len() != output_width {
                return Err(DataError::WidthMismatch {
                    line: line + 1,
                    expected: output_width,
                    found: s.targets.len(),
                });
            }
        }
        Ok(Self { topology, samples })
    }

    // For producers whose samples match `topology` by construction.
    pub(crate) fn from_parts(topology: Vec<usize>, samples: Vec<Sample>) -> Self {
        debug_assert!(Self::new(topology.clone(), samples.clone()).is_ok());
        Self { topology, samples }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let data = Self::from_reader(BufReader::new(File::open(path)?))?;
        debug!(
            path = %path.display(),
            topology = ?data.topology,
            samples = data.samples.len(),
            "loaded training data"
        );
        Ok(data)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DataError> {
        let mut lines = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            lines.push((idx + 1, line?));
        }
        Self::parse_lines(lines.iter().map(|(n, l)| (*n, l.as_str())))
    }

    pub fn parse(text: &str) -> Result<Self, DataError> {
        Self::parse_lines(text.lines().enumerate().map(|(idx, l)| (idx + 1, l)))
    }

    fn parse_lines<'a, I>(lines: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut records = lines.into_iter().filter(|(_, l)| !l.trim().is_empty());

        let (line, text) = records.next().ok_or(DataError::MissingTopology)?;
        let topology: Vec<usize> = parse_record(line, text, TOPOLOGY_LABEL)?;
        if topology.is_empty() {
            return Err(DataError::EmptyTopology { line });
        }
        let input_width = topology[0];
        let output_width = topology[topology.len() - 1];

        let mut samples = Vec::new();
        while let Some((in_line, in_text)) = records.next() {
            let inputs: Vec<f64> = parse_record(in_line, in_text, INPUT_LABEL)?;
            check_width(in_line, input_width, inputs.len())?;

            let (out_line, out_text) = records
                .next()
                .ok_or(DataError::MissingTargets { line: in_line })?;
            let targets: Vec<f64> = parse_record(out_line, out_text, TARGET_LABEL)?;
            check_width(out_line, output_width, targets.len())?;

            samples.push(Sample { inputs, targets });
        }

        Ok(Self { topology, samples })
    }

    #[inline]
    pub fn topology(&self) -> &[usize] {
        &self.topology
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FromStr for TrainingData {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TrainingData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TOPOLOGY_LABEL}")?;
        for w in &self.topology {
            write!(f, " {w}")?;
        }
        writeln!(f)?;
        for s in &self.samples {
            write_values(f, INPUT_LABEL, &s.inputs)?;
            write_values(f, TARGET_LABEL, &s.targets)?;
        }
        Ok(())
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, label: &str, values: &[f64]) -> fmt::Result {
    write!(f, "{label}")?;
    for v in values {
        write!(f, " {v:?}")?;
    }
    writeln!(f)
}

fn parse_record<T: FromStr>(
    line: usize,
    text: &str,
    label: &'static str,
) -> Result<Vec<T>, DataError> {
    let mut tokens = text.split_whitespace();
    let found = tokens.next().unwrap_or_default();
    if found != label {
        return Err(DataError::UnexpectedLabel {
            line,
            expected: label,
            found: found.to_owned(),
        });
    }
    let tokens: Vec<&str> = tokens.collect();
    let last = tokens.len().saturating_sub(1);
    let mut values = Vec::with_capacity(tokens.len());
    for (idx, token) in tokens.iter().enumerate() {
        let value = match token.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) if idx == last => numeric_prefix(token).inspect(|_| {
                warn!(line, token = *token, "ignoring trailing characters after last value");
            }),
            Err(_) => None,
        };
        values.push(value.ok_or_else(|| DataError::InvalidNumber {
            line,
            token: (*token).to_owned(),
        })?);
    }
    Ok(values)
}

/// Longest leading slice of `token` that parses as a `T`.
fn numeric_prefix<T: FromStr>(token: &str) -> Option<T> {
    (1..token.len())
        .rev()
        .filter(|&end| token.is_char_boundary(end))
        .find_map(|end| token[..end].parse().ok())
}

fn check_width(line: usize, expected: usize, found: usize) -> Result<(), DataError> {
    if expected != found {
        return Err(DataError::WidthMismatch {
            line,
            expected,
            found,
        });
    }
    Ok(())
}
