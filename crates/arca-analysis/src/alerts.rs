//! Codec for the analysis engine's CSV output.
//!
//! Each row describes one detected call site:
//!
//! ```text
//! "name","description","severity","message","path","start_line","start_column","end_line","end_column"
//! ```
//!
//! Fields are double-quoted, with embedded quotes doubled. The `message` field
//! packs `method;;sample;;tokens;;operation;;score;;heuristics`.

use std::mem;

use arca_tree::Operation;

use crate::AnalysisError;

/// Column names, in order.
pub const ALERT_COLUMNS: [&str; 9] = [
    "name",
    "description",
    "severity",
    "message",
    "path",
    "start_line",
    "start_column",
    "end_line",
    "end_column",
];

/// Separator of the sub-fields packed into `message`.
const MESSAGE_SEPARATOR: &str = ";;";

/// The structured payload of an alert's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    /// Invoked method.
    pub method: String,
    /// Source text of the call site.
    pub sample: String,
    /// Identifier tokens around the call site.
    pub tokens: Vec<String>,
    /// Kind of data operation.
    pub operation: Operation,
    /// Detection score.
    pub score: String,
    /// Trace of the heuristics that fired.
    pub heuristics: String,
}

/// One row of engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Query name; identifies the technology.
    pub name: String,
    /// Query description.
    pub description: String,
    /// Reported severity.
    pub severity: String,
    /// Decoded message payload.
    pub message: AlertMessage,
    /// Project-relative path, usually with a leading `/`.
    pub path: String,
    /// First line of the call site.
    pub start_line: usize,
    /// First column of the call site.
    pub start_column: usize,
    /// Last line of the call site.
    pub end_line: usize,
    /// Last column of the call site.
    pub end_column: usize,
}

impl Alert {
    /// The path without a leading slash.
    pub fn relative_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }

    /// The `#` suffix locating the call site inside its file.
    pub fn span(&self) -> String {
        format!(
            "L{}C{}-L{}C{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }

    /// Text mined for concepts: the sample followed by the tokens.
    pub fn text(&self) -> String {
        let mut text = self.message.sample.clone();
        for token in &self.message.tokens {
            text.push('\n');
            text.push_str(token);
        }
        text
    }
}

/// Parses the full CSV output. A header row, if present, is skipped.
pub fn parse_alerts(text: &str) -> Result<Vec<Alert>, AnalysisError> {
    let mut alerts = Vec::new();
    for (row, fields) in split_records(text)? {
        if is_header(&fields) {
            continue;
        }
        alerts.push(parse_row(row, fields)?);
    }
    Ok(alerts)
}

/// Whether a record is the column header.
fn is_header(fields: &[String]) -> bool {
    fields.iter().map(String::as_str).eq(ALERT_COLUMNS)
}

/// Decodes one record into an alert.
fn parse_row(row: usize, fields: Vec<String>) -> Result<Alert, AnalysisError> {
    let Ok([name, description, severity, message, path, sl, sc, el, ec]) =
        <[String; 9]>::try_from(fields)
    else {
        return Err(bad(row, format!("expected {} fields", ALERT_COLUMNS.len())));
    };
    if path.trim().is_empty() {
        return Err(bad(row, "empty path"));
    }
    Ok(Alert {
        name,
        description,
        severity,
        message: parse_message(row, &message)?,
        path,
        start_line: number(row, "start_line", &sl)?,
        start_column: number(row, "start_column", &sc)?,
        end_line: number(row, "end_line", &el)?,
        end_column: number(row, "end_column", &ec)?,
    })
}

/// Decodes the `;;`-packed message payload.
pub fn parse_message(row: usize, message: &str) -> Result<AlertMessage, AnalysisError> {
    let parts: Vec<&str> = message.splitn(6, MESSAGE_SEPARATOR).collect();
    let [method, sample, tokens, operation, score, heuristics] = parts.as_slice() else {
        return Err(bad(row, "message must have 6 ';;'-separated parts"));
    };
    let operation = operation
        .parse::<Operation>()
        .map_err(|e| bad(row, e.to_string()))?;
    Ok(AlertMessage {
        method: method.trim().to_string(),
        sample: (*sample).to_string(),
        tokens: tokens
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        operation,
        score: score.trim().to_string(),
        heuristics: heuristics.trim().to_string(),
    })
}

/// Parses a numeric column.
fn number(row: usize, column: &str, value: &str) -> Result<usize, AnalysisError> {
    value
        .trim()
        .parse()
        .map_err(|_| bad(row, format!("{column} is not a number: {value:?}")))
}

/// Builds a `BadFormat` error.
fn bad(row: usize, reason: impl Into<String>) -> AnalysisError {
    AnalysisError::BadFormat {
        row,
        reason: reason.into(),
    }
}

/// Splits CSV text into records, each tagged with the row it starts on.
///
/// Quoted fields may span lines. Blank lines are skipped.
fn split_records(text: &str) -> Result<Vec<(usize, Vec<String>)>, AnalysisError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut row = 1;
    let mut start_row = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    row += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => fields.push(mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(mem::take(&mut field));
                push_record(&mut records, start_row, mem::take(&mut fields));
                row += 1;
                start_row = row;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(bad(start_row, "unterminated quoted field"));
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        push_record(&mut records, start_row, fields);
    }
    Ok(records)
}

/// Keeps a record unless it came from a blank line.
fn push_record(records: &mut Vec<(usize, Vec<String>)>, row: usize, fields: Vec<String>) {
    if fields.len() == 1 && fields[0].trim().is_empty() {
        return;
    }
    records.push((row, fields));
}
