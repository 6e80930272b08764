use std::path::Path;

use crate::error::Error;
use crate::model::RubricRecord;

const REQUIRED_COLUMNS: [&str; 6] = [
    "domain",
    "indicators",
    "emerging",
    "developing",
    "embedding",
    "excelling",
];

/// Load rubric records from a CSV file with a header row.
pub fn parse(path: &Path) -> Result<Vec<RubricRecord>, Error> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;
    parse_str(&text)
}

/// Parse rubric CSV text. Columns are matched by header name, so order and
/// extra columns do not matter. Rows with an empty `domain` are kept; the
/// content builder decides what to do with them.
pub fn parse_str(text: &str) -> Result<Vec<RubricRecord>, Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = split_rows(text)?.into_iter();

    let header = rows
        .next()
        .ok_or_else(|| Error::InvalidRubric("missing header row".into()))?;
    let header: Vec<String> = header
        .fields
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut indices = [0usize; 6];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::InvalidRubric(format!("missing column '{name}'")))?;
    }
    let [domain, indicators, emerging, developing, embedding, excelling] = indices;

    let mut records = Vec::new();
    for row in rows {
        if row.fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        if row.fields.len() < header.len() {
            log::debug!(
                "rubric line {}: {} of {} fields, padding with empty values",
                row.line,
                row.fields.len(),
                header.len()
            );
        }
        let field = |i: usize| {
            row.fields
                .get(i)
                .map(|f| f.trim().to_string())
                .unwrap_or_default()
        };
        records.push(RubricRecord {
            domain: field(domain),
            indicators: field(indicators),
            emerging: field(emerging),
            developing: field(developing),
            embedding: field(embedding),
            excelling: field(excelling),
        });
    }

    log::debug!("parsed {} rubric rows", records.len());
    Ok(records)
}

/// One CSV record and the physical line it starts on.
struct Row {
    line: usize,
    fields: Vec<String>,
}

/// Split CSV text into rows of fields. Handles quoted fields containing
/// commas, doubled quotes and line breaks.
fn split_rows(text: &str) -> Result<Vec<Row>, Error> {
    let mut rows: Vec<Row> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut row_line = 1usize;
    let mut quote_line = 1usize;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                quote_line = line;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                fields.push(std::mem::take(&mut field));
                rows.push(Row {
                    line: row_line,
                    fields: std::mem::take(&mut fields),
                });
                line += 1;
                row_line = line;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(Error::InvalidRubric(format!(
            "unterminated quoted field opened at line {quote_line}"
        )));
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(Row {
            line: row_line,
            fields,
        });
    }
    Ok(rows)
}
