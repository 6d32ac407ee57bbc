use rusqlite::types::Value;
use serde::Serialize;
use serde_json::{Map, Value as Json};

/// Column names plus dynamically typed rows, as returned by any SELECT.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Display string for a single cell.
    pub fn cell(&self, row: usize, col: usize) -> String {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(format_value)
            .unwrap_or_default()
    }

    /// Aligned plain-text rendering with a dashed rule under the header.
    pub fn render_text(&self, max_width: usize) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(format_value).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .min(max_width)
            })
            .collect();

        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, &w)| format!("{:<w$}", truncate(name, w)))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:<w$}", truncate(cell, w)))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_json(&self) -> Json {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Json> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().map(value_to_json))
                    .collect();
                Json::Object(object)
            })
            .collect();
        Json::Array(rows)
    }
}

impl Serialize for ResultTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format!("{f:?}"),
        Value::Text(s) => s.clone(),
        Value::Blob(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => format!("<{} bytes>", bytes.len()),
        },
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Integer(i) => Json::from(*i),
        Value::Real(f) => Json::from(*f),
        Value::Text(s) => Json::from(s.as_str()),
        Value::Blob(_) => Json::from(format_value(value)),
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ResultTable {
        ResultTable {
            columns: vec!["ID".into(), "NAME".into(), "SALARY".into()],
            rows: vec![
                vec![Value::Integer(1), Value::Text("Apple Canada".into()), Value::Real(31.5)],
                vec![Value::Integer(12), Value::Null, Value::Real(25.0)],
            ],
        }
    }

    #[test]
    fn renders_aligned_text() {
        let text = sample().render_text(40);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID  NAME          SALARY");
        assert_eq!(lines[1], "-".repeat(24));
        assert_eq!(lines[2], "1   Apple Canada  31.5");
        assert_eq!(lines[3], "12                25.0");
    }

    #[test]
    fn long_cells_are_truncated() {
        let text = sample().render_text(6);
        assert!(text.contains("App..."));
    }

    #[test]
    fn json_uses_column_names() {
        let json = sample().to_json();
        assert_eq!(json[0]["NAME"], "Apple Canada");
        assert_eq!(json[1]["NAME"], Json::Null);
        assert_eq!(json[1]["SALARY"], 25.0);
    }

    #[test]
    fn blobs_render_as_text_when_utf8() {
        assert_eq!(format_value(&Value::Blob(b"Alice Bob Resume".to_vec())), "Alice Bob Resume");
        assert_eq!(format_value(&Value::Blob(vec![0xff, 0xfe])), "<2 bytes>");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("Apple’s data pipelines", 10), "Apple’s...");
        assert_eq!(truncate("short", 10), "short");
    }
}
