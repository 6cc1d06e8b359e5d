//! Rows collected from an executed statement.

use serde_json::{Map, Number, Value};

use crate::temporal;

/// Description of one result column as reported by the warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Warehouse type name, e.g. `fixed`, `text`, `variant`.
    pub r#type: String,
    pub scale: Option<i64>,
}

impl Column {
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            r#type: r#type.into(),
            scale: None,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: i64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Convert a cell from the warehouse's textual encoding into a typed JSON value.
    ///
    /// Cells that do not parse as their declared type are kept as text. Integers keep every
    /// digit, however large.
    pub fn decode(&self, raw: Value) -> Value {
        let text = match raw {
            Value::String(text) => text,
            other => return other,
        };
        match self.r#type.to_ascii_lowercase().as_str() {
            "fixed" if self.scale.unwrap_or(0) == 0 => text
                .parse::<Number>()
                .map_or(Value::String(text), Value::Number),
            "fixed" | "real" => text
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map_or(Value::String(text), Value::Number),
            "boolean" => match text.as_str() {
                "1" | "true" | "TRUE" => Value::Bool(true),
                "0" | "false" | "FALSE" => Value::Bool(false),
                _ => Value::String(text),
            },
            "variant" | "object" | "array" => {
                serde_json::from_str(&text).unwrap_or(Value::String(text))
            }
            "date" => or_text(temporal::date(&text), text),
            "time" => or_text(temporal::time(&text), text),
            "timestamp_ntz" => or_text(temporal::timestamp_ntz(&text), text),
            "timestamp_ltz" => or_text(temporal::timestamp_ltz(&text), text),
            "timestamp_tz" => or_text(temporal::timestamp_tz(&text), text),
            _ => Value::String(text),
        }
    }
}

fn or_text(decoded: Option<String>, text: String) -> Value {
    Value::String(decoded.unwrap_or(text))
}

/// The full result set of one statement, held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        QueryResult { columns, rows }
    }

    /// Build a result from undecoded wire rows, typing each cell by its column.
    pub fn decode(columns: Vec<Column>, raw_rows: Vec<Vec<Value>>) -> Self {
        let rows = raw_rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .enumerate()
                    .map(|(i, cell)| match columns.get(i) {
                        Some(column) => column.decode(cell),
                        None => cell,
                    })
                    .collect()
            })
            .collect();
        QueryResult { columns, rows }
    }

    pub fn first_row(&self) -> Option<&[Value]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows as positional sequences of values.
    pub fn into_positional_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    /// Rows as column name to value mappings, in column order.
    pub fn into_records(self) -> Vec<Map<String, Value>> {
        let QueryResult { columns, rows } = self;
        rows.into_iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| column.name.clone())
                    .zip(row)
                    .collect()
            })
            .collect()
    }
}
