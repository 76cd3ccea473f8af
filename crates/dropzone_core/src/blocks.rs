use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Number, Value};

/// One unit of rendered output. Presentation projects these and never looks at
/// the raw payload again.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderBlock {
    Heading {
        text: String,
    },
    Table(TableDescriptor),
    ListGroup {
        title: String,
        sections: Vec<ListSection>,
    },
    Notice {
        severity: Severity,
        text: String,
    },
}

impl RenderBlock {
    pub fn heading(text: impl Into<String>) -> Self {
        RenderBlock::Heading { text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        RenderBlock::Notice {
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

/// Notices are only raised for payloads that could not be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSection {
    pub label: String,
    pub items: Vec<String>,
}

/// A titled table whose columns come from the first record of its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDescriptor {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableDescriptor {
    /// Builds a table from a record list using the first record's keys as the
    /// column set. Later records are projected onto those columns: missing keys
    /// become [`CellValue::Absent`], extra keys are dropped, and non-object
    /// elements yield a row of absent cells.
    ///
    /// Returns `None` when the list is empty or its first element is not an object.
    pub fn from_records(title: impl Into<String>, records: &[Value]) -> Option<Self> {
        let first = records.first()?.as_object()?;
        let columns: Vec<String> = first.keys().cloned().collect();

        let rows = records
            .iter()
            .map(|record| {
                let cells = columns
                    .iter()
                    .map(|column| {
                        let value = record
                            .as_object()
                            .and_then(|fields| fields.get(column))
                            .map_or(CellValue::Absent, CellValue::from_json);
                        (column.clone(), value)
                    })
                    .collect();
                TableRow { cells }
            })
            .collect();

        Some(Self {
            title: title.into(),
            columns,
            rows,
        })
    }
}

/// One table row; its keys are exactly the owning table's columns, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    cells: Vec<(String, CellValue)>,
}

impl TableRow {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for TableRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A single table cell. Scalars are kept as-is, nested values are carried
/// whole and shown as compact JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// The record had no such key.
    Absent,
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Nested(Value),
}

impl CellValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => CellValue::Number(n.clone()),
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::Nested(value.clone()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value.into())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent | CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Nested(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Absent | CellValue::Null => serializer.serialize_none(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Number(n) => n.serialize(serializer),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Nested(v) => v.serialize(serializer),
        }
    }
}
