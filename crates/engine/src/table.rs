//! Tabular form of flattened balance records.

use std::{collections::HashMap, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde_json::Value;

use crate::{EngineError, ResultEngine, SegmentLayout};

/// Column holding the composite account combination of a detail row.
pub const DETAIL_COMBINATION_COLUMN: &str = "DetailAccountCombination";

/// Columns coerced to numbers in detail mode.
pub const NUMERIC_COLUMNS: [&str; 3] = ["PeriodActivity", "BeginningBalance", "EndingBalance"];

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Number(Decimal),
    Text(String),
}

impl Cell {
    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(b),
            Value::Number(n) => {
                let raw = n.to_string();
                parse_decimal(&raw).map_or(Cell::Text(raw), Cell::Number)
            }
            Value::String(s) => Cell::Text(s),
            other => Cell::Text(other.to_string()),
        }
    }

    /// Numbers stay, numeric text is parsed, anything else becomes `Null`.
    fn into_numeric(self) -> Self {
        match self {
            Cell::Number(n) => Cell::Number(n),
            Cell::Text(text) => parse_decimal(text.trim()).map_or(Cell::Null, Cell::Number),
            Cell::Null | Cell::Bool(_) => Cell::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Rows of cells under named columns.
///
/// Column names are positional and may repeat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ResultTable {
    /// Build a table from JSON objects.
    ///
    /// Columns appear in first-seen key order across all records; a key absent
    /// from a record is `Null` in that row.
    pub fn from_records(records: Vec<Value>) -> ResultEngine<Self> {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut objects = Vec::with_capacity(records.len());

        for record in records {
            let object = match record {
                Value::Object(object) => object,
                other => {
                    return Err(EngineError::InvalidRecord(format!(
                        "expected a JSON object, got {other}"
                    )));
                }
            };
            for key in object.keys() {
                if !index.contains_key(key) {
                    index.insert(key.clone(), columns.len());
                    columns.push(key.clone());
                }
            }
            objects.push(object);
        }

        let rows = objects
            .into_iter()
            .map(|object| {
                let mut row = vec![Cell::Null; columns.len()];
                for (key, value) in object {
                    if let Some(&i) = index.get(&key) {
                        row[i] = Cell::from_json(value);
                    }
                }
                row
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Cell> + use<'a>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[i]))
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        let i = self.column_index(name)?;
        self.rows.get(row).map(|row| &row[i])
    }

    /// Split the detail combination into one text column per segment,
    /// labelled from `layout` and inserted right after the combination column.
    ///
    /// Missing tokens are `Null`; tokens beyond the segment count are dropped.
    /// A label equal to an existing column name is inserted anyway, and name
    /// lookups keep resolving to the column that came first.
    pub(crate) fn split_combination(mut self, layout: &SegmentLayout) -> ResultEngine<Self> {
        let source = self
            .column_index(DETAIL_COMBINATION_COLUMN)
            .ok_or_else(|| EngineError::MissingColumn(DETAIL_COMBINATION_COLUMN.to_string()))?;
        for label in layout.labels() {
            if self.column_index(label).is_some() {
                tracing::warn!(
                    ledger = layout.ledger_id(),
                    label,
                    "segment label repeats an existing column name"
                );
            }
        }
        let width = layout.len();
        let at = source + 1;
        let mut mismatched = 0usize;

        for row in &mut self.rows {
            let tokens = match &row[source] {
                Cell::Text(combination) => {
                    let mut tokens: Vec<Cell> = combination
                        .split('.')
                        .map(|token| Cell::Text(token.to_string()))
                        .collect();
                    if width > 0 && tokens.len() != width {
                        mismatched += 1;
                    }
                    tokens.resize(width, Cell::Null);
                    tokens
                }
                _ => vec![Cell::Null; width],
            };
            row.splice(at..at, tokens);
        }

        if mismatched > 0 {
            tracing::warn!(
                rows = mismatched,
                segments = width,
                "account combinations do not match the ledger's segment count"
            );
        }

        self.columns
            .splice(at..at, layout.slots().iter().map(|slot| slot.label.clone()));
        Ok(self)
    }

    /// Coerce the named columns to numbers; absent columns are skipped.
    pub(crate) fn coerce_numeric(&mut self, names: &[&str]) {
        let indexes: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();
        for row in &mut self.rows {
            for &i in &indexes {
                let cell = std::mem::replace(&mut row[i], Cell::Null);
                row[i] = cell.into_numeric();
            }
        }
    }
}
