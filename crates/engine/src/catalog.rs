//! Ledger definition file.
//!
//! The file wraps a JSON array of segment definitions in a call-like
//! expression, e.g.
//!
//! ```text
//! LEDGERS_LIST([
//!     {"ledger_id": 300000046975971, "SEGMENT_NUMBER": 1, "SEGMENT_NAME": "COMPANY", ...},
//!     ...
//! ])
//! ```
//!
//! One entry per flexfield segment per ledger. The segment order of a ledger
//! (`SEGMENT_NUMBER`) drives both the token order of account combinations and
//! the order of the decomposed detail columns, so both read it through the same
//! [`SegmentLayout`].

use std::{collections::HashSet, fs, path::Path};

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

const ENCLOSED_ARRAY: &str = r"(?s)[A-Za-z_][A-Za-z0-9_]*\s*\(\s*(\[.*\])\s*\)";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read ledger definition file: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger definition file does not contain an IDENTIFIER([ ... ]) array")]
    Pattern,
    #[error(transparent)]
    Regex(#[from] regex::Error),
    #[error("error decoding ledger definitions: {0}")]
    Json(#[from] serde_json::Error),
}

/// One flexfield segment of one ledger.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SegmentDefinition {
    #[serde(alias = "LEDGER_ID")]
    pub ledger_id: i64,
    #[serde(rename = "SEGMENT_NUMBER")]
    pub segment_number: u32,
    /// Key of the segment's filter selection and of its cached valueset.
    #[serde(rename = "SEGMENT_NAME")]
    pub segment_name: String,
    #[serde(rename = "VALUE_SET_NAME", default)]
    pub value_set_name: Option<String>,
    /// Human label, used as the decomposed column name.
    #[serde(rename = "VALUE_SET_DESCRIPTION")]
    pub value_set_description: String,
}

/// Segment definitions of every configured ledger, sorted by ledger then
/// segment number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    definitions: Vec<SegmentDefinition>,
}

impl Catalog {
    pub fn from_definitions(mut definitions: Vec<SegmentDefinition>) -> Self {
        definitions.sort_by_key(|d| (d.ledger_id, d.segment_number));
        Self { definitions }
    }

    /// Parse the content of a ledger definition file.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let pattern = Regex::new(ENCLOSED_ARRAY)?;
        let array = pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .ok_or(CatalogError::Pattern)?;
        let definitions: Vec<SegmentDefinition> = serde_json::from_str(array.as_str())?;
        Ok(Self::from_definitions(definitions))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Like [`Catalog::load`], but a broken or missing file yields an empty
    /// catalog after logging the error.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!(
                    path = %path.display(),
                    ledgers = catalog.ledger_ids().len(),
                    segments = catalog.definitions.len(),
                    "ledger definition file loaded"
                );
                catalog
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "{err}");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> &[SegmentDefinition] {
        &self.definitions
    }

    /// Distinct ledger ids, ascending.
    pub fn ledger_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.definitions.iter().map(|d| d.ledger_id).collect();
        ids.dedup();
        ids
    }

    /// Distinct segment names across all ledgers, in catalog order.
    pub fn segment_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.definitions
            .iter()
            .map(|d| d.segment_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn layout(&self, ledger_id: i64) -> SegmentLayout {
        SegmentLayout::new(
            ledger_id,
            self.definitions.iter().filter(|d| d.ledger_id == ledger_id),
        )
    }
}

/// Position of one segment inside a ledger's account combination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentSlot {
    /// Zero-based token index inside a combination string.
    pub position: usize,
    pub segment_number: u32,
    pub segment_name: String,
    pub label: String,
}

/// The ordered segments of one ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SegmentLayout {
    ledger_id: i64,
    slots: Vec<SegmentSlot>,
}

impl SegmentLayout {
    pub fn new<'a>(
        ledger_id: i64,
        definitions: impl IntoIterator<Item = &'a SegmentDefinition>,
    ) -> Self {
        let mut definitions: Vec<&SegmentDefinition> = definitions.into_iter().collect();
        definitions.sort_by_key(|d| d.segment_number);
        let slots = definitions
            .into_iter()
            .enumerate()
            .map(|(position, d)| SegmentSlot {
                position,
                segment_number: d.segment_number,
                segment_name: d.segment_name.clone(),
                label: d.value_set_description.clone(),
            })
            .collect();
        Self { ledger_id, slots }
    }

    pub fn ledger_id(&self) -> i64 {
        self.ledger_id
    }

    pub fn slots(&self) -> &[SegmentSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = r#"
        LEDGERS_LIST( [
            {"ledger_id": 2, "SEGMENT_NUMBER": 2, "SEGMENT_NAME": "DEPT", "VALUE_SET_NAME": "DEPT_VS", "VALUE_SET_DESCRIPTION": "Department"},
            {"ledger_id": 1, "SEGMENT_NUMBER": 2, "SEGMENT_NAME": "ACCOUNT", "VALUE_SET_NAME": "ACC_VS", "VALUE_SET_DESCRIPTION": "Account"},
            {"ledger_id": 1, "SEGMENT_NUMBER": 1, "SEGMENT_NAME": "COMPANY", "VALUE_SET_NAME": "CO_VS", "VALUE_SET_DESCRIPTION": "Company"},
            {"ledger_id": 2, "SEGMENT_NUMBER": 1, "SEGMENT_NAME": "COMPANY", "VALUE_SET_NAME": "CO_VS", "VALUE_SET_DESCRIPTION": "Company"}
        ] )
    "#;

    #[test]
    fn parse_extracts_enclosed_array() {
        let catalog = Catalog::parse(FILE).unwrap();

        assert_eq!(catalog.definitions().len(), 4);
        assert_eq!(catalog.ledger_ids(), vec![1, 2]);
        assert_eq!(catalog.segment_names(), vec!["COMPANY", "ACCOUNT", "DEPT"]);
    }

    #[test]
    fn layout_orders_by_segment_number() {
        let catalog = Catalog::parse(FILE).unwrap();
        let layout = catalog.layout(1);

        let names: Vec<_> = layout.slots().iter().map(|s| s.segment_name.as_str()).collect();
        assert_eq!(names, vec!["COMPANY", "ACCOUNT"]);
        assert_eq!(layout.labels(), vec!["Company", "Account"]);
        assert_eq!(layout.slots()[1].position, 1);
    }

    #[test]
    fn layout_of_unknown_ledger_is_empty() {
        let catalog = Catalog::parse(FILE).unwrap();
        assert!(catalog.layout(99).is_empty());
    }

    #[test]
    fn parse_rejects_bare_json() {
        let err = Catalog::parse(r#"[{"ledger_id": 1}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Pattern));
    }

    #[test]
    fn parse_reports_json_errors() {
        let err = Catalog::parse("LEDGERS_LIST([{\"ledger_id\": }])").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn missing_file_yields_empty_catalog() {
        let catalog = Catalog::load_or_empty("definitely/not/here/lg_list.json");
        assert!(catalog.is_empty());
    }
}
