//! Expansion of segment filters into account combinations.

use std::collections::HashMap;

use crate::{EngineError, ResultEngine, SegmentLayout};

/// Token meaning "any value" for a segment.
pub const WILDCARD: &str = "%";

/// Selected values per segment name.
///
/// Values of one segment are alternatives; segments combine as a cross
/// product. A segment without values is unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection(HashMap<String, Vec<String>>);

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection of `segment_name`.
    pub fn select<I, S>(&mut self, segment_name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.insert(
            segment_name.to_string(),
            values.into_iter().map(Into::into).collect(),
        );
    }

    #[must_use]
    pub fn with<I, S>(mut self, segment_name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select(segment_name, values);
        self
    }

    /// Build a selection from parallel lists of segment names and values.
    pub fn from_pairs(ids: &[String], values: &[Option<Vec<String>>]) -> ResultEngine<Self> {
        if ids.len() != values.len() {
            return Err(EngineError::InvalidInput(format!(
                "{} segment identifiers but {} value lists",
                ids.len(),
                values.len()
            )));
        }
        let mut selection = Self::new();
        for (id, values) in ids.iter().zip(values) {
            selection.select(id, values.iter().flatten().cloned());
        }
        Ok(selection)
    }

    pub fn values(&self, segment_name: &str) -> Option<&[String]> {
        self.0.get(segment_name).map(Vec::as_slice)
    }
}

/// Cross product of the selected values, one dot-joined string per tuple.
///
/// Tokens follow the layout's segment order and the first segment varies
/// slowest. Values are used verbatim. A layout without segments yields a
/// single empty combination.
pub fn expand_combinations(layout: &SegmentLayout, selection: &FilterSelection) -> Vec<String> {
    let mut tuples: Vec<Vec<&str>> = vec![Vec::new()];

    for slot in layout.slots() {
        let choices: Vec<&str> = match selection.values(&slot.segment_name) {
            Some(values) if !values.is_empty() => values.iter().map(String::as_str).collect(),
            _ => vec![WILDCARD],
        };
        tuples = tuples
            .into_iter()
            .flat_map(|prefix| {
                choices.iter().map(move |choice| {
                    let mut tuple = prefix.clone();
                    tuple.push(*choice);
                    tuple
                })
            })
            .collect();
    }

    tuples.into_iter().map(|tuple| tuple.join(".")).collect()
}
