use std::fmt;

use indexmap::map::Values;
use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CellValue;

/// A formula cell: its address, source text and the value last computed by
/// the service.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaEntry {
    pub reference: String,
    pub formula_text: String,
    pub computed_value: CellValue,
}

/// Wire body of one formula entry (the reference is the map key).
#[derive(Serialize, Deserialize)]
struct FormulaBody {
    #[serde(default)]
    formula: String,
    #[serde(default)]
    value: CellValue,
}

/// Formula entries keyed by unique reference, in the order received.
#[derive(Debug, Clone, Default)]
pub struct FormulaMap {
    entries: IndexMap<String, FormulaEntry>,
}

impl FormulaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing reference keeps its position and takes
    /// the new text and value.
    pub fn insert(&mut self, entry: FormulaEntry) {
        self.entries.insert(entry.reference.clone(), entry);
    }

    pub fn get(&self, reference: &str) -> Option<&FormulaEntry> {
        self.entries.get(reference)
    }

    /// First entry in insertion order.
    pub fn first(&self) -> Option<&FormulaEntry> {
        self.entries.first().map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> Values<'_, String, FormulaEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Equal when both hold the same entries in the same order.
impl PartialEq for FormulaMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl FromIterator<FormulaEntry> for FormulaMap {
    fn from_iter<I: IntoIterator<Item = FormulaEntry>>(iter: I) -> Self {
        let mut map = Self::new();
        for entry in iter {
            map.insert(entry);
        }
        map
    }
}

impl<'a> IntoIterator for &'a FormulaMap {
    type Item = &'a FormulaEntry;
    type IntoIter = Values<'a, String, FormulaEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for FormulaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in self {
            map.serialize_entry(
                &entry.reference,
                &FormulaBody {
                    formula: entry.formula_text.clone(),
                    value: entry.computed_value.clone(),
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FormulaMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FormulaMapVisitor)
    }
}

/// Visits the JSON object in document order so insertion order survives.
struct FormulaMapVisitor;

impl<'de> Visitor<'de> for FormulaMapVisitor {
    type Value = FormulaMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of cell reference to formula")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FormulaMap, A::Error> {
        let mut map = FormulaMap::new();
        while let Some((reference, body)) = access.next_entry::<String, FormulaBody>()? {
            map.insert(FormulaEntry {
                reference,
                formula_text: body.formula,
                computed_value: body.value,
            });
        }
        Ok(map)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<FormulaMap, E> {
        Ok(FormulaMap::new())
    }
}
