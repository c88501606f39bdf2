//! Sheet summary panels: sheet info, section previews and the formula list.

use serde::Serialize;

use crate::numfmt::format_value;
use crate::types::{FormulaMap, Section, SheetStructure};

pub const NO_SECTIONS_MESSAGE: &str = "No sections identified in this sheet.";
pub const NO_FORMULAS_MESSAGE: &str = "No formulas found in this sheet.";

/// Headline counts for a loaded sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub formulas: usize,
    pub sections: usize,
}

impl SheetInfo {
    pub fn new(name: &str, structure: &SheetStructure) -> Self {
        Self {
            name: name.to_string(),
            rows: structure.rows,
            cols: structure.cols,
            formulas: structure.formulas_count,
            sections: structure.sections.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCell {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPreview {
    pub name: String,
    pub cells: Vec<PreviewCell>,
    /// "... and N more cells" when the section was cut short.
    pub more: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SectionsView {
    Empty { message: String },
    Sections(Vec<SectionPreview>),
}

/// First `limit` cells of each section.
pub fn render_sections(sections: &[Section], limit: usize) -> SectionsView {
    if sections.is_empty() {
        return SectionsView::Empty {
            message: NO_SECTIONS_MESSAGE.to_string(),
        };
    }
    SectionsView::Sections(
        sections
            .iter()
            .map(|s| preview_section(s, limit))
            .collect(),
    )
}

fn preview_section(section: &Section, limit: usize) -> SectionPreview {
    let cells = section
        .cells
        .iter()
        .take(limit)
        .map(|cell| PreviewCell {
            label: cell.label(),
            value: format_value(&cell.value),
        })
        .collect();
    let hidden = section.cells.len().saturating_sub(limit);
    SectionPreview {
        name: section.name.clone(),
        cells,
        more: (hidden > 0).then(|| format!("... and {hidden} more cells")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaLine {
    pub reference: String,
    pub formula: String,
    /// "Result: ..."
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FormulaPanel {
    Empty { message: String },
    Formulas(Vec<FormulaLine>),
}

/// Formula list in map order.
pub fn render_formulas(formulas: &FormulaMap) -> FormulaPanel {
    if formulas.is_empty() {
        return FormulaPanel::Empty {
            message: NO_FORMULAS_MESSAGE.to_string(),
        };
    }
    FormulaPanel::Formulas(
        formulas
            .iter()
            .map(|entry| FormulaLine {
                reference: entry.reference.clone(),
                formula: entry.formula_text.clone(),
                result: format!("Result: {}", format_value(&entry.computed_value)),
            })
            .collect(),
    )
}
