use qg_core::codes::doc_table as codes;
use qg_core::RECOMMENDATIONS;

use crate::rule::Validator;
use crate::types::ContractError;

pub const TABLE_START_MARKER: &str = "<!-- quality-gate-recommendations:start -->";
pub const TABLE_END_MARKER: &str = "<!-- quality-gate-recommendations:end -->";

/// Markdown table generated from the static recommendation rows.
pub fn render_recommendation_table() -> String {
    let mut s = String::new();
    s.push_str("| ID | Failure class | Action |\n");
    s.push_str("| --- | --- | --- |\n");
    for r in &RECOMMENDATIONS {
        s.push_str(&format!("| [{}](#{}) | `{}` | {} |\n", r.id, r.anchor, r.class, r.summary));
    }
    s
}

/// Byte range of the text between the two markers.
fn block_range(doc: &str) -> Result<(usize, usize), &'static str> {
    let (Some(start), Some(end)) = (doc.find(TABLE_START_MARKER), doc.find(TABLE_END_MARKER)) else {
        return Err(codes::MISSING_MARKERS);
    };
    let inner_start = start + TABLE_START_MARKER.len();
    if end < inner_start {
        return Err(codes::MARKERS_OUT_OF_ORDER);
    }
    Ok((inner_start, end))
}

/// Rewrites the marked block; `None` when the markers are missing or misordered.
/// Applying it to its own output yields the same document.
pub fn update_doc_table(doc: &str) -> Option<String> {
    let (from, to) = block_range(doc).ok()?;
    let mut out = String::with_capacity(doc.len());
    out.push_str(&doc[..from]);
    out.push('\n');
    out.push_str(&render_recommendation_table());
    out.push_str(&doc[to..]);
    Some(out)
}

#[derive(Default)]
pub struct DocTableValidator;

impl Validator for DocTableValidator {
    type Input = str;

    fn id(&self) -> &str {
        "doc_table"
    }

    fn validate_detailed(&self, doc: &str) -> Vec<ContractError> {
        match block_range(doc) {
            Err(code) if code == codes::MISSING_MARKERS => vec![ContractError::new(
                code,
                "markers",
                format!("Document must contain {TABLE_START_MARKER} and {TABLE_END_MARKER}."),
            )],
            Err(code) => vec![ContractError::new(code, "markers", "The start marker must precede the end marker.")],
            Ok(_) => match update_doc_table(doc) {
                Some(updated) if updated == doc => vec![],
                _ => vec![ContractError::new(
                    codes::OUT_OF_DATE,
                    "table",
                    "Recommendation table is out of date; run `qg doc-table --write`.",
                )],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::codes_of;

    const DOC: &str = "# Runbook\n\n<!-- quality-gate-recommendations:start -->\nstale\n<!-- quality-gate-recommendations:end -->\n\n## QG-001\n";

    #[test]
    fn update_is_idempotent() {
        let once = update_doc_table(DOC).unwrap();
        let twice = update_doc_table(&once).unwrap();
        assert_eq!(once, twice);
        assert!(once.contains("| [QG-007](#qg-007) | `selective_contract` |"));
        assert!(once.ends_with("<!-- quality-gate-recommendations:end -->\n\n## QG-001\n"));
    }

    #[test]
    fn stale_then_current() {
        assert_eq!(codes_of(&DocTableValidator.validate_detailed(DOC)), vec![codes::OUT_OF_DATE]);
        let updated = update_doc_table(DOC).unwrap();
        assert!(DocTableValidator.validate_detailed(&updated).is_empty());
    }

    #[test]
    fn marker_problems() {
        assert_eq!(codes_of(&DocTableValidator.validate_detailed("# nothing")), vec![codes::MISSING_MARKERS]);
        let swapped = format!("{TABLE_END_MARKER}\n{TABLE_START_MARKER}\n");
        assert_eq!(codes_of(&DocTableValidator.validate_detailed(&swapped)), vec![codes::MARKERS_OUT_OF_ORDER]);
        assert!(update_doc_table(&swapped).is_none());
    }

    #[test]
    fn table_has_a_row_per_recommendation() {
        let table = render_recommendation_table();
        assert_eq!(table.lines().count(), RECOMMENDATIONS.len() + 2);
    }
}
