//! Result table shown next to the annotated image

use serde::{Deserialize, Serialize};

use crate::vision::BoundingRegion;

/// Column headers, always present even when there are no rows
pub const COLUMNS: [&str; 2] = ["text", "confidence"];

/// One recognized line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub text: String,
    pub confidence: f32,
}

/// Recognized text in detection order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    columns: [&'static str; 2],
    rows: Vec<ResultRow>,
}

impl Default for ResultTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self {
            columns: COLUMNS,
            rows,
        }
    }

    /// Flatten engine regions, keeping their order
    pub fn from_regions(regions: &[BoundingRegion]) -> Self {
        Self::new(
            regions
                .iter()
                .map(|r| ResultRow {
                    text: r.text.clone(),
                    confidence: r.confidence,
                })
                .collect(),
        )
    }

    pub fn columns(&self) -> [&'static str; 2] {
        self.columns
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tab-separated rendering with a header line, used by the CLI
    pub fn to_tsv(&self) -> String {
        let mut out = self.columns.join("\t");
        for row in &self.rows {
            out.push('\n');
            out.push_str(&format!("{}\t{:.4}", row.text.replace(['\t', '\n'], " "), row.confidence));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::Quad;

    #[test]
    fn test_empty_table_keeps_columns() {
        let table = ResultTable::from_regions(&[]);
        assert!(table.is_empty());
        assert_eq!(table.columns(), ["text", "confidence"]);
        assert_eq!(table.to_tsv(), "text\tconfidence");

        assert_eq!(ResultTable::default(), table);
    }

    #[test]
    fn test_rows_follow_detection_order() {
        let quad = Quad::from_rect(0.0, 0.0, 1.0, 1.0);
        let regions = vec![
            BoundingRegion::new(quad, "second line", 0.5),
            BoundingRegion::new(quad, "first line", 0.9),
        ];
        let table = ResultTable::from_regions(&regions);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].text, "second line");
        assert_eq!(table.rows()[1].text, "first line");
    }

    #[test]
    fn test_tsv_output() {
        let table = ResultTable::new(vec![ResultRow {
            text: "a\tb".to_string(),
            confidence: 0.25,
        }]);
        assert_eq!(table.to_tsv(), "text\tconfidence\na b\t0.2500");
    }

    #[test]
    fn test_json_shape() {
        let table = ResultTable::new(vec![ResultRow {
            text: "hello".to_string(),
            confidence: 0.5,
        }]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["columns"], serde_json::json!(["text", "confidence"]));
        assert_eq!(json["rows"][0]["text"], "hello");
    }
}
