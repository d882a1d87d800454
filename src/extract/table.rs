//! Results-table extractor
//!
//! A well-formed precinct-commission page contains exactly one results table
//! nested as `td[width="90%"] > div > table`. The table has 27 rows: row 0
//! carries the precinct labels, row 19 is a blank divider before the party
//! totals, and the remaining 25 rows each hold one bolded integer per
//! precinct. Rows are metric-major; records are precinct-major, so the
//! validated matrix is transposed before emission.

use crate::schema::{SEPARATOR_ROWS, TABLE_ROWS};
use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;

/// One output row: a precinct and its 25 metric values, tagged with the
/// region path name accumulated during the crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecinctRecord {
    /// Region path name, e.g. "Московская область - Балашихинская"
    pub region: String,
    /// Precinct label from the table header, e.g. "УИК №1"
    pub precinct: String,
    /// The 25 metric values in fixed row order
    pub metrics: Vec<i64>,
}

/// Shape violations in the extracted table. These indicate schema drift on
/// the source site, not transport trouble, but the crawl engine still grants
/// them the single leaf retry since truncated fetches look the same.
#[derive(Debug, Error)]
pub enum TableStructureError {
    #[error("expected exactly 1 results table, found {found}")]
    TableCount { found: usize },

    #[error("expected {expected} table rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("separator row {index} should hold no numeric cells, found {found}")]
    SeparatorNotEmpty { index: usize, found: usize },

    #[error("row {row} has {found} numeric cells, expected {expected}")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} holds non-numeric value {token:?}")]
    BadNumber { row: usize, token: String },
}

fn static_selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Extracts all precinct records from a leaf document.
///
/// Validates the full table shape before returning anything: one table,
/// 27 rows, structurally empty separator rows at the fixed positions, and a
/// uniform numeric cell count matching the precinct label count. Any
/// deviation fails the whole page.
///
/// # Arguments
///
/// * `document` - The parsed precinct-commission page
/// * `region` - Region path name supplied by the crawl engine
pub fn extract_precincts(
    document: &Html,
    region: &str,
) -> Result<Vec<PrecinctRecord>, TableStructureError> {
    let table = locate_table(document)?;

    // html5ever inserts <tbody>, so the rows are descendants, not children
    let row_selector = static_selector("tr");
    let rows: Vec<ElementRef> = table.select(&row_selector).collect();
    if rows.len() != TABLE_ROWS {
        return Err(TableStructureError::RowCount {
            expected: TABLE_ROWS,
            found: rows.len(),
        });
    }

    let labels = precinct_labels(&rows[0]);

    let mut matrix = Vec::with_capacity(TABLE_ROWS);
    for (index, row) in rows.iter().enumerate() {
        matrix.push(numeric_cells(row, index)?);
    }

    // The separator rows are dropped back-to-front so the earlier index
    // stays valid after removal
    for &index in SEPARATOR_ROWS.iter().rev() {
        let found = matrix[index].len();
        if found != 0 {
            return Err(TableStructureError::SeparatorNotEmpty { index, found });
        }
        matrix.remove(index);
    }

    for (row, cells) in matrix.iter().enumerate() {
        if cells.len() != labels.len() {
            return Err(TableStructureError::ColumnMismatch {
                row,
                expected: labels.len(),
                found: cells.len(),
            });
        }
    }

    // Transpose the metric-major matrix into precinct-major records
    let records = labels
        .iter()
        .enumerate()
        .map(|(precinct_index, label)| PrecinctRecord {
            region: region.to_string(),
            precinct: label.clone(),
            metrics: matrix.iter().map(|row| row[precinct_index]).collect(),
        })
        .collect();

    Ok(records)
}

/// Locates the single results table in the document
fn locate_table(document: &Html) -> Result<ElementRef<'_>, TableStructureError> {
    let table_selector = static_selector(r#"td[width="90%"] > div > table"#);
    let mut tables = document.select(&table_selector);

    let table = tables
        .next()
        .ok_or(TableStructureError::TableCount { found: 0 })?;

    let extra = tables.count();
    if extra > 0 {
        return Err(TableStructureError::TableCount { found: extra + 1 });
    }

    Ok(table)
}

/// Extracts the precinct labels from the header row.
///
/// Labels are the direct text children of each `td > nobr` cell. Bolded
/// numeric children are deliberately excluded so a malformed header can
/// never masquerade as labels; such a header fails the separator check
/// instead.
fn precinct_labels(header_row: &ElementRef) -> Vec<String> {
    let cell_selector = static_selector("td > nobr");

    header_row
        .select(&cell_selector)
        .filter_map(|cell| {
            let text: String = cell
                .children()
                .filter_map(|child| match child.value() {
                    Node::Text(text) => Some(text.trim()),
                    _ => None,
                })
                .collect();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
        .collect()
}

/// Extracts the bolded numeric cells of one row, parsed as base-10 integers
fn numeric_cells(row: &ElementRef, index: usize) -> Result<Vec<i64>, TableStructureError> {
    let value_selector = static_selector("td > nobr > b");

    row.select(&value_selector)
        .map(|cell| {
            let token: String = cell.text().collect::<String>().trim().to_string();
            token
                .parse::<i64>()
                .map_err(|_| TableStructureError::BadNumber { row: index, token })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::METRIC_COUNT;

    /// Builds a leaf page around the given pre-rendered table rows. The
    /// results table sits inside an outer layout table, as on the live site.
    fn page_with_rows(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><table><tr><td width="90%"><div><table>{rows}</table></div></td></tr></table></body></html>"#
        ))
    }

    fn header_row(labels: &[&str]) -> String {
        let cells: String = labels
            .iter()
            .map(|label| format!("<td><nobr>{label}</nobr></td>"))
            .collect();
        format!("<tr>{cells}</tr>")
    }

    fn data_row(values: &[i64]) -> String {
        let cells: String = values
            .iter()
            .map(|value| format!("<td><nobr><b>{value}</b></nobr></td>"))
            .collect();
        format!("<tr>{cells}</tr>")
    }

    fn blank_row(width: usize) -> String {
        let cells: String = (0..width).map(|_| "<td><nobr>&nbsp;</nobr></td>").collect();
        format!("<tr>{cells}</tr>")
    }

    /// A well-formed 27-row table where metric row `i` (post-deletion
    /// numbering) holds `(i + 1) * 100 + j` for precinct `j`
    fn well_formed_rows(labels: &[&str]) -> String {
        let mut rows = header_row(labels);
        let mut metric = 0;
        for index in 1..TABLE_ROWS {
            if index == 19 {
                rows.push_str(&blank_row(labels.len()));
                continue;
            }
            let values: Vec<i64> = (0..labels.len())
                .map(|j| ((metric + 1) * 100 + j) as i64)
                .collect();
            rows.push_str(&data_row(&values));
            metric += 1;
        }
        rows
    }

    #[test]
    fn well_formed_table_yields_one_record_per_label() {
        let labels = ["УИК №1", "УИК №2", "УИК №3"];
        let document = page_with_rows(&well_formed_rows(&labels));
        let records = extract_precincts(&document, "RegionA").unwrap();

        assert_eq!(records.len(), labels.len());
        for (record, label) in records.iter().zip(labels) {
            assert_eq!(record.region, "RegionA");
            assert_eq!(record.precinct, label);
            assert_eq!(record.metrics.len(), METRIC_COUNT);
        }
    }

    #[test]
    fn transpose_maps_row_i_column_j_to_precinct_j_metric_i() {
        let labels = ["УИК №1", "УИК №2"];
        let document = page_with_rows(&well_formed_rows(&labels));
        let records = extract_precincts(&document, "R").unwrap();

        for (j, record) in records.iter().enumerate() {
            for (i, value) in record.metrics.iter().enumerate() {
                assert_eq!(*value, ((i + 1) * 100 + j) as i64, "metric {i} precinct {j}");
            }
        }
    }

    #[test]
    fn missing_table_is_rejected() {
        let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let result = extract_precincts(&document, "R");
        assert!(matches!(
            result,
            Err(TableStructureError::TableCount { found: 0 })
        ));
    }

    #[test]
    fn multiple_tables_are_rejected() {
        let rows = well_formed_rows(&["УИК №1"]);
        let html = format!(
            r#"<html><body>
            <table><tr><td width="90%"><div><table>{rows}</table></div></td></tr></table>
            <table><tr><td width="90%"><div><table>{rows}</table></div></td></tr></table>
            </body></html>"#
        );
        let result = extract_precincts(&Html::parse_document(&html), "R");
        assert!(matches!(
            result,
            Err(TableStructureError::TableCount { found: 2 })
        ));
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let labels = ["УИК №1"];
        let mut rows = header_row(&labels);
        for _ in 0..10 {
            rows.push_str(&data_row(&[1]));
        }
        let result = extract_precincts(&page_with_rows(&rows), "R");
        assert!(matches!(
            result,
            Err(TableStructureError::RowCount {
                expected: 27,
                found: 11
            })
        ));
    }

    #[test]
    fn numeric_header_row_is_rejected() {
        // Row 0 carrying bolded values violates the separator invariant
        let labels = ["УИК №1"];
        let mut rows = data_row(&[42]);
        let mut metric = 0;
        for index in 1..TABLE_ROWS {
            if index == 19 {
                rows.push_str(&blank_row(labels.len()));
            } else {
                rows.push_str(&data_row(&[(metric + 1) as i64]));
                metric += 1;
            }
        }
        let result = extract_precincts(&page_with_rows(&rows), "R");
        assert!(matches!(
            result,
            Err(TableStructureError::SeparatorNotEmpty { index: 0, found: 1 })
        ));
    }

    #[test]
    fn numeric_divider_row_is_rejected() {
        let labels = ["УИК №1"];
        let mut rows = header_row(&labels);
        for _ in 1..TABLE_ROWS {
            rows.push_str(&data_row(&[7]));
        }
        let result = extract_precincts(&page_with_rows(&rows), "R");
        assert!(matches!(
            result,
            Err(TableStructureError::SeparatorNotEmpty {
                index: 19,
                found: 1
            })
        ));
    }

    #[test]
    fn column_count_mismatch_is_rejected() {
        let labels = ["УИК №1", "УИК №2"];
        let mut rows = header_row(&labels);
        for index in 1..TABLE_ROWS {
            if index == 19 {
                rows.push_str(&blank_row(labels.len()));
            } else if index == 5 {
                // One row short a precinct
                rows.push_str(&data_row(&[1]));
            } else {
                rows.push_str(&data_row(&[1, 2]));
            }
        }
        let result = extract_precincts(&page_with_rows(&rows), "R");
        assert!(matches!(
            result,
            Err(TableStructureError::ColumnMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let labels = ["УИК №1"];
        let mut rows = header_row(&labels);
        for index in 1..TABLE_ROWS {
            if index == 19 {
                rows.push_str(&blank_row(labels.len()));
            } else if index == 3 {
                rows.push_str("<tr><td><nobr><b>abc</b></nobr></td></tr>");
            } else {
                rows.push_str(&data_row(&[1]));
            }
        }
        let result = extract_precincts(&page_with_rows(&rows), "R");
        match result {
            Err(TableStructureError::BadNumber { row: 3, token }) => assert_eq!(token, "abc"),
            other => panic!("expected BadNumber, got {other:?}"),
        }
    }

    #[test]
    fn surrounding_whitespace_in_numbers_is_tolerated() {
        let labels = ["УИК №1"];
        let mut rows = header_row(&labels);
        for index in 1..TABLE_ROWS {
            if index == 19 {
                rows.push_str(&blank_row(labels.len()));
            } else {
                rows.push_str("<tr><td><nobr><b> 12 </b></nobr></td></tr>");
            }
        }
        let records = extract_precincts(&page_with_rows(&rows), "R").unwrap();
        assert!(records[0].metrics.iter().all(|&v| v == 12));
    }
}
