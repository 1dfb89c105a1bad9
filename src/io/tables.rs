use super::csv::split_record;
use crate::error::{AnalysisError, Result};
use crate::matrix::DissimilarityMatrix;
use crate::rounds::ItemId;
use std::collections::HashMap;

/// Numeric feature rows keyed by item id (e.g. scagnostics measures per plot)
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub ids: Vec<ItemId>,
    /// Feature column names, in the order values appear in each row
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

fn records(text: &str) -> impl Iterator<Item = (usize, Result<Vec<String>>)> + '_ {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let line_no = idx + 1;
            let cells = split_record(line).map_err(|reason| AnalysisError::MalformedTable {
                line: line_no,
                reason,
            });
            (line_no, cells)
        })
}

fn parse_value(line: usize, column: &str, cell: &str) -> Result<f64> {
    cell.trim()
        .parse::<f64>()
        .map_err(|_| AnalysisError::MalformedTable {
            line,
            reason: format!("column {:?}: {:?} is not a number", column, cell),
        })
}

/// Read a feature table: one id column, ignored columns, numeric rest
pub fn read_feature_table(text: &str, id_column: &str, ignore: &[String]) -> Result<FeatureTable> {
    let mut lines = records(text);

    let (header_line, header) = lines.next().ok_or(AnalysisError::MalformedTable {
        line: 1,
        reason: "missing header row".to_string(),
    })?;
    let header = header?;

    let id_pos = header
        .iter()
        .position(|h| h == id_column)
        .ok_or_else(|| AnalysisError::MalformedTable {
            line: header_line,
            reason: format!("id column {:?} not found", id_column),
        })?;

    let feature_cols: Vec<usize> = (0..header.len())
        .filter(|&c| c != id_pos && !ignore.contains(&header[c]))
        .collect();
    if feature_cols.is_empty() {
        return Err(AnalysisError::MalformedTable {
            line: header_line,
            reason: "no feature columns".to_string(),
        });
    }

    let mut table = FeatureTable {
        ids: Vec::new(),
        columns: feature_cols.iter().map(|&c| header[c].clone()).collect(),
        rows: Vec::new(),
    };

    for (line, cells) in lines {
        let cells = cells?;
        if cells.len() != header.len() {
            return Err(AnalysisError::MalformedTable {
                line,
                reason: format!("expected {} cells, found {}", header.len(), cells.len()),
            });
        }

        let row = feature_cols
            .iter()
            .map(|&c| parse_value(line, &header[c], &cells[c]))
            .collect::<Result<Vec<f64>>>()?;

        table.ids.push(cells[id_pos].clone());
        table.rows.push(row);
    }

    Ok(table)
}

/// Read a matrix CSV as written by [`super::write_matrix`]
///
/// Rows may come in any order; the matrix takes the header's id order.
pub fn read_matrix(text: &str) -> Result<DissimilarityMatrix> {
    let mut lines = records(text);

    let (_, header) = lines.next().ok_or(AnalysisError::MalformedTable {
        line: 1,
        reason: "missing header row".to_string(),
    })?;
    let header = header?;
    let ids: Vec<ItemId> = header.into_iter().skip(1).collect();

    let mut by_id: HashMap<ItemId, (usize, Vec<f64>)> = HashMap::with_capacity(ids.len());
    for (line, cells) in lines {
        let cells = cells?;
        if cells.len() != ids.len() + 1 {
            return Err(AnalysisError::MalformedTable {
                line,
                reason: format!("expected {} cells, found {}", ids.len() + 1, cells.len()),
            });
        }
        let row = ids
            .iter()
            .zip(cells[1..].iter())
            .map(|(col, cell)| parse_value(line, col, cell))
            .collect::<Result<Vec<f64>>>()?;

        if by_id.insert(cells[0].clone(), (line, row)).is_some() {
            return Err(AnalysisError::MalformedTable {
                line,
                reason: format!("duplicate row {:?}", cells[0]),
            });
        }
    }

    let mut lines_in_order = Vec::with_capacity(ids.len());
    let mut rows = Vec::with_capacity(ids.len());
    for id in &ids {
        let (line, row) = by_id.remove(id).ok_or_else(|| AnalysisError::MalformedTable {
            line: 1,
            reason: format!("no row for column {:?}", id),
        })?;
        lines_in_order.push(line);
        rows.push(row);
    }
    if let Some((extra, (line, _))) = by_id.into_iter().next() {
        return Err(AnalysisError::MalformedTable {
            line,
            reason: format!("row {:?} has no matching column", extra),
        });
    }

    // Report validation failures against the file line of the offending row
    DissimilarityMatrix::from_rows(ids, rows).map_err(|e| match e {
        AnalysisError::MalformedTable { line, reason } => AnalysisError::MalformedTable {
            line: lines_in_order.get(line - 1).copied().unwrap_or(1),
            reason,
        },
        other => other,
    })
}
