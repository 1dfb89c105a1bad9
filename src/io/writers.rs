use super::csv::join_record;
use crate::clusterer::ClusterLabeling;
use crate::correlation::PairedDistance;
use crate::embedder::Embedding;
use crate::matrix::DissimilarityMatrix;
use std::io::{self, Write};

/// Header cell above the row labels of a matrix table
pub const MATRIX_CORNER: &str = "Name";

/// Square table: header of ids, then one labelled row per id
pub fn write_matrix<W: Write>(out: &mut W, matrix: &DissimilarityMatrix) -> io::Result<()> {
    let header = std::iter::once(MATRIX_CORNER).chain(matrix.items().iter().map(String::as_str));
    writeln!(out, "{}", join_record(header))?;

    for (i, id) in matrix.items().iter().enumerate() {
        let cells = std::iter::once(id.clone()).chain(matrix.row(i).iter().map(|v| v.to_string()));
        writeln!(out, "{}", join_record(cells))?;
    }
    Ok(())
}

/// `id,x,y` per item
pub fn write_projection<W: Write>(out: &mut W, embedding: &Embedding) -> io::Result<()> {
    writeln!(out, "id,x,y")?;
    for p in &embedding.points {
        writeln!(
            out,
            "{}",
            join_record([p.id.clone(), p.x.to_string(), p.y.to_string()])
        )?;
    }
    Ok(())
}

/// Header of ids, then one label line per cluster-count configuration
///
/// All labelings must cover the same items in the same order.
pub fn write_clustering<W: Write>(out: &mut W, labelings: &[ClusterLabeling]) -> io::Result<()> {
    let Some(first) = labelings.first() else {
        return Ok(());
    };
    writeln!(out, "{}", join_record(&first.items))?;

    for labeling in labelings {
        if labeling.items != first.items {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cluster labelings cover different items",
            ));
        }
        let labels = labeling.labels.iter().map(|l| l.to_string());
        writeln!(out, "{}", join_record(labels))?;
    }
    Ok(())
}

/// Flattened pair sequences for the correlation scatter renderer
pub fn write_pairs<W: Write>(out: &mut W, pairs: &[PairedDistance]) -> io::Result<()> {
    writeln!(out, "a,b,first,second")?;
    for p in pairs {
        writeln!(
            out,
            "{}",
            join_record([
                p.a.clone(),
                p.b.clone(),
                p.first.to_string(),
                p.second.to_string()
            ])
        )?;
    }
    Ok(())
}
