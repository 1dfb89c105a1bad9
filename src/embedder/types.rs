use crate::rounds::ItemId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedPoint {
    pub id: ItemId,
    pub x: f64,
    pub y: f64,
}

/// 2-D layout of every matrix item, in matrix order
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub points: Vec<EmbeddedPoint>,
    /// Raw stress of the returned layout against the scaled matrix
    pub stress: f64,
    /// Iterations run by the winning start
    pub iterations: usize,
}

impl Embedding {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, id: &str) -> Option<&EmbeddedPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Euclidean distance between two embedded items
    pub fn layout_distance(&self, a: &str, b: &str) -> Option<f64> {
        let p = self.point(a)?;
        let q = self.point(b)?;
        Some(((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt())
    }
}
