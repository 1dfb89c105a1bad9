use crate::rounds::ItemId;

/// Flat partition of the matrix items into `k` clusters
///
/// Labels are assigned in order of first appearance along the item order, so
/// two labelings of the same partition compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterLabeling {
    pub k: usize,
    pub items: Vec<ItemId>,
    pub labels: Vec<usize>,
}

impl ClusterLabeling {
    pub fn label_of(&self, id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item == id)
            .map(|i| self.labels[i])
    }

    /// Members of each cluster, indexed by label
    pub fn clusters(&self) -> Vec<Vec<ItemId>> {
        let mut clusters = vec![Vec::new(); self.k];
        for (item, &label) in self.items.iter().zip(self.labels.iter()) {
            clusters[label].push(item.clone());
        }
        clusters
    }

    pub fn same_cluster(&self, a: &str, b: &str) -> bool {
        match (self.label_of(a), self.label_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}
