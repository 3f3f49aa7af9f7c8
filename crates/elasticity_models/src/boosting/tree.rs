//! Variance-reduction regression tree.
//!
//! Nodes are stored in an arena and addressed by index. Splits are chosen
//! exhaustively over every feature and every midpoint between consecutive
//! distinct values, minimising the children's summed squared error. Ties are
//! resolved in favour of the first candidate found (lowest feature index,
//! lowest threshold).

use crate::{FeatureMatrix, ModelError};

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    /// Maximum depth; a depth of zero yields a single leaf
    pub max_depth: usize,
    /// Minimum rows a node needs before it may split
    pub min_samples_split: usize,
    /// Minimum rows each child must keep
    pub min_samples_leaf: usize,
}

/// Fitted regression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    /// Unnormalised squared-error decrease attributed to each feature.
    impurity_decrease: Vec<f64>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    children_sse: f64,
}

impl RegressionTree {
    /// Fit a tree to `targets` over the rows of `features`.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` when `targets` and the matrix differ in rows
    /// - `InsufficientData` for an empty input
    pub fn fit(
        features: &FeatureMatrix,
        targets: &[f64],
        params: TreeParams,
    ) -> Result<Self, ModelError> {
        if features.n_rows() != targets.len() {
            return Err(ModelError::dimension_mismatch(features.n_rows(), targets.len()));
        }
        if targets.is_empty() {
            return Err(ModelError::insufficient_data(1, 0));
        }

        let mut tree = Self {
            nodes: Vec::new(),
            impurity_decrease: vec![0.0; features.n_features()],
        };
        let indices: Vec<usize> = (0..targets.len()).collect();
        tree.grow(features, targets, indices, 0, &params);
        Ok(tree)
    }

    /// Predict a single row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Per-feature impurity decrease normalised to sum to one.
    ///
    /// All zeros when the tree never split.
    pub fn feature_importances(&self) -> Vec<f64> {
        let total: f64 = self.impurity_decrease.iter().sum();
        if total > 0.0 {
            self.impurity_decrease.iter().map(|d| d / total).collect()
        } else {
            vec![0.0; self.impurity_decrease.len()]
        }
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    fn grow(
        &mut self,
        features: &FeatureMatrix,
        targets: &[f64],
        indices: Vec<usize>,
        depth: usize,
        params: &TreeParams,
    ) -> usize {
        let n = indices.len() as f64;
        let sum: f64 = indices.iter().map(|&i| targets[i]).sum();
        let mean = sum / n;
        let sse: f64 = indices
            .iter()
            .map(|&i| (targets[i] - mean) * (targets[i] - mean))
            .sum();

        let node_index = self.nodes.len();
        self.nodes.push(Node::Leaf { value: mean });

        if depth >= params.max_depth || indices.len() < params.min_samples_split || sse <= 0.0 {
            return node_index;
        }

        let Some(best) = best_split(features, targets, &indices, params.min_samples_leaf) else {
            return node_index;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| features.row(i)[best.feature] <= best.threshold);

        self.impurity_decrease[best.feature] += (sse - best.children_sse).max(0.0);

        let left = self.grow(features, targets, left_rows, depth + 1, params);
        let right = self.grow(features, targets, right_rows, depth + 1, params);
        self.nodes[node_index] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        node_index
    }
}

fn best_split(
    features: &FeatureMatrix,
    targets: &[f64],
    indices: &[usize],
    min_samples_leaf: usize,
) -> Option<SplitCandidate> {
    let n = indices.len();
    let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();

    let mut best: Option<SplitCandidate> = None;
    let mut sorted = indices.to_vec();

    for feature in 0..features.n_features() {
        sorted.sort_by(|&a, &b| features.row(a)[feature].total_cmp(&features.row(b)[feature]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for split in 1..n {
            let moved = targets[sorted[split - 1]];
            left_sum += moved;
            left_sq += moved * moved;

            if split < min_samples_leaf || n - split < min_samples_leaf {
                continue;
            }
            let lo = features.row(sorted[split - 1])[feature];
            let hi = features.row(sorted[split])[feature];
            if lo >= hi {
                continue;
            }

            let n_left = split as f64;
            let n_right = (n - split) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let children_sse = (left_sq - left_sum * left_sum / n_left)
                + (right_sq - right_sum * right_sum / n_right);

            if best.as_ref().map_or(true, |b| children_sse < b.children_sse) {
                let mut threshold = lo + (hi - lo) / 2.0;
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    children_sse,
                });
            }
        }
    }

    best
}
