//! Random-forest binary classifier
//!
//! Bootstrap-sampled CART trees split on Gini impurity with per-node
//! feature subsampling; queries average the leaf class distributions
//! across trees. Training is seeded, so the same dataset always yields
//! the same model. The pipeline only relies on the two-operation
//! contract (train once, return a class-probability distribution), not
//! on these internals.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use paraclean_core::FEATURE_COUNT;

use crate::arff::Dataset;
use crate::error::{Error, Result};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Stop splitting nodes at or below this size.
    pub min_leaf: usize,
    /// Seed for bootstrap and feature sampling.
    pub seed: u64,
    /// Features considered per split (None: log2(count) + 1).
    pub max_features: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            min_leaf: 1,
            seed: 1,
            max_features: None,
        }
    }
}

enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn distribution<'a>(&'a self, point: &[f64; FEATURE_COUNT]) -> &'a [f64] {
        match self {
            Node::Leaf { distribution } => distribution,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if point[*feature] <= *threshold {
                    left.distribution(point)
                } else {
                    right.distribution(point)
                }
            }
        }
    }
}

/// A trained ensemble. Read-only after construction.
pub struct RandomForest {
    trees: Vec<Node>,
    n_classes: usize,
}

impl RandomForest {
    /// Train from a labeled dataset. An empty dataset cannot produce a
    /// model and is rejected.
    pub fn train(dataset: &Dataset, config: &ForestConfig) -> Result<Self> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let n_classes = dataset.class_values.len();
        let n_rows = dataset.len();
        let max_features = config
            .max_features
            .unwrap_or((FEATURE_COUNT as f64).log2() as usize + 1)
            .clamp(1, FEATURE_COUNT);

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);
        for _ in 0..config.n_trees {
            let sample: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
            trees.push(build_node(
                dataset,
                &sample,
                n_classes,
                max_features,
                config.min_leaf,
                &mut rng,
            ));
        }

        debug!(
            "Trained {} trees on {} rows ({} features per split)",
            trees.len(),
            n_rows,
            max_features
        );

        Ok(Self { trees, n_classes })
    }

    /// Class-probability distribution for one feature vector, averaged
    /// over the per-tree leaf distributions. Sums to 1; a unanimous
    /// ensemble yields an exact 1.0 for the winning class.
    pub fn distribution(&self, point: &[f64; FEATURE_COUNT]) -> Vec<f64> {
        let mut total = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (slot, p) in total.iter_mut().zip(tree.distribution(point)) {
                *slot += p;
            }
        }
        for slot in &mut total {
            *slot /= self.trees.len() as f64;
        }
        total
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

fn class_counts(dataset: &Dataset, indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        counts[dataset.labels[i]] += 1;
    }
    counts
}

fn gini(counts: &[usize], total: usize) -> f64 {
    let mut impurity = 1.0;
    for &c in counts {
        let p = c as f64 / total as f64;
        impurity -= p * p;
    }
    impurity
}

fn leaf(counts: &[usize], total: usize) -> Node {
    Node::Leaf {
        distribution: counts.iter().map(|&c| c as f64 / total as f64).collect(),
    }
}

fn build_node(
    dataset: &Dataset,
    indices: &[usize],
    n_classes: usize,
    max_features: usize,
    min_leaf: usize,
    rng: &mut StdRng,
) -> Node {
    let counts = class_counts(dataset, indices, n_classes);
    let parent_gini = gini(&counts, indices.len());
    if indices.len() <= min_leaf || parent_gini == 0.0 {
        return leaf(&counts, indices.len());
    }

    let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
    features.shuffle(rng);
    features.truncate(max_features);

    let mut best: Option<(f64, usize, f64)> = None;
    for &feature in &features {
        let mut values: Vec<f64> = indices.iter().map(|&i| dataset.rows[i][feature]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).expect("finite feature value"));
        values.dedup();
        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let (mut left, mut right) = (vec![0usize; n_classes], vec![0usize; n_classes]);
            let (mut n_left, mut n_right) = (0usize, 0usize);
            for &i in indices {
                if dataset.rows[i][feature] <= threshold {
                    left[dataset.labels[i]] += 1;
                    n_left += 1;
                } else {
                    right[dataset.labels[i]] += 1;
                    n_right += 1;
                }
            }
            if n_left == 0 || n_right == 0 {
                continue;
            }
            let weighted = (n_left as f64 * gini(&left, n_left)
                + n_right as f64 * gini(&right, n_right))
                / indices.len() as f64;
            if best.map_or(weighted < parent_gini, |(b, _, _)| weighted < b) {
                best = Some((weighted, feature, threshold));
            }
        }
    }

    let Some((_, feature, threshold)) = best else {
        // Every sampled feature was constant over this node.
        return leaf(&counts, indices.len());
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| dataset.rows[i][feature] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_node(
            dataset, &left_idx, n_classes, max_features, min_leaf, rng,
        )),
        right: Box::new(build_node(
            dataset, &right_idx, n_classes, max_features, min_leaf, rng,
        )),
    }
}
