use crate::matrix::FeatureMatrix;
use crate::vector::l2_distance;
use ordered_float::OrderedFloat;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;

/// Rows per leaf before a node stops splitting
const LEAF_SIZE: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    center: Vec<f32>,
    radius: f32,
    kind: NodeKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum NodeKind {
    Leaf { rows: Vec<u32> },
    Branch { left: u32, right: u32 },
}

/// Exact k-nearest-neighbor ball tree over the feature rows.
///
/// Built offline over a [`FeatureMatrix`], serialized as the neighbor-model
/// artifact and loaded read-only at startup. Queries return Euclidean
/// distances in ascending order. The tree owns a copy of the feature rows, so
/// the artifact is self-contained; row indices refer to catalog positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallTree {
    dim: usize,
    len: usize,
    vectors: Vec<f32>,
    nodes: Vec<Node>,
    root: u32,
}

impl BallTree {
    /// Build a tree over every row of the matrix.
    #[must_use]
    pub fn build(matrix: &FeatureMatrix) -> Self {
        let dim = matrix.dim();
        let len = matrix.rows();
        let mut vectors = Vec::with_capacity(len * dim);
        for i in 0..len {
            vectors.extend_from_slice(matrix.row(i));
        }

        let mut nodes = Vec::new();
        let root = if len == 0 {
            0
        } else {
            let mut rng = rand::rng();
            let rows: Vec<u32> = (0..len as u32).collect();
            Self::build_node(&vectors, dim, rows, &mut nodes, &mut rng)
        };

        Self {
            dim,
            len,
            vectors,
            nodes,
            root,
        }
    }

    fn build_node(
        vecs: &[f32],
        dim: usize,
        mut rows: Vec<u32>,
        nodes: &mut Vec<Node>,
        rng: &mut impl Rng,
    ) -> u32 {
        let center = centroid(vecs, dim, &rows);
        let radius = rows
            .iter()
            .map(|&r| l2_distance(&center, row_at(vecs, dim, r)))
            .fold(0.0f32, f32::max);

        if rows.len() <= LEAF_SIZE {
            nodes.push(Node {
                center,
                radius,
                kind: NodeKind::Leaf { rows },
            });
            return (nodes.len() - 1) as u32;
        }

        // Median split on distance to the row farthest from a random seed.
        // Both halves are always non-empty, so recursion terminates even on
        // degenerate (all-identical) data.
        let seed = rows[rng.random_range(0..rows.len())];
        let mut pivot = seed;
        let mut farthest = -1.0f32;
        for &r in &rows {
            let d = l2_distance(row_at(vecs, dim, seed), row_at(vecs, dim, r));
            if d > farthest {
                farthest = d;
                pivot = r;
            }
        }

        rows.sort_by_key(|&r| OrderedFloat(l2_distance(row_at(vecs, dim, pivot), row_at(vecs, dim, r))));
        let right_rows = rows.split_off(rows.len() / 2);

        let left = Self::build_node(vecs, dim, rows, nodes, rng);
        let right = Self::build_node(vecs, dim, right_rows, nodes, rng);
        nodes.push(Node {
            center,
            radius,
            kind: NodeKind::Branch { left, right },
        });
        (nodes.len() - 1) as u32
    }

    /// Search for the `k` nearest rows to `query`.
    ///
    /// `k` is clamped to the tree size; asking for more neighbors than rows
    /// exist is a normal boundary condition, not an error. Results are
    /// `(row, distance)` pairs in ascending distance order, ties broken by
    /// row position.
    #[must_use]
    pub fn nearest(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        if self.len == 0 || k == 0 || query.len() != self.dim {
            return Vec::new();
        }

        let k = k.min(self.len);
        let mut best: BinaryHeap<(OrderedFloat<f32>, u32)> = BinaryHeap::with_capacity(k + 1);
        self.visit(self.root, query, k, &mut best);

        best.into_sorted_vec()
            .into_iter()
            .map(|(d, r)| (r as usize, d.into_inner()))
            .collect()
    }

    fn visit(
        &self,
        idx: u32,
        query: &[f32],
        k: usize,
        best: &mut BinaryHeap<(OrderedFloat<f32>, u32)>,
    ) {
        let node = &self.nodes[idx as usize];

        // A full candidate heap lets us discard any ball whose closest
        // possible point is farther than the current k-th distance.
        if best.len() == k {
            if let Some(&(worst, _)) = best.peek() {
                let bound = l2_distance(query, &node.center) - node.radius;
                if bound > worst.into_inner() {
                    return;
                }
            }
        }

        match &node.kind {
            NodeKind::Leaf { rows } => {
                for &r in rows {
                    let d = OrderedFloat(l2_distance(query, self.row(r as usize)));
                    if best.len() < k {
                        best.push((d, r));
                    } else if best.peek().map(|&(worst, _)| d < worst).unwrap_or(false) {
                        best.pop();
                        best.push((d, r));
                    }
                }
            }
            NodeKind::Branch { left, right } => {
                // Nearer child first tightens the bound sooner
                let dl = l2_distance(query, &self.nodes[*left as usize].center);
                let dr = l2_distance(query, &self.nodes[*right as usize].center);
                if dl <= dr {
                    self.visit(*left, query, k, best);
                    self.visit(*right, query, k, best);
                } else {
                    self.visit(*right, query, k, best);
                    self.visit(*left, query, k, best);
                }
            }
        }
    }

    #[inline]
    fn row(&self, i: usize) -> &[f32] {
        let start = i * self.dim;
        &self.vectors[start..start + self.dim]
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[inline]
fn row_at(vecs: &[f32], dim: usize, r: u32) -> &[f32] {
    let start = r as usize * dim;
    &vecs[start..start + dim]
}

fn centroid(vecs: &[f32], dim: usize, rows: &[u32]) -> Vec<f32> {
    let mut center = vec![0.0f32; dim];
    for &r in rows {
        for (c, x) in center.iter_mut().zip(row_at(vecs, dim, r)) {
            *c += x;
        }
    }
    let inv = 1.0 / rows.len() as f32;
    for c in &mut center {
        *c *= inv;
    }
    center
}
