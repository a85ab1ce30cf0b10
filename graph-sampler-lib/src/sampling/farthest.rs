use crate::multigraph::NodeId;
use crate::sampling::sketch::DistanceSketch;

/// Greedy farthest-point sampling over the landmark coordinate space.
///
/// The first pick is the row with the maximum distance in the first landmark
/// column, which steers away from central nodes. Every following pick is the
/// row maximizing the minimum L1 distance to the already selected set,
/// maintained as a running elementwise minimum. Ties always resolve to the
/// lowest row index. Returned ids are distinct and in selection order.
///
/// Cost is `O(k * N * L)` after the sketch, against `O(N^2)` for exact
/// pairwise distances.
pub fn select_farthest(sketch: &DistanceSketch, k: usize) -> Vec<NodeId> {
    let n = sketch.node_count();
    if k == 0 || sketch.is_empty() {
        return Vec::new();
    }
    let k = k.min(n);

    let mut selected = Vec::with_capacity(k);
    let mut taken = vec![false; n];

    let first = argmax_u32(sketch.column(0), &taken);
    selected.push(first);
    taken[first] = true;

    let mut min_dists: Vec<u64> = (0..n).map(|row| sketch.l1_distance(row, first)).collect();

    for _ in 1..k {
        let farthest = argmax_u64(&min_dists, &taken);
        selected.push(farthest);
        taken[farthest] = true;

        for (row, current) in min_dists.iter_mut().enumerate() {
            let to_new = sketch.l1_distance(row, farthest);
            if to_new < *current {
                *current = to_new;
            }
        }
    }

    selected.into_iter().map(|row| sketch.node_id(row)).collect()
}

// First occurrence of the maximum among rows not yet taken. The taken mask
// keeps the selection distinct even when every remaining minimum is zero
// (identical landmark vectors, e.g. multiple isolated nodes).
fn argmax_u32(values: &[u32], taken: &[bool]) -> usize {
    argmax_by(values.iter().map(|&v| u64::from(v)), taken)
}

fn argmax_u64(values: &[u64], taken: &[bool]) -> usize {
    argmax_by(values.iter().copied(), taken)
}

fn argmax_by<I: Iterator<Item = u64>>(values: I, taken: &[bool]) -> usize {
    let mut best_row = usize::MAX;
    let mut best = 0u64;
    for (row, value) in values.enumerate() {
        if taken[row] {
            continue;
        }
        if best_row == usize::MAX || value > best {
            best_row = row;
            best = value;
        }
    }
    debug_assert!(best_row != usize::MAX, "no unselected row left");
    best_row
}
