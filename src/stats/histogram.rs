/// Equal-width histogram. `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `(left, right, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(e, &c)| (e[0], e[1], c))
    }
}

/// Bin count heuristic for the price histogram: one bin per eight rows,
/// never fewer than one. `0..=15` rows give 1 bin, `16..=23` give 2, …
pub fn bin_count(rows: usize) -> usize {
    (rows / 8).max(1)
}

/// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
///
/// * every bin is half-open `[left, right)` except the last, which is closed
/// * all values equal → range `[v − 0.5, v + 0.5]`
/// * no values → range `[0, 1]`, all counts zero
/// * `bins == 0` is treated as 1
///
/// Non-finite values are skipped.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let finite = values.iter().copied().filter(|v| v.is_finite());

    let (lo, hi) = match finite
        .clone()
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        }) {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some(range) => range,
    };

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();

    // Bin against the returned edges so every count sits inside its own bin.
    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = edges.partition_point(|&e| e <= v).saturating_sub(1);
        counts[idx.min(bins - 1)] += 1;
    }

    Histogram { edges, counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_count_heuristic() {
        assert_eq!(bin_count(0), 1);
        assert_eq!(bin_count(7), 1);
        assert_eq!(bin_count(15), 1);
        assert_eq!(bin_count(16), 2);
        assert_eq!(bin_count(80), 10);
    }

    #[test]
    fn max_lands_in_last_bin() {
        let h = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(h.edges, vec![0.0, 2.0, 4.0]);
        assert_eq!(h.counts, vec![2, 3]);
    }

    #[test]
    fn constant_values_get_unit_range() {
        let h = histogram(&[5.0, 5.0, 5.0], 1);
        assert_eq!(h.edges, vec![4.5, 5.5]);
        assert_eq!(h.counts, vec![3]);
    }

    #[test]
    fn empty_input_has_zero_counts() {
        let h = histogram(&[], bin_count(0));
        assert_eq!(h.edges, vec![0.0, 1.0]);
        assert_eq!(h.counts, vec![0]);
        assert_eq!(h.bins().count(), 1);
    }

    #[test]
    fn values_fall_inside_their_bin_edges() {
        let values = [0.0, 0.3, 1.0];
        let h = histogram(&values, 10);
        // lo + 3 × 0.1 rounds to just above 0.3
        assert!(h.edges[3] > 0.3);
        assert_eq!(h.counts[2], 1);
        assert_eq!(h.counts[3], 0);
        assert_eq!(h.counts[0], 1);
        assert_eq!(h.counts[9], 1);

        for (i, (left, right, count)) in h.bins().enumerate() {
            let inside = values
                .iter()
                .filter(|&&v| left <= v && (v < right || (i == 9 && v == right)))
                .count();
            assert_eq!(inside, count, "bin {i} [{left}, {right})");
        }
    }

    #[test]
    fn counts_sum_to_input_len() {
        let values: Vec<f64> = (0..100).map(|i| (i * 37 % 101) as f64 * 12.5).collect();
        let h = histogram(&values, bin_count(values.len()));
        assert_eq!(h.counts.len(), 12);
        assert_eq!(h.counts.iter().sum::<usize>(), 100);
    }
}
