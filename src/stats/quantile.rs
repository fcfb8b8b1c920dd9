/// Computes the `q`-th quantile on **pre-sorted** data (type 7, linear
/// interpolation).
///
/// For sorted data `x[0..n]`:
/// 1. `h = (n − 1) × q`
/// 2. `j = ⌊h⌋`, `g = h − j`
/// 3. result `= x[j] + g × (x[j+1] − x[j])`, clamped to `[x[j], x[j+1]]`
///
/// The clamp keeps successive quantiles ordered under rounding.
///
/// With `n == 1` every quantile is the single value. With `n == 2` the
/// quartiles sit a quarter of the way between the two values.
///
/// Returns `None` if `sorted` is empty, `q` is outside `[0, 1]`, or the
/// bracketing pair is out of order (the caller must pass sorted, NaN-free
/// data).
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&q) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * q;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        Some(sorted[n - 1])
    } else {
        let (lo, hi) = (sorted[j], sorted[j + 1]);
        if !(lo <= hi) {
            // unsorted or NaN
            return None;
        }
        Some((lo + g * (hi - lo)).clamp(lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremes_are_min_and_max() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&data, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&data, 1.0), Some(5.0));
        assert_eq!(quantile_sorted(&data, 0.5), Some(3.0));
    }

    #[test]
    fn interpolates_between_order_statistics() {
        let data = [100.0, 200.0, 300.0, 1000.0];
        assert_eq!(quantile_sorted(&data, 0.25), Some(175.0));
        assert_eq!(quantile_sorted(&data, 0.5), Some(250.0));
        assert_eq!(quantile_sorted(&data, 0.75), Some(475.0));
    }

    #[test]
    fn two_values() {
        let data = [10.0, 20.0];
        assert_eq!(quantile_sorted(&data, 0.25), Some(12.5));
        assert_eq!(quantile_sorted(&data, 0.75), Some(17.5));
    }

    #[test]
    fn single_value_and_empty() {
        assert_eq!(quantile_sorted(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&[1.0], 1.5), None);
    }
}
