use std::collections::BTreeMap;

use thiserror::Error;

use super::quantile::quantile_sorted;
use crate::data::model::{CellValue, Column, Product, UnknownColumn};

/// Errors raised when the requested fields cannot be summarised.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error(transparent)]
    UnknownColumn(#[from] UnknownColumn),
    #[error("column '{0}' is not numeric")]
    NonNumericColumn(Column),
    #[error("column '{column}' has no usable value at row {row}")]
    MissingValue { column: Column, row: usize },
}

/// Box-plot summary of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStatistics {
    pub group: CellValue,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
    pub iqr: f64,
    /// `q3 + 1.5 × iqr`
    pub upper_fence: f64,
    /// `q1 − 1.5 × iqr`
    pub lower_fence: f64,
    /// `min(max, upper_fence)` – drawn whisker end.
    pub whisker_high: f64,
    /// `max(min, lower_fence)` – drawn whisker end.
    pub whisker_low: f64,
}

impl GroupStatistics {
    /// Summarise a non-empty, sorted slice. `None` for an empty slice.
    fn from_sorted(group: CellValue, sorted: &[f64]) -> Option<Self> {
        let min = quantile_sorted(sorted, 0.0)?;
        let max = quantile_sorted(sorted, 1.0)?;
        let q1 = quantile_sorted(sorted, 0.25)?;
        let q2 = quantile_sorted(sorted, 0.5)?;
        let q3 = quantile_sorted(sorted, 0.75)?;
        let iqr = q3 - q1;
        let upper_fence = q3 + 1.5 * iqr;
        let lower_fence = q1 - 1.5 * iqr;

        Some(GroupStatistics {
            group,
            count: sorted.len(),
            min,
            max,
            q1,
            q2,
            q3,
            iqr,
            upper_fence,
            lower_fence,
            whisker_high: max.min(upper_fence),
            whisker_low: min.max(lower_fence),
        })
    }

    /// Strictly outside `[lower_fence, upper_fence]`. A value equal to a
    /// fence is not an outlier.
    pub fn is_outlier(&self, value: f64) -> bool {
        value > self.upper_fence || value < self.lower_fence
    }
}

/// A single value lying outside its group's fences.
#[derive(Debug, Clone, PartialEq)]
pub struct Outlier {
    pub group: CellValue,
    pub value: f64,
}

/// Everything the box-plot view needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxPlotData {
    /// One record per group present in the input, ordered by group key.
    pub groups: Vec<GroupStatistics>,
    /// Grouped like `groups`; row order within a group.
    pub outliers: Vec<Outlier>,
}

/// Summarise `value` per distinct `group` over `rows`.
///
/// Groups are keyed by exact [`CellValue`] equality and emitted in the
/// key's total order (lexicographic for text). Groups without rows do not
/// appear. Outliers are found by re-scanning each group's raw values
/// against its fences, not the clamped whiskers.
///
/// Fails if `value` is not a numeric column, or if any value or numeric
/// group key is not finite; nothing is coerced.
pub fn group_statistics(
    rows: &[Product],
    value: Column,
    group: Column,
) -> Result<BoxPlotData, StatsError> {
    if !value.is_numeric() {
        return Err(StatsError::NonNumericColumn(value));
    }

    let mut grouped: BTreeMap<CellValue, Vec<f64>> = BTreeMap::new();
    for (row, p) in rows.iter().enumerate() {
        let v = p
            .cell(value)
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or(StatsError::MissingValue { column: value, row })?;
        let key = match p.cell(group) {
            CellValue::Number(k) if !k.is_finite() => {
                return Err(StatsError::MissingValue { column: group, row });
            }
            key => key,
        };
        grouped.entry(key).or_default().push(v);
    }

    let mut data = BoxPlotData::default();
    for (key, raw) in grouped {
        let mut sorted = raw.clone();
        sorted.sort_by(f64::total_cmp);
        let Some(stats) = GroupStatistics::from_sorted(key, &sorted) else {
            continue;
        };

        data.outliers.extend(
            raw.into_iter()
                .filter(|&v| stats.is_outlier(v))
                .map(|v| Outlier {
                    group: stats.group.clone(),
                    value: v,
                }),
        );
        data.groups.push(stats);
    }

    log::debug!(
        "box plot of {value} by {group}: {} groups, {} outliers",
        data.groups.len(),
        data.outliers.len()
    );
    Ok(data)
}

/// [`group_statistics`] addressed by source column names, e.g.
/// `("Price", "brand")`.
pub fn group_statistics_by_name(
    rows: &[Product],
    value: &str,
    group: &str,
) -> Result<BoxPlotData, StatsError> {
    let value: Column = value.parse()?;
    let group: Column = group.parse()?;
    group_statistics(rows, value, group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::product;
    use crate::data::model::Attribute;

    const PRICE: Column = Column::Numeric(Attribute::Price);

    fn brand(label: &str) -> CellValue {
        CellValue::Text(label.to_string())
    }

    #[test]
    fn four_value_group_flags_high_outlier() {
        let rows: Vec<Product> = [100.0, 200.0, 300.0, 1000.0]
            .into_iter()
            .map(|price| product("Samsung", price))
            .collect();

        let data = group_statistics(&rows, PRICE, Column::Brand).unwrap();
        assert_eq!(data.groups.len(), 1);
        let g = &data.groups[0];
        assert_eq!(g.group, brand("Samsung"));
        assert_eq!(g.q1, 175.0);
        assert_eq!(g.q2, 250.0);
        assert_eq!(g.q3, 475.0);
        assert_eq!(g.iqr, 300.0);
        assert_eq!(g.upper_fence, 925.0);
        assert_eq!(g.lower_fence, -275.0);
        assert_eq!(g.whisker_high, 925.0);
        assert_eq!(g.whisker_low, 100.0);
        assert_eq!(
            data.outliers,
            vec![Outlier {
                group: brand("Samsung"),
                value: 1000.0
            }]
        );
    }

    #[test]
    fn single_member_group_collapses() {
        let rows = vec![product("Sony KD", 499.0)];
        let data = group_statistics(&rows, PRICE, Column::Brand).unwrap();
        let g = &data.groups[0];
        for v in [g.min, g.max, g.q1, g.q2, g.q3, g.upper_fence, g.lower_fence] {
            assert_eq!(v, 499.0);
        }
        assert_eq!(g.iqr, 0.0);
        assert!(!g.is_outlier(499.0));
        assert!(data.outliers.is_empty());
    }

    #[test]
    fn value_on_fence_is_not_an_outlier() {
        // q1 = 1, q3 = 3, iqr = 2 → fences -2 and 6
        let rows: Vec<Product> = [1.0, 1.0, 3.0, 3.0, 6.0]
            .into_iter()
            .map(|price| product("LG", price))
            .collect();
        let data = group_statistics(&rows, PRICE, Column::Brand).unwrap();
        let g = &data.groups[0];
        assert_eq!(g.upper_fence, 6.0);
        assert!(!g.is_outlier(6.0));
        assert!(g.is_outlier(6.0 + 1e-9));
        assert!(data.outliers.is_empty());
        assert_eq!(g.whisker_high, 6.0);
    }

    #[test]
    fn groups_are_ordered_by_key() {
        let rows = vec![
            product("Sony A", 10.0),
            product("LG B", 20.0),
            product("Samsung C", 30.0),
            product("LG D", 40.0),
        ];
        let data = group_statistics(&rows, PRICE, Column::Brand).unwrap();
        let keys: Vec<String> = data.groups.iter().map(|g| g.group.to_string()).collect();
        assert_eq!(keys, ["LG", "Samsung", "Sony"]);
        assert_eq!(data.groups[0].count, 2);
    }

    #[test]
    fn empty_rows_give_empty_output() {
        let data = group_statistics(&[], PRICE, Column::Brand).unwrap();
        assert!(data.groups.is_empty());
        assert!(data.outliers.is_empty());
    }

    #[test]
    fn text_value_column_is_rejected() {
        let rows = vec![product("LG", 1.0)];
        assert_eq!(
            group_statistics(&rows, Column::Name, Column::Brand),
            Err(StatsError::NonNumericColumn(Column::Name))
        );
    }

    #[test]
    fn nan_value_is_reported_not_coerced() {
        let rows = vec![product("LG", 1.0), product("LG", f64::NAN)];
        assert_eq!(
            group_statistics(&rows, PRICE, Column::Brand),
            Err(StatsError::MissingValue { column: PRICE, row: 1 })
        );
    }

    #[test]
    fn nan_group_key_is_reported_not_grouped() {
        let mut a = product("LG", 10.0);
        a.diagonal = f64::NAN;
        let b = product("LG", 20.0);
        let diag = Column::Numeric(Attribute::Diagonal);
        assert_eq!(
            group_statistics(&[b, a], PRICE, diag),
            Err(StatsError::MissingValue { column: diag, row: 1 })
        );
    }

    #[test]
    fn lookup_by_column_name() {
        let rows = vec![product("Philips", 10.0), product("Philips", 30.0)];
        let data = group_statistics_by_name(&rows, "Price", "brand").unwrap();
        assert_eq!(data.groups[0].q2, 20.0);

        let err = group_statistics_by_name(&rows, "cost", "brand").unwrap_err();
        assert_eq!(err.to_string(), "unknown column 'cost'");
    }

    #[test]
    fn numeric_group_keys_are_allowed() {
        let mut a = product("LG", 10.0);
        a.hdmi_ports = 4.0;
        let b = product("LG", 20.0);
        let hdmi = Column::Numeric(Attribute::HdmiPorts);
        let data = group_statistics(&[a, b], PRICE, hdmi).unwrap();
        let keys: Vec<CellValue> = data.groups.iter().map(|g| g.group.clone()).collect();
        assert_eq!(keys, [CellValue::Number(2.0), CellValue::Number(4.0)]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::data::fixtures::product;
    use crate::data::model::Attribute;
    use proptest::prelude::*;

    const PRICE: Column = Column::Numeric(Attribute::Price);

    fn rows() -> impl Strategy<Value = Vec<Product>> {
        proptest::collection::vec(
            (0usize..3, -1e6..1e6f64).prop_map(|(b, price)| {
                product(["Samsung", "LG", "Sony"][b], price)
            }),
            1..60,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn quartiles_are_ordered_and_fences_enclose_box(rows in rows()) {
            let data = group_statistics(&rows, PRICE, Column::Brand).unwrap();
            for g in &data.groups {
                prop_assert!(g.min <= g.q1);
                prop_assert!(g.q1 <= g.q2 && g.q2 <= g.q3);
                prop_assert!(g.q3 <= g.max);
                prop_assert!(g.iqr >= 0.0);
                prop_assert!(g.lower_fence <= g.q1);
                prop_assert!(g.upper_fence >= g.q3);
                prop_assert!(g.whisker_low <= g.whisker_high);
            }
        }

        #[test]
        fn outliers_lie_strictly_outside_fences(rows in rows()) {
            let data = group_statistics(&rows, PRICE, Column::Brand).unwrap();
            for o in &data.outliers {
                let g = data.groups.iter().find(|g| g.group == o.group).unwrap();
                prop_assert!(o.value > g.upper_fence || o.value < g.lower_fence);
            }
            let total: usize = data.groups.iter().map(|g| g.count).sum();
            prop_assert_eq!(total, rows.len());
        }
    }
}
