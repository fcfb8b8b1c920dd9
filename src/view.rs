use crate::data::model::{Attribute, Column, HighlightColor, Product};
use crate::stats::{bin_count, group_statistics, histogram, BoxPlotData, Histogram, StatsError};

// ---------------------------------------------------------------------------
// View snapshot: everything the three plots draw
// ---------------------------------------------------------------------------

/// One marker of the scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color: HighlightColor,
    pub opacity: f64,
    /// Tooltip fields.
    pub name: String,
    pub price: f64,
}

/// Immutable result of one recomputation. Replaced wholesale on every
/// control change, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub row_count: usize,
    pub x_axis: Attribute,
    pub y_axis: Attribute,
    pub scatter: Vec<ScatterPoint>,
    /// Price histogram with [`bin_count`] bins.
    pub histogram: Histogram,
    /// Price by brand.
    pub box_plot: BoxPlotData,
}

impl ViewSnapshot {
    pub fn title(&self) -> String {
        format!("{} TVs selected", self.row_count)
    }
}

/// Project a filtered subset into the scatter, histogram and box-plot views.
pub fn project(
    rows: &[Product],
    x_axis: Attribute,
    y_axis: Attribute,
) -> Result<ViewSnapshot, StatsError> {
    let scatter = rows
        .iter()
        .map(|p| ScatterPoint {
            x: x_axis.value(p),
            y: y_axis.value(p),
            color: p.highlight.color,
            opacity: p.highlight.opacity,
            name: p.name.clone(),
            price: p.price,
        })
        .collect();

    let prices: Vec<f64> = rows.iter().map(|p| p.price).collect();
    let histogram = histogram(&prices, bin_count(rows.len()));

    let box_plot = group_statistics(rows, Column::Numeric(Attribute::Price), Column::Brand)?;

    Ok(ViewSnapshot {
        row_count: rows.len(),
        x_axis,
        y_axis,
        scatter,
        histogram,
        box_plot,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::{filter, FilterCriteria};
    use crate::data::fixtures::product;
    use crate::data::model::Brand;

    #[test]
    fn scatter_follows_selected_axes() {
        let mut p = product("Samsung UE", 450.0);
        p.diagonal = 108.0;
        let snap = project(&[p], Attribute::Diagonal, Attribute::Price).unwrap();
        assert_eq!(snap.scatter[0].x, 108.0);
        assert_eq!(snap.scatter[0].y, 450.0);
        assert_eq!(snap.scatter[0].name, "Samsung UE");

        let swapped = project(
            &[product("LG", 10.0)],
            Attribute::Price,
            Attribute::HdmiPorts,
        )
        .unwrap();
        assert_eq!(swapped.scatter[0].x, 10.0);
        assert_eq!(swapped.scatter[0].y, 2.0);
    }

    #[test]
    fn empty_subset_projects_cleanly() {
        let snap = project(&[], Attribute::Diagonal, Attribute::Price).unwrap();
        assert_eq!(snap.title(), "0 TVs selected");
        assert!(snap.scatter.is_empty());
        assert_eq!(snap.histogram.counts, vec![0]);
        assert!(snap.box_plot.groups.is_empty());
    }

    #[test]
    fn scatter_carries_highlight() {
        let rows = vec![product("Samsung A", 100.0), product("LG B", 200.0)];
        let criteria = FilterCriteria {
            selected_brands: BTreeSet::from([Brand::Samsung]),
            ..FilterCriteria::default()
        };
        let snap = project(&filter(&rows, &criteria), Attribute::Diagonal, Attribute::Price).unwrap();
        assert_eq!(snap.scatter[0].color, HighlightColor::Selected);
        assert_eq!(snap.scatter[0].opacity, 0.9);
        assert_eq!(snap.scatter[1].color, HighlightColor::Unselected);
        assert_eq!(snap.scatter[1].opacity, 0.5);
    }

    #[test]
    fn histogram_uses_row_count_heuristic() {
        let rows: Vec<Product> = (0..24).map(|i| product("Sony", f64::from(i) * 10.0)).collect();
        let snap = project(&rows, Attribute::Diagonal, Attribute::Price).unwrap();
        assert_eq!(snap.histogram.counts.len(), 3);
        assert_eq!(snap.histogram.counts.iter().sum::<usize>(), 24);
    }
}
