//! Statistics engine: quantiles, box-plot summaries, price histograms.

pub mod boxplot;
pub mod histogram;
pub mod quantile;

pub use boxplot::{
    group_statistics, group_statistics_by_name, BoxPlotData, GroupStatistics, Outlier, StatsError,
};
pub use histogram::{bin_count, histogram, Histogram};
pub use quantile::quantile_sorted;
