//! Television catalog explorer.
//!
//! The core is rendering-agnostic: [`data`] loads and filters the catalog,
//! [`stats`] computes box-plot and histogram summaries, [`view`] projects a
//! filtered subset into plot-ready snapshots, and [`state`] ties them
//! together behind a one-way recompute loop. The egui shell lives in the
//! binary.

pub mod data;
pub mod state;
pub mod stats;
pub mod view;
