use crate::data::filter::{filter, FilterCriteria};
use crate::data::model::{Attribute, Brand, Catalog};
use crate::view::{project, ViewSnapshot};

// ---------------------------------------------------------------------------
// Controls: every user-editable input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub criteria: FilterCriteria,
    pub x_axis: Attribute,
    pub y_axis: Attribute,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            x_axis: Attribute::Diagonal,
            y_axis: Attribute::Price,
        }
    }
}

impl Controls {
    /// Toggle a brand in the highlight selection.
    pub fn toggle_brand(&mut self, brand: Brand) {
        let selected = &mut self.criteria.selected_brands;
        if !selected.remove(&brand) {
            selected.insert(brand);
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// Data flows one way: controls change → [`DashboardState::recompute`] runs
/// filter, statistics and projection synchronously → a fresh
/// [`ViewSnapshot`] replaces the previous one.
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Loaded catalog (None until a file is loaded).
    pub catalog: Option<Catalog>,

    pub controls: Controls,

    /// Result of the last recomputation.
    pub snapshot: Option<ViewSnapshot>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn new(catalog: Catalog) -> Self {
        let mut state = Self::default();
        state.set_catalog(catalog);
        state
    }

    /// Ingest a newly loaded catalog. Controls are kept.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = Some(catalog);
        self.status_message = None;
        self.recompute();
    }

    /// Replace the controls and recompute if anything changed.
    pub fn apply_controls(&mut self, controls: Controls) {
        if controls != self.controls {
            self.controls = controls;
            self.recompute();
        }
    }

    /// Rebuild the snapshot from the catalog and current controls.
    pub fn recompute(&mut self) {
        let Some(catalog) = &self.catalog else {
            self.snapshot = None;
            return;
        };

        let rows = filter(&catalog.products, &self.controls.criteria);
        match project(&rows, self.controls.x_axis, self.controls.y_axis) {
            Ok(snapshot) => {
                log::debug!("{} of {} TVs selected", snapshot.row_count, catalog.len());
                self.snapshot = Some(snapshot);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to summarise selection: {e}");
                self.snapshot = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::product;

    fn state() -> DashboardState {
        DashboardState::new(Catalog::from_products(vec![
            product("Samsung A", 100.0),
            product("LG B", 200.0),
            product("Sony C", 300.0),
        ]))
    }

    #[test]
    fn initial_snapshot_covers_catalog() {
        let s = state();
        let snap = s.snapshot.as_ref().unwrap();
        assert_eq!(snap.row_count, 3);
        assert_eq!(snap.x_axis, Attribute::Diagonal);
        assert_eq!(snap.y_axis, Attribute::Price);
    }

    #[test]
    fn applying_controls_replaces_snapshot() {
        let mut s = state();
        let mut controls = s.controls.clone();
        controls.criteria.max_price = 150.0;
        controls.x_axis = Attribute::Weight;
        s.apply_controls(controls);

        let snap = s.snapshot.as_ref().unwrap();
        assert_eq!(snap.row_count, 1);
        assert_eq!(snap.x_axis, Attribute::Weight);
        assert_eq!(snap.scatter[0].x, 10.0);
    }

    #[test]
    fn toggle_brand_adds_then_removes() {
        let mut c = Controls::default();
        c.toggle_brand(Brand::LG);
        assert!(c.criteria.selected_brands.contains(&Brand::LG));
        c.toggle_brand(Brand::LG);
        assert!(c.criteria.selected_brands.is_empty());
    }

    #[test]
    fn nan_price_is_filtered_before_statistics() {
        let mut s = DashboardState::new(Catalog::from_products(vec![
            product("LG", f64::NAN),
            product("LG", 10.0),
        ]));
        s.controls.criteria.min_price = f64::NEG_INFINITY;
        s.controls.criteria.max_price = f64::INFINITY;
        s.recompute();
        assert_eq!(s.snapshot.as_ref().unwrap().row_count, 1);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn no_catalog_no_snapshot() {
        let mut s = DashboardState::default();
        s.recompute();
        assert!(s.snapshot.is_none());
    }
}
