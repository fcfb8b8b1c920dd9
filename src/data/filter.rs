use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::model::{Brand, Highlight, Product};

// ---------------------------------------------------------------------------
// HD type selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HdType {
    UltraHd4K,
    FullHd,
    #[default]
    All,
}

impl HdType {
    pub const ALL: [HdType; 3] = [HdType::All, HdType::FullHd, HdType::UltraHd4K];

    pub fn label(self) -> &'static str {
        match self {
            HdType::UltraHd4K => "Ultra HD (4K)",
            HdType::FullHd => "Full HD",
            HdType::All => "All",
        }
    }
}

impl fmt::Display for HdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HdType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HdType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| format!("unknown HD type '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Filter criteria: a snapshot of every control value
// ---------------------------------------------------------------------------

/// All numeric bounds are inclusive. Inverted bounds are evaluated literally.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub min_price: f64,
    pub max_price: f64,
    pub diag_min: f64,
    pub hdmi_min: f64,
    pub usb_min: f64,
    pub vol_min: f64,
    pub pix_min: f64,
    pub energy_max: f64,
    pub weight_max: f64,
    pub hd_type: HdType,
    pub require_3d: bool,
    /// Brands to highlight. Never removes rows.
    pub selected_brands: BTreeSet<Brand>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: 3_000_000.0,
            diag_min: 0.0,
            hdmi_min: 0.0,
            usb_min: 0.0,
            vol_min: 0.0,
            pix_min: 0.0,
            energy_max: 420.0,
            weight_max: 100.0,
            hd_type: HdType::All,
            require_3d: false,
            selected_brands: BTreeSet::new(),
        }
    }
}

/// Whether a row passes every clause of the criteria.
pub fn matches(p: &Product, c: &FilterCriteria) -> bool {
    let hd_ok = match c.hd_type {
        HdType::FullHd => p.full_hd,
        HdType::UltraHd4K => p.ultra_hd,
        HdType::All => true,
    };

    p.price >= c.min_price
        && p.price <= c.max_price
        && p.diagonal >= c.diag_min
        && p.hdmi_ports >= c.hdmi_min
        && p.usb_ports >= c.usb_min
        && p.volume >= c.vol_min
        && p.pixels >= c.pix_min
        && p.energy_consumption <= c.energy_max
        && p.weight <= c.weight_max
        && hd_ok
        && (!c.require_3d || p.supports_3d)
}

/// Recolour rows against the brand selection. Row count and every
/// non-highlight field are preserved.
///
/// * empty selection → every row gets the default highlight
/// * otherwise → selected brands are [`Highlight::SELECTED`], the rest
///   [`Highlight::DIMMED`]
pub fn apply_highlight(mut rows: Vec<Product>, selected: &BTreeSet<Brand>) -> Vec<Product> {
    for row in &mut rows {
        row.highlight = if selected.is_empty() {
            Highlight::default()
        } else if selected.contains(&row.brand) {
            Highlight::SELECTED
        } else {
            Highlight::DIMMED
        };
    }
    rows
}

/// Return the rows passing `criteria`, highlighted against its brand
/// selection. Pure: the same inputs always yield the same subset, and
/// filtering the result again changes nothing.
pub fn filter(rows: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let kept: Vec<Product> = rows
        .iter()
        .filter(|p| matches(p, criteria))
        .cloned()
        .collect();
    apply_highlight(kept, &criteria.selected_brands)
}
