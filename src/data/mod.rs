//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Catalog (brand + default highlight per row)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Catalog   │  Vec<Product>, brands present
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  apply FilterCriteria → highlighted subset
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod filter;

#[cfg(test)]
pub(crate) mod fixtures {
    use super::model::{Brand, Highlight, Product};

    /// A product with neutral attributes that passes the default criteria.
    pub(crate) fn product(name: &str, price: f64) -> Product {
        Product {
            name: name.to_string(),
            price,
            diagonal: 100.0,
            hdmi_ports: 2.0,
            usb_ports: 1.0,
            supports_3d: false,
            volume: 20.0,
            pixels: 2_073_600.0,
            energy_consumption: 100.0,
            weight: 10.0,
            full_hd: true,
            ultra_hd: false,
            brand: Brand::from_name(name),
            highlight: Highlight::default(),
        }
    }
}
