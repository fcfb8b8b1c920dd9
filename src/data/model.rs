use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Brand – derived once from the product name
// ---------------------------------------------------------------------------

/// Manufacturer label derived from the product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Brand {
    Samsung,
    LG,
    Sony,
    Philips,
    Thomson,
    Unknown,
}

impl Brand {
    /// Substring precedence used by [`Brand::from_name`]. First match wins.
    const PRECEDENCE: [Brand; 5] = [
        Brand::Samsung,
        Brand::LG,
        Brand::Sony,
        Brand::Philips,
        Brand::Thomson,
    ];

    /// Brands offered in the selection checkboxes, in display order.
    pub const SELECTABLE: [Brand; 5] = [
        Brand::Samsung,
        Brand::LG,
        Brand::Philips,
        Brand::Thomson,
        Brand::Sony,
    ];

    /// Case-sensitive substring match against the product name.
    ///
    /// A name carrying several brand tokens resolves to the earliest brand in
    /// the precedence list, e.g. `"Sony LG bundle"` is `LG`.
    pub fn from_name(name: &str) -> Self {
        Self::PRECEDENCE
            .into_iter()
            .find(|b| name.contains(b.label()))
            .unwrap_or(Brand::Unknown)
    }

    pub fn label(self) -> &'static str {
        match self {
            Brand::Samsung => "Samsung",
            Brand::LG => "LG",
            Brand::Sony => "Sony",
            Brand::Philips => "Philips",
            Brand::Thomson => "Thomson",
            Brand::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Highlight – presentation attributes layered on a row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighlightColor {
    Selected,
    #[default]
    Unselected,
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightColor::Selected => f.write_str("selected"),
            HighlightColor::Unselected => f.write_str("unselected"),
        }
    }
}

/// Colour and opacity a row is drawn with in the scatter view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub color: HighlightColor,
    pub opacity: f64,
}

impl Highlight {
    pub const SELECTED: Highlight = Highlight {
        color: HighlightColor::Selected,
        opacity: 0.9,
    };

    /// Rows outside the brand selection while a selection is active.
    pub const DIMMED: Highlight = Highlight {
        color: HighlightColor::Unselected,
        opacity: 0.5,
    };
}

impl Default for Highlight {
    fn default() -> Self {
        Highlight {
            color: HighlightColor::Unselected,
            opacity: 0.9,
        }
    }
}

// ---------------------------------------------------------------------------
// Product – one row of the catalog
// ---------------------------------------------------------------------------

/// A single television (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub diagonal: f64,
    pub hdmi_ports: f64,
    pub usb_ports: f64,
    pub supports_3d: bool,
    pub volume: f64,
    pub pixels: f64,
    pub energy_consumption: f64,
    pub weight: f64,
    pub full_hd: bool,
    pub ultra_hd: bool,
    /// Derived from `name` at load time.
    pub brand: Brand,
    pub highlight: Highlight,
}

impl Product {
    /// Read a single field as a dynamically-typed cell.
    pub fn cell(&self, column: Column) -> CellValue {
        match column {
            Column::Name => CellValue::Text(self.name.clone()),
            Column::Brand => CellValue::Text(self.brand.label().to_string()),
            Column::FullHd => CellValue::Bool(self.full_hd),
            Column::UltraHd => CellValue::Bool(self.ultra_hd),
            Column::HighlightColor => CellValue::Text(self.highlight.color.to_string()),
            Column::Numeric(attr) => CellValue::Number(attr.value(self)),
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute – numeric axes the scatter plot can use
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Price,
    Diagonal,
    HdmiPorts,
    UsbPorts,
    ThreeD,
    Volume,
    Pixels,
    EnergyConsumption,
    Weight,
}

impl Attribute {
    pub const ALL: [Attribute; 9] = [
        Attribute::Price,
        Attribute::Diagonal,
        Attribute::HdmiPorts,
        Attribute::UsbPorts,
        Attribute::ThreeD,
        Attribute::Volume,
        Attribute::Pixels,
        Attribute::EnergyConsumption,
        Attribute::Weight,
    ];

    /// Axis label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Price => "Price",
            Attribute::Diagonal => "Length of the diagonal",
            Attribute::HdmiPorts => "Number of HDMI ports",
            Attribute::UsbPorts => "Number of USB ports",
            Attribute::ThreeD => "3D TV",
            Attribute::Volume => "Volume",
            Attribute::Pixels => "Pixels",
            Attribute::EnergyConsumption => "Energy consumption (kWh/year)",
            Attribute::Weight => "Weight",
        }
    }

    /// Column name in the source table.
    pub fn column_name(self) -> &'static str {
        match self {
            Attribute::Price => "Price",
            Attribute::Diagonal => "diagonal",
            Attribute::HdmiPorts => "hdmi_n",
            Attribute::UsbPorts => "usb_n",
            Attribute::ThreeD => "3D_Tv",
            Attribute::Volume => "volume",
            Attribute::Pixels => "pixels",
            Attribute::EnergyConsumption => "energy_cons",
            Attribute::Weight => "weight",
        }
    }

    /// Numeric value of this attribute for a row. 3D support plots as 0/1.
    pub fn value(self, p: &Product) -> f64 {
        match self {
            Attribute::Price => p.price,
            Attribute::Diagonal => p.diagonal,
            Attribute::HdmiPorts => p.hdmi_ports,
            Attribute::UsbPorts => p.usb_ports,
            Attribute::ThreeD => f64::from(u8::from(p.supports_3d)),
            Attribute::Volume => p.volume,
            Attribute::Pixels => p.pixels,
            Attribute::EnergyConsumption => p.energy_consumption,
            Attribute::Weight => p.weight,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Column – any field, addressable by its source column name
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Brand,
    FullHd,
    UltraHd,
    HighlightColor,
    Numeric(Attribute),
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::Name => "TV_name",
            Column::Brand => "brand",
            Column::FullHd => "Full_HD",
            Column::UltraHd => "Ultra_HD",
            Column::HighlightColor => "color",
            Column::Numeric(attr) => attr.column_name(),
        }
    }

    /// Whether the column holds numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Numeric(_))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a column name matches no known field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumn(pub String);

impl fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column '{}'", self.0)
    }
}

impl std::error::Error for UnknownColumn {}

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fixed = [
            Column::Name,
            Column::Brand,
            Column::FullHd,
            Column::UltraHd,
            Column::HighlightColor,
        ];
        fixed
            .into_iter()
            .chain(Attribute::ALL.into_iter().map(Column::Numeric))
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single dynamically-typed cell
// ---------------------------------------------------------------------------

/// A cell read through [`Product::cell`]. Ordered so it can key a `BTreeMap`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

// -- Manual Eq/Ord: numbers compare with `total_cmp` --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Bool(_) => 0,
                Number(_) => 1,
                Text(_) => 2,
            }
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Bool(b) => b.hash(state),
            CellValue::Number(f) => f.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded product table. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    /// Brands that occur at least once.
    pub brands: BTreeSet<Brand>,
}

impl Catalog {
    pub fn from_products(products: Vec<Product>) -> Self {
        let brands = products.iter().map(|p| p.brand).collect();
        Catalog { products, brands }
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::product;

    #[test]
    fn brand_first_match_wins() {
        assert_eq!(Brand::from_name("Samsung UE55"), Brand::Samsung);
        assert_eq!(Brand::from_name("Sony KD-49 LG panel"), Brand::LG);
        assert_eq!(Brand::from_name("Thomson 32HD"), Brand::Thomson);
        assert_eq!(Brand::from_name("Grundig 40"), Brand::Unknown);
    }

    #[test]
    fn brand_match_is_case_sensitive() {
        assert_eq!(Brand::from_name("samsung lowercase"), Brand::Unknown);
    }

    #[test]
    fn column_round_trips_through_name() {
        for attr in Attribute::ALL {
            let col: Column = attr.column_name().parse().unwrap();
            assert_eq!(col, Column::Numeric(attr));
        }
        assert_eq!("brand".parse::<Column>().unwrap(), Column::Brand);
        assert!("Unnamed: 0".parse::<Column>().is_err());
    }

    #[test]
    fn cell_values_order_numbers_totally() {
        let mut cells = vec![
            CellValue::Number(3.0),
            CellValue::Number(f64::NAN),
            CellValue::Number(-1.0),
        ];
        cells.sort();
        assert_eq!(cells[0], CellValue::Number(-1.0));
        assert_eq!(cells[1], CellValue::Number(3.0));
    }

    #[test]
    fn catalog_collects_brands() {
        let mut p = product("Samsung A", 1.0);
        let catalog = Catalog::from_products(vec![p.clone(), product("Philips B", 2.0)]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.brands.contains(&Brand::Samsung));
        assert!(catalog.brands.contains(&Brand::Philips));
        p.supports_3d = true;
        assert_eq!(Attribute::ThreeD.value(&p), 1.0);
    }
}
