use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Deserializer};

use super::model::{Brand, Catalog, Highlight, Product};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a product catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – one row per TV, header with the source column names
/// * `.json`    – `[{ "TV_name": "...", "Price": 499.0, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Columns not listed in [`ProductRecord`] are ignored.
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let catalog = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading catalog from {}", path.display()))?;

    log::info!(
        "Loaded {} TVs ({} brands) from {}",
        catalog.len(),
        catalog.brands.len(),
        path.display()
    );
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// Row schema shared by the CSV and JSON readers
// ---------------------------------------------------------------------------

/// One source row as it appears on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "TV_name")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: f64,
    pub diagonal: f64,
    #[serde(rename = "hdmi_n")]
    pub hdmi_ports: f64,
    #[serde(rename = "usb_n")]
    pub usb_ports: f64,
    #[serde(rename = "3D_Tv", deserialize_with = "flag")]
    pub supports_3d: bool,
    pub volume: f64,
    pub pixels: f64,
    #[serde(rename = "energy_cons")]
    pub energy_consumption: f64,
    pub weight: f64,
    #[serde(rename = "Full_HD", deserialize_with = "flag")]
    pub full_hd: bool,
    #[serde(rename = "Ultra_HD", deserialize_with = "flag")]
    pub ultra_hd: bool,
}

impl ProductRecord {
    fn numeric_fields(&self) -> [(&'static str, f64); 8] {
        [
            ("Price", self.price),
            ("diagonal", self.diagonal),
            ("hdmi_n", self.hdmi_ports),
            ("usb_n", self.usb_ports),
            ("volume", self.volume),
            ("pixels", self.pixels),
            ("energy_cons", self.energy_consumption),
            ("weight", self.weight),
        ]
    }
}

/// Rejects `NaN` / `inf` cells; they parse as numbers but are not usable data.
impl TryFrom<ProductRecord> for Product {
    type Error = anyhow::Error;

    fn try_from(r: ProductRecord) -> Result<Self> {
        if let Some((column, v)) = r.numeric_fields().into_iter().find(|(_, v)| !v.is_finite()) {
            bail!("column '{column}' holds non-finite value {v}");
        }
        Ok(Product {
            brand: Brand::from_name(&r.name),
            highlight: Highlight::default(),
            name: r.name,
            price: r.price,
            diagonal: r.diagonal,
            hdmi_ports: r.hdmi_ports,
            usb_ports: r.usb_ports,
            supports_3d: r.supports_3d,
            volume: r.volume,
            pixels: r.pixels,
            energy_consumption: r.energy_consumption,
            weight: r.weight,
            full_hd: r.full_hd,
            ultra_hd: r.ultra_hd,
        })
    }
}

/// Accepts `0/1`, `0.0/1.0`, `true/false` (bare or quoted).
fn flag<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Repr::deserialize(de)? {
        Repr::Bool(b) => Ok(b),
        Repr::Int(i) => int_flag(i).map_err(serde::de::Error::custom),
        Repr::Float(f) if f == 0.0 || f == 1.0 => Ok(f == 1.0),
        Repr::Float(f) => Err(serde::de::Error::custom(format!("{f} is not a 0/1 flag"))),
        Repr::Text(s) => parse_flag(&s).map_err(serde::de::Error::custom),
    }
}

fn int_flag(i: i64) -> std::result::Result<bool, String> {
    match i {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(format!("{other} is not a 0/1 flag")),
    }
}

fn parse_flag(s: &str) -> std::result::Result<bool, String> {
    match s.trim() {
        "1" | "1.0" | "true" | "True" => Ok(true),
        "0" | "0.0" | "false" | "False" => Ok(false),
        other => Err(format!("'{other}' is not a 0/1 flag")),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Catalog> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

/// Shared by the file loader and tests reading from memory.
pub fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Catalog> {
    let mut products = Vec::new();
    for (row_no, result) in reader.deserialize::<ProductRecord>().enumerate() {
        let product = result
            .map_err(anyhow::Error::from)
            .and_then(Product::try_from)
            .with_context(|| format!("CSV row {row_no}"))?;
        products.push(product);
    }
    Ok(Catalog::from_products(products))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "TV_name": "Samsung UE40", "Price": 399.0, "diagonal": 101.6, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(&text).context("Expected top-level JSON array")?;

    let products = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value::<ProductRecord>(row)
                .map_err(anyhow::Error::from)
                .and_then(Product::try_from)
                .with_context(|| format!("JSON row {i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Catalog::from_products(products))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Numeric columns may be any of Int32/Int64/Float32/Float64; flag columns
/// may additionally be Boolean. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut products = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut products)?;
    }

    Ok(Catalog::from_products(products))
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<Product>) -> Result<()> {
    let names = column(batch, "TV_name")?;
    let price = column(batch, "Price")?;
    let diagonal = column(batch, "diagonal")?;
    let hdmi = column(batch, "hdmi_n")?;
    let usb = column(batch, "usb_n")?;
    let three_d = column(batch, "3D_Tv")?;
    let volume = column(batch, "volume")?;
    let pixels = column(batch, "pixels")?;
    let energy = column(batch, "energy_cons")?;
    let weight = column(batch, "weight")?;
    let full_hd = column(batch, "Full_HD")?;
    let ultra_hd = column(batch, "Ultra_HD")?;

    for row in 0..batch.num_rows() {
        let record = ProductRecord {
            name: extract_string(names, row).context("TV_name")?,
            price: extract_f64(price, row).context("Price")?,
            diagonal: extract_f64(diagonal, row).context("diagonal")?,
            hdmi_ports: extract_f64(hdmi, row).context("hdmi_n")?,
            usb_ports: extract_f64(usb, row).context("usb_n")?,
            supports_3d: extract_flag(three_d, row).context("3D_Tv")?,
            volume: extract_f64(volume, row).context("volume")?,
            pixels: extract_f64(pixels, row).context("pixels")?,
            energy_consumption: extract_f64(energy, row).context("energy_cons")?,
            weight: extract_f64(weight, row).context("weight")?,
            full_hd: extract_flag(full_hd, row).context("Full_HD")?,
            ultra_hd: extract_flag(ultra_hd, row).context("Ultra_HD")?,
        };
        out.push(Product::try_from(record).with_context(|| format!("row {row}"))?);
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("row {row}: null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let s = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(s.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("row {row}: expected a string column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("row {row}: null value");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| f64::from(a.value(row))),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| f64::from(a.value(row))),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        other => bail!("row {row}: expected a numeric column, got {other:?}"),
    };
    value.with_context(|| format!("row {row}: column does not match its declared type"))
}

fn extract_flag(col: &Arc<dyn Array>, row: usize) -> Result<bool> {
    if let DataType::Boolean = col.data_type() {
        if col.is_null(row) {
            bail!("row {row}: null value");
        }
        let arr = col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .context("expected BooleanArray")?;
        return Ok(arr.value(row));
    }
    let v = extract_f64(col, row)?;
    if v == 0.0 || v == 1.0 {
        Ok(v == 1.0)
    } else {
        bail!("row {row}: {v} is not a 0/1 flag")
    }
}
