use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One generated TV, in source column order.
struct Row {
    name: String,
    price: f64,
    diagonal: f64,
    hdmi: i64,
    usb: i64,
    three_d: bool,
    volume: f64,
    pixels: i64,
    energy: f64,
    weight: f64,
    full_hd: bool,
    ultra_hd: bool,
}

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<Row> {
    // (brand, price multiplier); "Grundig" lands in the Unknown bucket.
    let brands = [
        ("Samsung", 1.3),
        ("LG", 1.2),
        ("Sony", 1.4),
        ("Philips", 1.0),
        ("Thomson", 0.7),
        ("Grundig", 0.8),
    ];
    let diagonals = [61.0, 81.0, 102.0, 108.0, 123.0, 139.0, 164.0, 190.0, 218.0];

    (0..n)
        .map(|i| {
            let &(brand, mult) = rng.pick(&brands);
            let diagonal = *rng.pick(&diagonals);
            let ultra_hd = diagonal >= 108.0 && rng.next_f64() < 0.6;
            let full_hd = !ultra_hd && diagonal >= 81.0;
            let pixels = if ultra_hd {
                8_294_400
            } else if full_hd {
                2_073_600
            } else {
                1_049_088
            };
            let base = diagonal * diagonal * 0.05 * if ultra_hd { 1.8 } else { 1.0 };
            // One in forty is a flagship priced far above its peers.
            let premium = if rng.next_f64() < 0.025 { 6.0 } else { 1.0 };
            let price = (base * mult * premium * rng.range(0.8, 1.25)).round();

            Row {
                name: format!("{brand} {}{:03}", if ultra_hd { "UHD" } else { "HD" }, i),
                price,
                diagonal,
                hdmi: 1 + (rng.next_u64() % 4) as i64,
                usb: (rng.next_u64() % 4) as i64,
                three_d: rng.next_f64() < 0.2,
                volume: (diagonal * 0.35 * rng.range(0.8, 1.2)).round(),
                pixels,
                energy: (diagonal * 1.1 * rng.range(0.7, 1.3)).round().min(420.0),
                weight: (diagonal * 0.12 * rng.range(0.8, 1.2) * 10.0).round() / 10.0,
                full_hd,
                ultra_hd,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "", "TV_name", "Price", "diagonal", "hdmi_n", "usb_n", "3D_Tv", "volume", "pixels",
        "energy_cons", "weight", "Full_HD", "Ultra_HD",
    ])?;
    for (i, r) in rows.iter().enumerate() {
        writer.write_record([
            i.to_string(),
            r.name.clone(),
            r.price.to_string(),
            r.diagonal.to_string(),
            r.hdmi.to_string(),
            r.usb.to_string(),
            u8::from(r.three_d).to_string(),
            r.volume.to_string(),
            r.pixels.to_string(),
            r.energy.to_string(),
            r.weight.to_string(),
            u8::from(r.full_hd).to_string(),
            u8::from(r.ultra_hd).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let f64_col = |f: fn(&Row) -> f64| {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let i64_col = |f: fn(&Row) -> i64| {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let bool_col = |f: fn(&Row) -> bool| {
        Arc::new(BooleanArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("TV_name", DataType::Utf8, false),
        Field::new("Price", DataType::Float64, false),
        Field::new("diagonal", DataType::Float64, false),
        Field::new("hdmi_n", DataType::Int64, false),
        Field::new("usb_n", DataType::Int64, false),
        Field::new("3D_Tv", DataType::Boolean, false),
        Field::new("volume", DataType::Float64, false),
        Field::new("pixels", DataType::Int64, false),
        Field::new("energy_cons", DataType::Float64, false),
        Field::new("weight", DataType::Float64, false),
        Field::new("Full_HD", DataType::Boolean, false),
        Field::new("Ultra_HD", DataType::Boolean, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            )),
            f64_col(|r| r.price),
            f64_col(|r| r.diagonal),
            i64_col(|r| r.hdmi),
            i64_col(|r| r.usb),
            bool_col(|r| r.three_d),
            f64_col(|r| r.volume),
            i64_col(|r| r.pixels),
            f64_col(|r| r.energy),
            f64_col(|r| r.weight),
            bool_col(|r| r.full_hd),
            bool_col(|r| r.ultra_hd),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 240);

    std::fs::create_dir_all("data").context("creating data/")?;
    write_csv(&rows, "data/tv_data.csv")?;
    write_parquet(&rows, "data/tv_data.parquet")?;

    println!("Wrote {} TVs to data/tv_data.csv and data/tv_data.parquet", rows.len());
    Ok(())
}
