use std::path::Path;

use anyhow::{Context, Result};

const HEADER: [&str; 7] = [
    "Name / Nom",
    "Year / Année",
    "Country / Pays",
    "Class / Classe",
    "Mass (g) / Masse (g)",
    "Latitude",
    "Longitude",
];

/// (country, relative weight, centre latitude, centre longitude)
const COUNTRIES: [(&str, u32, f64, f64); 10] = [
    ("Antarctica", 30, -76.0, 150.0),
    ("Oman", 12, 20.5, 56.5),
    ("Libya", 10, 26.0, 17.0),
    ("Algeria", 8, 28.0, 2.5),
    ("United States", 8, 39.0, -100.0),
    ("Chile", 6, -24.0, -69.5),
    ("Morocco", 5, 31.5, -7.0),
    ("Australia", 4, -27.0, 128.0),
    ("India", 2, 22.0, 79.0),
    ("France", 1, 46.5, 2.5),
];

const CLASSES: [&str; 8] = ["L6", "H5", "L5", "H6", "H4", "LL5", "CM2", "Iron, IIIAB"];

const ROWS: usize = 5000;

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn pick_country(rng: &mut SimpleRng) -> (&'static str, f64, f64) {
    let total: u32 = COUNTRIES.iter().map(|c| c.1).sum();
    let mut ticket = rng.below(total as usize) as u32;
    for &(name, weight, lat, lon) in &COUNTRIES {
        if ticket < weight {
            return (name, lat, lon);
        }
        ticket -= weight;
    }
    let (name, _, lat, lon) = COUNTRIES[0];
    (name, lat, lon)
}

/// Finds skew towards recent decades, with a thin historical tail.
fn pick_year(rng: &mut SimpleRng) -> i32 {
    if rng.next_f64() < 0.15 {
        1600 + rng.below(380) as i32
    } else {
        (rng.gauss(1995.0, 15.0).round() as i32).clamp(1800, 2024)
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = Path::new("sample_data/meteorite-landings.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir).context("creating output directory")?;
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(output_path)
        .context("creating output file")?;
    writer.write_record(HEADER).context("writing header")?;

    let mut incomplete = 0usize;
    for i in 0..ROWS {
        let (country, lat, lon) = pick_country(&mut rng);
        // Log-normal masses centred on ~100 g.
        let mass = 10f64.powf(rng.gauss(2.0, 1.2)).max(0.1);
        let year = pick_year(&mut rng);
        let class = CLASSES[rng.below(CLASSES.len())];

        let mut year_cell = year.to_string();
        let mut mass_cell = format!("{mass:.1}");
        let mut country_cell = country.to_string();
        // About 4% of rows lose one required field.
        if rng.next_f64() < 0.04 {
            incomplete += 1;
            match rng.below(3) {
                0 => year_cell.clear(),
                1 => mass_cell.clear(),
                _ => country_cell.clear(),
            }
        }

        let (lat_cell, lon_cell) = if rng.next_f64() < 0.1 {
            (String::new(), String::new())
        } else {
            (
                format!("{:.5}", rng.gauss(lat, 2.0).clamp(-90.0, 90.0)),
                format!("{:.5}", rng.gauss(lon, 3.0).clamp(-180.0, 180.0)),
            )
        };

        writer
            .write_record([
                format!("Sample {:05}", i + 1),
                year_cell,
                country_cell,
                class.to_string(),
                mass_cell,
                lat_cell,
                lon_cell,
            ])
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing output file")?;

    println!(
        "Wrote {ROWS} meteorites ({incomplete} incomplete) to {}",
        output_path.display()
    );
    Ok(())
}
