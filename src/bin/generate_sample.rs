//! Writes a small sample sales CSV for trying out the dashboard:
//! two categorical columns, two numeric columns, and a handful of
//! negative values for the conflict scene.

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let regions = ["East", "West", "North", "South"];
    let products = ["Widgets", "Gadgets", "Gizmos"];
    let months = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun",
        "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    // Per-region base level so the grouped sums tell a story.
    let base = [1200.0, 900.0, 600.0, 300.0];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(["Region", "Product", "Month", "Sales", "Units"])?;

    let mut rows: u32 = 0;
    for (region, &level) in regions.iter().zip(&base) {
        for product in &products {
            for month in &months {
                // Refunds occasionally push a month negative.
                let sales = rng.gauss(level, level * 0.5);
                let units = (sales / 25.0 + rng.gauss(0.0, 3.0)).round().max(-20.0);
                writer.write_record([
                    region.to_string(),
                    product.to_string(),
                    month.to_string(),
                    format!("{sales:.2}"),
                    format!("{units:.0}"),
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;

    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
