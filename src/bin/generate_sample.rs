use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

const OUTPUT_PATH: &str = "sfmc_email_campaign_sample.csv";

/// One output row; field names are the dashboard's CSV headers.
#[derive(Debug, Serialize)]
struct Row<'a> {
    #[serde(rename = "Campaign Name")]
    campaign_name: &'a str,
    #[serde(rename = "Send Date")]
    send_date: String,
    #[serde(rename = "Open Rate (%)")]
    open_rate: f64,
    #[serde(rename = "Click Rate (%)")]
    click_rate: f64,
    #[serde(rename = "Unsubscribe Rate (%)")]
    unsubscribe_rate: f64,
    #[serde(rename = "Bounce Rate (%)")]
    bounce_rate: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            // splitmix64
            x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            *slot = z ^ (z >> 31);
        }
        Self { state: s }
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

/// Draw a rate around `mean`, clamped to [0, 100] and rounded to 2 decimals.
fn rate(rng: &mut SimpleRng, mean: f64, std_dev: f64) -> f64 {
    let v = rng.gauss(mean, std_dev).clamp(0.0, 100.0);
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (name, open, click, unsubscribe, bounce) baseline means
    let campaigns = [
        ("Welcome Series", 45.0, 8.0, 0.2, 1.0),
        ("Monthly Newsletter", 22.0, 3.0, 0.3, 1.5),
        ("Spring Sale", 28.0, 5.5, 0.4, 2.0),
        ("Product Launch", 35.0, 6.5, 0.3, 1.2),
        ("Re-engagement", 12.0, 1.5, 0.9, 3.5),
    ];

    let first_send = NaiveDate::from_ymd_opt(2024, 1, 8).context("invalid start date")?;
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    let mut n_rows = 0;
    for week in 0..26i64 {
        let date = first_send + Duration::weeks(week);
        for (i, &(name, open, click, unsub, bounce)) in campaigns.iter().enumerate() {
            // Stagger sends so each campaign goes out every other week or so.
            if (week as usize + i) % 2 == 1 && i != 1 {
                continue;
            }
            let row = Row {
                campaign_name: name,
                send_date: (date + Duration::days(i as i64)).format("%Y-%m-%d").to_string(),
                open_rate: rate(&mut rng, open, open * 0.12),
                click_rate: rate(&mut rng, click, click * 0.2),
                unsubscribe_rate: rate(&mut rng, unsub, unsub * 0.3),
                bounce_rate: rate(&mut rng, bounce, bounce * 0.25),
            };
            writer.serialize(&row).context("writing row")?;
            n_rows += 1;
        }
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {n_rows} campaign sends to {OUTPUT_PATH}");
    Ok(())
}
