use anyhow::{Context, Result};
use ebird_api::{Client, RequestOption};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_env()?;

    // Defaults to Ithaca, NY.
    let mut args = std::env::args().skip(1);
    let lat: f64 = args
        .next()
        .map(|s| s.parse())
        .transpose()
        .context("latitude must be a number")?
        .unwrap_or(42.46);
    let lng: f64 = args
        .next()
        .map(|s| s.parse())
        .transpose()
        .context("longitude must be a number")?
        .unwrap_or(-76.51);

    let hotspots = client.nearby_hotspots(&[
        RequestOption::lat(lat)?,
        RequestOption::lng(lng)?,
        RequestOption::dist(10)?,
    ])?;

    for hotspot in hotspots.iter().take(10) {
        println!(
            "{:<10} {:<40} {:>4} species",
            hotspot.loc_id, hotspot.loc_name, hotspot.num_species_all_time
        );
    }

    if let Some(first) = hotspots.first() {
        let info = client.hotspot_info(&first.loc_id, &[])?;
        println!("\n{} is in {}", info.name, info.hierarchical_name);
    }
    Ok(())
}
