use anyhow::Result;
use ebird_api::{Client, RequestOption, SortKey};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG=ebird_api=debug shows each request URL.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Configure authentication via `EBIRD_API_KEY` or a `.ebirdrc` file.
    let client = Client::from_env()?;

    let region = std::env::args().nth(1).unwrap_or_else(|| "US-NY".to_string());
    let observations = client.recent_observations_in_region(
        &region,
        &[
            RequestOption::back(7)?,
            RequestOption::max_results(20)?,
            RequestOption::hotspot(true),
        ],
    )?;

    for obs in &observations {
        let count = obs
            .how_many
            .map_or_else(|| "X".to_string(), |n| n.to_string());
        println!("{:>4}  {:<32} {} ({})", count, obs.com_name, obs.loc_name, obs.obs_dt);
    }

    let feed = client.recent_checklists_feed(&region, &[RequestOption::max_results(5)?])?;
    println!("\nlatest checklists:");
    for entry in feed {
        println!("  {} by {} ({} species)", entry.sub_id, entry.user_display_name, entry.num_species);
    }

    let notable = client.recent_notable_observations_in_region(
        &region,
        &[RequestOption::sort_key(SortKey::CreationDt)],
    )?;
    println!("\n{} notable observations", notable.len());
    Ok(())
}
