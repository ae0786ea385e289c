use super::{prices, summary, ui};
use crate::core::country::{COUNTRIES, Country};
use crate::core::price::MetalPriceProvider;
use crate::core::zakat;
use crate::store::SnapshotStore;
use anyhow::Result;
use comfy_table::Cell;
use tracing::info;

/// Renders the rate table, marking the `selected` country.
pub fn countries_table(selected: &Country) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Country"),
        ui::header_cell("Currency"),
        ui::header_cell("Symbol"),
        ui::header_cell("Rate (per USD)"),
        ui::header_cell("Nisab"),
    ]);

    for country in COUNTRIES {
        let marker = if country.name == selected.name { "*" } else { "" };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(country.name),
            Cell::new(country.currency),
            Cell::new(country.symbol),
            ui::number_cell(format!("{:.2}", country.rate)),
            ui::number_cell(country.format_amount(zakat::nisab_threshold(country))),
        ]);
    }
    table.to_string()
}

pub async fn list(snapshots: &SnapshotStore, default_country: &str) -> Result<()> {
    let snapshot = snapshots.load(default_country).await;
    println!("{}", countries_table(snapshot.country));
    Ok(())
}

/// Selects a country, then fetches prices in its currency and revalues
/// the weighed entries.
pub async fn select(
    snapshots: &SnapshotStore,
    provider: &(dyn MetalPriceProvider + Send + Sync),
    default_country: &str,
    query: &str,
) -> Result<()> {
    let country = Country::find(query)?;
    let mut snapshot = snapshots.load(default_country).await;
    snapshot.country = country;
    info!(country = country.name, "Selected country");

    let status = prices::refresh(provider, snapshots, country).await?;
    snapshot.assets.revalue(&status.prices);
    snapshots.save(&snapshot).await?;

    summary::display(&snapshot, &status);
    Ok(())
}
