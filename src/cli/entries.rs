//! Commands that change the asset entries. Every change is saved straight
//! away and the totals are shown again with the last known prices.

use super::{prices, summary};
use crate::core::assets::{Category, EntryUpdate, NewEntry};
use crate::core::country::Country;
use crate::store::{Snapshot, SnapshotStore};
use anyhow::Result;
use tracing::info;

pub async fn add(
    snapshots: &SnapshotStore,
    default_country: &str,
    category: Category,
    entry: NewEntry,
) -> Result<u64> {
    let mut snapshot = snapshots.load(default_country).await;
    let status = prices::cached(snapshots, snapshot.country).await;

    let id = snapshot.assets.add(category, entry, &status.prices)?;
    snapshots.save(&snapshot).await?;
    info!(id, %category, "Added asset entry");

    println!("Added entry #{id} ({category})\n");
    summary::display(&snapshot, &status);
    Ok(id)
}

pub async fn update(
    snapshots: &SnapshotStore,
    default_country: &str,
    id: u64,
    update: EntryUpdate,
) -> Result<()> {
    let mut snapshot = snapshots.load(default_country).await;
    let status = prices::cached(snapshots, snapshot.country).await;

    snapshot.assets.update(id, update, &status.prices)?;
    snapshots.save(&snapshot).await?;

    println!("Updated entry #{id}\n");
    summary::display(&snapshot, &status);
    Ok(())
}

pub async fn remove(snapshots: &SnapshotStore, default_country: &str, id: u64) -> Result<()> {
    let mut snapshot = snapshots.load(default_country).await;
    let status = prices::cached(snapshots, snapshot.country).await;

    let removed = snapshot.assets.remove(id)?;
    snapshots.save(&snapshot).await?;

    println!("Removed entry #{id} ({})\n", removed.category);
    summary::display(&snapshot, &status);
    Ok(())
}

/// Clears saved state and starts again from one zero entry per category.
/// The selected country is cleared too, so the configured default applies.
pub async fn reset(snapshots: &SnapshotStore, default_country: &str) -> Result<Snapshot> {
    let mut snapshot = snapshots.load(default_country).await;
    snapshots.clear().await?;

    snapshot.country = Country::find_or_default(default_country);
    snapshot.assets.reset();
    let status = prices::cached(snapshots, snapshot.country).await;
    info!(country = snapshot.country.name, "Reset all asset entries");

    println!("All entries reset\n");
    summary::display(&snapshot, &status);
    Ok(snapshot)
}
