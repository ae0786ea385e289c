use super::prices::{self, PriceStatus};
use super::ui;
use crate::core::price::MetalPriceProvider;
use crate::core::zakat::{self, ZakatSummary};
use crate::store::{Snapshot, SnapshotStore};
use anyhow::Result;
use comfy_table::Cell;

impl ZakatSummary {
    /// Renders the entry table followed by the totals for `snapshot`.
    pub fn display_as_table(&self, snapshot: &Snapshot, status: &PriceStatus) -> String {
        let country = snapshot.country;
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("ID"),
            ui::header_cell("Category"),
            ui::header_cell("Description"),
            ui::header_cell("Weight"),
            ui::header_cell(&format!("Amount ({})", country.currency)),
        ]);

        for (category, _) in &self.category_totals {
            for entry in snapshot.assets.category(*category) {
                let weight = ui::format_optional_cell(entry.weight, |w| {
                    format!("{w:.2} {}", entry.unit.unwrap_or_default())
                });
                table.add_row(vec![
                    Cell::new(entry.id),
                    Cell::new(category.label()),
                    Cell::new(entry.description.as_deref().unwrap_or("")),
                    weight,
                    ui::number_cell(country.format_amount(entry.amount)),
                ]);
            }
        }

        let mut output = format!(
            "Zakat Calculator: {}\n\n",
            ui::style_text(
                &format!("{} ({})", country.name, country.currency),
                ui::StyleType::Title
            )
        );

        output.push_str(&format!(
            "Gold: {}/oz, Silver: {}/oz",
            country.format_amount(status.prices.gold),
            country.format_amount(status.prices.silver)
        ));
        if let Some(fetched_at) = status.prices.fetched_at {
            output.push_str(&format!(
                " {}",
                ui::style_text(
                    &format!("as of {}", fetched_at.format("%Y-%m-%d %H:%M UTC")),
                    ui::StyleType::Subtle
                )
            ));
        }
        if let Some(error) = status.error {
            output.push_str(&format!(
                " ({})",
                ui::style_text(error, ui::StyleType::Error)
            ));
        }
        output.push_str("\n\n");

        output.push_str(&table.to_string());

        output.push_str(&format!(
            "\n\n{} {}\n{} {}\n{} {}",
            ui::style_text("Total Wealth:", ui::StyleType::TotalLabel),
            country.format_amount(self.total_wealth),
            ui::style_text("Nisab Threshold:", ui::StyleType::TotalLabel),
            country.format_amount(self.nisab_threshold),
            ui::style_text("Zakat Payable:", ui::StyleType::TotalLabel),
            ui::style_text(
                &country.format_amount(self.zakat_amount),
                ui::StyleType::TotalValue
            ),
        ));

        if !self.zakat_payable {
            output.push_str(&format!(
                "\n\n{}",
                ui::style_text(
                    &format!(
                        "Note: Zakat is only payable if your total wealth exceeds the Nisab value of {}.",
                        country.format_amount(self.nisab_threshold)
                    ),
                    ui::StyleType::Subtle
                )
            ));
        }

        output
    }
}

/// Calculates and prints the totals for `snapshot` with the given prices.
pub fn display(snapshot: &Snapshot, status: &PriceStatus) {
    let summary = zakat::calculate(&snapshot.assets, snapshot.country);
    println!("{}", summary.display_as_table(snapshot, status));
}

/// Refreshes metal prices for the selected country, revalues weighed entries
/// and prints the summary.
pub async fn run(
    snapshots: &SnapshotStore,
    provider: &(dyn MetalPriceProvider + Send + Sync),
    default_country: &str,
) -> Result<()> {
    let mut snapshot = snapshots.load(default_country).await;
    let status = prices::refresh(provider, snapshots, snapshot.country).await?;

    snapshot.assets.revalue(&status.prices);
    snapshots.save(&snapshot).await?;

    display(&snapshot, &status);
    Ok(())
}
