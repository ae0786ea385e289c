//! Aggregates asset entries and decides whether zakat is due.
use crate::core::assets::{AssetGroups, Category};
use crate::core::country::Country;
use tracing::debug;

/// Nisab threshold in USD.
pub const NISAB_USD: f64 = 5200.0;
/// Share of wealth due once the nisab is reached.
pub const ZAKAT_RATE: f64 = 0.025;

/// Totals for the current set of assets, in the selected country's currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ZakatSummary {
    pub total_wealth: f64,
    pub nisab_threshold: f64,
    pub zakat_payable: bool,
    pub zakat_amount: f64,
    pub category_totals: Vec<(Category, f64)>,
}

/// Sums every entry and compares the total against the nisab scaled to the
/// country's currency. Pure calculation, safe to call on every change.
pub fn calculate(assets: &AssetGroups, country: &Country) -> ZakatSummary {
    let category_totals: Vec<(Category, f64)> = Category::ALL
        .iter()
        .map(|category| {
            let subtotal: f64 = assets.category(*category).iter().map(|e| e.amount).sum();
            (*category, subtotal)
        })
        .collect();

    let total_wealth: f64 = assets.entries().map(|e| e.amount).sum();
    let nisab_threshold = nisab_threshold(country);
    let zakat_payable = total_wealth >= nisab_threshold;
    let zakat_amount = if zakat_payable {
        total_wealth.max(0.0) * ZAKAT_RATE
    } else {
        0.0
    };

    debug!(
        total_wealth,
        nisab_threshold, zakat_payable, zakat_amount, "Calculated zakat"
    );

    ZakatSummary {
        total_wealth,
        nisab_threshold,
        zakat_payable,
        zakat_amount,
        category_totals,
    }
}

pub fn nisab_threshold(country: &Country) -> f64 {
    country.from_usd(NISAB_USD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::{EntryUpdate, NewEntry};
    use crate::core::price::MetalPrices;
    use crate::core::units::MetalUnit;

    fn with_cash(amounts: &[f64]) -> AssetGroups {
        let mut groups = AssetGroups::defaults();
        let prices = MetalPrices::zero("USD");
        for amount in amounts {
            groups.add(
                Category::Cash,
                NewEntry {
                    amount: Some(*amount),
                    ..Default::default()
                },
                &prices,
            )
            .unwrap();
        }
        groups
    }

    #[test]
    fn test_zakat_on_hundred_thousand_usd() {
        let usd = Country::find("USD").unwrap();
        let summary = calculate(&with_cash(&[100000.0]), usd);
        assert_eq!(summary.total_wealth, 100000.0);
        assert!(summary.zakat_payable);
        assert_eq!(summary.zakat_amount, 2500.0);
        assert_eq!(usd.format_amount(summary.zakat_amount), "$2,500.00");
    }

    #[test]
    fn test_below_nisab_pays_nothing() {
        let usd = Country::find("USD").unwrap();
        let summary = calculate(&with_cash(&[5199.99]), usd);
        assert!(!summary.zakat_payable);
        assert_eq!(summary.zakat_amount, 0.0);
    }

    #[test]
    fn test_nisab_boundary_is_inclusive() {
        let usd = Country::find("USD").unwrap();
        let summary = calculate(&with_cash(&[5200.0]), usd);
        assert!(summary.zakat_payable);
        assert_eq!(summary.zakat_amount, 130.0);
    }

    #[test]
    fn test_threshold_scales_with_country_rate() {
        let bdt = Country::find("Bangladesh").unwrap();
        let groups = with_cash(&[100000.0]);
        let summary = calculate(&groups, bdt);
        assert!((summary.nisab_threshold - 571220.0).abs() < 1e-6);
        assert!(!summary.zakat_payable);
        assert_eq!(summary.zakat_amount, 0.0);

        let summary = calculate(&with_cash(&[600000.0]), bdt);
        assert!(summary.zakat_payable);
        assert!((summary.zakat_amount - 15000.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_sums_every_category() {
        let mut groups = with_cash(&[1000.0, 250.5]);
        let prices = MetalPrices::new(2000.0, 25.0, "USD");
        groups.add(
            Category::BusinessInventory,
            NewEntry {
                amount: Some(300.0),
                ..Default::default()
            },
            &prices,
        )
        .unwrap();
        groups
            .update(
                2,
                EntryUpdate {
                    weight: Some(1.0),
                    unit: Some(MetalUnit::TroyOunce),
                    ..Default::default()
                },
                &prices,
            )
            .unwrap();
        groups
            .update(
                4,
                EntryUpdate {
                    amount: Some(-50.0),
                    ..Default::default()
                },
                &prices,
            )
            .unwrap();

        let expected: f64 = groups.entries().map(|e| e.amount).sum();
        let summary = calculate(&groups, Country::find("USD").unwrap());
        assert!((summary.total_wealth - expected).abs() < 1e-9);
        assert!((summary.total_wealth - 3500.5).abs() < 1e-9);

        let subtotals: f64 = summary.category_totals.iter().map(|(_, v)| v).sum();
        assert!((subtotals - summary.total_wealth).abs() < 1e-9);
        assert_eq!(summary.category_totals[1], (Category::Gold, 2000.0));
    }

    #[test]
    fn test_defaults_total_zero() {
        let summary = calculate(&AssetGroups::defaults(), Country::find("USD").unwrap());
        assert_eq!(summary.total_wealth, 0.0);
        assert!(!summary.zakat_payable);
        assert_eq!(summary.zakat_amount, 0.0);
    }
}
