//! Asset entries grouped by zakatable category.

use crate::core::price::MetalPrices;
use crate::core::units::{MetalUnit, convert_weight};
use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Cash,
    Gold,
    Silver,
    Investments,
    BusinessProperty,
    BusinessInventory,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Cash,
        Category::Gold,
        Category::Silver,
        Category::Investments,
        Category::BusinessProperty,
        Category::BusinessInventory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Cash => "Cash & Bank Balances",
            Category::Gold => "Gold",
            Category::Silver => "Silver",
            Category::Investments => "Investments & Shares",
            Category::BusinessProperty => "Property for Business",
            Category::BusinessInventory => "Business Inventory",
        }
    }

    /// Gold and silver are valued by weight rather than entered as amounts.
    pub fn is_metal(&self) -> bool {
        matches!(self, Category::Gold | Category::Silver)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" | "bank" => Ok(Category::Cash),
            "gold" => Ok(Category::Gold),
            "silver" => Ok(Category::Silver),
            "investments" | "shares" => Ok(Category::Investments),
            "business-property" | "property" => Ok(Category::BusinessProperty),
            "business-inventory" | "inventory" => Ok(Category::BusinessInventory),
            _ => Err(anyhow!("Invalid asset category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub id: u64,
    pub category: Category,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<MetalUnit>,
}

impl AssetEntry {
    fn zero(id: u64, category: Category) -> Self {
        let (weight, unit) = if category.is_metal() {
            (Some(0.0), Some(MetalUnit::Gram))
        } else {
            (None, None)
        };
        AssetEntry {
            id,
            category,
            amount: 0.0,
            description: None,
            weight,
            unit,
        }
    }

    /// Recomputes the amount of a weighed metal entry. Other entries keep the
    /// amount the user typed in.
    pub fn revalue(&mut self, prices: &MetalPrices) {
        if let (Some(weight), Some(price)) = (self.weight, prices.per_ounce(self.category)) {
            let unit = self.unit.unwrap_or_default();
            self.amount = unit.value(weight, price);
        }
    }
}

/// Input for a new entry. Unset numbers read as zero.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub amount: Option<f64>,
    pub weight: Option<f64>,
    pub unit: Option<MetalUnit>,
    pub description: Option<String>,
}

/// Changes to an existing entry. Fields left as `None` are untouched.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub amount: Option<f64>,
    pub weight: Option<f64>,
    pub unit: Option<MetalUnit>,
    pub description: Option<String>,
}

/// All asset entries, keyed by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetGroups {
    groups: BTreeMap<Category, Vec<AssetEntry>>,
}

impl Default for AssetGroups {
    fn default() -> Self {
        Self::defaults()
    }
}

impl AssetGroups {
    /// One zero-valued entry per category.
    pub fn defaults() -> Self {
        let groups = Category::ALL
            .iter()
            .zip(1u64..)
            .map(|(category, id)| (*category, vec![AssetEntry::zero(id, *category)]))
            .collect();
        AssetGroups { groups }
    }

    pub fn entries(&self) -> impl Iterator<Item = &AssetEntry> {
        self.groups.values().flatten()
    }

    pub fn category(&self, category: Category) -> &[AssetEntry] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, id: u64) -> Option<&AssetEntry> {
        self.entries().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut AssetEntry> {
        self.groups.values_mut().flatten().find(|e| e.id == id)
    }

    fn next_id(&self) -> u64 {
        self.entries().map(|e| e.id).max().unwrap_or(0) + 1
    }

    pub fn add(
        &mut self,
        category: Category,
        entry: NewEntry,
        prices: &MetalPrices,
    ) -> Result<u64> {
        if !category.is_metal() && (entry.weight.is_some() || entry.unit.is_some()) {
            bail!("{} is entered as an amount, not a weight", category);
        }

        let id = self.next_id();
        let mut new_entry = AssetEntry {
            id,
            category,
            amount: entry.amount.unwrap_or(0.0),
            description: entry.description,
            weight: None,
            unit: None,
        };
        if category.is_metal() {
            new_entry.weight = Some(entry.weight.unwrap_or(0.0).max(0.0));
            new_entry.unit = Some(entry.unit.unwrap_or_default());
            new_entry.revalue(prices);
        }
        debug!(id, ?category, amount = new_entry.amount, "Added asset entry");
        self.groups.entry(category).or_default().push(new_entry);
        Ok(id)
    }

    pub fn update(&mut self, id: u64, update: EntryUpdate, prices: &MetalPrices) -> Result<()> {
        let entry = self
            .get_mut(id)
            .ok_or_else(|| anyhow!("No asset entry with id {}", id))?;

        if let Some(description) = update.description {
            entry.description = Some(description).filter(|d| !d.trim().is_empty());
        }

        if entry.category.is_metal() {
            let old_unit = entry.unit.unwrap_or_default();
            let new_unit = update.unit.unwrap_or(old_unit);
            let weight = match update.weight {
                Some(weight) => weight.max(0.0),
                None => convert_weight(entry.weight.unwrap_or(0.0), old_unit, new_unit),
            };
            entry.weight = Some(weight);
            entry.unit = Some(new_unit);
            entry.revalue(prices);
            if update.amount.is_some() {
                debug!(id, "Ignoring amount for weighed entry");
            }
        } else {
            if update.weight.is_some() || update.unit.is_some() {
                bail!("{} is entered as an amount, not a weight", entry.category);
            }
            if let Some(amount) = update.amount {
                entry.amount = amount;
            }
        }
        debug!(id, amount = entry.amount, "Updated asset entry");
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Result<AssetEntry> {
        for entries in self.groups.values_mut() {
            if let Some(pos) = entries.iter().position(|e| e.id == id) {
                let removed = entries.remove(pos);
                debug!(id, category = ?removed.category, "Removed asset entry");
                return Ok(removed);
            }
        }
        Err(anyhow!("No asset entry with id {}", id))
    }

    /// Recomputes every weighed entry with fresh prices.
    pub fn revalue(&mut self, prices: &MetalPrices) {
        for entry in self.groups.values_mut().flatten() {
            entry.revalue(prices);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::defaults();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd_prices() -> MetalPrices {
        MetalPrices::new(2000.0, 25.0, "USD")
    }

    #[test]
    fn test_defaults_have_one_zero_entry_per_category() {
        let groups = AssetGroups::defaults();
        for category in Category::ALL {
            let entries = groups.category(category);
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].amount, 0.0);
            assert_eq!(entries[0].weight.is_some(), category.is_metal());
        }
        let ids: Vec<u64> = groups.entries().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_add_entries() {
        let mut groups = AssetGroups::defaults();
        let prices = usd_prices();

        let cash_id = groups.add(
            Category::Cash,
            NewEntry {
                amount: Some(1500.0),
                description: Some("Savings".to_string()),
                ..Default::default()
            },
            &prices,
        )
        .unwrap();
        assert_eq!(cash_id, 7);
        let cash = groups.get(cash_id).unwrap();
        assert_eq!(cash.amount, 1500.0);
        assert_eq!(cash.description.as_deref(), Some("Savings"));
        assert!(cash.weight.is_none());

        let gold_id = groups.add(
            Category::Gold,
            NewEntry {
                weight: Some(1.0),
                unit: Some(MetalUnit::TroyOunce),
                ..Default::default()
            },
            &prices,
        )
        .unwrap();
        assert_eq!(gold_id, 8);
        assert!((groups.get(gold_id).unwrap().amount - 2000.0).abs() < 1e-9);
        assert_eq!(groups.category(Category::Gold).len(), 2);
    }

    #[test]
    fn test_update_amount_and_description() {
        let mut groups = AssetGroups::defaults();
        let prices = usd_prices();

        groups
            .update(
                1,
                EntryUpdate {
                    amount: Some(320.5),
                    description: Some("Wallet".to_string()),
                    ..Default::default()
                },
                &prices,
            )
            .unwrap();
        let entry = groups.get(1).unwrap();
        assert_eq!(entry.amount, 320.5);
        assert_eq!(entry.description.as_deref(), Some("Wallet"));

        let err = groups
            .update(
                1,
                EntryUpdate {
                    weight: Some(3.0),
                    ..Default::default()
                },
                &prices,
            )
            .unwrap_err();
        assert!(err.to_string().contains("not a weight"));
    }

    #[test]
    fn test_add_rejects_weight_for_amount_category() {
        let mut groups = AssetGroups::defaults();
        let err = groups
            .add(
                Category::Cash,
                NewEntry {
                    weight: Some(5.0),
                    unit: Some(MetalUnit::Gram),
                    ..Default::default()
                },
                &usd_prices(),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cash & Bank Balances is entered as an amount, not a weight"
        );
        assert_eq!(groups, AssetGroups::defaults());

        let err = groups
            .add(
                Category::Investments,
                NewEntry {
                    unit: Some(MetalUnit::Vori),
                    ..Default::default()
                },
                &usd_prices(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("not a weight"));
    }

    #[test]
    fn test_unit_change_converts_existing_weight() {
        let mut groups = AssetGroups::defaults();
        let prices = usd_prices();
        let gold = groups.category(Category::Gold)[0].id;

        groups
            .update(
                gold,
                EntryUpdate {
                    weight: Some(31.1035),
                    ..Default::default()
                },
                &prices,
            )
            .unwrap();
        let before = groups.get(gold).unwrap().amount;
        assert!((before - 2000.0).abs() < 1e-9);

        groups
            .update(
                gold,
                EntryUpdate {
                    unit: Some(MetalUnit::TroyOunce),
                    ..Default::default()
                },
                &prices,
            )
            .unwrap();
        let entry = groups.get(gold).unwrap();
        assert!((entry.weight.unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(entry.unit, Some(MetalUnit::TroyOunce));
        assert!((entry.amount - before).abs() < 1e-9);
    }

    #[test]
    fn test_remove_entry() {
        let mut groups = AssetGroups::defaults();
        let removed = groups.remove(4).unwrap();
        assert_eq!(removed.category, Category::Investments);
        assert!(groups.category(Category::Investments).is_empty());
        assert!(groups.get(4).is_none());

        let err = groups.remove(4).unwrap_err();
        assert_eq!(err.to_string(), "No asset entry with id 4");
    }

    #[test]
    fn test_revalue_with_new_prices() {
        let mut groups = AssetGroups::defaults();
        let prices = usd_prices();
        let silver = groups.category(Category::Silver)[0].id;
        groups
            .update(
                silver,
                EntryUpdate {
                    weight: Some(2.0),
                    unit: Some(MetalUnit::TroyOunce),
                    ..Default::default()
                },
                &prices,
            )
            .unwrap();
        assert!((groups.get(silver).unwrap().amount - 50.0).abs() < 1e-9);

        let bdt = prices.in_currency(crate::core::country::Country::find("BDT").unwrap());
        groups.revalue(&bdt);
        assert!((groups.get(silver).unwrap().amount - 50.0 * 109.85).abs() < 1e-6);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut groups = AssetGroups::defaults();
        groups
            .add(Category::Cash, NewEntry::default(), &usd_prices())
            .unwrap();
        groups.remove(2).unwrap();
        groups.reset();
        assert_eq!(groups, AssetGroups::defaults());
    }

    #[test]
    fn test_groups_serialize_as_category_map() {
        let groups = AssetGroups::defaults();
        let json = serde_json::to_value(&groups).unwrap();
        assert!(json.get("cash").is_some());
        assert!(json.get("business-inventory").is_some());
        assert_eq!(json["gold"][0]["unit"], "gram");

        let restored: AssetGroups = serde_json::from_value(json).unwrap();
        assert_eq!(restored, groups);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Cash".parse::<Category>().unwrap(), Category::Cash);
        assert_eq!(
            "business-inventory".parse::<Category>().unwrap(),
            Category::BusinessInventory
        );
        assert!("crypto".parse::<Category>().is_err());
    }
}
