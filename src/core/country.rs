//! Static rate table of supported countries and their currencies.

use anyhow::{Result, anyhow};

/// A supported country with a hardcoded exchange rate against USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Country {
    pub name: &'static str,
    pub currency: &'static str,
    pub symbol: &'static str,
    /// Units of the local currency per one US dollar.
    pub rate: f64,
}

pub const COUNTRIES: &[Country] = &[
    Country {
        name: "United States",
        currency: "USD",
        symbol: "$",
        rate: 1.0,
    },
    Country {
        name: "Bangladesh",
        currency: "BDT",
        symbol: "৳",
        rate: 109.85,
    },
    Country {
        name: "India",
        currency: "INR",
        symbol: "₹",
        rate: 83.37,
    },
    Country {
        name: "Malaysia",
        currency: "MYR",
        symbol: "RM",
        rate: 4.77,
    },
    Country {
        name: "Maldives",
        currency: "MVR",
        symbol: "Rf",
        rate: 15.45,
    },
    Country {
        name: "United Kingdom",
        currency: "GBP",
        symbol: "£",
        rate: 0.79,
    },
    Country {
        name: "Saudi Arabia",
        currency: "SAR",
        symbol: "﷼",
        rate: 3.75,
    },
    Country {
        name: "UAE",
        currency: "AED",
        symbol: "د.إ",
        rate: 3.67,
    },
    Country {
        name: "Pakistan",
        currency: "PKR",
        symbol: "₨",
        rate: 278.50,
    },
    Country {
        name: "Indonesia",
        currency: "IDR",
        symbol: "Rp",
        rate: 15785.0,
    },
    Country {
        name: "Turkey",
        currency: "TRY",
        symbol: "₺",
        rate: 31.93,
    },
];

pub const DEFAULT_COUNTRY: &str = "Bangladesh";

impl Country {
    /// Finds a country by its name or currency code, ignoring case.
    pub fn find(query: &str) -> Result<&'static Country> {
        let query = query.trim();
        COUNTRIES
            .iter()
            .find(|c| {
                c.name.eq_ignore_ascii_case(query) || c.currency.eq_ignore_ascii_case(query)
            })
            .ok_or_else(|| anyhow!("Unknown country or currency: {}", query))
    }

    /// Looks up `name`, falling back to the default country.
    pub fn find_or_default(name: &str) -> &'static Country {
        Self::find(name).unwrap_or_else(|_| Self::default_country())
    }

    pub fn default_country() -> &'static Country {
        COUNTRIES
            .iter()
            .find(|c| c.name == DEFAULT_COUNTRY)
            .unwrap_or(&COUNTRIES[0])
    }

    /// Converts a USD amount into this country's currency.
    pub fn from_usd(&self, amount: f64) -> f64 {
        amount * self.rate
    }

    /// Formats an amount with the currency symbol, thousands separators and
    /// two decimals, e.g. `$2,500.00` or `-৳12.50`.
    pub fn format_amount(&self, amount: f64) -> String {
        let formatted = format!("{:.2}", amount.abs());
        let (integer, fraction) = formatted
            .split_once('.')
            .unwrap_or((formatted.as_str(), "00"));

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if amount < 0.0 && formatted != "0.00" {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{grouped}.{fraction}", self.symbol)
    }
}
