//! The fixed set of currencies a bank account can hold.

use std::{fmt::Display, str::FromStr};

/// A supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    /// US Dollar.
    #[default]
    Usd,
    /// Euro.
    Eur,
    /// British Pound.
    Gbp,
    /// Japanese Yen.
    Jpy,
}

impl Currency {
    /// Every supported currency, in the order they are offered to the user.
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Jpy];

    /// The ISO 4217 code, e.g. "USD".
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    /// The symbol placed in front of formatted amounts.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    /// The label shown in currency pickers, e.g. "USD - US Dollar".
    pub fn label(self) -> &'static str {
        match self {
            Currency::Usd => "USD - US Dollar",
            Currency::Eur => "EUR - Euro",
            Currency::Gbp => "GBP - British Pound",
            Currency::Jpy => "JPY - Japanese Yen",
        }
    }

    /// The number of minor digits shown when formatting amounts.
    pub fn decimal_places(self) -> u8 {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// Read a stored currency code, treating missing or unknown codes as USD.
    pub fn from_stored(code: Option<&str>) -> Self {
        code.and_then(|code| code.parse().ok()).unwrap_or_default()
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The error returned when a string is not one of the supported currency codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCurrency;

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code.trim())
            .ok_or(UnknownCurrency)
    }
}
