//! The bank account domain model, its form and validation.

use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

use crate::{
    currency::Currency,
    form::{FieldErrors, non_blank, parse_amount},
    records::RecordId,
};

/// The kind of bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Checking,
    Savings,
    CreditCard,
    Investment,
}

impl AccountType {
    /// Every account type, in the order they are offered to the user.
    pub const ALL: [AccountType; 4] = [
        AccountType::Checking,
        AccountType::Savings,
        AccountType::CreditCard,
        AccountType::Investment,
    ];

    /// The label shown to the user and stored in the record store.
    pub fn label(self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::CreditCard => "Credit Card",
            AccountType::Investment => "Investment",
        }
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccountType {
    type Err = ();

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        AccountType::ALL
            .into_iter()
            .find(|account_type| account_type.label() == label.trim())
            .ok_or(())
    }
}

/// A bank account as read from the record store.
#[derive(Debug, Clone, PartialEq)]
pub struct BankAccount {
    pub id: RecordId,
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub balance: f64,
    pub currency: Currency,
    pub account_type: Option<AccountType>,
}

impl BankAccount {
    /// Whether `search` appears in the name, bank name, account number or
    /// account type, ignoring case. A blank search matches every account.
    pub fn matches_search(&self, search: &str) -> bool {
        let search = search.trim().to_lowercase();

        if search.is_empty() {
            return true;
        }

        [
            Some(self.name.as_str()),
            Some(self.bank_name.as_str()),
            Some(self.account_number.as_str()),
            self.account_type.map(AccountType::label),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&search))
    }
}

/// The fields a user can set on a bank account, after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct BankAccountData {
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub balance: f64,
    pub currency: Currency,
    pub account_type: Option<AccountType>,
}

/// The raw bank account form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BankAccountForm {
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub balance: String,
    pub currency: String,
    pub account_type: String,
}

impl BankAccountForm {
    /// A blank form for a new account, with the currency set to USD.
    pub fn new_account() -> Self {
        Self {
            currency: Currency::default().code().to_owned(),
            ..Default::default()
        }
    }

    /// Fill the form with the current values of `account`.
    pub fn from_account(account: &BankAccount) -> Self {
        Self {
            name: account.name.clone(),
            account_number: account.account_number.clone(),
            bank_name: account.bank_name.clone(),
            balance: account.balance.to_string(),
            currency: account.currency.code().to_owned(),
            account_type: account
                .account_type
                .map(|account_type| account_type.label().to_owned())
                .unwrap_or_default(),
        }
    }

    /// Check every field, collecting a message for each one that is invalid.
    pub fn validate(&self) -> Result<BankAccountData, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = non_blank(&self.name);
        if name.is_none() {
            errors.add("name", "Account name is required");
        }

        let account_number = non_blank(&self.account_number);
        if account_number.is_none() {
            errors.add("account_number", "Account number is required");
        }

        let bank_name = non_blank(&self.bank_name);
        if bank_name.is_none() {
            errors.add("bank_name", "Bank name is required");
        }

        let balance = parse_amount(&self.balance);
        match balance {
            None => errors.add("balance", "Valid balance is required"),
            Some(balance) if balance < 0.0 => errors.add("balance", "Balance cannot be negative"),
            Some(_) => {}
        }

        let currency = if self.currency.trim().is_empty() {
            errors.add("currency", "Currency is required");
            None
        } else {
            self.currency
                .parse::<Currency>()
                .inspect_err(|_| {
                    errors.add("currency", "Currency must be one of USD, EUR, GBP, JPY")
                })
                .ok()
        };

        let account_type = if self.account_type.trim().is_empty() {
            None
        } else {
            let parsed = self.account_type.parse::<AccountType>().ok();
            if parsed.is_none() {
                errors.add(
                    "account_type",
                    "Account type must be one of Checking, Savings, Credit Card, Investment",
                );
            }
            parsed
        };

        errors.into_result(|| BankAccountData {
            name: name.unwrap_or_default(),
            account_number: account_number.unwrap_or_default(),
            bank_name: bank_name.unwrap_or_default(),
            balance: balance.unwrap_or_default(),
            currency: currency.unwrap_or_default(),
            account_type,
        })
    }
}

/// The total balance per currency, in the order each currency first appears.
pub fn totals_by_currency(accounts: &[BankAccount]) -> Vec<(Currency, f64)> {
    let mut totals: Vec<(Currency, f64)> = Vec::new();

    for account in accounts {
        match totals
            .iter_mut()
            .find(|(currency, _)| *currency == account.currency)
        {
            Some((_, total)) => *total += account.balance,
            None => totals.push((account.currency, account.balance)),
        }
    }

    totals
}

/// The currency and total shown as the headline balance: the first currency
/// to appear, or USD with a zero total when there are no accounts.
pub fn primary_total(totals: &[(Currency, f64)]) -> (Currency, f64) {
    totals.first().copied().unwrap_or((Currency::Usd, 0.0))
}
