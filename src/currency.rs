//! Currency codes and amount parsing

use crate::error::{HealthMetricsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency code
///
/// Covers the currencies appearing in the OECD health expenditure dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD, // US Dollar
    EUR, // Euro
    GBP, // British Pound
    JPY, // Japanese Yen
    CHF, // Swiss Franc
    CAD, // Canadian Dollar
    AUD, // Australian Dollar
    NZD, // New Zealand Dollar
    KRW, // South Korean Won
    NOK, // Norwegian Krone
    SEK, // Swedish Krona
    DKK, // Danish Krone
    ISK, // Icelandic Krona
    PLN, // Polish Zloty
    CZK, // Czech Koruna
    HUF, // Hungarian Forint
    TRY, // Turkish Lira
    MXN, // Mexican Peso
    CLP, // Chilean Peso
    COP, // Colombian Peso
    CRC, // Costa Rican Colon
    ILS, // Israeli New Shekel
}

impl Currency {
    /// Parse currency from an ISO code
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            "CAD" => Ok(Currency::CAD),
            "AUD" => Ok(Currency::AUD),
            "NZD" => Ok(Currency::NZD),
            "KRW" => Ok(Currency::KRW),
            "NOK" => Ok(Currency::NOK),
            "SEK" => Ok(Currency::SEK),
            "DKK" => Ok(Currency::DKK),
            "ISK" => Ok(Currency::ISK),
            "PLN" => Ok(Currency::PLN),
            "CZK" => Ok(Currency::CZK),
            "HUF" => Ok(Currency::HUF),
            "TRY" => Ok(Currency::TRY),
            "MXN" => Ok(Currency::MXN),
            "CLP" => Ok(Currency::CLP),
            "COP" => Ok(Currency::COP),
            "CRC" => Ok(Currency::CRC),
            "ILS" => Ok(Currency::ILS),
            _ => Err(HealthMetricsError::UnknownCurrencyCode(code.to_string())),
        }
    }

    /// Get currency code as string
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::NZD => "NZD",
            Currency::KRW => "KRW",
            Currency::NOK => "NOK",
            Currency::SEK => "SEK",
            Currency::DKK => "DKK",
            Currency::ISK => "ISK",
            Currency::PLN => "PLN",
            Currency::CZK => "CZK",
            Currency::HUF => "HUF",
            Currency::TRY => "TRY",
            Currency::MXN => "MXN",
            Currency::CLP => "CLP",
            Currency::COP => "COP",
            Currency::CRC => "CRC",
            Currency::ILS => "ILS",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CHF => "CHF",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
            Currency::NZD => "NZ$",
            Currency::KRW => "₩",
            Currency::NOK => "kr",
            Currency::SEK => "kr",
            Currency::DKK => "kr",
            Currency::ISK => "kr",
            Currency::PLN => "zł",
            Currency::CZK => "Kč",
            Currency::HUF => "Ft",
            Currency::TRY => "₺",
            Currency::MXN => "MX$",
            Currency::CLP => "CL$",
            Currency::COP => "CO$",
            Currency::CRC => "₡",
            Currency::ILS => "₪",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Parse a locale-formatted amount string
///
/// Strips ',' thousands separators before parsing. Returns `None` for anything
/// that is not a finite decimal number after stripping.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
