//! Token unit conversion
//!
//! Converts human-readable amounts ("1.5" ether) into base units (wei) as `U256`.

use crate::error::HelperError;
use ethereum_types::U256;
use std::fmt::Display;
use std::str::FromStr;

/// Named denominations and their power-of-ten factor relative to wei
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    NoEther,
    Wei,
    Kwei,
    Mwei,
    Gwei,
    Szabo,
    Finney,
    Ether,
    Kether,
    Mether,
    Gether,
    Tether,
}

impl Unit {
    /// Number of decimal places between this unit and wei
    pub fn decimals(self) -> u32 {
        match self {
            Unit::NoEther | Unit::Wei => 0,
            Unit::Kwei => 3,
            Unit::Mwei => 6,
            Unit::Gwei => 9,
            Unit::Szabo => 12,
            Unit::Finney => 15,
            Unit::Ether => 18,
            Unit::Kether => 21,
            Unit::Mether => 24,
            Unit::Gether => 27,
            Unit::Tether => 30,
        }
    }
}

impl FromStr for Unit {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.to_ascii_lowercase().as_str() {
            "noether" => Unit::NoEther,
            "wei" => Unit::Wei,
            "kwei" | "babbage" | "femtoether" => Unit::Kwei,
            "mwei" | "lovelace" | "picoether" => Unit::Mwei,
            "gwei" | "shannon" | "nanoether" | "nano" => Unit::Gwei,
            "szabo" | "microether" | "micro" => Unit::Szabo,
            "finney" | "milliether" | "milli" => Unit::Finney,
            "ether" => Unit::Ether,
            "kether" | "grand" => Unit::Kether,
            "mether" => Unit::Mether,
            "gether" => Unit::Gether,
            "tether" => Unit::Tether,
            _ => return Err(HelperError::UnknownUnit(s.to_string())),
        };
        Ok(unit)
    }
}

/// Converts `amount` expressed in `unit` into wei
///
/// The amount is rendered with `Display` and parsed as a decimal, so a `U256`,
/// an integer, a float or a string all go through the same conversion.
///
/// # Arguments
///
/// * `amount` - Non-negative decimal amount (e.g., `1`, `"0.5"`, `U256::one()`)
/// * `unit` - Unit name (e.g., "ether", "gwei"), case-insensitive
///
/// # Returns
///
/// * `Ok(U256)` - Amount in wei
/// * `Err(HelperError)` - Unknown unit, malformed amount, too many decimals, or overflow
pub fn to_wei<A: Display>(amount: A, unit: &str) -> Result<U256, HelperError> {
    let unit: Unit = unit.parse()?;
    parse_units(&amount.to_string(), unit)
}

fn parse_units(text: &str, unit: Unit) -> Result<U256, HelperError> {
    let amount = text.trim();
    let invalid = |reason: &str| HelperError::InvalidAmount {
        amount: text.to_string(),
        reason: reason.to_string(),
    };

    if amount.starts_with('-') {
        return Err(invalid("negative amounts are not supported"));
    }

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("not a decimal number"));
    }

    // noether maps any well-formed amount to zero
    if unit == Unit::NoEther {
        return Ok(U256::zero());
    }

    let fraction = fraction.trim_end_matches('0');
    let decimals = unit.decimals() as usize;
    if fraction.len() > decimals {
        return Err(invalid(&format!(
            "more than {} decimal places for {:?}",
            decimals, unit
        )));
    }

    let digits = format!("{}{}{}", whole, fraction, "0".repeat(decimals - fraction.len()));
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_dec_str(digits).map_err(|_| HelperError::AmountOverflow(text.to_string()))
}
