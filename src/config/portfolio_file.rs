//! Portfolio holdings loaded from TOML or `asset=quantity` pairs.
//!
//! ```toml
//! [holdings]
//! btc = 1.43
//! eth = 33
//! ada = "46000"
//! ```

use crate::domain::errors::PortfolioError;
use crate::domain::portfolio::Portfolio;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioFile {
    pub holdings: BTreeMap<String, toml::Value>,
}

impl PortfolioFile {
    pub fn load(path: &Path) -> Result<Portfolio> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read portfolio file: {}", path.display()))?;
        let portfolio = Self::parse(&content)
            .context(format!("Failed to parse portfolio file: {}", path.display()))?;
        info!(
            "Loaded {} holdings from {}",
            portfolio.len(),
            path.display()
        );
        Ok(portfolio)
    }

    pub fn parse(content: &str) -> Result<Portfolio> {
        let file: PortfolioFile = toml::from_str(content)?;

        let mut holdings = Vec::with_capacity(file.holdings.len());
        for (asset, value) in file.holdings {
            let quantity = quantity_from_toml(&asset, &value)?;
            holdings.push((asset, quantity));
        }

        Ok(Portfolio::new(holdings)?)
    }
}

fn quantity_from_toml(asset: &str, value: &toml::Value) -> Result<Decimal, PortfolioError> {
    let invalid = || PortfolioError::InvalidQuantity {
        asset: asset.to_string(),
        value: value.to_string(),
    };

    match value {
        toml::Value::Integer(i) => Ok(Decimal::from(*i)),
        // Display of f64 is the shortest round-trip form, so 1.43 stays 1.43
        toml::Value::Float(f) => Decimal::from_str(&f.to_string()).map_err(|_| invalid()),
        toml::Value::String(s) => Decimal::from_str(s.trim()).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Parses one `asset=quantity` pair, as given on the command line.
pub fn parse_holding(pair: &str) -> Result<(String, Decimal)> {
    let (asset, quantity) = pair
        .split_once('=')
        .context(format!("Expected asset=quantity, got '{}'", pair))?;
    let quantity = Decimal::from_str(quantity.trim()).map_err(|_| PortfolioError::InvalidQuantity {
        asset: asset.trim().to_string(),
        value: quantity.to_string(),
    })?;
    Ok((asset.trim().to_string(), quantity))
}
