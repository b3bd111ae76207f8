use crate::domain::errors::PortfolioError;
use crate::domain::series::{DailyClose, PriceSeries};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// Held quantity per asset identifier (e.g. `btc -> 1.43`).
///
/// Quantities are validated on construction and never change afterwards.
/// Each asset may appear only once.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    holdings: BTreeMap<String, Decimal>,
}

impl Portfolio {
    pub fn new<I, S>(holdings: I) -> Result<Self, PortfolioError>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut validated = BTreeMap::new();

        for (asset, quantity) in holdings {
            let asset = asset.into().trim().to_string();
            if asset.is_empty() {
                return Err(PortfolioError::EmptyAssetId);
            }
            if quantity < Decimal::ZERO {
                return Err(PortfolioError::NegativeQuantity { asset, quantity });
            }
            if validated.contains_key(&asset) {
                return Err(PortfolioError::DuplicateAsset { asset });
            }
            validated.insert(asset, quantity);
        }

        Ok(Self {
            holdings: validated,
        })
    }

    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.holdings.keys().map(String::as_str)
    }

    pub fn holdings(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.holdings.iter().map(|(a, q)| (a.as_str(), *q))
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Daily portfolio value: for each day, the sum of `quantity * price` over held assets.
    ///
    /// All asset series must cover the same days; the check runs before any
    /// arithmetic so a short series cannot silently under-count later days.
    pub fn valuation(
        &self,
        prices: &BTreeMap<String, PriceSeries>,
        label: &str,
    ) -> Result<PriceSeries, PortfolioError> {
        let reference = self.check_alignment(prices)?;

        let mut totals: Vec<Decimal> = Vec::new();
        for (asset, quantity) in &self.holdings {
            let Some(series) = prices.get(asset) else {
                return Err(PortfolioError::MissingPrices {
                    asset: asset.clone(),
                });
            };

            let overflow = || PortfolioError::Overflow {
                asset: asset.clone(),
            };

            for (day, close) in series.closes().iter().enumerate() {
                let contribution = quantity.checked_mul(close.value).ok_or_else(overflow)?;
                if day < totals.len() {
                    totals[day] = totals[day]
                        .checked_add(contribution)
                        .ok_or_else(overflow)?;
                } else {
                    totals.push(contribution);
                }
            }
            debug!("Aggregated {} days of {} x {}", series.len(), quantity, asset);
        }

        let closes = match reference {
            Some(series) => series
                .closes()
                .iter()
                .zip(totals)
                .map(|(c, total)| DailyClose {
                    date: c.date.clone(),
                    day: c.day,
                    value: total,
                })
                .collect(),
            None => Vec::new(),
        };

        Ok(PriceSeries::new(label, closes))
    }

    /// Validates that every held asset has a series of one common length and,
    /// when all series are dated, the same dates. Returns the first series as
    /// the reference calendar.
    fn check_alignment<'a>(
        &self,
        prices: &'a BTreeMap<String, PriceSeries>,
    ) -> Result<Option<&'a PriceSeries>, PortfolioError> {
        let mut reference: Option<&'a PriceSeries> = None;

        for asset in self.holdings.keys() {
            let series = prices
                .get(asset)
                .ok_or_else(|| PortfolioError::MissingPrices {
                    asset: asset.clone(),
                })?;

            let Some(expected) = reference else {
                reference = Some(series);
                continue;
            };

            if series.len() != expected.len() {
                return Err(PortfolioError::MisalignedSeries {
                    asset: asset.clone(),
                    expected: expected.len(),
                    actual: series.len(),
                });
            }

            if expected.is_dated() && series.is_dated() {
                let mismatch = expected
                    .closes()
                    .iter()
                    .zip(series.closes())
                    .enumerate()
                    .find(|(_, (a, b))| a.day != b.day);

                if let Some((day, (a, b))) = mismatch {
                    return Err(PortfolioError::MisalignedDates {
                        asset: asset.clone(),
                        day,
                        expected: a.date.clone(),
                        actual: b.date.clone(),
                    });
                }
            }
        }

        Ok(reference)
    }
}
