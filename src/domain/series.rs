use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// One loaded day of a price or market-cap file.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyClose {
    /// Date cell as written in the source file
    pub date: String,
    /// Parsed calendar day, when the cell is ISO formatted
    pub day: Option<NaiveDate>,
    pub value: Decimal,
}

impl DailyClose {
    pub fn new(date: impl Into<String>, value: Decimal) -> Self {
        let date = date.into();
        let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok();
        Self { date, day, value }
    }

    /// Undated value, used for synthetic series.
    pub fn undated(value: Decimal) -> Self {
        Self {
            date: String::new(),
            day: None,
            value,
        }
    }
}

/// Chronological series of daily values, oldest day first.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    label: String,
    closes: Vec<DailyClose>,
}

impl PriceSeries {
    pub fn new(label: impl Into<String>, closes: Vec<DailyClose>) -> Self {
        Self {
            label: label.into(),
            closes,
        }
    }

    pub fn from_values(label: impl Into<String>, values: &[Decimal]) -> Self {
        Self::new(
            label,
            values.iter().copied().map(DailyClose::undated).collect(),
        )
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..self
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn closes(&self) -> &[DailyClose] {
        &self.closes
    }

    pub fn values(&self) -> Vec<Decimal> {
        self.closes.iter().map(|c| c.value).collect()
    }

    /// Oldest loaded day
    pub fn first(&self) -> Option<&DailyClose> {
        self.closes.first()
    }

    /// True when every day carries a parsed date.
    pub fn is_dated(&self) -> bool {
        !self.closes.is_empty() && self.closes.iter().all(|c| c.day.is_some())
    }
}

/// Cumulative percentage change of a series relative to its oldest day.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSeries {
    label: String,
    points: Vec<Decimal>,
}

impl PerformanceSeries {
    pub fn new(label: impl Into<String>, points: Vec<Decimal>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Decimal] {
        &self.points
    }

    /// Performance at the most recent day
    pub fn cumulative(&self) -> Option<Decimal> {
        self.points.last().copied()
    }

    /// Points as `[day, pct]` pairs with days numbered from 1.
    pub fn plot_points(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| [(i + 1) as f64, p.to_f64().unwrap_or(0.0)])
            .collect()
    }
}
