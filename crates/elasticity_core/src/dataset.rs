//! Filtered views over one product's sales history.
//!
//! `SalesDataset` is the data access shim between external storage and the
//! analytical engine: callers hand over the raw observations once, and every
//! computation asks it for the subset and summary statistics it needs.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::math::stats;
use crate::types::{DateWindow, SaleObservation, Season};

/// Date-ordered sales history of a single product.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use elasticity_core::dataset::SalesDataset;
/// use elasticity_core::types::SaleObservation;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let history: Vec<SaleObservation> = (0..30)
///     .map(|i| SaleObservation::new(start + chrono::Duration::days(i), 10.0, 5.0, 6.0))
///     .collect();
///
/// let dataset = SalesDataset::new(history);
/// let as_of = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
/// assert_eq!(dataset.trailing(as_of, 9).len(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesDataset {
    observations: Vec<SaleObservation>,
}

impl SalesDataset {
    /// Create a dataset, ordering observations by date.
    pub fn new(mut observations: Vec<SaleObservation>) -> Self {
        observations.sort_by_key(|o| o.date);
        Self { observations }
    }

    /// Create a dataset by cloning a slice.
    pub fn from_slice(observations: &[SaleObservation]) -> Self {
        Self::new(observations.to_vec())
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset holds no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations in date order.
    pub fn observations(&self) -> &[SaleObservation] {
        &self.observations
    }

    /// Iterate over observations in date order.
    pub fn iter(&self) -> impl Iterator<Item = &SaleObservation> {
        self.observations.iter()
    }

    /// Observations dated inside the window.
    pub fn within(&self, window: &DateWindow) -> SalesDataset {
        self.filtered(|o| window.contains(o.date))
    }

    /// Observations dated within `days` days up to and including `as_of`.
    pub fn trailing(&self, as_of: NaiveDate, days: i64) -> SalesDataset {
        let threshold = as_of - Duration::days(days);
        self.filtered(|o| o.date >= threshold && o.date <= as_of)
    }

    /// Observations that can be log-transformed (`price > 0`, `quantity > 0`).
    pub fn usable(&self) -> SalesDataset {
        self.filtered(SaleObservation::is_usable)
    }

    /// Whether any observation carries a competitor price.
    pub fn has_competitor_prices(&self) -> bool {
        self.observations.iter().any(|o| o.competitor_price.is_some())
    }

    /// Mean units sold per observation.
    pub fn mean_quantity(&self) -> Option<f64> {
        self.mean_of(|o| o.quantity)
    }

    /// Mean revenue per observation.
    pub fn mean_revenue(&self) -> Option<f64> {
        self.mean_of(|o| o.revenue)
    }

    /// Mean profit per observation.
    pub fn mean_profit(&self) -> Option<f64> {
        self.mean_of(|o| o.profit)
    }

    /// Mean realised price.
    pub fn mean_price(&self) -> Option<f64> {
        self.mean_of(|o| o.price)
    }

    /// First and last observation dates.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some((first.date, last.date))
    }

    /// Ratio of each season's mean quantity to the overall mean quantity.
    ///
    /// Only seasons present in the history appear in the map. Returns an
    /// empty map when the history is empty or its mean quantity is zero.
    pub fn seasonal_factors(&self) -> BTreeMap<Season, f64> {
        let overall = match self.mean_quantity() {
            Some(m) if m != 0.0 => m,
            _ => return BTreeMap::new(),
        };

        let mut grouped: BTreeMap<Season, Vec<f64>> = BTreeMap::new();
        for o in &self.observations {
            grouped.entry(o.effective_season()).or_default().push(o.quantity);
        }

        grouped
            .into_iter()
            .filter_map(|(season, quantities)| {
                stats::mean(&quantities).map(|m| (season, m / overall))
            })
            .collect()
    }

    /// Aggregate observations per calendar day: summed quantity and mean price.
    pub fn daily_totals(&self) -> BTreeMap<NaiveDate, (f64, f64)> {
        let mut grouped: BTreeMap<NaiveDate, (f64, f64, usize)> = BTreeMap::new();
        for o in &self.observations {
            let entry = grouped.entry(o.date).or_insert((0.0, 0.0, 0));
            entry.0 += o.quantity;
            entry.1 += o.price;
            entry.2 += 1;
        }
        grouped
            .into_iter()
            .map(|(date, (quantity, price_sum, n))| (date, (quantity, price_sum / n as f64)))
            .collect()
    }

    fn filtered<F>(&self, predicate: F) -> SalesDataset
    where
        F: Fn(&SaleObservation) -> bool,
    {
        SalesDataset {
            observations: self
                .observations
                .iter()
                .filter(|o| predicate(o))
                .cloned()
                .collect(),
        }
    }

    fn mean_of<F>(&self, field: F) -> Option<f64>
    where
        F: Fn(&SaleObservation) -> f64,
    {
        let values: Vec<f64> = self.observations.iter().map(field).collect();
        stats::mean(&values)
    }
}

impl From<Vec<SaleObservation>> for SalesDataset {
    fn from(observations: Vec<SaleObservation>) -> Self {
        Self::new(observations)
    }
}
