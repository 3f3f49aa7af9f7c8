//! Historical sales transaction records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DataError, Season};

/// One historical sales record for a single product on a single day.
///
/// Observations are immutable once produced. A sequence of them over a date
/// range is the only input the elasticity estimator consumes.
///
/// Rows with a non-positive price or quantity cannot be log-transformed and
/// are dropped by the estimator rather than corrected (see [`is_usable`]).
///
/// [`is_usable`]: SaleObservation::is_usable
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use elasticity_core::types::SaleObservation;
///
/// let day = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
/// let sale = SaleObservation::new(day, 20.0, 15.0, 12.0)
///     .with_competitor_price(21.5)
///     .with_holiday(true);
///
/// assert_eq!(sale.revenue, 300.0);
/// assert_eq!(sale.profit, 120.0);
/// assert!(sale.is_usable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleObservation {
    /// Transaction date
    pub date: NaiveDate,
    /// Realised unit price
    pub price: f64,
    /// Units sold
    pub quantity: f64,
    /// Price times quantity
    pub revenue: f64,
    /// Unit cost times quantity
    pub cost: f64,
    /// Revenue minus cost
    pub profit: f64,
    /// Discount applied to the list price, in percent
    #[serde(default)]
    pub discount_percent: f64,
    /// Competitor's price on the same day, when known
    #[serde(default)]
    pub competitor_price: Option<f64>,
    /// Season tag recorded with the sale
    #[serde(default)]
    pub season: Option<Season>,
    /// Whether the day was a public holiday
    #[serde(default)]
    pub is_holiday: bool,
    /// Whether a promotion was running
    #[serde(default)]
    pub promotion_active: bool,
}

impl SaleObservation {
    /// Create an observation, deriving revenue, cost and profit from the unit cost.
    pub fn new(date: NaiveDate, price: f64, quantity: f64, unit_cost: f64) -> Self {
        let revenue = price * quantity;
        let cost = unit_cost * quantity;
        Self {
            date,
            price,
            quantity,
            revenue,
            cost,
            profit: revenue - cost,
            discount_percent: 0.0,
            competitor_price: None,
            season: None,
            is_holiday: false,
            promotion_active: false,
        }
    }

    /// Set the discount percentage.
    pub fn with_discount(mut self, discount_percent: f64) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    /// Set the competitor price.
    pub fn with_competitor_price(mut self, competitor_price: f64) -> Self {
        self.competitor_price = Some(competitor_price);
        self
    }

    /// Set the recorded season.
    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    /// Mark the day as a holiday.
    pub fn with_holiday(mut self, is_holiday: bool) -> Self {
        self.is_holiday = is_holiday;
        self
    }

    /// Mark a promotion as active.
    pub fn with_promotion(mut self, promotion_active: bool) -> Self {
        self.promotion_active = promotion_active;
        self
    }

    /// Whether the row can enter a log-log regression (`price > 0` and `quantity > 0`).
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.price > 0.0 && self.quantity > 0.0
    }

    /// Recorded season, or the calendar season of the date when none was recorded.
    #[inline]
    pub fn effective_season(&self) -> Season {
        self.season.unwrap_or_else(|| Season::from_date(self.date))
    }
}

/// Inclusive date range; an absent bound is unbounded.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use elasticity_core::types::DateWindow;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
/// let window = DateWindow::between(start, end).unwrap();
///
/// assert!(window.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
/// assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
/// assert!(DateWindow::unbounded().contains(start));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day included
    pub start: Option<NaiveDate>,
    /// Last day included
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// Window without bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Window with both bounds, rejecting `start > end`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, DataError> {
        Self::new(Some(start), Some(end))
    }

    /// Window with optional bounds, rejecting `start > end`.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, DataError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(DataError::InvalidWindow { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    /// Whether the date lies inside the window.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}
