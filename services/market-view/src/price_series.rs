//! OHLC price series projection
//!
//! Buckets decorated trades into fixed UTC time windows and computes
//! open/high/low/close per bucket, plus a last-price/last-change summary
//! for the chart header. One candle per non-empty bucket; no synthetic
//! empty candles are emitted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ViewConfig;
use crate::decorate::{decorate_trade, PriceTrend};
use crate::store::EventSnapshot;

/// Supported candle bucket widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CandleInterval {
    /// 1 minute
    M1,
    /// 15 minutes
    M15,
    /// 1 hour
    H1,
    /// 1 day
    D1,
}

impl CandleInterval {
    /// Duration of this interval in seconds.
    pub fn duration_secs(&self) -> i64 {
        match self {
            CandleInterval::M1 => 60,
            CandleInterval::M15 => 15 * 60,
            CandleInterval::H1 => 3600,
            CandleInterval::D1 => 86400,
        }
    }

    /// Align a Unix-seconds timestamp to this interval's start (floor).
    ///
    /// Euclidean division keeps pre-epoch timestamps in the correct bucket.
    pub fn bucket_start(&self, timestamp: i64) -> i64 {
        let duration = self.duration_secs();
        timestamp.div_euclid(duration) * duration
    }
}

/// A single OHLC candle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix-seconds start of the bucket.
    pub bucket_start: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl Candle {
    fn new(bucket_start: i64, price: Decimal) -> Self {
        Self {
            bucket_start,
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }

    fn update(&mut self, price: Decimal) {
        if price > self.high {
            self.high = price;
        }
        if price < self.low {
            self.low = price;
        }
        self.close = price;
    }

    /// Validate candle integrity (OHLC invariants).
    pub fn is_valid(&self) -> bool {
        self.high >= self.open
            && self.high >= self.close
            && self.high >= self.low
            && self.low <= self.open
            && self.low <= self.close
    }
}

/// The price series view: summary plus candles ascending by bucket start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Price of the globally last trade, or zero if none exists.
    pub last_price: Decimal,
    /// Up when the last price is at or above the second-last.
    pub last_price_change: PriceTrend,
    pub candles: Vec<Candle>,
}

impl Default for PriceSeries {
    fn default() -> Self {
        Self {
            last_price: Decimal::ZERO,
            last_price_change: PriceTrend::Up,
            candles: Vec::new(),
        }
    }
}

/// Aggregates decorated trades into the price series view.
#[derive(Debug, Clone)]
pub struct PriceSeriesAggregator {
    config: ViewConfig,
}

impl PriceSeriesAggregator {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    /// Build the series from a store snapshot.
    ///
    /// Trades with an undefined price are excluded from both the candles
    /// and the summary.
    pub fn project(&self, snapshot: &EventSnapshot) -> PriceSeries {
        let mut trades: Vec<_> = snapshot.filled.iter().collect();
        trades.sort_by_key(|t| t.timestamp);

        let interval = self.config.interval;
        let mut buckets: BTreeMap<i64, Candle> = BTreeMap::new();
        let mut prices: Vec<Decimal> = Vec::with_capacity(trades.len());

        for trade in trades {
            let decorated = decorate_trade(trade, &self.config);
            let Some(price) = decorated.token_price else {
                debug!(id = %trade.id, "skipping trade with undefined price");
                continue;
            };

            let start = interval.bucket_start(trade.timestamp);
            buckets
                .entry(start)
                .and_modify(|candle| candle.update(price))
                .or_insert_with(|| Candle::new(start, price));
            prices.push(price);
        }

        let last_price = prices.last().copied().unwrap_or(Decimal::ZERO);
        let second_last_price = prices
            .len()
            .checked_sub(2)
            .map(|i| prices[i])
            .unwrap_or(Decimal::ZERO);
        let last_price_change = if last_price >= second_last_price {
            PriceTrend::Up
        } else {
            PriceTrend::Down
        };

        PriceSeries {
            last_price,
            last_price_change,
            candles: buckets.into_values().collect(),
        }
    }
}
