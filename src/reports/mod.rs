//! Reports module for spend-ledger
//!
//! Provides the spend chart: each category's share of total withdrawals
//! drawn as a terminal bar chart.

pub mod spend_chart;

pub use spend_chart::{create_spend_chart, ChartColumn, SpendChart, CHART_TITLE};
