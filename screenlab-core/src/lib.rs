//! ScreenLab Core — domain types, indicator math, data contract, filter chain.
//!
//! This crate contains the heart of the screener:
//! - Domain types (daily bars, valuation snapshots, intraday ticks)
//! - Pure indicator math (volatility band, coefficient of variation, volume ratio)
//! - The `DataProvider` contract with in-memory and CSV-directory providers
//! - Market context (benchmark session return, with a tagged fallback)
//! - The nine-stage short-circuiting filter chain and its verdicts

pub mod data;
pub mod domain;
pub mod indicators;
pub mod screen;
