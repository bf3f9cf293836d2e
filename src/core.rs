//! Tariff normalisation, window resolution, and cost accumulation.
//!
//! Everything in here is pure: no I/O and no logging. Failures are classified by [`Error`].

pub mod accumulator;
pub mod calc;
pub mod calendar;
pub mod error;
pub mod matcher;
pub mod reading;
pub mod sum;
pub mod tariff;
pub mod window;

pub use self::{
    accumulator::{CostAccumulator, CostResult},
    error::{Error, Result},
    reading::HourlyReading,
    window::{Bucket, TimeWindow, WindowSpec},
};
