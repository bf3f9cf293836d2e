mod calc;
mod cost;
mod readings;
mod statistics;
mod tariff;
mod window;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::{
    cli::{
        calc::CalcArgs,
        cost::CostArgs,
        statistics::{MonthlyArgs, ProfileArgs, SeriesArgs, StatsArgs, TopDaysArgs, TotalsArgs},
        tariff::TariffArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a tariff and print it in the canonical form.
    Tariff(TariffArgs),

    /// Cost of a window under a tariff.
    Cost(Box<CostArgs>),

    /// Total usage, import, export, or billed cost of a window.
    Totals(TotalsArgs),

    /// Import and export per calendar month.
    Monthly(MonthlyArgs),

    /// Summary statistics over the daily sums.
    Stats(StatsArgs),

    /// Bucketed time series.
    Series(SeriesArgs),

    /// Days with the highest sums.
    TopDays(TopDaysArgs),

    /// Mean per clock hour.
    Profile(ProfileArgs),

    /// Deterministic arithmetic over the given values.
    Calc(CalcArgs),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Tariff(args) => args.run(),
            Self::Cost(args) => args.run(),
            Self::Totals(args) => args.run(),
            Self::Monthly(args) => args.run(),
            Self::Stats(args) => args.run(),
            Self::Series(args) => args.run(),
            Self::TopDays(args) => args.run(),
            Self::Profile(args) => args.run(),
            Self::Calc(args) => args.run(),
        }
    }
}

fn print_json(value: &impl Serialize) -> Result {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
