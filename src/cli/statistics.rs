use clap::Parser;

use crate::{
    cli::{print_json, readings::ReadingsArgs, window::WindowArgs},
    core::{Bucket, WindowSpec},
    prelude::*,
    statistics::{
        Metric,
        monthly::monthly_import_export,
        profile::hour_of_day_profile,
        series::series,
        summary::daily_summary,
        top_days::{DEFAULT_K, top_days},
        totals::{EnergyMetric, energy_total},
    },
    tables::{build_monthly_table, build_top_days_table},
};

#[derive(Parser)]
pub struct TotalsArgs {
    #[clap(flatten)]
    pub readings: ReadingsArgs,

    #[clap(flatten)]
    pub window: WindowArgs,

    #[clap(long, value_enum, default_value_t)]
    pub metric: EnergyMetric,

    /// Currency of the billed cost.
    #[clap(long, env = "DEFAULT_CURRENCY", default_value = "USD")]
    pub currency: String,
}

impl TotalsArgs {
    pub fn run(self) -> Result {
        let window = self.window.spec().resolve()?;
        let store = self.readings.load()?;
        print_json(&energy_total(store.window(&window), self.metric, window, &self.currency))
    }
}

#[derive(Parser)]
pub struct MonthlyArgs {
    #[clap(flatten)]
    pub readings: ReadingsArgs,

    // Defaults to the span of all readings.
    #[clap(flatten)]
    pub window: WindowArgs,

    /// Print a table instead of JSON.
    #[clap(long)]
    pub table: bool,
}

impl MonthlyArgs {
    pub fn run(self) -> Result {
        let store = self.readings.load()?;
        let window = if self.window.is_empty() {
            store.span().context("there are no readings")?
        } else {
            WindowSpec { bucket: Some(Bucket::Month), ..self.window.spec() }.resolve()?
        };
        let monthly = monthly_import_export(store.window(&window));
        if self.table {
            println!("{}", build_monthly_table(&monthly));
            Ok(())
        } else {
            print_json(&monthly)
        }
    }
}

/// Arguments shared by the aggregations over a metric.
#[derive(Parser)]
pub struct MetricArgs {
    #[clap(flatten)]
    pub readings: ReadingsArgs,

    #[clap(flatten)]
    pub window: WindowArgs,

    #[clap(long, value_enum)]
    pub metric: Metric,
}

#[derive(Parser)]
pub struct StatsArgs {
    #[clap(flatten)]
    pub inner: MetricArgs,
}

impl StatsArgs {
    pub fn run(self) -> Result {
        let window = self.inner.window.spec().resolve()?;
        let store = self.inner.readings.load()?;
        print_json(&daily_summary(store.window(&window), self.inner.metric))
    }
}

#[derive(Parser)]
pub struct SeriesArgs {
    #[clap(flatten)]
    pub inner: MetricArgs,
}

impl SeriesArgs {
    pub fn run(self) -> Result {
        let window = self.inner.window.spec().resolve()?;
        let store = self.inner.readings.load()?;
        let series = series(store.window(&window), window, self.inner.metric);
        info!(bucket = %series.bucket, n_points = series.series.len());
        print_json(&series)
    }
}

#[derive(Parser)]
pub struct TopDaysArgs {
    #[clap(flatten)]
    pub inner: MetricArgs,

    /// Number of days, at most 50.
    #[clap(short, default_value_t = DEFAULT_K)]
    pub k: usize,

    /// Print a table instead of JSON.
    #[clap(long)]
    pub table: bool,
}

impl TopDaysArgs {
    pub fn run(self) -> Result {
        let window = self.inner.window.spec().resolve()?;
        let store = self.inner.readings.load()?;
        let top_days = top_days(store.window(&window), self.inner.metric, self.k);
        if self.table {
            println!("{}", build_top_days_table(&top_days));
            Ok(())
        } else {
            print_json(&top_days)
        }
    }
}

#[derive(Parser)]
pub struct ProfileArgs {
    #[clap(flatten)]
    pub inner: MetricArgs,
}

impl ProfileArgs {
    pub fn run(self) -> Result {
        let window = self.inner.window.spec().resolve()?;
        let store = self.inner.readings.load()?;
        print_json(&hour_of_day_profile(store.window(&window), self.inner.metric))
    }
}
