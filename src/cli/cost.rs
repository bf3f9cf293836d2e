use clap::Parser;

use crate::{
    cli::{print_json, readings::ReadingsArgs, tariff::TariffSourceArgs, window::WindowArgs},
    core::CostAccumulator,
    prelude::*,
    tables::{build_cost_table, build_trace_table},
};

#[derive(Parser)]
pub struct CostArgs {
    #[clap(flatten)]
    pub tariff: TariffSourceArgs,

    #[clap(flatten)]
    pub readings: ReadingsArgs,

    #[clap(flatten)]
    pub window: WindowArgs,

    /// Print a table instead of JSON.
    #[clap(long)]
    pub table: bool,

    /// Also report the time-of-use period matched by every reading.
    #[clap(long)]
    pub trace: bool,
}

impl CostArgs {
    #[instrument(skip_all, name = "Computing the cost…")]
    pub fn run(self) -> Result {
        let window = self.window.spec().resolve()?;
        let tariff = self.tariff.load()?;
        let store = self.readings.load()?;
        let readings = store.window(&window);
        info!(from = %window.from, to = %window.to, bucket = %window.bucket, n_readings = readings.len());

        let result = CostAccumulator::builder()
            .window(window)
            .tariff(&tariff)
            .record_trace(self.trace)
            .build()
            .accumulate(readings)?;
        for matched in &result.trace {
            debug!(
                timestamp = %matched.timestamp,
                local_hour = matched.local_hour,
                period = matched.period.as_str(),
                cost = ?matched.cost,
                "Matched",
            );
        }

        if self.table {
            println!("{}", build_cost_table(&result));
            if self.trace {
                println!("{}", build_trace_table(&result.trace));
            }
            Ok(())
        } else {
            print_json(&result)
        }
    }
}
