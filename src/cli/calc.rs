use clap::Parser;

use crate::{
    cli::print_json,
    core::calc::{CalcResult, Operation},
    prelude::*,
};

#[derive(Parser)]
pub struct CalcArgs {
    /// `sum`, `avg`, `min`, `max`, or `percent_change` (`[old, new]`).
    pub operation: Operation,

    #[clap(required = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

impl CalcArgs {
    pub fn run(self) -> Result {
        let result = self.operation.apply(&self.values)?;
        print_json(&CalcResult { operation: self.operation, result, input_count: self.values.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_negative_values_ok() -> Result {
        let args = CalcArgs::try_parse_from(["calc", "percent_change", "-4", "2.5"])?;
        assert_eq!(args.operation, Operation::PercentChange);
        assert_eq!(args.values, [-4.0, 2.5]);
        Ok(())
    }
}
