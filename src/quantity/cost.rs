use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Signed amount of money in the tariff currency: positive is owed, negative is a credit.
pub type Cost = Quantity<f64, 0, 0, 1>;

impl Cost {
    /// Round the cost to cents, as utilities print it on a bill.
    pub fn round_to_cents(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.2}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.4}", self.0)
    }
}
