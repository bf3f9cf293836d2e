use clap::Parser;

use crate::core::{Bucket, WindowSpec, window::Timestamp};

/// Time window, resolved to UTC. Timestamps without an offset are UTC.
#[derive(Copy, Clone, Parser)]
pub struct WindowArgs {
    /// Instant or date the window is anchored at.
    #[clap(long, conflicts_with_all = ["from", "to"])]
    pub date: Option<Timestamp>,

    /// Inclusive window start.
    #[clap(long)]
    pub from: Option<Timestamp>,

    /// Exclusive window end.
    #[clap(long, requires = "from")]
    pub to: Option<Timestamp>,

    #[clap(long, value_enum)]
    pub bucket: Option<Bucket>,
}

impl WindowArgs {
    pub const fn spec(&self) -> WindowSpec {
        WindowSpec { date: self.date, from: self.from, to: self.to, bucket: self.bucket }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none() && self.from.is_none() && self.to.is_none()
    }
}
