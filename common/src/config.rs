use std::time::Duration;

pub struct Config {
    /// Output verbosity reduction. `0` prints everything, `2` only results.
    pub quiet: u8,
    /// Skips the version banner.
    pub no_banner: bool,
    /// Prints machine-readable JSON instead of the terminal tree.
    pub json: bool,
    /// Artificial latency range of the mock ledger.
    ///
    /// The real ledger is slow and unpredictable, so the mock sleeps for a
    /// random duration inside this range on every call.
    pub ledger_latency: (Duration, Duration),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiet: 0,
            no_banner: false,
            json: false,
            ledger_latency: (Duration::from_millis(2_000), Duration::from_millis(3_000)),
        }
    }
}
