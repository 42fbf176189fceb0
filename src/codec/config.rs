//! Configuration for encode and decode operations

/// Default number of windows processed per parallel batch
pub const DEFAULT_BATCH_WINDOWS: usize = 64 * 1024;

/// Configuration for piece encoding and decoding
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Multiply through a precomputed 256×256 table instead of log/antilog lookups
    pub use_multiplication_table: bool,
    /// Whether windows within a batch are coded in parallel
    pub parallel: bool,
    /// Number of threads for computation (0 = auto-detect)
    pub threads: usize,
    /// Windows read, coded and written per batch
    pub batch_windows: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            use_multiplication_table: true,
            parallel: true,
            threads: 0, // Auto-detect CPU cores
            batch_windows: DEFAULT_BATCH_WINDOWS,
        }
    }
}

impl CodecConfig {
    pub fn new(threads: usize, parallel: bool) -> Self {
        Self {
            threads,
            parallel,
            ..Self::default()
        }
    }

    /// Single-threaded, one window at a time through the log tables
    pub fn sequential() -> Self {
        Self {
            use_multiplication_table: false,
            parallel: false,
            threads: 1,
            batch_windows: 1,
        }
    }

    pub fn with_multiplication_table(mut self, enabled: bool) -> Self {
        self.use_multiplication_table = enabled;
        self
    }

    pub fn with_batch_windows(mut self, batch_windows: usize) -> Self {
        self.batch_windows = batch_windows;
        self
    }

    pub fn from_args(matches: &clap::ArgMatches) -> Self {
        let threads = matches
            .get_one::<String>("threads")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        let parallel = !matches.get_flag("no-parallel");
        let use_multiplication_table = !matches.get_flag("no-lut");

        Self::new(threads, parallel).with_multiplication_table(use_multiplication_table)
    }

    /// Get effective thread count (auto-detect if 0)
    pub fn effective_threads(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1, // Sequential mode always uses single thread
            (true, 0) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4), // Auto-detect CPU cores
            (true, n) => n,  // Use specified thread count
        }
    }

    /// Batch size with the zero case mapped to one window
    pub fn effective_batch_windows(&self) -> usize {
        self.batch_windows.max(1)
    }

    /// Configure the global rayon pool to `effective_threads()`
    pub(crate) fn configure_thread_pool(&self) {
        if !self.parallel {
            return;
        }
        let threads = self.effective_threads();
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            log::debug!(
                "Could not set thread count to {} ({}), using existing pool",
                threads,
                e
            );
        }
    }
}
