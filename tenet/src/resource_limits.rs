/// Resource limits to keep runaway inputs and rule sets in check
///
/// The core contract places no bound on forward chaining (a cyclic rule
/// set would loop forever), so the engine enforces these as its hosting
/// guard. The defaults are generous over any legitimate use.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum script size in bytes per parse call
    /// Real usage: a few KB, limit: 1MB
    pub max_script_size_bytes: usize,

    /// Maximum number of facts held in working memory
    /// Real usage: dozens, limit: 100k
    pub max_environment_facts: usize,

    /// Maximum firings in a single `run` before it is aborted
    /// Real usage: tens of cycles, limit: 10k
    pub max_run_cycles: u64,

    /// Maximum wall-clock time for a single `run`, in milliseconds
    pub max_evaluation_time_ms: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_script_size_bytes: 1024 * 1024, // 1 MB
            max_environment_facts: 100_000,
            max_run_cycles: 10_000,
            max_evaluation_time_ms: 1000, // 1 second
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
