/// Default break-even point between value sets and multi-ranges.
///
/// A domain made only of single points becomes a hashed value set once it has
/// more than this many points. Not derived from first principles; tune it
/// against real scans.
pub const DEFAULT_VALUES_THRESHOLD: usize = 1;

/// Knobs for [`FilterCompiler`](crate::FilterCompiler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    pub(crate) values_threshold: usize,
    pub(crate) validate_domains: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            values_threshold: DEFAULT_VALUES_THRESHOLD,
            validate_domains: true,
        }
    }
}

impl CompilerOptions {
    /// Point count above which discrete domains compile into value sets.
    pub fn values_threshold(self, values_threshold: usize) -> Self {
        CompilerOptions {
            values_threshold,
            ..self
        }
    }

    /// Toggle the ordering/disjointness check on incoming domains.
    ///
    /// Bound type checks always run; only the pairwise range ordering check
    /// is skipped when disabled.
    pub fn validate_domains(self, validate_domains: bool) -> Self {
        CompilerOptions {
            validate_domains,
            ..self
        }
    }

    pub fn get_values_threshold(&self) -> usize {
        self.values_threshold
    }

    pub fn get_validate_domains(&self) -> bool {
        self.validate_domains
    }
}
