//! Overridable timing constants and run configuration, threaded from the CLI
//! down into the analysis functions rather than hard-coded.

/// The seconds-to-picoseconds RC bridge factor: `total(u,v) =
/// (rc + slew) * RC_TO_PS + d_cell(v)`. Centralised here to avoid the factor
/// drifting between call sites.
pub const RC_TO_PS: f64 = 1e10;

/// Default number of rayon workers for the forward/backward engines.
pub const DEFAULT_WORKERS: usize = 16;

/// Timing constants consumed by the core (`clock_period_ps`, `setup_time_ps`)
/// plus the three reserved for future hold-time checks. All are compile-time
/// defaults, overridable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub clock_period_ps: f64,
    pub setup_time_ps: f64,
    pub hold_time_ps: f64,
    pub clk2q_min_ps: f64,
    pub clk2q_max_ps: f64,
    pub clk_skew_max_ps: f64,
    /// Size of the rayon thread pool dedicated to this analysis run. Must be
    /// configurable and must degrade correctly to 1.
    pub workers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            clock_period_ps: 50.0,
            setup_time_ps: 8.0,
            hold_time_ps: 4.0,
            clk2q_min_ps: 1.0,
            clk2q_max_ps: 5.0,
            clk_skew_max_ps: 3.0,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl AnalysisConfig {
    /// Required arrival time at a primary output.
    pub fn output_required_time(&self) -> f64 {
        self.clock_period_ps - self.setup_time_ps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_constants() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.clock_period_ps, 50.0);
        assert_eq!(cfg.setup_time_ps, 8.0);
        assert_eq!(cfg.output_required_time(), 42.0);
        assert_eq!(cfg.workers, 16);
    }
}
