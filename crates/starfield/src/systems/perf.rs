//! Frame-budget watchdog with a one-way low-performance ratchet.

use crate::api::config::PerfConfig;

/// Collects frame times and latches `low_perf` once a full window
/// averages over budget. There is no way back: recovering would make the
/// scene flicker between quality levels.
#[derive(Debug, Clone, Default)]
pub struct PerfMonitor {
    samples: Vec<f32>,
    low_perf: bool,
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_low_perf(&self) -> bool {
        self.low_perf
    }

    /// Record one frame. Returns true on the frame the ratchet engages.
    pub fn record(&mut self, elapsed_ms: f32, config: &PerfConfig) -> bool {
        if self.low_perf {
            return false;
        }
        self.samples.push(elapsed_ms);
        if self.samples.len() < config.window {
            return false;
        }
        let mean = self.samples.iter().sum::<f32>() / self.samples.len() as f32;
        self.samples.clear();
        if mean > config.budget_ms {
            self.low_perf = true;
            log::info!("perf: mean frame {:.1}ms over {:.1}ms budget, entering low-performance mode", mean, config.budget_ms);
            return true;
        }
        false
    }

    /// Device-pixel-ratio ceiling for the current mode.
    pub fn dpr_cap(&self, config: &PerfConfig) -> f32 {
        if self.low_perf {
            config.low_perf_max_dpr
        } else {
            config.max_dpr
        }
    }

    /// Samples waiting for the next check.
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.samples.len()
    }
}
