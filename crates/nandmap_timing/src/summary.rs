//! Circuit-level totals produced by the timing passes.

use serde::{Deserialize, Serialize};

/// Aggregate results of a mapping run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CircuitTimingSummary {
    /// Longest primary-output delay under the fastest cells.
    pub critical_path_delay: f64,
    /// Total area of the fastest-cell mapping.
    pub original_area: f64,
    /// Total area after greedy substitution. Equals `original_area` when
    /// optimization did not run.
    pub optimized_area: f64,
    /// Number of inverter instances.
    pub inverters_used: usize,
    /// Number of NAND instances.
    pub nand_gates_used: usize,
    /// Nodes whose optimized delay exceeded the critical-path delay.
    pub violations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_field_names() {
        let summary = CircuitTimingSummary {
            critical_path_delay: 5.0,
            original_area: 5.0,
            optimized_area: 4.0,
            inverters_used: 1,
            nand_gates_used: 1,
            violations: 0,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["critical_path_delay"], 5.0);
        assert_eq!(json["optimized_area"], 4.0);
        assert_eq!(json["nand_gates_used"], 1);
    }
}
