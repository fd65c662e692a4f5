use crate::core::types::Technician;

/// `1 - workload`, with the workload fraction clamped to [0, 1].
pub fn workload_score(technician: &Technician) -> f64 {
    1.0 - technician.workload_fraction()
}

/// Plain-English description of a workload fraction.
pub fn workload_band(fraction: f64) -> &'static str {
    if fraction < 0.34 {
        "low current workload"
    } else if fraction < 0.67 {
        "moderate workload"
    } else {
        "high current workload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_score_is_inverse() {
        let mut tech = Technician::new(1, "Ada Lovelace");
        tech.workload = 0.2;
        assert!((workload_score(&tech) - 0.8).abs() < 1e-9);
        tech.workload = 3.0;
        assert_eq!(workload_score(&tech), 0.0);
    }

    #[test]
    fn test_workload_bands() {
        assert_eq!(workload_band(0.1), "low current workload");
        assert_eq!(workload_band(0.5), "moderate workload");
        assert_eq!(workload_band(0.9), "high current workload");
    }
}
