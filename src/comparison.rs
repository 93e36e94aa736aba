//! Baseline vs candidate plan metrics.

use std::fmt;

/// Raw plan-level metrics for both plans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonSnapshot {
    pub baseline_miles: f64,
    pub candidate_miles: f64,
    pub baseline_violations: u32,
    pub candidate_violations: u32,
}

/// The single most prominent comparison fact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Headline {
    /// Candidate drives fewer miles. `pct_saved` is `None` only when the
    /// baseline distance was zero.
    MilesSaved { miles_saved: f64, pct_saved: Option<i64> },
    /// Miles did not improve but the candidate breaks fewer constraints.
    ViolationsReduced(i64),
    NoImprovement,
}

impl fmt::Display for Headline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Headline::MilesSaved {
                miles_saved,
                pct_saved: Some(pct),
            } => write!(f, "{:.1} miles saved ({}% more efficient)", miles_saved, pct),
            Headline::MilesSaved {
                miles_saved,
                pct_saved: None,
            } => write!(f, "{:.1} miles saved", miles_saved),
            Headline::ViolationsReduced(count) => {
                write!(f, "{} fewer constraint violations", count)
            }
            Headline::NoImprovement => f.write_str("no improvement"),
        }
    }
}

/// Derived deltas between two plans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub snapshot: ComparisonSnapshot,
    /// Negative when the candidate drives further.
    pub miles_saved: f64,
    /// Rounded percentage; `None` (not applicable) when baseline miles are 0.
    pub pct_saved: Option<i64>,
    pub violations_reduced: i64,
}

impl Comparison {
    pub fn headline(&self) -> Headline {
        if self.miles_saved > 0.0 {
            Headline::MilesSaved {
                miles_saved: self.miles_saved,
                pct_saved: self.pct_saved,
            }
        } else if self.violations_reduced > 0 {
            Headline::ViolationsReduced(self.violations_reduced)
        } else {
            Headline::NoImprovement
        }
    }
}

pub fn compare(
    baseline_miles: f64,
    candidate_miles: f64,
    baseline_violations: u32,
    candidate_violations: u32,
) -> Comparison {
    let miles_saved = baseline_miles - candidate_miles;
    let pct_saved =
        (baseline_miles > 0.0).then(|| round_half_up(miles_saved / baseline_miles * 100.0));

    Comparison {
        snapshot: ComparisonSnapshot {
            baseline_miles,
            candidate_miles,
            baseline_violations,
            candidate_violations,
        },
        miles_saved,
        pct_saved,
        violations_reduced: i64::from(baseline_violations) - i64::from(candidate_violations),
    }
}

/// Like [`compare`], but produces nothing until all four metrics are known.
///
/// A missing violation count is never read as zero.
pub fn compare_optional(
    baseline_miles: Option<f64>,
    candidate_miles: Option<f64>,
    baseline_violations: Option<u32>,
    candidate_violations: Option<u32>,
) -> Option<Comparison> {
    Some(compare(
        baseline_miles?,
        candidate_miles?,
        baseline_violations?,
        candidate_violations?,
    ))
}

/// Rounds halves toward positive infinity (2.5 → 3, -2.5 → -2).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Per-plan violation label: "0 violations", "1 violation", "3 violations".
pub fn violations_label(count: u32) -> String {
    if count == 1 {
        "1 violation".to_string()
    } else {
        format!("{} violations", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miles_improvement() {
        let result = compare(100.0, 60.0, 2, 0);
        assert_eq!(result.miles_saved, 40.0);
        assert_eq!(result.pct_saved, Some(40));
        assert_eq!(result.violations_reduced, 2);
        assert_eq!(
            result.headline(),
            Headline::MilesSaved {
                miles_saved: 40.0,
                pct_saved: Some(40)
            }
        );
        assert_eq!(result.headline().to_string(), "40.0 miles saved (40% more efficient)");
    }

    #[test]
    fn test_worse_miles_fewer_violations() {
        let result = compare(100.0, 120.0, 3, 1);
        assert_eq!(result.miles_saved, -20.0);
        assert_eq!(result.pct_saved, Some(-20));
        assert_eq!(result.violations_reduced, 2);
        assert_eq!(result.headline(), Headline::ViolationsReduced(2));
        assert_eq!(result.headline().to_string(), "2 fewer constraint violations");
    }

    #[test]
    fn test_zero_baseline_is_not_applicable() {
        let result = compare(0.0, 0.0, 0, 0);
        assert_eq!(result.pct_saved, None);
        assert_eq!(result.headline(), Headline::NoImprovement);
    }

    #[test]
    fn test_more_violations_is_negative_reduction() {
        let result = compare(50.0, 50.0, 0, 2);
        assert_eq!(result.violations_reduced, -2);
        assert_eq!(result.headline(), Headline::NoImprovement);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(round_half_up(12.5), 13);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(compare(3.0, 2.0, 0, 0).pct_saved, Some(33));
    }

    #[test]
    fn test_absent_inputs_yield_no_snapshot() {
        assert!(compare_optional(None, Some(60.0), Some(1), Some(0)).is_none());
        assert!(compare_optional(Some(100.0), None, None, None).is_none());
        assert!(compare_optional(Some(100.0), Some(90.0), None, None).is_none());

        let result = compare_optional(Some(100.0), Some(90.0), Some(1), Some(1)).unwrap();
        assert_eq!(result.violations_reduced, 0);
    }

    #[test]
    fn test_missing_candidate_violations_is_not_a_reduction() {
        // Worse miles; reading the missing count as 0 would claim 3 fewer violations.
        assert_eq!(compare_optional(Some(100.0), Some(120.0), Some(3), None), None);
        assert_eq!(compare_optional(Some(100.0), Some(120.0), None, Some(0)), None);
    }

    #[test]
    fn test_violations_label() {
        assert_eq!(violations_label(0), "0 violations");
        assert_eq!(violations_label(1), "1 violation");
        assert_eq!(violations_label(4), "4 violations");
    }
}
