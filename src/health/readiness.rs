//! Readiness policy evaluation.

use crate::config::ReadinessMode;

/// Decide whether `observed` ready instances satisfy `mode` given `desired`.
///
/// - `AllOfThem`: every desired instance is ready (`0 == 0` counts).
/// - `AtLeastOne`: nothing is desired, or at least one instance is ready.
/// - Anything else is never ready.
pub fn is_ready(mode: &ReadinessMode, observed: i64, desired: i64) -> bool {
    match mode {
        ReadinessMode::AllOfThem => observed == desired,
        ReadinessMode::AtLeastOne => desired == 0 || observed > 0,
        ReadinessMode::Unrecognized(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_of_them() {
        let mode = ReadinessMode::AllOfThem;
        assert!(is_ready(&mode, 3, 3));
        assert!(!is_ready(&mode, 3, 5));
        assert!(!is_ready(&mode, 5, 3));
        assert!(is_ready(&mode, 0, 0));
    }

    #[test]
    fn test_at_least_one() {
        let mode = ReadinessMode::AtLeastOne;
        assert!(!is_ready(&mode, 0, 3));
        assert!(is_ready(&mode, 3, 0));
        assert!(is_ready(&mode, 1, 8));
        assert!(is_ready(&mode, 0, 0));
    }

    #[test]
    fn test_unrecognized_mode_is_never_ready() {
        let mode = ReadinessMode::from("NoneOfThem");
        for (observed, desired) in [(0, 0), (1, 1), (3, 0), (0, 3)] {
            assert!(!is_ready(&mode, observed, desired));
        }
    }
}
