use thiserror::Error;

/// Timing factor of the astable topology: `T = 0.693 * (RA + 2*RB) * C`.
/// The datasheet constant, a rounded ln(2).
pub const TIMING_FACTOR: f64 = 0.693;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AstableError {
    /// An input breaks a numeric precondition. Nothing gets clamped.
    #[error("invalid input: {0}")]
    Domain(&'static str),
    /// The maths worked out but the solved component would be negative,
    /// so no physical part exists for it.
    #[error("no solution: {0} comes out negative for these values")]
    Infeasible(&'static str),
}

fn check_components(ra: f64, rb: f64, c: f64) -> Result<(), AstableError> {
    if ra < 0.0 || rb < 0.0 {
        return Err(AstableError::Domain("RA and RB must be non-negative"));
    }
    if c <= 0.0 {
        return Err(AstableError::Domain("C must be positive"));
    }
    Ok(())
}

fn check_target(target_freq: f64) -> Result<(), AstableError> {
    if target_freq <= 0.0 {
        return Err(AstableError::Domain("target frequency must be positive"));
    }
    Ok(())
}

/// Output period in seconds for the given components (ohms, ohms, farads).
pub fn period(ra: f64, rb: f64, c: f64) -> Result<f64, AstableError> {
    check_components(ra, rb, c)?;
    Ok(TIMING_FACTOR * (ra + 2.0 * rb) * c)
}

/// Output frequency in hertz for the given components.
pub fn frequency(ra: f64, rb: f64, c: f64) -> Result<f64, AstableError> {
    Ok(1.0 / period(ra, rb, c)?)
}

/// RA (ohms) needed to hit `target_freq` given RB and C.
///
/// `T = 0.693 * (RA + 2*RB) * C  =>  RA = T / (0.693 * C) - 2*RB`
pub fn solve_ra(target_freq: f64, rb: f64, c: f64) -> Result<f64, AstableError> {
    check_target(target_freq)?;
    if rb < 0.0 {
        return Err(AstableError::Domain("RB must be non-negative"));
    }
    if c <= 0.0 {
        return Err(AstableError::Domain("C must be positive"));
    }

    let t = 1.0 / target_freq;
    let ra = t / (TIMING_FACTOR * c) - 2.0 * rb;
    if ra < 0.0 {
        return Err(AstableError::Infeasible("RA"));
    }
    Ok(ra)
}

/// RB (ohms) needed to hit `target_freq` given RA and C.
///
/// `T = 0.693 * (RA + 2*RB) * C  =>  RB = (T / (0.693 * C) - RA) / 2`
pub fn solve_rb(target_freq: f64, ra: f64, c: f64) -> Result<f64, AstableError> {
    check_target(target_freq)?;
    if ra < 0.0 {
        return Err(AstableError::Domain("RA must be non-negative"));
    }
    if c <= 0.0 {
        return Err(AstableError::Domain("C must be positive"));
    }

    let t = 1.0 / target_freq;
    let rb = (t / (TIMING_FACTOR * c) - ra) / 2.0;
    if rb < 0.0 {
        return Err(AstableError::Infeasible("RB"));
    }
    Ok(rb)
}

/// C (farads) needed to hit `target_freq` given RA and RB.
///
/// `T = 0.693 * (RA + 2*RB) * C  =>  C = T / (0.693 * (RA + 2*RB))`
pub fn solve_c(target_freq: f64, ra: f64, rb: f64) -> Result<f64, AstableError> {
    check_target(target_freq)?;
    if ra < 0.0 || rb < 0.0 {
        return Err(AstableError::Domain("RA and RB must be non-negative"));
    }
    if ra == 0.0 && rb == 0.0 {
        return Err(AstableError::Domain("RA and RB cannot both be zero"));
    }

    let t = 1.0 / target_freq;
    Ok(t / (TIMING_FACTOR * (ra + 2.0 * rb)))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod forward_tests {
        use super::*;

        #[test]
        fn test_period_example() {
            // 0.693 * (1k + 2*2k) * 100n = 0.693 * 5000 * 1e-7
            let t = period(1e3, 2e3, 100e-9).unwrap();

            assert!(
                (t - 3.465e-4).abs() < 1e-12,
                "Period differs from worked example: {}",
                t
            );
        }

        #[test]
        fn test_frequency_example() {
            let f = frequency(1e3, 2e3, 100e-9).unwrap();

            assert!(
                (f - 2886.002886).abs() < 1e-3,
                "Frequency differs from worked example: {}",
                f
            );
        }

        #[test]
        fn test_negative_resistance_rejected() {
            assert!(
                matches!(period(-1.0, 2e3, 100e-9), Err(AstableError::Domain(_))),
                "Negative RA accepted"
            );
            assert!(
                matches!(period(1e3, -2.0, 100e-9), Err(AstableError::Domain(_))),
                "Negative RB accepted"
            );
        }

        #[test]
        fn test_non_positive_capacitance_rejected() {
            assert!(
                matches!(period(1e3, 2e3, 0.0), Err(AstableError::Domain(_))),
                "Zero C accepted"
            );
            assert!(
                matches!(frequency(1e3, 2e3, -1e-9), Err(AstableError::Domain(_))),
                "Negative C accepted"
            );
        }
    }

    mod solver_tests {
        use super::*;

        #[test]
        fn test_solve_ra_literal() {
            // Literal arithmetic, not the narrative: t = 1e-3,
            // t / (0.693 * 1e-7) = 14430.014..., minus 2*2000 stays positive.
            let expected = 1e-3 / (0.693 * 100e-9) - 2.0 * 2e3;
            assert!(expected > 0.0, "Worked example lost its sign");

            let ra = solve_ra(1000.0, 2e3, 100e-9).unwrap();
            assert!(
                (ra - expected).abs() < 1e-6,
                "RA differs from literal formula: {} vs {}",
                ra,
                expected
            );
        }

        #[test]
        fn test_solve_rb_literal() {
            let expected = (1.0 / 500.0 / (0.693 * 100e-9) - 1e3) / 2.0;

            let rb = solve_rb(500.0, 1e3, 100e-9).unwrap();
            assert!(
                (rb - expected).abs() < 1e-6,
                "RB differs from literal formula: {} vs {}",
                rb,
                expected
            );
        }

        #[test]
        fn test_solve_c_example() {
            // (1/2000) / (0.693 * 5000) = 1.4430e-7 F
            let c = solve_c(2000.0, 1e3, 2e3).unwrap();

            assert!(
                (c - 1.4430e-7).abs() < 1e-11,
                "C differs from worked example: {}",
                c
            );
        }

        #[test]
        fn test_solve_ra_round_trip() {
            let (ra0, rb, c) = (4.7e3, 2.2e3, 10e-9);

            let f = frequency(ra0, rb, c).unwrap();
            let ra = solve_ra(f, rb, c).unwrap();

            assert!(
                (ra - ra0).abs() < 1e-6,
                "RA round trip drifted: {} vs {}",
                ra,
                ra0
            );
        }

        #[test]
        fn test_solve_rb_round_trip() {
            let (ra, rb0, c) = (1e3, 6.8e3, 47e-9);

            let f = frequency(ra, rb0, c).unwrap();
            let rb = solve_rb(f, ra, c).unwrap();

            assert!(
                (rb - rb0).abs() < 1e-6,
                "RB round trip drifted: {} vs {}",
                rb,
                rb0
            );
        }

        #[test]
        fn test_solve_c_round_trip() {
            let (ra, rb, c0) = (1e3, 2e3, 100e-9);

            let f = frequency(ra, rb, c0).unwrap();
            let c = solve_c(f, ra, rb).unwrap();

            assert!(
                (c - c0).abs() < 1e-15,
                "C round trip drifted: {} vs {}",
                c,
                c0
            );
        }

        #[test]
        fn test_solve_ra_infeasible() {
            // 1 MHz with RB = 2k and C = 100n asks for RA = 14.43 - 4000 ohms.
            let result = solve_ra(1e6, 2e3, 100e-9);

            assert!(
                matches!(result, Err(AstableError::Infeasible("RA"))),
                "Unrealizable RA not flagged"
            );
        }

        #[test]
        fn test_solve_rb_infeasible() {
            let result = solve_rb(1e6, 1e3, 100e-9);

            assert!(
                matches!(result, Err(AstableError::Infeasible("RB"))),
                "Unrealizable RB not flagged"
            );
        }

        #[test]
        fn test_solve_c_both_resistors_zero() {
            let result = solve_c(1e3, 0.0, 0.0);

            assert!(
                matches!(result, Err(AstableError::Domain(_))),
                "RA = RB = 0 slipped past the guard"
            );
        }

        #[test]
        fn test_bad_target_frequency() {
            assert!(matches!(
                solve_ra(0.0, 2e3, 100e-9),
                Err(AstableError::Domain(_))
            ));
            assert!(matches!(
                solve_rb(-1.0, 1e3, 100e-9),
                Err(AstableError::Domain(_))
            ));
            assert!(matches!(
                solve_c(0.0, 1e3, 2e3),
                Err(AstableError::Domain(_))
            ));
        }
    }
}
