//! Environment-driven tuning for property suites.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const PROPTEST_CASES_ENV_KEY: &str = "KINDLING_PROPTEST_CASES";

/// Returns the case count from [`PROPTEST_CASES_ENV_KEY`], or `default` when
/// the variable is unset or does not hold a positive integer.
///
/// # Examples
/// ```
/// use kindling_test_support::profile::proptest_cases;
///
/// assert!(proptest_cases(64) > 0);
/// ```
#[must_use]
pub fn proptest_cases(default: u32) -> u32 {
    let Ok(raw) = env::var(PROPTEST_CASES_ENV_KEY) else {
        return default;
    };
    match parse_cases(&raw) {
        Some(cases) => cases,
        None => {
            tracing::warn!(
                env = PROPTEST_CASES_ENV_KEY,
                raw = %raw,
                "invalid proptest case override; using default",
            );
            default
        }
    }
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&cases| cases > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::plain("128", Some(128))]
    #[case::padded(" 16\n", Some(16))]
    #[case::zero("0", None)]
    #[case::junk("many", None)]
    fn parses_positive_counts(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_cases(raw), expected);
    }
}
