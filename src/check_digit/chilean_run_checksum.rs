use crate::check_digit::{get_previous_digit, Validator};

/// Modulo-11 check character of a Chilean RUN, applied to a normalized
/// string (body digits followed by the check character).
pub struct ChileanRunChecksum;

const FIRST_WEIGHT: u32 = 2;
const LAST_WEIGHT: u32 = 7;

/// Computes the expected check character for `body`.
///
/// Returns `None` when the body is empty or contains anything other than
/// ASCII digits.
pub fn compute_run_check_digit(body: &str) -> Option<char> {
    if body.is_empty() {
        return None;
    }

    let mut digits = body.chars();
    let mut sum: u32 = 0;
    let mut weight = FIRST_WEIGHT;

    while !digits.as_str().is_empty() {
        let digit = get_previous_digit(&mut digits)?;
        // kept reduced so bodies of any length stay within u32
        sum = (sum + digit * weight) % 11;
        weight = if weight == LAST_WEIGHT {
            FIRST_WEIGHT
        } else {
            weight + 1
        };
    }

    Some(match 11 - sum {
        11 => '0',
        10 => 'K',
        // 1..=9
        remainder => char::from_digit(remainder, 10)?,
    })
}

impl Validator for ChileanRunChecksum {
    fn is_valid_match(&self, candidate: &str) -> bool {
        let mut chars = candidate.chars();
        let provided = match chars.next_back() {
            Some(c) => c.to_ascii_uppercase(),
            None => return false,
        };

        match compute_run_check_digit(chars.as_str()) {
            Some(expected) => expected == provided,
            None => false,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::check_digit::*;

    #[test]
    fn test_valid_runs() {
        let valid_ids = vec![
            "123456785",
            // 7 digit body
            "12345674",
            "111111111",
            "11111112K",
            "6000000K",
            // lowercase k is accepted
            "11111112k",
            // 11 - 0 maps to zero
            "111111170",
        ];
        for id in valid_ids {
            assert!(ChileanRunChecksum.is_valid_match(id), "{id} should be valid");
        }
    }

    #[test]
    fn test_invalid_runs() {
        let invalid_ids = vec![
            // wrong check digit
            "123456786",
            "12345678K",
            "99999999A",
            // non digit characters in the body
            "1234567A5",
            "12.345.678-5",
            // no body
            "5",
            "",
        ];
        for id in invalid_ids {
            assert!(!ChileanRunChecksum.is_valid_match(id), "{id} should be invalid");
        }
    }

    #[test]
    fn computes_expected_check_digits() {
        assert_eq!(compute_run_check_digit("12345678"), Some('5'));
        assert_eq!(compute_run_check_digit("1234567"), Some('4'));
        assert_eq!(compute_run_check_digit("11111112"), Some('K'));
        assert_eq!(compute_run_check_digit("11111117"), Some('0'));
        assert_eq!(compute_run_check_digit(""), None);
        assert_eq!(compute_run_check_digit("12a4"), None);
    }

    fn unreduced_check_digit(body: &str) -> char {
        let sum: u64 = body
            .bytes()
            .rev()
            .zip([2u64, 3, 4, 5, 6, 7].iter().cycle())
            .map(|(b, weight)| (b - b'0') as u64 * weight)
            .sum();
        match 11 - sum % 11 {
            11 => '0',
            10 => 'K',
            digit => char::from_digit(digit as u32, 10).unwrap(),
        }
    }

    #[test]
    fn long_bodies_do_not_overflow() {
        for body in [
            "9".repeat(100_000),
            "12345678".repeat(25_000),
            "7".repeat(1_000_001),
        ] {
            assert_eq!(
                compute_run_check_digit(&body),
                Some(unreduced_check_digit(&body))
            );
        }
    }

    #[test]
    fn weights_wrap_after_seven() {
        // single digit bodies only use the first weight
        assert_eq!(compute_run_check_digit("1"), Some('9'));
        // seven ones use every weight once: 2 + 3 + 4 + 5 + 6 + 7 = 27, plus 2 for the wrap
        assert_eq!(compute_run_check_digit("1111111"), Some('4'));
    }
}
