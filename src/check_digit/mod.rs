mod chilean_run_checksum;

pub use crate::check_digit::chilean_run_checksum::{compute_run_check_digit, ChileanRunChecksum};
use std::str::Chars;

pub trait Validator: Send + Sync {
    fn is_valid_match(&self, candidate: &str) -> bool;
}

fn get_previous_digit(chars: &mut Chars<'_>) -> Option<u32> {
    chars.next_back().and_then(|c| c.to_digit(10))
}

#[cfg(test)]
mod test {
    use super::get_previous_digit;

    #[test]
    fn previous_digit_stops_on_non_digit() {
        let mut chars = "1a2".chars();
        assert_eq!(get_previous_digit(&mut chars), Some(2));
        assert_eq!(get_previous_digit(&mut chars), None);
    }
}
