use afl::fuzz;
use rand::{rngs::StdRng, Rng, SeedableRng};
use siito_validation::{
    compute_check_digit, format_identity, normalize_identity, validate_identity, ValidationStatus,
};

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    let i = input.iter().position(|b| *b == b',')?;
    Some((&input[0..i], &input[i + 1..]))
}

fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (input, rand_seed) = split_bytes_once(bytes)?;
    let input_str = std::str::from_utf8(input).ok()?;

    let mut rng_seed: u64 = 0;
    for byte in rand_seed.iter().take(8) {
        rng_seed <<= 8;
        rng_seed += *byte as u64;
    }

    run_fuzz(input_str, StdRng::seed_from_u64(rng_seed));
    Some(())
}

/// Inserts random separators, which must never change the outcome.
fn decorate(input: &str, rng: &mut StdRng) -> String {
    let mut decorated = String::new();
    for c in input.chars() {
        if rng.gen_bool(0.2) {
            decorated.push(if rng.gen_bool(0.5) { '.' } else { '-' });
        }
        decorated.push(c);
    }
    decorated
}

fn run_fuzz(input: &str, mut rng: StdRng) {
    let result = validate_identity(input);

    #[cfg(feature = "manual_test")]
    {
        println!("Input: {:?}", input);
        println!("Result: {:?}", result);
    }

    assert_eq!(result, validate_identity(input));

    let normalized = normalize_identity(input);
    match result.status {
        ValidationStatus::Empty => assert!(normalized.is_empty()),
        ValidationStatus::Valid => {
            assert_eq!(result.normalized.as_deref(), Some(normalized.as_str()));
            let (body, check) = normalized.split_at(normalized.len() - 1);
            assert_eq!(compute_check_digit(body), check.chars().next());

            // formatting and re-validating is stable
            let formatted = format_identity(input).unwrap();
            assert_eq!(validate_identity(&formatted), result);
        }
        ValidationStatus::InvalidChecksum => {
            let (body, check) = normalized.split_at(normalized.len() - 1);
            assert_ne!(compute_check_digit(body), check.chars().next());
        }
        ValidationStatus::InvalidFormat => assert!(result.reason.is_some()),
    }

    if result.status == ValidationStatus::Valid {
        let decorated = decorate(&normalized, &mut rng);
        assert_eq!(validate_identity(&decorated).status, ValidationStatus::Valid);
    }
}
