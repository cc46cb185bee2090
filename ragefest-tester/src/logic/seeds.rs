use thiserror::Error;

/// Seed used when the command line names none.
pub const DEFAULT_SEED: u64 = 1337;

/// Width of the `sweep` keyword's seed range.
pub const SWEEP_SEED_COUNT: u64 = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("unrecognized seed token: {token}")]
    Unrecognized { token: String },
    #[error("seed range {start}..{end} is empty")]
    EmptyRange { start: u64, end: u64 },
}

/// Resolve CLI seed arguments into a de-duplicated, ordered seed list.
///
/// Accepts integers (negative values use their magnitude), half-open ranges
/// such as `10..20`, and the keyword `sweep` for `0..SWEEP_SEED_COUNT`.
///
/// # Errors
///
/// Returns a [`SeedError`] for a token that is none of the above.
pub fn resolve_seeds(tokens: &[String]) -> Result<Vec<u64>, SeedError> {
    let mut seeds: Vec<u64> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if token.eq_ignore_ascii_case("sweep") {
            seeds.extend(0..SWEEP_SEED_COUNT);
            continue;
        }

        if let Some((start, end)) = token.split_once("..") {
            let (Ok(start), Ok(end)) = (start.trim().parse::<u64>(), end.trim().parse::<u64>())
            else {
                return Err(SeedError::Unrecognized {
                    token: token.clone(),
                });
            };
            if start >= end {
                return Err(SeedError::EmptyRange { start, end });
            }
            seeds.extend(start..end);
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            seeds.push(value.unsigned_abs());
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            seeds.push(value);
            continue;
        }

        return Err(SeedError::Unrecognized {
            token: token.clone(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    seeds.retain(|seed| seen.insert(*seed));

    if seeds.is_empty() {
        seeds.push(DEFAULT_SEED);
    }

    Ok(seeds)
}
