//! Seed retry loop
//!
//! A failed attempt is shown as an all-error grid, counted, and followed by
//! a fresh attempt on the next seed until the retry cap runs out.

use log::warn;

use crate::config::TownConfig;
use crate::error::GenError;
use crate::grid::Tile;
use crate::town::Town;

/// A successfully generated town and how it was reached
#[derive(Debug, Clone)]
pub struct Generated {
    pub town: Town,
    /// Seed of the attempt that succeeded
    pub seed: u64,
    /// Attempts that failed before it
    pub failures: u32,
}

/// Generate a town, moving on to the next seed after each failure
pub fn generate_with_retries(config: &TownConfig, seed: u64) -> Result<Generated, GenError> {
    generate_with_retries_observed(config, seed, |_, _| {})
}

/// Like [`generate_with_retries`], handing every failed town to `on_failure`
///
/// The failed town has already been filled with the error tile. Errors that
/// are not retryable are returned at once.
pub fn generate_with_retries_observed<F>(
    config: &TownConfig,
    seed: u64,
    mut on_failure: F,
) -> Result<Generated, GenError>
where
    F: FnMut(&Town, &GenError),
{
    let policy = &config.retry;
    let mut seed = seed;
    let mut failures = 0u32;

    loop {
        let mut town = Town::new(config.clone(), seed);
        match town.create_town() {
            Ok(()) => {
                return Ok(Generated {
                    town,
                    seed,
                    failures,
                });
            }
            Err(err) if err.is_retryable() => {
                town.clear();
                town.fill(Tile::Error, config.error_color);
                failures += 1;
                warn!("attempt with seed {seed} failed: {err}");
                on_failure(&town, &err);

                if failures > policy.max_retries {
                    return Err(GenError::RetriesExhausted {
                        attempts: failures,
                        last_seed: seed,
                    });
                }
                seed = seed.wrapping_add(policy.seed_step);
            }
            Err(err) => return Err(err),
        }
    }
}
