//! Run seed selection: an explicit non-zero seed wins, otherwise one is
//! derived from the clock, the process id and a call counter.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Explicit(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Explicit(seed) | Self::Generated(seed) => seed,
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    // Zero means "pick one for me", so never hand it out.
    mix_seed(entropy).max(1)
}

/// A missing or zero seed falls back to `generated`.
pub fn resolve_seed(requested: Option<u64>, generated: u64) -> SeedChoice {
    match requested {
        Some(seed) if seed != 0 => SeedChoice::Explicit(seed),
        _ => SeedChoice::Generated(generated),
    }
}

/// Decorrelates consecutive seeds for derived runs such as fuzz iterations.
pub fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
