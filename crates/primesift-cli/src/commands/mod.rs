pub mod inspect;
pub mod probe;
pub mod run;

use primesift_core::{Error, KeySet};
use std::path::Path;

/// Build the key set a command will sweep with: a key-file directory when
/// given, otherwise synthetic keys (seeded random with `--seed`, sequential
/// without).
pub fn make_key_set(
    keys_dir: Option<&str>,
    max_keys: usize,
    seed: Option<u64>,
) -> Result<KeySet, Error> {
    match keys_dir {
        Some(dir) => KeySet::load_dir(Path::new(dir), max_keys),
        None => Ok(match seed {
            Some(s) => KeySet::random(max_keys, s),
            None => KeySet::sequential(max_keys),
        }),
    }
}
