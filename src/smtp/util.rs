use rand::{Rng, distributions::Alphanumeric};

/// Lower-case alphanumeric local part drawn from the thread-local CSPRNG.
pub fn random_local_part(len: usize) -> String {
    let length = len.clamp(16, 64);
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect()
}
