use rand::RngCore;
use rand::rngs::OsRng;

/// Bytes of entropy behind every token key.
pub const KEY_BYTES: usize = 20;

/// Fresh opaque token key: 20 random bytes as 40 lowercase hex characters.
pub fn generate_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);

    hex::encode(bytes)
}
