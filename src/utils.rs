use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Wraps a cookie value into `base64url(value).base64url(tag)` where the tag
/// is an HMAC-SHA256 over the value keyed with the server secret.
pub fn seal(value: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(value.as_bytes());
    let tag = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(value),
        URL_SAFE_NO_PAD.encode(tag)
    )
}

/// Reverses [`seal`]. Returns `None` when the envelope is malformed or the
/// tag does not verify; the comparison is constant-time.
pub fn unseal(sealed: &str, secret: &str) -> Option<String> {
    let (value_b64, tag_b64) = sealed.split_once('.')?;
    let value = URL_SAFE_NO_PAD.decode(value_b64).ok()?;
    let tag = URL_SAFE_NO_PAD.decode(tag_b64).ok()?;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(&value);
    mac.verify_slice(&tag).ok()?;

    String::from_utf8(value).ok()
}
