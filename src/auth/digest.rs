/// Legacy password digest carried over from earlier releases: a 32-bit
/// rolling checksum over UTF-16 code units (`h = h*31 + unit`, wrapped to
/// 32-bit signed), hex-encoded magnitude left-padded to 16 digits.
///
/// This is NOT a cryptographic hash; collisions are easy to construct.
/// It is kept only so existing stored profiles keep verifying. Swapping
/// in a real KDF only touches this module.
pub(crate) fn hash_password(password: &str) -> String {
    let mut hash: i32 = 0;
    for unit in password.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    format!("{:016x}", (hash as i64).unsigned_abs())
}

pub(crate) fn verify_password(password: &str, digest: &str) -> bool {
    hash_password(password) == digest
}
