//! Change detection for loaded sources.

/// Non-cryptographic 32-bit hash of `parts` joined with `|`.
///
/// Each UTF-16 code unit is folded in with `h = (h << 5) - h + unit`,
/// wrapping at 32 bits, and the result is printed as a signed decimal.
/// Only used to tell whether a source still matches the indexed tree.
///
/// # Example
/// ```
/// use engine::checksum;
/// assert_eq!(checksum(&["a"]), "97");
/// assert_eq!(checksum(&[]), "0");
/// ```
pub fn checksum(parts: &[&str]) -> String {
    if parts.is_empty() {
        return "0".to_string();
    }
    let joined = parts.join("|");
    let hash = joined.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    });
    hash.to_string()
}
