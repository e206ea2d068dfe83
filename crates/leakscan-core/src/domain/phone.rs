/// Number of digits kept from a normalized phone number.
pub const MASKED_DIGITS: usize = 8;
/// Placeholder appended after the kept digits.
pub const MASK: &str = "XX";

/// Reduces a raw phone number to the masked form stored in breach records.
///
/// Non-digits are dropped, a single leading `1` country code is stripped,
/// the first [`MASKED_DIGITS`] digits are kept and [`MASK`] is appended.
/// Shorter inputs are not padded.
pub fn normalize_phone_masked(value: &str) -> String {
    let digits: String = value.chars().filter(|ch| ch.is_ascii_digit()).collect();
    let local = digits.strip_prefix('1').unwrap_or(&digits);

    let mut out: String = local.chars().take(MASKED_DIGITS).collect();
    out.push_str(MASK);
    out
}
