// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phone number normalization to E.164.
//!
//! `normalize` is total and side-effect-free: any input string yields either
//! a canonical `+<countrycode><national>` string or an explicit rejection.
//! Parsing is region-aware against a curated region table; numbers the table
//! does not cover are accepted leniently when `+`-prefixed and within E.164
//! digit bounds.

use thiserror::Error;

/// Minimum digit count accepted before any parse attempt.
pub const MIN_DIGITS: usize = 6;

/// E.164 allows at most 15 digits including the country code.
const MAX_E164_DIGITS: usize = 15;

/// Shortest plausible international number (country code + subscriber).
const MIN_E164_DIGITS: usize = 8;

/// Region-specific dialing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    /// Country calling code, digits only.
    pub country_code: &'static str,
    /// Accepted national-number digit counts.
    pub national_lengths: &'static [usize],
}

const REGIONS: &[Region] = &[
    Region { code: "BR", country_code: "55", national_lengths: &[10, 11] },
    Region { code: "US", country_code: "1", national_lengths: &[10] },
    Region { code: "MX", country_code: "52", national_lengths: &[10] },
    Region { code: "AR", country_code: "54", national_lengths: &[10] },
    Region { code: "PT", country_code: "351", national_lengths: &[9] },
];

/// Look up a region by its ISO code (case-insensitive).
pub fn region(code: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.code.eq_ignore_ascii_case(code))
}

/// ISO codes of all supported default regions.
pub fn known_regions() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|r| r.code)
}

/// Why a raw phone string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("too few digits")]
    TooFewDigits,
    #[error("misplaced '+'")]
    MisplacedPlus,
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    #[error("invalid number length")]
    InvalidLength,
}

/// Normalize a raw phone string to E.164.
///
/// All characters except ASCII digits and `+` are stripped first. A leading
/// `+` marks an international number; bare numbers are interpreted against
/// `default_region`. Idempotent on its own output.
pub fn normalize(raw: &str, default_region: &str) -> Result<String, PhoneError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let digit_count = cleaned.chars().filter(char::is_ascii_digit).count();
    if digit_count < MIN_DIGITS {
        return Err(PhoneError::TooFewDigits);
    }

    if let Some(digits) = cleaned.strip_prefix('+') {
        if digits.contains('+') {
            return Err(PhoneError::MisplacedPlus);
        }
        return normalize_international(digits);
    }
    if cleaned.contains('+') {
        return Err(PhoneError::MisplacedPlus);
    }

    let region = region(default_region)
        .ok_or_else(|| PhoneError::UnknownRegion(default_region.to_string()))?;
    normalize_national(&cleaned, region)
}

fn normalize_international(digits: &str) -> Result<String, PhoneError> {
    if let Some(region) = REGIONS.iter().find(|r| digits.starts_with(r.country_code)) {
        let national_len = digits.len() - region.country_code.len();
        if region.national_lengths.contains(&national_len) {
            return Ok(format!("+{digits}"));
        }
        return Err(PhoneError::InvalidLength);
    }
    // Unknown country code: accept within E.164 bounds.
    if (MIN_E164_DIGITS..=MAX_E164_DIGITS).contains(&digits.len()) {
        Ok(format!("+{digits}"))
    } else {
        Err(PhoneError::InvalidLength)
    }
}

fn normalize_national(digits: &str, region: &Region) -> Result<String, PhoneError> {
    // Bare numbers sometimes carry the country code without '+'.
    if let Some(national) = digits.strip_prefix(region.country_code) {
        if region.national_lengths.contains(&national.len()) {
            return Ok(format!("+{digits}"));
        }
    }
    // Strip an optional trunk zero before checking the national length.
    let national = digits.strip_prefix('0').unwrap_or(digits);
    if region.national_lengths.contains(&national.len()) {
        Ok(format!("+{}{national}", region.country_code))
    } else {
        Err(PhoneError::InvalidLength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn br_national_number_with_formatting() {
        let normalized = normalize("(11) 91234-5678", "BR").unwrap();
        assert!(normalized.starts_with("+55"), "got {normalized}");
        assert_eq!(normalized, "+5511912345678");
    }

    #[test]
    fn too_short_rejected() {
        assert_eq!(normalize("123", "BR"), Err(PhoneError::TooFewDigits));
    }

    #[test]
    fn empty_and_pure_text_rejected() {
        assert_eq!(normalize("", "BR"), Err(PhoneError::TooFewDigits));
        assert_eq!(normalize("not a number", "BR"), Err(PhoneError::TooFewDigits));
    }

    #[test]
    fn idempotent_on_e164_output() {
        let first = normalize("(11) 91234-5678", "BR").unwrap();
        let second = normalize(&first, "BR").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn international_prefix_respected_over_default_region() {
        let normalized = normalize("+1 (555) 123-4567", "BR").unwrap();
        assert_eq!(normalized, "+15551234567");
    }

    #[test]
    fn bare_number_with_country_code_accepted() {
        assert_eq!(normalize("5511912345678", "BR").unwrap(), "+5511912345678");
    }

    #[test]
    fn trunk_zero_stripped() {
        assert_eq!(normalize("011 91234-5678", "BR").unwrap(), "+5511912345678");
    }

    #[test]
    fn br_landline_length_accepted() {
        assert_eq!(normalize("(11) 3123-4567", "BR").unwrap(), "+551131234567");
    }

    #[test]
    fn wrong_national_length_rejected() {
        assert_eq!(normalize("912345678", "BR"), Err(PhoneError::InvalidLength));
    }

    #[test]
    fn misplaced_plus_rejected() {
        assert_eq!(normalize("12+34567890", "BR"), Err(PhoneError::MisplacedPlus));
        assert_eq!(normalize("+55+11912345678", "BR"), Err(PhoneError::MisplacedPlus));
    }

    #[test]
    fn unknown_default_region_rejected() {
        assert_eq!(
            normalize("11912345678", "ZZ"),
            Err(PhoneError::UnknownRegion("ZZ".to_string()))
        );
    }

    #[test]
    fn unknown_country_code_accepted_within_e164_bounds() {
        assert_eq!(normalize("+442071234567", "BR").unwrap(), "+442071234567");
    }

    #[test]
    fn known_country_code_with_bad_length_rejected() {
        // '+55' followed by too few national digits.
        assert_eq!(normalize("+55119123", "BR"), Err(PhoneError::InvalidLength));
    }

    #[test]
    fn region_lookup_is_case_insensitive() {
        assert!(region("br").is_some());
        assert!(region("BR").is_some());
        assert!(region("ZZ").is_none());
    }

    proptest! {
        #[test]
        fn normalize_is_total(raw in ".{0,64}") {
            // Never panics; any accepted value is canonical E.164.
            if let Ok(normalized) = normalize(&raw, "BR") {
                prop_assert!(normalized.starts_with('+'));
                prop_assert!(normalized[1..].chars().all(|c| c.is_ascii_digit()));
                prop_assert!(normalized.len() <= MAX_E164_DIGITS + 1);
                // Idempotence on every accepted output.
                prop_assert_eq!(normalize(&normalized, "BR").unwrap(), normalized);
            }
        }
    }
}
