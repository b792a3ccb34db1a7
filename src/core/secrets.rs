//! Sensitive-field routing and masking
//!
//! A caller-supplied secret digit-code is either a physical card PIN or a
//! virtual-card authentication cryptogram; which one is decided purely by
//! the card's BIN against the configured virtual-card prefix. Exactly one
//! destination field is populated per call, never both.
//!
//! Masking helpers produce the log-safe rendering of card data. Masked
//! values go to log lines only - the envelope sent to the backend always
//! carries the original values.

use crate::config::VIRTUAL_PREFIX_DIGITS;

/// Fixed character substituted for masked digits
pub const MASK_CHAR: char = 'X';

/// Digits left in the clear at the end of a masked card number
const VISIBLE_SUFFIX: usize = 4;

/// Digits taken as the bin identifier
const BIN_DIGITS: usize = 7;

/// Destination field for the caller's secret digit-code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretField {
    /// Physical card PIN
    Pin,

    /// Virtual-card authentication cryptogram
    Cryptogram,
}

impl SecretField {
    /// Envelope key the secret is written under
    pub fn key(&self) -> &'static str {
        match self {
            SecretField::Pin => "Pin",
            SecretField::Cryptogram => "Cryptogram",
        }
    }
}

/// Outcome of classifying a card's secret digit-code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretClassification {
    /// Which destination field receives the secret
    pub field: SecretField,

    /// Bin identifier derived from the first seven digits
    pub bin: String,

    /// Log-safe rendering of the card number
    pub masked_card_number: String,
}

/// Classify a card's secret digit-code by BIN policy
///
/// The first eight digits of the card number are compared against the
/// configured virtual-card prefix: a match routes the secret into the
/// cryptogram field, anything else into the PIN field.
pub fn classify_secret(card_number: &str, virtual_card_prefix: &str) -> SecretClassification {
    let bin: String = card_number.chars().take(BIN_DIGITS).collect();
    let prefix: String = card_number.chars().take(VIRTUAL_PREFIX_DIGITS).collect();

    let field = if prefix.len() == VIRTUAL_PREFIX_DIGITS && prefix == virtual_card_prefix {
        SecretField::Cryptogram
    } else {
        SecretField::Pin
    };

    SecretClassification {
        field,
        bin,
        masked_card_number: mask_card_number(card_number),
    }
}

/// Mask a card number for logging
///
/// All but the last four characters are replaced by [`MASK_CHAR`].
pub fn mask_card_number(number: &str) -> String {
    let total = number.chars().count();
    let masked = total.saturating_sub(VISIBLE_SUFFIX);

    number
        .chars()
        .enumerate()
        .map(|(index, c)| if index < masked { MASK_CHAR } else { c })
        .collect()
}

/// Redact an expiry date for logging
///
/// Expiry dates are fully masked; only the length survives.
pub fn mask_expiry(expiry: &str) -> String {
    expiry.chars().map(|_| MASK_CHAR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VIRTUAL_PREFIX: &str = "40001230";

    #[rstest]
    #[case::virtual_card("4000123012345678", SecretField::Cryptogram)]
    #[case::physical_card("4111111111111111", SecretField::Pin)]
    #[case::near_miss_prefix("4000123112345678", SecretField::Pin)]
    #[case::shorter_than_prefix("4000123", SecretField::Pin)]
    #[case::empty_card_number("", SecretField::Pin)]
    fn test_classification_follows_eight_digit_prefix(
        #[case] card_number: &str,
        #[case] expected: SecretField,
    ) {
        let classification = classify_secret(card_number, VIRTUAL_PREFIX);
        assert_eq!(classification.field, expected);
    }

    #[test]
    fn test_exactly_one_destination_field_is_chosen() {
        // SecretField is a two-variant enum, so a single classification can
        // never select both destinations; spot-check both policies anyway
        let physical = classify_secret("4111111111111111", VIRTUAL_PREFIX);
        let qualified = classify_secret("4000123012345678", VIRTUAL_PREFIX);

        assert_eq!(physical.field.key(), "Pin");
        assert_eq!(qualified.field.key(), "Cryptogram");
        assert_ne!(physical.field, qualified.field);
    }

    #[test]
    fn test_bin_is_first_seven_digits() {
        let classification = classify_secret("4111111111111111", VIRTUAL_PREFIX);
        assert_eq!(classification.bin, "4111111");
    }

    #[test]
    fn test_masked_card_number_keeps_last_four_digits_only() {
        let masked = mask_card_number("4111111111111111");

        assert_eq!(masked, "XXXXXXXXXXXX1111");
        assert!(masked.ends_with("1111"));
        // None of the masked positions retain an original digit
        assert_eq!(masked.matches('1').count(), 4);
    }

    #[rstest]
    #[case::short("411", "XXX")]
    #[case::exactly_four("4111", "4111")]
    #[case::empty("", "")]
    fn test_mask_card_number_edge_lengths(#[case] number: &str, #[case] expected: &str) {
        assert_eq!(mask_card_number(number), expected);
    }

    #[test]
    fn test_expiry_is_fully_redacted() {
        assert_eq!(mask_expiry("12/27"), "XXXXX");
        assert_eq!(mask_expiry(""), "");
    }
}
