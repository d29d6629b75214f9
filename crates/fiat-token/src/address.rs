//! Account-identifier validation.
//!
//! Every endpoint that accepts a caller-supplied address runs it through
//! these checks before anything else touches it. Pure, no I/O.

use alloy::primitives::Address;

use crate::TokenError;

/// Check that `candidate` is a well-formed 20-byte hex address.
///
/// Rejects empty strings, missing `0x` prefix, wrong length, and non-hex
/// content. All-lowercase and all-uppercase forms are accepted as-is;
/// mixed-case input must carry a valid EIP-55 checksum, so a typo'd
/// destination is caught before it reaches a chain write.
pub fn is_valid_address(candidate: &str) -> bool {
    let Some(hex) = candidate.strip_prefix("0x") else {
        return false;
    };
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let mixed_case = hex.chars().any(|c| c.is_ascii_uppercase())
        && hex.chars().any(|c| c.is_ascii_lowercase());
    if mixed_case {
        Address::parse_checksummed(candidate, None).is_ok()
    } else {
        candidate.parse::<Address>().is_ok()
    }
}

/// Parse a caller-supplied address, or fail with `InvalidInput`.
pub fn parse_address(candidate: &str) -> Result<Address, TokenError> {
    if !is_valid_address(candidate) {
        return Err(TokenError::InvalidInput(format!(
            "invalid address: {candidate:?}"
        )));
    }
    candidate
        .parse::<Address>()
        .map_err(|e| TokenError::InvalidInput(format!("invalid address: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn accepts_well_formed_address() {
        assert!(is_valid_address(WELL_FORMED));
    }

    #[test]
    fn accepts_lowercase_address() {
        assert!(is_valid_address(&WELL_FORMED.to_lowercase()));
    }

    #[test]
    fn accepts_uppercase_address() {
        let upper = format!("0x{}", WELL_FORMED[2..].to_uppercase());
        assert!(is_valid_address(&upper));
    }

    #[test]
    fn rejects_invalid_eip55_checksum() {
        // One letter case-flipped from the valid checksum form.
        assert!(!is_valid_address(
            "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        ));
        assert!(matches!(
            parse_address("0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
            Err(TokenError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_empty_string() {
        assert!(!is_valid_address(""));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(!is_valid_address(
            "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeA"));
        assert!(!is_valid_address(
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed00"
        ));
    }

    #[test]
    fn rejects_non_hex_content() {
        assert!(!is_valid_address(
            "0xZZAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        ));
        assert!(!is_valid_address("not-an-address"));
    }

    #[test]
    fn parse_address_roundtrips() {
        let parsed = parse_address(WELL_FORMED).unwrap();
        assert_eq!(format!("{parsed}"), WELL_FORMED);
    }

    #[test]
    fn parse_address_rejects_garbage() {
        assert!(matches!(
            parse_address("0xnope"),
            Err(TokenError::InvalidInput(_))
        ));
    }
}
