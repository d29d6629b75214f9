//! Signed-message verification.
//!
//! Callers authorize requests by signing an arbitrary message with their
//! wallet (EIP-191 `personal_sign`). Recovery yields the signing address,
//! which is then compared against the account the caller claims to control.
//! Pure functions, no I/O.

use alloy::primitives::{Address, Signature};

use crate::TokenError;

/// Recover the signing address from a `personal_sign` message/signature pair.
///
/// `signature` is a hex string (`0x` prefix optional) of the 65-byte
/// `r || s || v` encoding. Fails with `InvalidSignature` if the signature
/// cannot be parsed or recovery fails.
pub fn recover_address(message: &str, signature: &str) -> Result<Address, TokenError> {
    let raw = alloy::hex::decode(signature.strip_prefix("0x").unwrap_or(signature))
        .map_err(|e| TokenError::InvalidSignature(format!("signature is not valid hex: {e}")))?;

    if raw.len() != 65 {
        return Err(TokenError::InvalidSignature(format!(
            "signature must be 65 bytes, got {}",
            raw.len()
        )));
    }

    let sig = Signature::from_raw(&raw)
        .map_err(|e| TokenError::InvalidSignature(format!("malformed signature: {e}")))?;

    // recover_address_from_msg applies the EIP-191 prefix before hashing,
    // matching what wallets do for personal_sign.
    sig.recover_address_from_msg(message)
        .map_err(|e| TokenError::InvalidSignature(format!("recovery failed: {e}")))
}

/// True iff `claimed` names exactly the `recovered` address.
///
/// The claimed account is compared as a parsed address, so case differences
/// never matter. A claimed string that is not an address can never match.
pub fn matches_account(recovered: Address, claimed: &str) -> bool {
    claimed
        .parse::<Address>()
        .map(|parsed| parsed == recovered)
        .unwrap_or(false)
}

/// True iff `signature` over `message` recovers to `claimed_account`.
pub fn verify(message: &str, signature: &str, claimed_account: &str) -> Result<bool, TokenError> {
    let recovered = recover_address(message, signature)?;
    Ok(matches_account(recovered, claimed_account))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::signers::local::PrivateKeySigner;
    use alloy::signers::SignerSync;

    fn signed(message: &str) -> (PrivateKeySigner, String) {
        let signer = PrivateKeySigner::random();
        let sig = signer.sign_message_sync(message.as_bytes()).unwrap();
        (signer, format!("0x{}", alloy::hex::encode(sig.as_bytes())))
    }

    #[test]
    fn recovers_the_signing_address() {
        let (signer, sig) = signed("withdraw 100");
        let recovered = recover_address("withdraw 100", &sig).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn verify_accepts_the_signer_account() {
        let (signer, sig) = signed("hello");
        assert!(verify("hello", &sig, &format!("{}", signer.address())).unwrap());
    }

    #[test]
    fn verify_is_case_insensitive_on_the_claimed_account() {
        let (signer, sig) = signed("hello");
        let lowercase = format!("{}", signer.address()).to_lowercase();
        assert!(verify("hello", &sig, &lowercase).unwrap());
    }

    #[test]
    fn verify_rejects_any_other_account() {
        let (_, sig) = signed("hello");
        let other = PrivateKeySigner::random().address();
        assert!(!verify("hello", &sig, &format!("{other}")).unwrap());
    }

    #[test]
    fn verify_rejects_a_tampered_message() {
        let (signer, sig) = signed("amount=100");
        let claimed = format!("{}", signer.address());
        assert!(!verify("amount=9999", &sig, &claimed).unwrap());
    }

    #[test]
    fn matches_account_ignores_case_and_rejects_garbage() {
        let addr = PrivateKeySigner::random().address();
        assert!(matches_account(addr, &format!("{addr}")));
        assert!(matches_account(addr, &format!("{addr}").to_lowercase()));
        assert!(!matches_account(addr, "not-an-address"));
        assert!(!matches_account(
            addr,
            &format!("{}", PrivateKeySigner::random().address())
        ));
    }

    #[test]
    fn verify_rejects_non_address_claims() {
        let (_, sig) = signed("hello");
        assert!(!verify("hello", &sig, "not-an-address").unwrap());
    }

    #[test]
    fn malformed_hex_is_an_error() {
        assert!(matches!(
            recover_address("hello", "0xzznothex"),
            Err(TokenError::InvalidSignature(_))
        ));
    }

    #[test]
    fn wrong_length_is_an_error() {
        assert!(matches!(
            recover_address("hello", "0xdeadbeef"),
            Err(TokenError::InvalidSignature(_))
        ));
    }
}
