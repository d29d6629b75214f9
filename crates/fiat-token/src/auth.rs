//! Authorization gate for privileged writes.
//!
//! Decides whether a signed authorization permits the requested operation.
//! Signature validity is always checked before any on-chain read, so an
//! unauthenticated request never costs a network round trip.

use alloy::primitives::Address;
use alloy::providers::Provider;

use crate::chain::TokenClient;
use crate::signature;
use crate::TokenError;

/// A signed authorization as received on the wire: the message the caller
/// signed, the signature bytes (hex), and the account the caller claims to
/// control. Created per request, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub account: &'a str,
    pub signature: &'a str,
    pub message: &'a str,
}

/// True iff `account` is the contract-registered owner.
///
/// The owner is always fetched live by the caller; caching it would open a
/// privilege-escalation window after an ownership transfer.
pub fn is_owner(account: Address, owner: Address) -> bool {
    account == owner
}

/// Decide whether `creds` authorizes the caller.
///
/// Checks, in order: field presence (`MissingCredentials`), signature
/// recovery against the claimed account (`InvalidSignature`), and — when
/// `require_ownership` is set — a live contract-owner lookup (`NotOwner`).
/// Returns the authorized address on success.
pub async fn authorize<P: Provider>(
    client: &TokenClient<P>,
    creds: &Credentials<'_>,
    require_ownership: bool,
) -> Result<Address, TokenError> {
    if creds.account.is_empty() || creds.signature.is_empty() || creds.message.is_empty() {
        return Err(TokenError::MissingCredentials(
            "account, signature, and message are required".to_string(),
        ));
    }

    let recovered = signature::recover_address(creds.message, creds.signature)?;
    if !signature::matches_account(recovered, creds.account) {
        tracing::warn!(
            claimed = creds.account,
            recovered = %recovered,
            "signature does not recover to the claimed account"
        );
        return Err(TokenError::InvalidSignature(
            "signature does not recover to the claimed account".to_string(),
        ));
    }

    if require_ownership {
        let owner = client.owner().await?;
        if !is_owner(recovered, owner) {
            tracing::warn!(signer = %recovered, owner = %owner, "ownership check failed");
            return Err(TokenError::NotOwner);
        }
    }

    Ok(recovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::providers::RootProvider;
    use alloy::signers::local::PrivateKeySigner;
    use alloy::signers::SignerSync;

    // A client whose provider points at a closed port: any test that reaches
    // chain I/O fails with ChainError, proving which checks run before it.
    fn offline_client() -> TokenClient<RootProvider> {
        let provider = RootProvider::new_http("http://localhost:1".parse().unwrap());
        TokenClient::new(
            provider,
            Address::repeat_byte(0x11),
            Address::repeat_byte(0x22),
        )
    }

    fn signed_creds(signer: &PrivateKeySigner, message: &'static str) -> (String, String) {
        let sig = signer.sign_message_sync(message.as_bytes()).unwrap();
        (
            format!("{}", signer.address()),
            format!("0x{}", alloy::hex::encode(sig.as_bytes())),
        )
    }

    #[tokio::test]
    async fn valid_signature_authorizes_without_ownership() {
        let signer = PrivateKeySigner::random();
        let (account, sig) = signed_creds(&signer, "collect");
        let creds = Credentials {
            account: &account,
            signature: &sig,
            message: "collect",
        };

        let authorized = authorize(&offline_client(), &creds, false).await.unwrap();
        assert_eq!(authorized, signer.address());
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_first() {
        let creds = Credentials {
            account: "",
            signature: "",
            message: "collect",
        };
        let err = authorize(&offline_client(), &creds, true).await.unwrap_err();
        assert!(matches!(err, TokenError::MissingCredentials(_)));
    }

    #[tokio::test]
    async fn bad_signature_fails_before_any_chain_read() {
        // require_ownership is set, but the offline provider is never hit:
        // the result is InvalidSignature, not ChainError.
        let signer = PrivateKeySigner::random();
        let (account, _) = signed_creds(&signer, "burn");
        let creds = Credentials {
            account: &account,
            signature: "0xdeadbeef",
            message: "burn",
        };
        let err = authorize(&offline_client(), &creds, true).await.unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature(_)));
    }

    #[tokio::test]
    async fn mismatched_account_is_rejected() {
        let signer = PrivateKeySigner::random();
        let (_, sig) = signed_creds(&signer, "burn");
        let other = format!("{}", PrivateKeySigner::random().address());
        let creds = Credentials {
            account: &other,
            signature: &sig,
            message: "burn",
        };
        let err = authorize(&offline_client(), &creds, true).await.unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature(_)));
    }

    #[tokio::test]
    async fn ownership_check_reaches_the_chain_only_after_signature_passes() {
        let signer = PrivateKeySigner::random();
        let (account, sig) = signed_creds(&signer, "burn");
        let creds = Credentials {
            account: &account,
            signature: &sig,
            message: "burn",
        };
        // Signature is valid, so the gate proceeds to the owner lookup, which
        // fails against the offline provider.
        let err = authorize(&offline_client(), &creds, true).await.unwrap_err();
        assert!(matches!(err, TokenError::ChainError(_)));
    }

    #[test]
    fn is_owner_compares_exact_addresses() {
        let a = Address::repeat_byte(0xaa);
        let b = Address::repeat_byte(0xbb);
        assert!(is_owner(a, a));
        assert!(!is_owner(a, b));
    }
}
