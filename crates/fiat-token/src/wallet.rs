//! Custody wallet issuance.
//!
//! Key generation is purely local (OS CSPRNG via `PrivateKeySigner::random`);
//! no network call is involved. The key material exists only in the returned
//! value — the service retains no copy, so whoever receives it holds the only
//! copy of the wallet.

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

/// Freshly generated key material.
#[derive(Debug, Clone)]
pub struct GeneratedWallet {
    pub address: Address,
    /// Hex-encoded private key with `0x` prefix. Hand to the caller and drop.
    pub private_key: String,
}

/// Generate a new custody wallet.
pub fn generate_wallet() -> GeneratedWallet {
    let signer = PrivateKeySigner::random();
    GeneratedWallet {
        address: signer.address(),
        private_key: format!("0x{}", alloy::hex::encode(signer.to_bytes())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_wallets_are_distinct() {
        let a = generate_wallet();
        let b = generate_wallet();
        assert_ne!(a.address, b.address);
        assert_ne!(a.private_key, b.private_key);
    }

    #[test]
    fn key_material_controls_the_returned_address() {
        let wallet = generate_wallet();
        let signer: PrivateKeySigner = wallet.private_key.parse().unwrap();
        assert_eq!(signer.address(), wallet.address);
    }

    #[test]
    fn private_key_is_hex_encoded() {
        let wallet = generate_wallet();
        assert!(wallet.private_key.starts_with("0x"));
        assert_eq!(wallet.private_key.len(), 66); // 0x + 64 hex
    }
}
