//! # Domain Services
//!
//! Stateless helpers: Keccak-256 and deterministic contract addresses.

use super::value_objects::Address;
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Address of the contract created by `deployer` at `nonce`.
///
/// `keccak256(rlp([deployer, nonce]))[12..]`, the CREATE scheme.
#[must_use]
pub fn derive_contract_address(deployer: Address, nonce: u64) -> Address {
    let mut content = Vec::with_capacity(30);

    // 20-byte string: 0x80 + 20
    content.push(0x94);
    content.extend_from_slice(deployer.as_bytes());

    if nonce == 0 {
        content.push(0x80);
    } else if nonce < 0x80 {
        content.push(nonce as u8);
    } else {
        let bytes = nonce.to_be_bytes();
        let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len() - 1);
        let trimmed = &bytes[start..];
        content.push(0x80 + trimmed.len() as u8);
        content.extend_from_slice(trimmed);
    }

    // Payload is at most 30 bytes, always a short list
    let mut rlp = Vec::with_capacity(content.len() + 1);
    rlp.push(0xc0 + content.len() as u8);
    rlp.extend_from_slice(&content);

    let hash = keccak256(&rlp);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    Address::new(addr)
}
