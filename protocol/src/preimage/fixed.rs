//! Offline preimage source.

use async_trait::async_trait;

use super::{FetchError, Preimage, PreimageSource};
use crate::identity::CanonicalAddress;

/// Returns the same preimage for every identity.
///
/// Used when the operator already has the preimage (from a flat file saved
/// earlier, say) and wants the replay address without touching the network.
#[derive(Debug, Clone)]
pub struct StaticPreimageSource {
    preimage: Preimage,
}

impl StaticPreimageSource {
    pub fn new(preimage: Preimage) -> Self {
        Self { preimage }
    }

    pub fn from_hex(text: &str) -> Result<Self, FetchError> {
        Preimage::from_hex(text).map(Self::new)
    }
}

#[async_trait]
impl PreimageSource for StaticPreimageSource {
    async fn fetch(
        &self,
        address: &CanonicalAddress,
        chain_code: u16,
    ) -> Result<Preimage, FetchError> {
        tracing::debug!(
            address = %address.address,
            chain_code,
            bytes = self.preimage.len(),
            "using operator-supplied preimage"
        );
        Ok(self.preimage.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::classify;

    #[tokio::test]
    async fn test_returns_supplied_preimage_for_any_identity() {
        let source = StaticPreimageSource::from_hex("c0ffee").unwrap();
        let discord = classify("468526016151814164", None).unwrap();
        let solana = classify("9UuMq6FkcZLbCX84sw6L4sVzkNc6VBhTmASRVQoX6HLV", None).unwrap();

        let a = source.fetch(&discord, 14443).await.unwrap();
        let b = source.fetch(&solana, 1).await.unwrap();
        assert_eq!(a.as_bytes(), &[0xc0, 0xff, 0xee]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_hex_up_front() {
        assert!(StaticPreimageSource::from_hex("c0ffe").is_err());
    }
}
