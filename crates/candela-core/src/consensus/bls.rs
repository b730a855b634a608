use crate::types::beacon::{BlsPublicKey, BlsSignature, Hash32};
use thiserror::Error;

/// Domain separation tag for Ethereum BLS signatures (hash-to-curve).
pub(crate) const BLS_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Errors from a BLS backend. These mean an input could not even be decoded
/// as curve material; a well-formed signature that simply does not verify is
/// reported as `Ok(false)` by the verifier instead.
#[derive(Debug, Error)]
pub enum BlsError {
    #[error("Malformed BLS signature encoding: {reason}")]
    MalformedSignature { reason: String },

    #[error("Malformed BLS public key at committee index {index}: {reason}")]
    MalformedPublicKey { index: usize, reason: String },

    #[error("BLS public key aggregation failed: {reason}")]
    AggregationFailed { reason: String },
}

/// Aggregate BLS signature verification, injected into the update pipeline.
///
/// The pipeline is generic over this trait so tests can exercise the
/// verification order without key material, and so a host with its own BLS
/// implementation can supply it.
pub trait BlsVerifier {
    /// Verify `signature` over `message` against the aggregate of `pubkeys`.
    ///
    /// Returns `Ok(false)` for a cryptographically invalid signature (an
    /// empty pubkey set attests nothing, so it is also `Ok(false)`), and
    /// `Err` only when an input fails to decode.
    fn verify_aggregate(
        &self,
        pubkeys: &[&BlsPublicKey],
        message: &Hash32,
        signature: &BlsSignature,
    ) -> Result<bool, BlsError>;
}

/// Production verifier backed by the `blst` library (min-pk scheme: 48-byte
/// G1 pubkeys, 96-byte G2 signatures).
#[derive(Clone, Copy, Debug, Default)]
pub struct BlstVerifier;

impl BlsVerifier for BlstVerifier {
    fn verify_aggregate(
        &self,
        pubkeys: &[&BlsPublicKey],
        message: &Hash32,
        signature: &BlsSignature,
    ) -> Result<bool, BlsError> {
        use blst::min_pk::{AggregatePublicKey, PublicKey, Signature};
        use blst::BLST_ERROR;

        if pubkeys.is_empty() {
            return Ok(false);
        }

        let sig = Signature::from_bytes(&signature.0).map_err(|e| {
            BlsError::MalformedSignature {
                reason: format!("{:?}", e),
            }
        })?;

        let pks: Vec<PublicKey> = pubkeys
            .iter()
            .enumerate()
            .map(|(i, pk)| {
                PublicKey::from_bytes(&pk.0).map_err(|e| BlsError::MalformedPublicKey {
                    index: i,
                    reason: format!("{:?}", e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pk_refs: Vec<&PublicKey> = pks.iter().collect();
        let aggregate = AggregatePublicKey::aggregate(&pk_refs, false).map_err(|e| {
            BlsError::AggregationFailed {
                reason: format!("{:?}", e),
            }
        })?;

        let result = sig.verify(false, message, BLS_DST, &[], &aggregate.to_public_key(), false);
        Ok(result == BLST_ERROR::BLST_SUCCESS)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Test double that accepts every signature.
    pub(crate) struct AcceptAllBls;

    impl BlsVerifier for AcceptAllBls {
        fn verify_aggregate(
            &self,
            _pubkeys: &[&BlsPublicKey],
            _message: &Hash32,
            _signature: &BlsSignature,
        ) -> Result<bool, BlsError> {
            Ok(true)
        }
    }

    /// Test double that rejects every signature as cryptographically invalid.
    pub(crate) struct RejectAllBls;

    impl BlsVerifier for RejectAllBls {
        fn verify_aggregate(
            &self,
            _pubkeys: &[&BlsPublicKey],
            _message: &Hash32,
            _signature: &BlsSignature,
        ) -> Result<bool, BlsError> {
            Ok(false)
        }
    }
}
