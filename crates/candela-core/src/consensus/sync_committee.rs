use crate::consensus::bls::{BlsError, BlsVerifier};
use crate::consensus::ssz::{hash_pair, hash_tree_root_header};
use crate::types::beacon::*;
use thiserror::Error;

/// Errors from the update verification pipeline.
///
/// The variants are mutually exclusive: the pipeline runs its checks in a
/// fixed order and reports the first one that fails, with no state touched.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Sync committee quorum not met: {participants}/512 signed, need a two-thirds supermajority")]
    QuorumNotMet { participants: usize },

    #[error("Aggregate sync committee signature does not verify against the attested header")]
    InvalidSignature,

    #[error("Finality branch does not prove the finalized header against the attested state root")]
    InvalidFinalityProof,

    #[error("Signature slot period {signature_period} is neither the finalized period {finalized_period} nor its successor")]
    InvalidPeriodAdjacency {
        signature_period: u64,
        finalized_period: u64,
    },

    #[error("Next sync committee branch does not prove the committee against the attested state root")]
    InvalidCommitteeProof,

    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },
}

/// Compute the sync committee period a slot belongs to.
pub fn sync_committee_period(slot: u64) -> u64 {
    slot / SLOTS_PER_EPOCH / EPOCHS_PER_SYNC_COMMITTEE_PERIOD
}

/// Compute the signing root for a beacon block header.
/// The committee does not sign the header directly but
/// hash_tree_root(header) paired with a signing domain.
pub fn compute_signing_root(header: &BeaconBlockHeader, domain: &Hash32) -> Hash32 {
    let header_root = hash_tree_root_header(header);
    hash_pair(&header_root, domain)
}

/// Compute the signing domain: domain_type ++ fork_data_root[..28].
/// Binds every signature to one chain and one fork, killing cross-chain
/// and cross-fork replay.
pub fn compute_domain(
    domain_type: &[u8; 4],
    fork_version: &[u8; 4],
    genesis_validators_root: &Hash32,
) -> Hash32 {
    let fork_data_root = compute_fork_data_root(fork_version, genesis_validators_root);
    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(domain_type);
    domain[4..].copy_from_slice(&fork_data_root[..28]);
    domain
}

/// Fork data root: hash of the zero-padded fork version and the genesis
/// validators root, as SSZ merkleizes the two-field ForkData container.
fn compute_fork_data_root(fork_version: &[u8; 4], genesis_validators_root: &Hash32) -> Hash32 {
    let mut version_leaf = [0u8; 32];
    version_leaf[..4].copy_from_slice(fork_version);
    hash_pair(&version_leaf, genesis_validators_root)
}

/// Verify the sync committee's aggregate signature over an attested header.
///
/// Selects the pubkeys of participating members (ascending committee index),
/// derives the domain-separated signing root, and hands both to the injected
/// BLS backend. A signature that decodes but does not verify and a signature
/// that fails to decode both come back as `InvalidSignature`; pubkeys of the
/// trusted committee that fail to decode are a corrupted-state bug and come
/// back as `MalformedInput`.
pub fn verify_sync_committee_signature<V: BlsVerifier>(
    attested_header: &BeaconBlockHeader,
    sync_aggregate: &SyncAggregate,
    committee: &SyncCommittee,
    fork_version: &[u8; 4],
    genesis_validators_root: &Hash32,
    bls: &V,
) -> Result<(), UpdateError> {
    committee.validate().map_err(|reason| UpdateError::MalformedInput {
        reason: reason.to_string(),
    })?;

    let domain = compute_domain(&DOMAIN_SYNC_COMMITTEE, fork_version, genesis_validators_root);
    let signing_root = compute_signing_root(attested_header, &domain);

    let participant_pubkeys: Vec<&BlsPublicKey> = sync_aggregate
        .sync_committee_bits
        .participant_indices()
        .iter()
        .map(|&i| &committee.pubkeys[i])
        .collect();

    match bls.verify_aggregate(
        &participant_pubkeys,
        &signing_root,
        &sync_aggregate.sync_committee_signature,
    ) {
        Ok(true) => Ok(()),
        Ok(false) => Err(UpdateError::InvalidSignature),
        Err(BlsError::MalformedSignature { .. }) => Err(UpdateError::InvalidSignature),
        Err(other) => Err(UpdateError::MalformedInput {
            reason: other.to_string(),
        }),
    }
}
