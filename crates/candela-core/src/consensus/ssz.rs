//! SSZ merkleization: just enough of the hashing scheme to compute the two
//! structural roots the update pipeline verifies proofs against.

use crate::types::beacon::{BeaconBlockHeader, BlsPublicKey, Hash32, SyncCommittee};
use sha2::{Digest, Sha256};

/// SHA256 hash of arbitrary data.
pub(crate) fn sha256(data: &[u8]) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// SHA256 hash of two 32-byte nodes concatenated.
pub(crate) fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(a);
    data[32..].copy_from_slice(b);
    sha256(&data)
}

/// Encode a u64 as a 32-byte SSZ leaf (little-endian, zero-padded).
fn uint64_to_leaf(value: u64) -> Hash32 {
    let mut leaf = [0u8; 32];
    leaf[..8].copy_from_slice(&value.to_le_bytes());
    leaf
}

/// Merkleize a chunk list: pad with zero chunks to the next power of two,
/// then reduce pairwise to a single root.
fn merkleize_chunks(chunks: &[Hash32]) -> Hash32 {
    if chunks.is_empty() {
        return [0u8; 32];
    }
    let width = chunks.len().next_power_of_two();
    let mut layer = chunks.to_vec();
    layer.resize(width, [0u8; 32]);
    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }
    layer[0]
}

/// SSZ `hash_tree_root` of a 48-byte pubkey: two 32-byte chunks, the second
/// zero-padded.
fn hash_tree_root_pubkey(pubkey: &BlsPublicKey) -> Hash32 {
    let mut chunks = [[0u8; 32]; 2];
    chunks[0].copy_from_slice(&pubkey.0[..32]);
    chunks[1][..16].copy_from_slice(&pubkey.0[32..]);
    hash_pair(&chunks[0], &chunks[1])
}

/// SSZ `hash_tree_root` of a beacon block header.
///
/// The header is a container of 5 fields, so its 5 leaves are padded to 8
/// chunks: [slot, proposer_index, parent_root, state_root, body_root, 0, 0, 0].
pub fn hash_tree_root_header(header: &BeaconBlockHeader) -> Hash32 {
    let chunks = [
        uint64_to_leaf(header.slot),
        uint64_to_leaf(header.proposer_index),
        header.parent_root,
        header.state_root,
        header.body_root,
    ];
    merkleize_chunks(&chunks)
}

/// SSZ `hash_tree_root` of a sync committee.
///
/// Container of two fields: the root of the 512-pubkey vector (512 pubkey
/// roots merkleized, depth 9) and the root of the aggregate pubkey.
pub fn hash_tree_root_sync_committee(committee: &SyncCommittee) -> Hash32 {
    let pubkey_roots: Vec<Hash32> = committee
        .pubkeys
        .iter()
        .map(hash_tree_root_pubkey)
        .collect();
    let pubkeys_root = merkleize_chunks(&pubkey_roots);
    let aggregate_root = hash_tree_root_pubkey(&committee.aggregate_pubkey);
    hash_pair(&pubkeys_root, &aggregate_root)
}
