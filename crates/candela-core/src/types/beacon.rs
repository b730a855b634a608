use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

/// A 32-byte root hash (the output of SSZ `hash_tree_root`).
pub type Hash32 = [u8; 32];

/// Number of validators in the beacon chain sync committee.
pub const SYNC_COMMITTEE_SIZE: usize = 512;

/// Number of bytes in the sync committee participation bitfield (512 bits).
pub const SYNC_COMMITTEE_BITS_SIZE: usize = SYNC_COMMITTEE_SIZE / 8;

/// Number of bytes in a BLS12-381 public key (compressed G1 point).
pub const BLS_PUBKEY_LEN: usize = 48;

/// Number of bytes in a BLS12-381 signature (compressed G2 point).
pub const BLS_SIGNATURE_LEN: usize = 96;

/// Slots per epoch.
pub const SLOTS_PER_EPOCH: u64 = 32;

/// Epochs per sync committee period.
pub const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: u64 = 256;

/// Slots per sync committee period (256 epochs * 32 slots/epoch = 8192).
pub const SLOTS_PER_SYNC_COMMITTEE_PERIOD: u64 =
    SLOTS_PER_EPOCH * EPOCHS_PER_SYNC_COMMITTEE_PERIOD;

/// Domain type for sync committee signatures.
pub const DOMAIN_SYNC_COMMITTEE: [u8; 4] = [0x07, 0x00, 0x00, 0x00];

/// A BLS12-381 public key (48 bytes, compressed G1 point).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlsPublicKey(pub [u8; BLS_PUBKEY_LEN]);

impl Serialize for BlsPublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for BlsPublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

impl BlsPublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, &'static str> {
        if bytes.len() != BLS_PUBKEY_LEN {
            return Err("Invalid BLS public key length");
        }
        let mut arr = [0u8; BLS_PUBKEY_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// A BLS12-381 signature (96 bytes, compressed G2 point).
///
/// The fixed-size array is the length check: a signature of any other size
/// is unrepresentable past construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlsSignature(pub [u8; BLS_SIGNATURE_LEN]);

impl Serialize for BlsSignature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for BlsSignature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

impl BlsSignature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, &'static str> {
        if bytes.len() != BLS_SIGNATURE_LEN {
            return Err("Invalid BLS signature length");
        }
        let mut arr = [0u8; BLS_SIGNATURE_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// The 512-bit sync committee participation bitfield.
///
/// Bit `i` marks whether committee member `i` contributed to the aggregate
/// signature, in SSZ Bitvector order: bit `i % 8` of byte `i / 8`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncCommitteeBits(pub [u8; SYNC_COMMITTEE_BITS_SIZE]);

impl Serialize for SyncCommitteeBits {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for SyncCommitteeBits {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

impl SyncCommitteeBits {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, &'static str> {
        if bytes.len() != SYNC_COMMITTEE_BITS_SIZE {
            return Err("Invalid sync committee bitfield length");
        }
        let mut arr = [0u8; SYNC_COMMITTEE_BITS_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Count how many committee members participated (set bits).
    pub fn num_participants(&self) -> usize {
        self.0.view_bits::<Lsb0>().count_ones()
    }

    /// Check whether the committee member at `index` participated.
    pub fn has_participant(&self, index: usize) -> bool {
        index < SYNC_COMMITTEE_SIZE && self.0.view_bits::<Lsb0>()[index]
    }

    /// Indices of all participating committee members, ascending.
    pub fn participant_indices(&self) -> Vec<usize> {
        self.0.view_bits::<Lsb0>().iter_ones().collect()
    }

    /// Whether participation reaches the two-thirds supermajority:
    /// 3 * participants >= 2 * SYNC_COMMITTEE_SIZE.
    pub fn has_supermajority(&self) -> bool {
        3 * self.num_participants() >= 2 * SYNC_COMMITTEE_SIZE
    }
}

/// A beacon chain block header.
/// This is the minimal header — enough to track the chain without storing full blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconBlockHeader {
    /// Slot number of this block.
    pub slot: u64,
    /// Index of the validator who proposed this block.
    pub proposer_index: u64,
    /// Root hash of the parent beacon block.
    pub parent_root: Hash32,
    /// Root hash of the beacon state after processing this block.
    pub state_root: Hash32,
    /// Root hash of the block body.
    pub body_root: Hash32,
}

/// The sync committee — 512 validators that sign off on the chain head.
/// Rotates every 256 epochs (~27 hours).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCommittee {
    /// 512 BLS public keys of committee members.
    pub pubkeys: Vec<BlsPublicKey>,
    /// Aggregated public key over all members.
    pub aggregate_pubkey: BlsPublicKey,
}

impl SyncCommittee {
    /// Validate the sync committee has the correct number of members.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.pubkeys.len() != SYNC_COMMITTEE_SIZE {
            return Err("Sync committee must have exactly 512 members");
        }
        Ok(())
    }
}

/// The aggregate BLS signature from the sync committee, with the bitfield
/// naming which of the 512 members are behind it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAggregate {
    /// Which committee members signed; bit index equals committee index.
    pub sync_committee_bits: SyncCommitteeBits,
    /// The aggregated BLS signature from all participating members.
    pub sync_committee_signature: BlsSignature,
}

impl SyncAggregate {
    /// Count how many sync committee members participated.
    pub fn num_participants(&self) -> usize {
        self.sync_committee_bits.num_participants()
    }

    /// Whether participation reaches the two-thirds supermajority.
    pub fn has_supermajority(&self) -> bool {
        self.sync_committee_bits.has_supermajority()
    }
}

/// A finalized-header update from the beacon chain.
///
/// This is what relayers submit to advance our view of finality. Every field
/// is untrusted until the verification pipeline has accepted the whole update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinalizedHeaderUpdate {
    /// The header the sync committee signed over.
    pub attested_header: BeaconBlockHeader,
    /// The sync committee for the next period.
    pub next_sync_committee: SyncCommittee,
    /// Merkle branch proving next_sync_committee against the attested state.
    pub next_sync_committee_branch: Vec<Hash32>,
    /// The finalized header this update claims.
    pub finalized_header: BeaconBlockHeader,
    /// Merkle branch proving finalized_header against the attested state.
    pub finality_branch: Vec<Hash32>,
    /// The aggregate signature and participation bitfield.
    pub sync_aggregate: SyncAggregate,
    /// Fork version the signature was produced under.
    pub fork_version: [u8; 4],
    /// The slot at which the signature was produced.
    pub signature_slot: u64,
}

/// The verified state of the light client: the accumulated knowledge built
/// from the trusted checkpoint plus every accepted update since.
///
/// Fields are private to the crate: reads go through accessors, writes happen
/// only inside the update pipeline, so a header and a committee from two
/// different updates can never be observed together.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LightClientState {
    /// The latest finalized beacon block header we have verified.
    pub(crate) finalized_header: BeaconBlockHeader,
    /// The committee trusted to sign the next update. Named for its origin:
    /// it was proven as `next_sync_committee` by the previous accepted update
    /// (or supplied at the checkpoint).
    pub(crate) prev_sync_committee: SyncCommittee,
    /// Genesis validators root, fixed at initialization. Pins the chain
    /// identity into every signing domain.
    pub(crate) genesis_validators_root: Hash32,
    /// Execution-layer state root of the finalized block. Reserved for
    /// execution payload proofs; nothing populates it yet.
    pub(crate) latest_execution_payload_state_root: Option<Hash32>,
}

impl LightClientState {
    /// The latest finalized header.
    pub fn finalized_header(&self) -> &BeaconBlockHeader {
        &self.finalized_header
    }

    /// The beacon state root of the latest finalized header.
    pub fn finalized_state_root(&self) -> Hash32 {
        self.finalized_header.state_root
    }

    /// The `hash_tree_root` of the latest finalized header.
    pub fn finalized_header_root(&self) -> Hash32 {
        crate::consensus::ssz::hash_tree_root_header(&self.finalized_header)
    }

    /// The sync committee that must sign the next accepted update.
    pub fn sync_committee(&self) -> &SyncCommittee {
        &self.prev_sync_committee
    }

    /// The genesis validators root this state was initialized with.
    pub fn genesis_validators_root(&self) -> Hash32 {
        self.genesis_validators_root
    }

    /// The sync committee period of the latest finalized header.
    pub fn finalized_period(&self) -> u64 {
        self.finalized_header.slot / SLOTS_PER_SYNC_COMMITTEE_PERIOD
    }

    /// Check if the client has finalized at least the given slot.
    pub fn is_synced_to(&self, slot: u64) -> bool {
        self.finalized_header.slot >= slot
    }

    /// Execution-layer state root of the finalized block, once execution
    /// payload proofs are wired up. Currently always `None`.
    pub fn execution_payload_state_root(&self) -> Option<Hash32> {
        self.latest_execution_payload_state_root
    }
}
