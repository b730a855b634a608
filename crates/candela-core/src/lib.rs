//! # Candela Core
//!
//! Beacon chain light client verification logic.
//!
//! This crate contains **no networking code** and **no host bindings**.
//! It is the cryptographic heart of Candela: a relayer-supplied update only
//! moves the client's view of finality after the whole verification pipeline
//! has accepted it.
//!
//! ## Trust Model
//!
//! - **Checkpoint agreement** (`consensus::checkpoint`): the one moment of
//!   soft trust. Multiple independent sources must agree on the starting
//!   block root before it may seed the state.
//!
//! - **Sync committee verification** (`consensus` module): verifies BLS12-381
//!   aggregate signatures from the 512-member sync committee. Trusts that
//!   2/3+ of the committee is honest (the same assumption the chain itself
//!   makes).
//!
//! Everything after the checkpoint is derived knowledge: each accepted update
//! carries Merkle proofs tying the new finalized header and the next sync
//! committee to a state root the trusted committee signed over.
//!
//! ## Usage
//!
//! ```ignore
//! use candela_core::consensus::{initialize_from_checkpoint, process_finalized_header_update};
//! use candela_core::consensus::bls::BlstVerifier;
//! ```

pub mod consensus;
pub mod types;

// Re-export commonly used items for convenience
pub use consensus::{
    bls::{BlsError, BlsVerifier, BlstVerifier},
    checkpoint::{
        agree_on_checkpoint, parse_checkpoint_root, AgreedCheckpoint, CheckpointError,
        CheckpointSource,
    },
    light_client::{initialize_from_checkpoint, process_finalized_header_update},
    merkle::verify_merkle_branch,
    ssz::{hash_tree_root_header, hash_tree_root_sync_committee},
    sync_committee::{sync_committee_period, verify_sync_committee_signature, UpdateError},
};
pub use types::beacon::*;
