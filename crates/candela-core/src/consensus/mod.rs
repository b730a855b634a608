pub mod bls;
pub mod checkpoint;
pub mod light_client;
pub mod merkle;
pub mod ssz;
pub mod sync_committee;

pub use bls::*;
pub use checkpoint::*;
pub use light_client::*;
pub use merkle::*;
pub use ssz::*;
pub use sync_committee::*;
