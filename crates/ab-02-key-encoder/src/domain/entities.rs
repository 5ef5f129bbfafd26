//! # Key Encoder Entities

use shared_types::{AdvertisementKey, LookupId};

/// A candidate that decompresses to a P-224 point, with the attempt that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidKey {
    pub attempt: u32,
    pub key: AdvertisementKey,
}

/// Both lookup ids of one bit position: the key the beacon would use if the
/// bit were set, and the one it would use if it were clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitLookup {
    pub message_id: u32,
    pub bit_index: u32,
    pub true_id: LookupId,
    pub false_id: LookupId,
}

impl BitLookup {
    /// The lookup id for `bit`.
    pub fn id_for(&self, bit: bool) -> &LookupId {
        if bit {
            &self.true_id
        } else {
            &self.false_id
        }
    }
}
