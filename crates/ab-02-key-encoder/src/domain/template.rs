//! # Key Templates
//!
//! Firmware revisions disagree on the order of the bit index and the message id.
//! Each revision is a `KeyTemplate`; the active one is picked from
//! `KeyTemplateParams::layout`.
//!
//! ```text
//! byte   0..2   2..6        6..10       10..14    14..18   18..27  27
//!        magic  bit index   message id  modem id  attempt  zero    bit   (index-first)
//!        magic  message id  bit index   modem id  attempt  zero    bit   (message-first)
//! ```

use shared_types::{AdvertisementKey, KeyLayout, KeyTemplateParams, PUBLIC_KEY_LEN};

/// A firmware key layout.
pub trait KeyTemplate: Send + Sync {
    /// Which layout this template implements.
    fn layout(&self) -> KeyLayout;

    /// Build the raw candidate for one bit. Pure and deterministic.
    fn construct(&self, message_id: u32, bit_index: u32, bit: bool, attempt: u32)
        -> AdvertisementKey;
}

const ATTEMPT_OFFSET: usize = 14;
const MODEM_OFFSET: usize = 10;
const BIT_FLAG_OFFSET: usize = PUBLIC_KEY_LEN - 1;

fn assemble(
    magic: [u8; 2],
    modem_id: [u8; 4],
    first: u32,
    second: u32,
    attempt: u32,
    bit: bool,
) -> AdvertisementKey {
    let mut key = [0u8; PUBLIC_KEY_LEN];
    key[..2].copy_from_slice(&magic);
    key[2..6].copy_from_slice(&first.to_be_bytes());
    key[6..MODEM_OFFSET].copy_from_slice(&second.to_be_bytes());
    key[MODEM_OFFSET..ATTEMPT_OFFSET].copy_from_slice(&modem_id);
    key[ATTEMPT_OFFSET..ATTEMPT_OFFSET + 4].copy_from_slice(&attempt.to_be_bytes());
    key[BIT_FLAG_OFFSET] = u8::from(bit);
    key
}

/// Current firmware: bit index before message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexFirstTemplate {
    magic: [u8; 2],
    modem_id: [u8; 4],
}

impl IndexFirstTemplate {
    pub fn new(magic: [u8; 2], modem_id: [u8; 4]) -> Self {
        Self { magic, modem_id }
    }
}

impl KeyTemplate for IndexFirstTemplate {
    fn layout(&self) -> KeyLayout {
        KeyLayout::IndexFirst
    }

    fn construct(
        &self,
        message_id: u32,
        bit_index: u32,
        bit: bool,
        attempt: u32,
    ) -> AdvertisementKey {
        assemble(self.magic, self.modem_id, bit_index, message_id, attempt, bit)
    }
}

/// Earlier firmware: message id before bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFirstTemplate {
    magic: [u8; 2],
    modem_id: [u8; 4],
}

impl MessageFirstTemplate {
    pub fn new(magic: [u8; 2], modem_id: [u8; 4]) -> Self {
        Self { magic, modem_id }
    }
}

impl KeyTemplate for MessageFirstTemplate {
    fn layout(&self) -> KeyLayout {
        KeyLayout::MessageFirst
    }

    fn construct(
        &self,
        message_id: u32,
        bit_index: u32,
        bit: bool,
        attempt: u32,
    ) -> AdvertisementKey {
        assemble(self.magic, self.modem_id, message_id, bit_index, attempt, bit)
    }
}

/// The template selected by `params.layout`.
pub fn template_for(params: &KeyTemplateParams) -> Box<dyn KeyTemplate> {
    match params.layout {
        KeyLayout::IndexFirst => Box::new(IndexFirstTemplate::new(params.magic, params.modem_id)),
        KeyLayout::MessageFirst => {
            Box::new(MessageFirstTemplate::new(params.magic, params.modem_id))
        }
    }
}
