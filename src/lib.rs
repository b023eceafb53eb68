/// ERROR TYPES: Decode diagnostics and configuration errors
pub mod error;

/// CONFIGURATION: Decoder settings loaded from JSON
pub mod config;

/// CONVERSATIONS: Per-connection host/terminal bookkeeping
pub mod conversation;

/// EBCDIC: Code page 037 conversion for text runs
pub mod ebcdic;

/// LIB5250: IBM 5250 data stream decoder
pub mod lib5250;

pub use config::DecoderConfig;
pub use conversation::{ConnectionId, ConversationState, ConversationStore, Role};
pub use error::{DecodeError, DecodeResult};
pub use lib5250::{decode_record, decode_record_as, DecodedRecord, Item, Value};
