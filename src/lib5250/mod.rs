//! 5250 data stream decoding
//!
//! Byte-exact decoding of records carried over a TN5250 connection: header,
//! outbound command streams, orders, structured fields and inbound responses.

pub mod codes;
pub mod commands;
pub mod cursor;
pub mod fields;
pub mod header;
pub mod inbound;
pub mod orders;
pub mod record;
pub mod structured_field;

// Re-exports for easy access
pub use commands::{decode_commands, Command, CommandBlock, CommandStream, Wcc};
pub use cursor::DecodeCursor;
pub use fields::{DecodeContext, Item, Value, UNKNOWN_DATA};
pub use header::Header;
pub use inbound::{decode_inbound, InboundKind, InboundResponse, QueryReply};
pub use orders::{decode_orders, DataElement, ElementKind, Order};
pub use record::{decode_record, decode_record_as, DecodedRecord, RecordBody};
pub use structured_field::{decode_structured_field, MinorStructure, StructuredField};
