//! Record entry point
//!
//! Decodes one complete 5250 record: the header, then either the outbound
//! command stream or the inbound response depending on which side of the
//! conversation sent it.

use std::net::SocketAddr;

use serde::Serialize;

use crate::config::DecoderConfig;
use crate::conversation::{ConversationState, Role};
use crate::error::{DecodeError, DecodeResult};
use crate::lib5250::commands::{decode_commands, CommandStream};
use crate::lib5250::cursor::DecodeCursor;
use crate::lib5250::fields::{DecodeContext, Item, Value};
use crate::lib5250::header::Header;
use crate::lib5250::inbound::{decode_inbound, InboundResponse};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecordBody {
    Outbound(CommandStream),
    Inbound(InboundResponse),
}

/// The decoded form of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRecord {
    pub role: Role,
    pub extended: bool,
    /// Bytes in the buffer handed to the decoder
    pub length: usize,
    pub header: Header,
    pub body: RecordBody,
    /// Absolute offset where decoding of the logical record stopped
    pub consumed: usize,
    /// Bytes past the logical record length
    pub trailing: Option<Item>,
    pub diagnostics: Vec<DecodeError>,
}

impl DecodedRecord {
    pub fn outbound(&self) -> Option<&CommandStream> {
        match &self.body {
            RecordBody::Outbound(stream) => Some(stream),
            RecordBody::Inbound(_) => None,
        }
    }

    pub fn inbound(&self) -> Option<&InboundResponse> {
        match &self.body {
            RecordBody::Inbound(response) => Some(response),
            RecordBody::Outbound(_) => None,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Render the whole record as one item tree
    pub fn to_item(&self) -> Item {
        let role = match self.role {
            Role::Host => "host",
            Role::Terminal => "terminal",
        };
        let mut children = vec![
            Item::new(0, 0, "conversation.role", Value::Text(role.to_string())),
            Item::new(0, 0, "conversation.extended", Value::Flag(self.extended)),
            self.header.to_item(),
        ];
        match &self.body {
            RecordBody::Outbound(stream) => children.extend(stream.to_items()),
            RecordBody::Inbound(response) => children.push(response.to_item()),
        }
        children.extend(self.trailing.iter().cloned());
        Item::new(0, self.length, "tn5250", Value::None).with_children(children)
    }
}

/// Decode a record sent by `source` on the given conversation.
///
/// Returns `Err` only when the header cannot be read; every other problem is
/// recorded in [`DecodedRecord::diagnostics`].
pub fn decode_record(
    bytes: &[u8],
    conversation: &ConversationState,
    source: SocketAddr,
    config: &DecoderConfig,
) -> DecodeResult<DecodedRecord> {
    decode_record_as(bytes, conversation.role_of(source), conversation.is_extended(), config)
}

/// Decode a record whose direction is already known.
pub fn decode_record_as(
    bytes: &[u8],
    role: Role,
    extended: bool,
    config: &DecoderConfig,
) -> DecodeResult<DecodedRecord> {
    let mut cur = DecodeCursor::new(bytes);
    let header = Header::decode(&mut cur)?;
    let mut ctx = DecodeContext::new(config);
    log::debug!(
        "{:?} record, {} bytes, logical length {}, opcode {}",
        role,
        bytes.len(),
        header.length,
        header.opcode_name()
    );

    let logical = usize::from(header.length);
    if logical < header.size() {
        ctx.report(DecodeError::StructuralLengthMismatch {
            offset: 0,
            declared: logical,
            minimum: header.size(),
        });
    } else if logical > bytes.len() {
        ctx.report(DecodeError::TruncatedRecord {
            offset: 0,
            needed: logical,
            available: bytes.len(),
        });
    }

    let body_len = logical.min(bytes.len()).saturating_sub(cur.offset());
    let mut body_cur = match cur.split(body_len) {
        Ok(body_cur) => body_cur,
        Err(err) => {
            ctx.report(err);
            cur.split_clamped(0).0
        }
    };

    let body = match role {
        Role::Host => RecordBody::Outbound(decode_commands(&mut body_cur, &mut ctx)),
        Role::Terminal => RecordBody::Inbound(decode_inbound(&mut body_cur, &header, &mut ctx)),
    };
    let consumed = body_cur.offset();

    let trailing_offset = cur.offset();
    let rest = cur.take_rest();
    let trailing = (!rest.is_empty()).then(|| Item::unknown(trailing_offset, rest));

    Ok(DecodedRecord {
        role,
        extended,
        length: bytes.len(),
        header,
        body,
        consumed,
        trailing,
        diagnostics: ctx.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ConnectionId, ConversationStore};
    use crate::lib5250::codes::*;

    fn record(opcode: u8, body: &[u8]) -> Vec<u8> {
        let len = (10 + body.len()) as u16;
        let mut data = len.to_be_bytes().to_vec();
        data.extend_from_slice(&[0x12, 0xA0, 0x00, 0x00, 0x04, 0x00, 0x00, opcode]);
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn test_role_selects_decoder() {
        let config = DecoderConfig::default();
        let mut store = ConversationStore::new(&config);
        let host: SocketAddr = "10.1.1.1:23".parse().unwrap();
        let term: SocketAddr = "10.1.1.2:51000".parse().unwrap();
        let state = store.lookup_or_create(ConnectionId(1), term, host).clone();

        let out = record(0x03, &[ESC, CMD_CLEAR_UNIT]);
        let decoded = decode_record(&out, &state, host, &config).unwrap();
        assert_eq!(decoded.role, Role::Host);
        assert_eq!(decoded.outbound().unwrap().commands.len(), 1);
        assert_eq!(decoded.consumed, out.len());

        let inb = record(0x00, &[0x01, 0x01, 0xF1]);
        let decoded = decode_record(&inb, &state, term, &config).unwrap();
        assert_eq!(decoded.role, Role::Terminal);
        assert_eq!(decoded.inbound().unwrap().aid(), Some(0xF1));
        assert!(decoded.is_clean());
    }

    #[test]
    fn test_bytes_past_logical_length() {
        let config = DecoderConfig::default();
        let mut data = record(0x03, &[ESC, CMD_CLEAR_UNIT]);
        data.extend_from_slice(&[0xFF, 0xEF]);
        let decoded = decode_record_as(&data, Role::Host, false, &config).unwrap();
        assert!(decoded.is_clean());
        assert_eq!(decoded.consumed, 12);
        let trailing = decoded.trailing.unwrap();
        assert_eq!((trailing.offset, trailing.length), (12, 2));
    }

    #[test]
    fn test_logical_length_past_buffer() {
        let config = DecoderConfig::default();
        let mut data = record(0x03, &[ESC, CMD_CLEAR_UNIT]);
        data[1] = 0x40;
        let decoded = decode_record_as(&data, Role::Host, false, &config).unwrap();
        assert!(decoded.diagnostics[0].is_truncation());
        assert_eq!(decoded.consumed, data.len());
    }

    #[test]
    fn test_logical_length_below_header() {
        let config = DecoderConfig::default();
        let mut data = record(0x03, &[ESC, CMD_CLEAR_UNIT]);
        data[1] = 0x04;
        let decoded = decode_record_as(&data, Role::Host, false, &config).unwrap();
        assert!(matches!(
            decoded.diagnostics[0],
            DecodeError::StructuralLengthMismatch { declared: 4, minimum: 10, .. }
        ));
        assert!(decoded.outbound().unwrap().is_empty());
        assert_eq!(decoded.trailing.unwrap().length, 2);
    }

    #[test]
    fn test_short_header_fails() {
        let config = DecoderConfig::default();
        assert!(decode_record_as(&[0x00, 0x0A, 0x12], Role::Host, false, &config).is_err());
    }

    #[test]
    fn test_root_item_carries_conversation() {
        let config = DecoderConfig::default();
        let data = record(0x03, &[ESC, CMD_CLEAR_UNIT]);
        let decoded = decode_record_as(&data, Role::Host, true, &config).unwrap();
        let root = decoded.to_item();
        assert_eq!(root.length, data.len());
        assert_eq!(root.child("conversation.extended").unwrap().value, Value::Flag(true));
        assert!(root.find("command").is_some());
    }
}
