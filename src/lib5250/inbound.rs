//! Inbound (terminal → host) record decoding
//!
//! A terminal answers with one of:
//! - an error code carried in the header (help in error state),
//! - a 4-byte negative response when the header flags a data stream error,
//! - cursor row/column and an attention identifier (AID) followed by field
//!   data, or by a query reply when the AID is Inbound Write Structured Field,
//! - occasionally an echo of host-style commands, or plain field data.

use serde::Serialize;

use crate::ebcdic;
use crate::error::{DecodeError, DecodeResult};
use crate::lib5250::codes::*;
use crate::lib5250::commands::{decode_commands, CommandStream};
use crate::lib5250::cursor::DecodeCursor;
use crate::lib5250::fields::*;
use crate::lib5250::header::Header;
use crate::lib5250::orders::{decode_orders, DataElement};

/// Device description returned for a 5250 Query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReply {
    pub offset: usize,
    pub length: usize,
    pub declared_length: u16,
    pub controller_class: Option<u16>,
    pub device_type: Option<String>,
    pub device_model: Option<String>,
    pub capabilities: Vec<u8>,
    pub fields: Vec<Item>,
}

impl QueryReply {
    pub fn to_item(&self) -> Item {
        Item::new(self.offset, self.length, "query_reply", Value::None).with_children(self.fields.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InboundKind {
    /// Header only
    Empty,
    /// Help-in-error-state: the code travels in the header
    ErrorCode(u16),
    NegativeResponse(u32),
    Aid {
        aid: u8,
        cursor: Option<(u8, u8)>,
        image_fax_error: Option<u16>,
        elements: Vec<DataElement>,
        query_reply: Option<QueryReply>,
    },
    Commands(CommandStream),
    FieldData(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundResponse {
    pub offset: usize,
    pub length: usize,
    pub kind: InboundKind,
    pub fields: Vec<Item>,
    pub trailing: Option<Item>,
}

impl InboundResponse {
    pub fn aid(&self) -> Option<u8> {
        match self.kind {
            InboundKind::Aid { aid, .. } => Some(aid),
            _ => None,
        }
    }

    pub fn to_item(&self) -> Item {
        let value = match &self.kind {
            InboundKind::Aid { aid, .. } => named_value(AIDS, *aid),
            InboundKind::ErrorCode(code) => Value::Uint(u64::from(*code)),
            InboundKind::NegativeResponse(code) => Value::Uint(u64::from(*code)),
            _ => Value::None,
        };
        let mut children = self.fields.clone();
        match &self.kind {
            InboundKind::Aid {
                elements, query_reply, ..
            } => {
                children.extend(elements.iter().map(DataElement::to_item));
                children.extend(query_reply.iter().map(QueryReply::to_item));
            }
            InboundKind::Commands(stream) => children.extend(stream.to_items()),
            _ => {}
        }
        children.extend(self.trailing.iter().cloned());
        Item::new(self.offset, self.length, "inbound", value).with_children(children)
    }
}

/// Decode the body of a terminal → host record.
pub fn decode_inbound(cur: &mut DecodeCursor<'_>, header: &Header, ctx: &mut DecodeContext<'_>) -> InboundResponse {
    let offset = cur.offset();
    let mut fields = Vec::new();

    let kind = if let Some(code) = header.error_code {
        InboundKind::ErrorCode(code)
    } else if header.is_negative_response() {
        match read_negative_response(cur, &mut fields) {
            Ok(code) => InboundKind::NegativeResponse(code),
            Err(err) => {
                ctx.report(err);
                InboundKind::Empty
            }
        }
    } else if cur.is_empty() {
        InboundKind::Empty
    } else if cur.peek_at(2).map_or(false, is_aid) {
        decode_aid_response(cur, ctx, &mut fields)
    } else if cur.peek_u8() == Some(ESC) {
        decode_echoed_commands(cur, ctx, &mut fields)
    } else {
        let data_offset = cur.offset();
        let data = cur.take_rest();
        fields.push(Item::new(data_offset, data.len(), "field_data", ctx.text(data)));
        InboundKind::FieldData(data.to_vec())
    };

    let trailing_offset = cur.offset();
    let rest = cur.take_rest();
    let trailing = (!rest.is_empty()).then(|| Item::unknown(trailing_offset, rest));

    InboundResponse {
        offset,
        length: cur.offset() - offset,
        kind,
        fields,
        trailing,
    }
}

fn read_negative_response(cur: &mut DecodeCursor<'_>, fields: &mut Vec<Item>) -> DecodeResult<u32> {
    let offset = cur.offset();
    let code = cur.read_u32()?;
    let reason = (code & 0xFF) as u8;
    fields.push(
        Item::new(offset, 4, "negative_response", Value::Uint(u64::from(code))).with_children(vec![
            Item::new(offset, 2, "negative_response.category", Value::Uint(u64::from(code >> 16))),
            Item::new(offset + 3, 1, "negative_response.code", named_value(NEGATIVE_RESPONSES, reason)),
        ]),
    );
    Ok(code)
}

fn decode_aid_response(
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    fields: &mut Vec<Item>,
) -> InboundKind {
    let offset = cur.offset();
    // The AID was found at offset + 2, so these three bytes are present
    let bytes = cur.slice(offset, offset + 3);
    let (lead, aid) = ([bytes[0], bytes[1]], bytes[2]);
    let _ = cur.skip(3);

    let mut cursor = None;
    let mut image_fax_error = None;
    if is_image_fax_aid(aid) {
        let code = u16::from_be_bytes(lead);
        fields.push(Item::new(offset, 2, "image_fax.error_code", Value::Uint(u64::from(code))));
        image_fax_error = Some(code);
    } else {
        fields.push(Item::new(offset, 2, "cursor", Value::Position { row: lead[0], col: lead[1] }));
        cursor = Some((lead[0], lead[1]));
    }
    fields.push(Item::new(offset + 2, 1, "aid", named_value(AIDS, aid)));
    log::debug!("inbound AID {} at offset {}", lookup(AIDS, aid).unwrap_or("Unknown"), offset + 2);

    let mut elements = Vec::new();
    let mut query_reply = None;
    if aid == AID_INBOUND_WRITE_STRUCTURED_FIELD {
        query_reply = decode_query_reply(cur, ctx);
    } else {
        elements = decode_orders(cur, ctx);
    }

    InboundKind::Aid {
        aid,
        cursor,
        image_fax_error,
        elements,
        query_reply,
    }
}

/// Some terminals echo host commands inbound. If nothing decodes as a
/// command, the bytes are treated as plain field data instead.
fn decode_echoed_commands(
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    fields: &mut Vec<Item>,
) -> InboundKind {
    if ctx.depth >= ctx.config.max_nesting_depth {
        ctx.report(DecodeError::NestingTooDeep {
            offset: cur.offset(),
            depth: ctx.depth,
        });
        return InboundKind::Empty;
    }

    let mark = ctx.diagnostics.len();
    let mut probe = cur.clone();
    ctx.depth += 1;
    let stream = decode_commands(&mut probe, ctx);
    ctx.depth -= 1;

    if stream.commands.is_empty() {
        ctx.diagnostics.truncate(mark);
        let offset = cur.offset();
        let data = cur.take_rest();
        log::debug!("inbound escape at offset {} is not a command, keeping as field data", offset);
        fields.push(Item::new(offset, data.len(), "field_data", ctx.text(data)));
        return InboundKind::FieldData(data.to_vec());
    }
    *cur = probe;
    InboundKind::Commands(stream)
}

const QUERY_REPLY_FIELDS: &[FieldSpec] = &[
    FieldSpec::bits("query_reply.flags", 1, QUERY_FLAG_BITS),
    FieldSpec::uint("query_reply.controller_hardware_class", 2),
    FieldSpec::bytes("query_reply.controller_code_level", 3),
    FieldSpec::reserved(16),
    FieldSpec::named("query_reply.device_category", DEVICE_CATEGORIES),
    FieldSpec::ebcdic("query_reply.device_type", 4),
    FieldSpec::ebcdic("query_reply.device_model", 3),
    FieldSpec::uint("query_reply.keyboard_id", 1),
    FieldSpec::uint("query_reply.extended_keyboard_id", 1),
    FieldSpec::reserved(1),
    FieldSpec::bytes("query_reply.serial_number", 4),
    FieldSpec::uint("query_reply.max_input_fields", 2),
    FieldSpec::uint("query_reply.control_unit_customization", 1),
    FieldSpec::reserved(2),
];

const QUERY_CAPABILITIES: &[FieldSpec] = &[
    FieldSpec::bits("query_reply.capability1", 1, QUERY_CAPABILITY1_BITS),
    FieldSpec::bits("query_reply.capability2", 1, QUERY_CAPABILITY2_BITS),
    FieldSpec::bits("query_reply.capability3", 1, QUERY_CAPABILITY3_BITS),
];

/// Offsets within the body that follows the class and type bytes
const DEVICE_TYPE_AT: usize = 23;
const DEVICE_MODEL_AT: usize = 27;
const CAPABILITIES_AT: usize = 42;

fn decode_query_reply(cur: &mut DecodeCursor<'_>, ctx: &mut DecodeContext<'_>) -> Option<QueryReply> {
    let offset = cur.offset();
    let declared_length = match cur.read_u16() {
        Ok(length) => length,
        Err(err) => {
            ctx.report(err);
            return None;
        }
    };
    let mut fields = vec![Item::new(offset, 2, "query_reply.length", Value::Uint(u64::from(declared_length)))];
    let mut reply = QueryReply {
        offset,
        length: 2,
        declared_length,
        controller_class: None,
        device_type: None,
        device_model: None,
        capabilities: Vec::new(),
        fields: Vec::new(),
    };

    let declared = usize::from(declared_length);
    if declared < 4 {
        ctx.report(DecodeError::StructuralLengthMismatch {
            offset,
            declared,
            minimum: 4,
        });
        reply.fields = fields;
        return Some(reply);
    }

    let (mut window, truncation) = cur.split_clamped(declared - 2);
    if let Some(err) = truncation {
        ctx.report(err);
    }

    let header = [
        FieldSpec::uint("query_reply.class", 1),
        FieldSpec::named("query_reply.type", MAJOR_TYPES),
    ];
    let result = read_fields(&mut window, &header, ctx, &mut fields).and_then(|_| {
        let body = window.slice(window.offset(), window.end());
        reply.controller_class = body.get(1..3).map(|b| u16::from_be_bytes([b[0], b[1]]));
        reply.device_type = body.get(DEVICE_TYPE_AT..DEVICE_TYPE_AT + 4).map(ebcdic::decode);
        reply.device_model = body.get(DEVICE_MODEL_AT..DEVICE_MODEL_AT + 3).map(ebcdic::decode);
        reply.capabilities = body.get(CAPABILITIES_AT..).map(<[u8]>::to_vec).unwrap_or_default();
        read_fields(&mut window, QUERY_REPLY_FIELDS, ctx, &mut fields)
    });
    if let Err(err) = result {
        ctx.report(err);
    } else {
        read_available_fields(&mut window, QUERY_CAPABILITIES, ctx, &mut fields);
        read_rest_bytes(&mut window, "query_reply.capabilities", &mut fields);
    }
    push_unknown_rest(&mut window, &mut fields);

    reply.length = cur.offset() - offset;
    reply.fields = fields;
    Some(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecoderConfig;
    use crate::lib5250::orders::Order;

    fn header(flags: u8, error_code: Option<u16>) -> Header {
        Header {
            length: 0,
            record_type: GDS_RECORD_TYPE,
            reserved: 0,
            variable_length: VARIABLE_HEADER_LENGTH,
            flags,
            reserved2: 0,
            opcode: 0,
            error_code,
        }
    }

    fn decode(data: &[u8], header: &Header) -> (InboundResponse, Vec<DecodeError>) {
        let config = DecoderConfig::default();
        let mut ctx = DecodeContext::new(&config);
        let mut cur = DecodeCursor::new(data);
        let response = decode_inbound(&mut cur, header, &mut ctx);
        assert!(cur.is_empty());
        (response, ctx.diagnostics)
    }

    /// Query reply from an IBM 3180 model 2
    fn query_reply_body() -> Vec<u8> {
        let mut data = vec![0x00, 0x00, 0x88, 0x00, 0x3A, 0xD9, 0x70, 0x80, 0x06, 0x00, 0x01, 0x01, 0x00];
        data.extend_from_slice(&[0x00; 16]);
        data.push(0x01);
        data.extend_from_slice(&[0xF3, 0xF1, 0xF8, 0xF0]);
        data.extend_from_slice(&[0xF0, 0xF0, 0xF2]);
        data.extend_from_slice(&[0x02, 0x00, 0x00]);
        data.extend_from_slice(&[0x00, 0x61, 0x50, 0x00]);
        data.extend_from_slice(&[0xFF, 0xFF, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x23, 0x31, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        data
    }

    #[test]
    fn test_enter_with_field_data() {
        let data = [0x06, 0x14, 0xF1, SBA, 0x06, 0x14, 0xD8, 0xE2, 0xE8, 0xE2];
        let (response, diags) = decode(&data, &header(0, None));
        assert!(diags.is_empty());
        match &response.kind {
            InboundKind::Aid {
                aid, cursor, elements, ..
            } => {
                assert_eq!(*aid, 0xF1);
                assert_eq!(*cursor, Some((6, 20)));
                assert_eq!(elements[0].order(), Some(&Order::SetBufferAddress { row: 6, col: 20 }));
                assert_eq!(elements[1].literal(), Some(&[0xD8, 0xE2, 0xE8, 0xE2][..]));
            }
            other => panic!("unexpected {other:?}"),
        }
        let item = response.to_item();
        assert_eq!(item.value, Value::Named { raw: 0xF1, name: "Enter/Record Advance" });
    }

    #[test]
    fn test_query_reply() {
        let data = query_reply_body();
        let (response, diags) = decode(&data, &header(0, None));
        assert!(diags.is_empty(), "{diags:?}");
        match &response.kind {
            InboundKind::Aid {
                query_reply: Some(reply),
                ..
            } => {
                assert_eq!(reply.declared_length, 0x3A);
                assert_eq!(reply.length, 0x3A);
                assert_eq!(reply.controller_class, Some(0x0600));
                assert_eq!(reply.device_type.as_deref(), Some("3180"));
                assert_eq!(reply.device_model.as_deref(), Some("002"));
                assert_eq!(reply.capabilities.len(), 12);
                let item = reply.to_item();
                let cap = item.find("query_reply.capability1").unwrap();
                assert_eq!(cap.child("query.capability1.pa1_pa2").unwrap().value, Value::Flag(true));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_image_fax_aid_carries_error_code() {
        let data = [0x00, 0x07, AID_IMAGE_FAX_ERROR];
        let (response, _) = decode(&data, &header(0, None));
        match response.kind {
            InboundKind::Aid {
                cursor, image_fax_error, ..
            } => {
                assert_eq!(cursor, None);
                assert_eq!(image_fax_error, Some(7));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_negative_response() {
        let data = [0x10, 0x05, 0x01, 0x22];
        let (response, diags) = decode(&data, &header(HEADER_FLAG_ERR, None));
        assert!(diags.is_empty());
        assert_eq!(response.kind, InboundKind::NegativeResponse(0x1005_0122));
        let item = response.to_item();
        let code = item.find("negative_response.code").unwrap();
        assert_eq!(
            code.value,
            Value::Named {
                raw: 0x22,
                name: "Write to display order row/col address is not valid"
            }
        );
    }

    #[test]
    fn test_short_negative_response() {
        let data = [0x10, 0x05];
        let (response, diags) = decode(&data, &header(HEADER_FLAG_ERR, None));
        assert!(diags[0].is_truncation());
        assert!(response.trailing.unwrap().is_unknown());
    }

    #[test]
    fn test_error_code_from_header() {
        let (response, _) = decode(&[], &header(HEADER_FLAG_HLP, Some(0x0012)));
        assert_eq!(response.kind, InboundKind::ErrorCode(0x0012));
    }

    #[test]
    fn test_echoed_command() {
        let data = [ESC, CMD_CLEAR_UNIT];
        let (response, diags) = decode(&data, &header(0, None));
        assert!(diags.is_empty());
        assert!(matches!(response.kind, InboundKind::Commands(ref s) if s.commands.len() == 1));
    }

    #[test]
    fn test_escape_without_command_is_field_data() {
        let data = [ESC, 0x99, 0xC1];
        let (response, diags) = decode(&data, &header(0, None));
        assert!(diags.is_empty());
        assert_eq!(response.kind, InboundKind::FieldData(data.to_vec()));
    }

    #[test]
    fn test_unformatted_field_data() {
        let data = [0xC8, 0xC9];
        let (response, _) = decode(&data, &header(0, None));
        assert_eq!(response.kind, InboundKind::FieldData(vec![0xC8, 0xC9]));
        assert_eq!(response.fields[0].value, Value::Text("HI".into()));
    }
}
