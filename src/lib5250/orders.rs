//! Orders and literal data inside write commands
//!
//! The body of Write To Display (and of inbound field data) is a flat
//! sequence of orders interleaved with runs of EBCDIC character data. An
//! escape byte ends the sequence: it introduces the next command.

use serde::Serialize;

use crate::error::{CodeKind, DecodeError, DecodeResult};
use crate::lib5250::codes::*;
use crate::lib5250::cursor::DecodeCursor;
use crate::lib5250::fields::*;
use crate::lib5250::structured_field::{decode_structured_field, StructuredField};

/// Typed content of one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Order {
    SetBufferAddress { row: u8, col: u8 },
    InsertCursor { row: u8, col: u8 },
    MoveCursor { row: u8, col: u8 },
    RepeatToAddress { row: u8, col: u8, data: Vec<u8> },
    EraseToAddress { row: u8, col: u8, attribute_types: Vec<u8> },
    StartOfHeader {
        length: u8,
        flags: Option<u8>,
        resequence: Option<u8>,
        error_row: Option<u8>,
        command_keys: Vec<u8>,
    },
    TransparentData { data: Vec<u8> },
    WriteExtendedAttribute { attribute_type: u8, value: u8 },
    StartOfField {
        ffw: Option<u16>,
        fcws: Vec<u16>,
        attribute: u8,
        length: u16,
    },
    WriteToDisplayStructuredField(StructuredField),
}

impl Order {
    pub fn code(&self) -> OrderCode {
        match self {
            Order::SetBufferAddress { .. } => OrderCode::SetBufferAddress,
            Order::InsertCursor { .. } => OrderCode::InsertCursor,
            Order::MoveCursor { .. } => OrderCode::MoveCursor,
            Order::RepeatToAddress { .. } => OrderCode::RepeatToAddress,
            Order::EraseToAddress { .. } => OrderCode::EraseToAddress,
            Order::StartOfHeader { .. } => OrderCode::StartOfHeader,
            Order::TransparentData { .. } => OrderCode::TransparentData,
            Order::WriteExtendedAttribute { .. } => OrderCode::WriteExtendedAttribute,
            Order::StartOfField { .. } => OrderCode::StartOfField,
            Order::WriteToDisplayStructuredField(_) => OrderCode::WriteToDisplayStructuredField,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ElementKind {
    Order(Order),
    /// A run of character data between orders
    Literal { data: Vec<u8>, text: Value },
    /// An order cut short by the end of input
    Incomplete(OrderCode),
}

/// One element of an order stream together with its detail items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataElement {
    pub offset: usize,
    pub length: usize,
    pub kind: ElementKind,
    pub fields: Vec<Item>,
}

impl DataElement {
    pub fn order(&self) -> Option<&Order> {
        match &self.kind {
            ElementKind::Order(order) => Some(order),
            _ => None,
        }
    }

    pub fn literal(&self) -> Option<&[u8]> {
        match &self.kind {
            ElementKind::Literal { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn to_item(&self) -> Item {
        match &self.kind {
            ElementKind::Literal { text, .. } => Item::new(self.offset, self.length, "field_data", text.clone()),
            ElementKind::Order(order) => {
                let mut children = self.fields.clone();
                if let Order::WriteToDisplayStructuredField(sf) = order {
                    children.push(sf.to_item());
                }
                Item::new(self.offset, self.length, "order", named_value(ORDERS, order.code().to_u8()))
                    .with_children(children)
            }
            ElementKind::Incomplete(code) => {
                Item::new(self.offset, self.length, "order", named_value(ORDERS, code.to_u8()))
                    .with_children(self.fields.clone())
            }
        }
    }
}

/// True for bytes that end a literal run
pub fn is_order_or_escape(byte: u8) -> bool {
    byte == ESC || OrderCode::from_u8(byte).is_some()
}

/// Decode orders and literal runs until the window ends or an escape byte
/// introduces the next command.
///
/// Decoding stops early after an order that could not be completed: orders
/// carry no length prefix to resynchronise on.
pub fn decode_orders(cur: &mut DecodeCursor<'_>, ctx: &mut DecodeContext<'_>) -> Vec<DataElement> {
    let mut elements = Vec::new();
    while let Some(byte) = cur.peek_u8() {
        if byte == ESC {
            break;
        }
        match OrderCode::from_u8(byte) {
            Some(code) => {
                let element = decode_order(code, cur, ctx);
                let incomplete = matches!(element.kind, ElementKind::Incomplete(_));
                elements.push(element);
                if incomplete {
                    break;
                }
            }
            None => elements.push(decode_literal(cur, ctx)),
        }
    }
    elements
}

fn decode_literal(cur: &mut DecodeCursor<'_>, ctx: &DecodeContext<'_>) -> DataElement {
    let offset = cur.offset();
    let data = cur.take_until(is_order_or_escape);
    DataElement {
        offset,
        length: data.len(),
        kind: ElementKind::Literal {
            data: data.to_vec(),
            text: ctx.text(data),
        },
        fields: Vec::new(),
    }
}

/// Decode the order at the cursor. A failure is recorded and the rest of the
/// window is attached to the element as unknown data.
pub fn decode_order(code: OrderCode, cur: &mut DecodeCursor<'_>, ctx: &mut DecodeContext<'_>) -> DataElement {
    let offset = cur.offset();
    log::trace!("order {:?} at offset {}", code, offset);
    let mut fields = Vec::new();
    let kind = match read_order(code, cur, ctx, &mut fields) {
        Ok(order) => ElementKind::Order(order),
        Err(err) => {
            ctx.report(err);
            push_unknown_rest(cur, &mut fields);
            ElementKind::Incomplete(code)
        }
    };
    DataElement {
        offset,
        length: cur.offset() - offset,
        kind,
        fields,
    }
}

fn read_position(cur: &mut DecodeCursor<'_>, fields: &mut Vec<Item>) -> DecodeResult<(u8, u8)> {
    let offset = cur.offset();
    let bytes = cur.read_bytes(2)?;
    fields.push(Item::position(offset, bytes[0], bytes[1]));
    Ok((bytes[0], bytes[1]))
}

const SOH_FIELDS: &[FieldSpec] = &[
    FieldSpec::bits("soh.flags", 1, SOH_FLAG_BITS),
    FieldSpec::reserved(1),
    FieldSpec::uint("soh.resequence", 1),
    FieldSpec::uint("soh.error_row", 1),
    FieldSpec::bits("soh.keys_f24_f17", 1, SOH_KEYS_F24_F17),
    FieldSpec::bits("soh.keys_f16_f9", 1, SOH_KEYS_F16_F9),
    FieldSpec::bits("soh.keys_f8_f1", 1, SOH_KEYS_F8_F1),
];

fn read_order(
    code: OrderCode,
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    fields: &mut Vec<Item>,
) -> DecodeResult<Order> {
    cur.skip(1)?;
    let order = match code {
        OrderCode::SetBufferAddress => {
            let (row, col) = read_position(cur, fields)?;
            Order::SetBufferAddress { row, col }
        }
        OrderCode::InsertCursor => {
            let (row, col) = read_position(cur, fields)?;
            Order::InsertCursor { row, col }
        }
        OrderCode::MoveCursor => {
            let (row, col) = read_position(cur, fields)?;
            Order::MoveCursor { row, col }
        }
        OrderCode::RepeatToAddress => {
            let (row, col) = read_position(cur, fields)?;
            let offset = cur.offset();
            let data = cur.take_until(is_order_or_escape);
            if !data.is_empty() {
                fields.push(Item::new(offset, data.len(), "ra.data", ctx.text(data)));
            }
            Order::RepeatToAddress {
                row,
                col,
                data: data.to_vec(),
            }
        }
        OrderCode::EraseToAddress => {
            let (row, col) = read_position(cur, fields)?;
            let count = cur.read_u8()?;
            fields.push(Item::new(cur.offset() - 1, 1, "ea.count", Value::Uint(u64::from(count))));
            let mut attribute_types = Vec::with_capacity(usize::from(count));
            for _ in 0..count {
                let item = read_field(cur, &FieldSpec::named("ea.attribute_type", EA_ATTRIBUTE_TYPES), None)?;
                attribute_types.push(item.as_uint().unwrap_or_default() as u8);
                fields.push(item);
            }
            Order::EraseToAddress {
                row,
                col,
                attribute_types,
            }
        }
        OrderCode::StartOfHeader => {
            let length = cur.read_u8()?;
            fields.push(Item::new(cur.offset() - 1, 1, "soh.length", Value::Uint(u64::from(length))));
            if length > SOH_MAX_LENGTH {
                log::debug!("start of header length {} exceeds {}", length, SOH_MAX_LENGTH);
            }
            let mut window = cur.split(usize::from(length))?;
            let body = window.slice(window.offset(), window.end());
            read_available_fields(&mut window, SOH_FIELDS, ctx, fields);
            push_unknown_rest(&mut window, fields);
            Order::StartOfHeader {
                length,
                flags: body.first().copied(),
                resequence: body.get(2).copied(),
                error_row: body.get(3).copied(),
                command_keys: body.iter().skip(4).take(3).copied().collect(),
            }
        }
        OrderCode::TransparentData => {
            let length = cur.read_u16()?;
            fields.push(Item::new(cur.offset() - 2, 2, "td.length", Value::Uint(u64::from(length))));
            let offset = cur.offset();
            let data = cur.read_bytes(usize::from(length))?;
            fields.push(Item::new(offset, data.len(), "td.data", Value::Bytes(data.to_vec())));
            Order::TransparentData { data: data.to_vec() }
        }
        OrderCode::WriteExtendedAttribute => {
            let offset = cur.offset();
            let attribute_type = cur.read_u8()?;
            fields.push(Item::new(offset, 1, "wea.type", named_value(WEA_TYPES, attribute_type)));
            let value = cur.read_u8()?;
            let item = match attribute_type {
                WEA_PRIMARY_ATTRIBUTE => Item::new(offset + 1, 1, "wea.primary", Value::Uint(u64::from(value)))
                    .with_children(bit_items(offset + 1, 1, u16::from(value), EXTENDED_PRIMARY_BITS)),
                WEA_FOREGROUND_COLOR => Item::new(
                    offset + 1,
                    1,
                    "wea.foreground_color",
                    named_value(EXTENDED_FOREGROUND_COLORS, value),
                ),
                WEA_IDEOGRAPHIC => {
                    Item::new(offset + 1, 1, "wea.ideographic", named_value(EXTENDED_IDEOGRAPHIC, value))
                }
                other => {
                    ctx.report(DecodeError::UnknownCode {
                        kind: CodeKind::AttributeType,
                        code: other,
                        offset,
                    });
                    Item::new(offset + 1, 1, "wea.value", Value::Uint(u64::from(value)))
                }
            };
            fields.push(item);
            Order::WriteExtendedAttribute { attribute_type, value }
        }
        OrderCode::StartOfField => read_start_of_field(cur, fields)?,
        OrderCode::WriteToDisplayStructuredField => {
            Order::WriteToDisplayStructuredField(decode_structured_field(cur, ctx)?)
        }
    };
    Ok(order)
}

fn read_start_of_field(cur: &mut DecodeCursor<'_>, fields: &mut Vec<Item>) -> DecodeResult<Order> {
    let mut ffw = None;
    let mut fcws = Vec::new();

    if cur.peek_u8().map_or(false, |b| b & FFW_ID_MASK == FFW_ID) {
        let item = read_bits(cur, "sf.ffw", 2, FFW_BITS)?;
        ffw = item.as_uint().map(|v| v as u16);
        fields.push(item);

        // Field control words only follow a field format word
        while cur.peek_u8().map_or(false, is_fcw) {
            let offset = cur.offset();
            let word = cur.read_u16()?;
            let [kind, data] = word.to_be_bytes();
            fields.push(
                Item::new(offset, 2, "sf.fcw", Value::Uint(u64::from(word))).with_children(vec![
                    Item::new(offset, 1, "sf.fcw.type", named_value(FCW_TYPES, kind)),
                    Item::new(offset + 1, 1, "sf.fcw.data", Value::Uint(u64::from(data))),
                ]),
            );
            fcws.push(word);
        }
    }

    let offset = cur.offset();
    let attribute = cur.read_u8()?;
    fields.push(attribute_item(offset, "sf.attribute", attribute));

    let length = cur.read_u16()?;
    fields.push(Item::new(offset + 1, 2, "sf.length", Value::Uint(u64::from(length))));

    Ok(Order::StartOfField {
        ffw,
        fcws,
        attribute,
        length,
    })
}

/// A display attribute byte: packed bits when it carries the attribute
/// identifier, otherwise a bare colour code.
pub fn attribute_item(offset: usize, tag: &'static str, attribute: u8) -> Item {
    if !is_field_attribute(attribute) {
        return Item::new(offset, 1, tag, named_value(ATTRIBUTE_COLORS, attribute));
    }
    let mut children = bit_items(offset, 1, u16::from(attribute), FIELD_ATTRIBUTE_BITS);
    children.push(Item::new(
        offset,
        1,
        "attribute.nondisplay",
        Value::Flag(attribute & 0x07 == 0x07),
    ));
    if let Some(name) = lookup(ATTRIBUTE_COLORS, attribute) {
        children.push(Item::new(
            offset,
            1,
            "attribute.color",
            Value::Named {
                raw: u64::from(attribute),
                name,
            },
        ));
    }
    Item::new(offset, 1, tag, Value::Uint(u64::from(attribute))).with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecoderConfig;

    fn decode(data: &[u8]) -> (Vec<DataElement>, Vec<DecodeError>) {
        let config = DecoderConfig::default();
        let mut ctx = DecodeContext::new(&config);
        let mut cur = DecodeCursor::new(data);
        let elements = decode_orders(&mut cur, &mut ctx);
        (elements, ctx.diagnostics)
    }

    #[test]
    fn test_sba_literal_ic_sequence() {
        let data = [SBA, 0x05, 0x0A, 0xC1, 0xC2, 0xC3, IC, 0x05, 0x0A];
        let (elements, diags) = decode(&data);
        assert!(diags.is_empty());
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].order(), Some(&Order::SetBufferAddress { row: 5, col: 10 }));
        assert_eq!(elements[1].literal(), Some(&[0xC1, 0xC2, 0xC3][..]));
        assert_eq!(elements[1].offset, 3);
        assert_eq!(elements[2].order(), Some(&Order::InsertCursor { row: 5, col: 10 }));
    }

    #[test]
    fn test_escape_ends_orders() {
        let data = [SBA, 0x01, 0x01, 0xC1, ESC, CMD_CLEAR_UNIT];
        let mut cur_data = DecodeCursor::new(&data);
        let config = DecoderConfig::default();
        let mut ctx = DecodeContext::new(&config);
        let elements = decode_orders(&mut cur_data, &mut ctx);
        assert_eq!(elements.len(), 2);
        assert_eq!(cur_data.offset(), 4);
    }

    #[test]
    fn test_start_of_field_input_field() {
        // FFW 0x4000, FCW continuous entry, green underscore attribute, length 10
        let data = [SF, 0x40, 0x00, 0x86, 0x01, 0x24, 0x00, 0x0A];
        let (elements, diags) = decode(&data);
        assert!(diags.is_empty());
        assert_eq!(
            elements[0].order(),
            Some(&Order::StartOfField {
                ffw: Some(0x4000),
                fcws: vec![0x8601],
                attribute: 0x24,
                length: 10,
            })
        );
        let item = elements[0].to_item();
        let attr = item.child("sf.attribute").unwrap();
        assert_eq!(attr.child("attribute.underscore").unwrap().value, Value::Flag(true));
    }

    #[test]
    fn test_start_of_field_output_only() {
        let data = [SF, 0x27, 0x00, 0x05];
        let (elements, _) = decode(&data);
        let item = elements[0].to_item();
        let attr = item.child("sf.attribute").unwrap();
        assert_eq!(attr.child("attribute.nondisplay").unwrap().value, Value::Flag(true));
        assert_eq!(item.length, 4);
    }

    #[test]
    fn test_transparent_data_overrun() {
        let data = [TD, 0x00, 0x20, 0xC1, 0xC2];
        let (elements, diags) = decode(&data);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].is_truncation());
        assert_eq!(elements.len(), 1);
        assert!(matches!(elements[0].kind, ElementKind::Incomplete(OrderCode::TransparentData)));
        assert_eq!(elements[0].length, data.len());
        assert!(elements[0].fields.last().unwrap().is_unknown());
    }

    #[test]
    fn test_erase_to_address() {
        let data = [EA, 0x18, 0x50, 0x02, 0x01, 0x03];
        let (elements, diags) = decode(&data);
        assert!(diags.is_empty());
        assert_eq!(
            elements[0].order(),
            Some(&Order::EraseToAddress {
                row: 24,
                col: 80,
                attribute_types: vec![0x01, 0x03],
            })
        );
    }

    #[test]
    fn test_start_of_header() {
        let data = [SOH, 0x07, 0x00, 0x00, 0x00, 0x18, 0x00, 0x00, 0x81];
        let (elements, diags) = decode(&data);
        assert!(diags.is_empty());
        match elements[0].order() {
            Some(Order::StartOfHeader {
                length,
                error_row,
                command_keys,
                ..
            }) => {
                assert_eq!(*length, 7);
                assert_eq!(*error_row, Some(0x18));
                assert_eq!(command_keys, &vec![0x00, 0x00, 0x81]);
            }
            other => panic!("unexpected {other:?}"),
        }
        let item = elements[0].to_item();
        let keys = item.child("soh.keys_f8_f1").unwrap();
        assert_eq!(keys.child("soh.key.f8").unwrap().value, Value::Flag(true));
        assert_eq!(keys.child("soh.key.f1").unwrap().value, Value::Flag(true));
    }

    #[test]
    fn test_short_start_of_header() {
        let data = [SOH, 0x01, 0x00, SBA, 0x01, 0x01];
        let (elements, diags) = decode(&data);
        assert!(diags.is_empty());
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].length, 3);
    }

    #[test]
    fn test_write_extended_attribute() {
        let data = [WEA, WEA_FOREGROUND_COLOR, 0x28, WEA, 0x09, 0x00];
        let (elements, diags) = decode(&data);
        assert_eq!(elements.len(), 2);
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            diags[0],
            DecodeError::UnknownCode {
                kind: CodeKind::AttributeType,
                code: 0x09,
                ..
            }
        ));
        let item = elements[0].to_item();
        assert_eq!(
            item.child("wea.foreground_color").unwrap().value,
            Value::Named { raw: 0x28, name: "Red" }
        );
    }

    #[test]
    fn test_repeat_to_address_owns_following_data() {
        let data = [RA, 0x02, 0x50, 0x60, SBA, 0x03, 0x01];
        let (elements, _) = decode(&data);
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements[0].order(),
            Some(&Order::RepeatToAddress {
                row: 2,
                col: 80,
                data: vec![0x60],
            })
        );
    }
}
