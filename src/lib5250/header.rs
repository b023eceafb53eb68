//! Record header decoding
//!
//! Every 5250 record starts with the RFC 1205 GDS header:
//!
//! ```text
//!  0-1  logical record length (includes the header)
//!  2-3  record type, 0x12A0
//!  4-5  reserved
//!  6    variable header length (0x04)
//!  7    flags
//!  8    reserved
//!  9    operation code
//! 10-11 error code, only when the help-in-error-state flag is set
//! ```

use serde::Serialize;

use crate::error::DecodeResult;
use crate::lib5250::codes::*;
use crate::lib5250::cursor::DecodeCursor;
use crate::lib5250::fields::{bit_items, named_value, Item, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub length: u16,
    pub record_type: u16,
    pub reserved: u16,
    pub variable_length: u8,
    pub flags: u8,
    pub reserved2: u8,
    pub opcode: u8,
    pub error_code: Option<u16>,
}

impl Header {
    /// Size of the header without the optional error code
    pub const SIZE: usize = 10;

    pub fn decode(cur: &mut DecodeCursor<'_>) -> DecodeResult<Self> {
        cur.ensure(Self::SIZE)?;
        if cur.peek_at(7).is_some_and(|flags| flags & HEADER_FLAG_HLP != 0) {
            cur.ensure(Self::SIZE + 2)?;
        }
        let length = cur.read_u16()?;
        let record_type = cur.read_u16()?;
        let reserved = cur.read_u16()?;
        let variable_length = cur.read_u8()?;
        let flags = cur.read_u8()?;
        let reserved2 = cur.read_u8()?;
        let opcode = cur.read_u8()?;
        let error_code = if flags & HEADER_FLAG_HLP != 0 {
            Some(cur.read_u16()?)
        } else {
            None
        };

        if record_type != GDS_RECORD_TYPE {
            log::debug!("non-standard record type 0x{:04X}", record_type);
        }

        Ok(Self {
            length,
            record_type,
            reserved,
            variable_length,
            flags,
            reserved2,
            opcode,
            error_code,
        })
    }

    /// Bytes the header occupies on the wire
    pub fn size(&self) -> usize {
        if self.error_code.is_some() {
            Self::SIZE + 2
        } else {
            Self::SIZE
        }
    }

    pub fn is_gds(&self) -> bool {
        self.record_type == GDS_RECORD_TYPE
    }

    pub fn is_negative_response(&self) -> bool {
        self.flags & HEADER_FLAG_ERR != 0
    }

    pub fn opcode_name(&self) -> &'static str {
        lookup(OPCODES, self.opcode).unwrap_or("Unknown")
    }

    /// Render the header, assuming it starts at record offset 0
    pub fn to_item(&self) -> Item {
        let record_type = if self.is_gds() {
            Value::Named {
                raw: u64::from(self.record_type),
                name: "General Data Stream",
            }
        } else {
            Value::Named {
                raw: u64::from(self.record_type),
                name: "Non-standard record type",
            }
        };
        let mut children = vec![
            Item::new(0, 2, "header.length", Value::Uint(u64::from(self.length))),
            Item::new(2, 2, "header.record_type", record_type),
            Item::new(4, 2, "header.reserved", Value::Uint(u64::from(self.reserved))),
            Item::new(6, 1, "header.variable_length", Value::Uint(u64::from(self.variable_length))),
            Item::new(7, 1, "header.flags", Value::Uint(u64::from(self.flags)))
                .with_children(bit_items(7, 1, u16::from(self.flags), HEADER_FLAG_BITS)),
            Item::new(8, 1, "header.reserved", Value::Uint(u64::from(self.reserved2))),
            Item::new(9, 1, "header.opcode", named_value(OPCODES, self.opcode)),
        ];
        if let Some(code) = self.error_code {
            let mut item = Item::new(10, 2, "header.error_code", Value::Uint(u64::from(code)));
            if let Some(message) = u8::try_from(code).ok().and_then(get_error_message) {
                item.children.push(Item::new(
                    10,
                    2,
                    "header.error_code.message",
                    Value::Text(message.to_string()),
                ));
            }
            children.push(item);
        }
        Item::new(0, self.size(), "header", Value::None).with_children(children)
    }
}
