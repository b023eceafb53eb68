//! Output items and the field-spec interpreter
//!
//! Every decoded element becomes an [`Item`]: the byte range it covers, a
//! stable tag, its interpreted value and any sub-items. Most fixed layouts in
//! the data stream are read through [`read_fields`] from a static list of
//! [`FieldSpec`]s instead of hand-written read/advance code.

use serde::Serialize;

use crate::config::DecoderConfig;
use crate::ebcdic;
use crate::error::{DecodeError, DecodeResult};
use crate::lib5250::codes::{lookup, BitRange, ValueTable};
use crate::lib5250::cursor::DecodeCursor;

/// Tag used for byte ranges that could not be interpreted
pub const UNKNOWN_DATA: &str = "unknown_data";

/// Interpreted value of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Value {
    None,
    Uint(u64),
    Named { raw: u64, name: &'static str },
    Flag(bool),
    Position { row: u8, col: u8 },
    Text(String),
    Bytes(Vec<u8>),
}

/// One decoded element: (offset, length, tag, value, sub-tree)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub offset: usize,
    pub length: usize,
    pub tag: &'static str,
    pub value: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Item>,
}

impl Item {
    pub fn new(offset: usize, length: usize, tag: &'static str, value: Value) -> Self {
        Self {
            offset,
            length,
            tag,
            value,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Item>) -> Self {
        self.children = children;
        self
    }

    /// Opaque bytes that no structure could account for
    pub fn unknown(offset: usize, bytes: &[u8]) -> Self {
        Self::new(offset, bytes.len(), UNKNOWN_DATA, Value::Bytes(bytes.to_vec()))
    }

    pub fn position(offset: usize, row: u8, col: u8) -> Self {
        Self::new(offset, 2, "position", Value::Position { row, col })
    }

    pub fn is_unknown(&self) -> bool {
        self.tag == UNKNOWN_DATA
    }

    /// Numeric value of a `Uint` or `Named` item
    pub fn as_uint(&self) -> Option<u64> {
        match self.value {
            Value::Uint(v) | Value::Named { raw: v, .. } => Some(v),
            _ => None,
        }
    }

    /// First direct child carrying `tag`
    pub fn child(&self, tag: &str) -> Option<&Item> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Depth-first search for the first item carrying `tag`, including self
    pub fn find(&self, tag: &str) -> Option<&Item> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(tag))
    }

    /// Visit self and every descendant in pre-order.
    pub fn walk<'s>(&'s self, visit: &mut impl FnMut(&'s Item)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Render as an indented outline, one item per line.
    pub fn render(&self, indent: usize, out: &mut String) {
        use std::fmt::Write;
        let value = match &self.value {
            Value::None => String::new(),
            Value::Uint(v) => format!(": {v} (0x{v:02X})"),
            Value::Named { raw, name } => format!(": {name} (0x{raw:02X})"),
            Value::Flag(set) => format!(": {}", if *set { "set" } else { "not set" }),
            Value::Position { row, col } => format!(": row {row}, col {col}"),
            Value::Text(text) => format!(": \"{text}\""),
            Value::Bytes(bytes) => format!(": {}", hex(bytes)),
        };
        let _ = writeln!(
            out,
            "{:indent$}[{:4}+{:<3}] {}{}",
            "",
            self.offset,
            self.length,
            self.tag,
            value,
            indent = indent * 2
        );
        for child in &self.children {
            child.render(indent + 1, out);
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ")
}

/// How a fixed-width field is interpreted
#[derive(Debug, Clone, Copy)]
pub enum Interp {
    Uint,
    Named(ValueTable),
    Bits(&'static [BitRange]),
    Ebcdic,
    Bytes,
    Position,
}

/// One entry of a declarative field layout
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub tag: &'static str,
    pub width: usize,
    pub interp: Interp,
}

impl FieldSpec {
    pub const fn uint(tag: &'static str, width: usize) -> Self {
        Self { tag, width, interp: Interp::Uint }
    }

    pub const fn named(tag: &'static str, table: ValueTable) -> Self {
        Self { tag, width: 1, interp: Interp::Named(table) }
    }

    pub const fn bits(tag: &'static str, width: usize, bits: &'static [BitRange]) -> Self {
        Self { tag, width, interp: Interp::Bits(bits) }
    }

    pub const fn ebcdic(tag: &'static str, width: usize) -> Self {
        Self { tag, width, interp: Interp::Ebcdic }
    }

    pub const fn bytes(tag: &'static str, width: usize) -> Self {
        Self { tag, width, interp: Interp::Bytes }
    }

    pub const fn position() -> Self {
        Self { tag: "position", width: 2, interp: Interp::Position }
    }

    pub const fn reserved(width: usize) -> Self {
        Self { tag: "reserved", width, interp: Interp::Bytes }
    }
}

/// Per-record decoding state threaded through every decoder.
#[derive(Debug)]
pub struct DecodeContext<'c> {
    pub config: &'c DecoderConfig,
    /// Current nesting depth of self-embedding commands
    pub depth: usize,
    pub diagnostics: Vec<DecodeError>,
}

impl<'c> DecodeContext<'c> {
    pub fn new(config: &'c DecoderConfig) -> Self {
        Self {
            config,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Record a data-level failure
    pub fn report(&mut self, err: DecodeError) {
        log::warn!("{}", err);
        self.diagnostics.push(err);
    }

    /// Text value of an EBCDIC run, or the raw bytes when text decoding is off
    pub fn text(&self, bytes: &[u8]) -> Value {
        if self.config.decode_text {
            Value::Text(ebcdic::decode(bytes))
        } else {
            Value::Bytes(bytes.to_vec())
        }
    }

    /// Consume a lone 0xFF marker in front of a single-byte parameter.
    ///
    /// Only applies when at least one byte follows the marker, so a
    /// parameter that is itself 0xFF is never swallowed at the end of input.
    pub fn skip_ff_marker(&self, cur: &mut DecodeCursor<'_>, out: &mut Vec<Item>) {
        if self.config.skip_ff_marker && cur.peek_u8() == Some(0xFF) && cur.remaining() >= 2 {
            let offset = cur.offset();
            let _ = cur.skip(1);
            out.push(Item::new(offset, 1, "ff_marker", Value::Uint(0xFF)));
        }
    }
}

/// Sub-items for each named range of a bit-packed word
pub fn bit_items(offset: usize, width: usize, word: u16, bits: &[BitRange]) -> Vec<Item> {
    bits.iter()
        .map(|range| {
            let raw = range.extract(word);
            let value = if range.is_single_bit() {
                Value::Flag(raw != 0)
            } else {
                match range.values {
                    Some(table) if !table.is_empty() => Value::Named {
                        raw: u64::from(raw),
                        name: u8::try_from(raw)
                            .ok()
                            .and_then(|code| lookup(table, code))
                            .unwrap_or("Unknown"),
                    },
                    _ => Value::Uint(u64::from(raw)),
                }
            };
            Item::new(offset, width, range.tag, value)
        })
        .collect()
}

/// A named byte, "Unknown" when the table has no entry
pub fn named_value(table: ValueTable, code: u8) -> Value {
    Value::Named {
        raw: u64::from(code),
        name: lookup(table, code).unwrap_or("Unknown"),
    }
}

/// Read a bit-packed byte or word and expand its ranges.
pub fn read_bits(
    cur: &mut DecodeCursor<'_>,
    tag: &'static str,
    width: usize,
    bits: &'static [BitRange],
) -> DecodeResult<Item> {
    read_field(cur, &FieldSpec::bits(tag, width, bits), None)
}

/// Read one field according to `spec`.
pub fn read_field(
    cur: &mut DecodeCursor<'_>,
    spec: &FieldSpec,
    ctx: Option<&DecodeContext<'_>>,
) -> DecodeResult<Item> {
    let offset = cur.offset();
    let bytes = cur.read_bytes(spec.width)?;
    let uint = || bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    let item = match spec.interp {
        Interp::Uint => Item::new(offset, spec.width, spec.tag, Value::Uint(uint())),
        Interp::Named(table) => {
            let code = bytes.last().copied().unwrap_or(0);
            Item::new(offset, spec.width, spec.tag, named_value(table, code))
        }
        Interp::Bits(bits) => {
            let word = uint() as u16;
            Item::new(offset, spec.width, spec.tag, Value::Uint(u64::from(word)))
                .with_children(bit_items(offset, spec.width, word, bits))
        }
        Interp::Ebcdic => {
            let value = match ctx {
                Some(ctx) => ctx.text(bytes),
                None => Value::Text(ebcdic::decode(bytes)),
            };
            Item::new(offset, spec.width, spec.tag, value)
        }
        Interp::Bytes => Item::new(offset, spec.width, spec.tag, Value::Bytes(bytes.to_vec())),
        Interp::Position => {
            let (row, col) = (bytes.first().copied().unwrap_or(0), bytes.get(1).copied().unwrap_or(0));
            Item::new(offset, spec.width, spec.tag, Value::Position { row, col })
        }
    };
    Ok(item)
}

/// Read a sequence of fields in order, pushing each one as it completes.
///
/// Fields read before a failure stay in `out`, so a truncated structure
/// still shows everything that was present.
pub fn read_fields(
    cur: &mut DecodeCursor<'_>,
    specs: &[FieldSpec],
    ctx: &DecodeContext<'_>,
    out: &mut Vec<Item>,
) -> DecodeResult<()> {
    for spec in specs {
        out.push(read_field(cur, spec, Some(ctx))?);
    }
    Ok(())
}

/// Read the fields that fit in the window and stop at the first that
/// does not. Used where a length byte legitimately shortens a layout.
pub fn read_available_fields(
    cur: &mut DecodeCursor<'_>,
    specs: &[FieldSpec],
    ctx: &DecodeContext<'_>,
    out: &mut Vec<Item>,
) {
    for spec in specs {
        if cur.remaining() < spec.width {
            break;
        }
        if let Ok(item) = read_field(cur, spec, Some(ctx)) {
            out.push(item);
        }
    }
}

/// Everything left in the window as one EBCDIC text item
pub fn read_rest_text(
    cur: &mut DecodeCursor<'_>,
    tag: &'static str,
    ctx: &DecodeContext<'_>,
    out: &mut Vec<Item>,
) {
    let offset = cur.offset();
    let bytes = cur.take_rest();
    if !bytes.is_empty() {
        out.push(Item::new(offset, bytes.len(), tag, ctx.text(bytes)));
    }
}

/// Everything left in the window as one raw-bytes item
pub fn read_rest_bytes(cur: &mut DecodeCursor<'_>, tag: &'static str, out: &mut Vec<Item>) {
    let offset = cur.offset();
    let bytes = cur.take_rest();
    if !bytes.is_empty() {
        out.push(Item::new(offset, bytes.len(), tag, Value::Bytes(bytes.to_vec())));
    }
}

/// Emit whatever is left in the window as `unknown_data`.
pub fn push_unknown_rest(cur: &mut DecodeCursor<'_>, out: &mut Vec<Item>) {
    let offset = cur.offset();
    let bytes = cur.take_rest();
    if !bytes.is_empty() {
        out.push(Item::unknown(offset, bytes));
    }
}
