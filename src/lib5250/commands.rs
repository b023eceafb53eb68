//! Outbound command dispatch
//!
//! Host → terminal records carry a sequence of commands, each introduced by
//! the escape byte. The dispatcher reads the escape byte and command code and
//! routes the body to the matching decoder.

use serde::Serialize;

use crate::error::{CodeKind, DecodeError, DecodeResult};
use crate::lib5250::codes::*;
use crate::lib5250::cursor::DecodeCursor;
use crate::lib5250::fields::*;
use crate::lib5250::orders::{attribute_item, decode_order, decode_orders, DataElement, Order};
use crate::lib5250::structured_field::{decode_structured_field, StructuredField};

/// Write control character pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Wcc {
    pub cc1: u8,
    pub cc2: u8,
}

impl Wcc {
    pub fn unlocks_keyboard(&self) -> bool {
        self.cc2 & 0x08 != 0
    }

    pub fn sounds_alarm(&self) -> bool {
        self.cc2 & 0x04 != 0
    }
}

/// Message body of Write Error Code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub cursor: Option<(u8, u8)>,
    pub leading_attribute: Option<u8>,
    pub message: Vec<u8>,
    pub trailing_attribute: Option<u8>,
}

/// Screen rectangle of the partial save/restore commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenRegion {
    pub flags: u8,
    pub top_row: u8,
    pub left_column: u8,
    pub depth: u8,
    pub width: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Command {
    ClearUnit,
    ClearUnitAlternate { parameter: u8 },
    ClearFormatTable,
    CopyToPrinter { option: u8 },
    WriteToDisplay { wcc: Wcc, elements: Vec<DataElement> },
    WriteErrorCode(ErrorMessage),
    WriteErrorCodeToWindow {
        start_column: u8,
        end_column: u8,
        message: ErrorMessage,
    },
    /// Read Input Fields, Read MDT Fields and Read MDT Alternate
    ReadWithControl { code: CommandCode, wcc: Wcc },
    /// The read commands without a body
    Read { code: CommandCode },
    SaveScreen,
    SavePartialScreen(ScreenRegion),
    RestoreScreen(CommandStream),
    RestorePartialScreen(ScreenRegion),
    Roll { down: bool, lines: u8, top_row: u8, bottom_row: u8 },
    WriteStructuredField(StructuredField),
    WriteSingleStructuredField(StructuredField),
    /// Body cut short; what was read is in the block's fields
    Incomplete { code: CommandCode },
}

/// One escape-introduced command and its detail items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandBlock {
    pub offset: usize,
    pub length: usize,
    pub code: CommandCode,
    pub command: Command,
    pub fields: Vec<Item>,
}

impl CommandBlock {
    pub fn to_item(&self) -> Item {
        let mut children = vec![
            Item::new(self.offset, 1, "escape", Value::Uint(u64::from(ESC))),
            Item::new(self.offset + 1, 1, "command.code", named_value(COMMANDS, self.code.to_u8())),
        ];
        children.extend(self.fields.iter().cloned());
        match &self.command {
            Command::WriteToDisplay { elements, .. } => {
                children.extend(elements.iter().map(DataElement::to_item));
            }
            Command::RestoreScreen(stream) => children.extend(stream.to_items()),
            Command::WriteStructuredField(sf) | Command::WriteSingleStructuredField(sf) => {
                children.push(sf.to_item());
            }
            _ => {}
        }
        Item::new(self.offset, self.length, "command", named_value(COMMANDS, self.code.to_u8()))
            .with_children(children)
    }
}

/// A sequence of commands plus any bytes that did not start with an escape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandStream {
    pub commands: Vec<CommandBlock>,
    pub unknown: Option<Item>,
}

impl CommandStream {
    pub fn to_items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.commands.iter().map(CommandBlock::to_item).collect();
        items.extend(self.unknown.iter().cloned());
        items
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.unknown.is_none()
    }
}

/// Decode commands until the window is exhausted.
///
/// A byte where an escape is expected, or an unknown command code, ends the
/// stream: the remainder is kept as unknown data.
pub fn decode_commands(cur: &mut DecodeCursor<'_>, ctx: &mut DecodeContext<'_>) -> CommandStream {
    let mut stream = CommandStream::default();

    while let Some(byte) = cur.peek_u8() {
        let start = cur.offset();
        if byte != ESC {
            ctx.report(DecodeError::UnknownCode {
                kind: CodeKind::Escape,
                code: byte,
                offset: start,
            });
            stream.unknown = Some(Item::unknown(start, cur.take_rest()));
            break;
        }
        let Some(code_byte) = cur.peek_at(1) else {
            ctx.report(cur.truncated(2));
            stream.unknown = Some(Item::unknown(start, cur.take_rest()));
            break;
        };
        let Some(code) = CommandCode::from_u8(code_byte) else {
            ctx.report(DecodeError::UnknownCode {
                kind: CodeKind::Command,
                code: code_byte,
                offset: start + 1,
            });
            stream.unknown = Some(Item::unknown(start, cur.take_rest()));
            break;
        };

        let block = decode_command(code, cur, ctx);
        let incomplete = matches!(block.command, Command::Incomplete { .. });
        stream.commands.push(block);
        if incomplete {
            break;
        }
    }
    stream
}

fn decode_command(code: CommandCode, cur: &mut DecodeCursor<'_>, ctx: &mut DecodeContext<'_>) -> CommandBlock {
    let offset = cur.offset();
    log::debug!("command {} at offset {}", code.name(), offset);
    let mut fields = Vec::new();

    let command = match cur.skip(2).and_then(|_| read_command(code, cur, ctx, &mut fields)) {
        Ok(command) => command,
        Err(err) => {
            ctx.report(err);
            push_unknown_rest(cur, &mut fields);
            Command::Incomplete { code }
        }
    };
    CommandBlock {
        offset,
        length: cur.offset() - offset,
        code,
        command,
        fields,
    }
}

fn read_wcc(cur: &mut DecodeCursor<'_>, fields: &mut Vec<Item>) -> DecodeResult<Wcc> {
    let offset = cur.offset();
    let cc1 = cur.read_u8()?;
    fields.push(Item::new(offset, 1, "wcc.cc1", named_value(CC1_VALUES, cc1 & 0xE0)));
    let cc2 = cur.read_u8()?;
    fields.push(
        Item::new(offset + 1, 1, "wcc.cc2", Value::Uint(u64::from(cc2)))
            .with_children(bit_items(offset + 1, 1, u16::from(cc2), CC2_BITS)),
    );
    Ok(Wcc { cc1, cc2 })
}

fn read_region(cur: &mut DecodeCursor<'_>, ctx: &DecodeContext<'_>, fields: &mut Vec<Item>) -> DecodeResult<ScreenRegion> {
    let raw = cur.slice(cur.offset(), cur.offset() + 5);
    read_fields(
        cur,
        &[
            FieldSpec::bits("region.flags", 1, PARTIAL_SCREEN_BITS),
            FieldSpec::uint("region.top_row", 1),
            FieldSpec::uint("region.left_column", 1),
            FieldSpec::uint("region.depth", 1),
            FieldSpec::uint("region.width", 1),
        ],
        ctx,
        fields,
    )?;
    Ok(ScreenRegion {
        flags: raw[0],
        top_row: raw[1],
        left_column: raw[2],
        depth: raw[3],
        width: raw[4],
    })
}

fn read_command(
    code: CommandCode,
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    fields: &mut Vec<Item>,
) -> DecodeResult<Command> {
    let command = match code {
        CommandCode::ClearUnit => Command::ClearUnit,
        CommandCode::ClearFormatTable => Command::ClearFormatTable,
        CommandCode::SaveScreen => Command::SaveScreen,
        CommandCode::ClearUnitAlternate => {
            ctx.skip_ff_marker(cur, fields);
            let item = read_field(
                cur,
                &FieldSpec::named("clear_unit_alternate.parameter", CLEAR_UNIT_ALTERNATE_PARAMS),
                None,
            )?;
            let parameter = item.as_uint().unwrap_or_default() as u8;
            fields.push(item);
            Command::ClearUnitAlternate { parameter }
        }
        CommandCode::CopyToPrinter => {
            let option = cur.read_u8()?;
            fields.push(Item::new(cur.offset() - 1, 1, "copy_to_printer.option", Value::Uint(u64::from(option))));
            Command::CopyToPrinter { option }
        }
        CommandCode::WriteToDisplay => {
            let wcc = read_wcc(cur, fields)?;
            let elements = decode_orders(cur, ctx);
            Command::WriteToDisplay { wcc, elements }
        }
        CommandCode::ReadInputFields | CommandCode::ReadMdtFields | CommandCode::ReadMdtFieldsAlt => {
            let wcc = read_wcc(cur, fields)?;
            Command::ReadWithControl { code, wcc }
        }
        CommandCode::ReadScreenImmediate
        | CommandCode::ReadScreenExtended
        | CommandCode::ReadScreenPrint
        | CommandCode::ReadScreenPrintExtended
        | CommandCode::ReadScreenPrintGrid
        | CommandCode::ReadScreenPrintExtGrid
        | CommandCode::ReadImmediate
        | CommandCode::ReadImmediateAlt => Command::Read { code },
        CommandCode::WriteErrorCode => Command::WriteErrorCode(read_error_message(cur, ctx, fields)?),
        CommandCode::WriteErrorCodeWindow => {
            let offset = cur.offset();
            let columns = cur.read_bytes(2)?;
            fields.push(Item::new(offset, 1, "wec_window.start_column", Value::Uint(u64::from(columns[0]))));
            fields.push(Item::new(offset + 1, 1, "wec_window.end_column", Value::Uint(u64::from(columns[1]))));
            let message = read_error_message(cur, ctx, fields)?;
            Command::WriteErrorCodeToWindow {
                start_column: columns[0],
                end_column: columns[1],
                message,
            }
        }
        CommandCode::SavePartialScreen => Command::SavePartialScreen(read_region(cur, ctx, fields)?),
        CommandCode::RestorePartialScreen => Command::RestorePartialScreen(read_region(cur, ctx, fields)?),
        CommandCode::RestoreScreen => {
            if ctx.depth >= ctx.config.max_nesting_depth {
                return Err(DecodeError::NestingTooDeep {
                    offset: cur.offset(),
                    depth: ctx.depth,
                });
            }
            ctx.depth += 1;
            let stream = decode_commands(cur, ctx);
            ctx.depth -= 1;
            Command::RestoreScreen(stream)
        }
        CommandCode::Roll => {
            let offset = cur.offset();
            let bytes = cur.read_bytes(3)?;
            fields.push(
                Item::new(offset, 1, "roll.control", Value::Uint(u64::from(bytes[0])))
                    .with_children(bit_items(offset, 1, u16::from(bytes[0]), ROLL_BITS)),
            );
            fields.push(Item::new(offset + 1, 1, "roll.top_row", Value::Uint(u64::from(bytes[1]))));
            fields.push(Item::new(offset + 2, 1, "roll.bottom_row", Value::Uint(u64::from(bytes[2]))));
            Command::Roll {
                down: bytes[0] & 0x80 != 0,
                lines: bytes[0] & 0x1F,
                top_row: bytes[1],
                bottom_row: bytes[2],
            }
        }
        CommandCode::WriteStructuredField => Command::WriteStructuredField(decode_structured_field(cur, ctx)?),
        CommandCode::WriteSingleStructuredField => {
            Command::WriteSingleStructuredField(decode_structured_field(cur, ctx)?)
        }
    };
    Ok(command)
}

/// Write Error Code body: an optional Insert Cursor order, a leading
/// attribute, the message text and a trailing attribute. The body runs to
/// the next escape byte or the end of the record.
fn read_error_message(
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    fields: &mut Vec<Item>,
) -> DecodeResult<ErrorMessage> {
    let mut message = ErrorMessage {
        cursor: None,
        leading_attribute: None,
        message: Vec::new(),
        trailing_attribute: None,
    };

    if cur.peek_u8() == Some(IC) {
        let element = decode_order(OrderCode::InsertCursor, cur, ctx);
        if let Some(Order::InsertCursor { row, col }) = element.order() {
            message.cursor = Some((*row, *col));
        }
        let incomplete = element.order().is_none();
        fields.push(element.to_item());
        if incomplete {
            return Ok(message);
        }
    }

    let mut body = cur.split(cur.distance_to(ESC))?;
    if body.is_empty() {
        return Ok(message);
    }

    ctx.skip_ff_marker(&mut body, fields);
    let offset = body.offset();
    let leading = body.read_u8()?;
    fields.push(attribute_item(offset, "wec.attribute", leading));
    message.leading_attribute = Some(leading);

    let text_len = body.remaining().saturating_sub(1);
    let offset = body.offset();
    let text = body.read_bytes(text_len)?;
    if !text.is_empty() {
        fields.push(Item::new(offset, text.len(), "wec.message", ctx.text(text)));
        message.message = text.to_vec();
    }

    if let Some(trailing) = body.peek_u8() {
        let offset = body.offset();
        body.skip(1)?;
        fields.push(attribute_item(offset, "wec.trailing_attribute", trailing));
        message.trailing_attribute = Some(trailing);
    }
    Ok(message)
}
