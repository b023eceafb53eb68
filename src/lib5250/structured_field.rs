//! Structured field decoding
//!
//! A structured field (major structure) is length-prefixed:
//!
//! ```text
//!  0-1  length, including these two bytes
//!  2    class, always 0xD9
//!  3    major type
//!  4..  type-specific body
//! ```
//!
//! Some major types follow a fixed part with a sequence of minor structures,
//! each `length, minor type, payload`. The body is decoded through a cursor
//! bounded to the declared length, so no reader can run into the next
//! structure; whatever a reader leaves behind is emitted as unknown data.

use serde::Serialize;

use crate::error::{CodeKind, DecodeError, DecodeResult};
use crate::lib5250::codes::*;
use crate::lib5250::cursor::DecodeCursor;
use crate::lib5250::fields::*;

/// Length, class and major type
pub const MAJOR_HEADER_SIZE: usize = 4;
/// Length and minor type
pub const MINOR_HEADER_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinorStructure {
    pub offset: usize,
    pub length: u8,
    pub minor_type: u8,
    pub name: &'static str,
    pub fields: Vec<Item>,
}

impl MinorStructure {
    pub fn to_item(&self) -> Item {
        Item::new(
            self.offset,
            usize::from(self.length),
            "minor_structure",
            Value::Named {
                raw: u64::from(self.minor_type),
                name: self.name,
            },
        )
        .with_children(self.fields.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredField {
    pub offset: usize,
    /// Bytes actually spanned, at most the declared length
    pub length: usize,
    pub declared_length: u16,
    pub class: u8,
    pub major_type: u8,
    /// Header and fixed-part items
    pub fields: Vec<Item>,
    pub minors: Vec<MinorStructure>,
    /// Bytes inside the declared length that no reader accounted for
    pub trailing: Vec<Item>,
}

impl StructuredField {
    pub fn name(&self) -> &'static str {
        lookup(MAJOR_TYPES, self.major_type).unwrap_or("Unknown")
    }

    pub fn field(&self, tag: &str) -> Option<&Item> {
        self.fields.iter().find(|item| item.tag == tag)
    }

    pub fn to_item(&self) -> Item {
        let mut children = self.fields.clone();
        children.extend(self.minors.iter().map(MinorStructure::to_item));
        children.extend(self.trailing.iter().cloned());
        Item::new(
            self.offset,
            self.length,
            "structured_field",
            named_value(MAJOR_TYPES, self.major_type),
        )
        .with_children(children)
    }
}

fn minor_table(major_type: u8) -> Option<ValueTable> {
    match major_type {
        CREATE_WINDOW => Some(CREATE_WINDOW_MINORS),
        DEFINE_SELECTION_FIELD => Some(SELECTION_FIELD_MINORS),
        DEFINE_SCROLL_BAR_FIELD => Some(SCROLL_BAR_MINORS),
        DRAW_ERASE_GRID_LINES => Some(GRID_LINE_MINORS),
        WSC_CUSTOMIZATION => Some(WSC_CUSTOMIZATION_MINORS),
        IMAGE_FAX_CONTROL => Some(IMAGE_FAX_MINORS),
        DEFINE_COMMAND_KEY_FUNCTION => Some(COMMAND_KEY_MINORS),
        _ => None,
    }
}

/// Decode one major structure at the cursor.
///
/// Fails only when the 4-byte header itself is missing; everything past it
/// is bounded by the declared length and reported through `ctx`.
pub fn decode_structured_field(
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
) -> DecodeResult<StructuredField> {
    let offset = cur.offset();
    cur.ensure(MAJOR_HEADER_SIZE)?;

    let declared_length = cur.read_u16()?;
    let class = cur.read_u8()?;
    let major_type = cur.read_u8()?;
    log::trace!(
        "structured field 0x{:02X} length {} at offset {}",
        major_type,
        declared_length,
        offset
    );

    let class_name = if class == SF_CLASS_5250 { "5250" } else { "Unknown" };
    let mut sf = StructuredField {
        offset,
        length: MAJOR_HEADER_SIZE,
        declared_length,
        class,
        major_type,
        fields: vec![
            Item::new(offset, 2, "sf.length", Value::Uint(u64::from(declared_length))),
            Item::new(
                offset + 2,
                1,
                "sf.class",
                Value::Named {
                    raw: u64::from(class),
                    name: class_name,
                },
            ),
            Item::new(offset + 3, 1, "sf.major_type", named_value(MAJOR_TYPES, major_type)),
        ],
        minors: Vec::new(),
        trailing: Vec::new(),
    };

    let declared = usize::from(declared_length);
    if declared < MAJOR_HEADER_SIZE {
        ctx.report(DecodeError::StructuralLengthMismatch {
            offset,
            declared,
            minimum: MAJOR_HEADER_SIZE,
        });
        return Ok(sf);
    }

    let (mut body, truncation) = cur.split_clamped(declared - MAJOR_HEADER_SIZE);
    if let Some(err) = truncation {
        ctx.report(err);
    }

    if class != SF_CLASS_5250 {
        ctx.report(DecodeError::UnknownCode {
            kind: CodeKind::Class,
            code: class,
            offset: offset + 2,
        });
    } else if !body.is_empty() {
        if let Err(err) = decode_major(major_type, &mut body, ctx, &mut sf) {
            ctx.report(err);
        }
    }

    push_unknown_rest(&mut body, &mut sf.trailing);
    sf.length = cur.offset() - offset;
    Ok(sf)
}

const CREATE_WINDOW_FIELDS: &[FieldSpec] = &[
    FieldSpec::bits("window.flags", 1, WINDOW_FLAG_BITS),
    FieldSpec::reserved(2),
    FieldSpec::uint("window.depth", 1),
    FieldSpec::uint("window.width", 1),
];

const SELECTION_FIELD_FIELDS: &[FieldSpec] = &[
    FieldSpec::bits("selection.flags1", 1, SELECTION_FLAG1_BITS),
    FieldSpec::bits("selection.flags2", 1, SELECTION_FLAG2_BITS),
    FieldSpec::bits("selection.flags3", 1, SELECTION_FLAG3_BITS),
    FieldSpec::named("selection.field_type", SELECTION_FIELD_TYPES),
    FieldSpec::reserved(3),
    FieldSpec::uint("selection.text_size", 1),
    FieldSpec::uint("selection.rows", 1),
    FieldSpec::uint("selection.columns", 1),
    FieldSpec::uint("selection.padding", 1),
    FieldSpec::ebcdic("selection.numeric_separator", 1),
    FieldSpec::ebcdic("selection.selection_character", 1),
    FieldSpec::named("selection.cancel_aid", AIDS),
];

const SCROLL_BAR_FIELDS: &[FieldSpec] = &[
    FieldSpec::bits("scroll_bar.flags", 1, SCROLL_BAR_FLAG_BITS),
    FieldSpec::reserved(1),
    FieldSpec::uint("scroll_bar.total_rows", 4),
    FieldSpec::uint("scroll_bar.slider_position", 4),
    FieldSpec::uint("scroll_bar.size", 1),
];

const GRID_LINE_FIELDS: &[FieldSpec] = &[
    FieldSpec::uint("grid.partition", 1),
    FieldSpec::bits("grid.flags", 1, GRID_FLAG_BITS),
    FieldSpec::named("grid.default_color", ATTRIBUTE_COLORS),
    FieldSpec::named("grid.default_line_type", GRID_LINE_TYPES),
];

const GUI_REMOVE_FIELDS: &[FieldSpec] = &[
    FieldSpec::bits("remove.flags", 1, GUI_REMOVE_FLAG_BITS),
    FieldSpec::reserved(1),
];

fn decode_major(
    major_type: u8,
    body: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    sf: &mut StructuredField,
) -> DecodeResult<()> {
    let fields = &mut sf.fields;
    match major_type {
        CREATE_WINDOW => read_fields(body, CREATE_WINDOW_FIELDS, ctx, fields)?,
        DEFINE_SELECTION_FIELD => read_fields(body, SELECTION_FIELD_FIELDS, ctx, fields)?,
        DEFINE_SCROLL_BAR_FIELD => read_fields(body, SCROLL_BAR_FIELDS, ctx, fields)?,
        DRAW_ERASE_GRID_LINES => read_fields(body, GRID_LINE_FIELDS, ctx, fields)?,
        IMAGE_FAX_CONTROL => read_fields(body, &[FieldSpec::uint("image.control_flags", 1)], ctx, fields)?,
        DEFINE_COMMAND_KEY_FUNCTION => {
            read_fields(body, &[FieldSpec::uint("command_keys.flags", 1)], ctx, fields)?
        }
        // Minor structures start right after the header
        WSC_CUSTOMIZATION => {}
        UNREST_WIN_CURS_MOVE => read_fields(
            body,
            &[FieldSpec::uint("cursor_movement.flags", 1), FieldSpec::reserved(1)],
            ctx,
            fields,
        )?,
        REM_GUI_SEL_FIELD | REM_GUI_WINDOW | REM_GUI_SCROLL_BAR_FIELD | REM_ALL_GUI_CONSTRUCTS => {
            read_fields(body, GUI_REMOVE_FIELDS, ctx, fields)?
        }
        WRITE_DATA => {
            read_fields(
                body,
                &[FieldSpec::uint("write_data.flags", 1), FieldSpec::reserved(1)],
                ctx,
                fields,
            )?;
            read_rest_text(body, "write_data.text", ctx, fields);
        }
        PROGRAMMABLE_MOUSE_BUT => {
            read_fields(body, &[FieldSpec::reserved(2)], ctx, fields)?;
            read_rest_bytes(body, "mouse.button_definitions", fields);
        }
        CLEAR_GRID_LINE_BUFFER => {
            read_available_fields(body, &[FieldSpec::uint("grid.partition", 1)], ctx, fields);
        }
        SF_5250_QUERY | SF_5250_QUERY_STATION_STATE => {
            read_fields(body, &[FieldSpec::bits("query.flags", 1, QUERY_FLAG_BITS)], ctx, fields)?;
            read_rest_bytes(body, "query.data", fields);
        }
        _ if lookup(MAJOR_TYPES, major_type).is_some() => read_rest_bytes(body, "sf.data", fields),
        other => {
            return Err(DecodeError::UnknownCode {
                kind: CodeKind::MajorType,
                code: other,
                offset: sf.offset + 3,
            })
        }
    }

    let reader: MinorReader = match major_type {
        CREATE_WINDOW => read_window_minor,
        DEFINE_SELECTION_FIELD => read_selection_minor,
        DEFINE_SCROLL_BAR_FIELD => read_scroll_bar_minor,
        DRAW_ERASE_GRID_LINES => read_grid_minor,
        WSC_CUSTOMIZATION => read_wsc_minor,
        IMAGE_FAX_CONTROL => read_image_minor,
        DEFINE_COMMAND_KEY_FUNCTION => read_command_key_minor,
        _ => return Ok(()),
    };
    match minor_table(major_type) {
        Some(known) => decode_minors(body, ctx, known, reader, &mut sf.minors),
        None => Ok(()),
    }
}

/// Reads the payload of one minor structure, after its length and type
type MinorReader = fn(u8, &mut DecodeCursor<'_>, &mut DecodeContext<'_>, &mut Vec<Item>) -> DecodeResult<()>;

/// Decode minor structures until the body ends or an unrecognised minor
/// type is seen. An unrecognised type is not an error: it marks the end of
/// the structures this major type defines.
fn decode_minors(
    body: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    known: ValueTable,
    read: MinorReader,
    out: &mut Vec<MinorStructure>,
) -> DecodeResult<()> {
    while let (Some(length), Some(minor_type)) = (body.peek_at(0), body.peek_at(1)) {
        let offset = body.offset();
        let Some(name) = lookup(known, minor_type) else {
            log::debug!(
                "minor type 0x{:02X} at offset {} ends the minor structures",
                minor_type,
                offset + 1
            );
            break;
        };
        if usize::from(length) < MINOR_HEADER_SIZE {
            return Err(DecodeError::StructuralLengthMismatch {
                offset,
                declared: usize::from(length),
                minimum: MINOR_HEADER_SIZE,
            });
        }

        let mut minor = body.split(usize::from(length))?;
        log::trace!("minor structure {} length {} at offset {}", name, length, offset);
        minor.skip(MINOR_HEADER_SIZE)?;
        let mut fields = vec![
            Item::new(offset, 1, "minor.length", Value::Uint(u64::from(length))),
            Item::new(
                offset + 1,
                1,
                "minor.type",
                Value::Named {
                    raw: u64::from(minor_type),
                    name,
                },
            ),
        ];
        if let Err(err) = read(minor_type, &mut minor, ctx, &mut fields) {
            ctx.report(err);
        }
        push_unknown_rest(&mut minor, &mut fields);

        out.push(MinorStructure {
            offset,
            length,
            minor_type,
            name,
            fields,
        });
    }
    Ok(())
}

fn read_window_minor(
    minor_type: u8,
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    out: &mut Vec<Item>,
) -> DecodeResult<()> {
    match minor_type {
        MINOR_BORDER_PRESENTATION => {
            read_fields(
                cur,
                &[
                    FieldSpec::bits("border.flags", 1, BORDER_FLAG_BITS),
                    FieldSpec::uint("border.mono_attribute", 1),
                    FieldSpec::uint("border.color_attribute", 1),
                ],
                ctx,
                out,
            )?;
            // Top-left, top, top-right, left, right, bottom-left, bottom, bottom-right
            let chars = cur.remaining().min(8);
            if chars > 0 {
                out.push(read_field(cur, &FieldSpec::ebcdic("border.characters", chars), Some(ctx))?);
            }
        }
        MINOR_WINDOW_TITLE_FOOTER => {
            read_fields(
                cur,
                &[
                    FieldSpec::bits("title.flags", 1, TITLE_FLAG_BITS),
                    FieldSpec::uint("title.mono_attribute", 1),
                    FieldSpec::uint("title.color_attribute", 1),
                    FieldSpec::reserved(1),
                ],
                ctx,
                out,
            )?;
            read_rest_text(cur, "title.text", ctx, out);
        }
        _ => {}
    }
    Ok(())
}

fn read_selection_minor(
    minor_type: u8,
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    out: &mut Vec<Item>,
) -> DecodeResult<()> {
    match minor_type {
        MINOR_CHOICE_PRESENTATION => {
            read_fields(cur, &[FieldSpec::uint("choice_presentation.flags", 1)], ctx, out)?;
            read_available_fields(
                cur,
                &[
                    FieldSpec::uint("choice_presentation.available", 1),
                    FieldSpec::uint("choice_presentation.selected", 1),
                    FieldSpec::uint("choice_presentation.unavailable", 1),
                    FieldSpec::uint("choice_presentation.available_cursor", 1),
                    FieldSpec::uint("choice_presentation.selected_cursor", 1),
                    FieldSpec::uint("choice_presentation.unavailable_cursor", 1),
                ],
                ctx,
                out,
            );
        }
        MINOR_CHOICE_INDICATORS => {
            read_fields(
                cur,
                &[
                    FieldSpec::uint("choice_indicators.flags", 1),
                    FieldSpec::uint("choice_indicators.mono_attribute", 1),
                    FieldSpec::uint("choice_indicators.color_attribute", 1),
                ],
                ctx,
                out,
            )?;
            read_rest_text(cur, "choice_indicators.characters", ctx, out);
        }
        MINOR_SCROLL_BAR_INDICATORS => {
            read_fields(
                cur,
                &[FieldSpec::uint("scroll_indicators.flags", 1), FieldSpec::reserved(1)],
                ctx,
                out,
            )?;
            read_rest_text(cur, "scroll_indicators.characters", ctx, out);
        }
        MINOR_MENU_BAR_SEPARATOR => {
            read_fields(
                cur,
                &[
                    FieldSpec::uint("separator.flags", 1),
                    FieldSpec::uint("separator.mono_attribute", 1),
                    FieldSpec::uint("separator.color_attribute", 1),
                    FieldSpec::ebcdic("separator.character", 1),
                ],
                ctx,
                out,
            )?;
        }
        MINOR_CHOICE_TEXT => read_choice_text(cur, ctx, out)?,
        _ => {}
    }
    Ok(())
}

fn read_choice_text(cur: &mut DecodeCursor<'_>, ctx: &mut DecodeContext<'_>, out: &mut Vec<Item>) -> DecodeResult<()> {
    let flags1 = read_bits(cur, "choice_text.flags1", 1, CHOICE_TEXT_FLAG1_BITS)?;
    let bits = flags1.as_uint().unwrap_or_default() as u8;
    out.push(flags1);
    out.push(read_bits(cur, "choice_text.flags2", 1, CHOICE_TEXT_FLAG2_BITS)?);

    if bits & CHOICE_TEXT_MNEMONIC != 0 {
        out.push(read_field(cur, &FieldSpec::uint("choice_text.mnemonic_offset", 1), None)?);
    }
    if bits & CHOICE_TEXT_AID != 0 {
        out.push(read_field(cur, &FieldSpec::named("choice_text.aid", AIDS), None)?);
    }
    let numeric = usize::from((bits & CHOICE_TEXT_NUMERIC_MASK).min(2));
    if numeric > 0 {
        out.push(read_field(cur, &FieldSpec::ebcdic("choice_text.numeric", numeric), Some(ctx))?);
    }
    read_rest_text(cur, "choice_text.text", ctx, out);
    Ok(())
}

fn read_scroll_bar_minor(
    minor_type: u8,
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    out: &mut Vec<Item>,
) -> DecodeResult<()> {
    if minor_type == MINOR_SCROLL_BAR_PRESENTATION {
        read_fields(
            cur,
            &[
                FieldSpec::uint("scroll_bar.presentation.flags", 1),
                FieldSpec::uint("scroll_bar.presentation.mono_attribute", 1),
                FieldSpec::uint("scroll_bar.presentation.color_attribute", 1),
            ],
            ctx,
            out,
        )?;
        read_rest_text(cur, "scroll_bar.presentation.characters", ctx, out);
    }
    Ok(())
}

fn read_grid_minor(
    minor_type: u8,
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    out: &mut Vec<Item>,
) -> DecodeResult<()> {
    match minor_type {
        MINOR_HORIZONTAL_LINE | MINOR_VERTICAL_LINE => read_fields(
            cur,
            &[
                FieldSpec::uint("line.flags", 1),
                FieldSpec::uint("line.row", 1),
                FieldSpec::uint("line.column", 1),
                FieldSpec::uint("line.length", 1),
            ],
            ctx,
            out,
        ),
        MINOR_BOX => read_fields(
            cur,
            &[
                FieldSpec::uint("box.flags", 1),
                FieldSpec::uint("box.row", 1),
                FieldSpec::uint("box.column", 1),
                FieldSpec::uint("box.depth", 1),
                FieldSpec::uint("box.width", 1),
            ],
            ctx,
            out,
        ),
        _ => Ok(()),
    }
}

fn read_wsc_minor(
    minor_type: u8,
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    out: &mut Vec<Item>,
) -> DecodeResult<()> {
    let tag = match minor_type {
        MINOR_KEYSTROKE_BUFFERING => "keystroke_buffering.data",
        MINOR_CURSOR_CONTROL => "cursor_control.data",
        _ => return Ok(()),
    };
    read_fields(cur, &[FieldSpec::bits("wsc.flags", 1, WSC_FLAG_BITS)], ctx, out)?;
    read_rest_bytes(cur, tag, out);
    Ok(())
}

fn read_image_minor(
    minor_type: u8,
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    out: &mut Vec<Item>,
) -> DecodeResult<()> {
    match minor_type {
        MINOR_IMAGE_SCALING => read_fields(
            cur,
            &[FieldSpec::uint("image.scale_horizontal", 2), FieldSpec::uint("image.scale_vertical", 2)],
            ctx,
            out,
        ),
        MINOR_IMAGE_LOCATION => read_fields(
            cur,
            &[FieldSpec::uint("image.location_row", 2), FieldSpec::uint("image.location_column", 2)],
            ctx,
            out,
        ),
        MINOR_IMAGE_ROTATION => read_fields(cur, &[FieldSpec::named("image.rotation", ROTATIONS)], ctx, out),
        _ => Ok(()),
    }
}

fn read_command_key_minor(
    minor_type: u8,
    cur: &mut DecodeCursor<'_>,
    ctx: &mut DecodeContext<'_>,
    out: &mut Vec<Item>,
) -> DecodeResult<()> {
    if minor_type == MINOR_COMMAND_KEY {
        read_fields(cur, &[FieldSpec::named("command_key.aid", AIDS)], ctx, out)?;
        read_rest_text(cur, "command_key.label", ctx, out);
    }
    Ok(())
}
