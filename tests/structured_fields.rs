//! Structured field decoding through complete records
//!
//! Covers Write Structured Field commands and structured fields embedded in
//! Write To Display via the WDSF order, including the minor-structure loops.

use tn5250_dissect::config::DecoderConfig;
use tn5250_dissect::conversation::Role;
use tn5250_dissect::ebcdic;
use tn5250_dissect::error::{CodeKind, DecodeError};
use tn5250_dissect::lib5250::codes::*;
use tn5250_dissect::lib5250::commands::Command;
use tn5250_dissect::lib5250::fields::Value;
use tn5250_dissect::lib5250::orders::Order;
use tn5250_dissect::lib5250::record::{decode_record_as, DecodedRecord};
use tn5250_dissect::lib5250::structured_field::StructuredField;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrap an outbound body in a Put/Get header
fn host_record(body: &[u8]) -> Vec<u8> {
    let len = (10 + body.len()) as u16;
    let mut data = len.to_be_bytes().to_vec();
    data.extend_from_slice(&[0x12, 0xA0, 0x00, 0x00, 0x04, 0x00, 0x00, 0x03]);
    data.extend_from_slice(body);
    data
}

/// Build a structured field with its length filled in
fn structured_field(major_type: u8, body: &[u8]) -> Vec<u8> {
    let len = (4 + body.len()) as u16;
    let mut data = len.to_be_bytes().to_vec();
    data.push(SF_CLASS_5250);
    data.push(major_type);
    data.extend_from_slice(body);
    data
}

fn decode_host(body: &[u8]) -> DecodedRecord {
    init_logging();
    let data = host_record(body);
    let record = decode_record_as(&data, Role::Host, false, &DecoderConfig::default()).unwrap();
    assert_eq!(record.consumed, data.len());
    record
}

/// Structured field carried by the first WDSF order of the first command
fn wdsf(record: &DecodedRecord) -> &StructuredField {
    let stream = record.outbound().unwrap();
    match &stream.commands[0].command {
        Command::WriteToDisplay { elements, .. } => elements
            .iter()
            .find_map(|element| match element.order() {
                Some(Order::WriteToDisplayStructuredField(sf)) => Some(sf),
                _ => None,
            })
            .expect("no WDSF order"),
        other => panic!("expected Write To Display, got {other:?}"),
    }
}

fn wdsf_record(sf: &[u8]) -> Vec<u8> {
    let mut body = vec![ESC, CMD_WRITE_TO_DISPLAY, 0x00, 0x08, SBA, 0x05, 0x0A, WDSF];
    body.extend_from_slice(sf);
    body
}

#[test]
fn test_create_window_in_write_to_display() {
    let title = ebcdic::encode("Select printer");
    let mut sf = vec![0x80, 0x00, 0x00, 0x0C, 0x32];
    sf.extend_from_slice(&[0x0D, MINOR_BORDER_PRESENTATION, 0x80, 0x22, 0x22]);
    sf.extend_from_slice(&ebcdic::encode(".:.::.:."));
    sf.extend_from_slice(&[(6 + title.len()) as u8, MINOR_WINDOW_TITLE_FOOTER, 0x00, 0x20, 0x22, 0x00]);
    sf.extend_from_slice(&title);

    let record = decode_host(&wdsf_record(&structured_field(CREATE_WINDOW, &sf)));
    assert!(record.is_clean(), "{:?}", record.diagnostics);

    let window = wdsf(&record);
    assert_eq!(window.name(), "Create Window");
    assert_eq!(window.field("window.depth").unwrap().value, Value::Uint(12));
    assert_eq!(window.field("window.width").unwrap().value, Value::Uint(50));
    assert_eq!(window.minors.len(), 2);
    assert_eq!(window.minors[0].name, "Border Presentation");

    let border = window.minors[0].to_item();
    assert_eq!(
        border.child("border.characters").unwrap().value,
        Value::Text(".:.::.:.".to_string())
    );
    let footer = window.minors[1].to_item();
    assert_eq!(
        footer.child("title.text").unwrap().value,
        Value::Text("Select printer".to_string())
    );
    assert!(window.trailing.is_empty());
}

#[test]
fn test_selection_field_with_choices() {
    let mut sf = vec![
        0x00, 0x00, 0x00, 0x11, // flags, single choice selection field
        0x00, 0x00, 0x00, // reserved
        0x0A, 0x02, 0x01, 0x01, 0x4B, 0x7E, 0x3C, // text size, rows, columns, padding, chars, cancel F12
    ];
    for (mnemonic, text) in [(0x00, "Yes"), (0x00, "No")] {
        let encoded = ebcdic::encode(text);
        sf.extend_from_slice(&[(5 + encoded.len()) as u8, MINOR_CHOICE_TEXT, CHOICE_TEXT_MNEMONIC, 0x00, mnemonic]);
        sf.extend_from_slice(&encoded);
    }

    let record = decode_host(&wdsf_record(&structured_field(DEFINE_SELECTION_FIELD, &sf)));
    assert!(record.is_clean(), "{:?}", record.diagnostics);

    let selection = wdsf(&record);
    assert_eq!(
        selection.field("selection.field_type").unwrap().value,
        Value::Named {
            raw: 0x11,
            name: "Single choice selection field"
        }
    );
    assert_eq!(
        selection.field("selection.cancel_aid").unwrap().value,
        Value::Named { raw: 0x3C, name: "F12" }
    );
    assert_eq!(selection.minors.len(), 2);
    let second = selection.minors[1].to_item();
    assert_eq!(second.child("choice_text.text").unwrap().value, Value::Text("No".to_string()));
    assert_eq!(second.child("choice_text.mnemonic_offset").unwrap().value, Value::Uint(0));
}

#[test]
fn test_scroll_bar_field() {
    let sf = [
        0x80, 0x00, // vertical bar flag, reserved
        0x00, 0x00, 0x00, 0x64, // total rows
        0x00, 0x00, 0x00, 0x0A, // slider position
        0x0F, // size
        0x05, MINOR_SCROLL_BAR_PRESENTATION, 0x00, 0x20, 0x22,
    ];
    let record = decode_host(&wdsf_record(&structured_field(DEFINE_SCROLL_BAR_FIELD, &sf)));
    assert!(record.is_clean(), "{:?}", record.diagnostics);

    let bar = wdsf(&record);
    assert_eq!(bar.field("scroll_bar.total_rows").unwrap().value, Value::Uint(100));
    assert_eq!(bar.field("scroll_bar.slider_position").unwrap().value, Value::Uint(10));
    assert_eq!(bar.minors.len(), 1);
}

#[test]
fn test_grid_lines_and_box() {
    let sf = [
        0x00, 0x80, 0x20, 0x00, // partition, clear first, green, solid
        0x06, MINOR_HORIZONTAL_LINE, 0x00, 0x03, 0x02, 0x4E, //
        0x07, MINOR_BOX, 0x00, 0x05, 0x02, 0x0A, 0x4E,
    ];
    let record = decode_host(&wdsf_record(&structured_field(DRAW_ERASE_GRID_LINES, &sf)));
    assert!(record.is_clean(), "{:?}", record.diagnostics);

    let grid = wdsf(&record);
    assert_eq!(grid.minors.len(), 2);
    assert_eq!(grid.minors[1].name, "Box");
    let item = grid.minors[1].to_item();
    assert_eq!(item.child("box.width").unwrap().value, Value::Uint(0x4E));
    let flags = grid.field("grid.flags").unwrap();
    assert_eq!(
        flags.child("grid.flags.clear_buffer_first").unwrap().value,
        Value::Flag(true)
    );
}

#[test]
fn test_write_structured_field_query() {
    let mut body = vec![ESC, CMD_WRITE_STRUCTURED_FIELD];
    body.extend_from_slice(&structured_field(SF_5250_QUERY, &[0x00, 0x00]));
    let record = decode_host(&body);
    assert!(record.is_clean());

    match &record.outbound().unwrap().commands[0].command {
        Command::WriteStructuredField(sf) => {
            assert_eq!(sf.name(), "5250 Query");
            assert_eq!(sf.declared_length, 6);
            assert!(sf.field("query.flags").is_some());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_wsc_customization_minors() {
    let mut body = vec![ESC, CMD_WRITE_STRUCTURED_FIELD];
    body.extend_from_slice(&structured_field(
        WSC_CUSTOMIZATION,
        &[
            0x04, MINOR_KEYSTROKE_BUFFERING, 0x80, 0x00, //
            0x03, MINOR_CURSOR_CONTROL, 0x00,
        ],
    ));
    let record = decode_host(&body);
    assert!(record.is_clean(), "{:?}", record.diagnostics);

    match &record.outbound().unwrap().commands[0].command {
        Command::WriteStructuredField(sf) => {
            assert_eq!(sf.minors.len(), 2);
            let first = sf.minors[0].to_item();
            let flags = first.child("wsc.flags").unwrap();
            assert_eq!(flags.child("wsc.flags.enable").unwrap().value, Value::Flag(true));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_command_key_definitions() {
    let label = ebcdic::encode("Exit");
    let mut sf = vec![0x00];
    sf.extend_from_slice(&[(3 + label.len()) as u8, MINOR_COMMAND_KEY, 0x33]);
    sf.extend_from_slice(&label);

    let mut body = vec![ESC, CMD_WRITE_STRUCTURED_FIELD];
    body.extend_from_slice(&structured_field(DEFINE_COMMAND_KEY_FUNCTION, &sf));
    let record = decode_host(&body);
    assert!(record.is_clean(), "{:?}", record.diagnostics);

    let root = record.to_item();
    let key = root.find("command_key.aid").unwrap();
    assert_eq!(key.value, Value::Named { raw: 0x33, name: "F3" });
    assert_eq!(
        root.find("command_key.label").unwrap().value,
        Value::Text("Exit".to_string())
    );
}

#[test]
fn test_unknown_major_type_kept_as_data() {
    let mut body = vec![ESC, CMD_WRITE_STRUCTURED_FIELD];
    body.extend_from_slice(&structured_field(0xEE, &[0x01, 0x02, 0x03]));
    body.extend_from_slice(&[ESC, CMD_CLEAR_UNIT]);
    let record = decode_host(&body);

    assert_eq!(record.diagnostics.len(), 1);
    assert!(matches!(
        record.diagnostics[0],
        DecodeError::UnknownCode {
            kind: CodeKind::MajorType,
            code: 0xEE,
            offset: 15
        }
    ));
    let stream = record.outbound().unwrap();
    // The declared length keeps the following command in sync
    assert_eq!(stream.commands.len(), 2);
    match &stream.commands[0].command {
        Command::WriteStructuredField(sf) => {
            assert_eq!(sf.trailing.len(), 1);
            assert_eq!(sf.trailing[0].length, 3);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_wrong_class_byte() {
    let mut body = vec![ESC, CMD_WRITE_STRUCTURED_FIELD, 0x00, 0x06, 0xC1, SF_5250_QUERY, 0x00, 0x00];
    body.extend_from_slice(&[ESC, CMD_CLEAR_UNIT]);
    let record = decode_host(&body);

    assert!(matches!(
        record.diagnostics[0],
        DecodeError::UnknownCode {
            kind: CodeKind::Class,
            code: 0xC1,
            ..
        }
    ));
    assert_eq!(record.outbound().unwrap().commands.len(), 2);
}

#[test]
fn test_image_fax_control_minors() {
    let sf = [
        0x00, // control flags
        0x06, MINOR_IMAGE_SCALING, 0x00, 0x64, 0x00, 0x32, //
        0x03, MINOR_IMAGE_ROTATION, 0x01,
    ];
    let mut body = vec![ESC, CMD_WRITE_STRUCTURED_FIELD];
    body.extend_from_slice(&structured_field(IMAGE_FAX_CONTROL, &sf));
    let record = decode_host(&body);
    assert!(record.is_clean(), "{:?}", record.diagnostics);

    let root = record.to_item();
    assert_eq!(root.find("image.scale_horizontal").unwrap().value, Value::Uint(100));
    assert_eq!(
        root.find("image.rotation").unwrap().value,
        Value::Named {
            raw: 1,
            name: "90 degrees"
        }
    );
}
