//! Malformed and truncated records
//!
//! Every failure must stay scoped to the structure it happened in: the
//! record still decodes, the bad bytes become `unknown_data` and the
//! failure shows up once in the diagnostics.

use std::fs;
use std::net::SocketAddr;

use tn5250_dissect::config::DecoderConfig;
use tn5250_dissect::conversation::{ConnectionId, ConversationStore, Role};
use tn5250_dissect::error::{CodeKind, ConfigError, DecodeError};
use tn5250_dissect::lib5250::codes::*;
use tn5250_dissect::lib5250::commands::Command;
use tn5250_dissect::lib5250::fields::{Value, UNKNOWN_DATA};
use tn5250_dissect::lib5250::inbound::InboundKind;
use tn5250_dissect::lib5250::orders::ElementKind;
use tn5250_dissect::lib5250::record::{decode_record, decode_record_as, DecodedRecord};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn record(flags: u8, body: &[u8]) -> Vec<u8> {
    let len = (10 + body.len()) as u16;
    let mut data = len.to_be_bytes().to_vec();
    data.extend_from_slice(&[0x12, 0xA0, 0x00, 0x00, 0x04, flags, 0x00, 0x03]);
    data.extend_from_slice(body);
    data
}

fn decode(role: Role, data: &[u8]) -> DecodedRecord {
    init_logging();
    decode_record_as(data, role, false, &DecoderConfig::default()).unwrap()
}

#[test]
fn test_header_shorter_than_ten_bytes() {
    init_logging();
    let config = DecoderConfig::default();
    for len in 0..10 {
        let data = vec![0u8; len];
        let err = decode_record_as(&data, Role::Host, false, &config).unwrap_err();
        assert!(err.is_truncation(), "length {len}");
    }
}

#[test]
fn test_help_flag_needs_error_code() {
    let data = [0x00, 0x0B, 0x12, 0xA0, 0x00, 0x00, 0x04, HEADER_FLAG_HLP, 0x00, 0x00, 0x00];
    let err = decode_record_as(&data, Role::Terminal, false, &DecoderConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TruncatedRecord {
            offset: 0,
            needed: 12,
            available: 11
        }
    ));
}

#[test]
fn test_help_in_error_state_wide_code() {
    let data = [0x00, 0x0C, 0x12, 0xA0, 0x00, 0x00, 0x04, HEADER_FLAG_HLP, 0x00, 0x00, 0x01, 0x05];
    let decoded = decode(Role::Terminal, &data);
    assert_eq!(decoded.inbound().unwrap().kind, InboundKind::ErrorCode(0x0105));
    assert!(decoded.to_item().find("header.error_code.message").is_none());
}

#[test]
fn test_help_in_error_state() {
    let data = [0x00, 0x0C, 0x12, 0xA0, 0x00, 0x00, 0x04, HEADER_FLAG_HLP, 0x00, 0x00, 0x00, ERR_NUMERIC_ONLY];
    let decoded = decode(Role::Terminal, &data);
    assert!(decoded.is_clean());
    assert_eq!(decoded.header.size(), 12);
    assert_eq!(decoded.inbound().unwrap().kind, InboundKind::ErrorCode(u16::from(ERR_NUMERIC_ONLY)));

    let root = decoded.to_item();
    let message = root.find("header.error_code.message").unwrap();
    assert_eq!(
        message.value,
        Value::Text("Field requires numeric characters.".to_string())
    );
}

#[test]
fn test_transparent_data_overrun() {
    let data = record(0x00, &[ESC, CMD_WRITE_TO_DISPLAY, 0x00, 0x00, TD, 0x00, 0x20, 0xC1, 0xC2]);
    let decoded = decode(Role::Host, &data);

    assert_eq!(decoded.diagnostics.len(), 1);
    assert!(matches!(
        decoded.diagnostics[0],
        DecodeError::TruncatedRecord {
            offset: 17,
            needed: 32,
            available: 2
        }
    ));
    assert_eq!(decoded.consumed, data.len());

    let Command::WriteToDisplay { elements, .. } = &decoded.outbound().unwrap().commands[0].command else {
        panic!("expected Write To Display");
    };
    assert_eq!(elements[0].kind, ElementKind::Incomplete(OrderCode::TransparentData));
    let unknown = elements[0].fields.iter().find(|item| item.is_unknown()).unwrap();
    assert_eq!((unknown.offset, unknown.length), (17, 2));
}

#[test]
fn test_unknown_command_keeps_earlier_commands() {
    let data = record(0x00, &[ESC, CMD_CLEAR_UNIT, ESC, 0x7F, 0x00, 0x01]);
    let decoded = decode(Role::Host, &data);

    let stream = decoded.outbound().unwrap();
    assert_eq!(stream.commands.len(), 1);
    assert_eq!(
        decoded.diagnostics,
        vec![DecodeError::UnknownCode {
            kind: CodeKind::Command,
            code: 0x7F,
            offset: 13
        }]
    );
    let unknown = stream.unknown.as_ref().unwrap();
    assert_eq!((unknown.offset, unknown.length), (12, 4));
    assert_eq!(decoded.consumed, data.len());
}

#[test]
fn test_unknown_extended_attribute_type() {
    let data = record(0x00, &[ESC, CMD_WRITE_TO_DISPLAY, 0x00, 0x00, WEA, 0x07, 0x01, 0xC1]);
    let decoded = decode(Role::Host, &data);

    assert!(matches!(
        decoded.diagnostics[0],
        DecodeError::UnknownCode {
            kind: CodeKind::AttributeType,
            code: 0x07,
            offset: 15
        }
    ));
    // Decoding carries on after the order
    let Command::WriteToDisplay { elements, .. } = &decoded.outbound().unwrap().commands[0].command else {
        panic!("expected Write To Display");
    };
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[1].literal(), Some(&[0xC1][..]));
}

#[test]
fn test_record_length_past_buffer() {
    let mut data = record(0x00, &[ESC, CMD_CLEAR_UNIT]);
    data[0..2].copy_from_slice(&200u16.to_be_bytes());
    let decoded = decode(Role::Host, &data);

    assert_eq!(
        decoded.diagnostics[0],
        DecodeError::TruncatedRecord {
            offset: 0,
            needed: 200,
            available: 12
        }
    );
    assert_eq!(decoded.outbound().unwrap().commands.len(), 1);
}

#[test]
fn test_bytes_after_logical_record() {
    let mut data = record(0x00, &[ESC, CMD_CLEAR_UNIT]);
    data.extend_from_slice(&[0x00, 0x0A, 0x12]);
    let decoded = decode(Role::Host, &data);

    assert!(decoded.is_clean());
    let root = decoded.to_item();
    let trailing = root.children.last().unwrap();
    assert_eq!(trailing.tag, UNKNOWN_DATA);
    assert_eq!((trailing.offset, trailing.length), (12, 3));
}

#[test]
fn test_negative_response() {
    let data = record(HEADER_FLAG_ERR, &[0x10, 0x05, 0x01, DSNR_INVCURSPOS]);
    let decoded = decode(Role::Terminal, &data);
    assert!(decoded.is_clean());
    assert_eq!(
        decoded.inbound().unwrap().kind,
        InboundKind::NegativeResponse(0x1005_0122)
    );
    let root = decoded.to_item();
    assert_eq!(
        root.find("negative_response.code").unwrap().value,
        Value::Named {
            raw: u64::from(DSNR_INVCURSPOS),
            name: "Write to display order row/col address is not valid"
        }
    );
}

#[test]
fn test_short_negative_response() {
    let data = record(HEADER_FLAG_ERR, &[0x10, 0x05]);
    let decoded = decode(Role::Terminal, &data);
    assert!(decoded.diagnostics[0].is_truncation());
    let response = decoded.inbound().unwrap();
    assert_eq!(response.kind, InboundKind::Empty);
    assert_eq!(response.trailing.as_ref().unwrap().length, 2);
}

#[test]
fn test_inbound_escape_that_is_not_a_command() {
    let data = record(0x00, &[ESC, 0x99, 0x01]);
    let decoded = decode(Role::Terminal, &data);
    // The probe's failures are discarded with it
    assert!(decoded.is_clean(), "{:?}", decoded.diagnostics);
    assert_eq!(
        decoded.inbound().unwrap().kind,
        InboundKind::FieldData(vec![ESC, 0x99, 0x01])
    );
}

#[test]
fn test_inbound_echoed_commands() {
    let data = record(0x00, &[ESC, CMD_CLEAR_UNIT]);
    let decoded = decode(Role::Terminal, &data);
    assert!(decoded.is_clean());
    match &decoded.inbound().unwrap().kind {
        InboundKind::Commands(stream) => assert_eq!(stream.commands[0].command, Command::ClearUnit),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_restore_screen_depth_from_config() {
    let config = DecoderConfig::from_json(r#"{ "max_nesting_depth": 1 }"#).unwrap();
    let data = record(0x00, &[ESC, CMD_RESTORE_SCREEN, ESC, CMD_RESTORE_SCREEN, ESC, CMD_RESTORE_SCREEN]);
    let decoded = decode_record_as(&data, Role::Host, false, &config).unwrap();
    assert_eq!(
        decoded.diagnostics,
        vec![DecodeError::NestingTooDeep { offset: 14, depth: 1 }]
    );
    assert_eq!(decoded.consumed, data.len());
}

#[test]
fn test_config_file_drives_decoding() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tn5250-dissect.json");
    fs::write(&path, r#"{ "host_ports": [8023], "decode_text": false }"#).unwrap();
    let config = DecoderConfig::load(&path).unwrap();

    let host: SocketAddr = "10.0.0.1:8023".parse().unwrap();
    let terminal: SocketAddr = "10.0.0.2:40000".parse().unwrap();
    let mut store = ConversationStore::new(&config);
    // First record seen comes from the host
    let state = store.lookup_or_create(ConnectionId(1), host, terminal).clone();
    assert_eq!(state.role_of(host), Role::Host);

    let data = record(0x00, &[ESC, CMD_WRITE_TO_DISPLAY, 0x00, 0x00, 0xC1, 0xC2]);
    let decoded = decode_record(&data, &state, host, &config).unwrap();
    let root = decoded.to_item();
    assert_eq!(root.find("field_data").unwrap().value, Value::Bytes(vec![0xC1, 0xC2]));
}

#[test]
fn test_config_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(DecoderConfig::load(&missing), Err(ConfigError::File { .. })));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ \"host_ports\": 23 }").unwrap();
    assert!(matches!(DecoderConfig::load(&broken), Err(ConfigError::Malformed(_))));
}
