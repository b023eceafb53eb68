//! TN5250 Protocol Constants and Code Tables
//!
//! Command, order, structured field, attention identifier and attribute
//! codes of the 5250 data stream, together with the static name tables and
//! bit-range tables the decoders use to label what they read.
//!
//! Source: IBM 5494 Remote Control Unit Functions Reference (SC30-3533),
//! RFC 1205 (5250 Telnet Interface) and lib5250/codes5250.h from the tn5250
//! project.

/// A static code → name mapping.
pub type ValueTable = &'static [(u8, &'static str)];

/// Look up the name of `code` in `table`.
pub fn lookup(table: ValueTable, code: u8) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// A named sub-range of a bit-packed byte or word.
#[derive(Debug, Clone, Copy)]
pub struct BitRange {
    pub tag: &'static str,
    pub mask: u16,
    /// Names for the values of a multi-bit range (shifted down to bit 0)
    pub values: Option<ValueTable>,
}

impl BitRange {
    pub const fn flag(tag: &'static str, mask: u16) -> Self {
        Self { tag, mask, values: None }
    }

    pub const fn named(tag: &'static str, mask: u16, values: ValueTable) -> Self {
        Self { tag, mask, values: Some(values) }
    }

    /// Whether this range covers exactly one bit
    pub fn is_single_bit(&self) -> bool {
        self.mask.count_ones() == 1
    }

    /// Extract the range's value shifted down to bit 0
    pub fn extract(&self, word: u16) -> u16 {
        if self.mask == 0 {
            return 0;
        }
        (word & self.mask) >> self.mask.trailing_zeros()
    }
}

// =============================================================================
// Record header (RFC 1205 GDS variable header)
// =============================================================================

/// Fixed record type for the general data stream
pub const GDS_RECORD_TYPE: u16 = 0x12A0;
/// Usual value of the variable-record-length byte
pub const VARIABLE_HEADER_LENGTH: u8 = 0x04;

pub const HEADER_FLAG_ERR: u8 = 0x80; // data stream output error
pub const HEADER_FLAG_ATN: u8 = 0x40; // attention key
pub const HEADER_FLAG_SRQ: u8 = 0x04; // system request key
pub const HEADER_FLAG_TRQ: u8 = 0x02; // test request key
pub const HEADER_FLAG_HLP: u8 = 0x01; // help in error state

pub const HEADER_FLAG_BITS: &[BitRange] = &[
    BitRange::flag("header.flags.data_stream_output_error", HEADER_FLAG_ERR as u16),
    BitRange::flag("header.flags.attention_key", HEADER_FLAG_ATN as u16),
    BitRange::flag("header.flags.reserved", 0x38),
    BitRange::flag("header.flags.system_request", HEADER_FLAG_SRQ as u16),
    BitRange::flag("header.flags.test_request", HEADER_FLAG_TRQ as u16),
    BitRange::flag("header.flags.help_in_error_state", HEADER_FLAG_HLP as u16),
];

pub const OPCODES: ValueTable = &[
    (0x00, "No Operation"),
    (0x01, "Invite Operation"),
    (0x02, "Output Only"),
    (0x03, "Put/Get Operation"),
    (0x04, "Save Screen Operation"),
    (0x05, "Restore Screen Operation"),
    (0x06, "Read Immediate Operation"),
    (0x07, "Reserved"),
    (0x08, "Read Screen Operation"),
    (0x09, "Reserved"),
    (0x0A, "Cancel Invite Operation"),
    (0x0B, "Turn On Message Light"),
    (0x0C, "Turn Off Message Light"),
];

// =============================================================================
// Commands
// =============================================================================

/// Escape byte in front of every command
pub const ESC: u8 = 0x04;

/// 5250 Protocol Commands
pub const CMD_CLEAR_UNIT: u8 = 0x40;
pub const CMD_CLEAR_UNIT_ALTERNATE: u8 = 0x20;
pub const CMD_CLEAR_FORMAT_TABLE: u8 = 0x50;
pub const CMD_COPY_TO_PRINTER: u8 = 0x16;
pub const CMD_WRITE_TO_DISPLAY: u8 = 0x11;
pub const CMD_WRITE_ERROR_CODE: u8 = 0x21;
pub const CMD_WRITE_ERROR_CODE_WINDOW: u8 = 0x22;
pub const CMD_READ_INPUT_FIELDS: u8 = 0x42;
pub const CMD_READ_MDT_FIELDS: u8 = 0x52;
pub const CMD_READ_MDT_FIELDS_ALT: u8 = 0x82;
pub const CMD_READ_SCREEN_IMMEDIATE: u8 = 0x62;
pub const CMD_READ_SCREEN_EXTENDED: u8 = 0x64;
pub const CMD_READ_SCREEN_PRINT: u8 = 0x66;
pub const CMD_READ_SCREEN_PRINT_EXTENDED: u8 = 0x68;
pub const CMD_READ_SCREEN_PRINT_GRID: u8 = 0x6A;
pub const CMD_READ_SCREEN_PRINT_EXT_GRID: u8 = 0x6C;
pub const CMD_READ_IMMEDIATE: u8 = 0x72;
pub const CMD_READ_IMMEDIATE_ALT: u8 = 0x83;
pub const CMD_SAVE_SCREEN: u8 = 0x02;
pub const CMD_SAVE_PARTIAL_SCREEN: u8 = 0x03;
pub const CMD_RESTORE_SCREEN: u8 = 0x12;
pub const CMD_RESTORE_PARTIAL_SCREEN: u8 = 0x13;
pub const CMD_ROLL: u8 = 0x23;
pub const CMD_WRITE_STRUCTURED_FIELD: u8 = 0xF3;
pub const CMD_WRITE_SINGLE_STRUCTURED_FIELD: u8 = 0xF4;

pub const COMMANDS: ValueTable = &[
    (CMD_CLEAR_UNIT, "Clear Unit"),
    (CMD_CLEAR_UNIT_ALTERNATE, "Clear Unit Alternate"),
    (CMD_CLEAR_FORMAT_TABLE, "Clear Format Table"),
    (CMD_COPY_TO_PRINTER, "Copy-To-Printer"),
    (CMD_WRITE_TO_DISPLAY, "Write To Display"),
    (CMD_WRITE_ERROR_CODE, "Write Error Code"),
    (CMD_WRITE_ERROR_CODE_WINDOW, "Write Error Code To Window"),
    (CMD_READ_INPUT_FIELDS, "Read Input Fields"),
    (CMD_READ_MDT_FIELDS, "Read MDT Fields"),
    (CMD_READ_MDT_FIELDS_ALT, "Read MDT Alternate"),
    (CMD_READ_SCREEN_IMMEDIATE, "Read Screen"),
    (CMD_READ_SCREEN_EXTENDED, "Read Screen Extended"),
    (CMD_READ_SCREEN_PRINT, "Read Screen To Print"),
    (CMD_READ_SCREEN_PRINT_EXTENDED, "Read Screen To Print Extended"),
    (CMD_READ_SCREEN_PRINT_GRID, "Read Screen To Print With Gridlines"),
    (CMD_READ_SCREEN_PRINT_EXT_GRID, "Read Screen To Print Extended With Gridlines"),
    (CMD_READ_IMMEDIATE, "Read Immediate"),
    (CMD_READ_IMMEDIATE_ALT, "Read Immediate Alternate"),
    (CMD_SAVE_SCREEN, "Save Screen"),
    (CMD_SAVE_PARTIAL_SCREEN, "Save Partial Screen"),
    (CMD_RESTORE_SCREEN, "Restore Screen"),
    (CMD_RESTORE_PARTIAL_SCREEN, "Restore Partial Screen"),
    (CMD_ROLL, "Roll"),
    (CMD_WRITE_STRUCTURED_FIELD, "Write Structured Field"),
    (CMD_WRITE_SINGLE_STRUCTURED_FIELD, "Write Single Structured Field"),
];

/// Enum representation of 5250 protocol commands for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum CommandCode {
    ClearUnit = CMD_CLEAR_UNIT as isize,
    ClearUnitAlternate = CMD_CLEAR_UNIT_ALTERNATE as isize,
    ClearFormatTable = CMD_CLEAR_FORMAT_TABLE as isize,
    CopyToPrinter = CMD_COPY_TO_PRINTER as isize,
    WriteToDisplay = CMD_WRITE_TO_DISPLAY as isize,
    WriteErrorCode = CMD_WRITE_ERROR_CODE as isize,
    WriteErrorCodeWindow = CMD_WRITE_ERROR_CODE_WINDOW as isize,
    ReadInputFields = CMD_READ_INPUT_FIELDS as isize,
    ReadMdtFields = CMD_READ_MDT_FIELDS as isize,
    ReadMdtFieldsAlt = CMD_READ_MDT_FIELDS_ALT as isize,
    ReadScreenImmediate = CMD_READ_SCREEN_IMMEDIATE as isize,
    ReadScreenExtended = CMD_READ_SCREEN_EXTENDED as isize,
    ReadScreenPrint = CMD_READ_SCREEN_PRINT as isize,
    ReadScreenPrintExtended = CMD_READ_SCREEN_PRINT_EXTENDED as isize,
    ReadScreenPrintGrid = CMD_READ_SCREEN_PRINT_GRID as isize,
    ReadScreenPrintExtGrid = CMD_READ_SCREEN_PRINT_EXT_GRID as isize,
    ReadImmediate = CMD_READ_IMMEDIATE as isize,
    ReadImmediateAlt = CMD_READ_IMMEDIATE_ALT as isize,
    SaveScreen = CMD_SAVE_SCREEN as isize,
    SavePartialScreen = CMD_SAVE_PARTIAL_SCREEN as isize,
    RestoreScreen = CMD_RESTORE_SCREEN as isize,
    RestorePartialScreen = CMD_RESTORE_PARTIAL_SCREEN as isize,
    Roll = CMD_ROLL as isize,
    WriteStructuredField = CMD_WRITE_STRUCTURED_FIELD as isize,
    WriteSingleStructuredField = CMD_WRITE_SINGLE_STRUCTURED_FIELD as isize,
}

impl CommandCode {
    /// Convert a byte value to a CommandCode enum
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            CMD_CLEAR_UNIT => Some(Self::ClearUnit),
            CMD_CLEAR_UNIT_ALTERNATE => Some(Self::ClearUnitAlternate),
            CMD_CLEAR_FORMAT_TABLE => Some(Self::ClearFormatTable),
            CMD_COPY_TO_PRINTER => Some(Self::CopyToPrinter),
            CMD_WRITE_TO_DISPLAY => Some(Self::WriteToDisplay),
            CMD_WRITE_ERROR_CODE => Some(Self::WriteErrorCode),
            CMD_WRITE_ERROR_CODE_WINDOW => Some(Self::WriteErrorCodeWindow),
            CMD_READ_INPUT_FIELDS => Some(Self::ReadInputFields),
            CMD_READ_MDT_FIELDS => Some(Self::ReadMdtFields),
            CMD_READ_MDT_FIELDS_ALT => Some(Self::ReadMdtFieldsAlt),
            CMD_READ_SCREEN_IMMEDIATE => Some(Self::ReadScreenImmediate),
            CMD_READ_SCREEN_EXTENDED => Some(Self::ReadScreenExtended),
            CMD_READ_SCREEN_PRINT => Some(Self::ReadScreenPrint),
            CMD_READ_SCREEN_PRINT_EXTENDED => Some(Self::ReadScreenPrintExtended),
            CMD_READ_SCREEN_PRINT_GRID => Some(Self::ReadScreenPrintGrid),
            CMD_READ_SCREEN_PRINT_EXT_GRID => Some(Self::ReadScreenPrintExtGrid),
            CMD_READ_IMMEDIATE => Some(Self::ReadImmediate),
            CMD_READ_IMMEDIATE_ALT => Some(Self::ReadImmediateAlt),
            CMD_SAVE_SCREEN => Some(Self::SaveScreen),
            CMD_SAVE_PARTIAL_SCREEN => Some(Self::SavePartialScreen),
            CMD_RESTORE_SCREEN => Some(Self::RestoreScreen),
            CMD_RESTORE_PARTIAL_SCREEN => Some(Self::RestorePartialScreen),
            CMD_ROLL => Some(Self::Roll),
            CMD_WRITE_STRUCTURED_FIELD => Some(Self::WriteStructuredField),
            CMD_WRITE_SINGLE_STRUCTURED_FIELD => Some(Self::WriteSingleStructuredField),
            _ => None,
        }
    }

    /// Convert CommandCode enum to byte value
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        lookup(COMMANDS, self.to_u8()).unwrap_or("Unknown")
    }
}

/// Write control character, first byte: reset/lock options (bits 0-2)
pub const CC1_VALUES: ValueTable = &[
    (0x00, "No reset"),
    (0x20, "Reset pending AID; lock keyboard"),
    (0x40, "Reset pending AID; lock keyboard; reset MDT flags in nonbypass fields"),
    (0x60, "Reset pending AID; lock keyboard; reset MDT flags in all fields"),
    (0x80, "Reset pending AID; lock keyboard; null nonbypass fields with MDT on"),
    (0xA0, "Reset pending AID; lock keyboard; reset MDT flags in nonbypass fields; null nonbypass fields with MDT on"),
    (0xC0, "Reset pending AID; lock keyboard; reset MDT flags in nonbypass fields; null all nonbypass fields"),
    (0xE0, "Reset pending AID; lock keyboard; null all nonbypass fields"),
];

/// Write control character, second byte
pub const CC2_BITS: &[BitRange] = &[
    BitRange::flag("cc2.reserved", 0x80),
    BitRange::flag("cc2.cursor_does_not_move_on_unlock", 0x40),
    BitRange::flag("cc2.reset_blinking_cursor", 0x20),
    BitRange::flag("cc2.set_blinking_cursor", 0x10),
    BitRange::flag("cc2.unlock_keyboard", 0x08),
    BitRange::flag("cc2.sound_alarm", 0x04),
    BitRange::flag("cc2.message_waiting_off", 0x02),
    BitRange::flag("cc2.message_waiting_on", 0x01),
];

pub const CLEAR_UNIT_ALTERNATE_PARAMS: ValueTable = &[
    (0x00, "Set screen to 27 x 132"),
    (0x80, "Leave screen size unchanged"),
];

pub const ROLL_BITS: &[BitRange] = &[
    BitRange::flag("roll.direction_down", 0x80),
    BitRange::flag("roll.reserved", 0x60),
    BitRange::named("roll.lines", 0x1F, &[]),
];

pub const PARTIAL_SCREEN_BITS: &[BitRange] = &[
    BitRange::flag("partial_screen.restore_cursor", 0x80),
    BitRange::flag("partial_screen.restore_format_table", 0x40),
    BitRange::flag("partial_screen.reserved", 0x3F),
];

// =============================================================================
// Orders
// =============================================================================

/// 5250 Protocol Orders
pub const SOH: u8 = 0x01; // Start of header
pub const RA: u8 = 0x02; // Repeat to address
pub const EA: u8 = 0x03; // Erase to address
pub const TD: u8 = 0x10; // Transparent data
pub const SBA: u8 = 0x11; // Set buffer address
pub const WEA: u8 = 0x12; // Write extended attribute
pub const IC: u8 = 0x13; // Insert cursor
pub const MC: u8 = 0x14; // Move cursor
pub const WDSF: u8 = 0x15; // Write to display structured field
pub const SF: u8 = 0x1D; // Start of field

pub const ORDERS: ValueTable = &[
    (SOH, "Start of Header"),
    (RA, "Repeat to Address"),
    (EA, "Erase to Address"),
    (TD, "Transparent Data"),
    (SBA, "Set Buffer Address"),
    (WEA, "Write Extended Attribute"),
    (IC, "Insert Cursor"),
    (MC, "Move Cursor"),
    (WDSF, "Write to Display Structured Field"),
    (SF, "Start of Field"),
];

/// Enum representation of 5250 protocol orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum OrderCode {
    StartOfHeader = SOH as isize,
    RepeatToAddress = RA as isize,
    EraseToAddress = EA as isize,
    TransparentData = TD as isize,
    SetBufferAddress = SBA as isize,
    WriteExtendedAttribute = WEA as isize,
    InsertCursor = IC as isize,
    MoveCursor = MC as isize,
    WriteToDisplayStructuredField = WDSF as isize,
    StartOfField = SF as isize,
}

impl OrderCode {
    /// Convert a byte value to an OrderCode enum
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            SOH => Some(Self::StartOfHeader),
            RA => Some(Self::RepeatToAddress),
            EA => Some(Self::EraseToAddress),
            TD => Some(Self::TransparentData),
            SBA => Some(Self::SetBufferAddress),
            WEA => Some(Self::WriteExtendedAttribute),
            IC => Some(Self::InsertCursor),
            MC => Some(Self::MoveCursor),
            WDSF => Some(Self::WriteToDisplayStructuredField),
            SF => Some(Self::StartOfField),
            _ => None,
        }
    }

    /// Convert OrderCode enum to byte value
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Start of Header flag byte
pub const SOH_FLAG_BITS: &[BitRange] = &[
    BitRange::flag("soh.flags.reserved", 0xC0),
    BitRange::flag("soh.flags.cursor_right_to_left", 0x20),
    BitRange::flag("soh.flags.screen_reverse", 0x10),
    BitRange::flag("soh.flags.input_capable_only", 0x08),
    BitRange::flag("soh.flags.reserved_low", 0x07),
];

pub const SOH_KEYS_F24_F17: &[BitRange] = &[
    BitRange::flag("soh.key.f24", 0x80),
    BitRange::flag("soh.key.f23", 0x40),
    BitRange::flag("soh.key.f22", 0x20),
    BitRange::flag("soh.key.f21", 0x10),
    BitRange::flag("soh.key.f20", 0x08),
    BitRange::flag("soh.key.f19", 0x04),
    BitRange::flag("soh.key.f18", 0x02),
    BitRange::flag("soh.key.f17", 0x01),
];

pub const SOH_KEYS_F16_F9: &[BitRange] = &[
    BitRange::flag("soh.key.f16", 0x80),
    BitRange::flag("soh.key.f15", 0x40),
    BitRange::flag("soh.key.f14", 0x20),
    BitRange::flag("soh.key.f13", 0x10),
    BitRange::flag("soh.key.f12", 0x08),
    BitRange::flag("soh.key.f11", 0x04),
    BitRange::flag("soh.key.f10", 0x02),
    BitRange::flag("soh.key.f9", 0x01),
];

pub const SOH_KEYS_F8_F1: &[BitRange] = &[
    BitRange::flag("soh.key.f8", 0x80),
    BitRange::flag("soh.key.f7", 0x40),
    BitRange::flag("soh.key.f6", 0x20),
    BitRange::flag("soh.key.f5", 0x10),
    BitRange::flag("soh.key.f4", 0x08),
    BitRange::flag("soh.key.f3", 0x04),
    BitRange::flag("soh.key.f2", 0x02),
    BitRange::flag("soh.key.f1", 0x01),
];

/// Largest SOH length byte accepted by the 5494
pub const SOH_MAX_LENGTH: u8 = 7;

/// Erase to Address attribute types
pub const EA_ATTRIBUTE_TYPES: ValueTable = &[
    (0x00, "Display screen"),
    (0x01, "Extended primary attribute"),
    (0x02, "Extended foreground color attribute"),
    (0x03, "Extended ideographic attribute"),
    (0xFF, "All attributes"),
];

/// Write Extended Attribute selectors
pub const WEA_PRIMARY_ATTRIBUTE: u8 = 0x01;
pub const WEA_FOREGROUND_COLOR: u8 = 0x03;
pub const WEA_IDEOGRAPHIC: u8 = 0x05;

pub const WEA_TYPES: ValueTable = &[
    (WEA_PRIMARY_ATTRIBUTE, "Extended primary attribute"),
    (WEA_FOREGROUND_COLOR, "Extended foreground color"),
    (WEA_IDEOGRAPHIC, "Extended ideographic attribute"),
];

pub const EXTENDED_PRIMARY_BITS: &[BitRange] = &[
    BitRange::flag("wea.primary.reserved", 0xE0),
    BitRange::flag("wea.primary.reverse_image", 0x10),
    BitRange::flag("wea.primary.column_separator", 0x08),
    BitRange::flag("wea.primary.blink", 0x04),
    BitRange::flag("wea.primary.underscore", 0x02),
    BitRange::flag("wea.primary.high_intensity", 0x01),
];

pub const EXTENDED_FOREGROUND_COLORS: ValueTable = &[
    (0x00, "Default"),
    (0x20, "Green"),
    (0x22, "White"),
    (0x28, "Red"),
    (0x30, "Turquoise"),
    (0x32, "Yellow"),
    (0x38, "Pink"),
    (0x3A, "Blue"),
];

pub const EXTENDED_IDEOGRAPHIC: ValueTable = &[
    (0x00, "Default"),
    (0x01, "Ideographic data only"),
    (0x02, "Either ideographic or alphanumeric"),
    (0x03, "Open"),
];

// =============================================================================
// Field Format Word / Field Control Words / attributes
// =============================================================================

/// Identifier bits of the first Field Format Word byte
pub const FFW_ID_MASK: u8 = 0xC0;
pub const FFW_ID: u8 = 0x40;

pub const FFW_SHIFT_EDIT: ValueTable = &[
    (0, "Alpha shift"),
    (1, "Alpha only"),
    (2, "Numeric shift"),
    (3, "Numeric only"),
    (4, "Katakana shift"),
    (5, "Digits only"),
    (6, "I/O (feature input field)"),
    (7, "Signed numeric"),
];

pub const FFW_ADJUST: ValueTable = &[
    (0, "No adjust specified"),
    (1, "Reserved"),
    (2, "Reserved"),
    (3, "Reserved"),
    (4, "Reserved"),
    (5, "Right adjust, zero fill"),
    (6, "Right adjust, blank fill"),
    (7, "Mandatory fill"),
];

pub const FFW_BITS: &[BitRange] = &[
    BitRange::flag("ffw.id", 0xC000),
    BitRange::flag("ffw.bypass", 0x2000),
    BitRange::flag("ffw.dup_enable", 0x1000),
    BitRange::flag("ffw.mdt", 0x0800),
    BitRange::named("ffw.shift_edit", 0x0700, FFW_SHIFT_EDIT),
    BitRange::flag("ffw.auto_enter", 0x0080),
    BitRange::flag("ffw.field_exit_required", 0x0040),
    BitRange::flag("ffw.monocase", 0x0020),
    BitRange::flag("ffw.reserved", 0x0010),
    BitRange::flag("ffw.mandatory_enter", 0x0008),
    BitRange::named("ffw.adjust", 0x0007, FFW_ADJUST),
];

/// Recognised Field Control Word discriminants (first byte)
pub const FCW_TYPES: ValueTable = &[
    (0x80, "Resequence"),
    (0x81, "Magnetic stripe reader / selector light pen"),
    (0x82, "Ideographic"),
    (0x85, "Forward edge trigger"),
    (0x86, "Continuous entry field"),
    (0x88, "Cursor progression entry field"),
    (0x89, "Highlighted entry field"),
    (0x8A, "Pointer device selection entry field"),
    (0xB1, "Self-check"),
];

pub fn is_fcw(byte: u8) -> bool {
    lookup(FCW_TYPES, byte).is_some()
}

/// Field attribute byte: bits 0-2 are always 001
pub const FIELD_ATTRIBUTE_ID_MASK: u8 = 0xE0;
pub const FIELD_ATTRIBUTE_ID: u8 = 0x20;

pub const FIELD_ATTRIBUTE_BITS: &[BitRange] = &[
    BitRange::flag("attribute.id", 0xE0),
    BitRange::flag("attribute.column_separator", 0x10),
    BitRange::flag("attribute.blink", 0x08),
    BitRange::flag("attribute.underscore", 0x04),
    BitRange::flag("attribute.high_intensity", 0x02),
    BitRange::flag("attribute.reverse_image", 0x01),
];

pub fn is_field_attribute(byte: u8) -> bool {
    byte & FIELD_ATTRIBUTE_ID_MASK == FIELD_ATTRIBUTE_ID
}

/// Field Attributes
/// C.f. 5494 Functions Reference (SC30-3533-04), Section 15.6.12.3.
pub const ATTR_5250_GREEN: u8 = 0x20; // Default
pub const ATTR_5250_WHITE: u8 = 0x22;
pub const ATTR_5250_NONDISP: u8 = 0x27; // Nondisplay
pub const ATTR_5250_RED: u8 = 0x28;
pub const ATTR_5250_TURQ: u8 = 0x30;
pub const ATTR_5250_YELLOW: u8 = 0x32;
pub const ATTR_5250_PINK: u8 = 0x38;
pub const ATTR_5250_BLUE: u8 = 0x3A;

pub const ATTRIBUTE_COLORS: ValueTable = &[
    (ATTR_5250_GREEN, "Green"),
    (ATTR_5250_WHITE, "White"),
    (ATTR_5250_NONDISP, "Nondisplay"),
    (ATTR_5250_RED, "Red"),
    (ATTR_5250_TURQ, "Turquoise"),
    (ATTR_5250_YELLOW, "Yellow"),
    (ATTR_5250_PINK, "Pink"),
    (ATTR_5250_BLUE, "Blue"),
];

// =============================================================================
// Structured fields
// =============================================================================

/// The only structured-field class the 5250 data stream defines
pub const SF_CLASS_5250: u8 = 0xD9;

/// Write structured field types
pub const DEFINE_AUDIT_WINDOW_TABLE: u8 = 0x30;
pub const DEFINE_COMMAND_KEY_FUNCTION: u8 = 0x31;
pub const READ_TEXT_SCREEN: u8 = 0x32;
pub const DEFINE_PENDING_OPERATIONS: u8 = 0x33;
pub const DEFINE_TEXT_SCREEN_FORMAT: u8 = 0x34;
pub const DEFINE_SCALE_TIME: u8 = 0x35;
pub const WRITE_TEXT_SCREEN: u8 = 0x36;
pub const DEFINE_SPECIAL_CHARACTERS: u8 = 0x37;
pub const PENDING_DATA: u8 = 0x38;
pub const DEFINE_OPERATOR_ERROR_MSGS: u8 = 0x39;
pub const DEFINE_PITCH_TABLE: u8 = 0x3A;
pub const DEFINE_FAKE_DP_CMD_KEY_FUNC: u8 = 0x3B;
pub const PASS_THROUGH: u8 = 0x3F;
pub const IMAGE_FAX_CONTROL: u8 = 0x66;
pub const IMAGE_FAX_DOWNLOAD: u8 = 0x67;
pub const VIDEO_AUDIO_CONTROLS: u8 = 0x68;
pub const TRUE_TRANSPARENCY_WRITE: u8 = 0x6A;
pub const SF_5250_QUERY: u8 = 0x70;
pub const WSC_CUSTOMIZATION: u8 = 0x71;
pub const SF_5250_QUERY_STATION_STATE: u8 = 0x72;

/// Write to display structured field types
pub const DEFINE_SELECTION_FIELD: u8 = 0x50;
pub const CREATE_WINDOW: u8 = 0x51;
pub const UNREST_WIN_CURS_MOVE: u8 = 0x52;
pub const DEFINE_SCROLL_BAR_FIELD: u8 = 0x53;
pub const WRITE_DATA: u8 = 0x54;
pub const PROGRAMMABLE_MOUSE_BUT: u8 = 0x55;
pub const REM_GUI_SEL_FIELD: u8 = 0x58;
pub const REM_GUI_WINDOW: u8 = 0x59;
pub const REM_GUI_SCROLL_BAR_FIELD: u8 = 0x5B;
pub const REM_ALL_GUI_CONSTRUCTS: u8 = 0x5F;
pub const DRAW_ERASE_GRID_LINES: u8 = 0x60;
pub const CLEAR_GRID_LINE_BUFFER: u8 = 0x61;

pub const MAJOR_TYPES: ValueTable = &[
    (DEFINE_AUDIT_WINDOW_TABLE, "Define Audit Window Table"),
    (DEFINE_COMMAND_KEY_FUNCTION, "Define Command Key Function"),
    (READ_TEXT_SCREEN, "Read Text Screen"),
    (DEFINE_PENDING_OPERATIONS, "Define Pending Operations"),
    (DEFINE_TEXT_SCREEN_FORMAT, "Define Text Screen Format"),
    (DEFINE_SCALE_TIME, "Define Scale Line"),
    (WRITE_TEXT_SCREEN, "Write Text Screen"),
    (DEFINE_SPECIAL_CHARACTERS, "Define Special Characters"),
    (PENDING_DATA, "Pending Data"),
    (DEFINE_OPERATOR_ERROR_MSGS, "Define Operator Error Messages"),
    (DEFINE_PITCH_TABLE, "Define Pitch Table"),
    (DEFINE_FAKE_DP_CMD_KEY_FUNC, "Define Fake DP Command Key Function"),
    (PASS_THROUGH, "Pass-Through"),
    (DEFINE_SELECTION_FIELD, "Define Selection Field"),
    (CREATE_WINDOW, "Create Window"),
    (UNREST_WIN_CURS_MOVE, "Unrestricted Window Cursor Movement"),
    (DEFINE_SCROLL_BAR_FIELD, "Define Scroll Bar Field"),
    (WRITE_DATA, "Write Data"),
    (PROGRAMMABLE_MOUSE_BUT, "Programmable Mouse Buttons"),
    (REM_GUI_SEL_FIELD, "Remove GUI Selection Field"),
    (REM_GUI_WINDOW, "Remove GUI Window"),
    (REM_GUI_SCROLL_BAR_FIELD, "Remove GUI Scroll Bar Field"),
    (REM_ALL_GUI_CONSTRUCTS, "Remove All GUI Constructs"),
    (DRAW_ERASE_GRID_LINES, "Draw/Erase Grid Lines"),
    (CLEAR_GRID_LINE_BUFFER, "Clear Grid Line Buffer"),
    (IMAGE_FAX_CONTROL, "Image/Fax Control"),
    (IMAGE_FAX_DOWNLOAD, "Image/Fax Download"),
    (VIDEO_AUDIO_CONTROLS, "Video/Audio Controls"),
    (TRUE_TRANSPARENCY_WRITE, "True Transparency Write"),
    (SF_5250_QUERY, "5250 Query"),
    (WSC_CUSTOMIZATION, "WSC Customization"),
    (SF_5250_QUERY_STATION_STATE, "5250 Query Station State"),
];

// Minor structure types, per major type

pub const MINOR_BORDER_PRESENTATION: u8 = 0x01;
pub const MINOR_WINDOW_TITLE_FOOTER: u8 = 0x10;

pub const CREATE_WINDOW_MINORS: ValueTable = &[
    (MINOR_BORDER_PRESENTATION, "Border Presentation"),
    (MINOR_WINDOW_TITLE_FOOTER, "Window Title/Footer"),
];

pub const MINOR_CHOICE_PRESENTATION: u8 = 0x01;
pub const MINOR_CHOICE_INDICATORS: u8 = 0x02;
pub const MINOR_SCROLL_BAR_INDICATORS: u8 = 0x03;
pub const MINOR_MENU_BAR_SEPARATOR: u8 = 0x09;
pub const MINOR_CHOICE_TEXT: u8 = 0x10;

pub const SELECTION_FIELD_MINORS: ValueTable = &[
    (MINOR_CHOICE_PRESENTATION, "Choice Presentation Display Attributes"),
    (MINOR_CHOICE_INDICATORS, "Choice Indicators"),
    (MINOR_SCROLL_BAR_INDICATORS, "Scroll Bar Indicators"),
    (MINOR_MENU_BAR_SEPARATOR, "Menu Bar Separator"),
    (MINOR_CHOICE_TEXT, "Choice Text"),
];

pub const MINOR_SCROLL_BAR_PRESENTATION: u8 = 0x01;

pub const SCROLL_BAR_MINORS: ValueTable = &[(MINOR_SCROLL_BAR_PRESENTATION, "Scroll Bar Presentation")];

pub const MINOR_HORIZONTAL_LINE: u8 = 0x01;
pub const MINOR_VERTICAL_LINE: u8 = 0x02;
pub const MINOR_BOX: u8 = 0x03;

pub const GRID_LINE_MINORS: ValueTable = &[
    (MINOR_HORIZONTAL_LINE, "Horizontal Line"),
    (MINOR_VERTICAL_LINE, "Vertical Line"),
    (MINOR_BOX, "Box"),
];

pub const MINOR_KEYSTROKE_BUFFERING: u8 = 0x01;
pub const MINOR_CURSOR_CONTROL: u8 = 0x02;

pub const WSC_CUSTOMIZATION_MINORS: ValueTable = &[
    (MINOR_KEYSTROKE_BUFFERING, "Keystroke Buffering Control"),
    (MINOR_CURSOR_CONTROL, "Cursor Control"),
];

pub const MINOR_IMAGE_SCALING: u8 = 0x01;
pub const MINOR_IMAGE_LOCATION: u8 = 0x02;
pub const MINOR_IMAGE_ROTATION: u8 = 0x03;

pub const IMAGE_FAX_MINORS: ValueTable = &[
    (MINOR_IMAGE_SCALING, "Scaling"),
    (MINOR_IMAGE_LOCATION, "Location"),
    (MINOR_IMAGE_ROTATION, "Rotation"),
];

pub const MINOR_COMMAND_KEY: u8 = 0x01;

pub const COMMAND_KEY_MINORS: ValueTable = &[(MINOR_COMMAND_KEY, "Command Key Definition")];

pub const WINDOW_FLAG_BITS: &[BitRange] = &[
    BitRange::flag("window.flags.cursor_restricted", 0x80),
    BitRange::flag("window.flags.pull_down", 0x40),
    BitRange::flag("window.flags.reserved", 0x3F),
];

pub const BORDER_FLAG_BITS: &[BitRange] = &[
    BitRange::flag("border.flags.use_border_characters", 0x80),
    BitRange::flag("border.flags.reserved", 0x7F),
];

pub const TITLE_ALIGNMENT: ValueTable = &[
    (0, "Centered"),
    (1, "Right justified"),
    (2, "Left justified"),
    (3, "Reserved"),
];

pub const TITLE_FLAG_BITS: &[BitRange] = &[
    BitRange::named("title.flags.alignment", 0xC0, TITLE_ALIGNMENT),
    BitRange::flag("title.flags.footer", 0x20),
    BitRange::flag("title.flags.reserved", 0x1F),
];

pub const SELECTION_FIELD_TYPES: ValueTable = &[
    (0x01, "Menu bar"),
    (0x11, "Single choice selection field"),
    (0x12, "Multiple choice selection field"),
    (0x21, "Single choice selection list"),
    (0x22, "Multiple choice selection list"),
    (0x31, "Single choice selection field with pull-down"),
    (0x32, "Multiple choice selection field with pull-down"),
    (0x41, "Push buttons"),
    (0x51, "Push buttons in pull-down menu"),
];

pub const SELECTION_FLAG1_BITS: &[BitRange] = &[
    BitRange::flag("selection.flags1.mouse_characteristics", 0xC0),
    BitRange::flag("selection.flags1.reserved", 0x30),
    BitRange::flag("selection.flags1.auto_enter", 0x08),
    BitRange::flag("selection.flags1.auto_select", 0x04),
    BitRange::flag("selection.flags1.reserved_low", 0x03),
];

pub const SELECTION_FLAG2_BITS: &[BitRange] = &[
    BitRange::flag("selection.flags2.scroll_bar", 0x80),
    BitRange::flag("selection.flags2.blank_between_choices", 0x40),
    BitRange::flag("selection.flags2.numeric_selection", 0x20),
    BitRange::flag("selection.flags2.mnemonic_underscore", 0x10),
    BitRange::flag("selection.flags2.reserved", 0x0F),
];

pub const SELECTION_FLAG3_BITS: &[BitRange] = &[
    BitRange::flag("selection.flags3.cursor_restricted", 0x80),
    BitRange::flag("selection.flags3.reserved", 0x7F),
];

pub const CHOICE_STATES: ValueTable = &[
    (0, "Available, not selected"),
    (1, "Available, selected"),
    (2, "Not available"),
    (3, "Not available, selected"),
];

pub const CHOICE_NUMERIC_CHARS: ValueTable = &[
    (0, "No numeric selection characters"),
    (1, "One numeric selection character"),
    (2, "Two numeric selection characters"),
    (3, "Reserved"),
];

/// Choice Text first flag byte
pub const CHOICE_TEXT_MNEMONIC: u8 = 0x08;
pub const CHOICE_TEXT_AID: u8 = 0x04;
pub const CHOICE_TEXT_NUMERIC_MASK: u8 = 0x03;

pub const CHOICE_TEXT_FLAG1_BITS: &[BitRange] = &[
    BitRange::named("choice_text.flags1.state", 0xC0, CHOICE_STATES),
    BitRange::flag("choice_text.flags1.menu_bar_choice", 0x20),
    BitRange::flag("choice_text.flags1.reserved", 0x10),
    BitRange::flag("choice_text.flags1.mnemonic_offset", CHOICE_TEXT_MNEMONIC as u16),
    BitRange::flag("choice_text.flags1.aid", CHOICE_TEXT_AID as u16),
    BitRange::named("choice_text.flags1.numeric", CHOICE_TEXT_NUMERIC_MASK as u16, CHOICE_NUMERIC_CHARS),
];

pub const CHOICE_TEXT_FLAG2_BITS: &[BitRange] = &[
    BitRange::flag("choice_text.flags2.default_choice", 0x80),
    BitRange::flag("choice_text.flags2.roll_down", 0x40),
    BitRange::flag("choice_text.flags2.roll_up", 0x20),
    BitRange::flag("choice_text.flags2.reserved", 0x1F),
];

pub const SCROLL_BAR_FLAG_BITS: &[BitRange] = &[
    BitRange::flag("scroll_bar.flags.horizontal", 0x80),
    BitRange::flag("scroll_bar.flags.reserved", 0x7E),
    BitRange::flag("scroll_bar.flags.slider_moved", 0x01),
];

pub const GRID_FLAG_BITS: &[BitRange] = &[
    BitRange::flag("grid.flags.clear_buffer_first", 0x80),
    BitRange::flag("grid.flags.erase", 0x40),
    BitRange::flag("grid.flags.reserved", 0x3F),
];

pub const GRID_LINE_TYPES: ValueTable = &[
    (0x00, "Solid line"),
    (0x01, "Thick line"),
    (0x02, "Double line"),
    (0x03, "Dotted line"),
    (0x08, "Dashed line"),
    (0x09, "Thick dashed line"),
];

pub const GUI_REMOVE_FLAG_BITS: &[BitRange] = &[
    BitRange::flag("remove.flags.restore_under", 0x80),
    BitRange::flag("remove.flags.reserved", 0x7F),
];

pub const WSC_FLAG_BITS: &[BitRange] = &[
    BitRange::flag("wsc.flags.enable", 0x80),
    BitRange::flag("wsc.flags.reserved", 0x7F),
];

pub const ROTATIONS: ValueTable = &[
    (0x00, "0 degrees"),
    (0x01, "90 degrees"),
    (0x02, "180 degrees"),
    (0x03, "270 degrees"),
];

pub const QUERY_FLAG_BITS: &[BitRange] = &[
    BitRange::flag("query.flags.query_reply", 0x80),
    BitRange::flag("query.flags.reserved", 0x7F),
];

// =============================================================================
// Inbound: attention identifiers and query reply
// =============================================================================

pub const AID_INBOUND_WRITE_STRUCTURED_FIELD: u8 = 0x88;
pub const AID_IMAGE_FAX_REQUEST: u8 = 0x56;
pub const AID_IMAGE_FAX_ACK: u8 = 0x57;
pub const AID_IMAGE_FAX_ERROR: u8 = 0x58;
pub const AID_IMAGE_FAX_UNKNOWN: u8 = 0x59;
pub const AID_CLEAR: u8 = 0xBD;
pub const AID_ENTER: u8 = 0xF1;
pub const AID_HELP: u8 = 0xF3;
pub const AID_ROLL_DOWN: u8 = 0xF4;
pub const AID_ROLL_UP: u8 = 0xF5;
pub const AID_PRINT: u8 = 0xF6;
pub const AID_RECORD_BACKSPACE: u8 = 0xF8;

pub const AIDS: ValueTable = &[
    (0x31, "F1"),
    (0x32, "F2"),
    (0x33, "F3"),
    (0x34, "F4"),
    (0x35, "F5"),
    (0x36, "F6"),
    (0x37, "F7"),
    (0x38, "F8"),
    (0x39, "F9"),
    (0x3A, "F10"),
    (0x3B, "F11"),
    (0x3C, "F12"),
    (0xB1, "F13"),
    (0xB2, "F14"),
    (0xB3, "F15"),
    (0xB4, "F16"),
    (0xB5, "F17"),
    (0xB6, "F18"),
    (0xB7, "F19"),
    (0xB8, "F20"),
    (0xB9, "F21"),
    (0xBA, "F22"),
    (0xBB, "F23"),
    (0xBC, "F24"),
    (AID_CLEAR, "Clear"),
    (AID_ENTER, "Enter/Record Advance"),
    (AID_HELP, "Help"),
    (AID_ROLL_DOWN, "Roll Down"),
    (AID_ROLL_UP, "Roll Up"),
    (AID_PRINT, "Print"),
    (AID_RECORD_BACKSPACE, "Record Backspace"),
    (0x3F, "Selector Light Pen Auto Enter"),
    (0x50, "Forward Edge Trigger Auto Enter"),
    (0x6B, "PA3"),
    (0x6C, "PA1"),
    (0x6E, "PA2"),
    (AID_IMAGE_FAX_REQUEST, "Image/Fax Request"),
    (AID_IMAGE_FAX_ACK, "Image/Fax Acknowledge"),
    (AID_IMAGE_FAX_ERROR, "Image/Fax Error"),
    (AID_IMAGE_FAX_UNKNOWN, "Image/Fax Unknown Format"),
    (0x71, "Mouse Left Button Down"),
    (0x72, "Mouse Left Button Up"),
    (0x73, "Mouse Left Button Double Click"),
    (0x74, "Mouse Right Button Down"),
    (0x75, "Mouse Right Button Up"),
    (0x76, "Mouse Right Button Double Click"),
    (0x77, "Mouse Middle Button Down"),
    (0x78, "Mouse Middle Button Up"),
    (0x79, "Mouse Middle Button Double Click"),
    (0x7A, "Mouse Shift Left Button Down"),
    (0x7B, "Mouse Shift Left Button Up"),
    (0x7C, "Mouse Shift Left Button Double Click"),
    (AID_INBOUND_WRITE_STRUCTURED_FIELD, "Inbound Write Structured Field"),
];

pub fn is_aid(byte: u8) -> bool {
    lookup(AIDS, byte).is_some()
}

pub fn is_image_fax_aid(byte: u8) -> bool {
    matches!(
        byte,
        AID_IMAGE_FAX_REQUEST | AID_IMAGE_FAX_ACK | AID_IMAGE_FAX_ERROR | AID_IMAGE_FAX_UNKNOWN
    )
}

pub const DEVICE_CATEGORIES: ValueTable = &[(0x01, "Display station"), (0x02, "Printer")];

pub const QUERY_CAPABILITY1_BITS: &[BitRange] = &[
    BitRange::flag("query.capability1.row1_col1", 0x80),
    BitRange::flag("query.capability1.read_mdt_alternate", 0x40),
    BitRange::flag("query.capability1.pa1_pa2", 0x20),
    BitRange::flag("query.capability1.pa3", 0x10),
    BitRange::flag("query.capability1.cursor_select", 0x08),
    BitRange::flag("query.capability1.move_cursor_order", 0x04),
    BitRange::flag("query.capability1.read_mdt_immediate_alternate", 0x02),
    BitRange::flag("query.capability1.reserved", 0x01),
];

pub const SCREEN_SIZES: ValueTable = &[
    (0, "24 x 80 only"),
    (1, "24 x 80 and 27 x 132"),
    (2, "Reserved"),
    (3, "Reserved"),
];

pub const QUERY_CAPABILITY2_BITS: &[BitRange] = &[
    BitRange::named("query.capability2.screen_size", 0xC0, SCREEN_SIZES),
    BitRange::flag("query.capability2.light_pen", 0x20),
    BitRange::flag("query.capability2.magnetic_stripe_reader", 0x10),
    BitRange::named("query.capability2.color", 0x0C, &[(0, "Monochrome"), (1, "Eight colors"), (2, "Reserved"), (3, "Reserved")]),
    BitRange::flag("query.capability2.reserved", 0x03),
];

pub const QUERY_CAPABILITY3_BITS: &[BitRange] = &[
    BitRange::flag("query.capability3.ideographic", 0x80),
    BitRange::flag("query.capability3.write_structured_field_gui", 0x40),
    BitRange::flag("query.capability3.enhanced_ui_level1", 0x20),
    BitRange::flag("query.capability3.enhanced_ui_level2", 0x10),
    BitRange::flag("query.capability3.grid_lines", 0x08),
    BitRange::flag("query.capability3.programmable_mouse_buttons", 0x04),
    BitRange::flag("query.capability3.reserved", 0x03),
];

// =============================================================================
// Error codes
// =============================================================================

/// Operator Error Codes
/// See 5494 User's Guide (GA27-3960-03) 2.3.4
pub const ERR_DONT_KNOW: u8 = 0x01;
pub const ERR_BYPASS_FIELD: u8 = 0x04;
pub const ERR_NO_FIELD: u8 = 0x05;
pub const ERR_INVALID_SYSREQ: u8 = 0x06;
pub const ERR_MANDATORY_ENTRY: u8 = 0x07;
pub const ERR_ALPHA_ONLY: u8 = 0x08;
pub const ERR_NUMERIC_ONLY: u8 = 0x09;
pub const ERR_DIGITS_ONLY: u8 = 0x10;
pub const ERR_LAST_SIGNED: u8 = 0x11;
pub const ERR_NO_ROOM: u8 = 0x12;
pub const ERR_MANADATORY_FILL: u8 = 0x14;
pub const ERR_CHECK_DIGIT: u8 = 0x15;
pub const ERR_NOT_SIGNED: u8 = 0x16;
pub const ERR_EXIT_NOT_VALID: u8 = 0x18;
pub const ERR_DUP_NOT_ENABLED: u8 = 0x19;
pub const ERR_NO_FIELD_EXIT: u8 = 0x20;
pub const ERR_NO_INPUT: u8 = 0x26;
pub const ERR_BAD_CHAR: u8 = 0x27;
pub const ERR_DBCS_WRONG_TYPE: u8 = 0x60;
pub const ERR_SBCS_WRONG_TYPE: u8 = 0x61;

pub const OPERATOR_ERRORS: ValueTable = &[
    (ERR_DONT_KNOW, "Keyboard overrun."),
    (ERR_BYPASS_FIELD, "Entry of data not allowed in this input/output field."),
    (ERR_NO_FIELD, "Cursor in protected area of display."),
    (ERR_INVALID_SYSREQ, "Key pressed following System Request key was not valid."),
    (ERR_MANDATORY_ENTRY, "Mandatory data entry field. Must have data entered."),
    (ERR_ALPHA_ONLY, "Field requires alphabetic characters."),
    (ERR_NUMERIC_ONLY, "Field requires numeric characters."),
    (ERR_DIGITS_ONLY, "Only characters 0 through 9 allowed."),
    (ERR_LAST_SIGNED, "Key for sign position of field not valid."),
    (ERR_NO_ROOM, "No room to insert data."),
    (ERR_MANADATORY_FILL, "Mandatory fill field. Must fill to exit."),
    (ERR_CHECK_DIGIT, "Modulo 10 or 11 check digit error."),
    (ERR_NOT_SIGNED, "Field Minus key not valid in field."),
    (ERR_EXIT_NOT_VALID, "The key used to exit field not valid."),
    (ERR_DUP_NOT_ENABLED, "Duplicate key or Field Mark key not allowed in field."),
    (ERR_NO_FIELD_EXIT, "Enter key not allowed in field."),
    (ERR_NO_INPUT, "Field- entry not allowed."),
    (ERR_BAD_CHAR, "Cannot use undefined key."),
    (ERR_DBCS_WRONG_TYPE, "Field requires alphanumeric characters."),
    (ERR_SBCS_WRONG_TYPE, "Field requires double-byte characters."),
];

/// Helper function to get error message for a given operator error code
pub fn get_error_message(error_code: u8) -> Option<&'static str> {
    lookup(OPERATOR_ERRORS, error_code)
}

/// Data Stream Negative Response Codes
/// From Data Stream Negative Responses (SC30-3533-04) 13.4
pub const DSNR_RESEQ_ERR: u8 = 0x03;
pub const DSNR_INVCURSPOS: u8 = 0x22;
pub const DSNR_RAB4WSA: u8 = 0x23;
pub const DSNR_INVSFA: u8 = 0x26;
pub const DSNR_FLDEOD: u8 = 0x28;
pub const DSNR_FMTOVF: u8 = 0x29;
pub const DSNR_WRTEOD: u8 = 0x2A;
pub const DSNR_SOHLEN: u8 = 0x2B;
pub const DSNR_ROLLPARM: u8 = 0x2C;
pub const DSNR_NO_ESC: u8 = 0x31;
pub const DSNR_INV_WECW: u8 = 0x32;

pub const NEGATIVE_RESPONSES: ValueTable = &[
    (DSNR_RESEQ_ERR, "Format table resequencing error."),
    (DSNR_INVCURSPOS, "Write to display order row/col address is not valid"),
    (DSNR_RAB4WSA, "Repeat to Address less than the current WS address."),
    (DSNR_INVSFA, "Start-of-field order address not valid"),
    (DSNR_FLDEOD, "Field extends past the end of the display."),
    (DSNR_FMTOVF, "Format table overflow."),
    (DSNR_WRTEOD, "Attempted to write past the end of display."),
    (DSNR_SOHLEN, "Start-of-header length not valid."),
    (DSNR_ROLLPARM, "Invalid ROLL command parameter."),
    (DSNR_NO_ESC, "No escape code was found where it was expected."),
    (DSNR_INV_WECW, "Invalid row/col address on WEC TO WINDOW command."),
];
