//! EBCDIC (CP037) text decoding
//!
//! Every literal text payload in the 5250 data stream is EBCDIC. The decoder
//! attaches a readable rendering next to the raw bytes; it never replaces
//! them, so lossy mappings here cannot corrupt the byte-exact output.

/// EBCDIC CP037 to Unicode translation table.
///
/// Code page 037 is the US/Canada EBCDIC variant used by most AS/400
/// installations.
const EBCDIC_CP037: [char; 256] = [
    // 0x00-0x0F
    '\x00', '\x01', '\x02', '\x03', '\u{009C}', '\t', '\u{0086}', '\x7F',
    '\u{0097}', '\u{008D}', '\u{008E}', '\x0B', '\x0C', '\r', '\x0E', '\x0F',
    // 0x10-0x1F
    '\x10', '\x11', '\x12', '\x13', '\u{009D}', '\u{0085}', '\x08', '\u{0087}',
    '\x18', '\x19', '\u{0092}', '\u{008F}', '\x1C', '\x1D', '\x1E', '\x1F',
    // 0x20-0x2F
    '\u{0080}', '\u{0081}', '\u{0082}', '\u{0083}', '\u{0084}', '\n', '\x17', '\x1B',
    '\u{0088}', '\u{0089}', '\u{008A}', '\u{008B}', '\u{008C}', '\x05', '\x06', '\x07',
    // 0x30-0x3F
    '\u{0090}', '\u{0091}', '\x16', '\u{0093}', '\u{0094}', '\u{0095}', '\u{0096}', '\x04',
    '\u{0098}', '\u{0099}', '\u{009A}', '\u{009B}', '\x14', '\x15', '\u{009E}', '\x1A',
    // 0x40-0x4F
    ' ', '\u{00A0}', '\u{00E2}', '\u{00E4}', '\u{00E0}', '\u{00E1}', '\u{00E3}', '\u{00E5}',
    '\u{00E7}', '\u{00F1}', '\u{00A2}', '.', '<', '(', '+', '|',
    // 0x50-0x5F
    '&', '\u{00E9}', '\u{00EA}', '\u{00EB}', '\u{00E8}', '\u{00ED}', '\u{00EE}', '\u{00EF}',
    '\u{00EC}', '\u{00DF}', '!', '$', '*', ')', ';', '\u{00AC}',
    // 0x60-0x6F
    '-', '/', '\u{00C2}', '\u{00C4}', '\u{00C0}', '\u{00C1}', '\u{00C3}', '\u{00C5}',
    '\u{00C7}', '\u{00D1}', '\u{00A6}', ',', '%', '_', '>', '?',
    // 0x70-0x7F
    '\u{00F8}', '\u{00C9}', '\u{00CA}', '\u{00CB}', '\u{00C8}', '\u{00CD}', '\u{00CE}', '\u{00CF}',
    '\u{00CC}', '`', ':', '#', '@', '\'', '=', '"',
    // 0x80-0x8F
    '\u{00D8}', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
    'h', 'i', '\u{00AB}', '\u{00BB}', '\u{00F0}', '\u{00FD}', '\u{00FE}', '\u{00B1}',
    // 0x90-0x9F
    '\u{00B0}', 'j', 'k', 'l', 'm', 'n', 'o', 'p',
    'q', 'r', '\u{00AA}', '\u{00BA}', '\u{00E6}', '\u{00B8}', '\u{00C6}', '\u{00A4}',
    // 0xA0-0xAF
    '\u{00B5}', '~', 's', 't', 'u', 'v', 'w', 'x',
    'y', 'z', '\u{00A1}', '\u{00BF}', '\u{00D0}', '\u{00DD}', '\u{00DE}', '\u{00AE}',
    // 0xB0-0xBF
    '^', '\u{00A3}', '\u{00A5}', '\u{00B7}', '\u{00A9}', '\u{00A7}', '\u{00B6}', '\u{00BC}',
    '\u{00BD}', '\u{00BE}', '[', ']', '\u{00AF}', '\u{00A8}', '\u{00B4}', '\u{00D7}',
    // 0xC0-0xCF
    '{', 'A', 'B', 'C', 'D', 'E', 'F', 'G',
    'H', 'I', '\u{00AD}', '\u{00F4}', '\u{00F6}', '\u{00F2}', '\u{00F3}', '\u{00F5}',
    // 0xD0-0xDF
    '}', 'J', 'K', 'L', 'M', 'N', 'O', 'P',
    'Q', 'R', '\u{00B9}', '\u{00FB}', '\u{00FC}', '\u{00F9}', '\u{00FA}', '\u{00FF}',
    // 0xE0-0xEF
    '\\', '\u{00F7}', 'S', 'T', 'U', 'V', 'W', 'X',
    'Y', 'Z', '\u{00B2}', '\u{00D4}', '\u{00D6}', '\u{00D2}', '\u{00D3}', '\u{00D5}',
    // 0xF0-0xFF
    '0', '1', '2', '3', '4', '5', '6', '7',
    '8', '9', '\u{00B3}', '\u{00DB}', '\u{00DC}', '\u{00D9}', '\u{00DA}', '\u{009F}',
];

/// Convert one EBCDIC byte to its CP037 character.
#[inline]
pub fn ebcdic_to_char(byte: u8) -> char {
    EBCDIC_CP037[byte as usize]
}

/// Decode an EBCDIC byte run into display text.
///
/// Control characters (including the C1 range) render as `.` so the
/// result is always printable on one line.
pub fn decode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            let ch = ebcdic_to_char(b);
            if ch.is_control() {
                '.'
            } else {
                ch
            }
        })
        .collect()
}

/// Encode text into CP037. Characters outside the code page become an
/// EBCDIC space (0x40).
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| {
            EBCDIC_CP037
                .iter()
                .position(|&c| c == ch)
                .map_or(0x40, |pos| pos as u8)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(ebcdic_to_char(0xC1), 'A');
        assert_eq!(ebcdic_to_char(0x81), 'a');
        assert_eq!(ebcdic_to_char(0xF0), '0');
        assert_eq!(ebcdic_to_char(0x40), ' ');
    }

    #[test]
    fn test_decode_masks_controls() {
        assert_eq!(decode(&[0xC8, 0xC9, 0x00, 0x25]), "HI..");
    }

    #[test]
    fn test_encode_sign_on() {
        assert_eq!(encode("Sign On"), vec![0xE2, 0x89, 0x87, 0x95, 0x40, 0xD6, 0x95]);
        assert_eq!(decode(&encode("PUB400.COM")), "PUB400.COM");
    }
}
