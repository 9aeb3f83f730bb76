// List of OMF51 record type constants
// Reference: Intel MCS-51 OMF specification + Keil extensions.
// An odd value is the Keil wide-index variant of the preceding even kind:
// every index field in the record widens from one byte to two.

pub const CONTENT: u8 = 0x06;
pub const CONTENT_WIDE: u8 = 0x07;
pub const DEBUG_ITEMS: u8 = 0x12;
pub const DEBUG_ITEMS_EXT: u8 = 0x22;
pub const DEBUG_ITEMS_EXT_WIDE: u8 = 0x23;
pub const EXTERNAL_DEF: u8 = 0x18;
pub const EXTERNAL_DEF_WIDE: u8 = 0x19;
pub const FIXUP: u8 = 0x08;
pub const FIXUP_WIDE: u8 = 0x09;
pub const LIB_DICTIONARY: u8 = 0x2A;
pub const LIB_HEADER: u8 = 0x2C;
pub const LIB_MODULE_LOCATIONS: u8 = 0x26;
pub const LIB_MODULE_NAMES: u8 = 0x28;
pub const MODULE_END: u8 = 0x04;
pub const MODULE_HEADER: u8 = 0x02;
pub const PUBLIC_DEF: u8 = 0x16;
pub const PUBLIC_DEF_WIDE: u8 = 0x17;
pub const REGISTER_MASK: u8 = 0x72;
pub const SCOPE_DEF: u8 = 0x10;
pub const SEGMENT_DEF: u8 = 0x0E;
pub const SEGMENT_DEF_WIDE: u8 = 0x0F;
