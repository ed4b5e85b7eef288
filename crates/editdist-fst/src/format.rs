// Optimized-lookup binary format: header parsing
//
// Only the header and the symbol table that follows it are read; the index
// and transition tables are never touched.

use bytemuck::{Pod, Zeroable};

use crate::EditDistError;

/// Magic prefix of a 3-tier HFST container wrapping the optimized-lookup data.
pub const HFST3_MAGIC: &[u8; 5] = b"HFST\0";

/// Size of the fixed optimized-lookup header in bytes.
pub const HEADER_SIZE: usize = 56;

/// On-disk layout of the fixed header (all fields little-endian).
///
/// - bytes 0..2: number of input symbols
/// - bytes 2..4: total number of symbols
/// - bytes 4..20: index table size, target table size, state count, transition count
/// - bytes 20..56: nine boolean properties stored as u32
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct RawHeader {
    input_symbol_count: u16,
    symbol_count: u16,
    index_table_size: u32,
    target_table_size: u32,
    state_count: u32,
    transition_count: u32,
    properties: [u32; 9],
}

const _: () = assert!(size_of::<RawHeader>() == HEADER_SIZE);

/// Boolean properties recorded in the header, in on-disk order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderProperties {
    pub weighted: bool,
    pub deterministic: bool,
    pub input_deterministic: bool,
    pub minimized: bool,
    pub cyclic: bool,
    pub has_epsilon_epsilon_transitions: bool,
    pub has_input_epsilon_transitions: bool,
    pub has_input_epsilon_cycles: bool,
    pub has_unweighted_input_epsilon_cycles: bool,
}

impl HeaderProperties {
    fn from_raw(raw: [u32; 9]) -> Self {
        let flag = |i: usize| u32::from_le(raw[i]) != 0;
        Self {
            weighted: flag(0),
            deterministic: flag(1),
            input_deterministic: flag(2),
            minimized: flag(3),
            cyclic: flag(4),
            has_epsilon_epsilon_transitions: flag(5),
            has_input_epsilon_transitions: flag(6),
            has_input_epsilon_cycles: flag(7),
            has_unweighted_input_epsilon_cycles: flag(8),
        }
    }

    fn to_raw(self) -> [u32; 9] {
        [
            self.weighted,
            self.deterministic,
            self.input_deterministic,
            self.minimized,
            self.cyclic,
            self.has_epsilon_epsilon_transitions,
            self.has_input_epsilon_transitions,
            self.has_input_epsilon_cycles,
            self.has_unweighted_input_epsilon_cycles,
        ]
        .map(|b| u32::to_le(b as u32))
    }
}

/// Parsed optimized-lookup transducer header.
///
/// Only `symbol_count` drives alphabet extraction; the other fields are kept
/// for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransducerHeader {
    pub input_symbol_count: u16,
    pub symbol_count: u16,
    pub index_table_size: u32,
    pub target_table_size: u32,
    pub state_count: u32,
    pub transition_count: u32,
    pub properties: HeaderProperties,
}

impl TransducerHeader {
    /// Encode the header in its 56-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let raw = RawHeader {
            input_symbol_count: self.input_symbol_count.to_le(),
            symbol_count: self.symbol_count.to_le(),
            index_table_size: self.index_table_size.to_le(),
            target_table_size: self.target_table_size.to_le(),
            state_count: self.state_count.to_le(),
            transition_count: self.transition_count.to_le(),
            properties: self.properties.to_raw(),
        };
        let mut out = [0u8; HEADER_SIZE];
        out.copy_from_slice(bytemuck::bytes_of(&raw));
        out
    }
}

/// Parse the header at the start of `data`.
///
/// If the data begins with [`HFST3_MAGIC`], the u16 length that follows is read
/// and that many bytes of container metadata are skipped before the fixed
/// header. Returns the header and the offset of the first symbol table byte.
pub fn parse_header(data: &[u8]) -> Result<(TransducerHeader, usize), EditDistError> {
    let mut offset = 0;
    if data.starts_with(HFST3_MAGIC) {
        let len_at = HFST3_MAGIC.len();
        let bytes = data.get(len_at..len_at + 2).ok_or(EditDistError::TooShort {
            expected: len_at + 2,
            actual: data.len(),
        })?;
        let skip = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
        offset = len_at + 2 + skip;
    }

    let end = offset + HEADER_SIZE;
    let bytes = data.get(offset..end).ok_or(EditDistError::TooShort {
        expected: end,
        actual: data.len(),
    })?;
    let raw: RawHeader = bytemuck::pod_read_unaligned(bytes);

    let header = TransducerHeader {
        input_symbol_count: u16::from_le(raw.input_symbol_count),
        symbol_count: u16::from_le(raw.symbol_count),
        index_table_size: u32::from_le(raw.index_table_size),
        target_table_size: u32::from_le(raw.target_table_size),
        state_count: u32::from_le(raw.state_count),
        transition_count: u32::from_le(raw.transition_count),
        properties: HeaderProperties::from_raw(raw.properties),
    };
    Ok((header, end))
}
