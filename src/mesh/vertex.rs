//! The vertex schema: channel kinds, their fixed binary attributes, and the
//! bit-set format a builder is constructed from.

use crate::errors::{Error, Result};

use super::MAX_VERTEX_CHANNELS;

/// One semantic piece of per-vertex data. Every channel kind has fixed,
/// hard-coded binary attributes; a mesh picks a subset of kinds through a
/// [`VertexFormat`].
///
/// [`VertexFormat`]: struct.VertexFormat.html
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum VertexChannel {
    Position = 0,
    Color0 = 1,
    Color1 = 2,
    Normal = 3,
    Tangent = 4,
    Bitangent = 5,
    Texcoord0 = 6,
    Texcoord1 = 7,
    Texcoord2 = 8,
    Texcoord3 = 9,
    Texcoord4 = 10,
    Texcoord5 = 11,
    Texcoord6 = 12,
    Texcoord7 = 13,
    User0 = 14,
    User1 = 15,
    User2 = 16,
    User3 = 17,
}

impl VertexChannel {
    /// Every channel kind, in ascending bit order. This order defines how
    /// channels interleave within a vertex record.
    pub const ALL: [VertexChannel; MAX_VERTEX_CHANNELS] = [
        VertexChannel::Position,
        VertexChannel::Color0,
        VertexChannel::Color1,
        VertexChannel::Normal,
        VertexChannel::Tangent,
        VertexChannel::Bitangent,
        VertexChannel::Texcoord0,
        VertexChannel::Texcoord1,
        VertexChannel::Texcoord2,
        VertexChannel::Texcoord3,
        VertexChannel::Texcoord4,
        VertexChannel::Texcoord5,
        VertexChannel::Texcoord6,
        VertexChannel::Texcoord7,
        VertexChannel::User0,
        VertexChannel::User1,
        VertexChannel::User2,
        VertexChannel::User3,
    ];

    /// The format flag for this channel.
    #[inline]
    pub fn bit(self) -> VertexFormat {
        VertexFormat::from_bits_truncate(1 << self as u32)
    }

    /// Dense index of this channel, equal to its bit position.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The data type of each element of this channel.
    pub fn format(self) -> ElementFormat {
        match self {
            VertexChannel::Color0 | VertexChannel::Color1 => ElementFormat::UByte,
            _ => ElementFormat::Float,
        }
    }

    /// The number of elements in this channel.
    pub fn elements(self) -> usize {
        match self {
            VertexChannel::Color0 | VertexChannel::Color1 => 4,
            VertexChannel::Texcoord0
            | VertexChannel::Texcoord1
            | VertexChannel::Texcoord2
            | VertexChannel::Texcoord3
            | VertexChannel::Texcoord4
            | VertexChannel::Texcoord5
            | VertexChannel::Texcoord6
            | VertexChannel::Texcoord7 => 2,
            VertexChannel::User0
            | VertexChannel::User1
            | VertexChannel::User2
            | VertexChannel::User3 => 4,
            _ => 3,
        }
    }

    /// Whether fixed-point elements should be normalized to [0, 1] when
    /// fetched by a shader.
    pub fn normalized(self) -> bool {
        match self {
            VertexChannel::Color0 | VertexChannel::Color1 => true,
            _ => false,
        }
    }

    /// The byte size of this channel within one vertex record.
    #[inline]
    pub fn bytes(self) -> usize {
        self.elements() * self.format().bytes()
    }
}

/// The data type of a single element in a vertex channel.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ElementFormat {
    Byte,
    UByte,
    Short,
    UShort,
    Float,
}

impl ElementFormat {
    /// The byte size of one element.
    pub fn bytes(self) -> usize {
        match self {
            ElementFormat::Byte | ElementFormat::UByte => 1,
            ElementFormat::Short | ElementFormat::UShort => 2,
            ElementFormat::Float => 4,
        }
    }
}

bitflags! {
    /// The set of channels present in a mesh's vertex records, and with it
    /// the exact interleaved layout of those records. A builder captures a
    /// `VertexFormat` at construction time and never changes it.
    #[derive(Serialize, Deserialize)]
    pub struct VertexFormat: u32 {
        const POSITION  = 1 << 0;
        const COLOR0    = 1 << 1;
        const COLOR1    = 1 << 2;
        const NORMAL    = 1 << 3;
        const TANGENT   = 1 << 4;
        const BITANGENT = 1 << 5;
        const TEXCOORD0 = 1 << 6;
        const TEXCOORD1 = 1 << 7;
        const TEXCOORD2 = 1 << 8;
        const TEXCOORD3 = 1 << 9;
        const TEXCOORD4 = 1 << 10;
        const TEXCOORD5 = 1 << 11;
        const TEXCOORD6 = 1 << 12;
        const TEXCOORD7 = 1 << 13;
        const USER0     = 1 << 14;
        const USER1     = 1 << 15;
        const USER2     = 1 << 16;
        const USER3     = 1 << 17;
    }
}

impl VertexFormat {
    /// The byte stride of one interleaved vertex record.
    pub fn stride(self) -> usize {
        self.channels().map(VertexChannel::bytes).sum()
    }

    /// The number of channels present.
    pub fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// The byte offset of `channel` within one record, or `None` if the
    /// format does not declare it. Offsets accumulate over the channels in
    /// ascending bit order and exactly tile `[0, stride)`.
    pub fn offset(self, channel: VertexChannel) -> Option<usize> {
        if !self.contains(channel.bit()) {
            return None;
        }

        let mut offset = 0;
        for c in self.channels() {
            if c == channel {
                break;
            }
            offset += c.bytes();
        }

        Some(offset)
    }

    /// Iterates over the channels present in this format, lowest bit first.
    pub fn channels(self) -> Channels {
        Channels {
            format: self,
            index: 0,
        }
    }
}

/// Iterator over the channels of a [`VertexFormat`] in ascending bit order.
///
/// [`VertexFormat`]: struct.VertexFormat.html
#[derive(Debug, Clone)]
pub struct Channels {
    format: VertexFormat,
    index: usize,
}

impl Iterator for Channels {
    type Item = VertexChannel;

    fn next(&mut self) -> Option<VertexChannel> {
        while self.index < MAX_VERTEX_CHANNELS {
            let channel = VertexChannel::ALL[self.index];
            self.index += 1;

            if self.format.contains(channel.bit()) {
                return Some(channel);
            }
        }

        None
    }
}

/// Byte offsets of every channel present in a fixed format, cached in a
/// dense array indexed by channel bit position. Built lazily on first use;
/// the owning builder's format never changes, so the cache stays valid for
/// the builder's whole life.
#[derive(Debug, Clone)]
pub(crate) struct OffsetTable {
    ready: bool,
    offsets: [u16; MAX_VERTEX_CHANNELS],
}

impl OffsetTable {
    pub fn new() -> Self {
        OffsetTable {
            ready: false,
            offsets: [0; MAX_VERTEX_CHANNELS],
        }
    }

    /// Byte offset of `channel` within one record of `format`.
    pub fn offset(&mut self, format: VertexFormat, channel: VertexChannel) -> Result<usize> {
        if !format.contains(channel.bit()) {
            return Err(Error::ChannelNotInFormat(channel));
        }

        Ok(self.lookup(format, channel))
    }

    /// Unchecked variant of `offset` for channels already known to be
    /// present in `format`.
    pub fn lookup(&mut self, format: VertexFormat, channel: VertexChannel) -> usize {
        if !self.ready {
            let mut acc = 0u16;
            for c in format.channels() {
                self.offsets[c.index()] = acc;
                acc += c.bytes() as u16;
            }
            self.ready = true;
        }

        self.offsets[channel.index()] as usize
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn attributes() {
        assert_eq!(VertexChannel::Position.bytes(), 12);
        assert_eq!(VertexChannel::Color0.bytes(), 4);
        assert_eq!(VertexChannel::Texcoord3.bytes(), 8);
        assert_eq!(VertexChannel::User2.bytes(), 16);

        assert_eq!(VertexChannel::Color1.format(), ElementFormat::UByte);
        assert_eq!(VertexChannel::Normal.format(), ElementFormat::Float);

        assert!(VertexChannel::Color0.normalized());
        assert!(!VertexChannel::Tangent.normalized());
    }

    #[test]
    fn stride_and_len() {
        let format = VertexFormat::POSITION | VertexFormat::COLOR0 | VertexFormat::TEXCOORD0;
        assert_eq!(format.stride(), 12 + 4 + 8);
        assert_eq!(format.len(), 3);

        assert_eq!(VertexFormat::empty().stride(), 0);
        assert_eq!(VertexFormat::empty().len(), 0);
        assert_eq!(VertexFormat::all().len(), MAX_VERTEX_CHANNELS);
    }

    #[test]
    fn offsets() {
        let format = VertexFormat::POSITION | VertexFormat::NORMAL | VertexFormat::TEXCOORD0;
        assert_eq!(format.offset(VertexChannel::Position), Some(0));
        assert_eq!(format.offset(VertexChannel::Normal), Some(12));
        assert_eq!(format.offset(VertexChannel::Texcoord0), Some(24));
        assert_eq!(format.offset(VertexChannel::Color0), None);
    }

    #[test]
    fn offsets_ignore_declaration_order() {
        // A bit-set has no declaration order; interleaving always follows
        // ascending bit order.
        let a = VertexFormat::TEXCOORD0 | VertexFormat::POSITION;
        let b = VertexFormat::POSITION | VertexFormat::TEXCOORD0;
        assert_eq!(a, b);
        assert_eq!(a.offset(VertexChannel::Texcoord0), Some(12));
    }

    #[test]
    fn offsets_tile_the_stride() {
        let formats = [
            VertexFormat::POSITION,
            VertexFormat::POSITION | VertexFormat::COLOR0,
            VertexFormat::POSITION | VertexFormat::COLOR1 | VertexFormat::TEXCOORD5,
            VertexFormat::all(),
        ];

        for &format in &formats {
            let mut expected = 0;
            for channel in format.channels() {
                assert_eq!(format.offset(channel), Some(expected));
                expected += channel.bytes();
            }
            assert_eq!(format.stride(), expected);
        }
    }

    #[test]
    fn cached_table_matches_pure_walk() {
        let format = VertexFormat::POSITION | VertexFormat::COLOR0 | VertexFormat::USER3;
        let mut table = OffsetTable::new();

        for channel in format.channels() {
            assert_eq!(table.offset(format, channel).ok(), format.offset(channel));
        }

        assert_eq!(
            table.offset(format, VertexChannel::Normal),
            Err(Error::ChannelNotInFormat(VertexChannel::Normal))
        );
    }
}
