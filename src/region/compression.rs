use std::io::{Read, Write};

use flate2::{
    read::GzDecoder,
    read::ZlibDecoder,
    write::GzEncoder,
    write::ZlibEncoder,
    Compression,
};

use crate::{
    NbtError, NbtResult,
    ioext::*,
};

/// The compression id byte of a chunk's payload header.
///
/// Gzip, zlib and uncompressed payloads are decoded. LZ4 and the custom
/// escape hatch are recognized so their ids read cleanly out of a header,
/// but asking to decode them fails with
/// [NbtError::UnsupportedCompression].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompressionScheme {
    GZip = 1,
    ZLib = 2,
    Uncompressed = 3,
    LZ4 = 4,
    Custom = 127,
}

impl CompressionScheme {
    pub fn from_id(id: u8) -> NbtResult<Self> {
        match id {
            1 => Ok(Self::GZip),
            2 => Ok(Self::ZLib),
            3 => Ok(Self::Uncompressed),
            4 => Ok(Self::LZ4),
            127 => Ok(Self::Custom),
            unsupported => Err(NbtError::UnsupportedCompression(unsupported)),
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Inflates a chunk payload (the `length - 1` bytes after the header).
    /// The output buffer grows to fit; callers cannot know the decompressed
    /// size up front.
    pub fn decompress(self, compressed: &[u8]) -> NbtResult<Vec<u8>> {
        let mut data = Vec::new();
        match self {
            Self::GZip => {
                GzDecoder::new(compressed)
                    .read_to_end(&mut data)
                    .map_err(NbtError::Decompress)?;
            }
            Self::ZLib => {
                ZlibDecoder::new(compressed)
                    .read_to_end(&mut data)
                    .map_err(NbtError::Decompress)?;
            }
            Self::Uncompressed => data.extend_from_slice(compressed),
            Self::LZ4 | Self::Custom => {
                return Err(NbtError::UnsupportedCompression(self.id()));
            }
        }
        Ok(data)
    }

    /// Deflates chunk data for writing.
    pub fn compress(self, data: &[u8]) -> NbtResult<Vec<u8>> {
        match self {
            Self::GZip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                Ok(encoder.finish()?)
            }
            Self::ZLib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                Ok(encoder.finish()?)
            }
            Self::Uncompressed => Ok(data.to_vec()),
            Self::LZ4 | Self::Custom => Err(NbtError::UnsupportedCompression(self.id())),
        }
    }
}

impl Readable for CompressionScheme {
    fn read_from<R: Read>(reader: &mut R) -> NbtResult<Self> {
        Self::from_id(reader.read_value::<u8>()?)
    }
}

impl Writable for CompressionScheme {
    fn write_to<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
        writer.write_value(self.id())
    }
}
