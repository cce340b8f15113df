use std::io::{
	Read, Write,
	SeekFrom,
};

use crate::NbtResult;
use crate::ioext::*;

/// One entry of the location table: a 3-byte big-endian sector offset packed
/// with a 1-byte sector count, laid out as |offset:3|count:1|.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct RegionSector(u32);

impl RegionSector {
	/// Provide offset and count in 4KiB sectors.
	pub fn new(offset: u32, count: u8) -> Self {
		Self((offset << 8) | count as u32)
	}

	/// An entry that marks its slot as holding no chunk.
	pub const fn empty() -> Self {
		Self(0)
	}

	/// The 4KiB sector offset. Multiply by `4096` for the seek offset.
	pub fn sector_offset(self) -> u64 {
		(self.0 >> 8) as u64
	}

	/// The 4KiB sector count. Multiply by `4096` for the size on disk.
	pub fn sector_count(self) -> u64 {
		(self.0 & 0xFF) as u64
	}

	/// The offset in bytes where this chunk's payload begins.
	pub fn offset(self) -> u64 {
		self.sector_offset() * 4096
	}

	/// The size in bytes this entry claims on disk.
	pub fn size(self) -> u64 {
		self.sector_count() * 4096
	}

	/// An offset of zero means the chunk is absent.
	pub fn is_empty(self) -> bool {
		self.sector_offset() == 0
	}
}

impl Readable for RegionSector {
	fn read_from<R: Read>(reader: &mut R) -> NbtResult<Self> {
		Ok(Self(reader.read_value()?))
	}
}

impl Writable for RegionSector {
	fn write_to<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		writer.write_value(self.0)
	}
}

impl Seekable for RegionSector {
	/// A [SeekFrom] that points at this sector's payload.
	fn seeker(&self) -> SeekFrom {
		SeekFrom::Start(self.offset())
	}
}
