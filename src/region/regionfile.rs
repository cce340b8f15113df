use std::{
	fs::File,
	io::{
		BufReader, BufWriter,
		Read, Write,
		Seek, SeekFrom,
	},
	path::Path,
};

use log::warn;

use crate::{
	NbtError, NbtResult,
	ioext::*,
};
use crate::nbt::tag::NamedTag;

use super::{
	coord::*,
	sector::RegionSector,
	timestamp::Timestamp,
	header::RegionHeader,
	compression::CompressionScheme,
	CHUNKS_PER_REGION,
	required_sectors,
	pad_size,
};

/// Directory metadata for one chunk slot, plus the parsed tree when the
/// chunk has been loaded.
#[derive(Debug, Clone, Default)]
pub struct ChunkEntry {
	pub sector: RegionSector,
	pub timestamp: Timestamp,
	pub compression: Option<CompressionScheme>,
	pub data: Option<NamedTag>,
}

impl ChunkEntry {
	/// Whether the directory claims a payload for this slot.
	pub fn exists(&self) -> bool {
		!self.sector.is_empty()
	}

	pub fn is_loaded(&self) -> bool {
		self.data.is_some()
	}
}

/// An in-memory view of one Anvil region: the 1024-slot chunk directory and
/// any chunk trees that have been decoded from it.
#[derive(Debug, Clone)]
pub struct Region {
	pub region_x: i32,
	pub region_z: i32,
	chunks: Box<[ChunkEntry]>,
}

impl Default for Region {
	fn default() -> Self {
		Self::new(0, 0)
	}
}

impl Region {
	pub fn new(region_x: i32, region_z: i32) -> Self {
		Self {
			region_x,
			region_z,
			chunks: (0..CHUNKS_PER_REGION).map(|_| ChunkEntry::default()).collect(),
		}
	}

	/// The directory slot for a local chunk coordinate.
	pub fn chunk_index(local_x: u16, local_z: u16) -> usize {
		RegionCoord::new(local_x, local_z).index()
	}

	pub fn get_entry<C: Into<RegionCoord>>(&self, coord: C) -> &ChunkEntry {
		&self.chunks[coord.into().index()]
	}

	pub fn get_entry_mut<C: Into<RegionCoord>>(&mut self, coord: C) -> &mut ChunkEntry {
		&mut self.chunks[coord.into().index()]
	}

	/// The loaded tree for a local chunk, if there is one.
	pub fn get_chunk<C: Into<RegionCoord>>(&self, coord: C) -> Option<&NamedTag> {
		self.get_entry(coord).data.as_ref()
	}

	/// Stores a chunk tree into a slot and stamps it with the current time.
	/// The sector assignment happens when the region is written out.
	pub fn set_chunk<C: Into<RegionCoord>>(&mut self, coord: C, data: NamedTag) {
		let entry = self.get_entry_mut(coord);
		entry.data = Some(data);
		entry.timestamp = Timestamp::utc_now();
		if entry.compression.is_none() {
			entry.compression = Some(CompressionScheme::ZLib);
		}
	}

	pub fn entries(&self) -> std::slice::Iter<ChunkEntry> {
		self.chunks.iter()
	}

	/// Number of slots whose directory entry claims a payload.
	pub fn count_chunks(&self) -> usize {
		self.chunks.iter().filter(|entry| entry.exists()).count()
	}

	/// Number of slots holding a parsed tree.
	pub fn count_loaded(&self) -> usize {
		self.chunks.iter().filter(|entry| entry.is_loaded()).count()
	}

	fn from_header(header: &RegionHeader) -> Self {
		let mut region = Region::new(0, 0);
		for index in 0..CHUNKS_PER_REGION {
			region.chunks[index].sector = header.sectors[index];
			region.chunks[index].timestamp = header.timestamps[index];
		}
		region
	}

	/// Reads only the two header sectors from a region source.
	pub fn read_header_from<R: Read>(reader: &mut R) -> NbtResult<Self> {
		Ok(Self::from_header(&RegionHeader::read_from(reader)?))
	}

	/// Reads the directory and decodes every present chunk. A chunk that
	/// fails to decode keeps its directory metadata but no tree; the failure
	/// is logged and loading continues.
	pub fn read_from<R: Read + Seek>(reader: &mut R) -> NbtResult<Self> {
		let mut region = Self::read_header_from(reader)?;
		let source_len = reader.seek(SeekFrom::End(0))?;
		for index in 0..CHUNKS_PER_REGION {
			let sector = region.chunks[index].sector;
			if sector.is_empty() {
				continue;
			}
			match read_chunk_payload(reader, sector, source_len) {
				Ok((compression, data)) => {
					region.chunks[index].compression = Some(compression);
					region.chunks[index].data = Some(data);
				}
				Err(err) => {
					let coord = RegionCoord::from(index as u64);
					warn!("failed to load chunk {coord}: {err}");
				}
			}
		}
		Ok(region)
	}

	/// Serializes the region as a complete fresh file: the header, then one
	/// sector-padded payload block per present chunk, allocated from sector
	/// 2 upward. Directory entries are recomputed from scratch; timestamps
	/// are written as stored in each slot.
	pub fn write_to<W: Write>(&mut self, writer: &mut W) -> NbtResult<u64> {
		// Compress everything first; the directory precedes the payloads in
		// the file, so the offsets have to be known before any block is
		// emitted.
		let mut blocks = Vec::new();
		let mut next_sector: u32 = 2;
		for index in 0..CHUNKS_PER_REGION {
			let entry = &mut self.chunks[index];
			let Some(data) = &entry.data else {
				entry.sector = RegionSector::empty();
				continue;
			};
			let compression = entry.compression.unwrap_or(CompressionScheme::ZLib);
			let payload = compression.compress(&crate::nbt::io::write_nbt(data)?)?;
			let framed_len = payload.len() as u64 + 5;
			let sectors = required_sectors(framed_len as u32);
			if sectors > 255 {
				return Err(NbtError::ChunkTooLarge);
			}
			entry.compression = Some(compression);
			entry.sector = RegionSector::new(next_sector, sectors as u8);
			next_sector += sectors;
			blocks.push((compression, payload));
		}

		let mut written = 0u64;
		for index in 0..CHUNKS_PER_REGION {
			written += self.chunks[index].sector.write_to(writer)? as u64;
		}
		for index in 0..CHUNKS_PER_REGION {
			written += self.chunks[index].timestamp.write_to(writer)? as u64;
		}
		for (compression, payload) in blocks {
			// The length field counts the compression byte.
			written += writer.write_value((payload.len() + 1) as u32)? as u64;
			written += compression.write_to(writer)? as u64;
			writer.write_all(&payload)?;
			written += payload.len() as u64;
			written += writer.write_zeroes(pad_size(payload.len() as u64 + 5))?;
		}
		Ok(written)
	}

	pub fn write_to_file<P: AsRef<Path>>(&mut self, path: P) -> NbtResult<u64> {
		let mut writer = BufWriter::new(File::create(path)?);
		let written = self.write_to(&mut writer)?;
		writer.flush()?;
		Ok(written)
	}
}

/// Reads one framed chunk: the 5-byte header, the compressed bytes, and the
/// decoded NBT tree.
fn read_chunk_payload<R: Read + Seek>(
	reader: &mut R,
	sector: RegionSector,
	source_len: u64,
) -> NbtResult<(CompressionScheme, NamedTag)> {
	if sector.offset() + 5 > source_len {
		return Err(NbtError::Truncated);
	}
	reader.seek(sector.seeker())?;
	let length = reader.read_value::<u32>()?;
	if length == 0 {
		return Err(NbtError::Truncated);
	}
	let compression = CompressionScheme::read_from(reader)?;
	let compressed_len = (length - 1) as u64;
	if sector.offset() + 5 + compressed_len > source_len {
		return Err(NbtError::Truncated);
	}
	let mut compressed = vec![0u8; compressed_len as usize];
	crate::ioext::read_exact(reader, &mut compressed)?;
	let data = compression.decompress(&compressed)?;
	Ok((compression, crate::nbt::io::read_nbt(&data)?))
}

/// Parses an `r.<x>.<z>.mca` file name back into region coordinates.
fn parse_region_coords(path: &Path) -> Option<(i32, i32)> {
	let stem = path.file_stem()?.to_str()?;
	let mut parts = stem.split('.');
	if parts.next()? != "r" {
		return None;
	}
	let region_x = parts.next()?.parse().ok()?;
	let region_z = parts.next()?.parse().ok()?;
	if parts.next().is_some() {
		return None;
	}
	Some((region_x, region_z))
}

/// Opens a region file and eagerly decodes every present chunk.
pub fn load_region<P: AsRef<Path>>(path: P) -> NbtResult<Region> {
	let path = path.as_ref();
	let mut reader = BufReader::with_capacity(8192, File::open(path)?);
	let mut region = Region::read_from(&mut reader)?;
	if let Some((region_x, region_z)) = parse_region_coords(path) {
		region.region_x = region_x;
		region.region_z = region_z;
	}
	Ok(region)
}

/// Opens a region file and reads only its directory; no chunk IO happens.
pub fn load_region_header<P: AsRef<Path>>(path: P) -> NbtResult<Region> {
	let path = path.as_ref();
	let mut reader = BufReader::with_capacity(8192, File::open(path)?);
	let mut region = Region::read_header_from(&mut reader)?;
	if let Some((region_x, region_z)) = parse_region_coords(path) {
		region.region_x = region_x;
		region.region_z = region_z;
	}
	Ok(region)
}

/// Loads a single chunk from a region file, touching only that chunk's
/// location entry and payload. Returns `None` when the slot is vacant or the
/// coordinates fall outside the 32x32 grid.
pub fn load_chunk<P: AsRef<Path>>(
	path: P,
	local_x: u16,
	local_z: u16,
) -> NbtResult<Option<NamedTag>> {
	if local_x > 31 || local_z > 31 {
		return Ok(None);
	}
	let coord = RegionCoord::new(local_x, local_z);
	let mut file = File::open(path)?;
	file.seek(coord.sector_table_offset())?;
	let sector = RegionSector::read_from(&mut file)?;
	if sector.is_empty() {
		return Ok(None);
	}
	let source_len = file.seek(SeekFrom::End(0))?;
	let (_, data) = read_chunk_payload(&mut file, sector, source_len)?;
	Ok(Some(data))
}

/// Loads the chunk at world chunk coordinates out of a region folder,
/// composing the coordinate algebra with the `r.<x>.<z>.mca` naming
/// convention. A region file that does not exist yields `None`.
pub fn load_chunk_from_world<P: AsRef<Path>>(
	region_folder: P,
	chunk_x: i32,
	chunk_z: i32,
) -> NbtResult<Option<NamedTag>> {
	let (region_x, region_z) = chunk_to_region(chunk_x, chunk_z);
	let (local_x, local_z) = chunk_to_local(chunk_x, chunk_z);
	let region_path = region_folder.as_ref().join(region_filename(region_x, region_z));
	if !region_path.is_file() {
		return Ok(None);
	}
	load_chunk(region_path, local_x as u16, local_z as u16)
}
