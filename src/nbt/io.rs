use std::{
	fs::File,
	io::{
		BufReader, BufWriter,
		Read, Write,
	},
	path::Path,
};

use flate2::{
	read::GzDecoder,
	read::ZlibDecoder,
	write::GzEncoder,
	write::ZlibEncoder,
	Compression,
};

use crate::{NbtError, NbtResult};
use crate::ioext::read_exact;
use crate::nbt::compound::Compound;
use crate::nbt::tag::{
	Tag,
	TagID,
	ListTag,
	NamedTag,
};

/// A value that can be decoded from a big-endian NBT stream.
pub trait NbtRead: Sized {
	fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self>;
}

/// A value that can be encoded onto a big-endian NBT stream.
/// Returns the number of bytes written.
pub trait NbtWrite {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize>;
}

pub trait ReadNbt: Read {
	fn read_nbt<T: NbtRead>(&mut self) -> NbtResult<T>;
}

impl<R: Read> ReadNbt for R {
	fn read_nbt<T: NbtRead>(&mut self) -> NbtResult<T> {
		T::nbt_read(self)
	}
}

pub trait WriteNbt: Write {
	fn write_nbt<T: NbtWrite + ?Sized>(&mut self, value: &T) -> NbtResult<usize>;
}

impl<W: Write> WriteNbt for W {
	fn write_nbt<T: NbtWrite + ?Sized>(&mut self, value: &T) -> NbtResult<usize> {
		value.nbt_write(self)
	}
}

macro_rules! primitive_io_impls {
	($($type:ty)+) => {
		$(
			impl NbtRead for $type {
				fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self> {
					let mut buf = [0u8; std::mem::size_of::<$type>()];
					read_exact(reader, &mut buf)?;
					Ok(<$type>::from_be_bytes(buf))
				}
			}

			impl NbtWrite for $type {
				fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
					writer.write_all(&self.to_be_bytes())?;
					Ok(std::mem::size_of::<$type>())
				}
			}
		)+
	};
}

primitive_io_impls!(u8 i8 u16 i16 u32 i32 u64 i64);

// Floats travel bit-cast through the same-width unsigned integer so that the
// exact bit pattern survives, signalling NaNs included.
impl NbtRead for f32 {
	fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self> {
		Ok(f32::from_bits(u32::nbt_read(reader)?))
	}
}

impl NbtWrite for f32 {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		self.to_bits().nbt_write(writer)
	}
}

impl NbtRead for f64 {
	fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self> {
		Ok(f64::from_bits(u64::nbt_read(reader)?))
	}
}

impl NbtWrite for f64 {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		self.to_bits().nbt_write(writer)
	}
}

/// Array lengths are signed 32-bit on the wire; negatives are malformed.
fn read_array_length<R: Read>(reader: &mut R) -> NbtResult<usize> {
	let length = i32::nbt_read(reader)?;
	if length < 0 {
		return Err(NbtError::NegativeLength(length));
	}
	Ok(length as usize)
}

fn read_payloads<T: NbtRead, R: Read>(reader: &mut R, length: usize) -> NbtResult<Vec<T>> {
	let mut values = Vec::with_capacity(length);
	for _ in 0..length {
		values.push(T::nbt_read(reader)?);
	}
	Ok(values)
}

macro_rules! array_io_impls {
	($($type:ty)+) => {
		$(
			impl NbtRead for Vec<$type> {
				fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self> {
					let length = read_array_length(reader)?;
					read_payloads(reader, length)
				}
			}

			impl NbtWrite for Vec<$type> {
				fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
					let mut size = (self.len() as i32).nbt_write(writer)?;
					for value in self.iter() {
						size += value.nbt_write(writer)?;
					}
					Ok(size)
				}
			}
		)+
	};
}

array_io_impls!(i8 i32 i64);

// Strings and names share the same framing: an unsigned 16-bit length
// followed by that many bytes of UTF-8.
impl NbtRead for String {
	fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self> {
		let length = u16::nbt_read(reader)? as usize;
		let mut bytes = vec![0u8; length];
		read_exact(reader, &mut bytes)?;
		Ok(String::from_utf8(bytes)?)
	}
}

impl NbtWrite for String {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		self.as_str().nbt_write(writer)
	}
}

impl NbtWrite for str {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		let size = (self.len() as u16).nbt_write(writer)?;
		writer.write_all(self.as_bytes())?;
		Ok(size + self.len())
	}
}

impl NbtRead for TagID {
	fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self> {
		TagID::from_u8(u8::nbt_read(reader)?)
	}
}

impl NbtWrite for TagID {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		(*self as u8).nbt_write(writer)
	}
}

impl NbtRead for ListTag {
	fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self> {
		let element_id = TagID::nbt_read(reader)?;
		let length = i32::nbt_read(reader)?;
		if element_id == TagID::End {
			// The length is still on the wire for an empty list, but there is
			// nothing an element of type End could decode to.
			if length != 0 {
				return Err(NbtError::InvalidList(length));
			}
			return Ok(ListTag::Empty);
		}
		if length < 0 {
			return Err(NbtError::InvalidList(length));
		}
		let length = length as usize;
		Ok(match element_id {
			TagID::Byte => ListTag::Byte(read_payloads(reader, length)?),
			TagID::Short => ListTag::Short(read_payloads(reader, length)?),
			TagID::Int => ListTag::Int(read_payloads(reader, length)?),
			TagID::Long => ListTag::Long(read_payloads(reader, length)?),
			TagID::Float => ListTag::Float(read_payloads(reader, length)?),
			TagID::Double => ListTag::Double(read_payloads(reader, length)?),
			TagID::ByteArray => ListTag::ByteArray(read_payloads(reader, length)?),
			TagID::String => ListTag::String(read_payloads(reader, length)?),
			TagID::List => ListTag::List(read_payloads(reader, length)?),
			TagID::Compound => ListTag::Compound(read_payloads(reader, length)?),
			TagID::IntArray => ListTag::IntArray(read_payloads(reader, length)?),
			TagID::LongArray => ListTag::LongArray(read_payloads(reader, length)?),
			TagID::End => unreachable!(),
		})
	}
}

impl NbtWrite for ListTag {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		fn write_elements<T: NbtWrite, W: Write>(
			writer: &mut W,
			element_id: TagID,
			values: &[T],
		) -> NbtResult<usize> {
			let mut size = element_id.nbt_write(writer)?;
			size += (values.len() as i32).nbt_write(writer)?;
			for value in values {
				size += value.nbt_write(writer)?;
			}
			Ok(size)
		}
		match self {
			ListTag::Empty => {
				let size = TagID::End.nbt_write(writer)?;
				Ok(size + 0i32.nbt_write(writer)?)
			}
			ListTag::Byte(values) => write_elements(writer, TagID::Byte, values),
			ListTag::Short(values) => write_elements(writer, TagID::Short, values),
			ListTag::Int(values) => write_elements(writer, TagID::Int, values),
			ListTag::Long(values) => write_elements(writer, TagID::Long, values),
			ListTag::Float(values) => write_elements(writer, TagID::Float, values),
			ListTag::Double(values) => write_elements(writer, TagID::Double, values),
			ListTag::ByteArray(values) => write_elements(writer, TagID::ByteArray, values),
			ListTag::String(values) => write_elements(writer, TagID::String, values),
			ListTag::List(values) => write_elements(writer, TagID::List, values),
			ListTag::Compound(values) => write_elements(writer, TagID::Compound, values),
			ListTag::IntArray(values) => write_elements(writer, TagID::IntArray, values),
			ListTag::LongArray(values) => write_elements(writer, TagID::LongArray, values),
		}
	}
}

impl NbtRead for Compound {
	fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self> {
		let mut compound = Compound::new();
		loop {
			let node = NamedTag::nbt_read(reader)?;
			// The terminating End is consumed but never stored.
			if node.id() == TagID::End {
				break;
			}
			compound.push(node);
		}
		Ok(compound)
	}
}

impl NbtWrite for Compound {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		let mut size = 0;
		for node in self.iter() {
			size += node.nbt_write(writer)?;
		}
		Ok(size + TagID::End.nbt_write(writer)?)
	}
}

impl Tag {
	/// Decodes the payload for an already-consumed tag id.
	pub fn read_payload<R: Read>(id: TagID, reader: &mut R) -> NbtResult<Tag> {
		Ok(match id {
			TagID::End => Tag::End,
			TagID::Byte => Tag::Byte(i8::nbt_read(reader)?),
			TagID::Short => Tag::Short(i16::nbt_read(reader)?),
			TagID::Int => Tag::Int(i32::nbt_read(reader)?),
			TagID::Long => Tag::Long(i64::nbt_read(reader)?),
			TagID::Float => Tag::Float(f32::nbt_read(reader)?),
			TagID::Double => Tag::Double(f64::nbt_read(reader)?),
			TagID::ByteArray => Tag::ByteArray(Vec::<i8>::nbt_read(reader)?),
			TagID::String => Tag::String(String::nbt_read(reader)?),
			TagID::List => Tag::List(ListTag::nbt_read(reader)?),
			TagID::Compound => Tag::Compound(Compound::nbt_read(reader)?),
			TagID::IntArray => Tag::IntArray(Vec::<i32>::nbt_read(reader)?),
			TagID::LongArray => Tag::LongArray(Vec::<i64>::nbt_read(reader)?),
		})
	}
}

// The payload alone; id and name framing belong to the named tag.
impl NbtWrite for Tag {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		match self {
			Tag::End => Ok(0),
			Tag::Byte(value) => value.nbt_write(writer),
			Tag::Short(value) => value.nbt_write(writer),
			Tag::Int(value) => value.nbt_write(writer),
			Tag::Long(value) => value.nbt_write(writer),
			Tag::Float(value) => value.nbt_write(writer),
			Tag::Double(value) => value.nbt_write(writer),
			Tag::ByteArray(value) => value.nbt_write(writer),
			Tag::String(value) => value.nbt_write(writer),
			Tag::List(value) => value.nbt_write(writer),
			Tag::Compound(value) => value.nbt_write(writer),
			Tag::IntArray(value) => value.nbt_write(writer),
			Tag::LongArray(value) => value.nbt_write(writer),
		}
	}
}

impl NbtRead for NamedTag {
	fn nbt_read<R: Read>(reader: &mut R) -> NbtResult<Self> {
		let id = TagID::nbt_read(reader)?;
		if id == TagID::End {
			return Ok(NamedTag {
				name: String::new(),
				tag: Tag::End,
			});
		}
		let name = String::nbt_read(reader)?;
		let tag = Tag::read_payload(id, reader)?;
		Ok(NamedTag { name, tag })
	}
}

impl NbtWrite for NamedTag {
	fn nbt_write<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		// The sentinel is a lone zero byte with no name framing.
		if self.id() == TagID::End {
			return TagID::End.nbt_write(writer);
		}
		let mut size = self.id().nbt_write(writer)?;
		size += self.name.nbt_write(writer)?;
		Ok(size + self.tag.nbt_write(writer)?)
	}
}

impl NamedTag {
	/// The exact number of bytes [NbtWrite::nbt_write] will emit for this
	/// node, so output buffers can be sized up front.
	pub fn size_in_bytes(&self) -> usize {
		if self.id() == TagID::End {
			return 1;
		}
		1 + 2 + self.name.len() + self.tag.payload_size()
	}
}

impl Tag {
	/// Encoded size of the payload alone.
	pub fn payload_size(&self) -> usize {
		match self {
			Tag::End => 0,
			Tag::Byte(_) => 1,
			Tag::Short(_) => 2,
			Tag::Int(_) => 4,
			Tag::Long(_) => 8,
			Tag::Float(_) => 4,
			Tag::Double(_) => 8,
			Tag::ByteArray(value) => 4 + value.len(),
			Tag::String(value) => 2 + value.len(),
			Tag::List(value) => value.payload_size(),
			Tag::Compound(value) => compound_payload_size(value),
			Tag::IntArray(value) => 4 + value.len() * 4,
			Tag::LongArray(value) => 4 + value.len() * 8,
		}
	}
}

fn compound_payload_size(compound: &Compound) -> usize {
	compound.iter().map(NamedTag::size_in_bytes).sum::<usize>() + 1
}

impl ListTag {
	/// Encoded size of the payload alone (element id, length, elements).
	pub fn payload_size(&self) -> usize {
		let elements = match self {
			ListTag::Empty => 0,
			ListTag::Byte(values) => values.len(),
			ListTag::Short(values) => values.len() * 2,
			ListTag::Int(values) => values.len() * 4,
			ListTag::Long(values) => values.len() * 8,
			ListTag::Float(values) => values.len() * 4,
			ListTag::Double(values) => values.len() * 8,
			ListTag::ByteArray(values) => {
				values.iter().map(|value| 4 + value.len()).sum()
			}
			ListTag::String(values) => {
				values.iter().map(|value| 2 + value.len()).sum()
			}
			ListTag::List(values) => {
				values.iter().map(ListTag::payload_size).sum()
			}
			ListTag::Compound(values) => {
				values.iter().map(compound_payload_size).sum()
			}
			ListTag::IntArray(values) => {
				values.iter().map(|value| 4 + value.len() * 4).sum()
			}
			ListTag::LongArray(values) => {
				values.iter().map(|value| 4 + value.len() * 8).sum()
			}
		};
		1 + 4 + elements
	}
}

/// Parses a single named tag from the front of a byte buffer.
pub fn read_nbt(mut bytes: &[u8]) -> NbtResult<NamedTag> {
	NamedTag::nbt_read(&mut bytes)
}

/// Serializes a named tag into an exactly-sized buffer.
pub fn write_nbt(node: &NamedTag) -> NbtResult<Vec<u8>> {
	let mut buffer = Vec::with_capacity(node.size_in_bytes());
	node.nbt_write(&mut buffer)?;
	Ok(buffer)
}

/// Reads a bare (uncompressed) named tag from a file.
pub fn read_raw_file<P: AsRef<Path>>(path: P) -> NbtResult<NamedTag> {
	let mut reader = BufReader::new(File::open(path)?);
	reader.read_nbt()
}

/// Writes a bare (uncompressed) named tag to a file.
pub fn write_raw_file<P: AsRef<Path>>(path: P, node: &NamedTag) -> NbtResult<()> {
	let mut writer = BufWriter::new(File::create(path)?);
	node.nbt_write(&mut writer)?;
	Ok(writer.flush()?)
}

/// Reads a gzip-wrapped named tag from a file (the level.dat convention).
pub fn read_gzip_file<P: AsRef<Path>>(path: P) -> NbtResult<NamedTag> {
	let mut decoder = GzDecoder::new(BufReader::new(File::open(path)?));
	let mut data = Vec::new();
	decoder.read_to_end(&mut data).map_err(NbtError::Decompress)?;
	read_nbt(&data)
}

/// Writes a gzip-wrapped named tag to a file.
pub fn write_gzip_file<P: AsRef<Path>>(path: P, node: &NamedTag) -> NbtResult<()> {
	let writer = BufWriter::new(File::create(path)?);
	let mut encoder = GzEncoder::new(writer, Compression::default());
	node.nbt_write(&mut encoder)?;
	Ok(encoder.finish()?.flush()?)
}

/// Reads a zlib-wrapped named tag from a file (the chunk payload convention).
pub fn read_zlib_file<P: AsRef<Path>>(path: P) -> NbtResult<NamedTag> {
	let mut decoder = ZlibDecoder::new(BufReader::new(File::open(path)?));
	let mut data = Vec::new();
	decoder.read_to_end(&mut data).map_err(NbtError::Decompress)?;
	read_nbt(&data)
}

/// Writes a zlib-wrapped named tag to a file.
pub fn write_zlib_file<P: AsRef<Path>>(path: P, node: &NamedTag) -> NbtResult<()> {
	let writer = BufWriter::new(File::create(path)?);
	let mut encoder = ZlibEncoder::new(writer, Compression::default());
	node.nbt_write(&mut encoder)?;
	Ok(encoder.finish()?.flush()?)
}
