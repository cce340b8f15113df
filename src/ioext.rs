use std::io::{
	Read, Write,
	SeekFrom,
};

use crate::{
	NbtError, NbtResult,
	nbt::io::NbtRead,
	nbt::io::NbtWrite,
};

pub trait Writable {
	fn write_to<W: Write>(&self, writer: &mut W) -> NbtResult<usize>;
}

pub trait Readable: Sized {
	fn read_from<R: Read>(reader: &mut R) -> NbtResult<Self>;
}

impl<T: NbtWrite> Writable for T {
	fn write_to<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		self.nbt_write(writer)
	}
}

impl<T: NbtRead> Readable for T {
	fn read_from<R: Read>(reader: &mut R) -> NbtResult<Self> {
		T::nbt_read(reader)
	}
}

/// A value that knows where it lives in a stream.
pub trait Seekable {
	fn seeker(&self) -> SeekFrom;
}

pub trait ReadExt: Read {
	fn read_value<T: Readable>(&mut self) -> NbtResult<T>;
}

impl<R: Read> ReadExt for R {
	fn read_value<T: Readable>(&mut self) -> NbtResult<T> {
		T::read_from(self)
	}
}

pub trait WriteExt: Write {
	fn write_value<T: Writable>(&mut self, value: T) -> NbtResult<usize>;
	fn write_zeroes(&mut self, count: u64) -> NbtResult<u64>;
}

impl<W: Write> WriteExt for W {
	fn write_value<T: Writable>(&mut self, value: T) -> NbtResult<usize> {
		value.write_to(self)
	}

	/// Writes `count` zeroes to a writer.
	fn write_zeroes(&mut self, count: u64) -> NbtResult<u64> {
		const ZEROES: &[u8; 4096] = &[0u8; 4096];
		let mut remainder = count;
		while remainder >= ZEROES.len() as u64 {
			self.write_all(ZEROES)?;
			remainder -= ZEROES.len() as u64;
		}
		if remainder != 0 {
			self.write_all(&ZEROES[0..remainder as usize])?;
		}
		Ok(count)
	}
}

/// Fills `buf` from the reader, surfacing truncation as its own error kind.
pub fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> NbtResult<()> {
	reader.read_exact(buf).map_err(NbtError::from_read_error)
}
