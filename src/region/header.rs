use crate::{
    ioext::*,
    NbtResult,
};

use super::sector::RegionSector;
use super::timestamp::Timestamp;
use super::coord::RegionCoord;
use super::CHUNKS_PER_REGION;

use std::{
    io::{
        Read, Write,
        SeekFrom,
    },
    ops::{
        Index, IndexMut,
    },
};

/// Where a table of a given element type begins in a region file.
/// Implemented for [RegionSector] and [Timestamp].
pub trait RegionTableItem {
    const OFFSET: u64;
}

impl RegionTableItem for RegionSector {
    const OFFSET: u64 = 0;
}

impl RegionTableItem for Timestamp {
    const OFFSET: u64 = 4096;
}

/// One of the two 1024-entry header tables, indexed by local chunk.
#[derive(Debug, Clone)]
pub struct RegionTable<T: RegionTableItem>(Box<[T; CHUNKS_PER_REGION]>);

/// The 1024 [RegionSector] location entries.
pub type SectorTable = RegionTable<RegionSector>;

/// The 1024 [Timestamp] entries.
pub type TimestampTable = RegionTable<Timestamp>;

/// The 8KiB header at the beginning of every region file: the location table
/// followed by the timestamp table.
#[derive(Debug, Clone, Default)]
pub struct RegionHeader {
    pub sectors: SectorTable,
    pub timestamps: TimestampTable,
}

impl<T: RegionTableItem> RegionTable<T> {
    /// A [SeekFrom] value for the beginning of this table.
    pub const fn seeker() -> SeekFrom {
        SeekFrom::Start(T::OFFSET)
    }

    pub fn iter(&self) -> std::slice::Iter<T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<T> {
        self.0.iter_mut()
    }
}

impl<T: Default + Copy + RegionTableItem> Default for RegionTable<T> {
    fn default() -> Self {
        Self(Box::new([T::default(); CHUNKS_PER_REGION]))
    }
}

impl<C: Into<RegionCoord>, T: RegionTableItem> Index<C> for RegionTable<T> {
    type Output = T;

    fn index(&self, index: C) -> &Self::Output {
        let coord: RegionCoord = index.into();
        &self.0[coord.index()]
    }
}

impl<C: Into<RegionCoord>, T: RegionTableItem> IndexMut<C> for RegionTable<T> {
    fn index_mut(&mut self, index: C) -> &mut Self::Output {
        let coord: RegionCoord = index.into();
        &mut self.0[coord.index()]
    }
}

impl<T: Readable + RegionTableItem> Readable for RegionTable<T> {
    fn read_from<R: Read>(reader: &mut R) -> NbtResult<Self> {
        let table: Box<[T; CHUNKS_PER_REGION]> = (0..CHUNKS_PER_REGION)
            .map(|_| T::read_from(reader))
            .collect::<NbtResult<Box<[T]>>>()?
            .try_into()
            .ok()
            .expect("header tables hold exactly 1024 entries");
        Ok(Self(table))
    }
}

impl<T: Writable + RegionTableItem> Writable for RegionTable<T> {
    fn write_to<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
        let mut write_size = 0;
        for entry in self.iter() {
            write_size += entry.write_to(writer)?;
        }
        Ok(write_size)
    }
}

impl Readable for RegionHeader {
    fn read_from<R: Read>(reader: &mut R) -> NbtResult<Self> {
        Ok(Self {
            sectors: SectorTable::read_from(reader)?,
            timestamps: TimestampTable::read_from(reader)?,
        })
    }
}

impl Writable for RegionHeader {
    fn write_to<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
        Ok(self.sectors.write_to(writer)? + self.timestamps.write_to(writer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_roundtrip() {
        let mut header = RegionHeader::default();
        header.sectors[(0u16, 0u16)] = RegionSector::new(2, 1);
        header.sectors[(5u16, 10u16)] = RegionSector::new(3, 2);
        header.timestamps[(5u16, 10u16)] = Timestamp(1570215508);

        let mut buffer = Vec::new();
        let written = header.write_to(&mut buffer).unwrap();
        assert_eq!(written, 8192);

        let read = RegionHeader::read_from(&mut buffer.as_slice()).unwrap();
        assert_eq!(read.sectors[(0u16, 0u16)], RegionSector::new(2, 1));
        assert_eq!(read.sectors[(5u16, 10u16)], RegionSector::new(3, 2));
        assert_eq!(read.sectors[(31u16, 31u16)], RegionSector::empty());
        assert_eq!(read.timestamps[(5u16, 10u16)], Timestamp(1570215508));
    }
}
