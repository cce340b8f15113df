use std::io::{Read, Write};
use chrono::{DateTime, Utc, TimeZone};
use crate::{
	NbtResult,
	for_each_int_type,
	ioext::*,
};

/// A 32-bit Unix timestamp from the region header's second table.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Timestamp(pub u32);

impl Timestamp {
	pub fn to_datetime(self) -> Option<DateTime<Utc>> {
		DateTime::<Utc>::try_from(self).ok()
	}

	/// Get a [Timestamp] for the current time (in Utc).
	pub fn utc_now() -> Timestamp {
		Timestamp(Utc::now().timestamp() as u32)
	}
}

macro_rules! __timestamp_impls {
	($type:ty) => {
		impl From<$type> for Timestamp {
			fn from(value: $type) -> Self {
				Self(value as u32)
			}
		}

		impl From<Timestamp> for $type {
			fn from(value: Timestamp) -> Self {
				value.0 as $type
			}
		}
	};
}

for_each_int_type!(__timestamp_impls);

impl Readable for Timestamp {
	fn read_from<R: Read>(reader: &mut R) -> NbtResult<Self> {
		Ok(Self(reader.read_value()?))
	}
}

impl Writable for Timestamp {
	fn write_to<W: Write>(&self, writer: &mut W) -> NbtResult<usize> {
		writer.write_value(self.0)
	}
}

impl From<DateTime<Utc>> for Timestamp {
	fn from(value: DateTime<Utc>) -> Self {
		Timestamp(value.timestamp() as u32)
	}
}

impl TryFrom<Timestamp> for DateTime<Utc> {
	type Error = ();

	fn try_from(value: Timestamp) -> Result<Self, Self::Error> {
		Utc.timestamp_opt(value.0 as i64, 0).single().ok_or(())
	}
}
