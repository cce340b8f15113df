use crate::{NbtError, NbtResult};
use crate::nbt::compound::Compound;

/// The one-byte type discriminator that precedes a named tag's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TagID {
	End = 0,
	Byte = 1,
	Short = 2,
	Int = 3,
	Long = 4,
	Float = 5,
	Double = 6,
	ByteArray = 7,
	String = 8,
	List = 9,
	Compound = 10,
	IntArray = 11,
	LongArray = 12,
}

impl TagID {
	/// Decode a raw tag byte. Bytes outside of `0..=12` are rejected.
	pub fn from_u8(id: u8) -> NbtResult<TagID> {
		Ok(match id {
			0 => TagID::End,
			1 => TagID::Byte,
			2 => TagID::Short,
			3 => TagID::Int,
			4 => TagID::Long,
			5 => TagID::Float,
			6 => TagID::Double,
			7 => TagID::ByteArray,
			8 => TagID::String,
			9 => TagID::List,
			10 => TagID::Compound,
			11 => TagID::IntArray,
			12 => TagID::LongArray,
			unsupported => return Err(NbtError::InvalidTag(unsupported)),
		})
	}

	/// The name this tag type carries in the format documentation.
	pub fn title(self) -> &'static str {
		match self {
			TagID::End => "TAG_End",
			TagID::Byte => "TAG_Byte",
			TagID::Short => "TAG_Short",
			TagID::Int => "TAG_Int",
			TagID::Long => "TAG_Long",
			TagID::Float => "TAG_Float",
			TagID::Double => "TAG_Double",
			TagID::ByteArray => "TAG_Byte_Array",
			TagID::String => "TAG_String",
			TagID::List => "TAG_List",
			TagID::Compound => "TAG_Compound",
			TagID::IntArray => "TAG_Int_Array",
			TagID::LongArray => "TAG_Long_Array",
		}
	}
}

impl std::fmt::Display for TagID {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.title())
	}
}

/// A tag payload. Each variant carries its payload directly; the tag id is
/// intrinsic to the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
	/// The sentinel that terminates a Compound on the wire. It carries no
	/// payload and is never stored inside an in-memory Compound.
	End,
	Byte(i8),
	Short(i16),
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	ByteArray(Vec<i8>),
	String(String),
	List(ListTag),
	Compound(Compound),
	IntArray(Vec<i32>),
	LongArray(Vec<i64>),
}

impl Tag {
	pub fn id(&self) -> TagID {
		match self {
			Tag::End => TagID::End,
			Tag::Byte(_) => TagID::Byte,
			Tag::Short(_) => TagID::Short,
			Tag::Int(_) => TagID::Int,
			Tag::Long(_) => TagID::Long,
			Tag::Float(_) => TagID::Float,
			Tag::Double(_) => TagID::Double,
			Tag::ByteArray(_) => TagID::ByteArray,
			Tag::String(_) => TagID::String,
			Tag::List(_) => TagID::List,
			Tag::Compound(_) => TagID::Compound,
			Tag::IntArray(_) => TagID::IntArray,
			Tag::LongArray(_) => TagID::LongArray,
		}
	}

	/// Walks a sequence of Compound field names down from this tag.
	/// Fails with [NbtError::NotFound] at the first missing segment and with
	/// [NbtError::TypeMismatch] when a non-leaf segment is not a Compound.
	pub fn find_path(&self, path: &[&str]) -> NbtResult<&Tag> {
		let mut walker = self;
		for name in path {
			walker = walker.compound()?
				.get(name)
				.ok_or_else(|| NbtError::NotFound((*name).to_owned()))?;
		}
		Ok(walker)
	}
}

macro_rules! tag_accessors {
	($($method:ident: $variant:ident($type:ty);)+) => {
		impl Tag {
			$(
				/// Borrows the payload, failing when the tag is a different variant.
				pub fn $method(&self) -> NbtResult<&$type> {
					if let Tag::$variant(value) = self {
						Ok(value)
					} else {
						Err(NbtError::TypeMismatch {
							expected: TagID::$variant,
							found: self.id(),
						})
					}
				}
			)+
		}
	};
}

tag_accessors!(
	byte: Byte(i8);
	short: Short(i16);
	int: Int(i32);
	long: Long(i64);
	float: Float(f32);
	double: Double(f64);
	byte_array: ByteArray(Vec<i8>);
	string: String(String);
	list: List(ListTag);
	compound: Compound(Compound);
	int_array: IntArray(Vec<i32>);
	long_array: LongArray(Vec<i64>);
);

macro_rules! tag_from_impls {
	($($type:ty => $variant:ident;)+) => {
		$(
			impl From<$type> for Tag {
				fn from(value: $type) -> Self {
					Tag::$variant(value)
				}
			}
		)+
	};
}

tag_from_impls!(
	i8 => Byte;
	i16 => Short;
	i32 => Int;
	i64 => Long;
	f32 => Float;
	f64 => Double;
	Vec<i8> => ByteArray;
	String => String;
	ListTag => List;
	Compound => Compound;
	Vec<i32> => IntArray;
	Vec<i64> => LongArray;
);

impl From<&str> for Tag {
	fn from(value: &str) -> Self {
		Tag::String(value.to_owned())
	}
}

/// A homogeneous sequence. The element type is declared once up front, so the
/// payload is one vector per element type rather than a sequence of boxed
/// tags; a mixed list is unrepresentable.
///
/// `Empty` is the list with element type `End` and length zero, which is how
/// the wire format spells a list with nothing in it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListTag {
	#[default]
	Empty,
	Byte(Vec<i8>),
	Short(Vec<i16>),
	Int(Vec<i32>),
	Long(Vec<i64>),
	Float(Vec<f32>),
	Double(Vec<f64>),
	ByteArray(Vec<Vec<i8>>),
	String(Vec<String>),
	List(Vec<ListTag>),
	Compound(Vec<Compound>),
	IntArray(Vec<Vec<i32>>),
	LongArray(Vec<Vec<i64>>),
}

impl ListTag {
	/// The declared element type.
	pub fn element_id(&self) -> TagID {
		match self {
			ListTag::Empty => TagID::End,
			ListTag::Byte(_) => TagID::Byte,
			ListTag::Short(_) => TagID::Short,
			ListTag::Int(_) => TagID::Int,
			ListTag::Long(_) => TagID::Long,
			ListTag::Float(_) => TagID::Float,
			ListTag::Double(_) => TagID::Double,
			ListTag::ByteArray(_) => TagID::ByteArray,
			ListTag::String(_) => TagID::String,
			ListTag::List(_) => TagID::List,
			ListTag::Compound(_) => TagID::Compound,
			ListTag::IntArray(_) => TagID::IntArray,
			ListTag::LongArray(_) => TagID::LongArray,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ListTag::Empty => 0,
			ListTag::Byte(values) => values.len(),
			ListTag::Short(values) => values.len(),
			ListTag::Int(values) => values.len(),
			ListTag::Long(values) => values.len(),
			ListTag::Float(values) => values.len(),
			ListTag::Double(values) => values.len(),
			ListTag::ByteArray(values) => values.len(),
			ListTag::String(values) => values.len(),
			ListTag::List(values) => values.len(),
			ListTag::Compound(values) => values.len(),
			ListTag::IntArray(values) => values.len(),
			ListTag::LongArray(values) => values.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

macro_rules! listtag_from_impls {
	($($type:ty => $variant:ident;)+) => {
		$(
			impl From<Vec<$type>> for ListTag {
				fn from(values: Vec<$type>) -> Self {
					ListTag::$variant(values)
				}
			}
		)+
	};
}

listtag_from_impls!(
	i8 => Byte;
	i16 => Short;
	i32 => Int;
	i64 => Long;
	f32 => Float;
	f64 => Double;
	Vec<i8> => ByteArray;
	String => String;
	ListTag => List;
	Compound => Compound;
	Vec<i32> => IntArray;
	Vec<i64> => LongArray;
);

impl From<Vec<&str>> for ListTag {
	fn from(values: Vec<&str>) -> Self {
		ListTag::String(values.into_iter().map(str::to_owned).collect())
	}
}

/// A name/payload pair. Top-level roots always carry a name (possibly empty);
/// children of a Compound carry theirs, while List elements are bare payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
	pub name: String,
	pub tag: Tag,
}

impl NamedTag {
	pub fn new<S: Into<String>, T: Into<Tag>>(name: S, tag: T) -> Self {
		Self {
			name: name.into(),
			tag: tag.into(),
		}
	}

	pub fn id(&self) -> TagID {
		self.tag.id()
	}
}

impl From<Tag> for NamedTag {
	fn from(tag: Tag) -> Self {
		Self {
			name: String::new(),
			tag,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tag_id_rejects_out_of_range() {
		assert!(matches!(TagID::from_u8(12), Ok(TagID::LongArray)));
		assert!(matches!(TagID::from_u8(13), Err(NbtError::InvalidTag(13))));
		assert!(matches!(TagID::from_u8(255), Err(NbtError::InvalidTag(255))));
	}

	#[test]
	fn accessor_mismatch() {
		let tag = Tag::Int(42);
		assert_eq!(*tag.int().unwrap(), 42);
		let err = tag.string().unwrap_err();
		assert!(matches!(
			err,
			NbtError::TypeMismatch { expected: TagID::String, found: TagID::Int }
		));
	}

	#[test]
	fn list_element_id() {
		assert_eq!(ListTag::Empty.element_id(), TagID::End);
		assert_eq!(ListTag::from(vec![1i32, 2, 3]).element_id(), TagID::Int);
		assert_eq!(ListTag::Int(Vec::new()).element_id(), TagID::Int);
	}
}
