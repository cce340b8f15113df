pub mod tag;
pub mod compound;
pub mod io;
pub mod format;
pub mod macros;

pub use tag::{
	Tag,
	TagID,
	ListTag,
	NamedTag,
};
pub use compound::Compound;
