use crate::nbt::tag::{
	Tag,
	NamedTag,
};

/// An insertion-ordered collection of named tags.
///
/// Order is preserved exactly on read and write. Name lookup returns the
/// first matching child, so a stream carrying duplicate names stays readable
/// and round-trips byte-exact even though writers are not expected to
/// produce duplicates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
	children: Vec<NamedTag>,
}

impl Compound {
	pub fn new() -> Self {
		Self {
			children: Vec::new(),
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			children: Vec::with_capacity(capacity),
		}
	}

	pub fn len(&self) -> usize {
		self.children.len()
	}

	pub fn is_empty(&self) -> bool {
		self.children.is_empty()
	}

	/// Appends a named child. No attempt is made to deduplicate; lookups
	/// prefer the earliest insertion.
	pub fn insert<S: Into<String>, T: Into<Tag>>(&mut self, name: S, tag: T) {
		self.children.push(NamedTag::new(name, tag));
	}

	pub fn push(&mut self, node: NamedTag) {
		self.children.push(node);
	}

	pub fn contains_key(&self, name: &str) -> bool {
		self.children.iter().any(|node| node.name == name)
	}

	/// First child with the given name, if any.
	pub fn get(&self, name: &str) -> Option<&Tag> {
		self.get_node(name).map(|node| &node.tag)
	}

	pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
		self.children.iter_mut()
			.find(|node| node.name == name)
			.map(|node| &mut node.tag)
	}

	pub fn get_node(&self, name: &str) -> Option<&NamedTag> {
		self.children.iter().find(|node| node.name == name)
	}

	pub fn iter(&self) -> std::slice::Iter<NamedTag> {
		self.children.iter()
	}

	pub fn iter_mut(&mut self) -> std::slice::IterMut<NamedTag> {
		self.children.iter_mut()
	}
}

impl<S: Into<String>, const N: usize> From<[(S, Tag); N]> for Compound {
	fn from(entries: [(S, Tag); N]) -> Self {
		entries.into_iter().collect()
	}
}

impl<S: Into<String>> FromIterator<(S, Tag)> for Compound {
	fn from_iter<It: IntoIterator<Item = (S, Tag)>>(iter: It) -> Self {
		Self {
			children: iter.into_iter()
				.map(|(name, tag)| NamedTag::new(name, tag))
				.collect(),
		}
	}
}

impl FromIterator<NamedTag> for Compound {
	fn from_iter<It: IntoIterator<Item = NamedTag>>(iter: It) -> Self {
		Self {
			children: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for Compound {
	type Item = NamedTag;
	type IntoIter = std::vec::IntoIter<NamedTag>;

	fn into_iter(self) -> Self::IntoIter {
		self.children.into_iter()
	}
}

impl<'a> IntoIterator for &'a Compound {
	type Item = &'a NamedTag;
	type IntoIter = std::slice::Iter<'a, NamedTag>;

	fn into_iter(self) -> Self::IntoIter {
		self.children.iter()
	}
}
