use std::fmt::{self, Display, Formatter};

use crate::nbt::compound::Compound;
use crate::nbt::tag::{
    Tag,
    ListTag,
    NamedTag,
};

/// Nesting depth beyond which nothing further is rendered.
const MAX_DEPTH: usize = 10;
/// Sequences longer than this are elided...
const TRUNCATE_AT: usize = 10;
/// ...down to this many leading elements plus an ellipsis.
const SHOWN_WHEN_TRUNCATED: usize = 8;

/// Two spaces per nesting level.
struct Indent(usize);

impl Display for Indent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("  ")?;
        }
        Ok(())
    }
}

fn fmt_sequence<T: Display>(f: &mut Formatter<'_>, values: &[T]) -> fmt::Result {
    let truncated = values.len() > TRUNCATE_AT;
    let shown = if truncated { SHOWN_WHEN_TRUNCATED } else { values.len() };
    for (i, value) in values[..shown].iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    if truncated {
        f.write_str(", ...")?;
    }
    Ok(())
}

fn fmt_compound(f: &mut Formatter<'_>, compound: &Compound, level: usize) -> fmt::Result {
    f.write_str("Compound {")?;
    for node in compound.iter() {
        writeln!(f)?;
        fmt_named(f, node, level + 1)?;
    }
    write!(f, "\n{}}}", Indent(level))
}

fn fmt_list(f: &mut Formatter<'_>, list: &ListTag, level: usize) -> fmt::Result {
    match list {
        // nested aggregates get one line per element
        ListTag::List(values) => {
            f.write_str("List {")?;
            for value in values {
                writeln!(f)?;
                write!(f, "{}", Indent(level + 1))?;
                fmt_list(f, value, level + 1)?;
            }
            write!(f, "\n{}}}", Indent(level))
        }
        ListTag::Compound(values) => {
            f.write_str("List {")?;
            for value in values {
                writeln!(f)?;
                write!(f, "{}", Indent(level + 1))?;
                fmt_compound(f, value, level + 1)?;
            }
            write!(f, "\n{}}}", Indent(level))
        }
        ListTag::Empty => f.write_str("List {}"),
        ListTag::Byte(values) => fmt_scalar_list(f, "byte", values),
        ListTag::Short(values) => fmt_scalar_list(f, "short", values),
        ListTag::Int(values) => fmt_scalar_list(f, "int", values),
        ListTag::Long(values) => fmt_scalar_list(f, "long", values),
        ListTag::Float(values) => fmt_scalar_list(f, "float", values),
        ListTag::Double(values) => fmt_scalar_list(f, "double", values),
        ListTag::String(values) => fmt_scalar_list(f, "string", values),
        ListTag::ByteArray(values) => write!(f, "List of {} byte arrays", values.len()),
        ListTag::IntArray(values) => write!(f, "List of {} int arrays", values.len()),
        ListTag::LongArray(values) => write!(f, "List of {} long arrays", values.len()),
    }
}

fn fmt_scalar_list<T: Display>(f: &mut Formatter<'_>, label: &str, values: &[T]) -> fmt::Result {
    write!(f, "List of {label} {{")?;
    fmt_sequence(f, values)?;
    f.write_str("}")
}

fn fmt_tag(f: &mut Formatter<'_>, tag: &Tag, level: usize) -> fmt::Result {
    match tag {
        Tag::End => f.write_str("END"),
        Tag::Byte(value) => write!(f, "byte {value}"),
        Tag::Short(value) => write!(f, "short {value}"),
        Tag::Int(value) => write!(f, "int {value}"),
        Tag::Long(value) => write!(f, "long {value}"),
        Tag::Float(value) => write!(f, "float {value}"),
        Tag::Double(value) => write!(f, "double {value}"),
        Tag::String(value) => write!(f, "string \"{value}\""),
        Tag::ByteArray(values) => {
            f.write_str("byte array {")?;
            fmt_sequence(f, values)?;
            f.write_str("}")
        }
        Tag::IntArray(values) => {
            f.write_str("int array {")?;
            fmt_sequence(f, values)?;
            f.write_str("}")
        }
        Tag::LongArray(values) => {
            f.write_str("long array {")?;
            fmt_sequence(f, values)?;
            f.write_str("}")
        }
        Tag::List(list) => fmt_list(f, list, level),
        Tag::Compound(compound) => fmt_compound(f, compound, level),
    }
}

fn fmt_named(f: &mut Formatter<'_>, node: &NamedTag, level: usize) -> fmt::Result {
    if level > MAX_DEPTH {
        return Ok(());
    }
    write!(f, "{}", Indent(level))?;
    if !node.name.is_empty() {
        write!(f, "{}: ", node.name)?;
    }
    fmt_tag(f, &node.tag, level)
}

impl Display for NamedTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_named(f, self, 0)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_tag(f, self, 0)
    }
}
