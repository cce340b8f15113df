/// Shorthand way to create a Tag::Compound.
/// Example:
/// ```no_run
/// use mcnbt::compound;
/// use mcnbt::nbt::tag::Tag;
///
/// compound!{
///     ("Item One", 0i8),
///     ("Item Two", 2i32),
///     ("Item Three", Tag::Byte(1))
/// };
/// ```
#[macro_export]
macro_rules! compound {
    ($(($name:expr, $value:expr)),+$(,)?) => {
        $crate::nbt::tag::Tag::Compound($crate::nbt::compound::Compound::from([
            $(
                ($name, $crate::nbt::tag::Tag::from($value)),
            )+
        ]))
    };
    () => {
        $crate::nbt::tag::Tag::Compound($crate::nbt::compound::Compound::new())
    };
}

/// Shorthand way to create a Tag::List.
/// Example:
/// ```no_run
/// use mcnbt::list;
///
/// list!{ 1, 2, 3, 4, 5, 6, 7, 8, 9, 10 };
/// list![
///     "One",
///     "Two",
///     "Three"
/// ];
/// ```
#[macro_export]
macro_rules! list {
    ($($item:expr),+$(,)?) => {
        $crate::nbt::tag::Tag::List($crate::nbt::tag::ListTag::from(std::vec![
            $($item,)+
        ]))
    };
    ($value:expr; $repetitions:expr) => {
        $crate::nbt::tag::Tag::List($crate::nbt::tag::ListTag::from(std::vec![$value; $repetitions]))
    };
    () => {
        $crate::nbt::tag::Tag::List($crate::nbt::tag::ListTag::Empty)
    };
}

pub use list;
pub use compound;
