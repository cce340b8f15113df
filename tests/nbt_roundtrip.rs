use std::path::PathBuf;

use mcnbt::compound;
use mcnbt::NbtError;
use mcnbt::nbt::io::{
    read_nbt, write_nbt,
    read_raw_file, write_raw_file,
    read_gzip_file, write_gzip_file,
    read_zlib_file, write_zlib_file,
};
use mcnbt::nbt::tag::{Tag, TagID, ListTag, NamedTag};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mcnbt_{}_{}", std::process::id(), name))
}

#[test]
fn int_roundtrip_through_raw_file() {
    let node = NamedTag::new("myInt", 12345i32);
    let path = temp_path("int.nbt");

    write_raw_file(&path, &node).unwrap();
    let read = read_raw_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(read.id(), TagID::Int);
    assert_eq!(read.name, "myInt");
    assert_eq!(*read.tag.int().unwrap(), 12345);
}

#[test]
fn mixed_compound_through_gzip_file() {
    let root = compound! {
        ("intValue", 42i32),
        ("doubleValue", 3.14159265358979f64),
        ("stringValue", "test string"),
        ("intArray", vec![1i32, 2, 3, 4, 5]),
        ("nested", compound! {
            ("nestedInt", 100i32),
        }),
    };
    let node = NamedTag::new("root", root);
    let path = temp_path("complex.nbt");

    write_gzip_file(&path, &node).unwrap();
    let read = read_gzip_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(*read.tag.find_path(&["intValue"]).unwrap().int().unwrap(), 42);
    assert_eq!(
        *read.tag.find_path(&["doubleValue"]).unwrap().double().unwrap(),
        3.14159265358979
    );
    assert_eq!(
        read.tag.find_path(&["stringValue"]).unwrap().string().unwrap(),
        "test string"
    );
    let array = read.tag.find_path(&["intArray"]).unwrap().int_array().unwrap();
    assert_eq!(array, &[1, 2, 3, 4, 5]);
    assert_eq!(
        *read.tag.find_path(&["nested", "nestedInt"]).unwrap().int().unwrap(),
        100
    );
}

#[test]
fn zlib_file_roundtrip() {
    let node = NamedTag::new("root", compound! {
        ("message", "Hello, NBT!"),
    });
    let path = temp_path("zlib.nbt");

    write_zlib_file(&path, &node).unwrap();
    let read = read_zlib_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(read, node);
}

#[test]
fn empty_list_keeps_end_element_type() {
    let root = compound! {
        ("empty", ListTag::Empty),
    };
    let node = NamedTag::new("root", root);

    let bytes = write_nbt(&node).unwrap();
    let read = read_nbt(&bytes).unwrap();

    let list = read.tag.find_path(&["empty"]).unwrap().list().unwrap();
    assert_eq!(list.element_id(), TagID::End);
    assert_eq!(list.len(), 0);
}

#[test]
fn large_homogeneous_list() {
    let values: Vec<i32> = (0..10_000).collect();
    let node = NamedTag::new("big", ListTag::from(values));

    let bytes = write_nbt(&node).unwrap();
    assert_eq!(bytes.len(), node.size_in_bytes());
    let read = read_nbt(&bytes).unwrap();

    let list = read.tag.list().unwrap();
    assert_eq!(list.len(), 10_000);
    let ListTag::Int(values) = list else {
        panic!("expected a list of ints, got {:?}", list.element_id());
    };
    assert_eq!(values[0], 0);
    assert_eq!(values[9_999], 9_999);
}

#[test]
fn list_of_lists() {
    let inner: Vec<ListTag> = (0..3)
        .map(|i| ListTag::from(vec![i * 10, i * 10 + 1, i * 10 + 2, i * 10 + 3]))
        .collect();
    let node = NamedTag::new("outer", ListTag::from(inner));

    let read = read_nbt(&write_nbt(&node).unwrap()).unwrap();
    assert_eq!(read, node);

    let ListTag::List(inner) = read.tag.list().unwrap() else {
        panic!("expected a list of lists");
    };
    assert_eq!(inner.len(), 3);
    let ListTag::Int(values) = &inner[1] else {
        panic!("expected inner lists of ints");
    };
    assert_eq!(values[2], 12);
}

#[test]
fn unknown_tag_is_rejected() {
    let err = read_nbt(&[0xFF, 0x00]).unwrap_err();
    assert!(matches!(err, NbtError::InvalidTag(0xFF)));
}

#[test]
fn structural_roundtrip_of_every_payload_kind() {
    let root = compound! {
        ("byte", -1i8),
        ("short", -12345i16),
        ("int", i32::MIN),
        ("long", i64::MAX),
        ("float", 2.5f32),
        ("double", -0.0f64),
        ("byteArray", vec![-128i8, 0, 127]),
        ("string", "sphinx of black quartz"),
        ("intList", ListTag::from(vec![1i32, 2, 3])),
        ("compoundList", ListTag::from(vec![
            mcnbt::nbt::Compound::from([("a", Tag::Int(1))]),
            mcnbt::nbt::Compound::from([("b", Tag::Int(2))]),
        ])),
        ("compound", compound! { ("inner", 9i64) }),
        ("intArray", vec![i32::MIN, 0, i32::MAX]),
        ("longArray", vec![i64::MIN, 0, i64::MAX]),
    };
    let node = NamedTag::new("everything", root);

    let bytes = write_nbt(&node).unwrap();
    assert_eq!(bytes.len(), node.size_in_bytes());
    assert_eq!(read_nbt(&bytes).unwrap(), node);
}
