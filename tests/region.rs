use std::io::Cursor;
use std::path::PathBuf;

use mcnbt::compound;
use mcnbt::nbt::tag::NamedTag;
use mcnbt::region::{
    Region,
    CompressionScheme,
    chunk_to_region,
    chunk_to_local,
    region_filename,
    load_region,
    load_region_header,
    load_chunk,
    load_chunk_from_world,
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mcnbt_{}_{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn tiny_chunk(label: i32) -> NamedTag {
    NamedTag::new("root", compound! {
        ("label", label),
        ("name", format!("chunk {label}")),
    })
}

/// A region with chunks at (0,0), (5,10) and (31,31), one per required codec.
fn sparse_region() -> Region {
    let mut region = Region::new(0, 0);
    region.set_chunk((0u16, 0u16), tiny_chunk(1));
    region.get_entry_mut((0u16, 0u16)).compression = Some(CompressionScheme::GZip);
    region.set_chunk((5u16, 10u16), tiny_chunk(2));
    region.get_entry_mut((5u16, 10u16)).compression = Some(CompressionScheme::ZLib);
    region.set_chunk((31u16, 31u16), tiny_chunk(3));
    region.get_entry_mut((31u16, 31u16)).compression = Some(CompressionScheme::Uncompressed);
    region
}

#[test]
fn world_coordinate_integration() {
    let (region_x, region_z) = chunk_to_region(100, -50);
    assert_eq!((region_x, region_z), (3, -2));

    let (local_x, local_z) = chunk_to_local(100, -50);
    assert_eq!((local_x, local_z), (4, 14));

    assert_eq!(region_filename(region_x, region_z), "r.3.-2.mca");
    assert_eq!(Region::chunk_index(local_x as u16, local_z as u16), 452);
}

#[test]
fn sparse_region_roundtrip_in_memory() {
    let mut region = sparse_region();
    let mut buffer = Vec::new();
    let written = region.write_to(&mut buffer).unwrap();

    assert_eq!(written as usize, buffer.len());
    // header plus one padded sector per tiny chunk
    assert_eq!(buffer.len(), 8192 + 3 * 4096);

    let mut cursor = Cursor::new(buffer);
    let read = Region::read_from(&mut cursor).unwrap();

    assert_eq!(read.count_chunks(), 3);
    assert_eq!(read.count_loaded(), 3);
    for coord in [(0u16, 0u16), (5, 10), (31, 31)] {
        assert_eq!(read.get_chunk(coord), region.get_chunk(coord));
    }
    assert!(read.get_chunk((1u16, 0u16)).is_none());
}

#[test]
fn sparse_region_loads_from_file() {
    let dir = temp_dir("sparse");
    let path = dir.join("r.1.-2.mca");
    sparse_region().write_to_file(&path).unwrap();

    let region = load_region(&path).unwrap();
    assert_eq!((region.region_x, region.region_z), (1, -2));
    assert_eq!(region.count_chunks(), 3);
    assert_eq!(region.count_loaded(), 3);
    assert_eq!(
        *region.get_chunk((5u16, 10u16)).unwrap()
            .tag.find_path(&["label"]).unwrap()
            .int().unwrap(),
        2
    );

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn header_only_load_reads_no_chunks() {
    let dir = temp_dir("header");
    let path = dir.join("r.0.0.mca");
    sparse_region().write_to_file(&path).unwrap();

    let region = load_region_header(&path).unwrap();
    assert_eq!(region.count_chunks(), 3);
    assert_eq!(region.count_loaded(), 0);

    let entry = region.get_entry((0u16, 0u16));
    assert!(entry.exists());
    assert!(entry.sector.sector_offset() >= 2);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn lazy_chunk_load() {
    let dir = temp_dir("lazy");
    let path = dir.join("r.0.0.mca");
    sparse_region().write_to_file(&path).unwrap();

    let chunk = load_chunk(&path, 31, 31).unwrap().unwrap();
    assert_eq!(*chunk.tag.find_path(&["label"]).unwrap().int().unwrap(), 3);

    assert!(load_chunk(&path, 1, 1).unwrap().is_none());
    assert!(load_chunk(&path, 40, 0).unwrap().is_none());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn chunk_load_from_world_coordinates() {
    let dir = temp_dir("world");
    // world chunk (100, -50) lives at local (4, 14) of region (3, -2)
    let path = dir.join(region_filename(3, -2));
    let mut region = Region::new(3, -2);
    region.set_chunk((4u16, 14u16), tiny_chunk(7));
    region.write_to_file(&path).unwrap();

    let chunk = load_chunk_from_world(&dir, 100, -50).unwrap().unwrap();
    assert_eq!(*chunk.tag.find_path(&["label"]).unwrap().int().unwrap(), 7);

    // a chunk in a region that was never written
    assert!(load_chunk_from_world(&dir, 1000, 1000).unwrap().is_none());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn timestamps_survive_the_directory() {
    let mut region = sparse_region();
    region.get_entry_mut((5u16, 10u16)).timestamp = 1570215508u32.into();

    let mut buffer = Vec::new();
    region.write_to(&mut buffer).unwrap();

    let mut cursor = Cursor::new(buffer);
    let read = Region::read_from(&mut cursor).unwrap();
    assert_eq!(u32::from(read.get_entry((5u16, 10u16)).timestamp), 1570215508);
}

#[test]
fn compression_schemes_survive_roundtrip() {
    let mut region = sparse_region();
    let mut buffer = Vec::new();
    region.write_to(&mut buffer).unwrap();

    let mut cursor = Cursor::new(buffer);
    let read = Region::read_from(&mut cursor).unwrap();
    assert_eq!(
        read.get_entry((0u16, 0u16)).compression,
        Some(CompressionScheme::GZip)
    );
    assert_eq!(
        read.get_entry((5u16, 10u16)).compression,
        Some(CompressionScheme::ZLib)
    );
    assert_eq!(
        read.get_entry((31u16, 31u16)).compression,
        Some(CompressionScheme::Uncompressed)
    );
}
