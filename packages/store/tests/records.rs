//! End-to-end record tests: nested composition, collection fail-fast, and
//! per-format file round-trips.

use std::collections::BTreeMap;

use propstore_store::{Error, Format, Storable, StorableList, Store, Value};

/// A leaf record holding a string-keyed map of scalars.
#[derive(Clone, Debug, PartialEq)]
struct Track {
    title: String,
    ratings: BTreeMap<String, i64>,
}

impl Storable for Track {
    fn from_store(store: &Store) -> Option<Self> {
        Some(Track {
            title: store.get("title")?,
            ratings: store.get_map("ratings")?,
        })
    }

    fn write(&self, store: &mut Store) {
        store.set("title", self.title.clone());
        store.set_map("ratings", self.ratings.clone());
    }
}

/// A record holding an ordered list of records.
#[derive(Clone, Debug, PartialEq)]
struct Album {
    name: String,
    year: i64,
    tracks: Vec<Track>,
}

impl Storable for Album {
    fn from_store(store: &Store) -> Option<Self> {
        Some(Album {
            name: store.get("name")?,
            year: store.get("year")?,
            tracks: store.records("tracks")?,
        })
    }

    fn write(&self, store: &mut Store) {
        store.set("name", self.name.clone());
        store.set("year", self.year);
        store.set_records("tracks", Some(&self.tracks[..]));
    }
}

fn sample_album() -> Album {
    let mut ratings = BTreeMap::new();
    ratings.insert("press".to_string(), 4i64);
    ratings.insert("fans".to_string(), 5i64);

    Album {
        name: "Blue".to_string(),
        year: 1971,
        tracks: vec![
            Track {
                title: "All I Want".to_string(),
                ratings,
            },
            Track {
                title: "River".to_string(),
                ratings: BTreeMap::new(),
            },
        ],
    }
}

#[test]
fn nested_composition_roundtrips_in_every_format() {
    let album = sample_album();
    let dir = tempfile::tempdir().unwrap();

    for format in [Format::Binary, Format::Json, Format::Plist] {
        let path = dir.path().join(format!("album.{}", format));
        album.write_to(&path, format).unwrap();
        let decoded = Album::from_file(&path, format).unwrap();
        assert_eq!(decoded, album, "round-trip through {}", format);
    }
}

#[test]
fn empty_collections_roundtrip() {
    let album = Album {
        name: "Untitled".to_string(),
        year: 2001,
        tracks: Vec::new(),
    };

    let decoded = Album::from_properties(album.properties()).unwrap();
    assert_eq!(decoded, album);

    // And through text, where an empty list must stay a list.
    let json = album.to_json().unwrap();
    let store = Store::from_text(&json, Format::Json).unwrap();
    assert_eq!(store.records::<Track>("tracks"), Some(Vec::new()));
}

#[test]
fn album_list_roundtrips_in_order() {
    let mut second = sample_album();
    second.name = "Court and Spark".to_string();
    second.year = 1974;
    let albums = vec![sample_album(), second];

    let data = albums.to_data().unwrap();
    let decoded = Vec::<Album>::from_data(&data).unwrap();
    assert_eq!(decoded, albums);
}

#[test]
fn corrupting_one_element_voids_the_whole_list() {
    let albums = vec![sample_album(), sample_album()];
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("albums.json");
    albums.write_to(&path, Format::Json).unwrap();

    // Delete a required field from one element and write it back.
    let tree = Format::Json.read_file(&path).unwrap();
    let mut arr = tree.into_array().unwrap();
    if let Value::Map(map) = &mut arr[1] {
        map.remove("year");
    }
    Format::Json
        .write_file(&Value::Array(arr), &path)
        .unwrap();

    let result = Vec::<Album>::from_json_file(&path);
    assert!(matches!(result, Err(Error::IncompleteRecord)));
}

#[test]
fn list_files_roundtrip_in_every_format() {
    let albums = vec![sample_album()];
    let dir = tempfile::tempdir().unwrap();

    for format in [Format::Binary, Format::Json, Format::Plist] {
        let path = dir.path().join(format!("albums.{}", format));
        albums.write_to(&path, format).unwrap();

        let decoded = match format {
            Format::Binary => Vec::<Album>::from_binary_file(&path),
            Format::Json => Vec::<Album>::from_json_file(&path),
            Format::Plist => Vec::<Album>::from_plist_file(&path),
        }
        .unwrap();
        assert_eq!(decoded, albums, "list round-trip through {}", format);
    }
}

#[test]
fn byte_blobs_encode_everywhere_but_json() {
    #[derive(Clone, Debug, PartialEq)]
    struct Artwork {
        pixels: Vec<u8>,
    }

    impl Storable for Artwork {
        fn from_store(store: &Store) -> Option<Self> {
            Some(Artwork {
                pixels: store.get("pixels")?,
            })
        }

        fn write(&self, store: &mut Store) {
            store.set("pixels", self.pixels.clone());
        }
    }

    let artwork = Artwork {
        pixels: vec![0, 127, 255],
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("artwork");

    assert!(matches!(
        artwork.write_to(&path, Format::Json),
        Err(Error::Unrepresentable { .. })
    ));
    // A refused write must not leave a file behind.
    assert!(!path.exists());

    for format in [Format::Binary, Format::Plist] {
        artwork.write_to(&path, format).unwrap();
        assert_eq!(Artwork::from_file(&path, format).unwrap(), artwork);
    }
}

#[test]
fn store_text_surface_matches_record_surface() {
    let album = sample_album();

    let json = album.to_json().unwrap();
    let store = Store::from_text(&json, Format::Json).unwrap();

    assert_eq!(store.get::<String>("name"), Some("Blue".to_string()));
    assert_eq!(store.get::<i64>("year"), Some(1971));
    assert_eq!(store.records::<Track>("tracks").unwrap().len(), 2);
}
