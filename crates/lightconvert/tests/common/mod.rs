//! Raw dataset fixtures for integration tests
//!
//! Each helper writes a miniature copy of a real dataset layout into a fresh
//! temporary directory and returns the dataset directory.
//!
//! ```no_run
//! mod common;
//!
//! let root = tempfile::tempdir().unwrap();
//! let input = common::write_ml100k(root.path());
//! ```

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn dataset_dir(root: &Path, name: &str) -> PathBuf {
    let dir = root.join("raw").join(name);
    fs::create_dir_all(&dir).expect("Failed to create dataset directory");
    dir
}

/// One-hot genre cells with `1` at the given positions
fn genres(selected: &[usize]) -> String {
    (0..19)
        .map(|i| if selected.contains(&i) { "1" } else { "0" })
        .collect::<Vec<_>>()
        .join("|")
}

/// MovieLens 100K: two ratings, three movies (one Latin-1 title, one
/// without a release date), one user
pub fn write_ml100k(root: &Path) -> PathBuf {
    let dir = dataset_dir(root, "ml-100k");

    fs::write(dir.join("u.data"), "196\t242\t3\t881250949\n186\t302\t3\t891717742\n")
        .expect("Failed to write u.data");

    let mut items = Vec::new();
    items.extend_from_slice(
        format!(
            "1|Toy Story (1995)|01-Jan-1995||http://us.imdb.com/M/title-exact?Toy%20Story%20(1995)|{}\n",
            genres(&[3, 4, 5])
        )
        .as_bytes(),
    );
    items.extend_from_slice(b"2|Caf");
    items.push(0xe9);
    items.extend_from_slice(
        format!(" Society (1994)|02-Jan-1995||http://x|{}\n", genres(&[8])).as_bytes(),
    );
    items.extend_from_slice(format!("267|unknown|||http://x|{}\n", genres(&[0])).as_bytes());
    fs::write(dir.join("u.item"), items).expect("Failed to write u.item");

    fs::write(dir.join("u.user"), "1|24|M|technician|85711\n").expect("Failed to write u.user");

    dir
}

/// MovieLens 20M with a metadata side table covering one of three movies
pub fn write_ml20m(root: &Path) -> PathBuf {
    let dir = dataset_dir(root, "ml-20m");

    fs::write(
        dir.join("ratings.csv"),
        "userId,movieId,rating,timestamp\n1,1,4.0,964982703\n1,3,3.5,964981247\n",
    )
    .expect("Failed to write ratings.csv");

    fs::write(
        dir.join("movies.csv"),
        concat!(
            "movieId,title,genres\n",
            "1,Toy Story (1995),Adventure|Animation\n",
            "2,\"Jumanji (1995)\",Adventure\n",
            "3,\"American President, The (1995)\",Comedy|Drama|Romance\n",
        ),
    )
    .expect("Failed to write movies.csv");

    fs::write(
        dir.join("meta.csv"),
        concat!(
            "movieId,tags,date,runtime,description\n",
            "1,\"['pixar', 'toys']\",816480000,81,Toys come alive\n",
        ),
    )
    .expect("Failed to write meta.csv");

    dir
}

/// MovieLens 1M with ratings and users but no movies file
pub fn write_ml1m_without_movies(root: &Path) -> PathBuf {
    let dir = dataset_dir(root, "ml-1m");
    fs::write(dir.join("ratings.dat"), "1::1193::5::978300760\n")
        .expect("Failed to write ratings.dat");
    fs::write(dir.join("users.dat"), "1::F::1::10::48067\n").expect("Failed to write users.dat");
    dir
}

/// MovieLens 1M with all three files; one title is Latin-1 encoded
pub fn write_ml1m(root: &Path) -> PathBuf {
    let dir = write_ml1m_without_movies(root);

    let mut movies = b"1::Toy Story (1995)::Animation|Children's|Comedy\n".to_vec();
    movies.extend_from_slice(b"2::Jumanji (1995)::Adventure|Children's|Fantasy\n");
    movies.extend_from_slice(b"29::Cit");
    movies.push(0xe9);
    movies.extend_from_slice(b" des enfants perdus, La (1995)::Adventure|Sci-Fi\n");
    fs::write(dir.join("movies.dat"), movies).expect("Failed to write movies.dat");

    dir
}

/// MovieLens 10M: `::`-separated ratings and movies, one Latin-1 title and
/// one title without a year
pub fn write_ml10m(root: &Path) -> PathBuf {
    let dir = dataset_dir(root, "ml-10m");

    fs::write(dir.join("ratings.dat"), "1::122::5::838985046\n1::185::5::838983525\n")
        .expect("Failed to write ratings.dat");

    let mut movies = b"122::Boomerang (1992)::Comedy|Romance\n".to_vec();
    movies.extend_from_slice(b"185::Net, The (1995)::Action|Crime|Thriller\n");
    movies.extend_from_slice(b"4::Se");
    movies.push(0xf1);
    movies.extend_from_slice(b"or Tom (1995)::Drama\n");
    movies.extend_from_slice(b"5::Babylon 5::Sci-Fi\n");
    fs::write(dir.join("movies.dat"), movies).expect("Failed to write movies.dat");

    dir
}

/// Amazon Video Games: three review lines (the middle one malformed) and two
/// products
pub fn write_amazon_video_games(root: &Path) -> PathBuf {
    let dir = dataset_dir(root, "Amazon_Video_Games");

    let reviews = concat!(
        "{\"rating\": 5.0, \"title\": \"Great\", \"user_id\": \"AG1\", \"parent_asin\": \"B01N\", \"timestamp\": 1588687728923}\n",
        "{\"rating\": 4.0, \"user_id\": \n",
        "{\"rating\": 2.0, \"user_id\": \"AG2\", \"parent_asin\": \"B02X\", \"timestamp\": 1588687729000}\n",
    );
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(reviews.as_bytes())
        .expect("Failed to compress reviews");
    let compressed = encoder.finish().expect("Failed to finish gzip stream");
    fs::write(dir.join("Video_Games.jsonl.gz"), compressed).expect("Failed to write reviews");

    fs::write(
        dir.join("meta_Video_Games.jsonl"),
        concat!(
            "{\"parent_asin\": \"B01N\", \"title\": \"HDMI Cable\", \"description\": [\"Six feet of cable.\"], ",
            "\"categories\": [\"Video Games\", \"Accessories\", \"Cables\"], \"price\": 7.99, ",
            "\"details\": {\"Date First Available\": \"January 1, 1995\"}}\n",
            "{\"parent_asin\": \"B02X\", \"title\": \"Controller\", \"description\": [], ",
            "\"categories\": [\"Video Games\"], \"price\": null, \"details\": {}}\n",
        ),
    )
    .expect("Failed to write product metadata");

    dir
}

/// Output directory next to the raw data
pub fn output_dir(root: &Path) -> PathBuf {
    root.join("atomic")
}

pub fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.as_ref().display(), e))
}
