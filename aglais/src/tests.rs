//! Tests over whole files in `test-data`.


use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

static GOOD_FILES: &str = "./test-data/good";
static BAD_FILES: &str = "./test-data/bad";

/// Set this to regenerate the expected output of failing files.
const WRITE_RESULTS_VAR: &str = "AGLAIS_WRITE_RESULTS";

/// All the `.io` files in a directory, sorted by name.
fn iter_io_files(path: impl AsRef<Path>) -> impl Iterator<Item = PathBuf> {
    let path = path.as_ref();
    assert!(
        path.exists(),
        "test data is missing. cwd: '{:?}'",
        std::env::current_dir()
    );
    let mut files = path
        .read_dir()
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension() == Some(OsStr::new("io")))
        .collect::<Vec<_>>();
    files.sort();
    files.into_iter()
}
