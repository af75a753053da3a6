use std::fs;
use std::path::PathBuf;

pub fn read_json_file(path: &str) -> String {
    let mut file = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    file.push("tests");
    file.push(path);
    fs::read_to_string(&file).unwrap_or_else(|err| panic!("cannot read {:?}: {}", file, err))
}
