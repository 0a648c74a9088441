use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub fn new_command_with_temp_home() -> (Command, tempfile::TempDir) {
    let temp_home = tempfile::tempdir().expect("temp home");
    let binary = assert_cmd::cargo::cargo_bin!("zikr");
    let mut command = Command::new(binary);
    command.env("HOME", temp_home.path());
    command.env("XDG_CONFIG_HOME", temp_home.path().join(".config"));
    (command, temp_home)
}

pub fn store_dir(home: &Path) -> PathBuf {
    home.join(".config").join("zikr").join("store")
}

pub fn write_store_entry(home: &Path, key: &str, value: &serde_json::Value) {
    let dir = store_dir(home);
    fs::create_dir_all(&dir).expect("create store dir");
    fs::write(
        dir.join(format!("{key}.json")),
        serde_json::to_string_pretty(value).expect("serialize store entry"),
    )
    .expect("write store entry");
}

pub fn read_store_entry(home: &Path, key: &str) -> serde_json::Value {
    let raw = fs::read_to_string(store_dir(home).join(format!("{key}.json")))
        .expect("read store entry");
    serde_json::from_str(&raw).expect("parse store entry")
}
