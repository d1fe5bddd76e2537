use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn tagnorm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tagnorm").unwrap();
    cmd.env_remove("TAGNORM_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Initialize a vault in `temp` and write the given documents into it.
#[allow(dead_code)]
pub fn init_vault(temp: &TempDir, files: &[(&str, &str)]) {
    tagnorm_cmd().arg("init").arg(temp.path()).assert().success();
    for (name, content) in files {
        let path = temp.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

#[allow(dead_code)]
pub fn read(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join(name)).unwrap()
}
