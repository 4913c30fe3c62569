use std::{fs, path::PathBuf};

fn test_temp_dir_path() -> PathBuf {
    let tmpdir = std::env::temp_dir();

    let make_file_path = |val| {
        let fname = format!("lotbook-test-{}-{}", std::process::id(), val);
        tmpdir.join(fname)
    };

    for val in 1..1000000 {
        let path = make_file_path(val);
        if !path.exists() {
            return path;
        }
    }
    panic!("Could not create temp directory path that does not already exist");
}

/// A scratch directory which is created on construction, and removed
/// (along with its contents) when dropped.
pub struct TestDir {
    pub path: PathBuf
}

impl TestDir {
    pub fn new() -> TestDir {
        let path = test_temp_dir_path();
        fs::create_dir_all(&path).unwrap();
        TestDir{path}
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

fn cleanup_test_dir(path: &PathBuf) {
    if path.exists() {
        let skip_env_var = "SKIP_TEMP_DIR_CLEANUP_ON_FAIL";
        let skip_del_on_fail = lotbook::util::sys::env_var_non_empty(skip_env_var);

        if std::thread::panicking() && skip_del_on_fail {
            println!("cleanup_test_dir: panicking. Skipping remove of {}",
                     path.display());
        } else {
            let _ = fs::remove_dir_all(path);
        }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        cleanup_test_dir(&self.path);
    }
}
