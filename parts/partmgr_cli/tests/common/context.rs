use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};
use util::test::{build_temp_file, prepare_args};

/// A temporary home, working directory and database, dropped when the test completes.
#[derive(Debug)]
pub struct Context {
    pub temp_dir: TempDir,

    pub db_arg: String,
    pub trace_log_arg: String,
    pub db_path: PathBuf,
    pub test_trace_log_path: PathBuf,
}

impl Context {
    pub fn new() -> Self {
        let temp_dir = tempdir().unwrap();

        let mut db_path = PathBuf::from(temp_dir.path());
        db_path.push("parts");
        let db_arg = format!("--db {}", db_path.to_str().unwrap());

        let (test_trace_log_path, _test_trace_log_file_name) = build_temp_file(&temp_dir, "trace", "log");
        let trace_log_arg = format!("--trace {}", test_trace_log_path.to_str().unwrap());

        Context {
            temp_dir,
            db_arg,
            trace_log_arg,
            db_path,
            test_trace_log_path,
        }
    }

    /// A command isolated from the user's configuration and environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_partmgr_cli"));
        cmd.current_dir(self.temp_dir.path())
            .env("HOME", self.temp_dir.path())
            .env_remove("PARTMGR_DB");
        cmd
    }

    /// Runs the command with the trace log and database arguments before `args`.
    ///
    /// Each of `args` is passed as a single argument, so values may contain spaces.
    pub fn command_with_args(&self, args: Vec<&str>) -> Command {
        let mut cmd = self.command();
        cmd.args(prepare_args(vec![
            self.trace_log_arg.as_str(),
            "-vv",
            self.db_arg.as_str(),
        ]))
        .args(args);
        cmd
    }

    pub fn file(&self, file_name: &str) -> PathBuf {
        self.db_path.join(file_name)
    }
}
