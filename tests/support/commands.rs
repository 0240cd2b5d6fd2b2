//! Command helper methods for Test.

use super::{Test, TEST_KEY};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a hutch command with the test key and project directory.
    ///
    /// Inherited `HUTCH_*` variables are cleared so the host environment
    /// cannot leak into a test.
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.env("HUTCH_SECRET_KEY", TEST_KEY);
        cmd
    }

    /// Create a hutch command with no secret key configured.
    pub fn bare_cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("hutch").expect("failed to find hutch binary");
        cmd.env_remove("HUTCH_SECRET_KEY")
            .env_remove("HUTCH_ACCOUNTS")
            .env_remove("HUTCH_ENV_FILE")
            .env_remove("HUTCH_LOG")
            .env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `hutch add`, piping the password.
    pub fn add(&self, platform: &str, username: &str, password: &str) -> Output {
        self.cmd()
            .args(["add", platform, username])
            .write_stdin(format!("{}\n", password))
            .output()
            .expect("failed to run hutch add")
    }

    /// Shortcut for `hutch add` with `--field` pairs.
    pub fn add_with_fields(
        &self,
        platform: &str,
        username: &str,
        password: &str,
        fields: &[&str],
    ) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["add", platform, username]);
        for field in fields {
            cmd.args(["--field", field]);
        }
        cmd.write_stdin(format!("{}\n", password))
            .output()
            .expect("failed to run hutch add")
    }

    /// Shortcut for `hutch use`.
    pub fn use_account(&self, platform: &str, number: usize) -> Output {
        self.cmd()
            .args(["use", platform, &number.to_string()])
            .output()
            .expect("failed to run hutch use")
    }

    /// Shortcut for `hutch deactivate`.
    pub fn deactivate(&self, platform: &str) -> Output {
        self.cmd()
            .args(["deactivate", platform])
            .output()
            .expect("failed to run hutch deactivate")
    }

    /// Shortcut for `hutch rm`.
    pub fn rm(&self, platform: &str, number: usize) -> Output {
        self.cmd()
            .args(["rm", platform, &number.to_string()])
            .output()
            .expect("failed to run hutch rm")
    }

    /// Shortcut for `hutch list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .arg("list")
            .output()
            .expect("failed to run hutch list")
    }

    /// Shortcut for `hutch list --json`.
    pub fn list_json(&self) -> Output {
        self.cmd()
            .args(["list", "--json"])
            .output()
            .expect("failed to run hutch list --json")
    }

    /// Shortcut for `hutch export`.
    pub fn export(&self) -> Output {
        self.cmd()
            .arg("export")
            .output()
            .expect("failed to run hutch export")
    }

    /// Shortcut for `hutch rotate`, piping the new key.
    pub fn rotate(&self, new_key: &str) -> Output {
        self.cmd()
            .arg("rotate")
            .write_stdin(format!("{}\n", new_key))
            .output()
            .expect("failed to run hutch rotate")
    }
}
