use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const VALID_CONFIG: &str = r#"
source:
  repository_url: https://example.com/r.git
  branch: main
  build_command: make
  start_command: ./app
  port: 8080
  connection_name: conn-a
instance:
  cpu: 1 vCPU
  memory: 2 GB
auto_scaling:
  max_concurrency: 100
  min_size: 1
  max_size: 3
"#;

const RUNWAY_VARS: [&str; 16] = [
    "RUNWAY_CONFIG_PATH",
    "RUNWAY_REPOSITORY_URL",
    "RUNWAY_BRANCH",
    "RUNWAY_BUILD_COMMAND",
    "RUNWAY_START_COMMAND",
    "RUNWAY_PORT",
    "RUNWAY_CONNECTION_NAME",
    "RUNWAY_CPU",
    "RUNWAY_MEMORY",
    "RUNWAY_MAX_CONCURRENCY",
    "RUNWAY_MIN_SIZE",
    "RUNWAY_MAX_SIZE",
    "RUNWAY_ACCOUNT",
    "RUNWAY_REGION",
    "RUNWAY_STACK_NAME",
    "RUNWAY_OUTPUT",
];

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_config(&self, content: &str) {
        let path = self.root.path().join("runway.yaml");
        fs::write(path, content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// プロジェクトディレクトリで runway を実行するコマンド
    ///
    /// ホストの RUNWAY_* やグローバル設定が混ざらないよう隔離する
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("runway").unwrap();
        cmd.current_dir(self.path());
        for var in RUNWAY_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.path());
        cmd.env("XDG_CONFIG_HOME", self.path().join(".config"));
        cmd
    }
}
