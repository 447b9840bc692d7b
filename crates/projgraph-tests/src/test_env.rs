//! Isolated project checkout for end-to-end tests
//!
//! Lays out `<tmp>/android` (the project directory) next to `<tmp>/sdk` (a
//! fake tool SDK) so the default `../build` redirect lands inside the temp
//! directory as `<tmp>/build`.

use anyhow::Result;
use projgraph_lib::application::{AppConfig, Commands, execute_command_with};
use projgraph_lib::graph::{DirectoryMaterializer, FsMaterializer, GraphSettings, ProjectGraph};
use projgraph_lib::primitives::{ColorIntent, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variable the tests point the SDK lookup at; never set
pub const UNSET_SDK_ENV: &str = "PROJGRAPH_TESTS_UNSET_SDK";

pub struct TestEnvironment {
    /// Held for cleanup on drop
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
    pub sdk_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("android");
        let sdk_dir = temp_dir.path().join("sdk");
        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(sdk_dir.join("packages/flutter_tools/gradle"))?;

        Ok(Self {
            temp_dir,
            project_dir,
            sdk_dir,
        })
    }

    /// Write `projgraph.toml`
    pub fn with_tree(self, tree: &str) -> Result<Self> {
        fs::write(self.project_dir.join("projgraph.toml"), tree)?;
        Ok(self)
    }

    /// Write `local.properties` pointing at the fake SDK
    pub fn with_local_sdk(self) -> Result<Self> {
        let content = format!("sdk.path={}\n", self.sdk_dir.display());
        self.with_properties(&content)
    }

    pub fn with_properties(self, content: &str) -> Result<Self> {
        fs::write(self.project_dir.join("local.properties"), content)?;
        Ok(self)
    }

    /// Where the tree's default `../build` resolves to
    pub fn build_root(&self) -> PathBuf {
        self.temp_dir.path().join("build")
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn settings(&self) -> GraphSettings {
        GraphSettings {
            sdk_env_var: UNSET_SDK_ENV.to_string(),
            ..GraphSettings::new(&self.project_dir)
        }
    }

    pub fn load_graph(&self) -> Result<ProjectGraph> {
        Ok(ProjectGraph::load(&self.settings())?)
    }

    pub fn config(&self, output: OutputFormat) -> AppConfig {
        AppConfig {
            workdir: Some(self.project_dir.clone()),
            sdk_env: UNSET_SDK_ENV.to_string(),
            color: ColorIntent::Never,
            output,
            ..AppConfig::default()
        }
    }

    /// Run a command against the real filesystem and capture stdout
    pub fn run(&self, command: Commands, output: OutputFormat) -> Result<String> {
        self.run_with(command, output, &FsMaterializer)
    }

    pub fn run_with(
        &self,
        command: Commands,
        output: OutputFormat,
        fs: &dyn DirectoryMaterializer,
    ) -> Result<String> {
        let mut out = Vec::new();
        execute_command_with(command, &self.config(output), fs, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    /// Run a command with JSON output and parse the result
    pub fn run_json(&self, command: Commands) -> Result<serde_json::Value> {
        let output = self.run(command, OutputFormat::Json)?;
        Ok(serde_json::from_str(&output)?)
    }
}
