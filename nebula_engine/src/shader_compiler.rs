/// External shader compiler interface
///
/// Shaders are stored as GLSL source in their resource record and compiled
/// to SPIR-V on demand by an external tool. The call blocks until the tool
/// exits.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::graphics_device::ShaderStage;

/// Compiles a shader source file to bytecode
pub trait ShaderCompiler: Send + Sync {
    /// Compile `source` into `destination` and return the bytecode
    ///
    /// On failure returns `Error::ShaderCompilation` carrying the tool's
    /// diagnostic log, one entry per line.
    fn compile(&self, source: &Path, destination: &Path, stage: ShaderStage) -> Result<Vec<u8>>;
}

/// `glslc` from the Vulkan SDK, run as a subprocess
#[derive(Debug, Clone)]
pub struct GlslcCompiler {
    executable: PathBuf,
}

impl GlslcCompiler {
    /// Use `glslc` from `PATH`
    pub fn new() -> Self {
        Self::with_executable("glslc")
    }

    /// Use the given compiler executable
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into() }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Default for GlslcCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderCompiler for GlslcCompiler {
    fn compile(&self, source: &Path, destination: &Path, stage: ShaderStage) -> Result<Vec<u8>> {
        let output = Command::new(&self.executable)
            .arg(format!("-fshader-stage={}", stage.extension()))
            .arg("--target-env=vulkan1.2")
            .arg("-o")
            .arg(destination)
            .arg(source)
            .output()
            .map_err(|e| Error::ShaderCompilation {
                path: source.to_path_buf(),
                log: vec![format!("failed to run {}: {}", self.executable.display(), e)],
            })?;

        if !output.status.success() {
            return Err(Error::ShaderCompilation {
                path: source.to_path_buf(),
                log: diagnostic_lines(&output.stderr, &output.status.to_string()),
            });
        }

        Ok(std::fs::read(destination)?)
    }
}

/// Split compiler output into non-empty lines
///
/// Falls back to `status` when the tool printed nothing, so the log is
/// never empty.
pub(crate) fn diagnostic_lines(stderr: &[u8], status: &str) -> Vec<String> {
    let log: Vec<String> = String::from_utf8_lossy(stderr)
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if log.is_empty() {
        vec![format!("compiler exited with {}", status)]
    } else {
        log
    }
}

#[cfg(test)]
#[path = "shader_compiler_tests.rs"]
mod tests;
