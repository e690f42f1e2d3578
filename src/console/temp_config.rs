//! Ephemeral session configuration
//!
//! A console session bound to a director that has no persistent console
//! configuration gets a throwaway file rendered from the connection
//! details. The file lives exactly as long as the guard that owns it.

use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tempfile::TempPath;

use crate::bconsole::BConsole;
use crate::config::DriverConfig;
use crate::error::{Error, Result};
use crate::models::ConnectionSpec;

use super::process::ConsoleLauncher;

/// Banner written at the top of every generated file
pub const GENERATED_BANNER: &str = "\
# generated by almir, you should never edit this file. Do:
# vim buildout.cfg
# bin/buildout
# bin/supervisorctl restart all
";

/// Render the console configuration for `spec`
pub fn render_session_config(spec: &ConnectionSpec) -> String {
    format!(
        "{}\nDirector {{\n    Name = {}\n    DIRport = {}\n    address = {}\n    Password = \"{}\"\n}}\n",
        GENERATED_BANNER,
        spec.name(),
        spec.port(),
        spec.address(),
        escape_password(spec.password())
    )
}

fn escape_password(password: &str) -> String {
    let mut escaped = String::with_capacity(password.len());
    for c in password.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A rendered configuration file, deleted when dropped
#[derive(Debug)]
pub struct SessionArtifact {
    path: Option<TempPath>,
}

impl SessionArtifact {
    /// Write the configuration for `spec` to a fresh file in `dir`
    ///
    /// The file is created with owner-only permissions.
    pub fn create(spec: &ConnectionSpec, dir: &Path) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("bconsole-")
            .suffix(".conf")
            .tempfile_in(dir)
            .map_err(|e| Error::ArtifactCreateFailed {
                reason: format!("{}: {}", dir.display(), e),
            })?;

        file.write_all(render_session_config(spec).as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| Error::ArtifactCreateFailed {
                reason: e.to_string(),
            })?;

        let path = file.into_temp_path();
        debug!("Created session config {}", path.display());
        Ok(Self { path: Some(path) })
    }

    /// Location of the file; empty once closed
    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Delete the file now and report the outcome
    pub fn close(mut self) -> Result<()> {
        match self.path.take() {
            Some(path) => {
                let shown = path.display().to_string();
                path.close()?;
                debug!("Removed session config {}", shown);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for SessionArtifact {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => debug!("Removed session config {}", shown),
                Err(e) => warn!("Failed to remove session config {}: {}", shown, e),
            }
        }
    }
}

/// A console bound to a generated configuration
///
/// Dereferences to [`BConsole`]. The file is removed when this guard is
/// dropped or closed.
pub struct TempConfigSession {
    // dropped before the artifact it points at
    console: BConsole<ConsoleLauncher>,
    artifact: SessionArtifact,
}

impl TempConfigSession {
    pub fn new(spec: &ConnectionSpec, config: DriverConfig) -> Result<Self> {
        let dir = config.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
        let artifact = SessionArtifact::create(spec, &dir)?;
        let launcher = ConsoleLauncher::with_config_file(&config, artifact.path());
        info!(
            "Opened temporary console session for director {} at {}:{}",
            spec.name(),
            spec.address(),
            spec.port()
        );
        Ok(Self {
            console: BConsole::with_launcher(config, launcher),
            artifact,
        })
    }

    /// Path of the generated configuration
    pub fn config_path(&self) -> PathBuf {
        self.artifact.path().to_path_buf()
    }

    /// Remove the generated configuration now
    pub fn close(self) -> Result<()> {
        let Self { console, artifact } = self;
        drop(console);
        artifact.close()
    }
}

impl Deref for TempConfigSession {
    type Target = BConsole<ConsoleLauncher>;

    fn deref(&self) -> &Self::Target {
        &self.console
    }
}

impl DerefMut for TempConfigSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.console
    }
}
