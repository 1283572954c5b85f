//! Offline generation from a serialized `FileDescriptorSet`.
//!
//! Runs the same request pipeline as plugin mode against the output of
//! `protoc --descriptor_set_out`, without protoc driving the plugin.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use prost::Message;
use prost_types::FileDescriptorSet;
use prost_types::compiler::{CodeGeneratorRequest, code_generator_response};
use tracing::{debug, info};

use crate::error::PluginError;
use crate::handshake::process_request;

/// Inputs for an offline run.
#[derive(Debug, Clone, Default)]
pub struct OfflineOptions {
    /// Serialized `FileDescriptorSet`.
    pub descriptor_set: PathBuf,
    /// Files to generate; empty means every file in the set.
    pub files: Vec<String>,
    /// Plugin parameter string, as passed with `--xstate_opt`.
    pub parameter: Option<String>,
    /// Directory to write artifacts into; stdout when unset.
    pub out_dir: Option<PathBuf>,
}

/// Generate artifacts for the options and write them out.
///
/// Returns the names of the generated artifacts.
pub fn run(options: &OfflineOptions) -> Result<Vec<String>, PluginError> {
    let bytes = fs::read(&options.descriptor_set).map_err(|source| PluginError::File {
        action: "read",
        path: options.descriptor_set.clone(),
        source,
    })?;
    let set = FileDescriptorSet::decode(bytes.as_slice()).map_err(|source| {
        PluginError::Decode {
            what: "FileDescriptorSet",
            source,
        }
    })?;

    let file_to_generate = if options.files.is_empty() {
        set.file.iter().map(|file| file.name().to_string()).collect()
    } else {
        options.files.clone()
    };
    debug!(
        descriptor_set = %options.descriptor_set.display(),
        targets = file_to_generate.len(),
        "Loaded descriptor set."
    );

    let request = CodeGeneratorRequest {
        file_to_generate,
        parameter: options.parameter.clone(),
        proto_file: set.file,
        ..Default::default()
    };
    let response = process_request(&request);
    if let Some(error) = response.error {
        return Err(PluginError::Rejected(error));
    }

    match &options.out_dir {
        Some(out_dir) => write_to_dir(out_dir, &response.file)?,
        None => write_to_stdout(&response.file)?,
    }

    Ok(response.file.iter().map(|file| file.name().to_string()).collect())
}

/// Whether `name` stays under the directory it is joined to: non-empty and
/// made of plain components only (no root, prefix, `.` or `..`).
fn is_contained(name: &str) -> bool {
    let path = Path::new(name);
    path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

fn write_to_dir(out_dir: &Path, files: &[code_generator_response::File]) -> Result<(), PluginError> {
    // Checked up front so a bad name leaves the directory untouched.
    if let Some(file) = files.iter().find(|file| !is_contained(file.name())) {
        return Err(PluginError::UnsafePath(file.name().to_string()));
    }

    for file in files {
        let path = out_dir.join(file.name());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PluginError::File {
                action: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, file.content()).map_err(|source| PluginError::File {
            action: "write",
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "Wrote XState module.");
    }
    Ok(())
}

fn write_to_stdout(files: &[code_generator_response::File]) -> Result<(), PluginError> {
    let mut stdout = std::io::stdout().lock();
    for file in files {
        writeln!(stdout, "// {}", file.name())?;
        stdout.write_all(file.content().as_bytes())?;
    }
    stdout.flush()?;
    Ok(())
}
