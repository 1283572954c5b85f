//! Per-file emission decision and artifact naming.

use crate::config::GeneratorConfig;
use crate::descriptor::ProtoFile;

/// Suffix inserted before the output extension.
const ARTIFACT_SUFFIX: &str = ".xstate";

/// Why a file produced no artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file declares no messages of its own.
    NoMessages,
    /// The file declares no services.
    NoServices,
}

/// Outcome of the emission gate for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitDecision {
    /// Generate the file under this artifact name.
    Emit {
        /// Output path, e.g. `shop/order.xstate.ts`.
        artifact: String,
    },
    /// Produce nothing.
    Skip(SkipReason),
}

/// Decide whether `file` gets an artifact.
///
/// A file needs at least one service. It also needs at least one locally
/// declared message unless `skip_messageless` is turned off.
pub fn decide(file: &ProtoFile, config: &GeneratorConfig) -> EmitDecision {
    if config.skip_messageless && file.messages.is_empty() {
        return EmitDecision::Skip(SkipReason::NoMessages);
    }
    if file.services.is_empty() {
        return EmitDecision::Skip(SkipReason::NoServices);
    }
    EmitDecision::Emit {
        artifact: artifact_name(&file.name, &config.extension),
    }
}

/// Replace the extension of a proto path with `.xstate.<ext>`.
pub fn artifact_name(proto_path: &str, extension: &str) -> String {
    format!("{}{ARTIFACT_SUFFIX}.{extension}", strip_extension(proto_path))
}

/// Module specifier of the file's generated base module, relative to the
/// artifact: the file stem plus the configured suffix.
pub fn base_module(proto_path: &str, import_suffix: &str) -> String {
    let stem = strip_extension(proto_path);
    let stem = stem.rsplit('/').next().unwrap_or(stem);
    format!("./{stem}{import_suffix}")
}

fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..file_start + dot],
        _ => path,
    }
}
