//! protoc plugin protocol.
//!
//! protoc writes a `CodeGeneratorRequest` to the plugin's stdin and expects a
//! `CodeGeneratorResponse` on stdout. Problems with the request contents are
//! reported through the response's `error` field; only transport failures
//! make the plugin exit with an error.

use std::collections::HashMap;
use std::io::{Read, Write};

use prost::Message;
use prost_types::FileDescriptorProto;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse, code_generator_response};
use tracing::{debug, info, warn};
use xstate_gen_core::{Artifact, Generator, GeneratorConfig, ProtoFile};

use crate::error::PluginError;

/// Features advertised to protoc.
const SUPPORTED_FEATURES: u64 = code_generator_response::Feature::Proto3Optional as u64;

/// Serve one request: stdin to stdout.
pub fn run_stdio() -> Result<(), PluginError> {
    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;

    let output = handle_request_bytes(&input)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}

/// Decode a serialized request, process it and return the encoded response.
pub fn handle_request_bytes(input: &[u8]) -> Result<Vec<u8>, PluginError> {
    let request = CodeGeneratorRequest::decode(input).map_err(|source| PluginError::Decode {
        what: "CodeGeneratorRequest",
        source,
    })?;
    Ok(process_request(&request).encode_to_vec())
}

/// Build the response for a request. Never fails: errors end up in the
/// response's `error` field with no files attached.
pub fn process_request(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    info!(
        targets = request.file_to_generate.len(),
        descriptors = request.proto_file.len(),
        parameter = request.parameter.as_deref().unwrap_or_default(),
        "Processing code generation request."
    );

    match generate_response_files(request) {
        Ok(file) => CodeGeneratorResponse {
            supported_features: Some(SUPPORTED_FEATURES),
            file,
            ..Default::default()
        },
        Err(err) => {
            warn!("Code generation failed: {err}");
            CodeGeneratorResponse {
                error: Some(err.to_string()),
                supported_features: Some(SUPPORTED_FEATURES),
                ..Default::default()
            }
        }
    }
}

fn generate_response_files(
    request: &CodeGeneratorRequest,
) -> Result<Vec<code_generator_response::File>, PluginError> {
    let config = GeneratorConfig::from_parameter(request.parameter.as_deref())?;
    let generator = Generator::new(config)?;

    let artifacts = generate_artifacts(&generator, &request.proto_file, &request.file_to_generate)?;

    Ok(artifacts
        .into_iter()
        .map(|artifact| code_generator_response::File {
            name: Some(artifact.name),
            content: Some(artifact.content),
            ..Default::default()
        })
        .collect())
}

/// Generate every target file, in target order.
///
/// `proto_files` holds the descriptors of all targets and their
/// dependencies. A target without a descriptor fails the whole batch.
pub fn generate_artifacts(
    generator: &Generator,
    proto_files: &[FileDescriptorProto],
    targets: &[String],
) -> Result<Vec<Artifact>, PluginError> {
    let by_name: HashMap<&str, &FileDescriptorProto> = proto_files
        .iter()
        .map(|file| (file.name(), file))
        .collect();

    let mut artifacts = Vec::new();
    for target in targets {
        let descriptor = by_name
            .get(target.as_str())
            .ok_or_else(|| PluginError::MissingFile(target.clone()))?;
        let file = ProtoFile::from(*descriptor);
        if let Some(artifact) = generator.generate(&file)? {
            artifacts.push(artifact);
        }
    }

    debug!(
        targets = targets.len(),
        artifacts = artifacts.len(),
        "Finished generating targets."
    );
    Ok(artifacts)
}
