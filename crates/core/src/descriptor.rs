//! Read-only view over protobuf file descriptors.
//!
//! The generator never looks at raw `prost_types` descriptors past this point.
//! A `FileDescriptorProto` is adapted once into a [`ProtoFile`] tree whose
//! nodes expose exactly what code generation needs: names, declaration order,
//! record references and streaming flags.

use prost_types::{FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};

/// A `.proto` file: package, top-level messages and services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoFile {
    /// Path of the file as known to protoc, e.g. `shop/order.proto`.
    pub name: String,
    /// Protobuf package, empty when the file declares none.
    pub package: String,
    /// Messages declared at the top level of this file, in declaration order.
    pub messages: Vec<ProtoMessage>,
    /// Services in declaration order.
    pub services: Vec<ProtoService>,
}

/// A message declared in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoMessage {
    /// Short message name.
    pub name: String,
}

/// A service and its methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoService {
    /// Service name as declared.
    pub name: String,
    /// Methods in declaration order.
    pub methods: Vec<ProtoMethod>,
}

/// A single RPC method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoMethod {
    /// Method name as declared.
    pub name: String,
    /// Name of the owning service.
    pub service: String,
    /// Request record.
    pub input: RecordRef,
    /// Response record.
    pub output: RecordRef,
    /// Whether the server answers with a stream of responses.
    pub server_streaming: bool,
}

/// Reference to a message type used as a method input or output.
///
/// Records may live in another file; only the name is carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    /// Short name: the last segment of the qualified name.
    pub name: String,
}

impl RecordRef {
    /// Build a reference from a protoc type name such as `.shop.Outer.Inner`.
    pub fn from_type_name(type_name: &str) -> Self {
        let name = type_name.rsplit('.').next().unwrap_or(type_name);
        Self {
            name: name.to_string(),
        }
    }
}

/// Any node of the descriptor tree.
///
/// Used where one operation accepts several node kinds and behaves
/// differently per kind.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// A whole file.
    File(&'a ProtoFile),
    /// A single service.
    Service(&'a ProtoService),
    /// A single method.
    Method(&'a ProtoMethod),
    /// A message declaration.
    Message(&'a ProtoMessage),
}

impl From<&FileDescriptorProto> for ProtoFile {
    fn from(file: &FileDescriptorProto) -> Self {
        Self {
            name: file.name().to_string(),
            package: file.package().to_string(),
            messages: file
                .message_type
                .iter()
                .map(|message| ProtoMessage {
                    name: message.name().to_string(),
                })
                .collect(),
            services: file.service.iter().map(ProtoService::from).collect(),
        }
    }
}

impl From<&ServiceDescriptorProto> for ProtoService {
    fn from(service: &ServiceDescriptorProto) -> Self {
        let name = service.name().to_string();
        let methods = service
            .method
            .iter()
            .map(|method| ProtoMethod::new(&name, method))
            .collect();
        Self { name, methods }
    }
}

impl ProtoMethod {
    fn new(service: &str, method: &MethodDescriptorProto) -> Self {
        Self {
            name: method.name().to_string(),
            service: service.to_string(),
            input: RecordRef::from_type_name(method.input_type()),
            output: RecordRef::from_type_name(method.output_type()),
            server_streaming: method.server_streaming(),
        }
    }
}
