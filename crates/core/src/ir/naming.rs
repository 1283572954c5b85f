//! Identifier derivation for generated TypeScript.
//!
//! Every function here is a pure projection of descriptor nodes; calling one
//! twice with the same input yields the same name.

use crate::descriptor::{Node, ProtoFile, ProtoMethod, ProtoService};

/// Name of the union covering every service of a file.
pub const TOP_UNION_NAME: &str = "Event";

const EVENT_PREFIX: &str = "Event";

/// Event interface name for a method: `Event<Service><Method>`.
pub fn event_type(method: &ProtoMethod) -> String {
    format!("{EVENT_PREFIX}{}{}", method.service, method.name)
}

/// Event interface names under a node, in declaration order.
///
/// A file flattens all of its services; a service yields its own methods.
/// Other node kinds carry no events.
pub fn event_types(node: Node<'_>) -> Vec<String> {
    match node {
        Node::File(file) => file
            .services
            .iter()
            .flat_map(|service| &service.methods)
            .map(event_type)
            .collect(),
        Node::Service(service) => service.methods.iter().map(event_type).collect(),
        Node::Method(_) | Node::Message(_) => Vec::new(),
    }
}

/// Per-service event union name: `Event<Service>`.
pub fn service_union_name(service: &ProtoService) -> String {
    format!("{EVENT_PREFIX}{}", service.name)
}

/// Literal tag carried by an event: `<package>.<Service>.<Method>`.
///
/// Files without a package produce `<Service>.<Method>`.
pub fn discriminant(package: &str, method: &ProtoMethod) -> String {
    if package.is_empty() {
        format!("{}.{}", method.service, method.name)
    } else {
        format!("{package}.{}.{}", method.service, method.name)
    }
}

/// Request record name, as declared.
pub fn request_type(method: &ProtoMethod) -> &str {
    &method.input.name
}

/// Response record name, as declared.
pub fn response_type(method: &ProtoMethod) -> &str {
    &method.output.name
}

/// Whether any method of the file streams responses from the server.
pub fn has_stream(file: &ProtoFile) -> bool {
    file.services
        .iter()
        .flat_map(|service| &service.methods)
        .any(|method| method.server_streaming)
}

/// Context interface naming the service handle: `<Service>StateChartContext`.
pub fn context_interface_name(service: &ProtoService) -> String {
    format!("{}StateChartContext", service.name)
}

/// Dispatch table constant: `<Service>StateChartServices`.
pub fn dispatch_table_name(service: &ProtoService) -> String {
    format!("{}StateChartServices", service.name)
}
