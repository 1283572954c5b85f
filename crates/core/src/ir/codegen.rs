//! Builds the output model of a proto file.
//!
//! Walks services and methods in declaration order and resolves every name
//! through [`naming`](super::naming), producing an [`XStateModule`] ready for
//! rendering.

use std::collections::HashSet;

use crate::config::GeneratorConfig;
use crate::descriptor::{Node, ProtoFile, ProtoService};

use super::gate::base_module;
use super::naming::{
    TOP_UNION_NAME, context_interface_name, discriminant, dispatch_table_name, event_type,
    event_types, has_stream, request_type, response_type, service_union_name,
};
use super::types::{
    DispatchEntry, DispatchTable, EventInterface, ImportItem, ResultKind, ServiceUnion, TsImport,
    UnionMember, XStateModule,
};

/// Module providing the gRPC-web transport types.
pub const TRANSPORT_MODULE: &str = "@improbable-eng/grpc-web";

/// Module providing the streaming result type.
pub const STREAM_MODULE: &str = "rxjs";

const UNION_SEPARATOR: &str = " | ";

/// Generate the output model for one file.
pub fn codegen_module(file: &ProtoFile, config: &GeneratorConfig) -> XStateModule {
    XStateModule {
        transport_module: TRANSPORT_MODULE,
        stream_module: STREAM_MODULE,
        has_stream: has_stream(file),
        imports: codegen_imports(file, config),
        events: codegen_events(file),
        service_unions: file.services.iter().map(codegen_service_union).collect(),
        top_union_name: TOP_UNION_NAME,
        top_union: codegen_top_union(&file.services),
        dispatch_tables: file.services.iter().map(codegen_dispatch_table).collect(),
    }
}

/// File-local import: per service, its name followed by the input and output
/// record of each method.
///
/// Every service name but the first joins the line before it. Repeated
/// record names are kept unless `dedupe_imports` is set.
fn codegen_imports(file: &ProtoFile, config: &GeneratorConfig) -> TsImport {
    let mut items = Vec::new();
    for service in &file.services {
        let joins_previous = !items.is_empty();
        items.push(ImportItem::new(service.name.as_str(), joins_previous));
        for method in &service.methods {
            items.push(ImportItem::new(request_type(method), false));
            items.push(ImportItem::new(response_type(method), false));
        }
    }

    if config.dedupe_imports {
        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(item.name.clone()));
    }

    TsImport {
        items,
        module: base_module(&file.name, &config.import_suffix),
    }
}

fn codegen_events(file: &ProtoFile) -> Vec<EventInterface> {
    file.services
        .iter()
        .flat_map(|service| &service.methods)
        .map(|method| EventInterface {
            name: event_type(method),
            // Deliberately `Svc.Method`, not `.Svc.Method`, when the package is empty.
            discriminant: discriminant(&file.package, method),
            data_type: request_type(method).to_string(),
        })
        .collect()
}

fn codegen_service_union(service: &ProtoService) -> ServiceUnion {
    ServiceUnion {
        name: service_union_name(service),
        members: event_types(Node::Service(service)),
    }
}

/// Top-level union members. Each member carries the separator that follows
/// it; the last one carries none.
fn codegen_top_union(services: &[ProtoService]) -> Vec<UnionMember> {
    let len = services.len();
    services
        .iter()
        .enumerate()
        .map(|(idx, service)| UnionMember {
            name: service.name.clone(),
            separator: if idx + 1 == len { "" } else { UNION_SEPARATOR },
        })
        .collect()
}

fn codegen_dispatch_table(service: &ProtoService) -> DispatchTable {
    DispatchTable {
        service: service.name.clone(),
        context: context_interface_name(service),
        name: dispatch_table_name(service),
        entries: service
            .methods
            .iter()
            .map(|method| DispatchEntry {
                method: method.name.clone(),
                event_type: event_type(method),
                result: ResultKind::for_streaming(method.server_streaming),
                response_type: response_type(method).to_string(),
            })
            .collect(),
    }
}
