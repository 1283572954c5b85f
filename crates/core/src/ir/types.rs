//! Output model for one generated XState module.
//!
//! These types mirror the sections of the generated file in order and are
//! handed to the template engine as its context:
//! - imports (transport, optional streaming support, file-local types)
//! - one event interface per method
//! - one union per service, then the top-level `Event` union
//! - one context interface and dispatch table per service

use serde::Serialize;

/// Complete model of a generated file.
#[derive(Debug, Clone, Serialize)]
pub struct XStateModule {
    /// Module providing `grpc.Metadata`.
    pub transport_module: &'static str,
    /// Module providing `Observable`.
    pub stream_module: &'static str,
    /// Whether the streaming-support import is emitted.
    pub has_stream: bool,
    /// Service and record names imported from the file's base module.
    pub imports: TsImport,
    /// Event interfaces, grouped by service in declaration order.
    pub events: Vec<EventInterface>,
    /// Per-service event unions.
    pub service_unions: Vec<ServiceUnion>,
    /// Name of the union covering every service.
    pub top_union_name: &'static str,
    /// Members of the top-level union.
    pub top_union: Vec<UnionMember>,
    /// Per-service context interfaces and dispatch tables.
    pub dispatch_tables: Vec<DispatchTable>,
}

/// Named import list: `import { a, b } from "<module>"`.
#[derive(Debug, Clone, Serialize)]
pub struct TsImport {
    /// Imported names, in emission order.
    pub items: Vec<ImportItem>,
    /// Module specifier.
    pub module: String,
}

/// One imported name.
///
/// A service name after the first continues the line of the record before
/// it (`Resp,ServiceB,`); everything else starts its own indented line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportItem {
    /// Imported name.
    pub name: String,
    /// Written on the previous line instead of a new one.
    pub joins_previous: bool,
}

impl ImportItem {
    /// Import `name`, optionally joined to the previous line.
    pub fn new(name: impl Into<String>, joins_previous: bool) -> Self {
        Self {
            name: name.into(),
            joins_previous,
        }
    }
}

/// `export interface <name> { type: "<discriminant>", data: <data_type>, metadata?: grpc.Metadata }`
#[derive(Debug, Clone, Serialize)]
pub struct EventInterface {
    /// Event interface name.
    pub name: String,
    /// Literal value of the `type` field.
    pub discriminant: String,
    /// Type of the `data` field.
    pub data_type: String,
}

/// `export type <name> = | A | B`
#[derive(Debug, Clone, Serialize)]
pub struct ServiceUnion {
    /// Union alias name.
    pub name: String,
    /// Event interface names, in method order.
    pub members: Vec<String>,
}

/// One member of an inline union together with the separator that follows it.
#[derive(Debug, Clone, Serialize)]
pub struct UnionMember {
    /// Member type name.
    pub name: String,
    /// `" | "` for every member but the last, which gets `""`.
    pub separator: &'static str,
}

/// Context interface plus dispatch table for one service.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchTable {
    /// Service type carried by the context.
    pub service: String,
    /// Context interface name.
    pub context: String,
    /// Exported table constant name.
    pub name: String,
    /// One entry per method, in declaration order.
    pub entries: Vec<DispatchEntry>,
}

/// Dispatch table entry forwarding an event to `ctx.service.<method>`.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchEntry {
    /// Method name, used as key and as the forwarded call.
    pub method: String,
    /// Event interface accepted by the handler.
    pub event_type: String,
    /// Result wrapper of the handler.
    pub result: ResultKind,
    /// Response record wrapped by `result`.
    pub response_type: String,
}

/// How a handler hands back its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultKind {
    /// Unary call: `Promise<T>`.
    Promise,
    /// Server-streaming call: `Observable<T>`.
    Observable,
}

impl ResultKind {
    /// Wrapper for a method given its server-streaming flag.
    pub fn for_streaming(server_streaming: bool) -> Self {
        if server_streaming {
            Self::Observable
        } else {
            Self::Promise
        }
    }
}
