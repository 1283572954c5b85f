//! Proto to XState TypeScript code generator.
//!
//! For every proto file that declares services, this crate generates a
//! `<base>.xstate.ts` module with:
//! - Event interfaces, one per RPC method, tagged with a literal `type`
//! - Per-service and top-level discriminated unions of those events
//! - Dispatch tables forwarding events to a gRPC-web service client
//!
//! The crate is pure: it reads an in-memory descriptor tree and returns text.
//! Talking to protoc is left to the plugin binary.

#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

pub mod config;
pub mod descriptor;
mod emitter;
pub mod error;
pub mod ir;

pub use config::GeneratorConfig;
pub use descriptor::ProtoFile;
pub use emitter::{Artifact, Generator};
pub use error::{Error, Result};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use prost_types::{
        DescriptorProto, FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto,
    };
    use similar::TextDiff;

    fn message(name: &str) -> DescriptorProto {
        DescriptorProto {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn method(name: &str, input: &str, output: &str, streaming: bool) -> MethodDescriptorProto {
        MethodDescriptorProto {
            name: Some(name.into()),
            input_type: Some(input.into()),
            output_type: Some(output.into()),
            server_streaming: Some(streaming),
            ..Default::default()
        }
    }

    fn service(name: &str, methods: Vec<MethodDescriptorProto>) -> ServiceDescriptorProto {
        ServiceDescriptorProto {
            name: Some(name.into()),
            method: methods,
            ..Default::default()
        }
    }

    fn file(
        name: &str,
        package: &str,
        messages: &[&str],
        services: Vec<ServiceDescriptorProto>,
    ) -> ProtoFile {
        ProtoFile::from(&FileDescriptorProto {
            name: Some(name.into()),
            package: Some(package.into()),
            message_type: messages.iter().map(|m| message(m)).collect(),
            service: services,
            ..Default::default()
        })
    }

    fn order_file() -> ProtoFile {
        file(
            "shop/order.proto",
            "shop",
            &[
                "CreateOrderRequest",
                "CreateOrderResponse",
                "TrackRequest",
                "TrackResponse",
            ],
            vec![service(
                "OrderService",
                vec![
                    method(
                        "Create",
                        ".shop.CreateOrderRequest",
                        ".shop.CreateOrderResponse",
                        false,
                    ),
                    method("Track", ".shop.TrackRequest", ".shop.TrackResponse", true),
                ],
            )],
        )
    }

    fn two_service_file() -> ProtoFile {
        file(
            "catalog.proto",
            "catalog",
            &["Query", "Result"],
            vec![
                service(
                    "ServiceA",
                    vec![method("Find", ".catalog.Query", ".catalog.Result", false)],
                ),
                service(
                    "ServiceB",
                    vec![method("Count", ".catalog.Query", ".catalog.Result", false)],
                ),
            ],
        )
    }

    fn generate(file: &ProtoFile) -> Option<Artifact> {
        Generator::new(GeneratorConfig::default())
            .unwrap()
            .generate(file)
            .unwrap()
    }

    fn assert_text_eq(actual: &str, expected: &str) {
        if actual != expected {
            let diff = TextDiff::from_lines(expected, actual)
                .unified_diff()
                .header("expected", "actual")
                .to_string();
            panic!("generated output differs:\n{diff}");
        }
    }

    // Layout pinned to the established output byte for byte: two leading
    // blank lines, event interfaces back to back, trailing blank line.
    const ORDER_XSTATE_TS: &str = r#"

import { grpc } from "@improbable-eng/grpc-web"
import { Observable } from "rxjs"
import {
  OrderService,
  CreateOrderRequest,
  CreateOrderResponse,
  TrackRequest,
  TrackResponse,
} from "./order"

export interface EventOrderServiceCreate {
    type: "shop.OrderService.Create",
    data: CreateOrderRequest,
    metadata?: grpc.Metadata,
}
export interface EventOrderServiceTrack {
    type: "shop.OrderService.Track",
    data: TrackRequest,
    metadata?: grpc.Metadata,
}

export type EventOrderService =
  | EventOrderServiceCreate
  | EventOrderServiceTrack

export type Event = OrderService

export interface OrderServiceStateChartContext {
  service: OrderService
}

export const OrderServiceStateChartServices = {
  Create: <TContext>(
    ctx: TContext & OrderServiceStateChartContext,
    ev: EventOrderServiceCreate,
  ): Promise<CreateOrderResponse> => {
    return ctx.service.Create(ev.data, ev.metadata)
  },
  Track: <TContext>(
    ctx: TContext & OrderServiceStateChartContext,
    ev: EventOrderServiceTrack,
  ): Observable<TrackResponse> => {
    return ctx.service.Track(ev.data, ev.metadata)
  },
}

"#;

    // A second service name continues the previous import line.
    const CATALOG_XSTATE_TS: &str = r#"

import { grpc } from "@improbable-eng/grpc-web"
import {
  ServiceA,
  Query,
  Result,ServiceB,
  Query,
  Result,
} from "./catalog"

export interface EventServiceAFind {
    type: "catalog.ServiceA.Find",
    data: Query,
    metadata?: grpc.Metadata,
}
export interface EventServiceBCount {
    type: "catalog.ServiceB.Count",
    data: Query,
    metadata?: grpc.Metadata,
}

export type EventServiceA =
  | EventServiceAFind

export type EventServiceB =
  | EventServiceBCount

export type Event = ServiceA | ServiceB

export interface ServiceAStateChartContext {
  service: ServiceA
}

export const ServiceAStateChartServices = {
  Find: <TContext>(
    ctx: TContext & ServiceAStateChartContext,
    ev: EventServiceAFind,
  ): Promise<Result> => {
    return ctx.service.Find(ev.data, ev.metadata)
  },
}

export interface ServiceBStateChartContext {
  service: ServiceB
}

export const ServiceBStateChartServices = {
  Count: <TContext>(
    ctx: TContext & ServiceBStateChartContext,
    ev: EventServiceBCount,
  ): Promise<Result> => {
    return ctx.service.Count(ev.data, ev.metadata)
  },
}

"#;

    #[test]
    fn test_order_service_full_output() {
        let artifact = generate(&order_file()).expect("order.proto should be generated");
        assert_eq!(artifact.name, "shop/order.xstate.ts");
        assert_text_eq(&artifact.content, ORDER_XSTATE_TS);
    }

    #[test]
    fn test_two_service_full_output() {
        let artifact = generate(&two_service_file()).unwrap();
        assert_eq!(artifact.name, "catalog.xstate.ts");
        assert_text_eq(&artifact.content, CATALOG_XSTATE_TS);
    }

    #[test]
    fn test_file_without_services_is_skipped() {
        let no_services = file("types.proto", "shop", &["Money", "Address"], Vec::new());
        assert!(generate(&no_services).is_none());

        let empty = file("empty.proto", "shop", &[], Vec::new());
        assert!(generate(&empty).is_none());
    }

    #[test]
    fn test_file_with_only_imported_records_is_skipped_by_default() {
        let imported = file(
            "api.proto",
            "shop",
            &[],
            vec![service(
                "Api",
                vec![method("Get", ".common.Req", ".common.Resp", false)],
            )],
        );
        assert!(generate(&imported).is_none());

        let config = GeneratorConfig {
            skip_messageless: false,
            ..GeneratorConfig::default()
        };
        let artifact = Generator::new(config)
            .unwrap()
            .generate(&imported)
            .unwrap()
            .expect("skip_messageless=false should generate");
        assert_eq!(artifact.name, "api.xstate.ts");
        assert!(artifact.content.contains("  Req,\n  Resp,\n"));
    }

    #[test]
    fn test_two_services_without_streaming() {
        let artifact = generate(&two_service_file()).unwrap();
        let content = &artifact.content;

        assert!(content.contains("\nexport type Event = ServiceA | ServiceB\n"));
        assert!(!content.contains("rxjs"), "streaming import should be absent");
        assert!(!content.contains("Observable"));
        assert_eq!(content.matches("): Promise<Result> => {").count(), 2);
    }

    #[test]
    fn test_top_union_lists_each_service_once_without_trailing_separator() {
        let artifact = generate(&two_service_file()).unwrap();
        let line = artifact
            .content
            .lines()
            .find(|l| l.starts_with("export type Event ="))
            .unwrap();
        assert_eq!(line.matches("ServiceA").count(), 1);
        assert_eq!(line.matches("ServiceB").count(), 1);
        assert!(!line.trim_end().ends_with('|'));
        assert!(artifact.content.lines().all(|l| !l.ends_with(" | ")));
    }

    #[test]
    fn test_streaming_import_present_iff_any_method_streams() {
        let streaming = generate(&order_file()).unwrap();
        assert_eq!(
            streaming
                .content
                .matches("import { Observable } from \"rxjs\"")
                .count(),
            1
        );

        let unary = generate(&two_service_file()).unwrap();
        assert!(!unary.content.contains("import { Observable }"));
    }

    #[test]
    fn test_service_union_member_count_matches_methods() {
        let artifact = generate(&order_file()).unwrap();
        let union_members = artifact
            .content
            .lines()
            .skip_while(|l| *l != "export type EventOrderService =")
            .skip(1)
            .take_while(|l| l.starts_with("  | "))
            .count();
        assert_eq!(union_members, 2);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = Generator::new(GeneratorConfig::default()).unwrap();
        let file = order_file();
        let first = generator.generate(&file).unwrap();
        let second = generator.generate(&file).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_import_suffix_and_extension() {
        let config = GeneratorConfig::from_parameter(Some("import_suffix=_pb,ext=mts")).unwrap();
        let artifact = Generator::new(config)
            .unwrap()
            .generate(&order_file())
            .unwrap()
            .unwrap();
        assert_eq!(artifact.name, "shop/order.xstate.mts");
        assert!(artifact.content.contains("} from \"./order_pb\"\n"));
    }

    #[test]
    fn test_empty_package_discriminant() {
        let f = file(
            "ping.proto",
            "",
            &["Ping"],
            vec![service("Health", vec![method("Check", ".Ping", ".Ping", false)])],
        );
        let artifact = generate(&f).unwrap();
        assert!(artifact.content.contains("    type: \"Health.Check\",\n"));
    }
}
