//! `protoc-gen-xstate` binary.
//!
//! Without arguments it behaves as a protoc plugin:
//! `protoc --xstate_out=gen --xstate_opt=import_suffix=_pb shop/order.proto`.

use std::path::PathBuf;

use clap::Parser;
use protoc_gen_xstate::{handshake, logging, offline};

#[derive(Parser)]
#[command(
    name = "protoc-gen-xstate",
    version,
    about = "Generate XState event and service scaffolding from proto services"
)]
struct Cli {
    /// Read a FileDescriptorSet instead of a plugin request on stdin
    #[arg(long, value_name = "FILE")]
    descriptor_set: Option<PathBuf>,

    /// Proto file to generate (repeatable); defaults to every file in the set
    #[arg(long = "file", value_name = "NAME", requires = "descriptor_set")]
    files: Vec<String>,

    /// Plugin parameter string, e.g. `import_suffix=_pb,dedupe_imports`
    #[arg(long, value_name = "PARAMS", requires = "descriptor_set")]
    parameter: Option<String>,

    /// Write artifacts under this directory instead of stdout
    #[arg(long, value_name = "DIR", requires = "descriptor_set")]
    out_dir: Option<PathBuf>,
}

fn main() {
    logging::init_tracing();

    let cli = Cli::parse();

    let result = match cli.descriptor_set {
        Some(descriptor_set) => offline::run(&offline::OfflineOptions {
            descriptor_set,
            files: cli.files,
            parameter: cli.parameter,
            out_dir: cli.out_dir,
        })
        .map(|_| ()),
        None => handshake::run_stdio(),
    };

    if let Err(e) = result {
        eprintln!("protoc-gen-xstate: {e}");
        std::process::exit(1);
    }
}
