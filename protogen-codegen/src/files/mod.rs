//! Files written by the generator.

mod proto_generator;

pub use proto_generator::ProtoGeneratorFile;

/// First line of every generated file; matches Go's generated-code convention.
pub const GENERATED_HEADER: &str = "Code generated by protogen. DO NOT EDIT.";

/// Import path of the protobuf definition generator used by the emitted code.
pub const PROTOBUF_IMPORT: &str = "github.com/dedis/protobuf";
