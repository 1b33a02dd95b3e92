use std::path::{Path, PathBuf};

use protogen_core::GeneratedFile;

use super::{GENERATED_HEADER, PROTOBUF_IMPORT};
use crate::CodeBuilder;

/// The per-package Go file listing exported struct types for the protobuf
/// definition generator.
///
/// Rendering is a pure function of the package name and the (already
/// sorted) type names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoGeneratorFile {
    file_name: String,
    package: String,
    struct_types: Vec<String>,
}

impl ProtoGeneratorFile {
    pub fn new(
        file_name: impl Into<String>,
        package: impl Into<String>,
        struct_types: Vec<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            package: package.into(),
            struct_types,
        }
    }

    pub fn struct_types(&self) -> &[String] {
        &self.struct_types
    }
}

impl GeneratedFile for ProtoGeneratorFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.file_name)
    }

    fn render(&self) -> String {
        CodeBuilder::go()
            .comment(GENERATED_HEADER)
            .blank()
            .line(&format!("package {}", self.package))
            .blank()
            .block_with_close("import (", ")", |b| {
                b.line("\"os\"")
                    .blank()
                    .comment("struct definitions are turned into .proto files by dedis/protobuf")
                    .comment("see: https://github.com/dedis/protobuf#generating-proto-files")
                    .line(&format!("\"{}\"", PROTOBUF_IMPORT))
            })
            .blank()
            .block_with_close("var structTypes = []interface{}{", "}", |b| {
                b.each(&self.struct_types, |b, name| b.line(&format!("{}{{}},", name)))
            })
            .blank()
            .comment("GenerateProtos prints the protobuf definitions of structTypes to stdout.")
            .block_with_close("func GenerateProtos() {", "}", |b| {
                b.line("protobuf.GenerateProtobufDefinition(os.Stdout, structTypes, nil, nil)")
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(names: &[&str]) -> ProtoGeneratorFile {
        ProtoGeneratorFile::new(
            "proto_generator.go",
            "models",
            names.iter().map(|n| n.to_string()).collect(),
        )
    }

    #[test]
    fn test_render_full_template() {
        let expected = "\
// Code generated by protogen. DO NOT EDIT.

package models

import (
\t\"os\"

\t// struct definitions are turned into .proto files by dedis/protobuf
\t// see: https://github.com/dedis/protobuf#generating-proto-files
\t\"github.com/dedis/protobuf\"
)

var structTypes = []interface{}{
\tAddress{},
\tUser{},
}

// GenerateProtos prints the protobuf definitions of structTypes to stdout.
func GenerateProtos() {
\tprotobuf.GenerateProtobufDefinition(os.Stdout, structTypes, nil, nil)
}
";
        assert_eq!(file(&["Address", "User"]).render(), expected);
    }

    #[test]
    fn test_render_empty_listing() {
        let rendered = file(&[]).render();
        assert!(rendered.contains("var structTypes = []interface{}{\n}\n"));
        assert!(rendered.contains("func GenerateProtos() {"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = file(&["A", "B"]);
        let b = file(&["A", "B"]);
        assert_eq!(a.render().as_bytes(), b.render().as_bytes());
    }

    #[test]
    fn test_render_keeps_given_order() {
        let rendered = file(&["Alpha", "Beta", "Gamma"]).render();
        let alpha = rendered.find("\tAlpha{},").unwrap();
        let beta = rendered.find("\tBeta{},").unwrap();
        let gamma = rendered.find("\tGamma{},").unwrap();
        assert!(alpha < beta && beta < gamma);
    }

    #[test]
    fn test_header_is_first_line() {
        let rendered = file(&[]).render();
        assert_eq!(
            rendered.lines().next(),
            Some("// Code generated by protogen. DO NOT EDIT.")
        );
    }

    #[test]
    fn test_header_marks_file_as_generated() {
        assert!(protogen_go::is_generated_source(&file(&["A"]).render()));
    }

    #[test]
    fn test_path() {
        let path = file(&[]).path(Path::new("pkg/models"));
        assert_eq!(path, Path::new("pkg/models/proto_generator.go"));
    }
}
