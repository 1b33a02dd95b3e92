//! Directory parsing backed by tree-sitter-go.

use std::{collections::BTreeMap, fs, path::Path};

use miette::NamedSource;
use tracing::{debug, trace};
use tree_sitter::{Node, Parser};

use crate::{
    Declaration, DeclarationKind, Error, FileFilter, Package, Result, SourceFile, TypeShape,
    is_generated_source,
};

/// Parses the Go files of a directory into packages.
pub struct SourceParser {
    parser: Parser,
}

impl SourceParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Box::new(Error::Language(e.to_string())))?;
        Ok(Self { parser })
    }

    /// Parse every file of `dir` accepted by `filter`, grouped by package
    /// name. Subdirectories are not visited.
    ///
    /// Files are parsed in name order and the first malformed file fails the
    /// whole directory. Per-package targets written by an earlier run are
    /// recognised by their generated-code marker and skipped.
    pub fn parse_dir(
        &mut self,
        dir: &Path,
        filter: &FileFilter,
    ) -> Result<BTreeMap<String, Package>> {
        let metadata = fs::metadata(dir).map_err(|e| Error::read(dir, e))?;
        if !metadata.is_dir() {
            return Err(Box::new(Error::NotADirectory {
                path: dir.to_path_buf(),
            }));
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::read(dir, e))? {
            let entry = entry.map_err(|e| Error::read(dir, e))?;
            let file_type = entry.file_type().map_err(|e| Error::read(&entry.path(), e))?;
            // Go file names are always valid UTF-8
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if filter.include(&name, file_type.is_dir()) {
                names.push(name);
            }
        }
        names.sort();

        let mut packages = BTreeMap::new();
        for name in names {
            let path = dir.join(&name);
            let source = fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
            if filter.is_package_variant(&name) && is_generated_source(&source) {
                trace!(path = %path.display(), "skipped generated file");
                continue;
            }
            let file = self.parse_source(&path, &source)?;
            trace!(path = %path.display(), declarations = file.scope().len(), "parsed file");

            let package = file.package().to_string();
            packages
                .entry(package.clone())
                .or_insert_with(|| Package::new(package, dir))
                .add_file(file);
        }

        debug!(dir = %dir.display(), packages = packages.len(), "parsed directory");
        Ok(packages)
    }

    /// Parse a single file's content and build its declaration scope.
    pub fn parse_source(&mut self, path: &Path, source: &str) -> Result<SourceFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| parse_error(path, source, 0..0, "parser returned no tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            let node = first_error(root).unwrap_or(root);
            let pos = node.start_position();
            let what = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                "syntax error".to_string()
            };
            let message = format!("{} at {}:{}", what, pos.row + 1, pos.column + 1);
            return Err(parse_error(path, source, node.byte_range(), message));
        }

        let mut package = None;
        let mut decls = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => package = package_name(child, source),
                "type_declaration" => collect_types(child, source, &mut decls),
                "function_declaration" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        let name_text = text(name, source);
                        // init functions are never part of the package scope
                        if name_text != "init" && name_text != "_" {
                            decls.push(Declaration::new(
                                name_text,
                                DeclarationKind::Function,
                                line(name),
                            ));
                        }
                    }
                }
                "var_declaration" => {
                    let kind = DeclarationKind::Variable;
                    collect_specs(child, "var_spec", kind, source, &mut decls)
                }
                "const_declaration" => {
                    let kind = DeclarationKind::Constant;
                    collect_specs(child, "const_spec", kind, source, &mut decls)
                }
                _ => {}
            }
        }

        let package = package.ok_or_else(|| {
            Box::new(Error::MissingPackageClause {
                path: path.to_path_buf(),
            })
        })?;

        let mut file = SourceFile::new(path, package);
        for decl in decls {
            file.declare(decl);
        }
        Ok(file)
    }
}

fn parse_error(
    path: &Path,
    source: &str,
    span: std::ops::Range<usize>,
    message: impl Into<String>,
) -> Box<Error> {
    Box::new(Error::Parse {
        path: path.to_path_buf(),
        message: message.into(),
        src: NamedSource::new(path.display().to_string(), source.to_string()),
        span: span.into(),
    })
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|c| c.has_error() || c.is_missing())
        .find_map(first_error);
    found
}

fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

fn line(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

fn package_name(node: Node<'_>, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    let name = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "package_identifier")
        .map(|c| text(c, source).to_string());
    name
}

/// `type A struct{}`, `type A = B` and parenthesized groups of both.
/// An alias keeps the struct shape only when it aliases a struct literal.
fn collect_types(node: Node<'_>, source: &str, out: &mut Vec<Declaration>) {
    let mut cursor = node.walk();
    for spec in node.named_children(&mut cursor) {
        let Some(name) = spec.child_by_field_name("name") else {
            continue;
        };
        let shape = match spec.kind() {
            "type_spec" => spec
                .child_by_field_name("type")
                .map_or(TypeShape::Other, |t| TypeShape::from_node_kind(t.kind())),
            // `type P = struct{...}` still names a struct literal
            "type_alias" => match spec.child_by_field_name("type") {
                Some(t) if t.kind() == "struct_type" => TypeShape::Struct,
                _ => TypeShape::Alias,
            },
            _ => continue,
        };
        let name_text = text(name, source);
        if name_text == "_" {
            continue;
        }
        let generic = spec.child_by_field_name("type_parameters").is_some();
        out.push(Declaration::type_decl(name_text, shape, line(name)).with_generic(generic));
    }
}

/// `var`/`const` specs, including grouped declarations. One spec can name
/// several identifiers.
fn collect_specs(
    node: Node<'_>,
    spec_kind: &str,
    kind: DeclarationKind,
    source: &str,
    out: &mut Vec<Declaration>,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == spec_kind {
            let mut names = child.walk();
            for name in child.children_by_field_name("name", &mut names) {
                let name_text = text(name, source);
                if name_text != "_" {
                    out.push(Declaration::new(name_text, kind, line(name)));
                }
            }
        } else if child.kind().ends_with("_spec_list") {
            collect_specs(child, spec_kind, kind, source, out);
        }
    }
}
