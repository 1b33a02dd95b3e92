use std::{collections::BTreeSet, path::Path};

/// Extension of Go source files.
pub const GO_EXTENSION: &str = "go";

/// Suffix of Go test files.
pub const TEST_SUFFIX: &str = "_test.go";

/// Whether `source` opens with Go's generated-code marker,
/// `// Code generated <tool>. DO NOT EDIT.`
pub fn is_generated_source(source: &str) -> bool {
    source.lines().next().is_some_and(|first| {
        let first = first.trim_end();
        first.starts_with("// Code generated ") && first.ends_with(" DO NOT EDIT.")
    })
}

/// Decides which directory entries are parsed and which directories are
/// descended into.
#[derive(Debug, Clone)]
pub struct FileFilter {
    gofile: String,
    excluded_dirs: BTreeSet<String>,
}

impl FileFilter {
    /// Create a filter that skips the generated file named `gofile`.
    pub fn new(gofile: impl Into<String>) -> Self {
        Self {
            gofile: gofile.into(),
            excluded_dirs: BTreeSet::new(),
        }
    }

    /// Never descend into directories with these names.
    pub fn with_excluded_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether an entry takes part in parsing. The first failing rule wins:
    /// directories, the generated file, non-`.go` files, then test files.
    ///
    /// Per-package variants pass here; the parser drops them once their
    /// content shows the generated-code marker.
    pub fn include(&self, name: &str, is_dir: bool) -> bool {
        if is_dir {
            return false;
        }

        if name == self.gofile {
            return false;
        }

        if Path::new(name).extension().and_then(|e| e.to_str()) != Some(GO_EXTENSION) {
            return false;
        }

        if name.ends_with(TEST_SUFFIX) {
            return false;
        }

        true
    }

    /// Whether the walker should recurse into a directory with this name.
    pub fn descend(&self, dir_name: &str) -> bool {
        !self.excluded_dirs.contains(dir_name)
    }

    /// Whether `name` has the shape of a per-package target,
    /// `<stem>_<package><ext>`.
    pub fn is_package_variant(&self, name: &str) -> bool {
        let (stem, ext) = self.split_gofile();
        name.strip_prefix(stem)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|rest| rest.strip_suffix(ext))
            .is_some_and(is_identifier)
    }

    /// Target file name for `package` when a directory holds more than one
    /// package.
    pub fn package_target(&self, package: &str) -> String {
        let (stem, ext) = self.split_gofile();
        format!("{}_{}{}", stem, package, ext)
    }

    /// Splits the configured name into stem and extension (with the dot).
    fn split_gofile(&self) -> (&str, &str) {
        match self.gofile.rfind('.') {
            Some(idx) if idx > 0 => self.gofile.split_at(idx),
            _ => (self.gofile.as_str(), ""),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> FileFilter {
        FileFilter::new("proto_generator.go")
    }

    #[test]
    fn test_includes_plain_go_file() {
        assert!(filter().include("user.go", false));
    }

    #[test]
    fn test_excludes_directories() {
        assert!(!filter().include("models.go", true));
    }

    #[test]
    fn test_excludes_generated_file() {
        assert!(!filter().include("proto_generator.go", false));
    }

    #[test]
    fn test_per_package_variant_is_left_to_parser() {
        assert!(filter().include("proto_generator_api.go", false));
        assert!(filter().is_package_variant("proto_generator_api.go"));
        assert!(filter().is_package_variant("proto_generator_helpers.go"));
        assert!(!filter().is_package_variant("proto_generator2.go"));
        assert!(!filter().is_package_variant("proto_generator.go"));
    }

    #[test]
    fn test_generated_source_marker() {
        assert!(is_generated_source(
            "// Code generated by protogen. DO NOT EDIT.\n\npackage api\n"
        ));
        assert!(is_generated_source("// Code generated by stringer. DO NOT EDIT.\r\n"));
        assert!(!is_generated_source("package api\n\n// Code generated by x. DO NOT EDIT.\n"));
        assert!(!is_generated_source("// Helpers for the generated file.\npackage api\n"));
        assert!(!is_generated_source(""));
    }

    #[test]
    fn test_excludes_other_extensions() {
        assert!(!filter().include("README.md", false));
        assert!(!filter().include("main.go.orig", false));
        assert!(!filter().include("go", false));
    }

    #[test]
    fn test_excludes_test_files() {
        assert!(!filter().include("thing_test.go", false));
        assert!(filter().include("test.go", false));
    }

    #[test]
    fn test_custom_gofile() {
        let filter = FileFilter::new("types_gen.go");
        assert!(!filter.include("types_gen.go", false));
        assert!(filter.include("proto_generator.go", false));
        assert_eq!(filter.package_target("api"), "types_gen_api.go");
    }

    #[test]
    fn test_gofile_without_extension() {
        let filter = FileFilter::new("generated");
        assert_eq!(filter.package_target("api"), "generated_api");
        assert!(filter.is_package_variant("generated_api"));
    }

    #[test]
    fn test_package_target() {
        assert_eq!(filter().package_target("api"), "proto_generator_api.go");
    }

    #[test]
    fn test_descend() {
        let filter = filter().with_excluded_dirs(["vendor", "testdata"]);
        assert!(!filter.descend("vendor"));
        assert!(!filter.descend("testdata"));
        assert!(filter.descend("models"));
    }
}
