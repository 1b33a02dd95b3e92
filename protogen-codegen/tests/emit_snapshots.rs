//! Snapshot tests for the generated Go file.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::fs;

use protogen_codegen::{TreeWalker, WalkConfig};
use tempfile::TempDir;

/// Generate a file from a single Go source and return its content.
fn generate(source: &str) -> String {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("models.go"), source).unwrap();

    TreeWalker::new(WalkConfig::default())
        .walk(temp.path())
        .expect("walk failed");

    fs::read_to_string(temp.path().join("proto_generator.go")).expect("nothing generated")
}

#[test]
fn test_mixed_declarations() {
    let content = generate(
        r#"package models

import "time"

type User struct {
	Name    string
	Created time.Time
}

type Address struct {
	Street string
}

type ID int64

type Store interface {
	Get(id ID) (*User, error)
}

type Alias = User

type Box[T any] struct {
	Value T
}

type session struct{}

var Default = User{}

func NewUser() *User { return &User{} }
"#,
    );

    insta::assert_snapshot!("mixed_declarations", content);
}

#[test]
fn test_no_structs() {
    let content = generate("package util\n\nfunc Helper() {}\n");

    insta::assert_snapshot!("no_structs", content);
}
