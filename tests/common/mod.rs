#![allow(dead_code)]

use kyro::{Error, Program, compile, parse, tokenize};

/// Compile and assert the generated script.
pub fn assert_compiles(input: &str, expected: &str) {
    let output = compile(input).unwrap_or_else(|e| {
        panic!("compile failed: {e}\n--- input ---\n{input}");
    });
    assert_eq!(
        output, expected,
        "output mismatch:\n--- expected ---\n{expected}\n--- got ---\n{output}"
    );
}

/// Compile, expecting failure.
pub fn compile_err(input: &str) -> Error {
    match compile(input) {
        Ok(output) => panic!("expected an error, got:\n{output}"),
        Err(e) => e,
    }
}

/// Tokenize and parse.
pub fn parse_source(input: &str) -> Program {
    let tokens = tokenize(input).expect("tokenize failed");
    parse(&tokens).expect("parse failed")
}
