//! End-to-end compilation scenarios.

mod common;

use common::{assert_compiles, compile_err};
use kyro::{Error, LexErrorKind, ParseErrorKind, Position, compile};

#[test]
fn scenario_val_declaration() {
    assert_compiles("val x = \"hi\"", "x=\"hi\"");
}

#[test]
fn scenario_run_with_argument() {
    assert_compiles("run \"echo\", \"hello\"", "echo \"hello\"");
}

#[test]
fn scenario_if_exists() {
    assert_compiles(
        "if exists(\"f.txt\") { run \"cat\", \"f.txt\" }",
        "if [ -e \"f.txt\" ]; then\ncat \"f.txt\"\nfi",
    );
}

#[test]
fn scenario_for_glob() {
    assert_compiles(
        "for f in glob(\"*.txt\") { print(f) }",
        "for f in *.txt; do\necho \"$f\"\ndone",
    );
}

#[test]
fn scenario_unterminated_string() {
    let err = compile_err("run \"oops");
    let Error::Lex(err) = err else {
        panic!("expected lex error, got {err:?}");
    };
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.position, Position { line: 1, column: 5 });
}

#[test]
fn scenario_pipe_rejects_if() {
    let err = compile_err("pipe { if exists(\"a\") {} }");
    assert!(matches!(
        err,
        Error::Parse(ref e) if matches!(e.kind, ParseErrorKind::NonRunInPipe { .. })
    ));
}

#[test]
fn full_script() {
    let source = "\
val src = \"build\"
var count = 0

if exists(src) {
    run \"rm\", \"-r\", src
}

for f in glob(\"*.tmp\") {
    print(f)
    run \"rm\", f
}

pipe {
    run \"ls\", \"-1\"
    run \"wc\", \"-l\"
}
";
    let expected = "\
src=\"build\"
count=0
if [ -e \"$src\" ]; then
rm \"-r\" \"$src\"
fi
for f in *.tmp; do
echo \"$f\"
rm \"$f\"
done
ls \"-1\" | wc \"-l\"";
    assert_compiles(source, expected);
}

#[test]
fn compile_is_deterministic() {
    let source = "for f in glob(\"*\") { if exists(f) { print(f) } }";
    let first = compile(source).expect("compile");
    let second = compile(source).expect("compile");
    assert_eq!(first, second);
}

#[test]
fn diagnostic_format() {
    let err = compile_err("val x = \"a\"\nrun \"b");
    assert_eq!(err.diagnostic(), "2:5 → unterminated string literal");
}
