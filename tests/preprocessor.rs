use std::{fs, path::Path};

use candi::{
    compiler::{preprocessor::preprocess, tokenizer::tokenize},
    error::ParseError,
};

fn spelled(source: &str, base_dir: &Path) -> Result<Vec<String>, ParseError> {
    let tokens = tokenize(source)?;
    let expanded = preprocess(tokens, base_dir)?;
    Ok(expanded.into_iter().map(|t| t.literal).collect())
}

#[test]
fn include_splices_the_referenced_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib.candi"), "#var shared = 1;").unwrap();

    let spelled = spelled("#include 'lib.candi';\n#var x = shared;", dir.path()).unwrap();
    assert_eq!(spelled,
               vec!["#var", "shared", "=", "1", ";", "#var", "x", "=", "shared", ";", ""]);
}

#[test]
fn includes_nest_and_resolve_relative_to_the_including_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/inner.candi"), "#var inner = 2;").unwrap();
    fs::write(dir.path().join("sub/outer.candi"),
              "#include 'inner.candi';\n#var outer = inner;")
        .unwrap();

    let spelled = spelled("#include 'sub/outer.candi';", dir.path()).unwrap();
    assert_eq!(spelled,
               vec!["#var", "inner", "=", "2", ";", "#var", "outer", "=", "inner", ";", ""]);
}

#[test]
fn include_cycles_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.candi"), "#include 'b.candi';").unwrap();
    fs::write(dir.path().join("b.candi"), "#include 'a.candi';").unwrap();

    let result = spelled("#include 'a.candi';", dir.path());
    assert!(matches!(result, Err(ParseError::IncludeCycle { .. })));
}

#[test]
fn missing_includes_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = spelled("#include 'absent.candi';", dir.path());
    assert!(matches!(result, Err(ParseError::IncludeFailed { .. })));
}

#[test]
fn malformed_includes_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    assert!(spelled("#include 42;", dir.path()).is_err());
    assert!(spelled("#include 'a.candi'", dir.path()).is_err());
}

#[test]
fn macros_substitute_positionally() {
    let spelled1 = spelled("#macro twice(x) x + x; #var a = twice(21);", Path::new(".")).unwrap();
    assert_eq!(spelled1, vec!["#var", "a", "=", "21", "+", "21", ";", ""]);

    let spelled2 = spelled("#macro pair(a, b) a * b; #var x = pair(2, 3 + 4);", Path::new("."))
        .unwrap();
    assert_eq!(spelled2,
               vec!["#var", "x", "=", "2", "*", "3", "+", "4", ";", ""]);
}

#[test]
fn macros_expand_inside_replacement_output() {
    let spelled = spelled("#macro one() 1; #macro two() one() + one(); #var x = two();",
                          Path::new("."))
        .unwrap();
    assert_eq!(spelled, vec!["#var", "x", "=", "1", "+", "1", ";", ""]);
}

#[test]
fn macro_names_without_arguments_pass_through() {
    let spelled = spelled("#macro val() 1; #var y = val;", Path::new(".")).unwrap();
    assert_eq!(spelled, vec!["#var", "y", "=", "val", ";", ""]);
}

#[test]
fn macro_arity_is_checked() {
    let result = spelled("#macro pair(a, b) a + b; #var x = pair(1);", Path::new("."));
    assert!(matches!(result, Err(ParseError::MacroArgumentMismatch { .. })));
}

#[test]
fn runaway_macro_expansion_is_cut_off() {
    let result = spelled("#macro forever() forever(); #var x = forever();", Path::new("."));
    assert!(matches!(result, Err(ParseError::MacroRecursionLimit { .. })));
}
