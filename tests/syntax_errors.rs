mod common;

#[test]
fn unterminated_string_is_a_scan_error() {
    let (_, driver) = common::run("\"unterminated");
    assert!(driver.had_error());
}

#[test]
fn unexpected_character_is_a_scan_error() {
    let (_, driver) = common::run("var a = 1 @ 2;");
    assert!(driver.had_error());
}

#[test]
fn invalid_assignment_target_is_a_parse_error() {
    let (_, driver) = common::run("1 = 2;");
    assert!(driver.had_error());
}

#[test]
fn more_than_255_parameters_is_a_parse_error() {
    let params: Vec<String> = (0..256).map(|i| format!("p{i}")).collect();
    let source = format!("fun f({}) {{}}", params.join(", "));
    let (_, driver) = common::run(&source);
    assert!(driver.had_error());
}

#[test]
fn more_than_255_arguments_is_a_parse_error() {
    let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
    let source = format!("fun f() {{}} f({});", args.join(", "));
    let (_, driver) = common::run(&source);
    assert!(driver.had_error());
}

#[test]
fn a_single_error_does_not_stop_the_whole_run_from_being_scanned() {
    let (_, driver) = common::run("var a = 1 @ 2;\nvar b = 3 $ 4;");
    assert!(driver.had_error());
}
