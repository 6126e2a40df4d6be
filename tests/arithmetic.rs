mod common;

#[test]
fn arithmetic_and_grouping() {
    let (output, driver) = common::run("print 1 + 2; print (3 - 1) * 4; print 10 / 4;");
    assert!(!driver.had_error());
    assert_eq!(output, "3\n8\n2.5\n");
}

#[test]
fn string_concatenation() {
    let (output, driver) = common::run(r#"print "ab" + "cd";"#);
    assert!(!driver.had_error());
    assert_eq!(output, "abcd\n");
}

#[test]
fn number_and_string_concatenate_via_stringify() {
    let (output, driver) = common::run(r#"print "count: " + 3; print 3 + " apples";"#);
    assert!(!driver.had_error());
    assert_eq!(output, "count: 3\n3 apples\n");
}

#[test]
fn adding_a_bool_and_a_number_is_a_runtime_error() {
    let (_, driver) = common::run("print 1 + true;");
    assert!(driver.had_runtime_error());
}

#[test]
fn unary_minus_requires_a_number() {
    let (_, driver) = common::run(r#"print -"nope";"#);
    assert!(driver.had_runtime_error());
}

#[test]
fn comparison_requires_numbers() {
    let (_, driver) = common::run(r#"print "a" < "b";"#);
    assert!(driver.had_runtime_error());
}

#[test]
fn different_literal_types_are_never_equal() {
    let (output, driver) = common::run(r#"print 1 == "1"; print nil == false;"#);
    assert!(!driver.had_error());
    assert_eq!(output, "false\nfalse\n");
}

#[test]
fn division_by_zero_produces_infinity_not_a_runtime_error() {
    let (output, driver) = common::run("print 1 / 0;");
    assert!(!driver.had_error());
    assert_eq!(output, "inf\n");
}
