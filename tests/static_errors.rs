mod common;

#[test]
fn self_referential_initializer_is_a_static_error_not_a_runtime_one() {
    let (output, driver) = common::run("{ var a = a; }");
    assert!(driver.had_error());
    assert!(!driver.had_runtime_error());
    assert_eq!(output, "");
}

#[test]
fn redeclaring_a_local_is_a_static_error() {
    let (_, driver) = common::run("{ var a = 1; var a = 2; }");
    assert!(driver.had_error());
}

#[test]
fn this_outside_a_class_is_a_static_error() {
    let (_, driver) = common::run("print this;");
    assert!(driver.had_error());
}

#[test]
fn return_outside_a_function_is_a_static_error() {
    let (_, driver) = common::run("return 1;");
    assert!(driver.had_error());
}

#[test]
fn returning_a_value_from_an_initializer_is_a_static_error() {
    let (_, driver) = common::run("class A { init() { return 1; } }");
    assert!(driver.had_error());
}

#[test]
fn a_bare_return_from_an_initializer_is_allowed() {
    let (_, driver) = common::run("class A { init() { return; } }");
    assert!(!driver.had_error());
}
