mod common;

#[test]
fn for_loop_desugars_to_a_while_loop() {
    let (output, driver) = common::run("for (var i = 0; i < 3; i = i + 1) print i;");
    assert!(!driver.had_error());
    assert_eq!(output, "0\n1\n2\n");
}

#[test]
fn for_loop_with_omitted_clauses_still_runs() {
    let (output, driver) = common::run(
        r#"
        var i = 0;
        for (;i < 2;) {
            print i;
            i = i + 1;
        }
        "#,
    );
    assert!(!driver.had_error());
    assert_eq!(output, "0\n1\n");
}

#[test]
fn if_else_picks_the_right_branch() {
    let (output, driver) = common::run(r#"if (1 < 2) print "yes"; else print "no";"#);
    assert!(!driver.had_error());
    assert_eq!(output, "yes\n");
}

#[test]
fn dangling_else_binds_to_the_nearest_if() {
    let (output, driver) = common::run(r#"if (true) if (false) print "inner"; else print "else";"#);
    assert!(!driver.had_error());
    assert_eq!(output, "else\n");
}

#[test]
fn while_loop_runs_until_condition_is_false() {
    let (output, driver) = common::run(
        r#"
        var i = 0;
        while (i < 3) {
            print i;
            i = i + 1;
        }
        "#,
    );
    assert!(!driver.had_error());
    assert_eq!(output, "0\n1\n2\n");
}

#[test]
fn logical_operators_short_circuit_and_return_operand_values() {
    let (output, driver) = common::run(r#"print false or "default"; print 1 and 2; print nil and 1;"#);
    assert!(!driver.had_error());
    assert_eq!(output, "default\n2\nnil\n");
}

#[test]
fn return_unwinds_out_of_arbitrarily_nested_blocks() {
    let (output, driver) = common::run("fun f() { { { return 42; } } } print f();");
    assert!(!driver.had_error());
    assert_eq!(output, "42\n");
}
