mod common;

#[test]
fn functions_without_a_return_yield_nil() {
    let (output, driver) = common::run("fun f() {} print f();");
    assert!(!driver.had_error());
    assert_eq!(output, "nil\n");
}

#[test]
fn function_display_is_bracketed_with_its_name() {
    let (output, driver) = common::run("fun greet() {} print greet;");
    assert!(!driver.had_error());
    assert_eq!(output, "<fn greet>\n");
}

#[test]
fn native_function_display_is_callable() {
    let (output, driver) = common::run("print clock;");
    assert!(!driver.had_error());
    assert_eq!(output, "<callable>\n");
}

#[test]
fn calling_with_the_wrong_arity_is_a_runtime_error() {
    let (_, driver) = common::run("fun f(a) { return a; } f();");
    assert!(driver.had_runtime_error());
}

#[test]
fn calling_a_non_callable_is_a_runtime_error() {
    let (_, driver) = common::run("var a = 1; a();");
    assert!(driver.had_runtime_error());
}

#[test]
fn recursion_works_through_self_reference() {
    let (output, driver) = common::run(
        r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }
        print fib(8);
        "#,
    );
    assert!(!driver.had_error());
    assert_eq!(output, "21\n");
}

#[test]
fn print_stack_depth_reflects_the_active_environment_chain() {
    let (output, driver) = common::run(
        r#"
        fun f() {
            fun g() {
                printStackDepth();
            }
            g();
        }
        f();
        "#,
    );
    assert!(!driver.had_error());
    assert_eq!(output, "Stack Depth: 2\n");
}
