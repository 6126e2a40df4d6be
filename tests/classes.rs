mod common;

#[test]
fn init_and_method_and_this() {
    let (output, driver) = common::run(
        r#"
        class Greeter {
            init(name) { this.name = name; }
            hi() { print "hi " + this.name; }
        }
        var g = Greeter("Lox");
        g.hi();
        "#,
    );
    assert!(!driver.had_error());
    assert_eq!(output, "hi Lox\n");
}

#[test]
fn calling_init_explicitly_returns_the_instance_not_nil() {
    let (output, driver) = common::run(
        r#"
        class Foo {
            init() { return; }
        }
        var f = Foo();
        print f.init();
        "#,
    );
    assert!(!driver.had_error());
    assert_eq!(output, "Foo instance\n");
}

#[test]
fn bound_methods_keep_their_own_this() {
    let (output, driver) = common::run(
        r#"
        class Box {
            init(value) { this.value = value; }
            get() { return this.value; }
        }
        var a = Box(1);
        var b = Box(2);
        var getA = a.get;
        var getB = b.get;
        print getA();
        print getB();
        "#,
    );
    assert!(!driver.had_error());
    assert_eq!(output, "1\n2\n");
}

#[test]
fn setting_a_field_creates_it() {
    let (output, driver) = common::run(
        r#"
        class Foo {}
        var f = Foo();
        f.bar = "baz";
        print f.bar;
        "#,
    );
    assert!(!driver.had_error());
    assert_eq!(output, "baz\n");
}

#[test]
fn a_runtime_error_inside_an_initializer_propagates_and_aborts_the_run() {
    let (output, driver) = common::run(
        r#"
        class Foo {
            init() { bar; }
        }
        Foo();
        print "after";
        "#,
    );
    assert!(driver.had_runtime_error());
    assert_eq!(output, "");
}

#[test]
fn accessing_an_undefined_property_is_a_runtime_error() {
    let (_, driver) = common::run("class Foo {} print Foo().bar;");
    assert!(driver.had_runtime_error());
}

#[test]
fn setting_a_property_on_a_non_instance_is_a_runtime_error() {
    let (_, driver) = common::run("var a = 1; a.bar = 2;");
    assert!(driver.had_runtime_error());
}

#[test]
fn class_and_instance_display_have_no_brackets() {
    let (output, driver) = common::run(
        r#"
        class Foo {}
        print Foo;
        print Foo();
        "#,
    );
    assert!(!driver.had_error());
    assert_eq!(output, "Foo\nFoo instance\n");
}

#[test]
fn calling_a_class_with_the_wrong_number_of_init_arguments_is_a_runtime_error() {
    let (_, driver) = common::run(
        r#"
        class Foo {
            init(a, b) { this.a = a; this.b = b; }
        }
        Foo(1);
        "#,
    );
    assert!(driver.had_runtime_error());
}
