use lox::driver::Lox;

struct Outcome {
    out: String,
    err: String,
    had_error: bool,
    had_runtime_error: bool,
}

/// Run lox code using a fresh interpreter and capture program output,
/// diagnostics, and the driver flags.
fn run(code: &str) -> Outcome {
    run_session(&[code])
}

/// Run several inputs against one interpreter, clearing the error flags
/// between them the way the REPL does.  The returned flags are those of the
/// final input.
fn run_session(lines: &[&str]) -> Outcome {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();

    let (had_error, had_runtime_error) = {
        let mut lox = Lox::new(&mut out, &mut err);

        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                lox.reset();
            }

            lox.run(line.as_bytes());
        }

        (lox.had_error(), lox.had_runtime_error())
    };

    Outcome {
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
        had_error,
        had_runtime_error,
    }
}

fn assert_prints(code: &str, expected: &str) {
    let outcome = run(code);

    assert_eq!(outcome.out, expected, "stderr: {}", outcome.err);
    assert!(!outcome.had_error, "stderr: {}", outcome.err);
    assert!(!outcome.had_runtime_error, "stderr: {}", outcome.err);
}

// ─────────────────────────────────────────────────────────────────────────────
// Expressions and printing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn arithmetic_precedence() {
    assert_prints("print (1 + 2) * 3 / 2 - 1;", "3.5\n");
}

#[test]
fn integer_results_print_without_decimal_point() {
    assert_prints("print 2 + 3;", "5\n");
    assert_prints("print 10 / 4;", "2.5\n");
}

#[test]
fn print_is_idempotent() {
    assert_prints("var x = 3.5; print x; print x;", "3.5\n3.5\n");
}

#[test]
fn string_concatenation() {
    assert_prints("print \"foo\" + \"bar\";", "foobar\n");
}

#[test]
fn truthiness_of_zero_and_empty_string() {
    assert_prints("print !nil; print !false; print !0; print !\"\";", "true\ntrue\nfalse\nfalse\n");
}

#[test]
fn equality_across_kinds_is_false() {
    assert_prints("print 1 == \"1\"; print nil == false; print nil == nil;", "false\nfalse\ntrue\n");
}

#[test]
fn nan_is_not_equal_to_itself() {
    assert_prints("var nan = 0 / 0; print nan == nan; print nan != nan;", "false\ntrue\n");
}

#[test]
fn division_by_zero_follows_ieee() {
    assert_prints("print 1 / 0; print -1 / 0;", "inf\n-inf\n");
}

#[test]
fn logical_operators_return_an_operand() {
    assert_prints("print \"hi\" or 2; print nil or \"yes\";", "hi\nyes\n");
    assert_prints("print nil and 1; print 1 and 2;", "nil\n2\n");
}

#[test]
fn assignment_is_an_expression() {
    assert_prints("var a = 1; print a = 2; print a;", "2\n2\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Scoping, control flow, and closures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn block_scoping_shadows_and_restores() {
    let code = "\
        var a = \"global\";\n\
        {\n\
            var a = \"block\";\n\
            print a;\n\
        }\n\
        print a;";

    assert_prints(code, "block\nglobal\n");
}

#[test]
fn global_redeclaration_is_allowed() {
    assert_prints("var a = 1; var a = 2; print a;", "2\n");
}

#[test]
fn while_loop_accumulates() {
    let code = "\
        var sum = 0;\n\
        var i = 0;\n\
        while (i < 5) {\n\
            sum = sum + i;\n\
            i = i + 1;\n\
        }\n\
        print sum;";

    assert_prints(code, "10\n");
}

#[test]
fn for_loop_desugars_and_runs() {
    assert_prints("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
}

#[test]
fn closure_keeps_its_environment_alive() {
    let code = "\
        fun makeCounter() {\n\
            var i = 0;\n\
            fun count() {\n\
                i = i + 1;\n\
                print i;\n\
            }\n\
            return count;\n\
        }\n\
        var counter = makeCounter();\n\
        counter();\n\
        counter();";

    assert_prints(code, "1\n2\n");
}

#[test]
fn closure_binds_at_declaration_not_call() {
    let code = "\
        var a = \"global\";\n\
        {\n\
            fun show() {\n\
                print a;\n\
            }\n\
            show();\n\
            var a = \"block\";\n\
            show();\n\
        }";

    assert_prints(code, "global\nglobal\n");
}

#[test]
fn recursion_reaches_the_function_by_name() {
    let code = "\
        fun fib(n) {\n\
            if (n < 2) return n;\n\
            return fib(n - 1) + fib(n - 2);\n\
        }\n\
        print fib(6);";

    assert_prints(code, "8\n");
}

#[test]
fn return_unwinds_nested_blocks_and_loops() {
    let code = "\
        fun f() {\n\
            while (true) {\n\
                {\n\
                    return 7;\n\
                }\n\
            }\n\
            print \"unreachable\";\n\
        }\n\
        print f();";

    assert_prints(code, "7\n");
}

#[test]
fn function_without_return_yields_nil() {
    assert_prints("fun f() {} print f();", "nil\n");
}

#[test]
fn function_values_stringify() {
    assert_prints("fun add(a, b) { return a + b; } print add;", "<fn add>\n");
    assert_prints("print clock;", "<native fn>\n");
}

#[test]
fn clock_returns_a_positive_number() {
    assert_prints("print clock() > 0;", "true\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Classes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn classes_and_instances_stringify() {
    assert_prints("class Cake {} print Cake; print Cake();", "Cake\nCake instance\n");
}

#[test]
fn methods_bind_this_to_the_receiver() {
    let code = "\
        class Cake {\n\
            taste() {\n\
                this.flavor = \"chocolate\";\n\
                print this.flavor;\n\
            }\n\
        }\n\
        var cake = Cake();\n\
        cake.taste();";

    assert_prints(code, "chocolate\n");
}

#[test]
fn extracted_methods_stay_bound() {
    let code = "\
        class Cake {\n\
            taste() {\n\
                this.flavor = \"chocolate\";\n\
                print this.flavor;\n\
            }\n\
        }\n\
        var tasting = Cake().taste;\n\
        tasting();";

    assert_prints(code, "chocolate\n");
}

#[test]
fn initializer_runs_on_construction() {
    let code = "\
        class Point {\n\
            init(x) {\n\
                this.x = x;\n\
            }\n\
        }\n\
        print Point(5).x;";

    assert_prints(code, "5\n");
}

#[test]
fn initializer_always_returns_the_instance() {
    let code = "\
        class Point {\n\
            init() {\n\
                this.x = 1;\n\
            }\n\
        }\n\
        var p = Point();\n\
        print p.init().x;";

    assert_prints(code, "1\n");
}

#[test]
fn bare_return_in_initializer_still_yields_the_instance() {
    let code = "\
        class Flag {\n\
            init() {\n\
                this.up = true;\n\
                return;\n\
            }\n\
        }\n\
        print Flag().up;";

    assert_prints(code, "true\n");
}

#[test]
fn fields_shadow_methods() {
    let code = "\
        class Thing {\n\
            kind() {\n\
                return \"method\";\n\
            }\n\
        }\n\
        var t = Thing();\n\
        t.kind = \"field\";\n\
        print t.kind;";

    assert_prints(code, "field\n");
}

#[test]
fn duplicate_method_definitions_keep_the_later_one() {
    let code = "\
        class M {\n\
            v() { return 1; }\n\
            v() { return 2; }\n\
        }\n\
        print M().v();";

    assert_prints(code, "2\n");
}

#[test]
fn methods_are_inherited() {
    let code = "\
        class A {\n\
            hi() { print \"hi\"; }\n\
        }\n\
        class B < A {}\n\
        B().hi();";

    assert_prints(code, "hi\n");
}

#[test]
fn super_dispatches_to_the_superclass_method() {
    let code = "\
        class A {\n\
            greet() { print \"A\"; }\n\
        }\n\
        class B < A {\n\
            greet() {\n\
                super.greet();\n\
                print \"B\";\n\
            }\n\
        }\n\
        B().greet();";

    assert_prints(code, "A\nB\n");
}

#[test]
fn initializer_arity_is_the_class_arity() {
    let outcome = run("class Point { init(x) {} } Point();");

    assert!(outcome.had_runtime_error);
    assert!(outcome.err.contains("Expected 1 arguments but got 0."));
}

// ─────────────────────────────────────────────────────────────────────────────
// Front-end diagnostics
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn lex_error_skips_execution() {
    let outcome = run("print 1; @");

    assert!(outcome.had_error);
    assert!(outcome.err.contains("Unexpected character '@'."));
    assert!(outcome.out.is_empty());
}

#[test]
fn reading_a_local_in_its_own_initializer_is_an_error() {
    let outcome = run("{\n    var a = a;\n}");

    assert!(outcome.had_error);
    assert!(!outcome.had_runtime_error);
    assert!(outcome
        .err
        .contains("Can't read local variable in its own initialiser."));
    assert!(outcome.out.is_empty());
}

#[test]
fn duplicate_declaration_in_one_scope_is_an_error() {
    let outcome = run("{\n    var a = 1;\n    var a = 2;\n}");

    assert!(outcome.had_error);
    assert!(outcome
        .err
        .contains("Already a variable with this name in this scope."));
}

#[test]
fn resolver_reports_multiple_errors_in_one_pass() {
    let outcome = run("{\n    var a = a;\n    var b = b;\n}");

    assert!(outcome.had_error);
    assert_eq!(outcome.err.matches("initialiser").count(), 2);
}

#[test]
fn return_at_top_level_is_an_error() {
    let outcome = run("return 1;");

    assert!(outcome.had_error);
    assert!(outcome.err.contains("Can't return from top-level code."));
}

#[test]
fn returning_a_value_from_an_initializer_is_an_error() {
    let outcome = run("class C { init() { return 1; } }");

    assert!(outcome.had_error);
    assert!(outcome
        .err
        .contains("Can't return a value from an initializer."));
}

#[test]
fn this_outside_a_class_is_an_error() {
    let outcome = run("print this;");

    assert!(outcome.had_error);
    assert!(outcome.err.contains("Can't use 'this' outside of a class."));
}

#[test]
fn super_context_rules_are_enforced() {
    let outside = run("print super.x;");
    assert!(outside.had_error);
    assert!(outside
        .err
        .contains("Can't use 'super' outside of a class."));

    let no_parent = run("class A { m() { super.m(); } }");
    assert!(no_parent.had_error);
    assert!(no_parent
        .err
        .contains("Can't use 'super' in a class with no superclass."));
}

#[test]
fn self_inheritance_is_an_error() {
    let outcome = run("class Ouroboros < Ouroboros {}");

    assert!(outcome.had_error);
    assert!(outcome.err.contains("A class can't inherit from itself."));
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn adding_a_string_and_a_number_is_a_runtime_error() {
    let outcome = run("print \"a\" + 1;");

    assert!(!outcome.had_error);
    assert!(outcome.had_runtime_error);
    assert!(outcome
        .err
        .contains("Operands must be two numbers or two strings."));
    assert!(outcome.err.contains("[line 1]"));
    assert!(outcome.out.is_empty());
}

#[test]
fn comparison_requires_numbers() {
    let outcome = run("print 1 < \"2\";");

    assert!(outcome.had_runtime_error);
    assert!(outcome.err.contains("Operands must be numbers."));
}

#[test]
fn negation_requires_a_number() {
    let outcome = run("print -\"muffin\";");

    assert!(outcome.had_runtime_error);
    assert!(outcome.err.contains("Operand must be a number."));
}

#[test]
fn undefined_variable_is_a_runtime_error() {
    let outcome = run("print missing;");

    assert!(outcome.had_runtime_error);
    assert!(outcome.err.contains("Undefined variable 'missing'."));
}

#[test]
fn runtime_error_aborts_the_rest_of_the_program() {
    let outcome = run("print 1;\nprint nothing;\nprint 2;");

    assert!(outcome.had_runtime_error);
    assert_eq!(outcome.out, "1\n");
    assert!(outcome.err.contains("[line 2]"));
}

#[test]
fn only_instances_have_properties() {
    let read = run("var x = 1; print x.y;");
    assert!(read.had_runtime_error);
    assert!(read.err.contains("Only instances have properties."));

    let write = run("var x = 1; x.y = 2;");
    assert!(write.had_runtime_error);
    assert!(write.err.contains("Only instances have fields."));
}

#[test]
fn undefined_property_is_a_runtime_error() {
    let outcome = run("class C {} print C().missing;");

    assert!(outcome.had_runtime_error);
    assert!(outcome.err.contains("Undefined property 'missing'."));
}

#[test]
fn calling_a_non_callable_is_a_runtime_error() {
    let outcome = run("\"not a function\"();");

    assert!(outcome.had_runtime_error);
    assert!(outcome.err.contains("Can only call functions and classes."));
}

#[test]
fn arity_mismatch_is_a_runtime_error() {
    let outcome = run("fun f(a) {} f(1, 2);");

    assert!(outcome.had_runtime_error);
    assert!(outcome.err.contains("Expected 1 arguments but got 2."));
}

#[test]
fn superclass_must_be_a_class() {
    let outcome = run("var NotAClass = \"so sad\"; class C < NotAClass {}");

    assert!(outcome.had_runtime_error);
    assert!(outcome.err.contains("Superclass must be a class."));
}

// ─────────────────────────────────────────────────────────────────────────────
// Session behavior
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn globals_persist_across_runs() {
    let outcome = run_session(&["var a = 1;", "print a;"]);

    assert_eq!(outcome.out, "1\n");
    assert!(!outcome.had_error);
}

#[test]
fn flags_reset_between_runs() {
    let outcome = run_session(&["print nothing;", "print 2;"]);

    // The first line failed at runtime; the second ran clean.
    assert_eq!(outcome.out, "2\n");
    assert!(!outcome.had_error);
    assert!(!outcome.had_runtime_error);
}

#[test]
fn functions_defined_earlier_stay_callable() {
    let outcome = run_session(&[
        "fun max(x, y) { if (x > y) return x; return y; }",
        "print max(10, 20);",
        "print max(5, 4);",
    ]);

    assert_eq!(outcome.out, "20\n5\n");
}
