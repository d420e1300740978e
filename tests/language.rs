use std::fs;

use itchy::{
    config::{ConditionPolicy, Config},
    error::ErrorKind,
    evaluate, evaluate_with_config, Interpreter, Value,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn demo_programs_work() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "itchy")
                                      })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = expected_output(&content).unwrap_or_else(|| {
                                                    panic!("{path:?} has no `# expect:` header")
                                                });

        count += 1;
        match evaluate(&content) {
            Ok(value) => assert_eq!(value.to_string(), expected, "demo {path:?}"),
            Err(e) => panic!("Demo {path:?} failed:\n{content}\nError: {e}"),
        }
    }

    assert!(count > 0, "No demo programs found in demos/");
}

fn expected_output(content: &str) -> Option<&str> {
    content.lines()
           .find_map(|line| line.trim_start().strip_prefix("# expect:"))
           .map(str::trim)
}

fn assert_value(src: &str, expected: &str) {
    match evaluate(src) {
        Ok(value) => assert_eq!(value.to_string(), expected, "script: {src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match evaluate(src) {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail: {src}"),
        Err(e) => assert_eq!(e.kind(), kind, "script: {src}, error: {e}"),
    }
}

fn number(src: &str) -> f64 {
    match evaluate(src) {
        Ok(Value::Number(n)) => n,
        other => panic!("Expected a number from {src}, got {other:?}"),
    }
}

#[test]
fn evaluation_is_deterministic() {
    let src = "xs := [3, 1, 2]; i := 0; total := 0; while (i < #xs) { total := total * 10 + xs[i]; i := i + 1 }";
    assert_eq!(evaluate(src).unwrap(), evaluate(src).unwrap());
}

#[test]
fn blocks_return_their_last_value() {
    assert_value("{ 1; 2; 3 }", "3");
    assert_value("{ 1\n 2\n 3 }", "3");
    assert_value("{ 1 2 3 }", "3");
    assert_value("{}", "null");
    assert_value("", "null");
    assert_value("\n\n;;\n", "null");
}

#[test]
fn define_and_lookup() {
    assert_value("x := 7", "7");
    assert_value("x := 7; x", "7");
    assert_value("x := 7; { x }", "7");
    assert_value("a := b := 2; a + b", "4");
}

#[test]
fn swap_returns_the_old_value() {
    assert_value("x := 1; x =: 2", "1");
    assert_value("x := 1; x =: 2; x", "2");
    assert_failure("y =: 1", ErrorKind::Name);
}

#[test]
fn block_bindings_are_local() {
    assert_value("x := 1; { x := 2 }; x", "2");
    assert_failure("{ inner := 1 }; inner", ErrorKind::Name);
}

#[test]
fn closures_capture_by_reference() {
    assert_value("f := function() x; x := 1; a := f(); x := 2; b := f(); [a, b]", "[1, 2]");
    assert_value("x := 0; f := function() x; x := 1; a := f(); x := 2; b := f(); [a, b]",
                 "[1, 2]");
    assert_failure("f := function() x; f(); x := 1", ErrorKind::Name);
    assert_value(r"
        make_counter := function() {
            count := 0
            function() count := count + 1
        }
        counter := make_counter()
        counter(); counter(); counter()
    ",
                 "3");
}

#[test]
fn length_operator() {
    assert_value("#\"abc\"", "3");
    assert_value("#[1, 2, 3]", "3");
    assert_value("#[]", "0");
    assert_value("xs := [1, 2]; #xs + 1", "3");
    assert_failure("#5", ErrorKind::Type);
}

#[test]
fn hash_followed_by_space_is_a_comment() {
    assert_value("x := 4 # the answer is not 4\nx", "4");
}

#[test]
fn block_comments() {
    assert_value("\\* block\n comment *\\ 5", "5");
    assert_value("x := 1 \\* inline *\\ + 2; x", "3");
    assert_failure("\\* never closed", ErrorKind::Lex);
    assert_failure("/* not a comment */ 5", ErrorKind::Parse);
}

#[test]
fn spread_expands_lists() {
    assert_value("[1, ...[2, 3], 4]", "[1, 2, 3, 4]");
    assert_value("[...[], ...[]]", "[]");
    assert_value("add := function(a, b, c) a + b + c; args := [2, 3]; add(1, ...args)", "6");
    assert_failure("[...5]", ErrorKind::Type);
    assert_failure("...[1]", ErrorKind::Parse);
}

#[test]
fn logical_operators_short_circuit() {
    assert_value("false and (1 / 0)", "false");
    assert_value("true or (1 / 0)", "true");
    assert_value("true and 5", "5");
    assert_failure("1 or true", ErrorKind::Type);
}

#[test]
fn prime_sum() {
    assert_value(r"
        n := 10
        sieve := []
        i := 0
        while (i <= n) { sieve := [...sieve, true]; i := i + 1 }

        sum := 0
        p := 2
        while (p <= n) {
            if (sieve[p]) {
                sum := sum + p
                m := p * p
                while (m <= n) { sieve[m] := false; m := m + p }
            }
            p := p + 1
        }
        sum
    ",
                 "17");
}

#[test]
fn recursive_fibonacci() {
    assert_value("(fibonacci := function(n) if (n == 0 or n == 1) n else fibonacci(n-2) + fibonacci(n-1))(7) \
                  + fibonacci(11)",
                 "102");
}

#[test]
fn no_implicit_conversions() {
    assert_failure("1 + \"a\"", ErrorKind::Type);
    assert_failure("\"a\" < 1", ErrorKind::Type);
    assert_failure("-\"a\"", ErrorKind::Type);
    assert_value("1 == \"a\"", "false");
    assert_value("null != false", "true");
}

#[test]
fn while_returns_last_body_value() {
    assert_value("i := 0; while (i < 3) { i := i + 1; i * 10 }", "30");
    assert_value("while (false) 1", "null");
}

#[test]
fn conditions_must_be_booleans_by_default() {
    assert_failure("if (1) 2", ErrorKind::Type);
    assert_failure("while (null) 1", ErrorKind::Type);
    assert_failure("not 0", ErrorKind::Type);
}

#[test]
fn truthy_conditions_when_configured() {
    let config = Config::default().with_condition_policy(ConditionPolicy::Truthy);
    let run = |src: &str| evaluate_with_config(src, config).unwrap().to_string();

    assert_eq!(run("if (1) \"yes\" else \"no\""), "yes");
    assert_eq!(run("if (\"\") \"yes\" else \"no\""), "no");
    assert_eq!(run("if ([]) \"yes\" else \"no\""), "no");
    assert_eq!(run("not null"), "true");
    assert_eq!(run("0 or \"fallback\""), "fallback");
}

#[test]
fn arithmetic() {
    assert_value("2 + 2 * 2", "6");
    assert_value("(2 + 2) * 2", "8");
    assert_value("-1 + -2 + 3", "0");
    assert_value("2 ** 3 ** 2", "512");
    assert_value("-2 ** 2", "4");
    assert_value("7 // 2", "3");
    assert_value("-7 // 2", "-4");
    assert_value("7 % 3", "1");
    assert_value("1.25 + 8.75 + 2.5", "12.5");
    assert_value("0b1001011 + 0b10001", "92");
    assert_value("0xff + 0o17 + 0q13", "277");
    assert_failure("1 / 0", ErrorKind::Arithmetic);
    assert_failure("1 % 0", ErrorKind::Arithmetic);
}

#[test]
fn comparisons() {
    assert_value("1 < 2", "true");
    assert_value("2 <= 2", "true");
    assert_value("\"apple\" < \"banana\"", "true");
    assert_value("[1, [2]] == [1, [2]]", "true");
    assert_value("[1, 2] == [2, 1]", "false");
    assert_value("f := function() 1; f == f", "true");
    assert_value("(function() 1) == (function() 1)", "false");
}

#[test]
fn self_containing_lists_compare() {
    assert_value("xs := [1]; ys := [1]; xs[0] := xs; ys[0] := ys; xs == ys", "true");
    assert_value("xs := [1, 2]; xs[1] := xs; xs == xs", "true");
    assert_value("xs := [1, 2]; ys := [2, 2]; xs[1] := xs; ys[1] := ys; xs != ys", "true");
    assert_value("xs := [1]; xs[0] := xs; xs == [[1]]", "false");
}

#[test]
fn strings() {
    assert_value("\"foo\" + \"bar\"", "foobar");
    assert_value("[\"a\\\"b\"]", "[\"a\\\"b\"]");
    assert_value("s := \"hello\"; s[1]", "e");
    assert_value("s := \"hello\"; s[-1]", "o");
    assert_failure("s := \"hello\"; s[0] := \"j\"", ErrorKind::Type);
}

#[test]
fn list_indexing() {
    assert_value("b := [\"Alice\", \"Bob\", \"Eve\"]; b[1]", "Bob");
    assert_value("xs := [1, 4, 9, 16]; xs[2] + xs[3]", "25");
    assert_value("xs := [1, 2, 3]; xs[-1]", "3");
    assert_value("m := [[1, 2], [3, 4]]; m[1][0]", "3");
    assert_value("xs := [1, 2, 3]; ys := xs; ys[0] := 10; xs", "[10, 2, 3]");
    assert_value("xs := [1, 2] + [3]; xs", "[1, 2, 3]");
    assert_failure("[1, 2][2]", ErrorKind::Index);
    assert_failure("[1, 2][0.5]", ErrorKind::Type);
    assert_failure("5[0]", ErrorKind::Type);
}

#[test]
fn assignment_inside_index() {
    assert_value(r"
        m := [[0, 1, 2], [3], [], [4, 5, 6, 7], [8, 9]]
        a := []
        i := -1
        while (i < 4) a := [...a, ...m[i := i + 1]]
    ",
                 "[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]");
}

#[test]
fn destructuring() {
    assert_value("[a, b, c] := [1, 2, 3]; a + b * c", "7");
    assert_value("[a, b, c, d, e] := [1, 4, 9, 16, 25]; e - d - c + b - a", "3");
    assert_value("[a, b] := \"cd\"; a", "c");
    assert_value(r"
        aa := [1, 1, 2, 3, 4, 5, 2, 3]
        cd := ([a, ...[...b, c], d, e] := aa)
        b
    ",
                 "[1, 2, 3, 4]");
    assert_failure("[a, ...b, ...c] := [1]", ErrorKind::Parse);
}

#[test]
fn swapping_patterns() {
    assert_value("a := 1; b := 2; [a, b] =: [3, 4]", "[1, 2]");
    assert_value("a := 1; b := 2; [a, b] =: [3, 4]; [a, b]", "[3, 4]");
    assert_value("a := 1; b := 2; [a, b] =: [b, a]; [a, b]", "[2, 1]");
    assert_failure("[a, b] =: [1, 2]", ErrorKind::Name);
}

#[test]
fn chained_comparisons() {
    assert_value("1 < 2 < 3", "true");
    assert_value("1 < 3 < 2", "false");
    assert_value("i := 5; 0 <= i < 10", "true");
    assert_value("1 == 1 == 1", "true");
    assert_value("1 == 1 != 2", "true");
    assert_value("1 < 2 == 2 < 3", "true");
    assert_failure("3 > 1 > undefined_name", ErrorKind::Name);
}

#[test]
fn comparison_chains_evaluate_each_operand_once() {
    assert_value("n := 0; tick := function() n := n + 1; 0 < tick() < 5; n", "1");
    assert_value("n := 0; tick := function() n := n + 1; 5 < 1 < tick(); n", "0");
    assert_failure("1 < 2 < \"a\"", ErrorKind::Type);
}

#[test]
fn unary_plus() {
    assert_value("+5", "5");
    assert_value("x := -2; +x", "-2");
    assert_value("1 + +2", "3");
    assert_failure("+\"a\"", ErrorKind::Type);
    assert_failure("+[1]", ErrorKind::Type);
}

#[test]
fn bit_shifts() {
    assert_value("1 << 10", "1024");
    assert_value("3 << 2 >> 1", "6");
    assert_value("-5 >> 1", "-3");
    assert_value("1 >> 100", "0");
    assert_value("0 << 100", "0");
    assert_value("1 << 2 + 1", "8");
    assert_value("1 << 3 < 9", "true");
    assert_failure("1 << -1", ErrorKind::Arithmetic);
    assert_failure("1 << 60", ErrorKind::Arithmetic);
    assert_failure("1.5 << 1", ErrorKind::Type);
    assert_failure("\"a\" >> 1", ErrorKind::Type);
}

#[test]
fn functions() {
    assert_value("square := function(x) x * x; square(3)", "9");
    assert_value("(function() 42)()", "42");
    assert_value("f := function(a, b,) a - b; f(5, 3,)", "2");
    assert_value("function(a, b) a", "<function(a, b)>");
    assert_failure("f := function(a) a; f(1, 2)", ErrorKind::Arity);
    assert_failure("f := function(a, b) a; f(...[1])", ErrorKind::Arity);
    assert_failure("5(1)", ErrorKind::Type);
}

#[test]
fn functional_helpers() {
    let prelude = r"
        map := function(func, iter) {
            i := -1;
            a := [];
            while ((i := i + 1) < #iter) a := [...a, func(iter[i])];
        }
        filter := function(func, iter) {
            i := -1;
            a := [];
            while ((i := i + 1) < #iter) if (func(iter[i])) a := [...a, iter[i]];
            a;
        }
        reduce := function(func, iter, start) {
            result := start;
            i := -1;
            while ((i := i + 1) < #iter) result := func(result, iter[i]);
            result;
        }
    ";
    let mut interpreter = Interpreter::default();
    interpreter.execute(prelude).unwrap();
    let mut run = |src: &str| interpreter.execute(src).unwrap().to_string();

    assert_eq!(run("map(function(x) x ** 2, [1, 0, -3, -5, 6])"), "[1, 0, 9, 25, 36]");
    assert_eq!(run("filter(function(x) x > 0, [3, -1, 0, 4])"), "[3, 4]");
    assert_eq!(run("reduce(function(acc, x) acc + x ** 2, [3, -1, -3, 0, 4, 6, -3], 0)"), "80");
    assert_eq!(run("sum := function(iter, start) reduce(function (x, y) x + y, iter, start)
                    sum([-1, 0, 2, 5, 7.5, 2.5, -3.5, -0.25, 3/4], 0)"),
               "13");
}

#[test]
fn sine_series() {
    let value = number(r"
        PI := 3.1415926535897932384626433832795028841971

        sin := function(x) {
            # shift value to [0; PI]
            while (x > PI) x := x - PI;
            while (x < 0) x := x + PI;

            # reduce to [0; PI/2]
            if (x > PI / 2) x := PI - x;

            sum := 0;
            value := x;
            k := 0;

            while (k < 15) {
                sum := sum + value;
                k := k + 1;
                value := -value * x ** 2 / ((2 * k) * (2 * k + 1));
            }

            sum;
        }

        sin(PI / 6);
    ");

    assert!((value - 0.5).abs() < 1e-12, "sin(pi / 6) = {value}");
}

#[test]
fn recursion_limit() {
    let config = Config::default().with_max_call_depth(Some(50));
    let src = "f := function(n) if (n == 0) 0 else 1 + f(n - 1); f(100)";

    let error = evaluate_with_config(src, config).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Resource);

    let unlimited = Config::default().with_max_call_depth(None);
    assert_eq!(evaluate_with_config(src, unlimited).unwrap().to_string(), "100");
}

#[test]
fn deep_recursion_within_the_default_limit() {
    assert_value("f := function(n) if (n == 0) 0 else 1 + f(n - 1); f(5000)", "5000");
    assert_failure("f := function() f(); f()", ErrorKind::Resource);
}

#[test]
fn interpreter_session_keeps_globals() {
    let mut interpreter = Interpreter::new(Config::default());
    interpreter.execute("total := 10").unwrap();
    interpreter.execute("add := function(n) total := total + n").unwrap();
    interpreter.execute("add(5)").unwrap();

    assert_eq!(interpreter.execute("total").unwrap(), Value::Number(15.0));

    interpreter.clear();
    assert_eq!(interpreter.result(), None);
    assert_eq!(interpreter.execute("total").unwrap_err().kind(), ErrorKind::Name);
}

#[test]
fn errors_report_positions() {
    let error = evaluate("x := 1\ny + x").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Name);
    assert_eq!(error.to_string(), "Error on line 2, column 1: Unknown variable `y`.");

    let error = evaluate("\"open").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Lex);

    let error = evaluate("1 +").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);

    let error = evaluate("1 := 2").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn printed_values() {
    assert_value("3.0", "3");
    assert_value("0.25 + 0.5", "0.75");
    assert_value("-0", "0");
    assert_value("[null, true, \"s\", [1.5]]", "[null, true, \"s\", [1.5]]");
    assert_value("\"top level\"", "top level");
}
