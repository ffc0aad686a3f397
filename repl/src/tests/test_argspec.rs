use super::dsl::{cursor, foo_namespace, init_tracing, resolver};
use crate::{
    ActiveParameter, BoundParam, CallableResolver, Namespace, Param, ResolveError, Signature,
    get_argspec, help,
};

fn argspec_at(notation: &str, resolver: &dyn CallableResolver) -> Option<crate::ArgspecResult> {
    init_tracing();
    let (cursor, line) = cursor(notation);
    get_argspec(cursor, &line, resolver)
}

#[test]
fn test_keyword_argument() {
    let r = resolver().sig("spam", &["a", "b"]);
    let argspec = argspec_at("spam(a=0|", &r).unwrap();
    assert_eq!(argspec.function_name, "spam");
    assert_eq!(
        argspec.active_parameter,
        Some(ActiveParameter::Keyword("a".to_string()))
    );
    assert_eq!(argspec.render(), "spam([a], b)");
}

#[test]
fn test_lambda_argument_counts_once() {
    let r = resolver().sig("spam", &["f", "g"]);
    let argspec = argspec_at("spam(lambda a, b: 1, |", &r).unwrap();
    assert_eq!(argspec.active_parameter, Some(ActiveParameter::Positional(1)));
    assert_eq!(argspec.render(), "spam(f, [g])");
}

#[test]
fn test_malformed_bracketing_asks_nothing() {
    let r = resolver().sig("spam", &["a"]);
    for notation in ["spam(]|", "spam([)|", "spam())|"] {
        assert_eq!(argspec_at(notation, &r), None, "{notation}");
    }
    assert!(r.calls().is_empty());
}

#[test]
fn test_innermost_call_wins() {
    let ns = Namespace::with_builtins();

    let argspec = argspec_at("spam(map([]|", &ns).unwrap();
    assert_eq!(argspec.function_name, "map");
    assert!(argspec.is_bound_method);
    assert_eq!(argspec.render(), "map([func], *iterables)");

    let argspec = argspec_at("(x,range(|", &ns).unwrap();
    assert_eq!(argspec.function_name, "range");

    let argspec = argspec_at("foo(1, 2, x,range(|", &ns).unwrap();
    assert_eq!(argspec.function_name, "range");
    assert_eq!(argspec.callee.start, 12);
}

#[test]
fn test_unknown_keyword_goes_to_varkw() {
    let r = resolver().sig("spam", &["a", "b", "**kw"]);
    let argspec = argspec_at("spam(1, c=2|", &r).unwrap();
    assert_eq!(
        argspec.active_parameter,
        Some(ActiveParameter::Keyword("c".to_string()))
    );
    assert_eq!(argspec.bound_param(), Some(BoundParam::VarKeywords("kw")));
    assert_eq!(argspec.render(), "spam(a, b, [**kw])");
}

#[test]
fn test_unknown_keyword_without_varkw_marks_nothing() {
    let r = resolver().sig("spam", &["a", "b"]);
    let argspec = argspec_at("spam(1, c=2|", &r).unwrap();
    assert_eq!(argspec.bound_param(), None);
    assert_eq!(argspec.render(), "spam(a, b)");
}

#[test]
fn test_position_after_keyword_is_unknown() {
    let r = resolver().sig("spam", &["a", "b"]);
    let argspec = argspec_at("spam(a=1, |", &r).unwrap();
    assert_eq!(argspec.active_parameter, None);
    assert_eq!(argspec.render(), "spam(a, b)");
}

#[test]
fn test_resolver_failures_mean_no_argspec() {
    let r = resolver()
        .fails(
            "broken",
            ResolveError::Failed {
                name: "broken".to_string(),
                reason: "evaluation raised".to_string(),
            },
        )
        .fails("module", ResolveError::NotCallable("module".to_string()));

    assert_eq!(argspec_at("nonexistent(|", &r), None);
    assert_eq!(argspec_at("broken(1|", &r), None);
    assert_eq!(argspec_at("module(|", &r), None);
    assert_eq!(r.calls(), ["nonexistent", "broken", "module"]);
}

#[test]
fn test_panicking_resolver_is_contained() {
    let r = resolver().panics("boom", "resolver blew up");
    assert_eq!(argspec_at("boom(1, |", &r), None);
    assert_eq!(r.calls(), ["boom"]);
}

#[test]
fn test_no_call_asks_nothing() {
    let r = resolver();
    assert_eq!(argspec_at("x = 1|", &r), None);
    assert_eq!(argspec_at("|", &r), None);
    assert!(r.calls().is_empty());
}

#[test]
fn test_dotted_callee_is_passed_whole() {
    let r = resolver().method("obj.method", &["self", "x", "y"]);
    let argspec = argspec_at("obj.method(1, |", &r).unwrap();
    assert_eq!(r.calls(), ["obj.method"]);
    assert_eq!(argspec.callee.text, "obj.method");
    assert!(argspec.is_bound_method);
    assert_eq!(argspec.bound_param(), Some(BoundParam::Param(&Param::new("y"))));
    assert_eq!(argspec.render(), "method(x, [y])");
}

#[test]
fn test_namespace_binds_methods_through_instances() {
    let ns = foo_namespace();

    let argspec = argspec_at("obj.bar(|", &ns).unwrap();
    assert!(argspec.is_bound_method);
    assert_eq!(argspec.render(), "bar([n])");

    let argspec = argspec_at("Foo.bar(|", &ns).unwrap();
    assert!(!argspec.is_bound_method);
    assert_eq!(argspec.render(), "bar([self], n)");

    let argspec = argspec_at("Foo(1, |", &ns).unwrap();
    assert_eq!(argspec.function_name, "Foo");
    assert_eq!(argspec.render(), "Foo(x, [y=2])");
}

#[test]
fn test_namespace_errors() {
    let ns = foo_namespace();
    assert_eq!(
        ns.resolve("os"),
        Err(ResolveError::NotCallable("os".to_string()))
    );
    assert_eq!(
        ns.resolve("obj"),
        Err(ResolveError::NotCallable("obj".to_string()))
    );
    assert_eq!(
        ns.resolve("Foo.missing"),
        Err(ResolveError::NotFound("Foo.missing".to_string()))
    );
}

#[test]
fn test_varargs_and_keyword_only() {
    let ns = Namespace::with_builtins();

    let argspec = argspec_at("print(1, 2|", &ns).unwrap();
    assert_eq!(argspec.bound_param(), Some(BoundParam::VarArgs("values")));
    assert_eq!(
        argspec.render(),
        "print([*values], sep=' ', end='\\n', file=None, flush=False)"
    );

    let argspec = argspec_at("sorted(xs, key=|", &ns).unwrap();
    assert_eq!(
        argspec.render(),
        "sorted(iterable, *, [key=None], reverse=False)"
    );
}

#[test]
fn test_too_many_positionals_mark_nothing() {
    let ns = Namespace::with_builtins();
    let argspec = argspec_at("abs(1, 2|", &ns).unwrap();
    assert_eq!(argspec.active_parameter, Some(ActiveParameter::Positional(1)));
    assert_eq!(argspec.bound_param(), None);
    assert_eq!(argspec.render(), "abs(x)");
}

#[test]
fn test_closure_resolver() {
    let lookup = |name: &str| -> Result<Signature, ResolveError> {
        match name {
            "f" => Ok(Signature::new("f").params(["a", "b"])),
            _ => Err(ResolveError::NotFound(name.to_string())),
        }
    };
    let argspec = argspec_at("f(1, |", &lookup).unwrap();
    assert_eq!(argspec.render(), "f(a, [b])");
    assert_eq!(argspec_at("g(|", &lookup), None);
}

#[test]
fn test_unnamed_signature_takes_callee_name() {
    let lookup = |_: &str| -> Result<Signature, ResolveError> { Ok(Signature::default()) };
    let argspec = argspec_at("os.path.join(|", &lookup).unwrap();
    assert_eq!(argspec.function_name, "join");
    assert_eq!(argspec.render(), "join()");
}

#[test]
fn test_help() {
    let ns = foo_namespace();
    let (cursor, line) = cursor("obj.bar(n|");
    let result = help(&line, cursor, &ns);
    assert_eq!(result.context.cursor, cursor);
    assert_eq!(result.context.word.as_ref().map(|w| w.text.as_str()), Some("n"));
    assert_eq!(result.argspec.map(|a| a.render()), Some("bar([n])".to_string()));
}
