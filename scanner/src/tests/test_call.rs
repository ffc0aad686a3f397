use super::notation::init_tracing;
use crate::{ActiveParameter, CallSite, locate_call};

fn call(line: &str) -> Option<CallSite> {
    init_tracing();
    locate_call(line.len(), line)
}

fn callee(line: &str) -> Option<String> {
    call(line).map(|site| site.callee.text)
}

fn active(line: &str) -> Option<ActiveParameter> {
    call(line)
        .unwrap_or_else(|| panic!("no call located in {line:?}"))
        .active
}

fn positional(n: usize) -> Option<ActiveParameter> {
    Some(ActiveParameter::Positional(n))
}

fn keyword(name: &str) -> Option<ActiveParameter> {
    Some(ActiveParameter::Keyword(name.to_string()))
}

#[test]
fn test_simple_call() {
    let site = call("spam(").unwrap();
    assert_eq!(site.callee.text, "spam");
    assert_eq!((site.callee.start, site.callee.end), (0, 4));
    assert_eq!(site.open_paren, 4);
    assert_eq!(site.active, positional(0));
}

#[test]
fn test_positional_index() {
    assert_eq!(active("spam(1, "), positional(1));
    assert_eq!(active("spam(1, 2, 3"), positional(2));
    assert_eq!(active("spam((), "), positional(1));
    assert_eq!(active("spam(1, (2, 3), [4, 5], {6: 7}, "), positional(4));
    assert_eq!(active(r#"spam("a, b", "#), positional(1));
    assert_eq!(active("spam(x == 1"), positional(0));
    assert_eq!(active("spam(x <= 1, "), positional(1));
}

#[test]
fn test_keyword_argument() {
    assert_eq!(active("spam(a=0"), keyword("a"));
    assert_eq!(active("spam(1, b = "), keyword("b"));
    assert_eq!(active("spam(a=0, "), None);
    assert_eq!(active("spam(a.b=0"), None);
}

#[test]
fn test_lambda_argument() {
    assert_eq!(active("spam(lambda a, b: 1, "), positional(1));
    assert_eq!(active("spam(lambda a, b: 1"), positional(0));
    assert_eq!(active("spam(lambda a, b"), None);
    assert_eq!(active("spam(lambda: 1, "), positional(1));
    assert_eq!(callee("f = lambda x: g("), Some("g".to_string()));
}

#[test]
fn test_malformed_bracketing() {
    assert_eq!(call("spam(]"), None);
    assert_eq!(call("spam([)"), None);
    assert_eq!(call("spam())"), None);
    assert_eq!(call("spam(lambda x: x])"), None);
}

#[test]
fn test_innermost_call() {
    assert_eq!(callee("f(g(1), h("), Some("h".to_string()));
    assert_eq!(callee("f(g(1), "), Some("f".to_string()));
    assert_eq!(active("f(g(1), "), positional(1));
    assert_eq!(callee("x=range("), Some("range".to_string()));
    assert_eq!(callee("{x:range("), Some("range".to_string()));
    assert_eq!(callee("os.path.join(a, "), Some("os.path.join".to_string()));
}

#[test]
fn test_collections_inside_call() {
    assert_eq!(callee("spam([1, 2"), Some("spam".to_string()));
    assert_eq!(active("spam([1, 2"), positional(0));
    assert_eq!(active("spam(1, (2"), positional(1));
    assert_eq!(active("spam(1, {'a': lambda x"), positional(1));
}

#[test]
fn test_no_callee() {
    assert_eq!(call(""), None);
    assert_eq!(call("spam"), None);
    assert_eq!(call("spam()"), None);
    assert_eq!(call("spam ("), None);
    assert_eq!(call("(1, "), None);
    assert_eq!(call("f().g("), None);
    assert_eq!(call("if ("), None);
    assert_eq!(call("1("), None);
}

#[test]
fn test_cursor_before_line_end() {
    let line = "spam(1, 2)";
    let site = locate_call(5, line).unwrap();
    assert_eq!(site.callee.text, "spam");
    assert_eq!(site.active, positional(0));
    assert_eq!(locate_call(8, line).unwrap().active, positional(1));
    assert_eq!(locate_call(10, line), None);
    assert_eq!(locate_call(11, line), None);
}
