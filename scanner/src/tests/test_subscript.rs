use super::notation::t;
use crate::{current_dict, current_dict_key};

#[test]
fn test_dict_key_simple() {
    t("asdf|").expect(current_dict_key);
    t("asdf[<>|").expect(current_dict_key);
    t("asdf[<>|]").expect(current_dict_key);
    t("object.dict[<abc|>").expect(current_dict_key);
    t("object.dict[<ab|c>]").expect(current_dict_key);
}

#[test]
fn test_dict_key_keeps_nested_expressions_whole() {
    t("asdf[<(>|]").expect(current_dict_key);
    t("asdf[<(1>|]").expect(current_dict_key);
    t("asdf[<(1,>|]").expect(current_dict_key);
    t("asdf[<(1, >|]").expect(current_dict_key);
    t("asdf[<(1, 2)>|]").expect(current_dict_key);
    t(r#"d[<"ke|y">]"#).expect(current_dict_key);
    t(r#"d[<"a]b|">]"#).expect(current_dict_key);
}

#[test]
fn test_dict_key_nested_subscript() {
    t("d[d[<12|>").expect(current_dict_key);
    t("d[<[1, 2|>").expect(current_dict_key);
}

#[test]
fn test_dict_key_not_a_subscript() {
    t("x = [1, 2|").expect(current_dict_key);
    t("d[1]|").expect(current_dict_key);
    t("d [1|").expect(current_dict_key);
    t("obj.[1|").expect(current_dict_key);
    t("d[1)|").expect(current_dict_key);
    t("d[1  # comm|ent").expect(current_dict_key);
    t("stuff[stuff] + {123: 456|").expect(current_dict_key);
}

#[test]
fn test_dict() {
    t("asdf|").expect(current_dict);
    t("<asdf>[|").expect(current_dict);
    t("<asdf>[|]").expect(current_dict);
    t("<object.dict>[abc|").expect(current_dict);
    t("d[<d>[12|").expect(current_dict);
    t("<d>[[1, 2|").expect(current_dict);
    t("[1, 2][0|").expect(current_dict);
}
