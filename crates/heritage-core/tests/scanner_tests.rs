use super::*;

/// Text starting at each offset, up to the end of the identifier.
fn names(text: &str, offsets: &[usize]) -> Vec<String> {
    offsets
        .iter()
        .map(|&offset| {
            text[offset..]
                .chars()
                .take_while(|&ch| is_identifier_part(ch))
                .collect()
        })
        .collect()
}

fn extends_name(text: &str) -> Option<String> {
    scan_heritage(text)
        .extends
        .map(|offset| names(text, &[offset]).remove(0))
}

#[test]
fn test_no_heritage() {
    let clauses = scan_heritage("class A {\n  foo() {}\n}");
    assert!(clauses.is_empty());
    assert!(clauses.extends_list.is_empty());
}

#[test]
fn test_simple_extends() {
    let text = "class A extends B {\n}";
    let clauses = scan_heritage(text);

    assert_eq!(clauses.extends, Some(16));
    assert_eq!(extends_name(text).as_deref(), Some("B"));
    assert!(clauses.implements.is_empty());
}

#[test]
fn test_extends_skips_type_parameter_constraints() {
    let text = "class A<T extends Comparable<T>> extends B {}";
    assert_eq!(extends_name(text).as_deref(), Some("B"));
}

#[test]
fn test_nested_generics_in_type_parameters() {
    let text = "class A<T extends Map<string, Array<T>>, U> extends Base<T> implements I<U> {}";
    let clauses = scan_heritage(text);

    assert_eq!(extends_name(text).as_deref(), Some("Base"));
    assert_eq!(names(text, &clauses.implements), vec!["I"]);
}

#[test]
fn test_implements_list() {
    let text = "class A implements I, J,K {\n}";
    let clauses = scan_heritage(text);

    assert_eq!(clauses.extends, None);
    assert_eq!(names(text, &clauses.implements), vec!["I", "J", "K"]);
}

#[test]
fn test_extends_and_implements() {
    let text = "export class A extends B implements I, J {}";
    let clauses = scan_heritage(text);

    assert_eq!(extends_name(text).as_deref(), Some("B"));
    assert_eq!(names(text, &clauses.implements), vec!["I", "J"]);
}

#[test]
fn test_commas_inside_type_arguments_do_not_split_list() {
    let text = "class A implements Mapper<string, number>, Other {}";
    let clauses = scan_heritage(text);

    assert_eq!(names(text, &clauses.implements), vec!["Mapper", "Other"]);
}

#[test]
fn test_interface_extends_list() {
    let text = "interface I extends A, B<string>, C {\n  bar(): void;\n}";
    let clauses = scan_heritage(text);

    assert_eq!(extends_name(text).as_deref(), Some("A"));
    assert_eq!(names(text, &clauses.extends_list), vec!["A", "B", "C"]);
}

#[test]
fn test_scanning_stops_at_body() {
    let text = "class A {\n  x: Foo extends Bar ? 1 : 2;\n}\nclass B implements I {}";
    assert!(scan_heritage(text).is_empty());
}

#[test]
fn test_braces_inside_type_parameters_do_not_stop_scanning() {
    let text = "class A<T extends { id: number }> extends B {}";
    assert_eq!(extends_name(text).as_deref(), Some("B"));
}

#[test]
fn test_arrow_inside_type_parameters() {
    let text = "class A<F extends () => void> extends B {}";
    assert_eq!(extends_name(text).as_deref(), Some("B"));
}

#[test]
fn test_keyword_must_be_a_whole_word() {
    let text = "class Aextends implements I {}";
    let clauses = scan_heritage(text);

    assert_eq!(clauses.extends, None);
    assert_eq!(names(text, &clauses.implements), vec!["I"]);
}

#[test]
fn test_keyword_followed_by_newline() {
    let text = "class A\n  extends\n    B {}";
    assert_eq!(extends_name(text).as_deref(), Some("B"));
}

#[test]
fn test_unbalanced_brackets_do_not_invent_clauses() {
    let clauses = scan_heritage("class A<T extends B {");
    assert!(clauses.is_empty());

    let clauses = scan_heritage("class A<T> extends");
    assert!(clauses.is_empty());
}

#[test]
fn test_missing_body_still_reports_clauses() {
    let text = "class A extends B";
    assert_eq!(extends_name(text).as_deref(), Some("B"));
}

#[test]
fn test_dollar_and_underscore_identifiers() {
    let text = "class A implements $Service, _Private {}";
    let clauses = scan_heritage(text);

    assert_eq!(names(text, &clauses.implements), vec!["$Service", "_Private"]);
}

#[test]
fn test_position_of_multiline_declaration() {
    let text = "class A\n    extends B {\n}";
    let clauses = scan_heritage(text);
    let line_map = LineMap::build(text);

    let position = position_of(
        &line_map,
        text,
        Position::new(7, 4),
        clauses.extends.unwrap(),
    );
    assert_eq!(position, Position::new(8, 12));
}

#[test]
fn test_position_of_first_line_is_shifted_by_origin_column() {
    let text = "class A extends B {}";
    let clauses = scan_heritage(text);
    let line_map = LineMap::build(text);

    let position = position_of(
        &line_map,
        text,
        Position::new(3, 2),
        clauses.extends.unwrap(),
    );
    assert_eq!(position, Position::new(3, 18));
}
