use super::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn span(s: &str) -> Span {
    Span::new_extra(s, "")
}

fn scalar(s: &str) -> Scalar {
    let (rest, scalar) = parse_scalar(span(s)).unwrap();
    assert_eq!(*rest.fragment(), "", "unconsumed input for {s}");
    scalar
}

fn failure_context(result: IResult<Span, impl std::fmt::Debug>) -> (String, Position) {
    match result {
        Err(nom::Err::Failure(e)) => (e.context.clone(), e.position()),
        other => panic!("expected a failure, got {other:?}"),
    }
}

fn int(negative: bool, digits: &str, radix: u32) -> Scalar {
    Scalar::Int {
        negative,
        digits: digits.to_string(),
        radix,
    }
}

#[test]
fn test_parse_string() {
    let (rest, value) = parse_string(span("\"Hi there\"")).unwrap();
    assert_eq!(*rest.fragment(), "");
    assert_eq!(value, Scalar::Str(b"Hi there".to_vec()));

    // single quotes, embedded double quotes
    assert_eq!(scalar(r#"'"Hi"'"#), Scalar::Str(br#""Hi""#.to_vec()));
}

#[test]
fn test_adjacent_strings_concatenate() {
    assert_eq!(
        scalar("\"abc\" 'def'\n  # between\n  \"ghi\""),
        Scalar::Str(b"abcdefghi".to_vec())
    );
}

#[rstest]
#[case(r#""\x41\101\n\t""#, vec![0x41, 0x41, b'\n', b'\t'])]
#[case(r#""é""#, "é".as_bytes().to_vec())]
#[case(r#""😀""#, "😀".as_bytes().to_vec())]
#[case(r#""\U0001F600""#, "😀".as_bytes().to_vec())]
#[case(r#""\377\0""#, vec![0xff, 0x00])]
#[case(r#""a\"b\'c\\d\?""#, br#"a"b'c\d?"#.to_vec())]
#[case(r#""\a\b\f\v\r""#, vec![0x07, 0x08, 0x0c, 0x0b, b'\r'])]
fn test_string_escapes(#[case] literal: &str, #[case] expected: Vec<u8>) {
    assert_eq!(scalar(literal), Scalar::Str(expected));
}

#[rstest]
#[case(r#""\q""#, 2)]
#[case(r#""ok\ud83d""#, 4)]
#[case(r#""\u12""#, 2)]
fn test_invalid_escapes_point_at_the_backslash(#[case] literal: &str, #[case] column: usize) {
    let (context, position) = failure_context(parse_string(span(literal)));
    assert!(context.contains("escape"), "{context}");
    assert_eq!(position, Position { line: 1, column });
}

#[test]
fn test_unterminated_string() {
    let (context, _) = failure_context(parse_string(span("\"abc")));
    assert_eq!(context, "unterminated string literal");

    let (context, _) = failure_context(parse_string(span("\"abc\ndef\"")));
    assert_eq!(context, "newline inside string literal");
}

#[rstest]
#[case("-124", int(true, "124", 10))]
#[case("- 5", int(true, "5", 10))]
#[case("12670090", int(false, "12670090", 10))]
#[case("0x1F", int(false, "1F", 16))]
#[case("0X7fffffff", int(false, "7fffffff", 16))]
#[case("017", int(false, "17", 8))]
#[case("0", int(false, "0", 8))]
#[case("18446744073709551615", int(false, "18446744073709551615", 10))]
#[case("1.5", Scalar::Float(1.5))]
#[case(".5", Scalar::Float(0.5))]
#[case("5.", Scalar::Float(5.0))]
#[case("1e3", Scalar::Float(1000.0))]
#[case("-2.5e-3", Scalar::Float(-0.0025))]
#[case("2.5f", Scalar::Float(2.5))]
#[case("-inf", Scalar::Float(f64::NEG_INFINITY))]
#[case("Infinity", Scalar::Float(f64::INFINITY))]
fn test_parse_number(#[case] literal: &str, #[case] expected: Scalar) {
    assert_eq!(scalar(literal), expected);
}

#[test]
fn test_nan() {
    match scalar("nan") {
        Scalar::Float(f) => assert!(f.is_nan()),
        other => panic!("expected NaN, got {other:?}"),
    }
}

#[rstest]
#[case("12abc")]
#[case("09")]
#[case("1.5.2")]
fn test_malformed_numbers(#[case] literal: &str) {
    let (context, _) = failure_context(parse_scalar(span(literal)));
    assert!(context.contains("invalid numeric literal"), "{context}");
}

#[rstest]
#[case("true")]
#[case("NULL_VALUE")]
#[case("INT64")]
#[case("information")]
#[case("_private")]
fn test_identifiers(#[case] ident: &str) {
    assert_eq!(scalar(ident), Scalar::Ident(ident.to_string()));
}

#[test]
fn test_parse_document() {
    let text = r#"# header comment
name: "basic"
section {
  name: "s" # trailing
  test < name: "t", expr: '1'; >
}
values: [1, -2, { a: 1 }]
"#;
    let (rest, fields) = parse_document(span(text)).unwrap();
    assert_eq!(*rest.fragment(), "");
    assert_eq!(fields.len(), 3);

    assert_eq!(fields[0].name, FieldName::Ident("name".to_string()));
    assert_eq!(fields[0].position, Position { line: 2, column: 1 });
    assert!(matches!(
        &fields[0].value,
        TextValue::Scalar(Scalar::Str(s), Position { line: 2, column: 7 }) if s == b"basic"
    ));

    let section = match &fields[1].value {
        TextValue::Message(section, position) => {
            assert_eq!(*position, Position { line: 3, column: 9 });
            section
        }
        other => panic!("expected a message, got {other:?}"),
    };
    assert_eq!(section.len(), 2);
    assert_eq!(section[1].name, FieldName::Ident("test".to_string()));
    assert_eq!(section[1].position, Position { line: 5, column: 3 });
    match &section[1].value {
        TextValue::Message(test, _) => {
            assert_eq!(test.len(), 2);
            assert_eq!(
                test[1].value,
                TextValue::Scalar(Scalar::Str(b"1".to_vec()), Position { line: 5, column: 27 })
            );
        }
        other => panic!("expected a message, got {other:?}"),
    }

    match &fields[2].value {
        TextValue::List(values, _) => {
            assert_eq!(values.len(), 3);
            assert!(matches!(&values[1], TextValue::Scalar(Scalar::Int { negative: true, .. }, _)));
            assert!(matches!(&values[2], TextValue::Message(fields, _) if fields.len() == 1));
        }
        other => panic!("expected a list, got {other:?}"),
    }
}

#[test]
fn test_empty_document() {
    let (_, fields) = parse_document(span("  # only a comment\n")).unwrap();
    assert!(fields.is_empty());

    let (_, fields) = parse_document(span("")).unwrap();
    assert!(fields.is_empty());
}

#[test]
fn test_expanded_any_name() {
    let text = "object_value { [type.googleapis.com/cel.expr.Value] { int64_value: 1 } }";
    let (_, fields) = parse_document(span(text)).unwrap();
    match &fields[0].value {
        TextValue::Message(inner, _) => assert_eq!(
            inner[0].name,
            FieldName::Expanded("type.googleapis.com/cel.expr.Value".to_string())
        ),
        other => panic!("expected a message, got {other:?}"),
    }
}

#[test]
fn test_scalar_requires_colon() {
    let (context, position) = failure_context(parse_document(span("name \"x\"")));
    assert_eq!(context, "message value");
    assert_eq!(position, Position { line: 1, column: 6 });
}

#[rstest]
#[case("section { name: \"x\"", "closing brace")]
#[case("values: [1,]", "closing bracket")]
#[case("value: 12abc", "invalid numeric literal")]
fn test_syntax_failures(#[case] text: &str, #[case] expected: &str) {
    let (context, _) = failure_context(parse_document(span(text)));
    assert!(context.contains(expected), "{context}");
}

#[test]
fn test_trailing_content_is_reported_where_it_starts() {
    match parse_document(span("name: \"a\" }")) {
        Err(nom::Err::Error(e)) => {
            assert_eq!(e.kind, ErrorKind::Eof);
            assert_eq!(e.position(), Position { line: 1, column: 11 });
        }
        other => panic!("expected an error, got {other:?}"),
    }
}

#[test]
fn test_message_nesting_is_limited() {
    let nested = |open: &str, close: &str, levels: usize| {
        format!("{}{}", format!("type {open} ").repeat(levels), close.repeat(levels))
    };

    let text = nested("{", "}", MAX_NESTING_DEPTH);
    let (_, fields) = parse_document(span(&text)).unwrap();
    assert_eq!(fields.len(), 1);

    let text = nested("<", ">", MAX_NESTING_DEPTH + 1);
    let (context, position) = failure_context(parse_document(span(&text)));
    assert_eq!(context, "message nesting exceeds 100");
    assert_eq!(position, Position { line: 1, column: 706 });
}

#[test]
fn test_list_elements_count_towards_nesting() {
    let text = format!(
        "{}values: [{{}}]{}",
        "type { ".repeat(MAX_NESTING_DEPTH),
        "}".repeat(MAX_NESTING_DEPTH)
    );
    let (context, _) = failure_context(parse_document(span(&text)));
    assert_eq!(context, "message nesting exceeds 100");
}
