// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Formatter;

use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_till, take_while1};
use nom::character::complete::{
    alpha1, alphanumeric1, char, digit0, digit1, hex_digit1, multispace1, oct_digit0, one_of,
    satisfy,
};
use nom::combinator::{all_consuming, cut, map, not, opt, peek, recognize, value};
use nom::error::{context, ContextError, ErrorKind, ParseError};
use nom::multi::{many0, separated_list0};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::InputTake;
use nom_locate::LocatedSpan;

pub(crate) type Span<'a> = LocatedSpan<&'a str, &'a str>;

#[derive(Clone, PartialEq, Debug)]
pub(crate) struct ParserError<'a> {
    pub(crate) context: String,
    pub(crate) span: Span<'a>,
    pub(crate) kind: ErrorKind,
}

pub(crate) type IResult<'a, I, O> = nom::IResult<I, O, ParserError<'a>>;

impl<'a> ParserError<'a> {
    fn failure(span: Span<'a>, context: impl Into<String>) -> nom::Err<Self> {
        nom::Err::Failure(ParserError {
            context: context.into(),
            span,
            kind: ErrorKind::Verify,
        })
    }

    pub(crate) fn position(&self) -> Position {
        Position::of(&self.span)
    }
}

impl<'a> ParseError<Span<'a>> for ParserError<'a> {
    fn from_error_kind(input: Span<'a>, kind: ErrorKind) -> Self {
        ParserError {
            context: "".to_string(),
            span: input,
            kind,
        }
    }

    fn append(_input: Span<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> ContextError<Span<'a>> for ParserError<'a> {
    //
    // keeps the innermost span, the outer contexts only extend the description. Failures
    // raised through `ParserError::failure` already describe themselves and stay as they are,
    // otherwise every enclosing message would add its own prefix.
    //
    fn add_context(_input: Span<'a>, ctx: &'static str, other: Self) -> Self {
        if other.kind == ErrorKind::Verify {
            return other;
        }
        let context = if other.context.is_empty() {
            ctx.to_string()
        } else {
            format!("{}/{}", ctx, other.context)
        };

        ParserError {
            context,
            span: other.span,
            kind: other.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) line: u32,
    pub(crate) column: usize,
}

impl Position {
    fn of(span: &Span) -> Self {
        Position {
            line: span.location_line(),
            column: span.get_utf8_column(),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scalar {
    Str(Vec<u8>),
    Ident(String),
    Int {
        negative: bool,
        digits: String,
        radix: u32,
    },
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldName {
    Ident(String),
    /// `[type.googleapis.com/pkg.Message]`, only meaningful inside an Any
    Expanded(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TextValue {
    Scalar(Scalar, Position),
    Message(Vec<TextField>, Position),
    List(Vec<TextValue>, Position),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextField {
    pub(crate) name: FieldName,
    pub(crate) position: Position,
    pub(crate) value: TextValue,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                                                                //
//                         HELPER METHODS                                                         //
//                                                                                                //
////////////////////////////////////////////////////////////////////////////////////////////////////

fn comment(input: Span) -> IResult<Span, Span> {
    preceded(char('#'), take_till(|c| c == '\n'))(input)
}

//
// *(LWSP / comment), never errors out
//
pub(crate) fn zero_or_more_ws_or_comment(input: Span) -> IResult<Span, ()> {
    value((), many0(alt((multispace1, comment))))(input)
}

fn white_space(ch: char) -> impl Fn(Span) -> IResult<Span, char> {
    move |input: Span| preceded(zero_or_more_ws_or_comment, char(ch))(input)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn identifier(input: Span) -> IResult<Span, Span> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                                                                //
//                          Scalar Parsing Routines                                               //
//                                                                                                //
////////////////////////////////////////////////////////////////////////////////////////////////////

fn hex_value(digits: &str) -> u32 {
    digits
        .chars()
        .fold(0, |acc, c| acc * 16 + c.to_digit(16).unwrap_or(0))
}

fn push_code_point<'a>(
    bytes: &mut Vec<u8>,
    code: u32,
    at: Span<'a>,
) -> Result<(), nom::Err<ParserError<'a>>> {
    match char::from_u32(code) {
        Some(c) => {
            let mut buffer = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
            Ok(())
        }
        None => Err(ParserError::failure(
            at,
            format!("invalid Unicode code point {code:#x} in string escape"),
        )),
    }
}

//
// Reads exactly `count` hex digits
//
fn fixed_hex<'a>(
    rest: &str,
    count: usize,
    at: Span<'a>,
) -> Result<u32, nom::Err<ParserError<'a>>> {
    let digits: String = rest.chars().take(count).collect();
    if digits.len() != count || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParserError::failure(
            at,
            format!("expected {count} hex digits in string escape"),
        ));
    }
    Ok(hex_value(&digits))
}

///
/// One quoted literal with C style escapes. The result is raw bytes since octal and hex
/// escapes may produce sequences that are not UTF-8; string fields validate later.
///
fn quoted_literal(input: Span) -> IResult<Span, Vec<u8>> {
    let (body, quote) = one_of("\"'")(input)?;
    let text = *body.fragment();
    let mut bytes = Vec::with_capacity(text.len());
    let mut index = 0;

    while index < text.len() {
        let rest = &text[index..];
        let c = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };

        if c == quote {
            let (remainder, _) = body.take_split(index + 1);
            return Ok((remainder, bytes));
        }

        match c {
            '\n' => return Err(ParserError::failure(input, "newline inside string literal")),
            '\\' => {
                let escape_at = body.take_split(index).0;
                let mut escaped = rest[1..].chars();
                let code = match escaped.next() {
                    Some(code) => code,
                    None => break,
                };
                index += 1 + code.len_utf8();
                match code {
                    'a' => bytes.push(0x07),
                    'b' => bytes.push(0x08),
                    'f' => bytes.push(0x0c),
                    'n' => bytes.push(b'\n'),
                    'r' => bytes.push(b'\r'),
                    't' => bytes.push(b'\t'),
                    'v' => bytes.push(0x0b),
                    '\\' => bytes.push(b'\\'),
                    '\'' => bytes.push(b'\''),
                    '"' => bytes.push(b'"'),
                    '?' => bytes.push(b'?'),
                    '0'..='7' => {
                        let digits: String = std::iter::once(code)
                            .chain(escaped.take_while(|d| ('0'..='7').contains(d)).take(2))
                            .collect();
                        index += digits.len() - 1;
                        let octal = u32::from_str_radix(&digits, 8).unwrap_or(0);
                        if octal > 0xff {
                            return Err(ParserError::failure(
                                escape_at,
                                format!("octal escape \\{digits} is out of range"),
                            ));
                        }
                        bytes.push(octal as u8);
                    }
                    'x' | 'X' => {
                        let digits: String =
                            escaped.take_while(|d| d.is_ascii_hexdigit()).take(2).collect();
                        if digits.is_empty() {
                            return Err(ParserError::failure(
                                escape_at,
                                "expected hex digits after \\x",
                            ));
                        }
                        index += digits.len();
                        bytes.push(hex_value(&digits) as u8);
                    }
                    'u' => {
                        let high = fixed_hex(&text[index..], 4, escape_at)?;
                        index += 4;
                        if (0xd800..0xdc00).contains(&high) {
                            let low = match text[index..].strip_prefix("\\u") {
                                Some(next) => fixed_hex(next, 4, escape_at)?,
                                None => {
                                    return Err(ParserError::failure(
                                        escape_at,
                                        "unpaired surrogate in \\u escape",
                                    ))
                                }
                            };
                            if !(0xdc00..0xe000).contains(&low) {
                                return Err(ParserError::failure(
                                    escape_at,
                                    "invalid low surrogate in \\u escape",
                                ));
                            }
                            index += 6;
                            let code = 0x10000 + ((high - 0xd800) << 10) + (low - 0xdc00);
                            push_code_point(&mut bytes, code, escape_at)?;
                        } else {
                            push_code_point(&mut bytes, high, escape_at)?;
                        }
                    }
                    'U' => {
                        let code = fixed_hex(&text[index..], 8, escape_at)?;
                        index += 8;
                        push_code_point(&mut bytes, code, escape_at)?;
                    }
                    other => {
                        return Err(ParserError::failure(
                            escape_at,
                            format!("invalid escape sequence \\{other}"),
                        ))
                    }
                }
            }
            _ => {
                let mut buffer = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
                index += c.len_utf8();
            }
        }
    }

    Err(ParserError::failure(input, "unterminated string literal"))
}

//
// Adjacent literals concatenate: "abc" 'def' == "abcdef"
//
fn parse_string(input: Span) -> IResult<Span, Scalar> {
    let (remainder, first) = quoted_literal(input)?;
    let (remainder, rest) = many0(preceded(zero_or_more_ws_or_comment, quoted_literal))(remainder)?;
    let bytes = rest.into_iter().fold(first, |mut acc, next| {
        acc.extend(next);
        acc
    });
    Ok((remainder, Scalar::Str(bytes)))
}

fn exponent(input: Span) -> IResult<Span, Span> {
    recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))(input)
}

fn float_literal(input: Span) -> IResult<Span, f64> {
    let (remainder, literal) = terminated(
        recognize(alt((
            recognize(tuple((digit1, char('.'), digit0, opt(exponent)))),
            recognize(tuple((char('.'), digit1, opt(exponent)))),
            recognize(pair(digit1, exponent)),
        ))),
        opt(one_of("fF")),
    )(input)?;
    match literal.fragment().parse::<f64>() {
        Ok(number) => Ok((remainder, number)),
        Err(_) => Err(ParserError::failure(input, "invalid floating point literal")),
    }
}

fn hex_literal(input: Span) -> IResult<Span, (String, u32)> {
    map(preceded(alt((tag("0x"), tag("0X"))), cut(hex_digit1)), |digits: Span| {
        (digits.fragment().to_string(), 16)
    })(input)
}

fn octal_literal(input: Span) -> IResult<Span, (String, u32)> {
    map(preceded(char('0'), oct_digit0), |digits: Span| {
        let digits = if digits.fragment().is_empty() {
            "0"
        } else {
            digits.fragment()
        };
        (digits.to_string(), 8)
    })(input)
}

fn decimal_literal(input: Span) -> IResult<Span, (String, u32)> {
    map(digit1, |digits: Span| (digits.fragment().to_string(), 10))(input)
}

fn special_float(input: Span) -> IResult<Span, f64> {
    alt((
        value(f64::INFINITY, tag_no_case("infinity")),
        value(f64::INFINITY, tag_no_case("inf")),
        value(f64::NAN, tag_no_case("nan")),
    ))(input)
}

//
// IMP: order does matter, float_literal is tried before the integer forms since those
// would otherwise match just the whole part of a float
//
fn parse_number(input: Span) -> IResult<Span, Scalar> {
    let (input, sign) = opt(terminated(char('-'), zero_or_more_ws_or_comment))(input)?;
    let negative = sign.is_some();
    let (remainder, scalar) = alt((
        map(float_literal, move |f| Scalar::Float(if negative { -f } else { f })),
        map(
            alt((hex_literal, octal_literal, decimal_literal)),
            move |(digits, radix)| Scalar::Int {
                negative,
                digits,
                radix,
            },
        ),
        map(
            terminated(special_float, not(peek(satisfy(is_ident_char)))),
            move |f| Scalar::Float(if negative { -f } else { f }),
        ),
    ))(input)?;

    // 12abc is neither a number nor an identifier
    match peek(satisfy::<_, _, ParserError>(|c| is_ident_char(c) || c == '.'))(remainder) {
        Ok(_) => Err(ParserError::failure(input, "invalid numeric literal")),
        Err(_) => Ok((remainder, scalar)),
    }
}

fn parse_identifier_scalar(input: Span) -> IResult<Span, Scalar> {
    map(identifier, |s: Span| Scalar::Ident(s.fragment().to_string()))(input)
}

pub(crate) fn parse_scalar(input: Span) -> IResult<Span, Scalar> {
    context(
        "scalar value",
        alt((parse_string, parse_number, parse_identifier_scalar)),
    )(input)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//                                                                                                //
//                          Field and Message Parsing Routines                                    //
//                                                                                                //
////////////////////////////////////////////////////////////////////////////////////////////////////

fn type_url(input: Span) -> IResult<Span, Span> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || "._/-".contains(c))(input)
}

fn field_name(input: Span) -> IResult<Span, FieldName> {
    alt((
        map(identifier, |s: Span| FieldName::Ident(s.fragment().to_string())),
        map(
            delimited(
                char('['),
                preceded(zero_or_more_ws_or_comment, type_url),
                cut(white_space(']')),
            ),
            |s: Span| FieldName::Expanded(s.fragment().to_string()),
        ),
    ))(input)
}

/// Deepest message nesting accepted, counted from the document's top level fields.
pub(crate) const MAX_NESTING_DEPTH: usize = 100;

fn message_body(
    input: Span,
    open: char,
    close: char,
    depth: usize,
) -> IResult<Span, Vec<TextField>> {
    delimited(
        char(open),
        |i| parse_fields(i, depth),
        cut(context("closing brace", white_space(close))),
    )(input)
}

fn message_value(input: Span, depth: usize) -> IResult<Span, TextValue> {
    let position = Position::of(&input);
    let (_, open) = peek(one_of("{<"))(input)?;
    if depth >= MAX_NESTING_DEPTH {
        return Err(ParserError::failure(
            input,
            format!("message nesting exceeds {MAX_NESTING_DEPTH}"),
        ));
    }
    let close = if open == '{' { '}' } else { '>' };
    map(
        move |i| message_body(i, open, close, depth + 1),
        move |fields| TextValue::Message(fields, position),
    )(input)
}

fn scalar_value(input: Span) -> IResult<Span, TextValue> {
    let position = Position::of(&input);
    map(parse_scalar, move |scalar| TextValue::Scalar(scalar, position))(input)
}

fn list_element(input: Span, depth: usize) -> IResult<Span, TextValue> {
    alt((|i| message_value(i, depth), scalar_value))(input)
}

fn list_of(
    input: Span,
    depth: usize,
    element: fn(Span, usize) -> IResult<Span, TextValue>,
) -> IResult<Span, TextValue> {
    let position = Position::of(&input);
    map(
        delimited(
            char('['),
            separated_list0(
                white_space(','),
                preceded(zero_or_more_ws_or_comment, |i| element(i, depth)),
            ),
            cut(context("closing bracket", white_space(']'))),
        ),
        move |values| TextValue::List(values, position),
    )(input)
}

fn parse_field(input: Span, depth: usize) -> IResult<Span, TextField> {
    let (input, _) = zero_or_more_ws_or_comment(input)?;
    let position = Position::of(&input);
    let (input, name) = field_name(input)?;
    let (input, colon) = opt(white_space(':'))(input)?;
    let (input, _) = zero_or_more_ws_or_comment(input)?;
    // without a colon only a message or a list of messages may follow
    let (input, value) = if colon.is_some() {
        cut(context(
            "field value",
            alt((
                |i| message_value(i, depth),
                |i| list_of(i, depth, list_element),
                scalar_value,
            )),
        ))(input)?
    } else {
        cut(context(
            "message value",
            alt((
                |i| message_value(i, depth),
                |i| list_of(i, depth, message_value),
            )),
        ))(input)?
    };
    let (input, _) = opt(preceded(zero_or_more_ws_or_comment, one_of(",;")))(input)?;
    Ok((
        input,
        TextField {
            name,
            position,
            value,
        },
    ))
}

fn parse_fields(input: Span, depth: usize) -> IResult<Span, Vec<TextField>> {
    many0(|i| parse_field(i, depth))(input)
}

///
/// Parses a whole document into its field list. Trailing content that is not a field is
/// reported at its own position, messages nested deeper than [`MAX_NESTING_DEPTH`] fail.
///
pub(crate) fn parse_document(input: Span) -> IResult<Span, Vec<TextField>> {
    all_consuming(terminated(|i| parse_fields(i, 0), zero_or_more_ws_or_comment))(input)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
