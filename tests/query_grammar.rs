// tests/query_grammar.rs
//
// A small query-language grammar written purely against the public combinator API,
// shaped like the structured query results downstream search code consumes:
//
//   In courses dataset courses, find entries whose Average is greater than 97;
//   show Department and Average; sort in ascending order by Average.

use strand::{
    between, choice, fail, floating_point, letters_or_digits, literal, optional, pattern,
    sep_by1, success, ErrorKind, Parser,
};

#[derive(Debug, Clone, PartialEq)]
struct DataSet {
    kind: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq)]
enum FilterValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Filter {
    key: String,
    op: String,
    value: FilterValue,
}

#[derive(Debug, Clone, PartialEq)]
struct ParsedQuery {
    data_set: DataSet,
    filters: Vec<Filter>,
    display: Vec<String>,
    order: String,
}

fn keys_for(kind: &str) -> Vec<&'static str> {
    match kind {
        "courses" => vec!["Average", "Department", "Title", "Pass"],
        _ => vec!["Seats", "Name", "Address"],
    }
}

fn key(kind: &str) -> Parser<String> {
    choice(keys_for(kind).into_iter().map(|k| literal(k)).collect()).label(format!("a {} key", kind))
}

fn data_set() -> Parser<DataSet> {
    literal("In ")
        .skip_left(choice(vec![literal("courses"), literal("rooms")]))
        .skip(literal(" dataset "))
        .then(letters_or_digits())
        .skip(literal(", "))
        .map(|(kind, name)| DataSet { kind, name })
}

fn numeric_filter(kind: &str) -> Parser<Filter> {
    let op = choice(vec![
        literal("is greater than"),
        literal("is less than"),
        literal("is equal to"),
    ]);
    key(kind)
        .skip(literal(" "))
        .then(op)
        .skip(literal(" "))
        .then(floating_point())
        .chain(|((key, op), number)| match number.parse::<f64>() {
            Ok(n) => success(Filter {
                key,
                op,
                value: FilterValue::Number(n),
            }),
            Err(_) => fail(format!("{} is not a number", number)),
        })
}

fn text_filter(kind: &str) -> Parser<Filter> {
    let op = choice(vec![literal("includes"), literal("is")]);
    let text = pattern("text", r#"[^"]*"#).expect("valid text pattern");
    key(kind)
        .skip(literal(" "))
        .then(op)
        .skip(literal(" "))
        .then(between(literal("\""), literal("\""), text))
        .map(|((key, op), text)| Filter {
            key,
            op,
            value: FilterValue::Text(text),
        })
}

fn filters(kind: &str) -> Parser<Vec<Filter>> {
    let all = literal("find all entries").map(|_| Vec::new());
    let some = literal("find entries whose ").skip_left(sep_by1(
        literal(" and "),
        choice(vec![numeric_filter(kind), text_filter(kind)]),
    ));
    choice(vec![all, some])
}

fn display(kind: &str) -> Parser<Vec<String>> {
    literal("; show ").skip_left(sep_by1(
        choice(vec![literal(", "), literal(" and ")]),
        key(kind),
    ))
}

fn order(kind: &str) -> Parser<String> {
    optional(literal("; sort in ascending order by ").skip_left(key(kind)))
        .map(Option::unwrap_or_default)
}

fn query() -> Parser<ParsedQuery> {
    data_set().chain(|data_set| {
        let kind = data_set.kind.clone();
        filters(&kind)
            .then(display(&kind))
            .then(order(&kind))
            .skip(literal("."))
            .map(move |((filters, display), order)| ParsedQuery {
                data_set: data_set.clone(),
                filters,
                display,
                order,
            })
    })
}

#[test]
fn parses_numeric_filter_query() {
    let input = "In courses dataset courses, find entries whose Average is greater than 97; \
                 show Department and Average; sort in ascending order by Average.";
    let parsed = query().parse(input).expect("query should parse");
    assert_eq!(
        parsed,
        ParsedQuery {
            data_set: DataSet {
                kind: "courses".into(),
                name: "courses".into(),
            },
            filters: vec![Filter {
                key: "Average".into(),
                op: "is greater than".into(),
                value: FilterValue::Number(97.0),
            }],
            display: vec!["Department".into(), "Average".into()],
            order: "Average".into(),
        }
    );
}

#[test]
fn parses_all_entries_without_order() {
    let input = "In rooms dataset rooms2024, find all entries; show Name, Seats and Address.";
    let state = query().run(input);
    assert_eq!(state.index(), input.len());
    let parsed = state.into_result().unwrap();
    assert!(parsed.filters.is_empty());
    assert_eq!(parsed.display, vec!["Name", "Seats", "Address"]);
    assert_eq!(parsed.order, "");
}

#[test]
fn parses_mixed_filters() {
    let input = "In courses dataset ubc, find entries whose Department is \"cpsc\" \
                 and Average is less than 60.5; show Title.";
    let parsed = query().parse(input).unwrap();
    assert_eq!(
        parsed.filters,
        vec![
            Filter {
                key: "Department".into(),
                op: "is".into(),
                value: FilterValue::Text("cpsc".into()),
            },
            Filter {
                key: "Average".into(),
                op: "is less than".into(),
                value: FilterValue::Number(60.5),
            },
        ]
    );
}

#[test]
fn dataset_kind_restricts_keys() {
    let input = "In rooms dataset r, find entries whose Average is greater than 3; show Name.";
    let err = query().parse(input).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoMatches { .. }));
    assert!(input[err.index..].starts_with("Average"));
}

#[test]
fn error_map_wraps_the_final_failure() {
    let input = "In courses dataset ubc, find all entries; show Title";
    let parser = query().error_map(|e| format!("Invalid query at {}: {}", e.index, e.message));
    let err = parser.parse(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::EndOfInput);
    assert_eq!(err.index, input.len());
    assert_eq!(
        err.message,
        format!("Invalid query at {}: Unexpected end of input", input.len())
    );
}
