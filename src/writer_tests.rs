use crate::error::WriteErrorKind;
use crate::parser::TomlParser;
use crate::table::Table;
use crate::temporal::{Date, Temporal};
use crate::writer::{StringStyle, TomlWriter};

fn parse(text: &str) -> Table {
    TomlParser::new().parse_str(text).unwrap()
}

fn write(table: &Table) -> String {
    TomlWriter::new().write_to_string(table).unwrap()
}

fn reparses(table: &Table) {
    let text = write(table);
    assert_eq!(&parse(&text), table, "written form was: {text:?}");
}

#[test]
fn scalars() {
    let mut table = Table::new();
    table.insert("a", 1i64);
    table.insert("b", "two");
    table.insert("c", true);
    table.insert("d", 2.5f64);
    assert_eq!(
        write(&table),
        "a = 1\nb = \"two\"\nc = true\nd = 2.5\n"
    );
}

#[test]
fn empty_table_writes_nothing() {
    assert_eq!(write(&Table::new()), "");
}

#[test]
fn headers_fold_through_pure_intermediates() {
    let table = parse("[a.b]\nc = 1");
    assert_eq!(write(&table), "[a.b]\nc = 1\n");
}

#[test]
fn folding_can_be_disabled() {
    let table = parse("[a.b]\nc = 1");
    let text = TomlWriter::new()
        .fold_headers(false)
        .write_to_string(&table)
        .unwrap();
    assert_eq!(text, "[a]\n\n[a.b]\nc = 1\n");
}

#[test]
fn tables_with_own_scalars_do_not_fold() {
    let table = parse("[a]\nx = 1\n[a.b]\ny = 2");
    assert_eq!(write(&table), "[a]\nx = 1\n\n[a.b]\ny = 2\n");
}

#[test]
fn blank_line_separates_sections() {
    let table = parse("x = 1\n[t]\ny = 2\n[u]\nz = 3");
    assert_eq!(write(&table), "x = 1\n\n[t]\ny = 2\n\n[u]\nz = 3\n");
}

#[test]
fn scalars_precede_sections() {
    // Output order within a table: scalar entries first, then sections.
    let mut t = Table::new();
    t.insert("y", 2i64);
    let mut table = Table::new();
    table.insert("t", t);
    table.insert("x", 1i64);
    assert_eq!(write(&table), "x = 1\n\n[t]\ny = 2\n");
}

#[test]
fn arrays_of_tables() {
    let table = parse("[[srv]]\nname = \"one\"\n[[srv]]\nname = \"two\"");
    assert_eq!(
        write(&table),
        "[[srv]]\nname = \"one\"\n\n[[srv]]\nname = \"two\"\n"
    );
}

#[test]
fn sibling_table_arrays_stay_separate() {
    // Two keys holding equal arrays of tables: each gets its own full
    // header sequence, blank-line separated, nothing shared or merged.
    let table = parse(
        "[[first]]\nv = 1\n[[first]]\nv = 2\n[[second]]\nv = 1\n[[second]]\nv = 2",
    );
    assert_eq!(
        write(&table),
        "[[first]]\nv = 1\n\n[[first]]\nv = 2\n\n\
         [[second]]\nv = 1\n\n[[second]]\nv = 2\n"
    );
    reparses(&table);
}

#[test]
fn empty_tables_are_inlined() {
    let table = parse("[t]\ne = {}");
    assert_eq!(write(&table), "[t]\ne = {}\n");
}

#[test]
fn inline_table_policy() {
    let table = parse("[p]\nx = 1\ny = 2");
    let text = TomlWriter::new()
        .table_inline(|_| true)
        .write_to_string(&table)
        .unwrap();
    assert_eq!(text, "p = { x = 1, y = 2 }\n");
}

#[test]
fn key_quoting() {
    let mut table = Table::new();
    table.insert("plain-key_9", 1i64);
    table.insert("needs quoting", 2i64);
    table.insert("", 3i64);
    assert_eq!(
        write(&table),
        "plain-key_9 = 1\n\"needs quoting\" = 2\n\"\" = 3\n"
    );
}

#[test]
fn quoted_header_segments() {
    let table = parse("[a.\"b.c\"]\nx = 1");
    assert_eq!(write(&table), "[a.\"b.c\"]\nx = 1\n");
}

#[test]
fn empty_header_segment_is_an_error() {
    let mut inner = Table::new();
    inner.insert("x", 1i64);
    let mut table = Table::new();
    table.insert("", inner);
    let err = TomlWriter::new().write_to_string(&table).unwrap_err();
    assert!(matches!(err.kind, WriteErrorKind::EmptyTableName));
}

#[test]
fn floats_reparse_as_floats() {
    let mut table = Table::new();
    table.insert("a", 1.0f64);
    table.insert("b", f64::INFINITY);
    table.insert("c", f64::NEG_INFINITY);
    table.insert("d", f64::NAN);
    table.insert("e", -0.5f64);
    assert_eq!(write(&table), "a = 1.0\nb = +inf\nc = -inf\nd = nan\ne = -0.5\n");
}

#[test]
fn temporals() {
    let mut table = Table::new();
    table.insert(
        "d",
        Temporal::Date(Date {
            year: 1979,
            month: 5,
            day: 27,
        }),
    );
    assert_eq!(write(&table), "d = 1979-05-27\n");
}

#[test]
fn single_line_arrays() {
    let table = parse("a = [1, 2, 3]\nb = []\nc = [[1], {}]");
    assert_eq!(write(&table), "a = [1, 2, 3]\nb = []\nc = [[1], {}]\n");
}

#[test]
fn indented_arrays() {
    let table = parse("a = [1, 2]");
    let text = TomlWriter::new()
        .indent("  ")
        .indent_arrays(|_| true)
        .write_to_string(&table)
        .unwrap();
    assert_eq!(text, "a = [\n  1,\n  2,\n]\n");
}

#[test]
fn basic_string_escapes() {
    let mut table = Table::new();
    table.insert("a", "quote \" slash \\ tab \t nl \n bell \u{7}");
    assert_eq!(
        write(&table),
        "a = \"quote \\\" slash \\\\ tab \\t nl \\n bell \\u0007\"\n"
    );
}

#[test]
fn multiline_strings_for_newline_heavy_text() {
    let mut table = Table::new();
    table.insert("a", "one\ntwo\nthree");
    assert_eq!(write(&table), "a = \"\"\"\none\ntwo\nthree\"\"\"\n");
    reparses(&table);
}

#[test]
fn literal_style_falls_back_when_unrepresentable() {
    let mut table = Table::new();
    table.insert("a", "plain text");
    table.insert("b", "it's got a quote");
    let writer = TomlWriter::new().string_style(|_| StringStyle::Literal);
    let text = writer.write_to_string(&table).unwrap();
    assert_eq!(text, "a = 'plain text'\nb = \"it's got a quote\"\n");
}

#[test]
fn multiline_literal_style() {
    let mut table = Table::new();
    table.insert("a", "one\ntwo");
    let writer = TomlWriter::new().string_style(|_| StringStyle::MultilineLiteral);
    let text = writer.write_to_string(&table).unwrap();
    assert_eq!(text, "a = '''\none\ntwo'''\n");
    assert_eq!(parse(&text), table);
}

#[test]
fn string_round_trips() {
    for text in [
        "",
        "plain",
        "clôture 😀",
        "ends with backslash \\",
        "quote at end \"",
        "\"\"\" themselves",
        "\r\n mixed \u{1} control",
        "\nleading newline\n\n",
        "tab\tand del \u{7f}",
    ] {
        let mut table = Table::new();
        table.insert("a", text);
        reparses(&table);
    }
}

#[test]
fn document_round_trip() {
    let table = parse(
        "title = \"example\"\n\
         count = 3\n\
         ratio = 0.5\n\
         when = 1979-05-27T07:32:00Z\n\
         tags = [\"a\", \"b\"]\n\
         point = { x = 1, y = 2 }\n\
         [owner]\n\
         name = \"Tom\"\n\
         [owner.contact]\n\
         email = \"tom@example.com\"\n\
         [[servers]]\n\
         host = \"alpha\"\n\
         [[servers]]\n\
         host = \"beta\"\n\
         ports = [8001, 8002]\n",
    );
    reparses(&table);
}

#[test]
fn nested_array_of_tables_round_trips() {
    // An array of tables inside a plain array has no header form and is
    // written inline.
    let table = parse("a = [[{ x = 1 }, { x = 2 }]]");
    reparses(&table);
}

#[test]
fn randomized_round_trips() {
    let mut rng = oorandom::Rand32::new(0x77a9);
    for _ in 0..300 {
        let mut table = Table::new();
        let count = rng.rand_range(0..8);
        for i in 0..count {
            let key = format!("k{i}");
            match rng.rand_range(0..4) {
                0 => table.insert(key, rng.rand_i32() as i64),
                1 => table.insert(key, rng.rand_float() as f64),
                2 => table.insert(key, rng.rand_u32() % 2 == 0),
                _ => {
                    let mut inner = Table::new();
                    inner.insert("v", rng.rand_i32() as i64);
                    table.insert(key, inner)
                }
            };
        }
        reparses(&table);
    }
}
