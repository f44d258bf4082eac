use super::*;

fn roundtrip(input: &str) {
    let value = Temporal::parse(input).unwrap();
    assert_eq!(value.to_string(), input, "roundtrip mismatch for {input:?}");
}

fn roundtrip_lossy(input: &str, expected: &str) {
    let value = Temporal::parse(input).unwrap();
    assert_eq!(value.to_string(), expected, "roundtrip mismatch for {input:?}");
}

#[track_caller]
fn expect_err(input: &str) {
    assert!(Temporal::parse(input).is_none(), "for {input:?}");
}

#[test]
fn perfect_roundtrip_examples() {
    let inputs = &[
        "1979-05-27T07:32:00Z",
        "1979-05-27T00:32:00-23:00",
        "2000-12-17T00:32:00.5-07:00",
        "1979-05-27T00:32:00.999999+21:20",
        "1979-05-27T07:32:00",
        "1979-05-27T07:32:00.5",
        "1979-05-27T07:32:00.999999999",
        "1979-05-27T07:32:00.123456789",
        "1979-05-27",
        "07:32:00",
        "00:32:00.5",
        "00:32:00.999999",
    ];
    for input in inputs {
        roundtrip(input);
    }
}

#[test]
fn lossy_roundtrip() {
    // Spaces aren't preserved; we always separate with 'T'
    roundtrip_lossy("1979-05-27 07:32:00Z", "1979-05-27T07:32:00Z");
    roundtrip_lossy("2000-01-01 00:00:00", "2000-01-01T00:00:00");
    roundtrip_lossy("1999-12-31 23:59:59.9", "1999-12-31T23:59:59.9");

    // No-seconds inputs always format with :00
    roundtrip_lossy("1979-05-27T07:32Z", "1979-05-27T07:32:00Z");
    roundtrip_lossy("07:32", "07:32:00");

    // Lowercase t/z are accepted
    roundtrip_lossy("1987-07-05t17:45:00z", "1987-07-05T17:45:00Z");
    roundtrip_lossy("1987-07-05t17:45:00", "1987-07-05T17:45:00");

    // Trailing fraction zeros are not preserved
    roundtrip_lossy("00:32:00.50", "00:32:00.5");
}

#[test]
fn date_leap_years() {
    roundtrip("2000-02-29");
    roundtrip("2024-02-29");
    expect_err("2023-02-29");
    expect_err("1900-02-29"); // divisible by 100 not 400
    expect_err("2100-02-29");
}

#[test]
fn date_out_of_range() {
    expect_err("2023-00-01");
    expect_err("2023-13-01");
    expect_err("2023-01-00");
    expect_err("2023-01-32");
    expect_err("2023-04-31");
    expect_err("2023-02-30");
}

#[test]
fn date_malformed() {
    expect_err("");
    expect_err("1979");
    expect_err("2023/01/01");
    expect_err("202-01-01");
    expect_err("2023-1-01");
    expect_err("2023-01-1");
    expect_err("2023-06-15x");
    expect_err("2023-06-15T");
    expect_err("2023-06-15T12");
    expect_err("2023-06-15T12:");
}

#[test]
fn time_out_of_range() {
    expect_err("24:00:00");
    expect_err("00:60:00");
    expect_err("00:00:61");
    // Leap second is fine.
    roundtrip("23:59:60");
}

#[test]
fn time_malformed() {
    expect_err("12:");
    expect_err("0732:00");
    expect_err("12:30:45.");
    // An offset needs a date.
    expect_err("07:32:00Z");
    expect_err("07:32:00+01:00");
}

#[test]
fn offsets() {
    roundtrip("2023-06-15T12:30:45+23:59");
    roundtrip("2023-06-15T12:30:45-00:01");
    roundtrip_lossy("2023-01-01T00:00:00+00:00", "2023-01-01T00:00:00Z");
    roundtrip_lossy("2023-01-01T00:00:00-00:00", "2023-01-01T00:00:00Z");
    let parsed = Temporal::parse("2023-06-15T12:30:00-01:15").unwrap();
    let Temporal::OffsetDateTime { offset, .. } = parsed else {
        panic!("wrong flavor");
    };
    assert_eq!(offset, TimeOffset::Custom { minutes: -75 });
}

#[test]
fn offset_malformed() {
    expect_err("2023-06-15T12:30+24:00");
    expect_err("2023-06-15T12:30+00:60");
    expect_err("2023-06-15T12:30+");
    expect_err("2023-06-15T12:30+05");
    expect_err("2023-06-15T12:30+05:");
    expect_err("2023-06-15T12:30:45ZZ");
}

#[test]
fn frac_digits() {
    roundtrip("2023-01-01T00:00:00.001");
    roundtrip("2023-01-01T00:00:00.000000001");
    // More than 9 digits: the rest is consumed but dropped.
    let parsed = Temporal::parse("2023-01-01T00:00:00.1234567891111").unwrap();
    assert_eq!(parsed.to_string(), "2023-01-01T00:00:00.123456789");
}

#[test]
fn classification() {
    let chars: Vec<char> = "07:32:00".chars().collect();
    assert!(looks_temporal(&chars));
    let chars: Vec<char> = "1979-05-27".chars().collect();
    assert!(looks_temporal(&chars));
    let chars: Vec<char> = "12345678".chars().collect();
    assert!(!looks_temporal(&chars));
    let chars: Vec<char> = "07:32".chars().collect();
    assert!(!looks_temporal(&chars));
}

#[test]
fn randomized_roundtrip() {
    let mut rng = oorandom::Rand32::new(3);
    for _ in 0..10_000 {
        let year = (rng.rand_u32() % 10000) as u16;
        let month = (rng.rand_u32() % 12) as u8 + 1;
        let day = (rng.rand_u32() % days_in_month(year, month) as u32) as u8 + 1;
        let hour = (rng.rand_u32() % 24) as u8;
        let minute = (rng.rand_u32() % 60) as u8;
        let second = (rng.rand_u32() % 60) as u8;
        let mut text = format!(
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}"
        );
        match rng.rand_u32() % 4 {
            0 => {}
            1 => text.push('Z'),
            _ => {
                let sign = if rng.rand_u32() % 2 == 0 { '+' } else { '-' };
                let oh = (rng.rand_u32() % 24) as u8;
                let om = (rng.rand_u32() % 60) as u8;
                if oh == 0 && om == 0 {
                    text.push('Z');
                } else {
                    text.push_str(&format!("{sign}{oh:02}:{om:02}"));
                }
            }
        }
        roundtrip(&text);
    }
}

#[test]
fn randomized_reject_garbage() {
    let mut rng = oorandom::Rand32::new(5);
    for _ in 0..10_000 {
        let len = 5 + (rng.rand_u32() % 26) as usize;
        let text: String = (0..len)
            .map(|_| (b' ' + (rng.rand_u32() % 90) as u8) as char)
            .collect();
        // Most random strings must fail; mainly ensure no panic.
        let _ = Temporal::parse(&text);
    }
}
