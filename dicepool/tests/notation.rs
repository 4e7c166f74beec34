use dicepool::{DiceError, DiceSpec, ParseSpecError};

fn parse(s: &str) -> Result<DiceSpec, ParseSpecError> {
    s.parse()
}

#[test]
fn parses_canonical_forms() {
    assert_eq!(parse("2d20").unwrap(), DiceSpec::new(2, 20).unwrap());
    assert_eq!(parse("4d6L1").unwrap(), DiceSpec::with_drops(4, 6, 1, 0).unwrap());
    assert_eq!(parse("4d6H1").unwrap(), DiceSpec::with_drops(4, 6, 0, 1).unwrap());
    assert_eq!(parse("5d20L2H1").unwrap(), DiceSpec::with_drops(5, 20, 2, 1).unwrap());
}

#[test]
fn lenient_case_whitespace_and_implicit_count() {
    assert_eq!(parse("  5D20l2h1 ").unwrap(), DiceSpec::with_drops(5, 20, 2, 1).unwrap());
    assert_eq!(parse("d20").unwrap(), DiceSpec::new(1, 20).unwrap());
}

#[test]
fn display_then_parse_is_identity() {
    for spec in [
        DiceSpec::new(1, 2).unwrap(),
        DiceSpec::with_drops(3, 20, 1, 1).unwrap(),
        DiceSpec::with_drops(10, 100, 0, 9).unwrap(),
    ] {
        assert_eq!(parse(&spec.to_string()).unwrap(), spec);
    }
}

#[test]
fn malformed_text_is_syntax_error() {
    for bad in ["", "20", "2x20", "2d", "2dL1", "2d20H1L1", "2d20L", "-2d20", "2d20+3", "2d20L1x"] {
        assert!(
            matches!(parse(bad), Err(ParseSpecError::Syntax(_))),
            "expected syntax error for {bad:?}"
        );
    }
}

#[test]
fn well_formed_but_invalid_reports_rule() {
    assert_eq!(parse("0d20"), Err(ParseSpecError::Invalid(DiceError::InvalidCount(0))));
    assert_eq!(parse("2d1"), Err(ParseSpecError::Invalid(DiceError::InvalidSides(1))));
    assert_eq!(
        parse("2d20L1H1"),
        Err(ParseSpecError::Invalid(DiceError::TooManyDropped {
            drop_low: 1,
            drop_high: 1,
            count: 2
        }))
    );
}

#[test]
fn errors_render() {
    assert_eq!(parse("2x20").unwrap_err().to_string(), "malformed dice notation '2x20'");
    assert_eq!(parse("0d20").unwrap_err().to_string(), "number of dice is too low: 0");
}
