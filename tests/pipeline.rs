use std::{collections::HashMap, error::Error, ops::ControlFlow};

use pretty_assertions::assert_eq;
use warnings::{extract, Collector, ErrorList, Failure};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
enum LineError {
    #[error("line {0}: missing `=`")]
    MissingEquals(usize),
    #[error("line {0}: empty key")]
    EmptyKey(usize),
    #[error("line {line}: `{key}` defined twice")]
    Duplicate { line: usize, key: String },
}

impl LineError {
    fn is_fatal(&self) -> bool {
        matches!(self, LineError::Duplicate { .. })
    }
}

fn parse_line(
    line: usize,
    text: &str,
    seen: &HashMap<String, String>,
) -> Result<(String, String), LineError> {
    let (key, value) = text.split_once('=').ok_or(LineError::MissingEquals(line))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(LineError::EmptyKey(line));
    }
    if seen.contains_key(key) {
        return Err(LineError::Duplicate { line, key: key.to_owned() });
    }
    Ok((key.to_owned(), value.trim().to_owned()))
}

/// Parses `key = value` lines, skipping malformed ones but stopping at a duplicate key.
fn parse(
    text: &str,
    fatal_with_warnings: bool,
) -> (HashMap<String, String>, Option<Failure<LineError>>) {
    let mut collector =
        Collector::new(LineError::is_fatal).fatal_with_warnings(fatal_with_warnings);
    let mut entries = HashMap::new();

    for (i, line) in text.lines().enumerate() {
        match collector.absorb_result(parse_line(i + 1, line, &entries)) {
            ControlFlow::Continue(Some((key, value))) => {
                entries.insert(key, value);
            }
            ControlFlow::Continue(None) => (),
            ControlFlow::Break(()) => break,
        }
    }

    (entries, collector.into_failure())
}

#[test]
fn clean_input_has_no_failure() {
    let (entries, failure) = parse("a = 1\nb = 2", false);
    assert_eq!(entries.len(), 2);
    assert_eq!(failure, None);
}

#[test]
fn malformed_lines_are_warnings() {
    let (entries, failure) = parse("a = 1\nnonsense\n = 3\nb = 2", false);

    assert_eq!(entries.len(), 2);
    assert_eq!(
        failure,
        Some(Failure::List(ErrorList::from_warnings(vec![
            LineError::MissingEquals(2),
            LineError::EmptyKey(3),
        ]))),
    );
    assert_eq!(
        failure.unwrap().to_string(),
        "warnings:\nline 2: missing `=`\nline 3: empty key\n",
    );
}

#[test]
fn duplicate_key_stops_parsing() {
    let (entries, failure) = parse("a = 1\nnonsense\na = 2\nb = 3", false);

    assert_eq!(entries.len(), 1);
    let duplicate = LineError::Duplicate { line: 3, key: "a".to_owned() };
    assert_eq!(extract::fatal_only(failure.as_ref()), Some(&duplicate));
    assert!(extract::warnings_only(failure.as_ref()).is_empty());
}

#[test]
fn duplicate_key_with_warnings_kept() {
    let (_, failure) = parse("a = 1\nnonsense\na = 2\nb", true);

    let failure = failure.unwrap();
    assert_eq!(
        failure.to_string(),
        "fatal:\nline 3: `a` defined twice\nwarning:\nline 2: missing `=`\n",
    );
    assert_eq!(failure.warnings(), &[LineError::MissingEquals(2)]);
}

#[test]
fn boxed_failure_can_still_be_unpacked() {
    fn load(text: &str) -> Result<HashMap<String, String>, Box<dyn Error>> {
        let (entries, failure) = parse(text, true);
        match failure {
            Some(failure) => Err(failure.into()),
            None => Ok(entries),
        }
    }

    let err = load("x\na = 1\na = 1").unwrap_err();
    let fatal = extract::fatal_only_dyn::<LineError>(Some(err.as_ref()));
    assert_eq!(fatal.map(ToString::to_string).as_deref(), Some("line 3: `a` defined twice"));
    assert_eq!(
        extract::warnings_only_dyn::<LineError>(Some(err.as_ref())),
        &[LineError::MissingEquals(1)],
    );
}
