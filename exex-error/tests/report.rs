use ariadne::Source;
use exex_attrs::ErrorKind;
use exex_error::{Error, ErrorKind};

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a term I know", self.name),
    labels = ["this one"],
    help = "try `x`, `y`, or `z`",
)]
struct UnknownThing {
    name: String,
}

#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "two things went wrong",
    labels = ["first", ""],
)]
struct TwoProblems;

/// Renders the report for the given error to a plain string.
fn render(err: &Error, src: &str) -> String {
    let mut buf = Vec::new();
    err.build_report("input")
        .write(("input", Source::from(src)), &mut buf)
        .unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn message_label_and_help() {
    let err = Error::new(vec![2..3], UnknownThing { name: "w".to_string() });
    let out = render(&err, "2 w + 1");
    assert!(out.contains("`w` is not a term I know"));
    assert!(out.contains("this one"));
    assert!(out.contains("try `x`, `y`, or `z`"));
}

#[test]
fn empty_labels_are_unlabeled() {
    let err = Error::new(vec![0..1, 4..5], TwoProblems);
    let out = render(&err, "x + (");
    assert!(out.contains("two things went wrong"));
    assert!(out.contains("first"));
}

#[test]
fn downcast_kind() {
    let err = Error::new(vec![0..1], TwoProblems);
    assert_eq!(err.kind_as::<TwoProblems>(), Some(&TwoProblems));
    assert!(err.kind_as::<UnknownThing>().is_none());
}
