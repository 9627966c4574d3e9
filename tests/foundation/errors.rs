//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use nasin_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_unexpected() {
    let err = Error::unexpected("\"li\"", "a content word");
    assert!(matches!(err.kind, ErrorKind::UnexpectedToken { .. }));
    assert_eq!(format!("{err}"), "unexpected \"li\", expected a content word");
}

#[test]
fn error_unrecognized() {
    let err = Error::unrecognized("\"xyz\" is not a known word");
    assert!(matches!(err.kind, ErrorKind::UnrecognizedElement(_)));
    assert_eq!(format!("{err}"), "\"xyz\" is not a known word");
}

#[test]
fn error_filtered() {
    let err = Error::filtered("\"seme ala seme\" is not allowed");
    assert!(matches!(err.kind, ErrorKind::FilteredOut(_)));
}

#[test]
fn error_not_yet_supported() {
    let err = Error::not_yet_supported("combined glyphs");
    assert_eq!(format!("{err}"), "combined glyphs is not yet supported");
}

#[test]
fn error_input_too_long() {
    let err = Error::input_too_long(600, 500);
    assert!(matches!(
        err.kind,
        ErrorKind::InputTooLong {
            length: 600,
            limit: 500
        }
    ));
    let msg = format!("{err}");
    assert!(msg.contains("600"));
    assert!(msg.contains("500"));
}

#[test]
fn error_exhausted_names_input() {
    let err = Error::exhausted("\"toki\"");
    assert_eq!(format!("{err}"), "no derivation found for \"toki\"");
    assert!(!err.is_placeholder());
}

#[test]
fn placeholder_is_recognized() {
    let err = Error::no_error_provided();
    assert!(err.is_placeholder());
    assert!(matches!(err.kind, ErrorKind::Exhausted(_)));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_does_not_change_message() {
    let plain = Error::filtered("numbers should be in descending order");
    let tagged = plain
        .clone()
        .with_context(ErrorContext::new().with_position(3))
        .with_rule("numbers-descending");
    assert_eq!(plain.to_string(), tagged.to_string());

    let context = tagged.context.expect("context was attached");
    assert_eq!(context.rule, Some("numbers-descending"));
    assert_eq!(context.position, Some(3));
}

#[test]
fn context_display() {
    let context = ErrorContext::new().with_rule("mi-li");
    assert!(context.to_string().contains("mi-li"));
}
