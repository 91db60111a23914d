use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
}

#[test]
fn test_span_merge() {
    let merged = Span::new(10, 20).merge(Span::new(15, 30));
    assert_eq!(merged, Span::new(10, 30));

    // Order does not matter
    let merged = Span::new(15, 30).merge(Span::new(10, 20));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_point_span_is_empty() {
    let span = Span::point(7);
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
}

#[test]
fn test_try_from_range() {
    assert_eq!(Span::try_from_range(3..9), Ok(Span::new(3, 9)));

    let too_big = u32::MAX as usize + 1;
    assert_eq!(
        Span::try_from_range(0..too_big),
        Err(SpanError::EndTooLarge(too_big))
    );
    assert_eq!(
        Span::try_from_range(too_big..too_big),
        Err(SpanError::StartTooLarge(too_big))
    );
}

#[test]
fn test_span_debug_format() {
    assert_eq!(format!("{:?}", Span::new(1, 4)), "1..4");
    assert_eq!(Span::new(1, 4).to_string(), "1..4");
}
