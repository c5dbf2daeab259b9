use super::*;

crate::define_id! {
    #[derive(Default)]
    pub struct TestId;
}

#[test]
fn define_id_display_and_from() {
    let id = TestId::new("abc");
    assert_eq!(id.to_string(), "abc");
    assert_eq!(id.as_str(), "abc");
    let from_string: TestId = "xyz".to_string().into();
    assert_eq!(from_string, "xyz");
}

#[test]
fn define_id_short_truncates() {
    let id = TestId::new("abcdefgh");
    assert_eq!(id.short(3), "abc");
    assert_eq!(id.short(100), "abcdefgh");
}

#[test]
fn uuid_id_gen_produces_distinct_ids() {
    let gen = UuidIdGen;
    let a = gen.next();
    let b = gen.next();
    assert_ne!(a, b);
}

#[test]
fn sequential_id_gen_is_stable_and_increasing() {
    let gen = SequentialIdGen::new("bd");
    assert_eq!(gen.next(), "bd-1");
    assert_eq!(gen.next(), "bd-2");
    assert_eq!(gen.next(), "bd-3");
}

#[test]
fn pane_index_displays_as_number() {
    let pane = PaneIndex(7);
    assert_eq!(pane.to_string(), "7");
}
