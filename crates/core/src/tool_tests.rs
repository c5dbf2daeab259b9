use super::*;

#[test]
fn parses_plain_semver_line() {
    let v = Version::parse("bv version 2.10.3\n");
    assert_eq!(v.parsed, Some((2, 10, 3)));
}

#[test]
fn parses_prefixed_banner() {
    let v = Version::parse("jfp/1.0.0 linux-x64 node-v24");
    assert_eq!(v.parsed, Some((1, 0, 0)));
}

#[test]
fn unparseable_output_keeps_raw_and_sorts_first() {
    let unparsed = Version::parse("no version info here");
    assert_eq!(unparsed.parsed, None);
    assert_eq!(unparsed.raw, "no version info here");

    let parsed = Version::parse("1.2.3");
    assert!(unparsed < parsed);
}

#[test]
fn at_least_compares_parsed_versions() {
    let min = Version::parse("1.0.0");
    assert!(Version::parse("1.0.1").at_least(&min));
    assert!(!Version::parse("0.9.9").at_least(&min));
}

#[test]
fn tool_name_round_trips_known_binaries() {
    assert_eq!(ToolName::from("bv"), ToolName::IssueGraph);
    assert_eq!(ToolName::from("dcg"), ToolName::DestructiveCommandGuard);
    assert_eq!(ToolName::from("some-future-tool").as_str(), "some-future-tool");
}
