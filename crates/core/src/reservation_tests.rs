use super::*;

#[test]
fn expiry_is_checked_against_the_given_instant() {
    let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    let reservation = FileReservation {
        path_pattern: "src/auth/**".to_string(),
        exclusive: true,
        reason: "refactor".to_string(),
        expires_at: Some(DateTime::<Utc>::from_timestamp(1_700_000_100, 0).unwrap()),
    };
    assert!(!reservation.is_expired(now));
    assert!(reservation.is_expired(DateTime::<Utc>::from_timestamp(1_700_000_200, 0).unwrap()));
}

#[test]
fn reservation_without_expiry_never_expires() {
    let reservation = FileReservation {
        path_pattern: "src/**".to_string(),
        exclusive: false,
        reason: "advisory".to_string(),
        expires_at: None,
    };
    assert!(!reservation.is_expired(Utc::now()));
}
