//! Tests for the domain user model.

use super::*;
use rstest::rstest;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_round_trips_through_string() {
    let id = UserId::new(VALID_ID).expect("valid uuid");
    assert_eq!(String::from(id), VALID_ID);
}

#[rstest]
#[case("   ")]
#[case("")]
fn external_id_must_not_be_blank(#[case] raw: &str) {
    assert_eq!(
        ExternalUserId::new(raw),
        Err(UserValidationError::EmptyExternalId)
    );
}

#[rstest]
fn external_id_is_trimmed() {
    let id = ExternalUserId::new("  user_2abc ").expect("valid subject");
    assert_eq!(id.as_ref(), "user_2abc");
}

#[rstest]
fn display_name_accepts_hangul() {
    let name = DisplayName::new("홍길동").expect("valid name");
    assert_eq!(name.to_string(), "홍길동");
}

#[rstest]
fn display_name_rejects_overlong_values() {
    let err = DisplayName::new("가".repeat(DISPLAY_NAME_MAX + 1)).expect_err("too long");
    assert_eq!(
        err,
        UserValidationError::DisplayNameTooLong {
            max: DISPLAY_NAME_MAX
        }
    );
}

#[rstest]
fn user_exposes_components() {
    let created_at = Utc::now();
    let user = User::new(
        UserId::new(VALID_ID).expect("valid uuid"),
        ExternalUserId::new("user_2abc").expect("valid subject"),
        None,
        created_at,
    );
    assert_eq!(user.id().to_string(), VALID_ID);
    assert_eq!(user.external_id().as_ref(), "user_2abc");
    assert!(user.display_name().is_none());
    assert_eq!(user.created_at(), created_at);
}
