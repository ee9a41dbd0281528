use memberdb_core::model::member::MAX_MEMBER_ID_CHARS;
use memberdb_core::{Member, MemberValidationError};

#[test]
fn new_sets_fields() {
    let member = Member::new("memberV0", 10_000);

    assert_eq!(member.member_id, "memberV0");
    assert_eq!(member.money, 10_000);
    member.validate().unwrap();
}

#[test]
fn validate_rejects_empty_and_whitespace_ids() {
    let empty = Member::new("", 0);
    assert_eq!(
        empty.validate().unwrap_err(),
        MemberValidationError::EmptyMemberId
    );

    let whitespace = Member::new("   ", 0);
    assert_eq!(
        whitespace.validate().unwrap_err(),
        MemberValidationError::EmptyMemberId
    );
}

#[test]
fn validate_rejects_overlong_id() {
    let overlong = Member::new("x".repeat(MAX_MEMBER_ID_CHARS + 1), 0);
    assert_eq!(
        overlong.validate().unwrap_err(),
        MemberValidationError::MemberIdTooLong {
            length: MAX_MEMBER_ID_CHARS + 1
        }
    );

    let at_limit = Member::new("x".repeat(MAX_MEMBER_ID_CHARS), 0);
    at_limit.validate().unwrap();
}

#[test]
fn member_serialization_uses_expected_wire_fields() {
    let member = Member::new("memberV0", 10_000);

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["member_id"], "memberV0");
    assert_eq!(json["money"], 10_000_i64);

    let decoded: Member = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, member);
}

#[test]
fn negative_balances_are_representable() {
    let member = Member::new("overdrawn", -250);
    member.validate().unwrap();
    assert_eq!(member.money, -250);
}
