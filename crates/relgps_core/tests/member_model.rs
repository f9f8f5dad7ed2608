use chrono::NaiveDate;
use relgps_core::{
    parse_birthday, LoveLanguage, Member, MemberValidationError, RelationshipRecord,
    RelationshipType, RelationshipValidationError,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn member_new_generates_uuid_id() {
    let member = Member::new("Laurie");

    assert!(Uuid::parse_str(&member.id).is_ok());
    assert_eq!(member.name, "Laurie");
    assert_eq!(member.birthday, None);
    assert!(member.love_languages.is_empty());
    assert!(member.validate().is_ok());
}

#[test]
fn validate_rejects_empty_identity_fields() {
    assert_eq!(
        Member::with_id("  ", "Name").validate().unwrap_err(),
        MemberValidationError::EmptyId
    );
    assert_eq!(
        Member::with_id("id-1", "").validate().unwrap_err(),
        MemberValidationError::EmptyName {
            id: "id-1".to_string()
        }
    );
}

#[test]
fn parse_birthday_handles_unknown_sentinel_and_blank() {
    assert_eq!(parse_birthday("Unknown").unwrap(), None);
    assert_eq!(parse_birthday("unknown").unwrap(), None);
    assert_eq!(parse_birthday("  ").unwrap(), None);
    assert_eq!(parse_birthday("1970-10-14").unwrap(), Some(date(1970, 10, 14)));
    assert!(matches!(
        parse_birthday("14/10/1970"),
        Err(MemberValidationError::InvalidBirthday { .. })
    ));
}

#[test]
fn deserialize_maps_missing_and_unknown_birthdays_to_none() {
    let unknown: Member = serde_json::from_value(serde_json::json!({
        "id": "rylee",
        "name": "Rylee",
        "relationship": "Step-granddaughter",
        "birthday": "Unknown"
    }))
    .unwrap();
    assert_eq!(unknown.birthday, None);
    assert_eq!(unknown.role_label, "Step-granddaughter");

    let missing: Member = serde_json::from_value(serde_json::json!({
        "id": "finn",
        "name": "Finn",
        "birthday": null
    }))
    .unwrap();
    assert_eq!(missing.birthday, None);
    assert_eq!(missing.role_label, "");
}

#[test]
fn deserialize_rejects_malformed_birthday() {
    let err = serde_json::from_value::<Member>(serde_json::json!({
        "id": "x",
        "name": "X",
        "birthday": "next tuesday"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("invalid birthday"), "unexpected error: {err}");
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let mut member = Member::with_id("laurie", "Laurie")
        .born_on(date(1960, 10, 14))
        .with_role("Wife");
    member.love_languages = vec![LoveLanguage::QualityTime, LoveLanguage::PhysicalTouch];

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["id"], "laurie");
    assert_eq!(json["relationship"], "Wife");
    assert_eq!(json["birthday"], "1960-10-14");
    assert_eq!(json["love_languages"][0], "quality_time");

    let decoded: Member = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, member);

    let no_birthday = serde_json::to_value(Member::with_id("finn", "Finn")).unwrap();
    assert!(no_birthday["birthday"].is_null());
}

#[test]
fn age_on_counts_completed_years() {
    let member = Member::with_id("john", "John").born_on(date(1952, 9, 3));

    assert_eq!(member.age_on(date(2025, 9, 2)), Some(72));
    assert_eq!(member.age_on(date(2025, 9, 3)), Some(73));
    assert_eq!(member.age_on(date(1952, 9, 3)), Some(0));
    assert_eq!(member.age_on(date(1950, 1, 1)), None);
    assert_eq!(Member::with_id("finn", "Finn").age_on(date(2025, 1, 1)), None);
}

#[test]
fn love_language_labels_are_human_readable() {
    assert_eq!(LoveLanguage::WordsOfAffirmation.label(), "Words of Affirmation");
    assert_eq!(LoveLanguage::ReceivingGifts.label(), "Receiving Gifts");
}

#[test]
fn relationship_validate_rejects_bad_records() {
    assert_eq!(
        RelationshipRecord::new("a", "a", RelationshipType::Child)
            .validate()
            .unwrap_err(),
        RelationshipValidationError::SelfLink {
            member_id: "a".to_string()
        }
    );
    assert_eq!(
        RelationshipRecord::new("", "b", RelationshipType::Child)
            .validate()
            .unwrap_err(),
        RelationshipValidationError::EmptyMemberId
    );
    assert_eq!(
        RelationshipRecord::new("a", "b", RelationshipType::Child)
            .with_strength(11)
            .validate()
            .unwrap_err(),
        RelationshipValidationError::StrengthOutOfRange { strength: 11 }
    );
    assert!(RelationshipRecord::new("a", "b", RelationshipType::Child)
        .with_strength(10)
        .validate()
        .is_ok());
}

#[test]
fn relationship_record_serializes_type_tag() {
    let record = RelationshipRecord::new("john", "finn", RelationshipType::StepChild);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["type"], "step_child");
    assert!(json.get("strength").is_none());

    let decoded: RelationshipRecord = serde_json::from_value(serde_json::json!({
        "a": "john",
        "b": "laurie",
        "type": "spouse",
        "strength": 9
    }))
    .unwrap();
    assert_eq!(decoded.kind, RelationshipType::Spouse);
    assert_eq!(decoded.strength, Some(9));
}
