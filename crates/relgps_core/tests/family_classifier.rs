use relgps_core::{
    classify, family_overview, relationship_between, relationship_strength, FamilyDataset,
    Member, RelationshipLookup, RelationshipRecord, RelationshipType,
};

fn member(id: &str) -> Member {
    Member::with_id(id, id.to_uppercase())
}

fn ids(members: &[Member]) -> Vec<&str> {
    members.iter().map(|member| member.id.as_str()).collect()
}

#[test]
fn classifies_spouse_children_and_others() {
    let members = vec![member("main"), member("sp"), member("c1"), member("other")];
    let relationships = vec![
        RelationshipRecord::new("main", "sp", RelationshipType::Spouse),
        RelationshipRecord::new("main", "c1", RelationshipType::Child),
    ];

    let groups = classify("main", &members, &relationships);
    assert_eq!(groups.spouse.as_ref().map(|m| m.id.as_str()), Some("sp"));
    assert_eq!(ids(&groups.children), vec!["c1"]);
    assert!(groups.grandchildren.is_empty());
    assert_eq!(ids(&groups.others), vec!["other"]);
}

#[test]
fn member_without_record_falls_into_others() {
    let members = vec![member("main"), member("x")];

    let groups = classify("main", &members, &[]);
    assert!(groups.spouse.is_none());
    assert!(groups.children.is_empty());
    assert!(groups.grandchildren.is_empty());
    assert_eq!(ids(&groups.others), vec!["x"]);
}

#[test]
fn lookups_ignore_stored_field_order() {
    let members = vec![member("main"), member("kid"), member("grand")];
    let relationships = vec![
        RelationshipRecord::new("kid", "main", RelationshipType::StepChild),
        RelationshipRecord::new("grand", "main", RelationshipType::Grandchild),
    ];

    let groups = classify("main", &members, &relationships);
    assert_eq!(ids(&groups.children), vec!["kid"]);
    assert_eq!(ids(&groups.grandchildren), vec!["grand"]);
    assert_eq!(
        relationship_between(&relationships, "main", "kid"),
        RelationshipLookup::Recorded(RelationshipType::StepChild)
    );
    assert_eq!(
        relationship_between(&relationships, "kid", "main"),
        RelationshipLookup::Recorded(RelationshipType::StepChild)
    );
}

#[test]
fn first_spouse_or_partner_wins_and_later_ones_become_others() {
    let members = vec![member("main"), member("p1"), member("p2")];
    let relationships = vec![
        RelationshipRecord::new("main", "p2", RelationshipType::Spouse),
        RelationshipRecord::new("main", "p1", RelationshipType::Partner),
    ];

    let groups = classify("main", &members, &relationships);
    assert_eq!(groups.spouse.as_ref().map(|m| m.id.as_str()), Some("p1"));
    assert_eq!(ids(&groups.others), vec!["p2"]);
}

#[test]
fn missing_main_member_puts_everyone_in_others() {
    let members = vec![member("a"), member("b")];
    let relationships = vec![
        RelationshipRecord::new("ghost", "a", RelationshipType::Spouse),
        RelationshipRecord::new("ghost", "b", RelationshipType::Child),
    ];

    let groups = classify("ghost", &members, &relationships);
    assert!(groups.spouse.is_none());
    assert!(groups.children.is_empty());
    assert!(groups.grandchildren.is_empty());
    assert_eq!(ids(&groups.others), vec!["a", "b"]);
}

#[test]
fn main_member_is_never_bucketed() {
    let members = vec![member("x"), member("main"), member("y")];
    let relationships = vec![RelationshipRecord::new("main", "y", RelationshipType::Sibling)];

    let groups = classify("main", &members, &relationships);
    assert_eq!(ids(&groups.others), vec!["x", "y"]);
}

#[test]
fn only_links_to_main_member_drive_classification() {
    let members = vec![member("main"), member("kid"), member("kid_spouse")];
    let relationships = vec![
        RelationshipRecord::new("main", "kid", RelationshipType::Child),
        RelationshipRecord::new("kid", "kid_spouse", RelationshipType::Spouse),
    ];

    let groups = classify("main", &members, &relationships);
    assert!(groups.spouse.is_none());
    assert_eq!(ids(&groups.others), vec!["kid_spouse"]);
}

#[test]
fn first_matching_record_decides_the_type() {
    let relationships = vec![
        RelationshipRecord::new("main", "x", RelationshipType::Friend),
        RelationshipRecord::new("x", "main", RelationshipType::Child),
    ];

    assert_eq!(
        relationship_between(&relationships, "main", "x"),
        RelationshipLookup::Recorded(RelationshipType::Friend)
    );
}

#[test]
fn unrecorded_lookup_reports_family_tag_distinct_from_types() {
    let lookup = relationship_between(&[], "main", "x");

    assert_eq!(lookup, RelationshipLookup::Unrecorded);
    assert_eq!(lookup.tag(), "family");
    assert_eq!(lookup.kind(), None);
    assert!(RelationshipType::parse(lookup.tag()).is_none());
}

#[test]
fn strength_defaults_to_five() {
    let relationships = vec![
        RelationshipRecord::new("main", "sp", RelationshipType::Spouse).with_strength(9),
        RelationshipRecord::new("main", "c1", RelationshipType::Child),
    ];

    assert_eq!(relationship_strength(&relationships, "sp", "main"), 9);
    assert_eq!(relationship_strength(&relationships, "main", "c1"), 5);
    assert_eq!(relationship_strength(&relationships, "main", "nobody"), 5);
}

#[test]
fn sample_family_groups_around_main_member() {
    let dataset = FamilyDataset::sample().unwrap();
    let main = dataset.main_member().unwrap();

    let groups = classify(&main.id, &dataset.members, &dataset.relationships);
    assert_eq!(groups.spouse.as_ref().map(|m| m.id.as_str()), Some("laurie"));
    assert_eq!(ids(&groups.children), vec!["sarah"]);
    assert_eq!(
        ids(&groups.grandchildren),
        vec!["abigail", "peyton", "brady", "rylee", "mya", "finn"]
    );
    assert_eq!(ids(&groups.others), vec!["ryan", "haden"]);
}

#[test]
fn overview_counts_tracked_birthdays() {
    let dataset = FamilyDataset::sample().unwrap();

    let overview = family_overview(&dataset.members, &dataset.relationships);
    assert_eq!(overview.member_count, 11);
    assert_eq!(overview.relationship_count, 11);
    assert_eq!(overview.birthdays_tracked, 8);
}

#[test]
fn relationship_type_labels_are_title_cased() {
    assert_eq!(RelationshipType::StepChild.label(), "Step Child");
    assert_eq!(RelationshipType::InLaw.label(), "In Law");
    assert_eq!(RelationshipType::Spouse.to_string(), "spouse");
}
