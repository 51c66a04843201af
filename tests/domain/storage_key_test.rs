use workroom_edge::domain::StorageKey;

#[test]
fn given_blank_key_when_parsing_then_returns_error() {
    assert!(StorageKey::parse("").is_err());
    assert!(StorageKey::parse("   ").is_err());
}

#[test]
fn given_key_when_building_public_path_then_bucket_precedes_key() {
    let key = StorageKey::parse("room-1/1700000000_report.docx").unwrap();

    assert_eq!(
        key.public_object_path("work_room_files"),
        "storage/v1/object/public/work_room_files/room-1/1700000000_report.docx"
    );
}

#[test]
fn given_key_with_leading_slash_when_building_public_path_then_slash_is_not_doubled() {
    let key = StorageKey::parse("/room-1/report.pdf").unwrap();

    assert_eq!(
        key.public_object_path("docs"),
        "storage/v1/object/public/docs/room-1/report.pdf"
    );
}

#[test]
fn given_key_when_displayed_then_shows_raw_value() {
    let key = StorageKey::parse("room/a b.pptx").unwrap();
    assert_eq!(key.to_string(), "room/a b.pptx");
    assert_eq!(key.as_str(), "room/a b.pptx");
}
