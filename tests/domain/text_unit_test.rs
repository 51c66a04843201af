use workroom_edge::domain::{UnitSequenceBuilder, UnitType};

#[test]
fn given_mixed_units_when_building_then_only_classified_units_consume_ordinals() {
    let mut builder = UnitSequenceBuilder::new();
    builder.push(UnitType::Title, "Heading");
    builder.push(UnitType::Other, "Header text");
    builder.push(UnitType::Paragraph, "Body");
    builder.push(UnitType::Table, "A\tB");

    let units = builder.finish();

    let ordinals: Vec<Option<u32>> = units.iter().map(|u| u.ordinal).collect();
    assert_eq!(ordinals, vec![Some(0), None, Some(1), Some(2)]);
}

#[test]
fn given_blank_text_when_pushing_then_unit_is_dropped_without_consuming_ordinal() {
    let mut builder = UnitSequenceBuilder::new();
    builder.push(UnitType::Paragraph, "   \n\t");
    builder.push(UnitType::Paragraph, "  kept  ");

    let units = builder.finish();

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].text, "kept");
    assert_eq!(units[0].ordinal, Some(0));
}

#[test]
fn given_numbered_push_when_building_then_ordinal_is_taken_from_source() {
    let mut builder = UnitSequenceBuilder::new();
    builder.push_numbered(UnitType::Slide, 1, "First slide");
    builder.push_numbered(UnitType::Slide, 2, "");
    builder.push_numbered(UnitType::Slide, 3, "Third slide");

    let units = builder.finish();

    let ordinals: Vec<Option<u32>> = units.iter().map(|u| u.ordinal).collect();
    assert_eq!(ordinals, vec![Some(1), Some(3)]);
}

#[test]
fn given_unit_type_strings_when_parsing_then_round_trips_and_rejects_unknown() {
    for unit_type in [
        UnitType::Title,
        UnitType::List,
        UnitType::Table,
        UnitType::Paragraph,
        UnitType::Slide,
        UnitType::Other,
    ] {
        assert_eq!(unit_type.as_str().parse::<UnitType>(), Ok(unit_type));
    }
    assert!("heading".parse::<UnitType>().is_err());
}

#[test]
fn given_other_type_when_checking_classification_then_is_unclassified() {
    assert!(!UnitType::Other.is_classified());
    assert!(UnitType::Slide.is_classified());
}
