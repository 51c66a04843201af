use chrono::Utc;

use workroom_edge::domain::{
    AnnotationArea, DEFAULT_ANNOTATION_TYPE, DocumentAnnotation, NewDocumentAnnotation, UserId,
    WorkRoomId,
};

#[test]
fn given_negative_width_when_building_area_then_returns_error() {
    assert!(AnnotationArea::new(10.0, 20.0, -1.0, 5.0).is_err());
    assert!(AnnotationArea::new(10.0, 20.0, 1.0, -5.0).is_err());
}

#[test]
fn given_zero_sized_area_when_building_then_accepts_point_marker() {
    let area = AnnotationArea::new(12.5, 40.0, 0.0, 0.0).unwrap();

    assert_eq!(area.left, 12.5);
    assert_eq!(area.width, 0.0);
}

#[test]
fn given_stored_annotation_when_serialized_then_area_is_flattened_into_area_columns() {
    let annotation = DocumentAnnotation::from_new(
        NewDocumentAnnotation {
            document_id: None,
            parent_file_storage_key: "room/plan.pdf".to_string(),
            work_room_id: WorkRoomId::new(),
            page_number: 2,
            area: AnnotationArea::new(10.0, 20.0, 30.0, 40.0).unwrap(),
            content: "check totals".to_string(),
            annotation_type: DEFAULT_ANNOTATION_TYPE.to_string(),
            image_file_storage_key: None,
            is_ocr: false,
            ocr_text: None,
            created_by: UserId::new(),
        },
        Utc::now(),
    );

    let value = serde_json::to_value(&annotation).unwrap();

    assert_eq!(value["area_left"], 10.0);
    assert_eq!(value["area_top"], 20.0);
    assert_eq!(value["area_width"], 30.0);
    assert_eq!(value["area_height"], 40.0);
    assert!(value.get("area").is_none());
    assert_eq!(value["annotation_type"], "manual");
}
