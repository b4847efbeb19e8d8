use screenplay_parser::models::{ElementKind, Lighting};
use screenplay_parser::parser::fountain_parser::FountainParser;
use screenplay_parser::parser::location_parser::parse_scene_location;

#[test]
fn test_full_heading_breakdown() {
    let location = parse_scene_location("INT. COFFEE SHOP - KITCHEN - DAY (1995)");

    assert_eq!(location.lighting, Lighting::Interior);
    assert_eq!(location.scene, "COFFEE SHOP");
    assert_eq!(location.setup.as_deref(), Some("KITCHEN"));
    assert_eq!(location.time_of_day.as_deref(), Some("DAY"));
    assert_eq!(location.modifiers, vec!["1995"]);
    assert_eq!(location.original_text, "INT. COFFEE SHOP - KITCHEN - DAY (1995)");
}

#[test]
fn test_location_key_survives_reformatting() {
    let curly = parse_scene_location("INT. Will\u{2019}s House - DAY");
    let straight = parse_scene_location("INT. WILL'S HOUSE - NIGHT");

    assert_eq!(curly.location_key(), straight.location_key());
    assert_eq!(curly.location_key(), "WILL'S HOUSE");
}

#[test]
fn test_setup_changes_the_key() {
    let hall = parse_scene_location("INT. HOUSE - FRONT HALL - DAY");
    let bare = parse_scene_location("INT. HOUSE - DAY");

    assert_eq!(hall.location_key(), "HOUSE - FRONT HALL");
    assert_eq!(bare.location_key(), "HOUSE");
    assert_ne!(hall.location_key(), bare.location_key());
}

#[test]
fn test_unrecognized_heading_degrades_to_unknown() {
    let location = parse_scene_location("OVER BLACK");

    assert_eq!(location.lighting, Lighting::Unknown);
    assert_eq!(location.scene, "OVER BLACK");
    assert!(location.setup.is_none());
    assert!(location.time_of_day.is_none());
    assert_eq!(location.location_key(), "OVER BLACK");
}

#[test]
fn test_scene_location_through_the_parser() {
    let script = "INT./EXT. CAR - MOVING - NIGHT [RAIN]\n\nShe grips the wheel.\n";
    let mut parser = FountainParser::new();
    let document = parser.parse(script);

    let heading = document
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::SceneHeading)
        .expect("script opens on a heading");
    let location = heading.scene_location().expect("headings always map to a location");

    assert_eq!(location.lighting, Lighting::InteriorExterior);
    assert_eq!(location.scene, "CAR - MOVING");
    assert_eq!(location.time_of_day.as_deref(), Some("NIGHT"));
    assert_eq!(location.modifiers, vec!["RAIN"]);

    let action = document
        .elements
        .iter()
        .find(|e| e.kind == ElementKind::Action)
        .expect("script has an action line");
    assert!(action.scene_location().is_none(), "only headings carry a location");
}
