use lineage_core::graph::relations::{EventPlace, PersonFiles, PersonPresences, SourceContains};
use lineage_core::model::event::{Event, EventType, PresenceRole};
use lineage_core::model::file::File;
use lineage_core::model::person::Person;
use lineage_core::model::place::Place;
use lineage_core::model::source::{Citation, Source};
use lineage_core::model::value::LocalizedName;
use lineage_core::{
    Ancestry, EntityRef, EventId, FileId, Identifiable, PersonId, PlaceId, SourceId,
};

#[test]
fn birth_scenario_keeps_every_side_consistent() {
    let mut ancestry = Ancestry::new();
    let p0 = ancestry.insert_person(Person::new("P0")).unwrap();
    let e0 = ancestry
        .insert_event(Event::new("E0", EventType::Birth))
        .unwrap();
    let place1 = ancestry
        .insert_place(Place::new(
            "Place1",
            vec![LocalizedName::new("Amsterdam", Some("nl".to_string()))],
        ))
        .unwrap();

    let presence = ancestry
        .add_presence(&p0, &e0, PresenceRole::Subject)
        .unwrap();
    ancestry
        .set_linked::<EventPlace>(&e0, Some(place1.clone()))
        .unwrap();

    assert_eq!(
        ancestry.place(&place1).unwrap().events().to_vec(),
        vec![e0.clone()]
    );
    assert_eq!(ancestry.start(&p0).unwrap().map(|event| event.id()), Some(&e0));
    assert!(ancestry.event(&e0).unwrap().presences().contains(&presence));

    ancestry
        .remove_related::<PersonPresences>(&p0, &presence)
        .unwrap();
    assert!(ancestry.event(&e0).unwrap().presences().is_empty());
    assert!(ancestry.start(&p0).unwrap().is_none());
}

#[test]
fn importer_style_build_is_symmetric_everywhere() {
    let mut ancestry = Ancestry::new();
    ancestry.insert_source(Source::new("S-archive", "City archive")).unwrap();
    ancestry.insert_source(Source::new("S-register", "Birth register")).unwrap();
    ancestry
        .add_related::<SourceContains, _>(
            &SourceId::new("S-archive"),
            [SourceId::new("S-register")],
        )
        .unwrap();
    ancestry
        .insert_citation(Citation::new("C0", "S-register"))
        .unwrap();

    let mut scan = File::new("F-scan", "/scans/register-page-12.png");
    scan.set_media_type(Some("image/png".to_string()));
    ancestry.insert_file(scan).unwrap();
    ancestry.insert_person(Person::new("P0")).unwrap();
    ancestry
        .add_related::<PersonFiles, _>(&PersonId::new("P0"), [FileId::new("F-scan")])
        .unwrap();

    let file = ancestry.file(&FileId::new("F-scan")).unwrap();
    assert_eq!(file.name(), "register-page-12.png");
    assert_eq!(file.basename(), "/scans/register-page-12");
    assert_eq!(file.extension(), Some("png"));
    assert_eq!(
        file.entities().to_vec(),
        vec![EntityRef::from(PersonId::new("P0"))]
    );
    assert_eq!(
        ancestry
            .source(&SourceId::new("S-register"))
            .unwrap()
            .citations()
            .len(),
        1
    );
    assert_eq!(
        ancestry.source_ancestors(&SourceId::new("S-register")).unwrap(),
        vec![SourceId::new("S-archive")]
    );
    assert!(ancestry.place(&PlaceId::new("nowhere")).is_none());
    assert!(ancestry.event(&EventId::new("nothing")).is_none());
}
