use lineage_core::graph::relations::{
    PlaceEnclosedBy, PlaceEncloses, SourceContainedBy, SourceContains,
};
use lineage_core::model::place::Place;
use lineage_core::model::source::Source;
use lineage_core::{Ancestry, EntityKind, GraphError, PlaceId, SourceId};

fn place(id: &str) -> PlaceId {
    PlaceId::new(id)
}

fn source(id: &str) -> SourceId {
    SourceId::new(id)
}

fn place_chain() -> Ancestry {
    let mut ancestry = Ancestry::new();
    for id in ["A", "B", "C"] {
        ancestry.insert_place(Place::new(id, Vec::new())).unwrap();
    }
    ancestry
        .add_related::<PlaceEncloses, _>(&place("A"), [place("B")])
        .unwrap();
    ancestry
        .set_linked::<PlaceEnclosedBy>(&place("C"), Some(place("B")))
        .unwrap();
    ancestry
}

#[test]
fn place_tree_links_both_directions() {
    let ancestry = place_chain();

    assert_eq!(ancestry.place(&place("A")).unwrap().enclosed_by(), None);
    assert_eq!(
        ancestry.place(&place("C")).unwrap().enclosed_by(),
        Some(&place("B"))
    );
    assert_eq!(
        ancestry.place(&place("B")).unwrap().encloses().to_vec(),
        vec![place("C")]
    );
    assert_eq!(
        ancestry.place(&place("A")).unwrap().encloses().to_vec(),
        vec![place("B")]
    );
    assert_eq!(
        ancestry.place_ancestors(&place("C")).unwrap(),
        vec![place("B"), place("A")]
    );
    assert_eq!(
        ancestry.place_descendants(&place("A")).unwrap(),
        vec![place("B"), place("C")]
    );
}

#[test]
fn enclosing_an_ancestor_is_rejected() {
    let mut ancestry = place_chain();

    let err = ancestry
        .add_related::<PlaceEncloses, _>(&place("C"), [place("A")])
        .expect_err("A already encloses C transitively");
    assert_eq!(
        err,
        GraphError::CyclicContainment {
            kind: EntityKind::Place,
            node: "A".to_string(),
            parent: "C".to_string(),
        }
    );

    let err = ancestry
        .set_linked::<PlaceEnclosedBy>(&place("A"), Some(place("C")))
        .expect_err("single-valued side is guarded too");
    assert!(matches!(err, GraphError::CyclicContainment { .. }));

    assert_eq!(ancestry.place(&place("A")).unwrap().enclosed_by(), None);
    assert!(ancestry.place(&place("C")).unwrap().encloses().is_empty());
}

#[test]
fn moving_a_subtree_is_allowed() {
    let mut ancestry = place_chain();
    ancestry.insert_place(Place::new("D", Vec::new())).unwrap();

    ancestry
        .set_linked::<PlaceEnclosedBy>(&place("B"), Some(place("D")))
        .unwrap();

    assert!(ancestry.place(&place("A")).unwrap().encloses().is_empty());
    assert_eq!(
        ancestry.place(&place("D")).unwrap().encloses().to_vec(),
        vec![place("B")]
    );
    assert_eq!(
        ancestry.place_ancestors(&place("C")).unwrap(),
        vec![place("B"), place("D")]
    );
}

#[test]
fn source_containment_mirrors_and_guards_cycles() {
    let mut ancestry = Ancestry::new();
    for id in ["Archive", "Register", "Volume"] {
        ancestry.insert_source(Source::new(id, id)).unwrap();
    }
    ancestry
        .add_related::<SourceContains, _>(&source("Archive"), [source("Register")])
        .unwrap();
    ancestry
        .set_linked::<SourceContainedBy>(&source("Volume"), Some(source("Register")))
        .unwrap();

    assert_eq!(
        ancestry.source(&source("Register")).unwrap().contained_by(),
        Some(&source("Archive"))
    );
    assert_eq!(
        ancestry.source_descendants(&source("Archive")).unwrap(),
        vec![source("Register"), source("Volume")]
    );
    assert_eq!(
        ancestry.source_ancestors(&source("Volume")).unwrap(),
        vec![source("Register"), source("Archive")]
    );

    let err = ancestry
        .set_linked::<SourceContainedBy>(&source("Archive"), Some(source("Volume")))
        .expect_err("cycle must be rejected");
    assert!(matches!(
        err,
        GraphError::CyclicContainment {
            kind: EntityKind::Source,
            ..
        }
    ));

    ancestry
        .remove_related::<SourceContains>(&source("Register"), &source("Volume"))
        .unwrap();
    assert_eq!(
        ancestry.source(&source("Volume")).unwrap().contained_by(),
        None
    );
}

#[test]
fn walks_on_unknown_nodes_fail() {
    let ancestry = Ancestry::new();
    assert!(matches!(
        ancestry.place_ancestors(&place("nowhere")),
        Err(GraphError::UnknownEntity {
            kind: EntityKind::Place,
            ..
        })
    ));
}
