//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lineage_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use lineage_core::graph::relations::{EventPlace, PersonChildren};
use lineage_core::model::event::{Event, EventType, PresenceRole};
use lineage_core::model::person::Person;
use lineage_core::model::place::Place;
use lineage_core::model::value::LocalizedName;
use lineage_core::{
    init_logging, Ancestry, EventId, GraphResult, Identifiable, LoggingConfig, PersonId, PlaceId,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = init_logging(&LoggingConfig::stderr("warn")) {
        eprintln!("lineage_core logging error={err}");
        return ExitCode::FAILURE;
    }

    println!("lineage_core version={}", lineage_core::core_version());
    match sample_ancestry() {
        Ok(ancestry) => {
            report(&ancestry);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("lineage_core sample error={err}");
            ExitCode::FAILURE
        }
    }
}

fn sample_ancestry() -> GraphResult<Ancestry> {
    let mut ancestry = Ancestry::new();
    let parent = ancestry.insert_person(Person::new("P-parent"))?;
    let child = ancestry.insert_person(Person::new("P-child"))?;
    let place = ancestry.insert_place(Place::new(
        "L-home",
        vec![LocalizedName::new("Home", None)],
    ))?;
    let birth = ancestry.insert_event(Event::new("E-birth", EventType::Birth))?;

    ancestry.add_related::<PersonChildren, _>(&parent, [child.clone()])?;
    ancestry.set_linked::<EventPlace>(&birth, Some(place))?;
    ancestry.add_presence(&child, &birth, PresenceRole::Subject)?;
    info!("event=sample_built module=cli status=ok");
    Ok(ancestry)
}

fn report(ancestry: &Ancestry) {
    let child = PersonId::new("P-child");
    let parents = ancestry
        .person(&child)
        .map(|person| person.parents().len())
        .unwrap_or_default();
    let start = ancestry
        .start(&child)
        .ok()
        .flatten()
        .map(|event| event.id().to_string())
        .unwrap_or_else(|| "none".to_string());
    let place_events = ancestry
        .place(&PlaceId::new("L-home"))
        .map(|place| place.events().contains(&EventId::new("E-birth")))
        .unwrap_or_default();

    println!("lineage_core people={}", ancestry.people().len());
    println!("lineage_core child_parents={parents}");
    println!("lineage_core child_start={start}");
    println!("lineage_core place_has_birth={place_events}");
}
