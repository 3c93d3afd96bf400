//! Roster tests — flattening, roster edits, eligibility.

use chrono::NaiveDate;
use labor_desk_core::roster::{
    compare_names, eligible_headcount, flatten_roster, is_eligible_route_runner, name_sort_key,
    sorted_by_name, OrgChart, Person, Role, Zone,
};
use std::cmp::Ordering;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn sample_chart() -> OrgChart {
    let mut chart = OrgChart::default();
    chart.zones.push(Zone {
        name: "North".into(),
        lead: Some(Person::new("lead-n", "Nora", Role::MitLead)),
        members: vec![
            Person::new("t1", "Tom", Role::MitTech),
            Person::new("t2", "Tia", Role::DemoTech),
        ],
    });
    chart.zones.push(Zone {
        name: "South".into(),
        lead: None,
        members: vec![Person::new("t3", "Sam", Role::MitTech)],
    });
    chart.management.push(Person::new("m1", "Mia", Role::Manager));
    // Also listed in a zone: must not be duplicated.
    chart.management.push(Person::new("t1", "Tom", Role::MitTech));
    chart.warehouse.push(Person::new("w1", "Wes", Role::Warehouse));
    chart
}

#[test]
fn flatten_skips_empty_leads_and_deduplicates() {
    let roster = flatten_roster(&sample_chart());
    let ids: Vec<&str> = roster.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["lead-n", "t1", "t2", "t3", "m1", "w1"]);
}

#[test]
fn flatten_is_idempotent() {
    let chart = sample_chart();
    let once = flatten_roster(&chart);
    let twice = flatten_roster(&chart);
    assert_eq!(once, twice);

    let rebuilt = OrgChart { management: once.clone(), ..OrgChart::default() };
    assert_eq!(flatten_roster(&rebuilt), once, "flattening a flat list changes nothing");
}

/// Missing arrays in the stored document deserialize as empty.
#[test]
fn document_with_missing_arrays_is_empty_roster() {
    let chart: OrgChart = serde_json::from_str(r#"{ "zones": [ { "name": "East" } ] }"#)
        .expect("parse org chart");
    assert!(flatten_roster(&chart).is_empty());

    let chart: OrgChart = serde_json::from_str("{}").expect("parse empty");
    assert!(flatten_roster(&chart).is_empty());
}

#[test]
fn person_document_uses_camel_case_fields() {
    let person: Person = serde_json::from_str(
        r#"{
            "id": "t9", "name": "Ana", "role": "MIT Tech",
            "hireDate": "2023-05-01", "inTraining": true, "trainingEndDate": "2024-04-01"
        }"#,
    )
    .expect("parse person");
    assert_eq!(person.role, Role::MitTech);
    assert_eq!(person.hire_date, Some(d("2023-05-01")));
    assert!(person.in_training);
    assert_eq!(person.training_end_date, Some(d("2024-04-01")));
    assert_eq!(person.end_date, None);
    assert!(!person.second_shift_lead);
}

#[test]
fn eligibility_requires_active_and_trained() {
    let reference = d("2024-03-31");

    let plain = Person::new("a", "A", Role::MitTech);
    assert!(is_eligible_route_runner(&plain, reference));

    let mut leaving = plain.clone();
    leaving.end_date = Some(reference);
    assert!(!is_eligible_route_runner(&leaving, reference), "end date equal to reference is inactive");
    leaving.end_date = Some(d("2024-04-01"));
    assert!(is_eligible_route_runner(&leaving, reference));

    let mut trainee = plain.clone();
    trainee.in_training = true;
    assert!(!is_eligible_route_runner(&trainee, reference), "no end date means still training");
    trainee.training_end_date = Some(reference);
    assert!(is_eligible_route_runner(&trainee, reference), "training ends on the reference date");
    trainee.training_end_date = Some(d("2024-04-01"));
    assert!(!is_eligible_route_runner(&trainee, reference));

    let mut both = trainee.clone();
    both.training_end_date = Some(d("2024-01-01"));
    both.end_date = Some(d("2024-02-01"));
    assert!(!is_eligible_route_runner(&both, reference));
}

#[test]
fn headcount_counts_eligible_route_runners_only() {
    let mut chart = sample_chart();
    chart.update_person("lead-n", |p| p.second_shift_lead = true);
    chart.add_to_zone("South", {
        let mut p = Person::new("t4", "Tess", Role::MitTech);
        p.in_training = true;
        p
    });
    let roster = flatten_roster(&chart);
    // lead-n (second shift), t1, t3. Not t2 (Demo Tech), t4 (training), m1, w1.
    assert_eq!(eligible_headcount(&roster, d("2024-03-31")), 3);
}

#[test]
fn roster_edits() {
    let mut chart = sample_chart();

    chart.add_to_zone("West", Person::new("t5", "Will", Role::MitTech));
    assert!(chart.find_person("t5").is_some());
    assert_eq!(chart.zones.len(), 3);

    let previous = chart.set_zone_lead("South", Some(Person::new("lead-s", "Sol", Role::MitLead)));
    assert!(previous.is_none());
    assert_eq!(chart.find_person("lead-s").map(|p| p.name.as_str()), Some("Sol"));

    assert!(chart.update_person("t3", |p| p.name = "Samuel".into()));
    assert!(!chart.update_person("nobody", |p| p.name = "x".into()));
    assert_eq!(chart.find_person("t3").map(|p| p.name.as_str()), Some("Samuel"));

    // t1 is in a zone and in management.
    assert_eq!(chart.remove_person("t1"), 2);
    assert!(chart.find_person("t1").is_none());
    assert_eq!(chart.remove_person("lead-n"), 1);
    assert!(chart.zones[0].lead.is_none());
}

#[test]
fn sort_by_name_ignores_case() {
    let roster = vec![
        Person::new("1", "bea", Role::MitTech),
        Person::new("2", "Al", Role::MitTech),
        Person::new("3", "Cy", Role::MitTech),
    ];
    let names: Vec<String> = sorted_by_name(roster).into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Al", "bea", "Cy"]);
}

#[test]
fn accented_names_collate_with_their_base_letters() {
    assert_eq!(name_sort_key("Émile"), "emile");
    assert_eq!(name_sort_key("Ñuñez"), "nunez");
    assert_eq!(compare_names("Émile", "Zoe"), Ordering::Less);
    assert_eq!(compare_names("émile", "Emily"), Ordering::Less);
    assert_eq!(compare_names("Zoë", "Zoe"), Ordering::Greater, "accent breaks the tie");
    assert_eq!(compare_names("ada", "Ada"), Ordering::Greater, "exact string breaks the last tie");

    let roster = vec![
        Person::new("1", "Óscar", Role::MitTech),
        Person::new("2", "Nadia", Role::MitTech),
        Person::new("3", "Pat", Role::MitTech),
    ];
    let names: Vec<String> = sorted_by_name(roster).into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Nadia", "Óscar", "Pat"]);
}
