//! Roster — the organizational tree and its flattened people list.
//!
//! The tree document has zones (one optional lead + ordered members)
//! plus flat management and warehouse lists. Everything downstream
//! works on the flat, deduplicated list produced by `flatten_roster`.

use crate::types::PersonId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::HashSet};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Manager,
    Supervisor,
    #[serde(rename = "MIT Lead")]
    MitLead,
    #[serde(rename = "MIT Tech")]
    MitTech,
    #[serde(rename = "Demo Tech")]
    DemoTech,
    Fleet,
    #[serde(rename = "Fleet Safety")]
    FleetSafety,
    Auditor,
    Warehouse,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Manager     => "Manager",
            Role::Supervisor  => "Supervisor",
            Role::MitLead     => "MIT Lead",
            Role::MitTech     => "MIT Tech",
            Role::DemoTech    => "Demo Tech",
            Role::Fleet       => "Fleet",
            Role::FleetSafety => "Fleet Safety",
            Role::Auditor     => "Auditor",
            Role::Warehouse   => "Warehouse",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id:   PersonId,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Termination date. The person is active only strictly before it.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub in_training: bool,
    /// Training is complete on and after this date.
    #[serde(default)]
    pub training_end_date: Option<NaiveDate>,
    /// A lead who also runs routes and counts toward route headcount.
    #[serde(default)]
    pub second_shift_lead: bool,
}

impl Person {
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            hire_date: None,
            end_date: None,
            in_training: false,
            training_end_date: None,
            second_shift_lead: false,
        }
    }

    pub fn is_active(&self, reference: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| end > reference)
    }

    /// A trainee with no end date is permanently in training.
    pub fn is_done_training(&self, reference: NaiveDate) -> bool {
        !self.in_training || self.training_end_date.is_some_and(|end| end <= reference)
    }

    /// MIT Techs run routes; so does a lead designated for second shift.
    pub fn is_route_runner(&self) -> bool {
        self.role == Role::MitTech || self.second_shift_lead
    }
}

/// Whether `person` counts toward operational headcount on `reference`.
pub fn is_eligible_route_runner(person: &Person, reference: NaiveDate) -> bool {
    person.is_active(reference) && person.is_done_training(reference)
}

/// Route runners who are eligible on `reference`.
pub fn eligible_headcount(roster: &[Person], reference: NaiveDate) -> usize {
    roster
        .iter()
        .filter(|p| p.is_route_runner() && is_eligible_route_runner(p, reference))
        .count()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub name: String,
    #[serde(default)]
    pub lead: Option<Person>,
    #[serde(default)]
    pub members: Vec<Person>,
}

/// The organizational tree document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgChart {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub management: Vec<Person>,
    #[serde(default)]
    pub warehouse: Vec<Person>,
}

impl OrgChart {
    pub fn zone_mut(&mut self, zone_name: &str) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.name == zone_name)
    }

    /// Append a member to the named zone, creating the zone if needed.
    pub fn add_to_zone(&mut self, zone_name: &str, person: Person) {
        match self.zone_mut(zone_name) {
            Some(zone) => zone.members.push(person),
            None => self.zones.push(Zone {
                name: zone_name.to_string(),
                lead: None,
                members: vec![person],
            }),
        }
    }

    /// Fill or clear the lead slot. Returns the previous lead.
    pub fn set_zone_lead(&mut self, zone_name: &str, lead: Option<Person>) -> Option<Person> {
        match self.zone_mut(zone_name) {
            Some(zone) => std::mem::replace(&mut zone.lead, lead),
            None => {
                self.zones.push(Zone {
                    name: zone_name.to_string(),
                    lead,
                    members: Vec::new(),
                });
                None
            }
        }
    }

    pub fn find_person(&self, id: &str) -> Option<&Person> {
        self.people().find(|p| p.id == id)
    }

    /// Apply a profile edit to every copy of the person in the tree.
    /// Returns false when the id is not present.
    pub fn update_person<F: FnMut(&mut Person)>(&mut self, id: &str, mut edit: F) -> bool {
        let mut found = false;
        for zone in &mut self.zones {
            if let Some(lead) = zone.lead.as_mut().filter(|l| l.id == id) {
                edit(lead);
                found = true;
            }
            for member in zone.members.iter_mut().filter(|m| m.id == id) {
                edit(member);
                found = true;
            }
        }
        for p in self.management.iter_mut().chain(self.warehouse.iter_mut()) {
            if p.id == id {
                edit(p);
                found = true;
            }
        }
        found
    }

    /// Splice the person out of every list and lead slot.
    /// Returns how many entries were removed.
    pub fn remove_person(&mut self, id: &str) -> usize {
        let mut removed = 0;
        for zone in &mut self.zones {
            if zone.lead.as_ref().is_some_and(|l| l.id == id) {
                zone.lead = None;
                removed += 1;
            }
            let before = zone.members.len();
            zone.members.retain(|m| m.id != id);
            removed += before - zone.members.len();
        }
        for list in [&mut self.management, &mut self.warehouse] {
            let before = list.len();
            list.retain(|p| p.id != id);
            removed += before - list.len();
        }
        removed
    }

    /// Every person slot in document order, duplicates included.
    fn people(&self) -> impl Iterator<Item = &Person> {
        self.zones
            .iter()
            .flat_map(|z| z.lead.iter().chain(z.members.iter()))
            .chain(self.management.iter())
            .chain(self.warehouse.iter())
    }
}

/// Flatten the tree into unique people. Empty lead slots are skipped and
/// the first occurrence of an id wins.
pub fn flatten_roster(chart: &OrgChart) -> Vec<Person> {
    let mut seen: HashSet<&str> = HashSet::new();
    chart
        .people()
        .filter(|p| seen.insert(p.id.as_str()))
        .cloned()
        .collect()
}

/// Primary collation key: canonical decomposition with combining marks
/// dropped, then lowercased. "Émile" keys as "emile".
pub fn name_sort_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Locale-style name ordering: base letters first, ignoring accents and
/// case; then accents and case; then the exact string.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    name_sort_key(a)
        .cmp(&name_sort_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

pub fn sorted_by_name(mut roster: Vec<Person>) -> Vec<Person> {
    roster.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));
    roster
}
