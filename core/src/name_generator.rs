//! Deterministic people and zone names for demo rosters.

use crate::rng::DemoRng;

pub struct NameGenerator;

impl NameGenerator {
    pub fn generate_full_name(rng: &mut DemoRng) -> String {
        let first = rng.pick(Self::first_names()).copied().unwrap_or("Alex");
        let last = rng.pick(Self::last_names()).copied().unwrap_or("Smith");
        format!("{first} {last}")
    }

    /// Zone names are handed out in order and wrap with a numeric suffix.
    pub fn zone_name(index: usize) -> String {
        let names = Self::zone_names();
        let base = names[index % names.len()];
        match index / names.len() {
            0 => base.to_string(),
            n => format!("{base} {}", n + 1),
        }
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "Aaron", "Bianca", "Carlos", "Dana", "Elijah", "Fatima", "Gavin", "Hana",
            "Isaac", "Jasmine", "Kenji", "Leah", "Marcus", "Nadia", "Omar", "Priya",
            "Quinn", "Rosa", "Samuel", "Tessa", "Umar", "Valeria", "Wesley", "Ximena",
            "Yusuf", "Zoe", "Andre", "Brooke", "Caleb", "Delia", "Ethan", "Grace",
            "Hector", "Imani", "Jonah", "Keira", "Luis", "Maya", "Noah", "Olivia",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Alvarez", "Brennan", "Castillo", "Dawson", "Ellison", "Fischer", "Guerrero",
            "Hollis", "Ibarra", "Jennings", "Kowalski", "Lindqvist", "Mendoza", "Nakamura",
            "Okafor", "Petrov", "Quintero", "Ramirez", "Sullivan", "Tanaka", "Underwood",
            "Vasquez", "Whitaker", "Yates", "Zimmerman", "Abbott", "Barrera", "Carver",
            "Delgado", "Foster", "Galloway", "Hughes", "Keller", "Lowery", "Moreno",
        ]
    }

    fn zone_names() -> &'static [&'static str] {
        &["North", "South", "East", "West", "Central", "Lakeshore", "Valley", "Metro"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{DemoStream, RngBank};

    #[test]
    fn name_generation_is_deterministic() {
        let mut rng1 = RngBank::new(12345).stream(DemoStream::Names);
        let mut rng2 = RngBank::new(12345).stream(DemoStream::Names);
        for _ in 0..20 {
            assert_eq!(
                NameGenerator::generate_full_name(&mut rng1),
                NameGenerator::generate_full_name(&mut rng2),
                "Same seed should produce same name"
            );
        }
    }

    #[test]
    fn generates_two_part_names() {
        let mut rng = RngBank::new(1).stream(DemoStream::Names);
        for _ in 0..100 {
            let name = NameGenerator::generate_full_name(&mut rng);
            assert_eq!(name.split_whitespace().count(), 2, "bad name: {name}");
        }
    }

    #[test]
    fn zone_names_wrap_with_suffix() {
        assert_eq!(NameGenerator::zone_name(0), "North");
        assert_eq!(NameGenerator::zone_name(8), "North 2");
        assert_eq!(NameGenerator::zone_name(9), "South 2");
    }
}
