//! Per-archetype rosters built from per-character matches.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::ArchetypeCatalog;
use super::scorer::{ArchetypeMatch, MembershipTier};

/// A character listed under an archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub character: String,
    pub score: f64,
}

/// One archetype with the characters that matched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRegistryEntry {
    pub profile: String,
    pub description: String,
    /// Full members, best score first
    pub members: Vec<RosterEntry>,
    /// Partial members, best score first
    pub partial_members: Vec<RosterEntry>,
    /// Rendered criteria, see [`ArchetypeDefinition::describe_criteria`](super::ArchetypeDefinition::describe_criteria)
    pub criteria_summary: String,
}

/// One entry per catalog archetype, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRegistry {
    entries: Vec<ProfileRegistryEntry>,
}

impl ProfileRegistry {
    pub fn entries(&self) -> &[ProfileRegistryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProfileRegistryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, profile: &str) -> Option<&ProfileRegistryEntry> {
        self.entries.iter().find(|e| e.profile == profile)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text roster listing, one block per archetype:
    ///
    /// ```text
    /// ### The Aggressor
    /// Members: VILLAIN (0.612)
    /// Partial: none
    /// ```
    pub fn render_summary(&self) -> String {
        self.entries
            .iter()
            .map(|e| {
                format!(
                    "### {}\nMembers: {}\nPartial: {}",
                    e.profile,
                    join_scored(&e.members),
                    join_scored(&e.partial_members)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// `NAME (0.612), OTHER (0.500)` in roster order, or `none`.
fn join_scored(roster: &[RosterEntry]) -> String {
    if roster.is_empty() {
        return "none".to_string();
    }
    roster
        .iter()
        .map(|r| format!("{} ({:.3})", r.character, r.score))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Inverts per-character matches into per-archetype rosters.
#[derive(Debug, Clone)]
pub struct ProfileRegistryBuilder {
    catalog: Arc<ArchetypeCatalog>,
}

impl ProfileRegistryBuilder {
    pub fn new(catalog: Arc<ArchetypeCatalog>) -> Self {
        Self { catalog }
    }

    /// Build the registry.
    ///
    /// Always yields exactly one entry per catalog archetype, including
    /// archetypes nobody matched. Rosters are sorted by score descending,
    /// then character name.
    pub fn build(&self, assignments: &BTreeMap<String, Vec<ArchetypeMatch>>) -> ProfileRegistry {
        let mut entries: Vec<ProfileRegistryEntry> = self
            .catalog
            .iter()
            .map(|archetype| ProfileRegistryEntry {
                profile: archetype.name.clone(),
                description: archetype.description.clone(),
                members: Vec::new(),
                partial_members: Vec::new(),
                criteria_summary: archetype.describe_criteria(),
            })
            .collect();

        for (character, matches) in assignments {
            for m in matches {
                let Some(idx) = self.catalog.position(&m.archetype) else {
                    warn!(
                        character = %character,
                        archetype = %m.archetype,
                        "Ignoring match for archetype not in catalog"
                    );
                    continue;
                };
                let roster = match m.tier {
                    MembershipTier::Full => &mut entries[idx].members,
                    MembershipTier::Partial => &mut entries[idx].partial_members,
                    MembershipTier::None => continue,
                };
                roster.push(RosterEntry {
                    character: character.clone(),
                    score: m.score,
                });
            }
        }

        for entry in &mut entries {
            entry.members.sort_by(roster_order);
            entry.partial_members.sort_by(roster_order);
        }

        ProfileRegistry { entries }
    }
}

fn roster_order(a: &RosterEntry, b: &RosterEntry) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.character.cmp(&b.character))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(archetype: &str, character: &str, score: f64, tier: MembershipTier) -> ArchetypeMatch {
        ArchetypeMatch {
            archetype: archetype.to_string(),
            character: character.to_string(),
            score,
            tier,
            contributions: Vec::new(),
        }
    }

    #[test]
    fn test_empty_assignments_yield_full_registry() {
        let catalog = Arc::new(ArchetypeCatalog::standard());
        let registry = ProfileRegistryBuilder::new(catalog.clone()).build(&BTreeMap::new());
        assert_eq!(registry.len(), catalog.len());
        assert!(registry.iter().all(|e| e.members.is_empty() && e.partial_members.is_empty()));
        assert_eq!(registry.entries()[0].profile, "The Aggressor");
        assert!(registry.entries()[0]
            .criteria_summary
            .starts_with("  - liwc_anger: high (ideal=0.80, weight=1.00)"));
        println!("[PASS] test_empty_assignments_yield_full_registry - {} entries", registry.len());
    }

    #[test]
    fn test_rosters_sorted_and_tiered() {
        let catalog = Arc::new(ArchetypeCatalog::standard());
        let mut assignments = BTreeMap::new();
        assignments.insert(
            "ZED".to_string(),
            vec![
                matched("The Rebel", "ZED", 0.7, MembershipTier::Full),
                matched("The Cynic", "ZED", 0.35, MembershipTier::Partial),
                matched("The Mentor", "ZED", 0.1, MembershipTier::None),
            ],
        );
        assignments.insert(
            "AMY".to_string(),
            vec![matched("The Rebel", "AMY", 0.7, MembershipTier::Full)],
        );
        assignments.insert(
            "BOB".to_string(),
            vec![
                matched("The Rebel", "BOB", 0.9, MembershipTier::Full),
                matched("Unknown Type", "BOB", 0.9, MembershipTier::Full),
            ],
        );

        let registry = ProfileRegistryBuilder::new(catalog.clone()).build(&assignments);
        assert_eq!(registry.len(), catalog.len());

        let rebel = registry.get("The Rebel").expect("rebel entry");
        let names: Vec<&str> = rebel.members.iter().map(|r| r.character.as_str()).collect();
        assert_eq!(names, vec!["BOB", "AMY", "ZED"]);

        let cynic = registry.get("The Cynic").expect("cynic entry");
        assert!(cynic.members.is_empty());
        assert_eq!(cynic.partial_members[0].character, "ZED");

        let mentor = registry.get("The Mentor").expect("mentor entry");
        assert!(mentor.members.is_empty() && mentor.partial_members.is_empty());

        let summary = registry.render_summary();
        assert!(summary.contains(
            "### The Rebel\nMembers: BOB (0.900), AMY (0.700), ZED (0.700)\nPartial: none"
        ));
        assert!(summary.contains("### The Cynic\nMembers: none\nPartial: ZED (0.350)"));
        println!("[PASS] test_rosters_sorted_and_tiered - rebel roster {:?}", names);
    }
}
