//! Built-in achievement definitions.

use super::{Achievement, AchievementKind};

/// Static description of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub target: u32,
    pub kind: AchievementKind,
}

impl AchievementDef {
    /// Fresh, locked state for this definition.
    pub fn to_achievement(&self) -> Achievement {
        Achievement {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            unlocked: false,
            unlock_date: None,
            progress: 0,
            target: self.target,
            kind: self.kind,
        }
    }
}

const fn consecutive(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    target: u32,
) -> AchievementDef {
    AchievementDef {
        id,
        name,
        description,
        target,
        kind: AchievementKind::Consecutive,
    }
}

const fn total(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    target: u32,
) -> AchievementDef {
    AchievementDef {
        id,
        name,
        description,
        target,
        kind: AchievementKind::Total,
    }
}

/// All definitions, streak achievements first, each family by target.
pub const DEFINITIONS: [AchievementDef; 12] = [
    consecutive("consecutive_3", "Beginner", "Focus for 3 consecutive days", 3),
    consecutive("consecutive_7", "Persistent", "Focus for 7 consecutive days", 7),
    consecutive("consecutive_14", "Enthusiast", "Focus for 14 consecutive days", 14),
    consecutive("consecutive_30", "Focus Expert", "Focus for 30 consecutive days", 30),
    consecutive("consecutive_60", "Focus Master", "Focus for 60 consecutive days", 60),
    consecutive("consecutive_100", "Focus Legend", "Focus for 100 consecutive days", 100),
    total("total_10", "Getting Started", "Complete 10 pomodoros in total", 10),
    total("total_50", "Advancing", "Complete 50 pomodoros in total", 50),
    total("total_100", "Proficient", "Complete 100 pomodoros in total", 100),
    total("total_200", "Professional", "Complete 200 pomodoros in total", 200),
    total("total_500", "Specialist", "Complete 500 pomodoros in total", 500),
    total("total_1000", "Legend", "Complete 1000 pomodoros in total", 1000),
];

pub fn find(id: &str) -> Option<&'static AchievementDef> {
    DEFINITIONS.iter().find(|d| d.id == id)
}

/// Locked state for every definition, in catalog order.
pub fn seed() -> Vec<Achievement> {
    DEFINITIONS.iter().map(AchievementDef::to_achievement).collect()
}
