use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identity of a unit. Donors and recipients share one serial namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Serial(u32);

impl Serial {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Serial {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Serial)
    }
}

/// The six harvestable part categories, in allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartType {
    Brain,
    Mobility,
    Vision,
    Arms,
    MediaCenter,
    PowerPlant,
}

impl PartType {
    pub const ALL: [PartType; 6] = [
        PartType::Brain,
        PartType::Mobility,
        PartType::Vision,
        PartType::Arms,
        PartType::MediaCenter,
        PartType::PowerPlant,
    ];

    /// Brain and mobility are picked before anything else, so no donor can
    /// already hold two of the recipient's slots when they are chosen.
    pub fn is_leading(self) -> bool {
        matches!(self, PartType::Brain | PartType::Mobility)
    }

    /// Position in allocation order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartType::Brain => "brain",
            PartType::Mobility => "mobility",
            PartType::Vision => "vision",
            PartType::Arms => "arms",
            PartType::MediaCenter => "media center",
            PartType::PowerPlant => "power plant",
        }
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category serial map used by both directions of the provenance ledger.
pub type PartMap = BTreeMap<PartType, Serial>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitParts {
    pub brain: String,
    pub mobility: String,
    pub vision: String,
    pub arms: String,
    pub media_center: String,
    pub power_plant: String,
}

impl UnitParts {
    /// Builds a descriptor set by asking `pick` for each category in allocation order.
    pub fn try_from_fn<E>(
        mut pick: impl FnMut(PartType) -> std::result::Result<String, E>,
    ) -> std::result::Result<Self, E> {
        Ok(Self {
            brain: pick(PartType::Brain)?,
            mobility: pick(PartType::Mobility)?,
            vision: pick(PartType::Vision)?,
            arms: pick(PartType::Arms)?,
            media_center: pick(PartType::MediaCenter)?,
            power_plant: pick(PartType::PowerPlant)?,
        })
    }

    pub fn get(&self, part: PartType) -> &str {
        match part {
            PartType::Brain => &self.brain,
            PartType::Mobility => &self.mobility,
            PartType::Vision => &self.vision,
            PartType::Arms => &self.arms,
            PartType::MediaCenter => &self.media_center,
            PartType::PowerPlant => &self.power_plant,
        }
    }
}

/// A generated unit. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    category_tag: String,
    serial: Serial,
    #[serde(flatten)]
    parts: UnitParts,
}

impl Unit {
    pub fn new(category_tag: impl Into<String>, serial: Serial, parts: UnitParts) -> Self {
        Self {
            category_tag: category_tag.into(),
            serial,
            parts,
        }
    }

    pub fn category_tag(&self) -> &str {
        &self.category_tag
    }

    pub fn serial(&self) -> Serial {
        self.serial
    }

    pub fn part(&self, part: PartType) -> &str {
        self.parts.get(part)
    }

    pub fn parts(&self) -> &UnitParts {
        &self.parts
    }
}

/// Inclusive range serials are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialRange {
    pub min: u32,
    pub max: u32,
}

impl SerialRange {
    pub fn contains(&self, serial: Serial) -> bool {
        (self.min..=self.max).contains(&serial.get())
    }

    pub fn size(&self) -> u64 {
        if self.max < self.min {
            0
        } else {
            u64::from(self.max - self.min) + 1
        }
    }
}

impl Default for SerialRange {
    fn default() -> Self {
        Self {
            min: 1_000_000,
            max: 9_999_999,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Option lists every generated descriptor is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub donor_tags: Vec<String>,
    pub recipient_tags: Vec<String>,
    pub brain: Vec<String>,
    pub mobility: Vec<String>,
    pub vision: Vec<String>,
    pub arms: Vec<String>,
    pub media_center: Vec<String>,
    pub power_plant: Vec<String>,
}

impl Catalog {
    pub fn options(&self, part: PartType) -> &[String] {
        match part {
            PartType::Brain => &self.brain,
            PartType::Mobility => &self.mobility,
            PartType::Vision => &self.vision,
            PartType::Arms => &self.arms,
            PartType::MediaCenter => &self.media_center,
            PartType::PowerPlant => &self.power_plant,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            donor_tags: strings(&["mk1", "mk2", "mk3", "mk4", "mk5"]),
            recipient_tags: strings(&[
                "Andy the Android",
                "Betty the Busibot",
                "Bobi the Racedroid",
                "Fred the Friendlybot",
            ]),
            brain: strings(&["2.5", "3.5", "4.5"]),
            mobility: strings(&["caterpillar tracks", "wheels", "legs"]),
            vision: strings(&["heat vision", "full colour", "night vision"]),
            arms: strings(&["claws", "grippers", "articulated fingers"]),
            media_center: strings(&["sony", "jvc", "meridian"]),
            power_plant: strings(&["lithium", "hydrogen", "plasma"]),
        }
    }
}
