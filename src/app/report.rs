//! Read-only views over a finished `Registry`, printable as text or JSON.

use crate::core::registry::Registry;
use crate::domain::model::{PartType, Serial, Unit};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitRef {
    pub serial: Serial,
    pub category_tag: String,
}

impl UnitRef {
    fn of(unit: &Unit) -> Self {
        Self {
            serial: unit.serial(),
            category_tag: unit.category_tag().to_string(),
        }
    }
}

/// One part of a unit and the unit on the other side of its provenance edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartLine {
    pub part: PartType,
    pub descriptor: String,
    pub counterpart: Option<UnitRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientReport {
    pub unit: UnitRef,
    pub parts: Vec<PartLine>,
}

impl RecipientReport {
    /// `None` when `serial` is unknown or belongs to a donor.
    pub fn build(registry: &Registry, serial: Serial) -> Option<Self> {
        if !registry.is_recipient(serial) {
            return None;
        }
        let unit = registry.get_unit(serial)?;
        let origin = registry.origin_of(serial)?;

        let parts = PartType::ALL
            .into_iter()
            .map(|part| PartLine {
                part,
                descriptor: unit.part(part).to_string(),
                counterpart: origin
                    .get(&part)
                    .and_then(|donor| registry.get_unit(*donor))
                    .map(UnitRef::of),
            })
            .collect();

        Some(Self {
            unit: UnitRef::of(unit),
            parts,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonorReport {
    pub unit: UnitRef,
    /// `counterpart` is the recipient, or `None` while the part is unharvested.
    pub parts: Vec<PartLine>,
}

impl DonorReport {
    /// `None` when `serial` is unknown or belongs to a recipient.
    pub fn build(registry: &Registry, serial: Serial) -> Option<Self> {
        if registry.is_recipient(serial) {
            return None;
        }
        let unit = registry.get_unit(serial)?;
        let destination = registry.destination_of(serial);

        let parts = PartType::ALL
            .into_iter()
            .map(|part| PartLine {
                part,
                descriptor: unit.part(part).to_string(),
                counterpart: destination
                    .and_then(|parts| parts.get(&part))
                    .and_then(|recipient| registry.get_unit(*recipient))
                    .map(UnitRef::of),
            })
            .collect();

        Some(Self {
            unit: UnitRef::of(unit),
            parts,
        })
    }

    pub fn harvested(&self) -> usize {
        self.parts.iter().filter(|line| line.counterpart.is_some()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub seed: u64,
    pub donors: usize,
    pub recipients: usize,
    pub recipients_by_tag: BTreeMap<String, usize>,
    pub unharvested: BTreeMap<PartType, usize>,
}

impl SummaryReport {
    pub fn build(registry: &Registry, seed: u64) -> Self {
        let mut recipients_by_tag = BTreeMap::new();
        for unit in registry.recipients() {
            *recipients_by_tag
                .entry(unit.category_tag().to_string())
                .or_insert(0) += 1;
        }

        Self {
            seed,
            donors: registry.donors().count(),
            recipients: registry.recipients().count(),
            recipients_by_tag,
            unharvested: PartType::ALL
                .into_iter()
                .map(|part| (part, registry.inventory().remaining(part)))
                .collect(),
        }
    }
}

fn descriptor_text(line: &PartLine) -> String {
    match line.part {
        PartType::Brain => format!("{} GHz", line.descriptor),
        _ => line.descriptor.clone(),
    }
}

impl fmt::Display for RecipientReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.unit.category_tag)?;
        writeln!(f, "Serial Number: {}", self.unit.serial)?;
        for line in &self.parts {
            match &line.counterpart {
                Some(donor) => writeln!(
                    f,
                    "{}: {} ({}: serial number {})",
                    label(line.part),
                    descriptor_text(line),
                    donor.category_tag,
                    donor.serial
                )?,
                None => writeln!(f, "{}: {}", label(line.part), descriptor_text(line))?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for DonorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.unit.category_tag)?;
        writeln!(f, "Serial Number: {}", self.unit.serial)?;
        for line in &self.parts {
            match &line.counterpart {
                Some(recipient) => writeln!(
                    f,
                    "{}: {} -> donated to {} (serial number {})",
                    label(line.part),
                    descriptor_text(line),
                    recipient.category_tag,
                    recipient.serial
                )?,
                None => writeln!(
                    f,
                    "{}: {} -> not harvested yet",
                    label(line.part),
                    descriptor_text(line)
                )?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f, "Old line: {} donors", self.donors)?;
        writeln!(f, "New line: {} recipients", self.recipients)?;
        for (tag, count) in &self.recipients_by_tag {
            writeln!(f, "    {} robots of model {}", count, tag)?;
        }
        writeln!(f, "Parts still in inventory:")?;
        for (part, remaining) in &self.unharvested {
            writeln!(f, "    {}: {}", label(*part), remaining)?;
        }
        Ok(())
    }
}

fn label(part: PartType) -> &'static str {
    match part {
        PartType::Brain => "Brain",
        PartType::Mobility => "Mobility",
        PartType::Vision => "Vision",
        PartType::Arms => "Arms",
        PartType::MediaCenter => "Media Center",
        PartType::PowerPlant => "Power Plant",
    }
}
