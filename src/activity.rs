//! Activity records and the metric cards bound to them

use crate::theme::Gradient;
use ratatui::style::Color;
use std::collections::HashSet;
use thiserror::Error;

/// Stable identifier assigned when a record is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u32);

impl RecordId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub id: RecordId,
    pub name: String,
    pub count: u32,
    pub description: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("activity at position {0} has an empty name")]
    EmptyName(usize),
    #[error("duplicate activity name {0:?}")]
    DuplicateName(String),
}

/// Ordered, immutable list of records shown on one screen.
///
/// Record ids are their positions, so `get(id)` is an index lookup and card
/// order, chart order and id order always agree.
#[derive(Debug, Clone, Default)]
pub struct ActivityRecords {
    records: Vec<ActivityRecord>,
}

impl ActivityRecords {
    /// Build from `(name, count, description)` entries, keeping their order.
    pub fn from_entries<I, S, D>(entries: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (S, u32, D)>,
        S: Into<String>,
        D: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for (pos, (name, count, description)) in entries.into_iter().enumerate() {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(RecordError::EmptyName(pos));
            }
            if !seen.insert(name.clone()) {
                return Err(RecordError::DuplicateName(name));
            }
            records.push(ActivityRecord {
                id: RecordId(pos as u32),
                name,
                count,
                description: description.into(),
            });
        }
        Ok(Self { records })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, id: RecordId) -> Option<&ActivityRecord> {
        self.records.get(id.index())
    }

    #[inline]
    pub fn at(&self, index: usize) -> Option<&ActivityRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityRecord> {
        self.records.iter()
    }

    /// Largest count, used to scale bar heights
    pub fn max_count(&self) -> u32 {
        self.records.iter().map(|r| r.count).max().unwrap_or(0)
    }
}

/// Presentation of a card that is not derived from its record
#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub icon: &'static str,
    pub value: String,
    pub gradient: Gradient,
}

/// One tile of the card row, linked to the record it opens
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub record: RecordId,
    pub caption: String,
    pub icon: &'static str,
    pub value: String,
    pub gradient: Gradient,
}

/// Pair every record with a style, in record order. Styles repeat when there
/// are fewer styles than records.
pub fn build_cards(records: &ActivityRecords, styles: &[CardStyle]) -> Vec<MetricCard> {
    if styles.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .zip(styles.iter().cycle())
        .map(|(record, style)| MetricCard {
            record: record.id,
            caption: record.name.clone(),
            icon: style.icon,
            value: style.value.clone(),
            gradient: style.gradient,
        })
        .collect()
}

/// Static activity data used until a real source exists.
pub fn sample_records() -> ActivityRecords {
    ActivityRecords::from_entries([
        (
            "Swift Basics",
            10,
            "Optionals, closures and value types from the beginner track.",
        ),
        (
            "UI/UX Design",
            7,
            "Layout grids, color contrast and prototyping exercises.",
        ),
        ("Combine Tutorial", 5, ""),
    ])
    .unwrap_or_default()
}

pub fn sample_card_styles() -> Vec<CardStyle> {
    vec![
        CardStyle {
            icon: "✔",
            value: "24".into(),
            gradient: Gradient::new(Color::Rgb(70, 190, 110), Color::Rgb(60, 120, 230)),
        },
        CardStyle {
            icon: "◷",
            value: "5".into(),
            gradient: Gradient::new(Color::Rgb(245, 160, 60), Color::Rgb(220, 70, 70)),
        },
        CardStyle {
            icon: "✉",
            value: "12".into(),
            gradient: Gradient::new(Color::Rgb(150, 90, 220), Color::Rgb(235, 120, 180)),
        },
    ]
}
