//! Client-side sorting for the global deal history table.

use std::cmp::Ordering;
use strum::{AsRefStr, EnumIter, EnumString};

use crate::domain::portfolio::{Deal, DealType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SortColumn {
    Symbol,
    Type,
    Volume,
    Profit,
    Time,
    Magic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn glyph(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Active column and direction. Nothing is sorted until a header is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    active: Option<(SortColumn, SortDirection)>,
}

impl SortState {
    pub fn active(&self) -> Option<(SortColumn, SortDirection)> {
        self.active
    }

    /// Same column flips the direction; a new column starts ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        self.active = Some(match self.active {
            Some((current, direction)) if current == column => (column, direction.reversed()),
            _ => (column, SortDirection::Ascending),
        });
    }

    /// Glyph for a header; inactive headers get none.
    pub fn glyph_for(&self, column: SortColumn) -> &'static str {
        match self.active {
            Some((current, direction)) if current == column => direction.glyph(),
            _ => "",
        }
    }

    /// Stable sort of `deals` by the active column.
    pub fn apply(&self, deals: &mut [Deal]) {
        if let Some((column, direction)) = self.active {
            deals.sort_by(|a, b| {
                let ordering = compare(a, b, column);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
    }
}

fn type_rank(kind: DealType) -> u8 {
    match kind {
        DealType::Buy => 0,
        DealType::Sell => 1,
    }
}

fn compare(a: &Deal, b: &Deal, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Symbol => a.symbol.cmp(&b.symbol),
        SortColumn::Type => type_rank(a.kind).cmp(&type_rank(b.kind)),
        SortColumn::Volume => a.volume.total_cmp(&b.volume),
        SortColumn::Profit => a.profit.total_cmp(&b.profit),
        SortColumn::Time => a.time.cmp(&b.time),
        SortColumn::Magic => a.magic.cmp(&b.magic),
    }
}
