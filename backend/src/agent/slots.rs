//! Booking slots
//!
//! The five pieces of information the assistant collects, in the order it
//! asks for them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of a booking slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotName {
    /// Departure city
    OrCity,
    /// Destination city
    DstCity,
    /// Departure date (YYYY-MM-DD)
    DepDate,
    /// Return date (YYYY-MM-DD)
    RetDate,
    /// Maximum budget, currency included
    Budget,
}

impl SlotName {
    /// All slots, in asking order
    pub const ALL: [SlotName; 5] = [
        SlotName::OrCity,
        SlotName::DstCity,
        SlotName::DepDate,
        SlotName::RetDate,
        SlotName::Budget,
    ];

    /// Wire key of the slot
    pub fn key(&self) -> &'static str {
        match self {
            SlotName::OrCity => "or_city",
            SlotName::DstCity => "dst_city",
            SlotName::DepDate => "dep_date",
            SlotName::RetDate => "ret_date",
            SlotName::Budget => "budget",
        }
    }

    /// Question asked when this slot is the next one missing
    pub fn question(&self) -> &'static str {
        match self {
            SlotName::OrCity => "What is your departure city?",
            SlotName::DstCity => "What is your destination city?",
            SlotName::DepDate => "When do you want to depart? (e.g., 2026-07-10)",
            SlotName::RetDate => "When do you want to return? (e.g., 2026-07-15)",
            SlotName::Budget => "What is your maximum budget? (e.g., 500 EUR)",
        }
    }

    /// Question used when the extractor could not be reached
    pub fn fallback_question(&self) -> &'static str {
        match self {
            SlotName::OrCity => "What is your departure city?",
            SlotName::DstCity => "What is your destination city?",
            SlotName::DepDate => "When do you want to depart? (YYYY-MM-DD format)",
            SlotName::RetDate => "When do you want to return? (YYYY-MM-DD format)",
            SlotName::Budget => "What is your maximum budget?",
        }
    }
}

/// Collected slot values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slots {
    /// Departure city
    pub or_city: Option<String>,
    /// Destination city
    pub dst_city: Option<String>,
    /// Departure date
    pub dep_date: Option<String>,
    /// Return date
    pub ret_date: Option<String>,
    /// Maximum budget
    pub budget: Option<String>,
}

impl Slots {
    /// Value of one slot
    pub fn get(&self, name: SlotName) -> Option<&str> {
        self.field(name).as_deref()
    }

    /// Set one slot
    pub fn set(&mut self, name: SlotName, value: impl Into<String>) {
        *self.field_mut(name) = Some(value.into());
    }

    fn field(&self, name: SlotName) -> &Option<String> {
        match name {
            SlotName::OrCity => &self.or_city,
            SlotName::DstCity => &self.dst_city,
            SlotName::DepDate => &self.dep_date,
            SlotName::RetDate => &self.ret_date,
            SlotName::Budget => &self.budget,
        }
    }

    fn field_mut(&mut self, name: SlotName) -> &mut Option<String> {
        match name {
            SlotName::OrCity => &mut self.or_city,
            SlotName::DstCity => &mut self.dst_city,
            SlotName::DepDate => &mut self.dep_date,
            SlotName::RetDate => &mut self.ret_date,
            SlotName::Budget => &mut self.budget,
        }
    }

    /// Slots still empty, in asking order
    pub fn missing(&self) -> Vec<SlotName> {
        SlotName::ALL
            .into_iter()
            .filter(|name| self.get(*name).is_none())
            .collect()
    }

    /// Whether every slot has a value
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Copy every filled slot of `update` into `self`
    /// Empty values never overwrite existing ones
    pub fn merge(&mut self, update: &Slots) {
        for name in SlotName::ALL {
            if let Some(value) = update.get(name) {
                self.set(name, value);
            }
        }
    }

    /// Read slots from a loosely typed JSON object
    /// Numbers and booleans are kept as text; null, blank and `"null"` count as empty
    pub fn from_json_lenient(value: &Value) -> Self {
        let mut slots = Slots::default();
        for name in SlotName::ALL {
            let text = match value.get(name.key()) {
                Some(Value::String(s)) => s.trim().to_string(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => continue,
            };
            if !text.is_empty() && !text.eq_ignore_ascii_case("null") {
                slots.set(name, text);
            }
        }
        slots
    }
}
