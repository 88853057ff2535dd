use std::collections::HashMap;
use std::iter::FromIterator;

use lazy_static::lazy_static;

use crate::corpus::BeliefGroup;
use crate::utils::SlotName;

/// Insertion-ordered slot -> value mapping.
///
/// Re-inserting an existing slot updates its value but keeps its original
/// position. Iteration order is observable downstream (belief-vocabulary
/// index assignment, `turn_belief` label strings), so it is part of the
/// contract, not an implementation detail.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BeliefState {
    entries: Vec<(SlotName, String)>,
}

impl BeliefState {
    pub fn new() -> Self {
        BeliefState {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, slot: SlotName, value: String) {
        match self.entries.iter_mut().find(|(s, _)| *s == slot) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((slot, value)),
        }
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_slot(&self, slot: &str) -> bool {
        self.entries.iter().any(|(s, _)| s == slot)
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.entries.retain(|(slot, value)| keep(slot, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SlotName, String)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `"slot-value"` label strings in insertion order.
    pub fn labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(slot, value)| format!("{}-{}", slot, value))
            .collect()
    }
}

impl FromIterator<(SlotName, String)> for BeliefState {
    fn from_iter<T: IntoIterator<Item = (SlotName, String)>>(iter: T) -> Self {
        let mut state = BeliefState::new();
        for (slot, value) in iter {
            state.insert(slot, value);
        }
        state
    }
}

impl<'a> IntoIterator for &'a BeliefState {
    type Item = &'a (SlotName, String);
    type IntoIter = ::std::slice::Iter<'a, (SlotName, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

lazy_static! {
    static ref VALUE_TYPOS: HashMap<&'static str, &'static str> = [
        // venue types
        ("guesthouse", "guest house"),
        ("guesthouses", "guest house"),
        ("guest", "guest house"),
        ("mutiple sports", "multiple sports"),
        ("sports", "multiple sports"),
        ("mutliple sports", "multiple sports"),
        ("swimmingpool", "swimming pool"),
        ("concerthall", "concert hall"),
        ("concert", "concert hall"),
        ("pool", "swimming pool"),
        ("night club", "nightclub"),
        ("mus", "museum"),
        ("ol", "architecture"),
        ("colleges", "college"),
        ("coll", "college"),
        ("architectural", "architecture"),
        ("musuem", "museum"),
        ("churches", "church"),
        // areas
        ("center", "centre"),
        ("center of town", "centre"),
        ("near city center", "centre"),
        ("in the north", "north"),
        ("cen", "centre"),
        ("east side", "east"),
        ("east area", "east"),
        ("west part of town", "west"),
        ("ce", "centre"),
        ("town center", "centre"),
        ("centre of cambridge", "centre"),
        ("city center", "centre"),
        ("the south", "south"),
        ("scentre", "centre"),
        ("town centre", "centre"),
        ("in town", "centre"),
        ("north part of town", "north"),
        ("centre of town", "centre"),
        ("cb30aq", "none"),
        // price ranges
        ("mode", "moderate"),
        ("moderate -ly", "moderate"),
        ("mo", "moderate"),
        // days
        ("next friday", "friday"),
        ("monda", "monday"),
        // parking
        ("free parking", "free"),
        // internet
        ("free internet", "yes"),
        // stars
        ("4 star", "4"),
        ("4 stars", "4"),
        ("0 star rarting", "none"),
        // catch-alls
        ("y", "yes"),
        ("any", "dontcare"),
        ("n", "no"),
        ("does not care", "dontcare"),
        ("not men", "none"),
        ("not", "none"),
        ("not mentioned", "none"),
        ("", "none"),
        ("not mendtioned", "none"),
        ("3 .", "3"),
        ("does not", "no"),
        ("fun", "none"),
        ("art", "none"),
    ]
    .iter()
    .cloned()
    .collect();
}

const HOTEL_TYPE_TO_NONE: &[&str] = &[
    "nigh",
    "moderate -ly priced",
    "bed and breakfast",
    "centre",
    "venetian",
    "intern",
    "a cheap -er hotel",
];
const HOTEL_TYPE_TO_HOTEL: &[&str] = &["hotel with free parking and free wifi", "4", "3 star hotel"];
const ATTRACTION_TYPE_TO_NONE: &[&str] = &["gastropub", "la raza", "galleria", "gallery", "science", "m"];
const RESTAURANT_AREA_TO_NONE: &[&str] = &["stansted airport", "cambridge", "silver street"];
const ATTRACTION_AREA_TO_NONE: &[&str] = &["norwich", "ely", "museum", "same area as hotel"];

/// Reduces a turn's raw annotation groups to a canonical belief state.
///
/// The first labeled pair of each group is authoritative; later groups naming
/// the same slot overwrite the value in place. Groups without labeled pairs
/// and slots in `drop_slots` are skipped. Values of ontology slots then go
/// through the label corrections; slots outside the ontology pass through
/// untouched. Total and deterministic: annotation noise is corrected or kept,
/// never rejected.
pub fn normalize_belief(
    raw: &[BeliefGroup],
    ontology: &[SlotName],
    drop_slots: &[SlotName],
) -> BeliefState {
    let mut belief: BeliefState = raw
        .iter()
        .filter_map(|group| group.slots.first())
        .filter(|(slot, _)| !drop_slots.contains(slot))
        .cloned()
        .collect();
    for slot in ontology {
        if let Some(value) = belief.get(slot) {
            let corrected = correct_value(slot, value);
            belief.insert(slot.clone(), corrected);
        }
    }
    belief
}

/// Applies the label corrections to one slot's value: the typo table first,
/// then the slot/value mismatch chain, then the out-of-ontology overrides.
fn correct_value(slot: &str, value: &str) -> String {
    let mut value = match VALUE_TYPOS.get(value) {
        Some(fixed) => fixed.to_string(),
        None => value.to_string(),
    };

    // values recorded against a slot they cannot belong to
    if (slot == "hotel-type" && HOTEL_TYPE_TO_NONE.contains(&value.as_str()))
        || (slot == "hotel-internet" && value == "4")
        || (slot == "hotel-pricerange" && value == "2")
        || (slot == "attraction-type" && ATTRACTION_TYPE_TO_NONE.contains(&value.as_str()))
        || (slot.contains("area") && value == "moderate")
        || (slot.contains("day") && value == "t")
    {
        value = "none".to_string();
    } else if slot == "hotel-type" && HOTEL_TYPE_TO_HOTEL.contains(&value.as_str()) {
        value = "hotel".to_string();
    } else if slot == "hotel-star" && value == "3 star hotel" {
        value = "3".to_string();
    } else if slot.contains("area") {
        match value.as_str() {
            "no" => value = "north".to_string(),
            "we" => value = "west".to_string(),
            "cent" => value = "centre".to_string(),
            _ => {}
        }
    } else if slot.contains("day") {
        match value.as_str() {
            "we" => value = "wednesday".to_string(),
            "no" => value = "none".to_string(),
            _ => {}
        }
    } else if slot.contains("price") && value == "ch" {
        value = "cheap".to_string();
    } else if slot.contains("internet") && value == "free" {
        value = "yes".to_string();
    }

    // classification values with no ontology counterpart
    if (slot == "restaurant-area" && RESTAURANT_AREA_TO_NONE.contains(&value.as_str()))
        || (slot == "attraction-area" && ATTRACTION_AREA_TO_NONE.contains(&value.as_str()))
    {
        value = "none".to_string();
    }

    value
}
