use std::path::Path;

use failure::ResultExt;
use serde_json::Value;

use crate::belief::BeliefState;
use crate::corpus::Split;
use crate::errors::*;
use crate::utils::{split_domain_slot, DomainName, SlotName};

/// Domains retained from the raw ontology; everything else (police,
/// hospital, bus) is out of scope for state tracking.
pub const EXPERIMENT_DOMAINS: [&str; 5] = ["hotel", "train", "restaurant", "attraction", "taxi"];

/// Loads the slot ontology from a JSON map of `domain-slot` names to legal
/// values, preserving the file's key order.
///
/// Keys outside the experiment domains are dropped, names are lower-cased
/// and stripped of spaces (unless they contain "book", whose slot names keep
/// their interior space), and `drop_slots` entries are removed.
pub fn load_slot_ontology<P: AsRef<Path>>(
    path: P,
    drop_slots: &[SlotName],
) -> Result<Vec<SlotName>> {
    let file = crate::utils::open_resource(&path)?;
    let ontology: serde_json::Map<String, Value> = serde_json::from_reader(file)
        .with_context(|_| format!("Cannot deserialize ontology file '{:?}'", path.as_ref()))?;
    let slots = ontology
        .keys()
        .filter(|key| {
            let (domain, _) = split_domain_slot(key);
            EXPERIMENT_DOMAINS.contains(&domain)
        })
        .map(|key| normalize_slot_name(key))
        .filter(|slot| !drop_slots.contains(slot))
        .collect();
    Ok(slots)
}

fn normalize_slot_name(key: &str) -> SlotName {
    if key.contains("book") {
        key.to_lowercase()
    } else {
        key.replace(' ', "").to_lowercase()
    }
}

/// Restricts the slot ontology to the configured domain scope.
///
/// `except_domain` takes precedence over `only_domain`. On the test split the
/// exclusion is inverted: only the excluded domain's slots are kept, which is
/// what makes held-out-domain evaluation work.
pub fn scope_slots(
    slots: &[SlotName],
    split: Split,
    only_domain: Option<&str>,
    except_domain: Option<&str>,
) -> Vec<SlotName> {
    match (except_domain, only_domain) {
        (Some(except), _) => {
            if split.is_test() {
                slots.iter().filter(|s| s.contains(except)).cloned().collect()
            } else {
                slots.iter().filter(|s| !s.contains(except)).cloned().collect()
            }
        }
        (None, Some(only)) => slots.iter().filter(|s| s.contains(only)).cloned().collect(),
        (None, None) => slots.to_vec(),
    }
}

/// Applies the same domain scope to a turn's belief state, in place.
pub fn retain_scoped(
    belief: &mut BeliefState,
    split: Split,
    only_domain: Option<&str>,
    except_domain: Option<&str>,
) {
    match (except_domain, only_domain) {
        (Some(except), _) => {
            if split.is_test() {
                belief.retain(|slot, _| slot.contains(except));
            } else {
                belief.retain(|slot, _| !slot.contains(except));
            }
        }
        (None, Some(only)) => belief.retain(|slot, _| slot.contains(only)),
        (None, None) => {}
    }
}

/// Dialogue-level domain filter. Unlike slot scoping this is an exact
/// membership test on the dialogue's domain list, and both filters apply
/// independently.
pub fn keep_dialogue(
    domains: &[DomainName],
    split: Split,
    only_domain: Option<&str>,
    except_domain: Option<&str>,
) -> bool {
    if let Some(only) = only_domain {
        if !domains.iter().any(|domain| domain == only) {
            return false;
        }
    }
    if let Some(except) = except_domain {
        let contains = domains.iter().any(|domain| domain == except);
        if split.is_test() {
            if !contains {
                return false;
            }
        } else if contains {
            return false;
        }
    }
    true
}
