use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_derive::{Deserialize, Serialize};

use crate::belief::BeliefState;
use crate::utils::SlotName;

/// Decoder gate for one slot: copy the value from the dialogue (`Ptr`) or
/// classify it outright. Serialized as its fixed index, which downstream
/// consumers use as a class id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Ptr,
    DontCare,
    None,
}

impl Gate {
    pub fn index(self) -> usize {
        match self {
            Gate::Ptr => 0,
            Gate::DontCare => 1,
            Gate::None => 2,
        }
    }
}

impl Serialize for Gate {
    fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.index() as u64)
    }
}

impl<'de> Deserialize<'de> for Gate {
    fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u64::deserialize(deserializer)? {
            0 => Ok(Gate::Ptr),
            1 => Ok(Gate::DontCare),
            2 => Ok(Gate::None),
            other => Err(de::Error::custom(format!("invalid gate index: {}", other))),
        }
    }
}

/// Per-slot supervision aligned with a slot ontology: `generate_y[i]` and
/// `gating_label[i]` both describe the slot at position `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotTargets {
    pub generate_y: Vec<String>,
    pub gating_label: Vec<Gate>,
}

/// Projects a belief state onto `slots`. Slots absent from the belief get
/// the value "none" with a `None` gate; "dontcare" and "none" values get the
/// matching gate, everything else is pointed at.
pub fn build_targets(belief: &BeliefState, slots: &[SlotName]) -> SlotTargets {
    let mut generate_y = Vec::with_capacity(slots.len());
    let mut gating_label = Vec::with_capacity(slots.len());
    for slot in slots {
        match belief.get(slot) {
            Some(value) => {
                gating_label.push(match value {
                    "dontcare" => Gate::DontCare,
                    "none" => Gate::None,
                    _ => Gate::Ptr,
                });
                generate_y.push(value.to_string());
            }
            None => {
                generate_y.push("none".to_string());
                gating_label.push(Gate::None);
            }
        }
    }
    SlotTargets {
        generate_y,
        gating_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_targets_align_with_slot_positions() {
        // Given
        let slots = vec![
            "hotel-pricerange".to_string(),
            "hotel-parking".to_string(),
            "train-day".to_string(),
            "train-destination".to_string(),
        ];
        let belief: BeliefState = vec![
            ("train-destination".to_string(), "cambridge".to_string()),
            ("hotel-parking".to_string(), "dontcare".to_string()),
            ("train-day".to_string(), "none".to_string()),
        ]
        .into_iter()
        .collect();

        // When
        let targets = build_targets(&belief, &slots);

        // Then
        assert_eq!(
            vec![
                "none".to_string(),
                "dontcare".to_string(),
                "none".to_string(),
                "cambridge".to_string(),
            ],
            targets.generate_y
        );
        assert_eq!(
            vec![Gate::None, Gate::DontCare, Gate::None, Gate::Ptr],
            targets.gating_label
        );
    }

    #[test]
    fn test_belief_slots_outside_the_ontology_produce_no_targets() {
        // Given
        let slots = vec!["hotel-parking".to_string()];
        let belief: BeliefState = vec![
            ("bus-departure".to_string(), "cambridge".to_string()),
            ("hotel-parking".to_string(), "yes".to_string()),
        ]
        .into_iter()
        .collect();

        // When
        let targets = build_targets(&belief, &slots);

        // Then
        assert_eq!(vec!["yes".to_string()], targets.generate_y);
        assert_eq!(vec![Gate::Ptr], targets.gating_label);
    }

    #[test]
    fn test_gates_serialize_as_integers() {
        // Given
        let gates = vec![Gate::Ptr, Gate::DontCare, Gate::None];

        // When
        let value = serde_json::to_value(&gates).unwrap();

        // Then
        assert_eq!(json!([0, 1, 2]), value);
    }

    #[test]
    fn test_gates_deserialize_from_integers() {
        // Given
        let payload = "[2, 0, 1]";

        // When
        let gates: Vec<Gate> = serde_json::from_str(payload).unwrap();

        // Then
        assert_eq!(vec![Gate::None, Gate::Ptr, Gate::DontCare], gates);
    }

    #[test]
    fn test_out_of_range_gate_index_is_rejected() {
        // Given
        let payload = "[3]";

        // When
        let result: ::std::result::Result<Vec<Gate>, _> = serde_json::from_str(payload);

        // Then
        assert!(result.is_err());
    }
}
