use crate::corpus::DialogueTurn;
use crate::errors::*;
use crate::extraction::{Speaker, TurnAnnotator, TurnContext};
use crate::vocab::{SYS_TOKEN, USR_TOKEN};

/// One composed turn: the raw `segment` to append to the running dialogue,
/// and the trimmed `history` snapshot that goes on the emitted sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedTurn {
    pub segment: String,
    pub history: String,
}

/// Builds dialogue-history segments, system utterance first.
///
/// With speaker tokens the segment reads ` SYS {system} USR {user}`, without
/// them ` {system} ; {user} ;`. Every piece is glued with a single leading
/// space and nothing is collapsed, so an empty system utterance leaves a
/// doubled space in the middle of the segment. Only the stored snapshot is
/// trimmed, the running string never is.
#[derive(Debug)]
pub struct TurnComposer {
    use_speaker_tokens: bool,
}

impl TurnComposer {
    pub fn new(use_speaker_tokens: bool) -> Self {
        TurnComposer { use_speaker_tokens }
    }

    pub fn compose(
        &self,
        annotator: &TurnAnnotator,
        history: &str,
        turn: &DialogueTurn,
    ) -> Result<ComposedTurn> {
        let context = TurnContext {
            turn_labels: &turn.turn_label,
        };
        let mut segment = String::new();
        if self.use_speaker_tokens {
            segment.push_str(&format!(" {}", SYS_TOKEN));
        }
        let system = annotator.annotate(&turn.system_transcript, Speaker::System, &context)?;
        segment.push_str(&format!(" {}", system));
        if self.use_speaker_tokens {
            segment.push_str(&format!(" {} ", USR_TOKEN));
        } else {
            segment.push_str(" ; ");
        }
        let user = annotator.annotate(&turn.transcript, Speaker::User, &context)?;
        segment.push_str(&user);
        if !self.use_speaker_tokens {
            segment.push_str(" ;");
        }
        let history = format!("{}{}", history, segment).trim().to_string();
        Ok(ComposedTurn { segment, history })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{IdentityExtractor, ValueExtractor};

    fn turn(system: &str, user: &str) -> DialogueTurn {
        DialogueTurn {
            turn_idx: 0,
            domain: "hotel".to_string(),
            system_transcript: system.to_string(),
            transcript: user.to_string(),
            turn_label: vec![],
            belief_state: vec![],
        }
    }

    fn plain_annotator() -> TurnAnnotator {
        TurnAnnotator::new(Box::new(IdentityExtractor), false)
    }

    #[test]
    fn test_segment_with_speaker_tokens() {
        // Given
        let composer = TurnComposer::new(true);
        let turn = turn("how can i help ?", "i need a hotel");

        // When
        let composed = composer.compose(&plain_annotator(), "", &turn).unwrap();

        // Then
        assert_eq!(" SYS how can i help ? USR i need a hotel", composed.segment);
        assert_eq!("SYS how can i help ? USR i need a hotel", composed.history);
    }

    #[test]
    fn test_segment_with_semicolon_separators() {
        // Given
        let composer = TurnComposer::new(false);
        let turn = turn("how can i help ?", "i need a hotel");

        // When
        let composed = composer.compose(&plain_annotator(), "", &turn).unwrap();

        // Then
        assert_eq!(" how can i help ? ; i need a hotel ;", composed.segment);
        assert_eq!("how can i help ? ; i need a hotel ;", composed.history);
    }

    #[test]
    fn test_empty_system_utterance_keeps_its_slot_in_the_segment() {
        // Given
        let composer = TurnComposer::new(false);
        let turn = turn("", "i need a hotel");

        // When
        let composed = composer.compose(&plain_annotator(), "", &turn).unwrap();

        // Then
        assert_eq!("  ; i need a hotel ;", composed.segment);
        assert_eq!("; i need a hotel ;", composed.history);
    }

    #[test]
    fn test_history_snapshot_preserves_interior_spacing() {
        // Given
        let composer = TurnComposer::new(true);
        let first = turn("", "i need a hotel");
        let second = turn("any area in mind ?", "the centre");
        let annotator = plain_annotator();

        // When
        let mut running = String::new();
        let composed_first = composer.compose(&annotator, &running, &first).unwrap();
        running.push_str(&composed_first.segment);
        let composed_second = composer.compose(&annotator, &running, &second).unwrap();

        // Then
        assert_eq!("SYS  USR i need a hotel", composed_first.history);
        assert_eq!(
            "SYS  USR i need a hotel SYS any area in mind ? USR the centre",
            composed_second.history
        );
    }

    #[test]
    fn test_only_user_turns_are_annotated_by_default() {
        // Given
        struct MarkingExtractor;
        impl ValueExtractor for MarkingExtractor {
            fn annotate(&self, utterance: &str, _context: &TurnContext) -> Result<String> {
                Ok(format!("{} ENT x", utterance))
            }
        }
        let composer = TurnComposer::new(true);
        let annotator = TurnAnnotator::new(Box::new(MarkingExtractor), false);
        let turn = turn("hello", "hi there");

        // When
        let composed = composer.compose(&annotator, "", &turn).unwrap();

        // Then
        assert_eq!("SYS hello USR hi there ENT x", composed.history);
    }
}
