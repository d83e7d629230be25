//! Toolkit-independent render descriptions for timeline entries.

use crate::model::record::DomainRecord;
use crate::timeline::entry::{EntryKind, TimelineEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderIcon {
    Microphone,
    /// Emotion emoji shown in place of an icon.
    Symbol(String),
    CheckCircle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDescription {
    pub kind: EntryKind,
    pub icon: RenderIcon,
    pub summary: String,
    /// Emotion note, or task completion line.
    pub secondary: Option<String>,
    /// Task-only "added at" line.
    pub added_line: Option<String>,
}

/// Describes how to render `entry`.
///
/// Returns `None` when the entry's kind and payload disagree, so callers
/// render nothing instead of failing.
pub fn describe(entry: &TimelineEntry) -> Option<RenderDescription> {
    let description = match (entry.kind, &entry.payload) {
        (EntryKind::Audio, DomainRecord::Audio(_)) => RenderDescription {
            kind: EntryKind::Audio,
            icon: RenderIcon::Microphone,
            summary: format!("Gravação de áudio em {}", entry.occurred_at),
            secondary: None,
            added_line: None,
        },
        (EntryKind::Emotion, DomainRecord::Emotion(record)) => RenderDescription {
            kind: EntryKind::Emotion,
            icon: RenderIcon::Symbol(record.emotion.clone()),
            summary: format!("Emoção registrada em {}", entry.occurred_at),
            secondary: (!record.note.is_empty()).then(|| record.note.clone()),
            added_line: None,
        },
        (EntryKind::Task, DomainRecord::Task(record)) => RenderDescription {
            kind: EntryKind::Task,
            icon: RenderIcon::CheckCircle,
            summary: format!("Tarefa: {}", record.text),
            secondary: record
                .completed_at
                .as_ref()
                .filter(|_| record.completed)
                .map(|completed_at| format!("Concluída em {completed_at}")),
            added_line: Some(format!("Adicionada em {}", entry.occurred_at)),
        },
        _ => return None,
    };
    Some(description)
}

#[cfg(test)]
mod tests {
    use super::{describe, RenderIcon};
    use crate::model::record::{AudioRecord, DomainRecord, EmotionRecord, TaskRecord};
    use crate::timeline::entry::{EntryKind, TimelineEntry};

    fn emotion_entry(note: &str) -> TimelineEntry {
        TimelineEntry::from_emotion(EmotionRecord {
            id: 5,
            emotion: "😔".to_string(),
            note: note.to_string(),
            date: "1/3/2024".to_string(),
            time: "8:15:00 PM".to_string(),
        })
    }

    #[test]
    fn audio_has_no_secondary_text() {
        let entry = TimelineEntry::from_audio(AudioRecord {
            id: 1,
            uri: "file:///a.m4a".to_string(),
            date: "1/1/2024".to_string(),
            time: "10:00 AM".to_string(),
        });
        let description = describe(&entry).unwrap();
        assert_eq!(description.icon, RenderIcon::Microphone);
        assert_eq!(description.summary, "Gravação de áudio em 1/1/2024 10:00 AM");
        assert_eq!(description.secondary, None);
    }

    #[test]
    fn emotion_shows_symbol_and_optional_note() {
        let with_note = describe(&emotion_entry("long day")).unwrap();
        assert_eq!(with_note.icon, RenderIcon::Symbol("😔".to_string()));
        assert_eq!(with_note.summary, "Emoção registrada em 1/3/2024 8:15:00 PM");
        assert_eq!(with_note.secondary.as_deref(), Some("long day"));

        let without_note = describe(&emotion_entry("")).unwrap();
        assert_eq!(without_note.secondary, None);
    }

    #[test]
    fn task_shows_completion_line() {
        let entry = TimelineEntry {
            id: 2,
            kind: EntryKind::Task,
            occurred_at: "1/2/2024, 9:00:00 AM".to_string(),
            payload: DomainRecord::Task(TaskRecord {
                id: 2,
                text: "run".to_string(),
                completed: true,
                created_at: "1/2/2024, 9:00:00 AM".to_string(),
                completed_at: Some("1/2/2024, 6:00:00 PM".to_string()),
            }),
        };
        let description = describe(&entry).unwrap();
        assert_eq!(description.icon, RenderIcon::CheckCircle);
        assert_eq!(description.summary, "Tarefa: run");
        assert_eq!(
            description.secondary.as_deref(),
            Some("Concluída em 1/2/2024, 6:00:00 PM")
        );
        assert_eq!(
            description.added_line.as_deref(),
            Some("Adicionada em 1/2/2024, 9:00:00 AM")
        );
    }

    #[test]
    fn mismatched_kind_renders_nothing() {
        let mut entry = emotion_entry("x");
        entry.kind = EntryKind::Audio;
        assert!(describe(&entry).is_none());
    }
}
