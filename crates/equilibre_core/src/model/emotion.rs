//! Fixed emotion catalog offered by the diary.

/// One selectable emotion: emoji symbol plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emotion {
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const EMOTIONS: &[Emotion] = &[
    Emotion {
        symbol: "😀",
        name: "Feliz",
    },
    Emotion {
        symbol: "😊",
        name: "Satisfeito",
    },
    Emotion {
        symbol: "😐",
        name: "Neutro",
    },
    Emotion {
        symbol: "😔",
        name: "Triste",
    },
    Emotion {
        symbol: "😢",
        name: "Muito Triste",
    },
    Emotion {
        symbol: "😡",
        name: "Raiva",
    },
];

/// Looks up a catalog emotion by its symbol.
pub fn find_emotion(symbol: &str) -> Option<&'static Emotion> {
    EMOTIONS.iter().find(|emotion| emotion.symbol == symbol)
}
