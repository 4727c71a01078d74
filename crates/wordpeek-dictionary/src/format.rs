use crate::types::Entry;

/// Render provider entries into the plain-text report shown in a result window.
///
/// Returns `None` when no entry produced a single line, which callers treat
/// as "not found" even though the provider answered 200.
pub fn format_entries(entries: &[Entry]) -> Option<String> {
    let mut lines = Vec::new();

    for entry in entries {
        if let Some(word) = &entry.word {
            lines.push(format!("Word: {word}"));
        }

        let phonetics: Vec<&str> = entry
            .phonetics
            .iter()
            .flatten()
            .filter_map(|p| p.text.as_deref())
            .filter(|text| !text.is_empty())
            .collect();
        if !phonetics.is_empty() {
            lines.push(format!("Pronunciation: {}", phonetics.join(", ")));
        }

        for meaning in entry.meanings.iter().flatten() {
            lines.push(String::new());
            lines.push(format!(
                "Part of speech: {}",
                meaning.part_of_speech.as_deref().unwrap_or_default()
            ));

            for (index, definition) in meaning.definitions.iter().flatten().enumerate() {
                lines.push(format!(
                    "  {}. {}",
                    index + 1,
                    definition.definition.as_deref().unwrap_or_default()
                ));
                if let Some(example) = definition.example.as_deref()
                    && !example.is_empty()
                {
                    lines.push(format!("     e.g., {example}"));
                }
            }
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
