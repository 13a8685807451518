//! Search projection over the canonical list.

use crate::models::Note;

/// Project the display-ready subset of `notes` for a search query.
///
/// A note is included iff the query is a case-insensitive substring of its
/// title or content; an empty query matches everything. Canonical order is
/// preserved, never re-sorted by relevance. Pure and cheap at note-collection
/// scale, so it is recomputed on demand rather than cached.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    if query.is_empty() {
        return notes.iter().collect();
    }

    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteId;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id: NoteId(id),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn empty_query_returns_all_notes_in_order() {
        let notes = vec![note(3, "C", "z"), note(1, "A", "x"), note(2, "B", "y")];

        let projected = filter_notes(&notes, "");

        let ids: Vec<NoteId> = projected.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![NoteId(3), NoteId(1), NoteId(2)]);
    }

    #[test]
    fn projection_is_idempotent_for_same_inputs() {
        let notes = vec![note(1, "Grocery List", "eggs"), note(2, "Todo", "mow lawn")];

        let first = filter_notes(&notes, "o");
        let second = filter_notes(&notes, "o");

        assert_eq!(first, second);
    }

    #[test]
    fn matches_are_case_insensitive_substrings() {
        let notes = vec![note(1, "Grocery List", "eggs and milk")];

        for query in ["grocery", "LIST", "ery"] {
            assert_eq!(filter_notes(&notes, query).len(), 1, "query: {}", query);
        }
        assert!(filter_notes(&notes, "groceries").is_empty());
    }

    #[test]
    fn content_matches_count_too() {
        let notes = vec![note(1, "Title", "needle in here"), note(2, "Other", "nothing")];

        let projected = filter_notes(&notes, "NEEDLE");

        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].id, NoteId(1));
    }

    #[test]
    fn matches_keep_canonical_order_not_relevance() {
        let notes = vec![
            note(1, "b tail", "-"),
            note(2, "no match", "-"),
            note(3, "b", "-"),
        ];

        let ids: Vec<NoteId> = filter_notes(&notes, "b").iter().map(|n| n.id).collect();

        assert_eq!(ids, vec![NoteId(1), NoteId(3)]);
    }
}
