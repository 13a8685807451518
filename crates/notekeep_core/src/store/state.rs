//! Owned engine state and its pure transition functions.
//!
//! Entry points mutate local state only and return the side-effect request
//! they want executed; gateway results come back through [`NotesState::apply`]
//! as [`RemoteEvent`]s. No function in this module performs IO.

use crate::error::ValidationError;
use crate::models::{validate_fields, Note, NoteId};

/// Draft fields for a note that has not been created yet.
///
/// Cleared only on confirmed successful creation, so a failed submit never
/// loses user input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// Edit session over a single canonical note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing {
        target: NoteId,
        draft_title: String,
        draft_content: String,
    },
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    /// Id of the note under edit, if any.
    pub fn target(&self) -> Option<NoteId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { target, .. } => Some(*target),
        }
    }
}

/// Side-effect requests produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchNotes,
    CreateNote { title: String, content: String },
    UpdateNote { id: NoteId, title: String, content: String },
    DeleteNote { id: NoteId },
}

/// Gateway results fed back into the state machine.
#[derive(Debug, Clone)]
pub enum RemoteEvent {
    NotesFetched(Vec<Note>),
    FetchFailed(String),
    NoteCreated(Note),
    CreateFailed(String),
    NoteUpdated(Note),
    UpdateFailed(String),
    NoteDeleted(NoteId),
    DeleteFailed { id: NoteId, message: String },
}

/// The engine's owned state: canonical list, edit session, search query,
/// creation draft, and the last reported mutation failure.
#[derive(Debug, Default)]
pub struct NotesState {
    notes: Vec<Note>,
    session: EditSession,
    search_query: String,
    creation_draft: NoteDraft,
    status: Option<String>,
}

impl NotesState {
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn creation_draft(&self) -> &NoteDraft {
        &self.creation_draft
    }

    /// Last reported mutation failure, cleared when the next action starts.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(crate) fn clear_status(&mut self) {
        self.status = None;
    }

    /// Request a (re)fetch of the canonical list.
    pub fn refresh(&self) -> Effect {
        Effect::FetchNotes
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_creation_draft(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.creation_draft = NoteDraft {
            title: title.into(),
            content: content.into(),
        };
    }

    /// Validate the creation draft and request the create call.
    ///
    /// The draft is kept intact either way; it only clears once the backend
    /// confirms the creation.
    pub fn submit_create(&mut self) -> Result<Effect, ValidationError> {
        validate_fields(&self.creation_draft.title, &self.creation_draft.content)?;
        Ok(Effect::CreateNote {
            title: self.creation_draft.title.clone(),
            content: self.creation_draft.content.clone(),
        })
    }

    /// Start editing the given note, seeding the draft from canonical values.
    ///
    /// Selecting a different note while already editing switches the session
    /// directly; the previous draft is dropped without warning. An id absent
    /// from the canonical list is a no-op.
    ///
    /// # Returns
    /// `true` when a session started.
    pub fn select_for_edit(&mut self, id: NoteId) -> bool {
        let Some(note) = self.notes.iter().find(|note| note.id == id) else {
            return false;
        };
        self.session = EditSession::Editing {
            target: note.id,
            draft_title: note.title.clone(),
            draft_content: note.content.clone(),
        };
        true
    }

    /// Apply keystroke-level edits to the draft. No-op when idle.
    pub fn update_draft(&mut self, title: Option<String>, content: Option<String>) {
        if let EditSession::Editing {
            draft_title,
            draft_content,
            ..
        } = &mut self.session
        {
            if let Some(title) = title {
                *draft_title = title;
            }
            if let Some(content) = content {
                *draft_content = content;
            }
        }
    }

    /// Discard the draft and return to idle. No backend call.
    pub fn cancel_edit(&mut self) {
        self.session = EditSession::Idle;
    }

    /// Validate the draft and request the update call.
    ///
    /// The session stays `Editing` until the gateway confirms the update (see
    /// [`NotesState::apply`]); a validation failure also leaves it in place so
    /// the user can correct the fields.
    pub fn commit_edit(&mut self) -> Result<Option<Effect>, ValidationError> {
        match &self.session {
            EditSession::Idle => Ok(None),
            EditSession::Editing {
                target,
                draft_title,
                draft_content,
            } => {
                validate_fields(draft_title, draft_content)?;
                Ok(Some(Effect::UpdateNote {
                    id: *target,
                    title: draft_title.clone(),
                    content: draft_content.clone(),
                }))
            }
        }
    }

    /// Request deletion of the given note.
    pub fn delete_note(&self, id: NoteId) -> Effect {
        Effect::DeleteNote { id }
    }

    /// Fold a gateway result into the state.
    ///
    /// # Returns
    /// A follow-up effect when the event calls for one (create/update success
    /// triggers a canonical refresh).
    pub fn apply(&mut self, event: RemoteEvent) -> Option<Effect> {
        match event {
            RemoteEvent::NotesFetched(notes) => {
                self.notes = notes;
                None
            }
            // Exhausted fetches are absorbed: canonical state stays whatever
            // it was and recovery is left to a manual refresh.
            RemoteEvent::FetchFailed(_) => None,
            RemoteEvent::NoteCreated(_) => {
                self.creation_draft = NoteDraft::default();
                Some(Effect::FetchNotes)
            }
            RemoteEvent::CreateFailed(message) => {
                self.status = Some(message);
                None
            }
            RemoteEvent::NoteUpdated(_) => {
                self.session = EditSession::Idle;
                Some(Effect::FetchNotes)
            }
            RemoteEvent::UpdateFailed(message) => {
                self.status = Some(message);
                None
            }
            RemoteEvent::NoteDeleted(id) => {
                self.notes.retain(|note| note.id != id);
                None
            }
            RemoteEvent::DeleteFailed { message, .. } => {
                self.status = Some(message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id: NoteId(id),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn state_with_notes(notes: Vec<Note>) -> NotesState {
        let mut state = NotesState::default();
        state.apply(RemoteEvent::NotesFetched(notes));
        state
    }

    #[test]
    fn select_seeds_draft_from_canonical_values() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);

        assert!(state.select_for_edit(NoteId(1)));
        assert_eq!(
            state.session(),
            &EditSession::Editing {
                target: NoteId(1),
                draft_title: "A".to_string(),
                draft_content: "x".to_string(),
            }
        );
    }

    #[test]
    fn select_unknown_id_stays_idle() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);

        assert!(!state.select_for_edit(NoteId(99)));
        assert_eq!(state.session(), &EditSession::Idle);
    }

    #[test]
    fn reselect_switches_target_and_drops_prior_draft() {
        let mut state = state_with_notes(vec![note(1, "A", "x"), note(2, "B", "y")]);
        state.select_for_edit(NoteId(1));
        state.update_draft(Some("edited".to_string()), None);

        assert!(state.select_for_edit(NoteId(2)));
        assert_eq!(
            state.session(),
            &EditSession::Editing {
                target: NoteId(2),
                draft_title: "B".to_string(),
                draft_content: "y".to_string(),
            }
        );
    }

    #[test]
    fn update_draft_touches_only_given_fields() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);
        state.select_for_edit(NoteId(1));

        state.update_draft(Some("B".to_string()), None);

        assert_eq!(
            state.session(),
            &EditSession::Editing {
                target: NoteId(1),
                draft_title: "B".to_string(),
                draft_content: "x".to_string(),
            }
        );
    }

    #[test]
    fn update_draft_is_noop_when_idle() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);
        state.update_draft(Some("B".to_string()), Some("y".to_string()));
        assert_eq!(state.session(), &EditSession::Idle);
    }

    #[test]
    fn cancel_discards_draft_without_touching_canonical() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);
        state.select_for_edit(NoteId(1));
        state.update_draft(Some("B".to_string()), None);

        state.cancel_edit();

        assert_eq!(state.session(), &EditSession::Idle);
        assert_eq!(state.notes(), &[note(1, "A", "x")]);
    }

    #[test]
    fn commit_with_blank_draft_keeps_session() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);
        state.select_for_edit(NoteId(1));
        state.update_draft(Some("  ".to_string()), None);

        let err = state.commit_edit().expect_err("blank title rejected");

        assert_eq!(err, ValidationError::EmptyTitle);
        assert!(state.session().is_editing());
    }

    #[test]
    fn commit_when_idle_requests_nothing() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);
        assert_eq!(state.commit_edit(), Ok(None));
    }

    #[test]
    fn commit_requests_update_with_draft_values() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);
        state.select_for_edit(NoteId(1));
        state.update_draft(Some("B".to_string()), None);

        let effect = state.commit_edit().expect("valid draft").expect("editing");

        assert_eq!(
            effect,
            Effect::UpdateNote {
                id: NoteId(1),
                title: "B".to_string(),
                content: "x".to_string(),
            }
        );
        // Still editing: only a confirmed update releases the session.
        assert!(state.session().is_editing());
    }

    #[test]
    fn submit_create_rejects_blank_fields_and_keeps_draft() {
        let mut state = NotesState::default();
        state.set_creation_draft("", "x");

        assert_eq!(state.submit_create(), Err(ValidationError::EmptyTitle));
        state.set_creation_draft("x", "   ");
        assert_eq!(state.submit_create(), Err(ValidationError::EmptyContent));
        assert_eq!(state.creation_draft().title, "x");
    }

    #[test]
    fn created_event_clears_draft_and_requests_refresh() {
        let mut state = NotesState::default();
        state.set_creation_draft("A", "x");

        let follow_up = state.apply(RemoteEvent::NoteCreated(note(1, "A", "x")));

        assert_eq!(follow_up, Some(Effect::FetchNotes));
        assert!(state.creation_draft().is_empty());
    }

    #[test]
    fn create_failure_preserves_draft_and_reports_once() {
        let mut state = NotesState::default();
        state.set_creation_draft("A", "x");

        let follow_up = state.apply(RemoteEvent::CreateFailed("boom".to_string()));

        assert_eq!(follow_up, None);
        assert_eq!(state.creation_draft().title, "A");
        assert_eq!(state.status(), Some("boom"));
    }

    #[test]
    fn updated_event_releases_session_and_requests_refresh() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);
        state.select_for_edit(NoteId(1));

        let follow_up = state.apply(RemoteEvent::NoteUpdated(note(1, "B", "x")));

        assert_eq!(follow_up, Some(Effect::FetchNotes));
        assert_eq!(state.session(), &EditSession::Idle);
    }

    #[test]
    fn update_failure_keeps_session_and_draft_intact() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);
        state.select_for_edit(NoteId(1));
        state.update_draft(Some("B".to_string()), None);

        state.apply(RemoteEvent::UpdateFailed("offline".to_string()));

        assert_eq!(
            state.session(),
            &EditSession::Editing {
                target: NoteId(1),
                draft_title: "B".to_string(),
                draft_content: "x".to_string(),
            }
        );
        assert_eq!(state.status(), Some("offline"));
    }

    #[test]
    fn deleted_event_prunes_exactly_that_id() {
        let mut state = state_with_notes(vec![note(1, "A", "x"), note(2, "B", "y")]);

        state.apply(RemoteEvent::NoteDeleted(NoteId(1)));

        assert_eq!(state.notes(), &[note(2, "B", "y")]);
    }

    #[test]
    fn fetch_failure_leaves_canonical_state_untouched() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);

        let follow_up = state.apply(RemoteEvent::FetchFailed("unreachable".to_string()));

        assert_eq!(follow_up, None);
        assert_eq!(state.notes(), &[note(1, "A", "x")]);
        // Absorbed silently: not a reported status.
        assert_eq!(state.status(), None);
    }

    #[test]
    fn fetch_replaces_canonical_list_wholesale() {
        let mut state = state_with_notes(vec![note(1, "A", "x")]);

        state.apply(RemoteEvent::NotesFetched(vec![note(2, "B", "y")]));

        assert_eq!(state.notes(), &[note(2, "B", "y")]);
    }
}
