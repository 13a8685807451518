//! Engine state, view projection, and the effect runner that drives them.

pub mod projection;
pub mod state;

use tracing::warn;

use crate::error::ValidationError;
use crate::gateway::NotesApi;
use crate::models::{Note, NoteId};
use crate::retry::{list_with_retry, RetryPolicy};

pub use projection::filter_notes;
pub use state::{EditSession, Effect, NoteDraft, NotesState, RemoteEvent};

/// Effect runner owning the engine state and a gateway.
///
/// Entry points mirror the actions a presentation layer dispatches; reads go
/// through the accessors. Validation failures surface synchronously as `Err`;
/// network failures never do — they resolve into state (a status message, or
/// an unchanged canonical list).
///
/// Entry points take `&mut self`, so a single owner cannot interleave a
/// mutation with a pending refresh. Dropping an in-flight future abandons its
/// pending retry delay without touching state.
pub struct NoteStore<G> {
    state: NotesState,
    gateway: G,
    retry: RetryPolicy,
}

impl<G: NotesApi> NoteStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            state: NotesState::default(),
            gateway,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the list-fetch retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Access the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Canonical list, in backend order.
    pub fn notes(&self) -> &[Note] {
        self.state.notes()
    }

    /// Canonical list filtered by the current search query.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(self.state.notes(), self.state.search_query())
    }

    pub fn session(&self) -> &EditSession {
        self.state.session()
    }

    pub fn search_query(&self) -> &str {
        self.state.search_query()
    }

    pub fn creation_draft(&self) -> &NoteDraft {
        self.state.creation_draft()
    }

    /// Last reported mutation failure, if any.
    pub fn status(&self) -> Option<&str> {
        self.state.status()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.set_search_query(query);
    }

    pub fn set_creation_draft(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.state.set_creation_draft(title, content);
    }

    /// Start editing the given note. Returns `false` for an unknown id.
    pub fn select_for_edit(&mut self, id: NoteId) -> bool {
        self.state.select_for_edit(id)
    }

    pub fn update_draft(&mut self, title: Option<String>, content: Option<String>) {
        self.state.update_draft(title, content);
    }

    pub fn cancel_edit(&mut self) {
        self.state.cancel_edit();
    }

    /// Fetch the canonical list, retrying per the configured policy.
    ///
    /// Used for both the initial load and manual refreshes. An exhausted
    /// fetch leaves canonical state unchanged.
    pub async fn refresh(&mut self) {
        self.state.clear_status();
        let effect = self.state.refresh();
        self.drive(effect).await;
    }

    /// Submit the creation draft.
    pub async fn submit_create(&mut self) -> Result<(), ValidationError> {
        self.state.clear_status();
        let effect = self.state.submit_create()?;
        self.drive(effect).await;
        Ok(())
    }

    /// Commit the edit session's draft. No-op when idle.
    pub async fn commit_edit(&mut self) -> Result<(), ValidationError> {
        self.state.clear_status();
        let Some(effect) = self.state.commit_edit()? else {
            return Ok(());
        };
        self.drive(effect).await;
        Ok(())
    }

    /// Delete a note; the canonical list is pruned locally on success.
    pub async fn delete_note(&mut self, id: NoteId) {
        self.state.clear_status();
        let effect = self.state.delete_note(id);
        self.drive(effect).await;
    }

    /// Execute effects and fold their results back until the state settles.
    async fn drive(&mut self, effect: Effect) {
        let mut next = Some(effect);
        while let Some(effect) = next.take() {
            let event = self.execute(effect).await;
            next = self.state.apply(event);
        }
    }

    async fn execute(&self, effect: Effect) -> RemoteEvent {
        match effect {
            Effect::FetchNotes => match list_with_retry(&self.gateway, self.retry).await {
                Ok(notes) => RemoteEvent::NotesFetched(notes),
                Err(err) => {
                    warn!("refresh failed, keeping canonical state: {}", err);
                    RemoteEvent::FetchFailed(err.to_string())
                }
            },
            Effect::CreateNote { title, content } => {
                match self.gateway.create_note(&title, &content).await {
                    Ok(note) => RemoteEvent::NoteCreated(note),
                    Err(err) => {
                        warn!("create failed: {}", err);
                        RemoteEvent::CreateFailed(err.to_string())
                    }
                }
            }
            Effect::UpdateNote { id, title, content } => {
                match self.gateway.update_note(id, &title, &content).await {
                    Ok(note) => RemoteEvent::NoteUpdated(note),
                    Err(err) => {
                        warn!("update of note {} failed: {}", id, err);
                        RemoteEvent::UpdateFailed(err.to_string())
                    }
                }
            }
            Effect::DeleteNote { id } => match self.gateway.delete_note(id).await {
                Ok(()) => RemoteEvent::NoteDeleted(id),
                Err(err) => {
                    warn!("delete of note {} failed: {}", id, err);
                    RemoteEvent::DeleteFailed {
                        id,
                        message: err.to_string(),
                    }
                }
            },
        }
    }
}
