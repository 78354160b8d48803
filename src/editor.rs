use log::{debug, info, warn};

use crate::client::{self, SheetClient, WriteOutcome};
use crate::policy;
use crate::sheet::{SheetData, SheetRow};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Client(#[from] client::Error),

    #[error("row {editing} is already being edited")]
    EditInProgress { editing: u32 },

    #[error("no row {0} in the current snapshot")]
    UnknownRow(u32),

    #[error("no edit in progress")]
    NoActiveEdit,
}

/// A detached working copy of one row's cells
///
/// Edits never touch the snapshot directly; they accumulate here and are
/// only committed back after the write was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub row_index: u32,
    pub data: Vec<String>,
}

/// One user's editing session against a remote sheet
///
/// The session owns all mutable state: the current snapshot, the edit
/// draft and a fetch generation counter. At most one row is under edit at
/// a time; starting a second edit while one is active is rejected rather
/// than silently cancelling the first.
pub struct SheetSession {
    client: SheetClient,
    user_email: String,
    header: Vec<String>,
    rows: Vec<SheetRow>,
    edit: Option<EditDraft>,
    fetch_generation: u64,
}

impl SheetSession {
    pub fn new(client: SheetClient, user_email: impl Into<String>) -> Self {
        SheetSession {
            client,
            user_email: user_email.into(),
            header: Vec::new(),
            rows: Vec::new(),
            edit: None,
            fetch_generation: 0,
        }
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// The rows this session's user is allowed to see
    pub fn visible_rows(&self) -> Vec<&SheetRow> {
        policy::visible_rows(&self.rows, &self.user_email)
    }

    /// Index of the row under edit, if any
    pub fn editing_row(&self) -> Option<u32> {
        self.edit.as_ref().map(|edit| edit.row_index)
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.edit.as_ref()
    }

    /// Fetch the sheet and replace the snapshot wholesale
    ///
    /// On failure the previous snapshot stays in place and the user can
    /// retry. A reload while a fetch is still in flight wins over it, see
    /// [`SheetSession::install_snapshot`].
    pub async fn load(&mut self) -> Result<(), SessionError> {
        let generation = self.begin_fetch();
        let fetched = self.client.fetch_all().await?;
        self.install_snapshot(generation, fetched);
        Ok(())
    }

    /// Start a fetch and get its generation token
    ///
    /// Callers that run the fetch outside the session (a spawned task
    /// holding a clone of the client) pair this with
    /// [`SheetSession::install_snapshot`] so that overlapping fetches
    /// resolve newest-wins instead of last-resolved-wins.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_generation += 1;
        self.fetch_generation
    }

    /// Install a fetched snapshot, unless a newer fetch has started
    ///
    /// Returns whether the snapshot was accepted.
    pub fn install_snapshot(&mut self, generation: u64, data: SheetData) -> bool {
        if generation != self.fetch_generation {
            debug!("discarding stale fetch result (generation {generation})");
            return false;
        }
        info!("snapshot replaced: {} rows", data.rows.len());
        self.header = data.header;
        self.rows = data.rows;
        true
    }

    /// Start editing a row, detaching a copy of its cells
    pub fn begin_edit(&mut self, row_index: u32) -> Result<(), SessionError> {
        if let Some(edit) = &self.edit {
            return Err(SessionError::EditInProgress {
                editing: edit.row_index,
            });
        }

        let row = self
            .rows
            .iter()
            .find(|r| r.row_index == row_index)
            .ok_or(SessionError::UnknownRow(row_index))?;

        self.edit = Some(EditDraft {
            row_index,
            data: row.data.clone(),
        });
        Ok(())
    }

    /// Overwrite one cell of the draft
    ///
    /// The draft grows with empty cells when the row was shorter than the
    /// edited column.
    pub fn set_draft_cell(
        &mut self,
        col: usize,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let edit = self.edit.as_mut().ok_or(SessionError::NoActiveEdit)?;
        if edit.data.len() <= col {
            edit.data.resize(col + 1, String::new());
        }
        edit.data[col] = value.into();
        Ok(())
    }

    /// Dispatch the draft to the write webhook and commit it locally
    ///
    /// The webhook gives no confirmation, so a dispatched write is applied
    /// to the in-memory snapshot immediately and the edit state cleared.
    /// If the dispatch itself fails, the draft is kept so the user can
    /// retry without re-entering anything.
    pub async fn save(&mut self) -> Result<WriteOutcome, SessionError> {
        let Some(edit) = self.edit.as_ref() else {
            return Err(SessionError::NoActiveEdit);
        };

        let outcome = self.client.save_row(edit.row_index, &edit.data).await?;

        if let Some(EditDraft { row_index, data }) = self.edit.take() {
            match self.rows.iter_mut().find(|r| r.row_index == row_index) {
                Some(row) => {
                    row.data = data;
                    info!("row {row_index} committed locally after dispatch");
                }
                None => warn!("row {row_index} vanished from the snapshot before commit"),
            }
        }

        Ok(outcome)
    }

    /// Discard the draft and leave the snapshot untouched
    pub fn cancel_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            debug!("edit on row {} cancelled", edit.row_index);
        }
    }
}
