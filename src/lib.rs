/*!
# Sheetsync

The data layer of a per-user spreadsheet row editor, built in Rust.

## Overview

This crate synchronizes rows of a remote tabular dataset (a hosted
spreadsheet) for a single signed-in user. It fetches the sheet as CSV,
turns it into identified rows, scopes what the user may see by an
identity column, and pushes edits back through a write webhook whose
response cannot be read.

The surrounding application concerns are deliberately external: an
identity provider supplies the user's email, and a presentation layer
renders the rows and edit widgets. This crate only owns the data model
and its synchronization rules.

## Architecture

Three layers, leaves first:

- Parser - converts the raw CSV body into rows of string fields
- Row model and repository - assigns stable row identity, fetches the
  sheet and dispatches row updates over HTTP
- View policy - pure rules for row visibility and sensitive-column
  display

On top of them, the session ties a snapshot, a single edit draft and the
remote client together for the UI to drive.

## Modules

- **parser**: delimited-text parsing with quoting and escaping
- **sheet**: row and snapshot types, row identity, column labels
- **client**: HTTP repository against the CSV export and write webhook
- **policy**: per-user visibility and redaction rules
- **editor**: the editing session (load, edit, save, cancel)

## Write semantics

The write webhook answers in a mode the caller cannot read, so a
"successful" save only means the request was dispatched. The in-memory
snapshot is updated optimistically and never re-fetched to confirm.
*/

pub mod client;
pub mod editor;
pub mod parser;
pub mod policy;
pub mod sheet;

/// Re-export everything from these modules to make it easier to use
pub use client::*;
pub use editor::*;
pub use parser::*;
pub use policy::*;
pub use sheet::*;
