// Composition root for the time_approvals engine.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the SQLite database, member directory and outbox.
// - Wire them into the use case handlers the binary and embedders call.

pub mod config;
pub mod state;
