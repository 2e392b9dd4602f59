/// Channel history cleanup helpers backing bulk deletes.
pub mod cleanup;
/// Shared formatting helpers (mentions, durations, acknowledgments).
pub mod formatting;
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
/// Shared time helpers.
pub mod time;
