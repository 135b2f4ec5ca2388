//! src/util/mod.rs
//! Util layer: terminal plumbing with no entity logic in it.
//!
//!
//!     Module layout:
//!         src/util/mod.rs
//!             mod terminal;       // raw mode + alternate screen
//!
//!             pub use terminal::{init_terminal, restore_terminal, Term};
//!
//!
//!     `Term` is an alias for `Terminal<CrosstermBackend<Stdout>>` so the
//!     main loop can take `&mut Term` instead of the full type.
//!
//!     init_terminal():
//!         1. enable raw mode          every key arrives immediately, no echo
//!         2. enter alternate screen   the shell contents come back on exit
//!         3. build the ratatui terminal
//!
//!     restore_terminal():
//!         1. disable raw mode
//!         2. leave alternate screen
//!         3. show the cursor
//!
//!     main.rs calls restore_terminal right after app::run returns, before the
//!     run result is propagated, so an error never leaves the shell in raw mode.
//!

mod terminal;

pub use terminal::{init_terminal, restore_terminal, Term};
