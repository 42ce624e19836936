//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract: scripts rely on them.
//!
//! | Code | Domain    | Description                                   |
//! |------|-----------|-----------------------------------------------|
//! | 0    | Universal | Success                                       |
//! | 1    | Universal | General error (unspecified)                   |
//! | 2    | Universal | CLI usage error (bad args)                    |
//! | 3    | analyze   | Input file missing or unreadable              |
//! | 4    | analyze   | Schema error (missing sheet or required column)|
//! | 5    | analyze   | Config parse or validation error              |
//! | 6    | analyze   | Export failed                                 |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing subcommand.
/// clap returns the same code itself on parse failure.
pub const EXIT_USAGE: u8 = 2;

/// An input file is missing or cannot be opened.
pub const EXIT_INPUT: u8 = 3;

/// The input opened but does not carry the expected shape: named sheet
/// missing, header row absent, or the flight-hours column unresolvable.
pub const EXIT_SCHEMA: u8 = 4;

/// Config file could not be read, parsed, or validated.
pub const EXIT_CONFIG: u8 = 5;

/// The output workbook or JSON file could not be written.
pub const EXIT_EXPORT: u8 = 6;
