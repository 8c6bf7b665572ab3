//! Process exit codes for `refine`. Part of the CLI contract.

pub const SUCCESS: i32 = 0;
pub const FAILED: i32 = 1; // Input missing, reply unusable, or model server unreachable
pub const FATAL: i32 = 2; // Transport/HTTP failure or I/O error; run aborted
