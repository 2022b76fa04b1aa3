//! Key layout constants.
//!
//! | Key | Type | Content |
//! |---|---|---|
//! | `TODOS_ORDER` | list | identifiers, newest-first |
//! | `TODO:<id>` | string | JSON record |

use crate::state::TodoId;

/// Key of the list holding display order.
pub const ORDER_KEY: &str = "TODOS_ORDER";

/// Prefix of every record key.
pub const RECORD_KEY_PREFIX: &str = "TODO:";

/// Key under which a record is stored.
#[must_use]
pub fn record_key(id: &TodoId) -> String {
    format!("{RECORD_KEY_PREFIX}{id}")
}
