//! The fixed statements the gateway knows how to build.

use super::string::Statement;

/// Introspect the warehouse release.
pub const CURRENT_VERSION_SQL: &str = "SELECT CURRENT_VERSION()";

/// Statement run by `/query` when the caller does not supply one.
pub const DEFAULT_QUERY_SQL: &str = CURRENT_VERSION_SQL;

pub const DEFAULT_MENU_ITEMS_LIMIT: u32 = 10;

pub fn current_version() -> Statement {
    Statement::raw(CURRENT_VERSION_SQL)
}

/// List menu items from the Tasty Bytes `RAW_POS.MENU` table.
///
/// The limit is an integer by the time it gets here, so rendering it inline cannot change the
/// shape of the statement.
pub fn menu_items(limit: u32) -> Statement {
    Statement::raw(format!(
        "SELECT truck_brand_name, menu_item_name, item_category FROM MENU LIMIT {limit}"
    ))
}
