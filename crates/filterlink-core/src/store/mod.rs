pub mod row;
pub mod row_store;

pub use row::{compute_row_id, display_name, link_status, LinkColor, LinkRow, RowId};
pub use row_store::{RowChange, RowStore};
