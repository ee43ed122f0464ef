//! Terminal rendering of the admin panel views.

pub mod format;
pub mod panels;
pub mod table;

pub use table::{LOADING_MESSAGE, Table, TableRow, render_list};
