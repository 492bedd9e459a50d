pub mod filter_panel;
pub mod form_field;
pub mod item_lines;
pub mod option_select;
pub mod stat_card;
pub mod status_badge;
pub mod table;

pub use filter_panel::{FilterPanel, ListFilter, PartyField};
pub use form_field::{field_value, FormField};
pub use item_lines::{ItemLine, ItemLinesEditor};
pub use option_select::OptionSelect;
pub use stat_card::{CardTone, StatCard};
pub use status_badge::StatusBadge;
pub use table::TableCellMoney;
