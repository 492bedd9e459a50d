pub mod api;
pub mod erp;
pub mod totals;
pub mod validation;
