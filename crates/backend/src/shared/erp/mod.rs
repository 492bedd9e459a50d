//! Клиент ERP (Frappe/ERPNext REST API)

pub mod backend;
pub mod client;
pub mod error;
pub mod list;

#[cfg(test)]
pub mod fake;

pub use backend::{
    created_document, get_as, list_as, list_of, stock_balance, ErpBackend, STOCK_BALANCE_METHOD,
};
pub use client::ErpClient;
pub use error::ErpError;
pub use list::{filled, list_query, with_eq, with_period, with_search};
