pub mod a001_customer;
pub mod a003_item;
pub mod a004_sales_invoice;
pub mod a005_purchase_invoice;
pub mod a006_payment_entry;
pub mod a007_stock_entry;
pub mod a008_asset;
pub mod a009_lead;
pub mod a010_opportunity;
pub mod d400_business_summary;
pub mod u501_pos_order;
