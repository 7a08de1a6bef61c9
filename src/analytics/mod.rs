//! Sales analytics read models.
//!
//! Category and product breakdowns for the analytics screen, and the daily
//! revenue series that feeds monthly payroll aggregation.

mod products;
mod sales;

pub use products::{
    CategoryPercentage, CategoryShare, ProductSales, category_percentages, top_products,
};
pub use sales::{Sale, SaleItem, SaleStatus, daily_revenue_series};
