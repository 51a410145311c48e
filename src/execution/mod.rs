pub mod trade_book;
pub mod types;

pub use trade_book::TradeBook;
