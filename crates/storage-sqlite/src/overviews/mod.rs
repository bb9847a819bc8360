mod model;
mod repository;

pub use model::StockOverviewDB;
pub use repository::OverviewRepository;
