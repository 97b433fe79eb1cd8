//! Market data: the curve store, baskets, and the views pricers read through.

mod basket;
mod proxy;
mod store;
mod view;

pub use basket::{Basket, BasketConstituent};
pub use proxy::{ScenarioView, TrackingMarket};
pub use store::MarketDataStore;
pub use view::{BumpContext, MarketView};
