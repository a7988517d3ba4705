mod cache_factory;
mod formatter_factory;
mod presenter_factory;

pub use cache_factory::{CacheFactory, CacheType};
pub use formatter_factory::FormatterFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
