mod debounce;
mod filter;
mod view;

pub use debounce::SearchInput;
pub use filter::{filter_transactions, is_search_active};
pub use view::FilteredView;
