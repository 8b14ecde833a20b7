mod merge_engine;

pub use merge_engine::combine_and_sort;
