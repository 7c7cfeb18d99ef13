//! Expression source reading and merging

mod aggregator;

pub use aggregator::{
    LOCAL_OVERRIDE_SUFFIX, ParseFilesOptions, SourceAggregator, local_override_path,
    merge_entries,
};
