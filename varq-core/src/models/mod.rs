pub mod options;
pub mod query;
pub mod region;

// re-export for cleaner imports
pub use self::options::{FacetOptions, QueryOptions, RangeFacet, SortOrder};
pub use self::query::{QueryParam, VariantQuery};
pub use self::region::{Region, UNBOUNDED_END, UNBOUNDED_START, parse_regions};
