//! An in-memory ordered set built on a skip list, with order-statistic
//! queries.
//!
//! ```
//! use cesium_skiplist::SkipList;
//!
//! let mut list = SkipList::new();
//! for key in [5, 3, 8, 1] {
//!     list.insert(key).unwrap();
//! }
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 8]);
//! assert_eq!(list.select(1), Ok(&1));
//! assert_eq!(list.select(4), Ok(&8));
//! assert!(list.select(5).is_err());
//!
//! list.delete(&3);
//! assert_eq!(list.search(&3), None);
//! assert_eq!(list.rank(&8), Some(3));
//! ```

/// Construction-time settings.
pub mod config;
pub mod errs;

/// A [`skip list`] with per-link widths, after the design of [`JP-Ellis`]'
/// `rust-skiplist`.
///
/// [`skip list`]: https://en.wikipedia.org/wiki/Skip_list
/// [`JP-Ellis`]: https://github.com/JP-Ellis/rust-skiplist/
pub mod skiplist;

pub use config::{
    Config,
    ConfigBuilder,
};
pub use errs::{
    Result,
    SkipListError,
};
pub use skiplist::{
    GeometricalLevelGenerator,
    LevelGenerator,
    ScriptedLevelGenerator,
    SkipList,
};
