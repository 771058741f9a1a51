//! `hm-place`: static objects (holes, huts, farms, factories, trees) and
//! their spatial index.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`placeable`] | `Placeable`, `KindData`, `Hut` (resident list owner)        |
//! | [`store`]     | `PlaceableStore` (append-only, R-tree overlap queries)      |
//! | [`error`]     | `PlaceError`, `PlaceResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on placeable types.        |

pub mod error;
pub mod placeable;
pub mod store;


pub use error::{PlaceError, PlaceResult};
pub use placeable::{Hut, KindData, Placeable};
pub use store::PlaceableStore;
