//! Configuration section definitions.
//!
//! Each module corresponds to a section in `viewwatch.toml`:
//!
//! | Module   | TOML Section | Purpose                               |
//! |----------|--------------|---------------------------------------|
//! | `build`  | `[build]`    | Frontend root, output, views layout   |
//! | `watch`  | `[watch]`    | Debounce timing for watch mode        |
//! | `routes` | `[routes]`   | Server route list for the registry    |

mod build;
mod routes;
mod watch;

pub use build::BuildSectionConfig;
pub use routes::RoutesConfig;
pub use watch::WatchConfig;
