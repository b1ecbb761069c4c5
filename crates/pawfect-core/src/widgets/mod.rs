//! # Widgets Module
//!
//! Self-contained page widgets. None of them depends on the contact form,
//! and none schedules its own timers: anything delayed (notice dismissal,
//! fade-in, map init) is driven by the runtime.

mod lightbox;
mod loader;
mod map;
mod nav;
mod notify;
mod scroll;
mod search;
mod team;

pub use lightbox::TeamGallery;
pub use loader::PageLoader;
pub use map::{DEFAULT_ZOOM, InteractiveMap, MapView, PRACTICE_LAT, PRACTICE_LON, TILE_ATTRIBUTION, TILE_URL};
pub use nav::MobileMenu;
pub use notify::Notifier;
pub use scroll::SmoothScroller;
pub use search::{SearchFeature, SearchHit};
pub use team::TeamInteractions;
