//! UI Components
//!
//! Reusable Leptos components for the campus pages.

pub mod composer;
pub mod group_list;
pub mod loading;
pub mod navbar;
pub mod post_card;
pub mod toast;

pub use composer::GroupFeed;
pub use group_list::GroupList;
pub use navbar::Navbar;
pub use post_card::PostCard;
pub use toast::Toast;
