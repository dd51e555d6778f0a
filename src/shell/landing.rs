//! Landing page copy

use crate::routing::Route;

pub const HEADLINE: &str = "Connect your campus";
pub const TAGLINE: &str = "Groups for classes, clubs, and communities. Share updates, comment, and like. Moderated to keep things positive.";

/// Calls to action, in display order
pub const CALLS_TO_ACTION: [(&str, Route); 2] =
    [("Get started", Route::Register), ("Sign in", Route::Login)];
