//! Wire types shared by the token broker and the translator client.

pub mod embed;
pub mod token;

pub use embed::{TokenEmbed, UpstreamErrorBody};
pub use token::{Claims, TokenResponse};
