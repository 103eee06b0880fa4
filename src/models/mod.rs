mod project;
mod site_content;
mod blog;
mod contact;
mod stats;

pub use project::*;
pub use site_content::*;
pub use blog::*;
pub use contact::*;
pub use stats::*;
