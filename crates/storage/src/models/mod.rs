mod profile;

pub use profile::{Profile, Project, Social};
