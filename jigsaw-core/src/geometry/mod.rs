pub mod path;
pub mod r2;
pub mod silhouette;
