pub mod workspace;

pub use workspace::WorkspaceRoot;
