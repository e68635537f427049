//! Project toolchain adapters.

mod dotnet;
mod recording;

pub use dotnet::{DotnetCommand, DotnetToolchain, manifest_path};
pub use recording::{RecordingToolchain, ToolchainCall};
