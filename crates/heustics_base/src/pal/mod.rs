/* 📖 # What is the Platform Abstraction Layer?

The PAL puts filesystem access and subprocess execution behind the `Pal` trait.
Code that reads change lists, probes for Makefiles or shells out to `go list` takes a
`PalHandle`, so tests can run against MockPal with scripted files and command output.
*/

mod file_path;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{CommandOutput, Pal, PalHandle};
