/* 📖 # Why have heustics_base as a core library?
heustics_base provides the error handling, tracing setup and platform abstraction shared by
the libraries and services of the repository, so each of them handles errors and I/O the same way.
*/

pub mod error;
mod error_tests;
pub mod pal;
pub mod tracing;

pub use error::{ErrorKind, HeusticsError, HeusticsResult, ResultExt};
pub use pal::{CommandOutput, FilePath, MockPal, Pal, PalHandle, RealPal};
