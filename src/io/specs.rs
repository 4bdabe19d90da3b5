use crate::aba::RawABAFramework;
use anyhow::Result;
use std::io::Read;

/// The type of callback functions to call when warnings are raised while parsing a framework.
///
/// The first parameter is the index of the line (starting at 1), the second one is the warning message.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read ABA (and ABA+) frameworks.
pub trait ABAInstanceReader {
    /// Reads the primitives of a framework.
    ///
    /// The returned [RawABAFramework] must be given to an [ABAFrameworkBuilder](crate::aba::ABAFrameworkBuilder) to get the framework.
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustaba::aba::{ABAFramework, ABAFrameworkBuilder};
    /// # use crustaba::io::{ABAInstanceReader, ABAPlusReader};
    /// fn read_framework_from_str(s: &str) -> ABAFramework {
    ///     let reader = ABAPlusReader::default();
    ///     let raw = reader.read(&mut s.as_bytes()).expect("invalid ABA+ framework");
    ///     ABAFrameworkBuilder::default().build(&raw).expect("invalid ABA+ framework")
    /// }
    /// # read_framework_from_str("L: [a]\nA: [a]\n");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<RawABAFramework>;

    /// Adds a callback function to call when warnings are raised while parsing a framework.
    fn add_warning_handler(&mut self, h: WarningHandler);
}
