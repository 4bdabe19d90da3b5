//! Objects used to read ABA+ frameworks and to write the computed arguments and attacks.

mod aba_plus_reader;
pub use aba_plus_reader::ABAPlusReader;

mod aba_plus_writer;
pub use aba_plus_writer::ABAPlusWriter;

mod iccma23_aba_reader;
pub use iccma23_aba_reader::Iccma23ABAReader;

mod specs;
pub use specs::ABAInstanceReader;
pub use specs::WarningHandler;

mod warning_result;
