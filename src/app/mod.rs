mod aba_plus_command;
pub(crate) use aba_plus_command::ABAPlusCommand;

mod app_helper;
pub(crate) use app_helper::AppHelper;

mod arguments_command;
pub(crate) use arguments_command::ArgumentsCommand;

mod authors_command;
pub(crate) use authors_command::AuthorsCommand;

mod check_command;
pub(crate) use check_command::CheckCommand;

mod cli_manager;

mod command;
pub(crate) use command::Command;

pub(crate) mod common;

mod writable_string;
