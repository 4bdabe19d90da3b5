use super::{cli_manager, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use crustaba::io::ABAPlusWriter;

const CMD_NAME: &str = "arguments";

pub(crate) struct ArgumentsCommand;

impl ArgumentsCommand {
    pub(crate) fn new() -> Self {
        ArgumentsCommand
    }
}

impl<'a> Command<'a> for ArgumentsCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Generates the arguments and the attacks of an ABA framework")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(common::reader_arg())
            .arg(common::strict_arg())
            .arg(common::no_transform_arg())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let framework = common::read_framework(arg_matches)?;
        let mut framework = common::prepare_framework(framework, arg_matches);
        framework.generate_arguments();
        framework.generate_attacks()?;
        let writer = ABAPlusWriter::default();
        let mut out = std::io::stdout();
        writer.write_arguments(&mut out, &framework)?;
        writer.write_attacks(&mut out, &framework)
    }
}
