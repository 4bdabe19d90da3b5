use super::{cli_manager, command::Command, common};
use anyhow::Result;
use clap::{App, AppSettings, ArgMatches, SubCommand};
use crustaba::{aba::ABAPlusMode, io::ABAPlusWriter};
use log::info;

const CMD_NAME: &str = "aba-plus";

pub(crate) struct ABAPlusCommand;

impl ABAPlusCommand {
    pub(crate) fn new() -> Self {
        ABAPlusCommand
    }
}

impl<'a> Command<'a> for ABAPlusCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Generates the arguments and the preference-aware attacks of an ABA+ framework")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(common::reader_arg())
            .arg(common::strict_arg())
            .arg(common::no_transform_arg())
            .arg(common::mode_arg())
            .arg(cli_manager::logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let mode = common::read_mode(arg_matches)?;
        info!("computing ABA+ attacks between {}", mode.as_ref());
        let framework = common::read_framework(arg_matches)?;
        let mut framework = common::prepare_framework(framework, arg_matches);
        framework.generate_arguments();
        framework.generate_attacks()?;
        let writer = ABAPlusWriter::default();
        let mut out = std::io::stdout();
        writer.write_arguments(&mut out, &framework)?;
        writer.write_attacks(&mut out, &framework)?;
        match mode {
            ABAPlusMode::AssumptionSets => {
                framework.enumerate_assumption_subsets();
                framework.generate_preference_attacks()?;
                writer.write_preference_attacks(&mut out, &framework)
            }
            ABAPlusMode::Arguments => {
                let attacks = framework.generate_argument_preference_attacks()?;
                writer.write_argument_preference_attacks(&mut out, &attacks)
            }
        }
    }
}
